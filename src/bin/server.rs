use std::{net::SocketAddr, path::PathBuf, time::Duration};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware,
};
use axum_server::Handle;
use clap::Parser;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use budgetly_proxy::{
    AppState, PlaidClient, PlaidConfig, PlaidEnvironment, build_router, graceful_shutdown,
    logging_middleware,
};

/// The Budgetly proxy server between the mobile app and Plaid.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The Plaid environment to use: sandbox, development or production.
    #[arg(long, env = "PLAID_ENV", default_value = "sandbox")]
    plaid_env: String,

    /// The Plaid client ID.
    #[arg(long, env = "PLAID_CLIENT_ID", default_value = "")]
    plaid_client_id: String,

    /// The Plaid secret for the chosen environment.
    #[arg(long, env = "PLAID_SECRET", default_value = "", hide_env_values = true)]
    plaid_secret: String,

    /// The app name shown to users in Plaid Link.
    #[arg(long, env = "PLAID_APP_NAME", default_value = "My App")]
    plaid_app_name: String,

    /// The maximum number of seconds to wait for Plaid to respond.
    #[arg(long, env = "PLAID_TIMEOUT_SECS", default_value_t = 30)]
    upstream_timeout_secs: u64,

    /// The directory of static files to serve under `/static`.
    #[arg(long, env = "PUBLIC_DIR", default_value = "public")]
    public_dir: PathBuf,

    /// The port to serve the API from.
    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() {
    setup_logging();

    let args = Args::parse();

    let environment = PlaidEnvironment::from_name(&args.plaid_env);
    let config = PlaidConfig::new(
        environment,
        args.plaid_client_id,
        args.plaid_secret,
        args.plaid_app_name,
    )
    .with_timeout(Duration::from_secs(args.upstream_timeout_secs));

    if config.is_missing_credentials() {
        tracing::warn!(
            "PLAID_CLIENT_ID or PLAID_SECRET is not set, requests to Plaid will fail until they are."
        );
    }

    let plaid = PlaidClient::new(config).expect("Could not create the Plaid HTTP client.");
    tracing::info!(
        "Using the Plaid {} environment at {}",
        plaid.environment(),
        plaid.base_url()
    );

    let state = AppState::new(plaid, args.public_dir);

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = add_tracing_layer(
        build_router(state).layer(middleware::from_fn(logging_middleware)),
    );

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    tracing::info!("HTTP server listening on {}", addr);
    axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
        .expect("The HTTP server stopped unexpectedly.");
}

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().pretty())
        .init();
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // By default, `TraceLayer` will log 5xx responses but we're doing our specific
        // logging of errors so disable that
        .on_failure(());

    router.layer(tracing_layer)
}
