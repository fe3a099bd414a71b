//! Application router configuration.

use axum::{
    Json, Router,
    http::{
        HeaderName, Method, StatusCode,
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, ORIGIN},
    },
    response::{IntoResponse, Response},
    routing::post,
};
use serde_json::json;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
};

use crate::{
    AppState, endpoints,
    link::{create_link_token_endpoint, exchange_public_token_endpoint},
    session::CLIENT_USER_ID_HEADER,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let public_dir = state.public_dir.clone();

    Router::new()
        .route(endpoints::CREATE_LINK_TOKEN, post(create_link_token_endpoint))
        .route(
            endpoints::EXCHANGE_PUBLIC_TOKEN,
            post(exchange_public_token_endpoint),
        )
        .nest_service(endpoints::STATIC, ServeDir::new(public_dir))
        .fallback(get_404_not_found)
        .layer(cors_layer())
        .with_state(state)
}

/// Allow the app, simulators and local tools to call the API from any origin.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            ACCEPT,
            CONTENT_TYPE,
            ORIGIN,
            AUTHORIZATION,
            HeaderName::from_static(CLIENT_USER_ID_HEADER),
        ])
}

async fn get_404_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "The requested resource could not be found." })),
    )
        .into_response()
}
