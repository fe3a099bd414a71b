//! The API endpoints URIs.

/// The route for creating a Plaid link token.
pub const CREATE_LINK_TOKEN: &str = "/create_link_token";
/// The route for exchanging a public token and fetching recent transactions.
pub const EXCHANGE_PUBLIC_TOKEN: &str = "/exchange_public_token";
/// The route for static files.
pub const STATIC: &str = "/static";
