//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                 - Health check
//!
//! # Catalog
//! GET    /marketplace            - Wine listing (search, region, type)
//! GET    /vineyards/{id}         - Vineyard detail with its wines
//! GET    /projects               - Funding projects (search, region)
//! GET    /projects/{id}          - Project detail with rewards
//!
//! # Cart (HTMX fragments, one cart per session cookie)
//! GET    /cart                   - Cart panel (reloads the slot)
//! POST   /cart/add               - Add a wine (wine_id, quantity?, vineyard_id?)
//! POST   /cart/update            - Step a quantity (wine_id, delta)
//! POST   /cart/remove            - Remove a line (wine_id)
//! POST   /cart/clear             - Empty the cart
//! POST   /cart/checkout          - Place the order
//!
//! # Cart API (mobile)
//! GET    /api/cart               - Cart panel JSON
//! POST   /api/cart/items         - Add a wine
//! PATCH  /api/cart/items/{id}    - Step a quantity
//! DELETE /api/cart/items/{id}    - Remove a line
//! DELETE /api/cart               - Empty the cart
//! POST   /api/cart/checkout      - Place the order
//!
//! # Auth
//! POST   /auth/register          - Create an account
//! POST   /auth/login             - Sign in
//! POST   /auth/logout            - Sign out
//! GET    /auth/me                - Current user
//! ```

pub mod api;
pub mod auth;
pub mod cart;
pub mod catalog;

use axum::{
    Router,
    extract::Request,
    routing::{get, patch, post},
};
use tower_http::trace::TraceLayer;

use crate::middleware::{create_session_layer, request_id_middleware};
use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/me", get(auth::me))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/checkout", post(cart::checkout))
}

/// Create the mobile cart API router.
pub fn cart_api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(api::cart::show).delete(api::cart::clear))
        .route("/items", post(api::cart::add_item))
        .route(
            "/items/{id}",
            patch(api::cart::update_item).delete(api::cart::remove_item),
        )
        .route("/checkout", post(api::cart::checkout))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        // Catalog grids
        .route("/marketplace", get(catalog::marketplace))
        .route("/vineyards/{id}", get(catalog::vineyard))
        .route("/projects", get(catalog::projects))
        .route("/projects/{id}", get(catalog::project))
        // Cart routes
        .nest("/cart", cart_routes())
        .nest("/api/cart", cart_api_routes())
        // Auth routes
        .nest("/auth", auth_routes())
}

/// The full application: routes, state and the middleware stack.
pub fn app(state: AppState) -> Router {
    let session_layer = create_session_layer(state.sessions().clone(), state.config());

    routes()
        .with_state(state)
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(session_layer)
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                request_id = tracing::field::Empty,
            )
        }))
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
