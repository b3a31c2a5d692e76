//! Cart endpoints for the mobile app.
//!
//! Same operations as the web drawer; the panel comes back as JSON and
//! notices ride along in the body instead of a header. The app keeps the
//! session cookie like a browser does, so each device has its own cart.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use vinea_core::{Cart, CatalogItemId};

use crate::cart::{CartPanel, OrderConfirmation};
use crate::error::{AppError, Result};
use crate::notice::Notice;
use crate::routes::cart::{
    CartOutcome, add_outcome, checkout_outcome, clear_outcome, remove_outcome, update_outcome,
};
use crate::state::AppState;

/// Body for `POST /api/cart/items`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    pub wine_id: String,
    pub quantity: Option<u32>,
    pub vineyard_id: Option<String>,
}

/// Body for `PATCH /api/cart/items/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    pub delta: i64,
}

#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub cart: CartPanel,
    pub notices: Vec<Notice>,
}

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub order: Option<OrderConfirmation>,
    pub cart: CartPanel,
    pub notices: Vec<Notice>,
}

fn respond(state: &AppState, cart: &Cart, notices: Vec<Notice>) -> Json<CartResponse> {
    Json(CartResponse {
        cart: CartPanel::new(cart, state.locale()),
        notices,
    })
}

fn respond_outcome(state: &AppState, outcome: CartOutcome) -> Json<CartResponse> {
    respond(state, &outcome.cart, outcome.notices)
}

/// Open the cart. Re-reads the slot first.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<Json<CartResponse>> {
    let cart = state.carts().for_session(&session).await?.load();
    Ok(respond(&state, &cart, Vec::new()))
}

/// Add a wine. Unknown wines are a 404 and leave the cart alone.
#[instrument(skip(state, session))]
pub async fn add_item(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<AddItemRequest>,
) -> Result<Json<CartResponse>> {
    let cart = state.carts().for_session(&session).await?;
    let wine_id = CatalogItemId::new(request.wine_id);
    let outcome = add_outcome(&state, &cart, &wine_id, request.quantity, request.vineyard_id)
        .ok_or_else(|| AppError::NotFound(format!("wine {wine_id}")))?;
    Ok(respond_outcome(&state, outcome))
}

#[instrument(skip(state, session))]
pub async fn update_item(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    Json(request): Json<UpdateItemRequest>,
) -> Result<Json<CartResponse>> {
    let cart = state.carts().for_session(&session).await?;
    let outcome = update_outcome(&state, &cart, &CatalogItemId::new(id), request.delta);
    Ok(respond_outcome(&state, outcome))
}

#[instrument(skip(state, session))]
pub async fn remove_item(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Json<CartResponse>> {
    let cart = state.carts().for_session(&session).await?;
    let outcome = remove_outcome(&state, &cart, &CatalogItemId::new(id));
    Ok(respond_outcome(&state, outcome))
}

#[instrument(skip(state, session))]
pub async fn clear(State(state): State<AppState>, session: Session) -> Result<Json<CartResponse>> {
    let cart = state.carts().for_session(&session).await?;
    let outcome = clear_outcome(&state, &cart);
    Ok(respond_outcome(&state, outcome))
}

/// Place the order. A refused order is a 422 with the cart unchanged.
#[instrument(skip(state, session))]
pub async fn checkout(State(state): State<AppState>, session: Session) -> Result<Response> {
    let cart = state.carts().for_session(&session).await?;
    let outcome = checkout_outcome(&state, &cart);
    let status = if outcome.failure.is_some() {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        StatusCode::OK
    };
    let body = CheckoutResponse {
        order: outcome.confirmation,
        cart: CartPanel::new(&outcome.cart, state.locale()),
        notices: outcome.notices,
    };
    Ok((status, Json(body)).into_response())
}
