//! Cart route handlers.
//!
//! The web drawer posts HTMX forms and gets the re-rendered panel back, with
//! any notices in an `HX-Trigger` header. The JSON API in
//! [`super::api::cart`] shares the outcome helpers below so both surfaces
//! notify the same way.
//!
//! Every handler works on the cart of the caller's session.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Deserializer};
use tower_sessions::Session;
use tracing::instrument;

use vinea_core::{Cart, CatalogItemId, VineyardId};

use crate::cart::{
    CartPanel, CartStore, CartUpdate, CheckoutFailure, CheckoutResult, OrderConfirmation,
};
use crate::catalog::EntryPoint;
use crate::error::Result;
use crate::notice::{Locale, Notice, hx_trigger};
use crate::state::AppState;

/// Header HTMX listens on for client-side events.
pub const HX_TRIGGER: &str = "hx-trigger";

// =============================================================================
// Shared Outcomes
// =============================================================================

/// A cart after a request, plus what to tell the user about it.
#[derive(Debug)]
pub struct CartOutcome {
    pub cart: Cart,
    pub notices: Vec<Notice>,
}

impl CartOutcome {
    fn from_update(update: CartUpdate, notice: Option<Notice>, locale: Locale) -> Self {
        let mut notices: Vec<Notice> = notice.into_iter().collect();
        if update.write_error.is_some() {
            notices.push(Notice::save_failed(locale));
        }
        Self {
            cart: update.cart,
            notices,
        }
    }

    fn unchanged(cart: Cart) -> Self {
        Self {
            cart,
            notices: Vec::new(),
        }
    }
}

/// Result of a checkout request.
#[derive(Debug)]
pub struct CheckoutOutcome {
    pub cart: Cart,
    pub notices: Vec<Notice>,
    pub confirmation: Option<OrderConfirmation>,
    pub failure: Option<CheckoutFailure>,
}

/// Which grid an add came from.
fn entry_point(vineyard_id: Option<String>) -> EntryPoint {
    vineyard_id.map_or(EntryPoint::Marketplace, |id| {
        EntryPoint::Vineyard(VineyardId::new(id))
    })
}

/// Add a wine from the grid it was shown in.
///
/// Returns `None` if that grid does not show `wine_id`; the store is not
/// touched.
#[must_use]
pub fn add_outcome(
    state: &AppState,
    cart: &CartStore,
    wine_id: &CatalogItemId,
    quantity: Option<u32>,
    vineyard_id: Option<String>,
) -> Option<CartOutcome> {
    let locale = state.locale();
    let (wine, update) = entry_point(vineyard_id).add_to_cart(
        cart,
        state.catalog(),
        wine_id,
        quantity.unwrap_or(1),
    )?;
    let notice = Notice::item_added(&wine.name, wine.year, locale);
    Some(CartOutcome::from_update(update, Some(notice), locale))
}

#[must_use]
pub fn update_outcome(
    state: &AppState,
    cart: &CartStore,
    wine_id: &CatalogItemId,
    delta: i64,
) -> CartOutcome {
    let update = cart.update_quantity(wine_id, delta);
    CartOutcome::from_update(update, None, state.locale())
}

#[must_use]
pub fn remove_outcome(state: &AppState, cart: &CartStore, wine_id: &CatalogItemId) -> CartOutcome {
    let locale = state.locale();
    let update = cart.remove_item(wine_id);
    let notice = update.changed.then(|| Notice::item_removed(locale));
    CartOutcome::from_update(update, notice, locale)
}

#[must_use]
pub fn clear_outcome(state: &AppState, cart: &CartStore) -> CartOutcome {
    let locale = state.locale();
    let update = cart.clear();
    let notice = update.changed.then(|| Notice::cart_cleared(locale));
    CartOutcome::from_update(update, notice, locale)
}

#[must_use]
pub fn checkout_outcome(state: &AppState, cart: &CartStore) -> CheckoutOutcome {
    let locale = state.locale();
    match cart.checkout(state.checkout()) {
        CheckoutResult::Placed {
            confirmation,
            write_error,
        } => {
            let mut notices = vec![Notice::order_placed(locale)];
            if write_error.is_some() {
                notices.push(Notice::save_failed(locale));
            }
            CheckoutOutcome {
                cart: cart.snapshot(),
                notices,
                confirmation: Some(confirmation),
                failure: None,
            }
        }
        CheckoutResult::Failed(failure) => CheckoutOutcome {
            cart: cart.snapshot(),
            notices: vec![Notice::checkout_failed(&failure, locale)],
            confirmation: None,
            failure: Some(failure),
        },
    }
}

// =============================================================================
// Form Types
// =============================================================================

/// HTMX sends empty inputs as empty strings.
fn empty_as_none<'de, D, T>(de: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = Option::<String>::deserialize(de)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub wine_id: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub quantity: Option<u32>,
    /// Set when the add comes from a vineyard page.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub vineyard_id: Option<String>,
}

/// Quantity step form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub wine_id: String,
    pub delta: i64,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub wine_id: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Cart panel fragment (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_panel.html")]
pub struct CartPanelTemplate {
    pub panel: CartPanel,
}

fn render(state: &AppState, cart: &Cart, notices: &[Notice]) -> Response {
    let mut response = CartPanelTemplate {
        panel: CartPanel::new(cart, state.locale()),
    }
    .into_response();
    if let Some(value) = hx_trigger(notices) {
        response.headers_mut().insert(HX_TRIGGER, value);
    }
    response
}

// =============================================================================
// Handlers
// =============================================================================

/// Open the cart panel. Re-reads the slot first.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<Response> {
    let cart = state.carts().for_session(&session).await?.load();
    Ok(render(&state, &cart, &[]))
}

/// Add a wine to the cart (HTMX).
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let cart = state.carts().for_session(&session).await?;
    let wine_id = CatalogItemId::new(form.wine_id);
    let outcome = add_outcome(&state, &cart, &wine_id, form.quantity, form.vineyard_id)
        .unwrap_or_else(|| CartOutcome::unchanged(cart.snapshot()));
    Ok(render(&state, &outcome.cart, &outcome.notices))
}

/// Step a line's quantity (HTMX).
#[instrument(skip(state, session))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<UpdateCartForm>,
) -> Result<Response> {
    let cart = state.carts().for_session(&session).await?;
    let outcome = update_outcome(&state, &cart, &CatalogItemId::new(form.wine_id), form.delta);
    Ok(render(&state, &outcome.cart, &outcome.notices))
}

/// Remove a line (HTMX).
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Response> {
    let cart = state.carts().for_session(&session).await?;
    let outcome = remove_outcome(&state, &cart, &CatalogItemId::new(form.wine_id));
    Ok(render(&state, &outcome.cart, &outcome.notices))
}

/// Empty the cart (HTMX).
#[instrument(skip(state, session))]
pub async fn clear(State(state): State<AppState>, session: Session) -> Result<Response> {
    let cart = state.carts().for_session(&session).await?;
    let outcome = clear_outcome(&state, &cart);
    Ok(render(&state, &outcome.cart, &outcome.notices))
}

/// Place the order (HTMX).
#[instrument(skip(state, session))]
pub async fn checkout(State(state): State<AppState>, session: Session) -> Result<Response> {
    let cart = state.carts().for_session(&session).await?;
    let outcome = checkout_outcome(&state, &cart);
    Ok(render(&state, &outcome.cart, &outcome.notices))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct QuantityField {
        #[serde(default, deserialize_with = "empty_as_none")]
        quantity: Option<u32>,
    }

    fn parse(raw: &str) -> Option<u32> {
        serde_json::from_str::<QuantityField>(raw).unwrap().quantity
    }

    #[test]
    fn test_empty_as_none() {
        assert_eq!(parse(r#"{"quantity": ""}"#), None);
        assert_eq!(parse(r#"{"quantity": " 3 "}"#), Some(3));
        assert_eq!(parse("{}"), None);
        assert!(serde_json::from_str::<QuantityField>(r#"{"quantity": "two"}"#).is_err());
    }

    fn hx_vals(html: &str) -> Vec<serde_json::Value> {
        html.split("hx-vals='")
            .skip(1)
            .map(|rest| {
                let end = rest.find('\'').unwrap();
                serde_json::from_str(&rest[..end]).unwrap()
            })
            .collect()
    }

    #[test]
    fn test_panel_buttons_carry_json_ids() {
        let id = r#"it's "1" \ <b>"#;
        let wine = vinea_core::CatalogItem {
            id: CatalogItemId::new(id),
            name: "Quoted".to_string(),
            year: 2015,
            price: vinea_core::Price::from_units(10),
            image_url: String::new(),
            stock: 5,
            wine_type: "Rouge".to_string(),
            region: "Bordeaux".to_string(),
            rating: 4.0,
            description: String::new(),
            vineyard_id: VineyardId::new("1"),
        };
        let mut cart = Cart::new();
        cart.add_item(&wine, 2);

        let html = CartPanelTemplate {
            panel: CartPanel::new(&cart, Locale::En),
        }
        .render()
        .unwrap();

        let vals = hx_vals(&html);
        assert_eq!(vals.len(), 3);
        for value in &vals {
            assert_eq!(value["wine_id"], id);
        }
        assert_eq!(vals[0]["delta"], "-1");
        assert_eq!(vals[1]["delta"], "1");
    }

    #[test]
    fn test_entry_point_from_form() {
        assert_eq!(entry_point(None), EntryPoint::Marketplace);
        assert_eq!(
            entry_point(Some("3".to_string())),
            EntryPoint::Vineyard(VineyardId::new("3"))
        );
    }
}
