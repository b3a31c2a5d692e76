//! Integration tests for the HTMX cart drawer.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;

use vinea_integration_tests::TestContext;

// =============================================================================
// Panel
// =============================================================================

#[tokio::test]
async fn test_empty_panel() {
    let ctx = TestContext::new();

    let response = ctx.get("/cart").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Votre panier est vide"));
    assert!(response.body.contains("Continuer vos achats"));
    assert!(response.body.contains("0.00 €"));
    assert!(response.notices().is_empty());
}

#[tokio::test]
async fn test_add_renders_panel_with_notice() {
    let ctx = TestContext::new();

    let response = ctx.post_form("/cart/add", "wine_id=1&quantity=2").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Château Margaux Grand Cru"));
    assert!(response.body.contains("2 articles dans votre panier"));
    assert!(response.body.contains("240.00 €"));
    assert!(response.body.contains("250.00 €"));

    let notices = response.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0]["title"], "Ajouté au panier");
    assert_eq!(
        notices[0]["description"],
        "Château Margaux Grand Cru (2015) a été ajouté à votre panier"
    );
}

#[tokio::test]
async fn test_add_with_empty_quantity_defaults_to_one() {
    let ctx = TestContext::new();

    let response = ctx
        .post_form("/cart/add", "wine_id=5&quantity=&vineyard_id=")
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("1 article dans votre panier"));
}

#[tokio::test]
async fn test_add_unknown_wine_is_a_no_op() {
    let ctx = TestContext::new();

    let response = ctx.post_form("/cart/add", "wine_id=999").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("Votre panier est vide"));
    assert!(response.notices().is_empty());
    assert!(ctx.slot().await.is_none());
}

#[tokio::test]
async fn test_vineyard_grid_only_adds_its_own_wines() {
    let ctx = TestContext::new();

    // Wine 2 belongs to vineyard 2, not vineyard 1
    let response = ctx.post_form("/cart/add", "wine_id=2&vineyard_id=1").await;
    assert!(response.notices().is_empty());
    assert!(ctx.slot().await.is_none());

    let response = ctx.post_form("/cart/add", "wine_id=8&vineyard_id=1").await;
    assert_eq!(response.notice_titles(), ["Ajouté au panier"]);
    assert_eq!(ctx.slot_json().await[0]["id"], "8");
}

// =============================================================================
// Quantity, Remove, Clear
// =============================================================================

#[tokio::test]
async fn test_decrement_clamps_at_one() {
    let ctx = TestContext::new();
    let _ = ctx.post_form("/cart/add", "wine_id=3").await;

    let response = ctx.post_form("/cart/update", "wine_id=3&delta=-1").await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body.contains("1 article dans votre panier"));
    assert!(response.body.contains("disabled"));
    assert_eq!(ctx.slot_json().await[0]["quantity"], 1);
}

#[tokio::test]
async fn test_increment_updates_totals() {
    let ctx = TestContext::new();
    let _ = ctx.post_form("/cart/add", "wine_id=3").await;

    let response = ctx.post_form("/cart/update", "wine_id=3&delta=1").await;

    assert!(response.body.contains("2 articles dans votre panier"));
    assert!(response.body.contains("360.00 €"));
    assert!(response.body.contains("370.00 €"));
    assert!(response.notices().is_empty());
}

#[tokio::test]
async fn test_remove_notifies_only_when_something_was_removed() {
    let ctx = TestContext::new();
    let _ = ctx.post_form("/cart/add", "wine_id=1").await;
    let _ = ctx.post_form("/cart/add", "wine_id=2").await;

    let response = ctx.post_form("/cart/remove", "wine_id=1").await;
    assert_eq!(response.notice_titles(), ["Article retiré"]);
    assert!(!response.body.contains("Château Margaux"));
    assert!(response.body.contains("Romanée-Conti"));

    let response = ctx.post_form("/cart/remove", "wine_id=1").await;
    assert!(response.notices().is_empty());
}

#[tokio::test]
async fn test_clear_empties_and_persists() {
    let ctx = TestContext::new();
    let _ = ctx.post_form("/cart/add", "wine_id=1").await;

    let response = ctx.post_form("/cart/clear", "").await;

    assert_eq!(response.notice_titles(), ["Panier vidé"]);
    assert!(response.body.contains("Votre panier est vide"));
    assert_eq!(ctx.slot().await.as_deref(), Some("[]"));
}

// =============================================================================
// Checkout
// =============================================================================

#[tokio::test]
async fn test_checkout_clears_cart() {
    let ctx = TestContext::new();
    let _ = ctx.post_form("/cart/add", "wine_id=1").await;

    let response = ctx.post_form("/cart/checkout", "").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.notice_titles(), ["Commande passée"]);
    assert!(response.body.contains("Votre panier est vide"));

    let reopened = ctx.get("/cart").await;
    assert!(reopened.body.contains("Votre panier est vide"));
}

#[tokio::test]
async fn test_checkout_empty_cart_warns() {
    let ctx = TestContext::new();

    let response = ctx.post_form("/cart/checkout", "").await;

    let notices = response.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0]["level"], "warning");
    assert_eq!(notices[0]["title"], "Commande non passée");
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let ctx = TestContext::new();

    let response = ctx.get("/cart").await;

    assert!(response.headers.contains_key("x-request-id"));
}
