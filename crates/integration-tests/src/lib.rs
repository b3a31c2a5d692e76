//! Integration tests for Vinea.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p vinea-integration-tests
//! ```
//!
//! The storefront router is built in-process and driven with
//! `tower::ServiceExt::oneshot`; no server or network is involved.
//!
//! # Test Categories
//!
//! - `cart_web` - HTMX cart drawer
//! - `cart_api` - mobile cart JSON API
//! - `catalog` - marketplace and vineyard grids
//! - `auth` - account endpoints
//! - `persistence` - slot loading, corruption and write failures
//! - `sessions` - one cart and one sign-in per browser
//!
//! Each [`TestContext`] acts as one browser: it keeps the session cookie the
//! storefront hands out and sends it back on every request.

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;
use tower_sessions::SessionStore;
use tower_sessions::cookie::time::{Duration, OffsetDateTime};
use tower_sessions::session::{Id, Record};

use vinea_storefront::cart::{
    CheckoutProcessor, DEFAULT_CART_SLOT, InstantCheckout, MemoryStorage, SlotStorage,
};
use vinea_storefront::catalog::Catalog;
use vinea_storefront::config::StorefrontConfig;
use vinea_storefront::middleware::{SESSION_COOKIE_NAME, session_keys};
use vinea_storefront::notice::Locale;
use vinea_storefront::routes;
use vinea_storefront::services::auth::InMemoryAuthService;
use vinea_storefront::state::AppState;

/// A response with its body read to a string.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }

    /// Notices carried in the `HX-Trigger` header, if any.
    pub fn notices(&self) -> Vec<serde_json::Value> {
        self.headers
            .get("hx-trigger")
            .map(|value| {
                let trigger: serde_json::Value =
                    serde_json::from_str(value.to_str().unwrap()).unwrap();
                trigger["notify"].as_array().unwrap().clone()
            })
            .unwrap_or_default()
    }

    pub fn notice_titles(&self) -> Vec<String> {
        self.notices()
            .iter()
            .map(|n| n["title"].as_str().unwrap().to_string())
            .collect()
    }
}

/// One browser talking to a storefront wired to in-memory collaborators.
pub struct TestContext {
    pub storage: Arc<MemoryStorage>,
    pub state: AppState,
    cookie: Mutex<Option<String>>,
}

impl TestContext {
    /// French storefront on fresh in-memory slots.
    pub fn new() -> Self {
        Self::with(Arc::new(MemoryStorage::new()), Locale::Fr, Arc::new(InstantCheckout))
    }

    pub fn with_locale(locale: Locale) -> Self {
        Self::with(Arc::new(MemoryStorage::new()), locale, Arc::new(InstantCheckout))
    }

    pub fn with_storage(storage: Arc<MemoryStorage>) -> Self {
        Self::with(storage, Locale::Fr, Arc::new(InstantCheckout))
    }

    pub fn with(
        storage: Arc<MemoryStorage>,
        locale: Locale,
        checkout: Arc<dyn CheckoutProcessor>,
    ) -> Self {
        let config = StorefrontConfig {
            locale,
            data_dir: PathBuf::from("unused"),
            ..StorefrontConfig::default()
        };
        let state = AppState::new(
            config,
            Arc::clone(&storage) as Arc<dyn SlotStorage>,
            Catalog::sample(),
            Arc::new(InMemoryAuthService::new()),
            checkout,
        );
        Self {
            storage,
            state,
            cookie: Mutex::new(None),
        }
    }

    /// Another browser on the same storefront, with no cookie yet.
    pub fn browser(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            state: self.state.clone(),
            cookie: Mutex::new(None),
        }
    }

    pub fn app(&self) -> Router {
        routes::app(self.state.clone())
    }

    /// Current session cookie value, if the storefront has set one.
    pub fn session_cookie(&self) -> Option<String> {
        self.cookie.lock().unwrap().clone()
    }

    /// Name of this browser's cart slot.
    ///
    /// Panics if no request has assigned one yet.
    pub async fn slot_name(&self) -> String {
        let cookie = self.session_cookie().expect("no session cookie");
        let id: Id = cookie.parse().unwrap();
        let record = self.state.sessions().load(&id).await.unwrap().unwrap();
        record.data[session_keys::CART_SLOT]
            .as_str()
            .unwrap()
            .to_string()
    }

    /// Raw contents of this browser's cart slot.
    pub async fn slot(&self) -> Option<String> {
        let name = self.slot_name().await;
        self.storage.get(&name).unwrap()
    }

    /// Parsed contents of this browser's cart slot.
    pub async fn slot_json(&self) -> serde_json::Value {
        serde_json::from_str(&self.slot().await.unwrap()).unwrap()
    }

    /// Start a session whose cart slot already holds `raw`, as if an earlier
    /// visit had saved it. The cart is first read on the next request.
    pub async fn seed(&self, raw: &str) -> String {
        let slot = format!("{DEFAULT_CART_SLOT}-seeded");
        self.storage.set(&slot, raw).unwrap();

        let record = Record {
            id: Id::default(),
            data: HashMap::from([(
                session_keys::CART_SLOT.to_string(),
                serde_json::Value::String(slot.clone()),
            )]),
            expiry_date: OffsetDateTime::now_utc() + Duration::days(1),
        };
        self.state.sessions().save(&record).await.unwrap();
        *self.cookie.lock().unwrap() = Some(record.id.to_string());
        slot
    }

    pub async fn send(&self, mut request: Request<Body>) -> TestResponse {
        if let Some(cookie) = self.session_cookie() {
            let header = format!("{SESSION_COOKIE_NAME}={cookie}");
            request
                .headers_mut()
                .insert("cookie", header.parse().unwrap());
        }

        let response = self.app().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        self.remember_cookie(&headers);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        TestResponse {
            status,
            headers,
            body: String::from_utf8(bytes.to_vec()).unwrap(),
        }
    }

    fn remember_cookie(&self, headers: &HeaderMap) {
        let prefix = format!("{SESSION_COOKIE_NAME}=");
        for value in headers.get_all("set-cookie") {
            let Some(rest) = value.to_str().unwrap().strip_prefix(&prefix) else {
                continue;
            };
            let id = rest.split(';').next().unwrap_or_default();
            *self.cookie.lock().unwrap() = (!id.is_empty()).then(|| id.to_string());
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    /// POST an urlencoded form, the way HTMX does.
    pub async fn post_form(&self, uri: &str, form: &str) -> TestResponse {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header("content-type", "application/x-www-form-urlencoded")
            .header("hx-request", "true")
            .body(Body::from(form.to_string()))
            .unwrap();
        self.send(request).await
    }

    pub async fn send_json(
        &self,
        method: Method,
        uri: &str,
        body: Option<&serde_json::Value>,
    ) -> TestResponse {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.send(request).await
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
