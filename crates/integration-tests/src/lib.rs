//! Integration tests for the Dessert Shop storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p dessert-shop-integration-tests
//! ```
//!
//! Each test starts its own [`TestServer`]: the complete storefront router
//! bound to an ephemeral port, with an inline catalog and a cookie-keeping
//! client so the session (and with it the cart) survives across requests.

#![allow(clippy::missing_panics_doc)]

use std::path::PathBuf;

use dessert_shop_core::Catalog;
use dessert_shop_storefront::catalog::LoadedCatalog;
use dessert_shop_storefront::config::{CatalogSource, StorefrontConfig};
use dessert_shop_storefront::state::AppState;
use reqwest::{Client, Response};

/// Two-product catalog used by most tests.
pub const CATALOG_JSON: &str = r#"[
    {
        "image": {
            "thumbnail": "/static/images/apple-tart-thumbnail.jpg",
            "mobile": "/static/images/apple-tart-mobile.jpg",
            "desktop": "/static/images/apple-tart-desktop.jpg"
        },
        "name": "Apple Tart",
        "category": "Tart",
        "price": 5.0
    },
    {
        "image": {
            "thumbnail": "/static/images/berry-cake-thumbnail.jpg",
            "desktop": "/static/images/berry-cake-desktop.jpg"
        },
        "name": "Berry Cake",
        "category": "Cake",
        "price": 3.5
    }
]"#;

/// Parse [`CATALOG_JSON`].
#[must_use]
pub fn test_catalog() -> Catalog {
    Catalog::from_json_slice(CATALOG_JSON.as_bytes()).expect("test catalog is valid")
}

/// Configuration for a server that never leaves the loopback interface.
#[must_use]
pub fn test_config() -> StorefrontConfig {
    let storefront = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../storefront");

    StorefrontConfig {
        host: [127, 0, 0, 1].into(),
        port: 0,
        base_url: "http://127.0.0.1".to_string(),
        static_dir: storefront.join("static"),
        catalog_source: CatalogSource::File(storefront.join("static/data.json")),
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
    }
}

/// A running storefront plus a client holding one shopper's session.
pub struct TestServer {
    pub base_url: String,
    pub client: Client,
    pub state: AppState,
}

impl TestServer {
    /// Start a storefront serving [`CATALOG_JSON`].
    pub async fn start() -> Self {
        Self::with_catalog(LoadedCatalog::loaded(test_catalog())).await
    }

    /// Start a storefront serving the given load result.
    pub async fn with_catalog(loaded: LoadedCatalog) -> Self {
        let state = AppState::new(test_config(), loaded);
        let app = dessert_shop_storefront::app(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has an address");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server error");
        });

        Self {
            base_url: format!("http://{addr}"),
            client: Self::new_client(),
            state,
        }
    }

    /// A client with its own cookie jar, i.e. a fresh shopper.
    #[must_use]
    pub fn new_client() -> Client {
        Client::builder()
            .cookie_store(true)
            .build()
            .expect("Failed to create HTTP client")
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Fetch the full shop page body.
    pub async fn page(&self) -> String {
        let resp = self
            .client
            .get(self.url("/"))
            .send()
            .await
            .expect("Failed to load shop page");
        assert!(resp.status().is_success(), "shop page: {}", resp.status());
        resp.text().await.expect("Failed to read shop page")
    }

    /// POST a cart operation for the named product.
    pub async fn cart(&self, action: &str, name: &str) -> Response {
        self.client
            .post(self.url(&format!("/cart/{action}")))
            .header("HX-Request", "true")
            .form(&[("name", name)])
            .send()
            .await
            .expect("Failed to send cart request")
    }

    /// POST an order operation (`confirm`, `dismiss` or `new`).
    pub async fn order(&self, action: &str) -> Response {
        self.client
            .post(self.url(&format!("/order/{action}")))
            .header("HX-Request", "true")
            .send()
            .await
            .expect("Failed to send order request")
    }
}
