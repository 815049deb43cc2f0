//! HTTP client for the remote order/catalog authority.
//!
//! The authority owns durable order state; this client only produces and
//! consumes its request contracts:
//!
//! - `GET /products` - catalog listing
//! - `POST /orders` - order submission, `201` with the created order
//!
//! The bearer credential is an opaque token supplied by an external
//! session manager; it is neither validated nor refreshed here.

use kiosk_core::{NewOrder, Order, Product};
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument};

/// Errors raised by authority requests.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never completed (connect, timeout, body transfer).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The authority answered with a non-success status.
    #[error("authority returned {status}: {body}")]
    Status {
        /// HTTP status code of the response.
        status: StatusCode,
        /// Response body, as far as it could be read.
        body: String,
    },

    /// The response body did not match the expected shape.
    #[error("unexpected response body: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Client for the storefront-facing endpoints of the remote authority.
#[derive(Clone)]
pub struct StorefrontApi {
    client: Client,
    base_url: String,
    token: SecretString,
}

impl std::fmt::Debug for StorefrontApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorefrontApi")
            .field("base_url", &self.base_url)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl StorefrontApi {
    /// Create a client for the authority at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>, token: SecretString) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            token,
        }
    }

    /// Fetch the product catalog.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, non-2xx status, or an
    /// unparseable body.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        let response = self
            .client
            .get(format!("{}/products", self.base_url))
            .bearer_auth(self.token.expose_secret())
            .send()
            .await?;

        let body = check_status(response).await?;
        let products: Vec<Product> = serde_json::from_str(&body)?;
        debug!(count = products.len(), "catalog fetched");
        Ok(products)
    }

    /// Submit an order.
    ///
    /// Success means the authority durably registered the order and
    /// assigned it an id; anything else is a submission failure and the
    /// caller must treat the order as not placed.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, non-2xx status, or an
    /// unparseable body.
    #[instrument(skip(self, order), fields(products = order.products.len()))]
    pub async fn create_order(&self, order: &NewOrder) -> Result<Order, ApiError> {
        let response = self
            .client
            .post(format!("{}/orders", self.base_url))
            .bearer_auth(self.token.expose_secret())
            .json(order)
            .send()
            .await?;

        let body = check_status(response).await?;
        let created: Order = serde_json::from_str(&body)?;
        debug!(order_id = %created.id, "order created");
        Ok(created)
    }
}

/// Resolve a response into its body, mapping non-2xx to [`ApiError::Status`].
pub(crate) async fn check_status(response: reqwest::Response) -> Result<String, ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(response.text().await?)
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Status { status, body })
    }
}
