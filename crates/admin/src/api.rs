//! HTTP client for the admin endpoints of the remote authority.
//!
//! - `GET /orders/admin` - every order the authority knows
//! - `PATCH /orders/admin/{id}/{APPROVED|DENIED}` - one status
//!   transition, `200` with the updated order
//!
//! Invalid transitions (anything out of a terminal status) are the
//! authority's to reject; they come back as non-2xx like any other
//! per-order failure.

use kiosk_core::{Order, OrderAction, OrderId};
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument};

/// Errors raised by admin authority requests.
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

/// Client for the admin-facing endpoints of the remote authority.
#[derive(Clone)]
pub struct AdminApi {
    client: Client,
    base_url: String,
    token: SecretString,
}

impl std::fmt::Debug for AdminApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminApi")
            .field("base_url", &self.base_url)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl AdminApi {
    /// Create a client for the authority at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>, token: SecretString) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            token,
        }
    }

    /// Fetch every order the authority knows.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, non-2xx status, or an
    /// unparseable body.
    #[instrument(skip(self))]
    pub async fn list_orders(&self) -> Result<Vec<Order>, ApiError> {
        let response = self
            .client
            .get(format!("{}/orders/admin", self.base_url))
            .bearer_auth(self.token.expose_secret())
            .send()
            .await?;

        let body = check_status(response).await?;
        let orders: Vec<Order> = serde_json::from_str(&body)?;
        debug!(count = orders.len(), "orders fetched");
        Ok(orders)
    }

    /// Request one status transition from the authority.
    ///
    /// The returned order is authoritative: status plus any
    /// server-computed fields, ready to replace the local entry.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure, non-2xx status, or an
    /// unparseable body.
    #[instrument(skip(self), fields(order_id = %id, action = %action))]
    pub async fn transition_order(
        &self,
        id: OrderId,
        action: OrderAction,
    ) -> Result<Order, ApiError> {
        let response = self
            .client
            .patch(format!(
                "{}/orders/admin/{id}/{}",
                self.base_url,
                action.as_path_segment()
            ))
            .bearer_auth(self.token.expose_secret())
            .send()
            .await?;

        let body = check_status(response).await?;
        let updated: Order = serde_json::from_str(&body)?;
        debug!(order_id = %updated.id, status = %updated.status, "order transitioned");
        Ok(updated)
    }
}

async fn check_status(response: reqwest::Response) -> Result<String, ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(response.text().await?)
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Status { status, body })
    }
}
