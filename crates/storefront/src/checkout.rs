//! Order submission pipeline.
//!
//! Assembles a server-bound order from the current cart plus the
//! customer's fields, submits it to the remote authority, and clears the
//! cart on success. The correctness-critical guarantee lives here: a
//! customer never loses cart contents for an order that did not durably
//! register.
//!
//! Submission is not idempotent - a client retry creates a second order
//! server-side. Callers must block re-submission while one is in flight
//! (the UI-level "submitting" flag); the pipeline performs no
//! deduplication.

use kiosk_core::{CustomerInfo, NewOrder, Order, OrderStatus, ValidationError};
use tracing::{error, info, warn};

use crate::api::{ApiError, StorefrontApi};
use crate::cart::CartStore;

/// Errors raised by [`Checkout::submit`].
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// Customer fields failed validation; nothing was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The authority rejected or never received the order. The cart is
    /// untouched.
    #[error("order submission failed: {0}")]
    Submission(#[from] ApiError),
}

/// The order submission pipeline.
#[derive(Debug, Clone)]
pub struct Checkout {
    api: StorefrontApi,
}

impl Checkout {
    /// Build a pipeline submitting through `api`.
    #[must_use]
    pub const fn new(api: StorefrontApi) -> Self {
        Self { api }
    }

    /// Submit the current cart as an order for `customer`.
    ///
    /// On success the cart is cleared and the authority's order (status
    /// `DRAFT`, id assigned) is returned. On failure the cart is left
    /// exactly as it was.
    ///
    /// An empty cart is submitted as-is and yields an order with a zero
    /// total - semantically valid, almost certainly a caller bug, and the
    /// caller's job to prevent.
    ///
    /// # Errors
    ///
    /// [`SubmitError::Validation`] before any network call,
    /// [`SubmitError::Submission`] when the authority did not register
    /// the order.
    pub async fn submit(
        &self,
        cart: &mut CartStore,
        customer: CustomerInfo,
    ) -> Result<Order, SubmitError> {
        let order = NewOrder::new(customer, cart.items().to_vec());
        let local_total = order.total_amount();
        if order.products.is_empty() {
            warn!("submitting an empty cart; the resulting order will total zero");
        }

        let created = self.api.create_order(&order).await?;

        if created.total_amount != local_total {
            // The authority recomputes the total; a mismatch means it
            // repriced the order. Surface it rather than hiding it.
            warn!(
                order_id = %created.id,
                local = %local_total,
                authoritative = %created.total_amount,
                "authority total differs from submitted cart total"
            );
        }
        if created.status != OrderStatus::Draft {
            warn!(order_id = %created.id, status = %created.status, "new order not in DRAFT");
        }

        if let Err(e) = cart.clear() {
            // The order is durably registered; failing the submission now
            // would misreport it. Keep the order, report the cart state.
            error!(
                order_id = %created.id,
                error = %e,
                "cart could not be cleared after successful submission"
            );
        }

        info!(order_id = %created.id, total = %created.total_amount, "order submitted");
        Ok(created)
    }
}

/// Validate customer fields ahead of submission.
///
/// Thin convenience over [`CustomerInfo::new`] so callers can reject bad
/// input before opening the checkout flow.
///
/// # Errors
///
/// Returns the first [`ValidationError`] found.
pub fn validate_customer(
    name: &str,
    address: &str,
    email: Option<&str>,
) -> Result<CustomerInfo, ValidationError> {
    let email = email
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(kiosk_core::Email::parse)
        .transpose()?;
    CustomerInfo::new(name, address, email)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_customer_accepts_missing_email() {
        let info = validate_customer("Mira", "12 Hill Lane", None).unwrap();
        assert!(info.email.is_none());
    }

    #[test]
    fn test_validate_customer_treats_blank_email_as_absent() {
        let info = validate_customer("Mira", "12 Hill Lane", Some("  ")).unwrap();
        assert!(info.email.is_none());
    }

    #[test]
    fn test_validate_customer_rejects_bad_email() {
        assert!(matches!(
            validate_customer("Mira", "12 Hill Lane", Some("nope")),
            Err(ValidationError::Email(_))
        ));
    }

    #[test]
    fn test_validate_customer_rejects_blank_name_first() {
        assert!(matches!(
            validate_customer("", "", None),
            Err(ValidationError::NameRequired)
        ));
    }
}
