//! Checkout command.

use kiosk_storefront::{Checkout, checkout::validate_customer};

use super::CommandError;

/// Submit the current cart as an order.
pub async fn submit(name: &str, address: &str, email: Option<&str>) -> Result<(), CommandError> {
    let customer = validate_customer(name, address, email)
        .map_err(kiosk_storefront::SubmitError::Validation)?;

    let (mut cart, _badge) = super::open_cart()?;
    if cart.is_empty() {
        tracing::warn!("the cart is empty; the order will total zero");
    }

    let pipeline = Checkout::new(super::storefront_api()?);
    let order = pipeline.submit(&mut cart, customer).await?;

    tracing::info!(
        order_id = %order.id,
        status = %order.status,
        total = %order.total_amount,
        "order submitted - check your email for updates"
    );
    Ok(())
}
