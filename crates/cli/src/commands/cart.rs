//! Cart inspection and mutation commands.

use super::CommandError;

/// Print the cart lines and total.
pub fn show() -> Result<(), CommandError> {
    let (cart, _badge) = super::open_cart()?;

    if cart.is_empty() {
        tracing::info!("Your cart is empty");
        return Ok(());
    }

    for line in cart.items() {
        tracing::info!(
            id = %line.id,
            quantity = line.quantity,
            price = %line.price,
            line_total = %line.line_total(),
            "{}",
            line.name
        );
    }
    tracing::info!(total = %cart.total(), lines = cart.len(), "cart total");
    Ok(())
}

/// Add a catalog product to the cart by id.
pub async fn add(product_id: &str) -> Result<(), CommandError> {
    let id = super::parse_product_id(product_id)?;

    let api = super::storefront_api()?;
    let products = api.list_products().await?;
    let product = products
        .iter()
        .find(|p| p.id == id)
        .ok_or(CommandError::UnknownProduct(id))?;

    let (mut cart, _badge) = super::open_cart()?;
    cart.add(product)?;
    tracing::info!(id = %id, "added {} to cart", product.name);
    Ok(())
}

/// Set the quantity of a cart line.
pub fn set_quantity(product_id: &str, quantity: u32) -> Result<(), CommandError> {
    let id = super::parse_product_id(product_id)?;
    let (mut cart, _badge) = super::open_cart()?;

    if quantity < 1 {
        tracing::warn!("quantities below 1 are ignored; use `kiosk cart remove` instead");
        return Ok(());
    }

    cart.set_quantity(id, quantity)?;
    tracing::info!(id = %id, quantity, "quantity updated");
    Ok(())
}

/// Remove a cart line.
pub fn remove(product_id: &str) -> Result<(), CommandError> {
    let id = super::parse_product_id(product_id)?;
    let (mut cart, _badge) = super::open_cart()?;
    cart.remove(id)?;
    tracing::info!(id = %id, "removed from cart");
    Ok(())
}

/// Empty the cart.
pub fn clear() -> Result<(), CommandError> {
    let (mut cart, _badge) = super::open_cart()?;
    cart.clear()?;
    tracing::info!("cart cleared");
    Ok(())
}
