//! Catalog listing command.

use super::CommandError;

/// Fetch and print the product catalog.
pub async fn list() -> Result<(), CommandError> {
    let api = super::storefront_api()?;
    let products = api.list_products().await?;

    if products.is_empty() {
        tracing::info!("The catalog is empty");
        return Ok(());
    }

    for product in &products {
        tracing::info!(
            id = %product.id,
            price = %product.price,
            category = %product.category,
            "{}",
            product.name
        );
    }
    Ok(())
}
