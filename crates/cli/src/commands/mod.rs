//! CLI command implementations.

pub mod admin;
pub mod cart;
pub mod checkout;
pub mod products;

use kiosk_admin::AdminApi;
use kiosk_core::ProductId;
use kiosk_storefront::{CartStore, EventBus, FileStore, StorefrontApi, StorefrontConfig};

/// Errors shared by the CLI commands.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    StorefrontConfig(#[from] kiosk_storefront::ConfigError),

    #[error(transparent)]
    AdminConfig(#[from] kiosk_admin::ConfigError),

    #[error(transparent)]
    Storage(#[from] kiosk_storefront::StorageError),

    #[error(transparent)]
    Cart(#[from] kiosk_storefront::CartError),

    #[error(transparent)]
    Api(#[from] kiosk_storefront::ApiError),

    #[error(transparent)]
    AdminApi(#[from] kiosk_admin::ApiError),

    #[error(transparent)]
    Submit(#[from] kiosk_storefront::SubmitError),

    #[error("not a numeric id: {0:?}")]
    InvalidId(String),

    #[error("no catalog product with id {0}")]
    UnknownProduct(ProductId),
}

/// Parse a numeric id argument.
pub fn parse_product_id(raw: &str) -> Result<ProductId, CommandError> {
    raw.parse()
        .map_err(|_| CommandError::InvalidId(raw.to_owned()))
}

/// Open the persistent cart with a badge subscriber attached, the way the
/// storefront UI would at bootstrap.
///
/// Returns the bus subscription alongside the store; dropping it would
/// silence the badge.
pub fn open_cart() -> Result<(CartStore, kiosk_storefront::Subscription), CommandError> {
    dotenvy::dotenv().ok();
    let config = StorefrontConfig::from_env()?;

    let bus = EventBus::new();
    let badge = bus.on_cart_changed(|e| tracing::info!(count = e.count, "cart badge updated"));

    let storage = FileStore::open(config.data_dir)?;
    Ok((CartStore::open(Box::new(storage), bus), badge))
}

/// Build the storefront-facing authority client from the environment.
pub fn storefront_api() -> Result<StorefrontApi, CommandError> {
    dotenvy::dotenv().ok();
    let config = StorefrontConfig::from_env()?;
    Ok(StorefrontApi::new(config.api_url.clone(), config.token()))
}

/// Build the admin-facing authority client from the environment.
pub fn admin_api() -> Result<AdminApi, CommandError> {
    dotenvy::dotenv().ok();
    let config = kiosk_admin::AdminConfig::from_env()?;
    Ok(AdminApi::new(config.api_url.clone(), config.token()))
}
