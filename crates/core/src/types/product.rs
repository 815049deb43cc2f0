//! Catalog product as served by the remote authority.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// A catalog entry.
///
/// The cart copies the display and billing attributes out of this at
/// add-time; a cart line is a snapshot, not a live reference to the
/// catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_with_string_id_and_missing_optionals() {
        let product: Product = serde_json::from_str(
            r#"{"id": "7", "name": "Copper kettle", "price": 19.99}"#,
        )
        .unwrap();
        assert_eq!(product.id, ProductId::new(7));
        assert_eq!(product.category, "");
        assert!(product.image.is_none());
    }
}
