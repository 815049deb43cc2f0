//! Order payloads exchanged with the remote order authority.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::customer::CustomerInfo;
use super::email::Email;
use super::id::OrderId;
use super::line_item::LineItem;
use super::status::OrderStatus;

/// Client-assembled body for `POST /orders`.
///
/// Carries no id and no status - both belong to the authority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrder {
    #[serde(flatten)]
    pub customer: CustomerInfo,
    pub products: Vec<LineItem>,
}

impl NewOrder {
    /// Assemble a submission body from validated customer fields and a
    /// cart snapshot.
    #[must_use]
    pub const fn new(customer: CustomerInfo, products: Vec<LineItem>) -> Self {
        Self { customer, products }
    }

    /// Sum of price times quantity over the products.
    #[must_use]
    pub fn total_amount(&self) -> Decimal {
        self.products.iter().map(LineItem::line_total).sum()
    }
}

/// An order as known to the remote authority.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub name: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<Email>,
    #[serde(default)]
    pub products: Vec<LineItem>,
    pub status: OrderStatus,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
}

impl Order {
    /// Recompute the total from the product lines.
    ///
    /// Should always equal [`Order::total_amount`]; a mismatch means the
    /// authority repriced the order.
    #[must_use]
    pub fn computed_total(&self) -> Decimal {
        self.products.iter().map(LineItem::line_total).sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::Price;

    fn lines() -> Vec<LineItem> {
        serde_json::from_str(
            r#"[
                {"id": 1, "name": "Copper kettle", "price": 10, "quantity": 2},
                {"id": 2, "name": "Tea strainer", "price": 5, "quantity": 1}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn test_new_order_total() {
        let customer = CustomerInfo::new("Mira", "12 Hill Lane", None).unwrap();
        let order = NewOrder::new(customer, lines());
        assert_eq!(order.total_amount(), Decimal::from(25));
    }

    #[test]
    fn test_new_order_body_shape() {
        let customer = CustomerInfo::new("Mira", "12 Hill Lane", None).unwrap();
        let body = serde_json::to_value(NewOrder::new(customer, lines())).unwrap();
        assert_eq!(body["name"], "Mira");
        assert_eq!(body["address"], "12 Hill Lane");
        assert!(body.get("email").is_none());
        assert_eq!(body["products"].as_array().unwrap().len(), 2);
        assert!(body.get("id").is_none());
        assert!(body.get("status").is_none());
    }

    #[test]
    fn test_order_parses_authority_response() {
        let order: Order = serde_json::from_str(
            r#"{
                "id": 31,
                "name": "Mira",
                "address": "12 Hill Lane",
                "status": "DRAFT",
                "totalAmount": 25.0,
                "date": "2026-03-02T10:15:00Z",
                "products": [{"id": "1", "name": "Copper kettle", "price": "10", "quantity": 2}]
            }"#,
        )
        .unwrap();
        assert_eq!(order.id, OrderId::new(31));
        assert_eq!(order.status, OrderStatus::Draft);
        assert_eq!(order.total_amount, Decimal::from(25));
        let first = order.products.first().unwrap();
        assert_eq!(first.price, Price::parse("10").unwrap());
    }

    #[test]
    fn test_computed_total_matches_wire_total() {
        let order: Order = serde_json::from_str(
            r#"{
                "id": 31,
                "name": "Mira",
                "address": "12 Hill Lane",
                "status": "DRAFT",
                "totalAmount": 25,
                "products": [
                    {"id": 1, "name": "Copper kettle", "price": 10, "quantity": 2},
                    {"id": 2, "name": "Tea strainer", "price": 5, "quantity": 1}
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(order.computed_total(), order.total_amount);
    }
}
