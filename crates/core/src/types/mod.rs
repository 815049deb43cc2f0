//! Core types for Kiosk.
//!
//! This module provides type-safe wrappers for the domain concepts shared
//! between the storefront and admin sides of the engine.

pub mod customer;
pub mod email;
pub mod id;
pub mod line_item;
pub mod order;
pub mod price;
pub mod product;
pub mod status;

pub use customer::{CustomerInfo, ValidationError};
pub use email::{Email, EmailError};
pub use id::{OrderId, ProductId};
pub use line_item::LineItem;
pub use order::{NewOrder, Order};
pub use price::{Price, PriceError};
pub use product::Product;
pub use status::{OrderAction, OrderStatus};
