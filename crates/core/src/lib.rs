//! Kiosk Core - Shared domain types.
//!
//! This crate provides the common types used across all Kiosk components:
//! - `storefront` - Cart store, event bus, and order submission pipeline
//! - `admin` - Order lifecycle engine for bulk approval/denial
//! - `cli` - Command-line front end driving the engine
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no
//! persistence. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product/order identity, money, status, and the cart and
//!   order payload shapes exchanged with the remote order authority

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
