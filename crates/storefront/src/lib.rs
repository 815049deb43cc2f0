//! Kiosk Storefront - client-side commerce state engine.
//!
//! This crate owns the shopper-facing half of the engine:
//!
//! - [`storage`] - key/value persistence surviving process restarts
//! - [`cart`] - the cart store: line items, mutation, persistence,
//!   change notification
//! - [`events`] - typed synchronous event bus decoupling the cart from
//!   consumers such as a badge counter
//! - [`api`] - HTTP client for the remote order/catalog authority
//! - [`checkout`] - order submission pipeline
//!
//! # Architecture
//!
//! Everything runs on the caller's thread; the only suspension points are
//! the network calls in [`api`]. The cart store is constructed explicitly
//! with an injected storage adapter and event bus - there is no ambient
//! global state. UI concerns (rendering, routing, the "submitting" flag
//! that blocks double checkout) live in external collaborators.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod checkout;
pub mod config;
pub mod events;
pub mod storage;

pub use api::{ApiError, StorefrontApi};
pub use cart::{CartError, CartStore};
pub use checkout::{Checkout, SubmitError};
pub use config::{ConfigError, StorefrontConfig};
pub use events::{CartChanged, EventBus, Subscription};
pub use storage::{FileStore, MemoryStore, StorageError, StoreAdapter};
