//! The cart store.
//!
//! Owns the in-memory cart for the session: an ordered list of line
//! items, deduplicated by numeric product id. Every mutation persists the
//! full cart through the injected [`StoreAdapter`] before returning, and
//! publishes a `cart-changed` event so decoupled consumers (the navbar
//! badge) can re-render.
//!
//! The persisted mirror is the sole source of truth at load time; after
//! that the store owns the cart exclusively for the rest of the session.

use kiosk_core::{LineItem, Product, ProductId};
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::events::{CartChanged, EventBus};
use crate::storage::{StorageError, StoreAdapter};

/// Storage key the serialized cart lives under.
///
/// Absence of the key means "empty cart"; an emptied cart deletes the key
/// rather than storing `[]`.
pub const CART_KEY: &str = "cart";

/// Errors raised by cart mutations.
///
/// Load-time corruption is NOT here: a cart that fails to parse degrades
/// silently to the empty cart (accepted data-loss trade-off). Mutations,
/// by contrast, surface persist failures - the in-memory cart and the
/// stored mirror must not drift apart unnoticed.
#[derive(Debug, thiserror::Error)]
pub enum CartError {
    /// The persist step failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The cart could not be serialized.
    #[error("cart serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The session's cart: ordered line items plus persistence and
/// change notification.
pub struct CartStore {
    items: Vec<LineItem>,
    storage: Box<dyn StoreAdapter>,
    bus: EventBus,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("items", &self.items)
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Open the cart store, loading any persisted cart.
    ///
    /// A missing record or one that fails to parse yields the empty cart;
    /// corruption is logged and never surfaced to the caller.
    pub fn open(storage: Box<dyn StoreAdapter>, bus: EventBus) -> Self {
        let items = Self::load(storage.as_ref());
        Self {
            items,
            storage,
            bus,
        }
    }

    fn load(storage: &dyn StoreAdapter) -> Vec<LineItem> {
        let bytes = match storage.get(CART_KEY) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(error = %e, "cart record unreadable, starting empty");
                return Vec::new();
            }
        };

        match serde_json::from_slice::<Vec<LineItem>>(&bytes) {
            Ok(items) => {
                debug!(count = items.len(), "cart loaded");
                items
            }
            Err(e) => {
                warn!(error = %e, "persisted cart is corrupt, starting empty");
                Vec::new()
            }
        }
    }

    /// Add a product to the cart.
    ///
    /// If a line with the same numeric id exists its quantity increments
    /// by one; otherwise a new line is appended with quantity 1. Persists
    /// and publishes `cart-changed`.
    ///
    /// # Errors
    ///
    /// Returns [`CartError`] if the persist step fails; the in-memory
    /// cart is left unchanged in that case.
    pub fn add(&mut self, product: &Product) -> Result<(), CartError> {
        let mut items = self.items.clone();
        if let Some(line) = items.iter_mut().find(|line| line.id == product.id) {
            line.quantity += 1;
        } else {
            items.push(LineItem::from_product(product));
        }
        self.commit(items)
    }

    /// Set the quantity of the line with the given id.
    ///
    /// Quantities below 1 are a no-op - removal is [`CartStore::remove`]'s
    /// job. Unknown ids are also a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`CartError`] if the persist step fails.
    pub fn set_quantity(&mut self, id: ProductId, quantity: u32) -> Result<(), CartError> {
        if quantity < 1 {
            return Ok(());
        }
        let mut items = self.items.clone();
        let Some(line) = items.iter_mut().find(|line| line.id == id) else {
            return Ok(());
        };
        line.quantity = quantity;
        self.commit(items)
    }

    /// Remove the line with the given id.
    ///
    /// If the resulting cart is empty the persisted record is deleted
    /// entirely. Publishes `cart-changed`.
    ///
    /// # Errors
    ///
    /// Returns [`CartError`] if the persist step fails.
    pub fn remove(&mut self, id: ProductId) -> Result<(), CartError> {
        let mut items = self.items.clone();
        items.retain(|line| line.id != id);
        self.commit(items)
    }

    /// Empty the cart and delete the persisted record.
    ///
    /// Used after a successful checkout. Publishes `cart-changed` with a
    /// zero count so badge consumers reset.
    ///
    /// # Errors
    ///
    /// Returns [`CartError`] if the record cannot be deleted.
    pub fn clear(&mut self) -> Result<(), CartError> {
        self.commit(Vec::new())
    }

    /// Sum of price times quantity over all lines. Pure.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// The lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Number of distinct lines (what the badge shows).
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Persist `items`, then swap them in and notify subscribers.
    ///
    /// The in-memory cart only changes together with a completed persist,
    /// so the two views never diverge.
    fn commit(&mut self, items: Vec<LineItem>) -> Result<(), CartError> {
        if items.is_empty() {
            self.storage.delete(CART_KEY)?;
        } else {
            let bytes = serde_json::to_vec(&items)?;
            self.storage.put(CART_KEY, &bytes)?;
        }
        self.items = items;
        self.bus.emit_cart_changed(CartChanged {
            count: self.items.len(),
        });
        Ok(())
    }
}
