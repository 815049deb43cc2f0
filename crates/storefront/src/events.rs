//! Typed synchronous event bus.
//!
//! Decouples the cart store from consumers (a navbar badge, a cart view)
//! that must react to cart size changes without direct coupling. Delivery
//! is same-thread and synchronous: `emit` invokes every subscriber
//! registered at that moment, in registration order, before returning.
//! There is no queue and no cross-thread dispatch - this is a
//! notification mechanism, not a message bus.
//!
//! Handlers registered or dropped *during* an emit take effect from the
//! next emit; the subscriber list is snapshotted per delivery so handlers
//! may unsubscribe themselves without deadlocking.

use std::sync::{Arc, Mutex, Weak};

use tracing::debug;

/// Payload of the `cart-changed` topic.
///
/// `count` is the number of line items in the cart, not the summed
/// quantity - it feeds the badge next to the cart icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartChanged {
    pub count: usize,
}

type CartChangedHandler = Arc<dyn Fn(&CartChanged) + Send + Sync>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    cart_changed: Vec<(u64, CartChangedHandler)>,
}

/// Process-wide publish/subscribe channel with enumerated topics.
///
/// Clones share the same subscriber registry.
#[derive(Clone, Default)]
pub struct EventBus {
    registry: Arc<Mutex<Registry>>,
}

impl EventBus {
    /// Create a bus with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to `cart-changed`.
    ///
    /// The returned [`Subscription`] is the unsubscribe capability; keep
    /// it alive for as long as the handler should fire. Consumers must
    /// drop it on teardown so handlers bound to destroyed state stop
    /// being invoked.
    ///
    /// # Panics
    ///
    /// Panics if the registry lock is poisoned.
    #[must_use]
    pub fn on_cart_changed<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&CartChanged) + Send + Sync + 'static,
    {
        let mut registry = self.registry.lock().expect("event bus lock poisoned");
        let id = registry.next_id;
        registry.next_id += 1;
        registry.cart_changed.push((id, Arc::new(handler)));
        Subscription {
            registry: Arc::downgrade(&self.registry),
            id,
        }
    }

    /// Publish a `cart-changed` event to all current subscribers.
    ///
    /// # Panics
    ///
    /// Panics if the registry lock is poisoned.
    pub fn emit_cart_changed(&self, event: CartChanged) {
        let handlers: Vec<CartChangedHandler> = {
            let registry = self.registry.lock().expect("event bus lock poisoned");
            registry
                .cart_changed
                .iter()
                .map(|(_, h)| Arc::clone(h))
                .collect()
        };
        debug!(count = event.count, subscribers = handlers.len(), "cart-changed");
        for handler in handlers {
            handler(&event);
        }
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let subscribers = self
            .registry
            .lock()
            .map(|r| r.cart_changed.len())
            .unwrap_or(0);
        f.debug_struct("EventBus")
            .field("cart_changed_subscribers", &subscribers)
            .finish()
    }
}

/// Unsubscribe capability returned by subscribe operations.
///
/// Unsubscribes explicitly via [`Subscription::unsubscribe`] or
/// implicitly on drop.
#[must_use = "dropping a Subscription unsubscribes its handler"]
pub struct Subscription {
    registry: Weak<Mutex<Registry>>,
    id: u64,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

impl Subscription {
    /// Remove the handler from the bus.
    pub fn unsubscribe(self) {
        // Drop does the work.
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            if let Ok(mut registry) = registry.lock() {
                registry.cart_changed.retain(|(id, _)| *id != self.id);
            }
        }
    }
}
