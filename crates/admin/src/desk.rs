//! The order desk: local order list, selection set, bulk transitions.
//!
//! Bulk actions are an independent-outcome batch: each selected order is
//! transitioned in its own request, sequentially, and one failure never
//! aborts the rest or rolls back siblings that already succeeded.
//! Sequential processing bounds load on the authority and makes
//! reconciliation deterministic - a later success cannot be overwritten
//! by an earlier in-flight one.

use std::collections::HashSet;

use kiosk_core::{Order, OrderAction, OrderId, OrderStatus};
use tracing::{info, instrument, warn};

use crate::api::{AdminApi, ApiError};

/// Result of one order's transition within a bulk action.
#[derive(Debug)]
pub struct BulkOutcome {
    /// The order the transition was requested for.
    pub order_id: OrderId,
    /// The authoritative status on success, the failure otherwise.
    pub result: Result<OrderStatus, ApiError>,
}

impl BulkOutcome {
    /// Whether this order's transition succeeded.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Local view of the authority's orders plus the admin's selection.
#[derive(Debug, Default)]
pub struct OrderDesk {
    orders: Vec<Order>,
    selection: HashSet<OrderId>,
}

impl OrderDesk {
    /// An empty desk; call [`OrderDesk::refresh`] to populate it.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the local order list from the authority.
    ///
    /// Selected ids that no longer exist are pruned; the rest of the
    /// selection survives the refresh.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the listing request fails; the local list
    /// is left unchanged in that case.
    pub async fn refresh(&mut self, api: &AdminApi) -> Result<(), ApiError> {
        let orders = api.list_orders().await?;
        let known: HashSet<OrderId> = orders.iter().map(|o| o.id).collect();
        self.selection.retain(|id| known.contains(id));
        self.orders = orders;
        Ok(())
    }

    /// All known orders.
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Orders still awaiting an admin decision (`DRAFT`).
    ///
    /// A pure filter, recomputed on every call.
    #[must_use]
    pub fn awaiting_approval(&self) -> Vec<&Order> {
        self.orders.iter().filter(|o| o.status.is_draft()).collect()
    }

    /// Orders already decided (anything but `DRAFT`).
    #[must_use]
    pub fn resolved(&self) -> Vec<&Order> {
        self.orders
            .iter()
            .filter(|o| !o.status.is_draft())
            .collect()
    }

    /// Add an order to the selection. Unknown ids are accepted;
    /// membership is independent of the order list.
    pub fn select(&mut self, id: OrderId) {
        self.selection.insert(id);
    }

    /// Remove an order from the selection.
    pub fn deselect(&mut self, id: OrderId) {
        self.selection.remove(&id);
    }

    /// Toggle an order's selection, the checkbox way.
    pub fn toggle(&mut self, id: OrderId) {
        if !self.selection.remove(&id) {
            self.selection.insert(id);
        }
    }

    /// The selected ids in ascending order.
    #[must_use]
    pub fn selected(&self) -> Vec<OrderId> {
        let mut ids: Vec<OrderId> = self.selection.iter().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Apply `action` to every selected order, one request at a time.
    ///
    /// Per-order failures are logged and reported in the returned outcome
    /// list but never abort the batch. Each success replaces the matching
    /// local entry with the authority's response. The selection set is
    /// cleared unconditionally once every order has been attempted.
    #[instrument(skip(self, api), fields(action = %action, selected = self.selection.len()))]
    pub async fn bulk_transition(
        &mut self,
        api: &AdminApi,
        action: OrderAction,
    ) -> Vec<BulkOutcome> {
        let ids = self.selected();
        let mut outcomes = Vec::with_capacity(ids.len());

        for id in ids {
            match api.transition_order(id, action).await {
                Ok(updated) => {
                    let status = updated.status;
                    self.reconcile(updated);
                    outcomes.push(BulkOutcome {
                        order_id: id,
                        result: Ok(status),
                    });
                }
                Err(e) => {
                    warn!(order_id = %id, error = %e, "order transition failed");
                    outcomes.push(BulkOutcome {
                        order_id: id,
                        result: Err(e),
                    });
                }
            }
        }

        self.selection.clear();

        let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
        info!(
            succeeded,
            failed = outcomes.len() - succeeded,
            "bulk transition completed"
        );
        outcomes
    }

    /// Replace the local entry matching the authoritative order.
    fn reconcile(&mut self, updated: Order) {
        if let Some(local) = self.orders.iter_mut().find(|o| o.id == updated.id) {
            *local = updated;
        } else {
            // The authority knows an order we have not listed yet; keep
            // its answer rather than dropping it.
            self.orders.push(updated);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn order(id: i64, status: OrderStatus) -> Order {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "name": "Mira",
            "address": "12 Hill Lane",
            "status": status,
            "totalAmount": 25.0,
            "products": []
        }))
        .unwrap()
    }

    fn desk_with(orders: Vec<Order>) -> OrderDesk {
        let mut desk = OrderDesk::new();
        desk.orders = orders;
        desk
    }

    #[test]
    fn test_partitions_are_pure_filters() {
        let desk = desk_with(vec![
            order(1, OrderStatus::Draft),
            order(2, OrderStatus::Approved),
            order(3, OrderStatus::Denied),
            order(4, OrderStatus::Draft),
        ]);

        let awaiting: Vec<i64> = desk
            .awaiting_approval()
            .iter()
            .map(|o| o.id.as_i64())
            .collect();
        let resolved: Vec<i64> = desk.resolved().iter().map(|o| o.id.as_i64()).collect();

        assert_eq!(awaiting, vec![1, 4]);
        assert_eq!(resolved, vec![2, 3]);
    }

    #[test]
    fn test_toggle_round_trips() {
        let mut desk = OrderDesk::new();
        let id = OrderId::new(1);

        desk.toggle(id);
        assert_eq!(desk.selected(), vec![id]);
        desk.toggle(id);
        assert!(desk.selected().is_empty());
    }

    #[test]
    fn test_selected_is_sorted() {
        let mut desk = OrderDesk::new();
        desk.select(OrderId::new(9));
        desk.select(OrderId::new(2));
        desk.select(OrderId::new(5));

        let ids: Vec<i64> = desk.selected().iter().map(|id| id.as_i64()).collect();
        assert_eq!(ids, vec![2, 5, 9]);
    }

    #[test]
    fn test_reconcile_replaces_matching_entry() {
        let mut desk = desk_with(vec![order(1, OrderStatus::Draft)]);
        desk.reconcile(order(1, OrderStatus::Approved));

        assert_eq!(desk.orders()[0].status, OrderStatus::Approved);
        assert_eq!(desk.orders().len(), 1);
    }

    #[test]
    fn test_reconcile_keeps_unknown_orders() {
        let mut desk = desk_with(vec![order(1, OrderStatus::Draft)]);
        desk.reconcile(order(7, OrderStatus::Approved));
        assert_eq!(desk.orders().len(), 2);
    }
}
