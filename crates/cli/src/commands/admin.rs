//! Admin order management commands.

use kiosk_admin::OrderDesk;
use kiosk_core::{OrderAction, OrderId};

use super::CommandError;

/// List orders awaiting approval and already resolved.
pub async fn orders() -> Result<(), CommandError> {
    let api = super::admin_api()?;
    let mut desk = OrderDesk::new();
    desk.refresh(&api).await?;

    let awaiting = desk.awaiting_approval();
    if awaiting.is_empty() {
        tracing::info!("No orders awaiting approval");
    } else {
        for order in awaiting {
            tracing::info!(
                order_id = %order.id,
                total = %order.total_amount,
                customer = %order.name,
                "awaiting approval"
            );
        }
    }

    for order in desk.resolved() {
        tracing::info!(
            order_id = %order.id,
            status = %order.status,
            total = %order.total_amount,
            "resolved"
        );
    }
    Ok(())
}

/// Apply one transition to the given orders, independently per order.
pub async fn transition(order_ids: &[String], action: OrderAction) -> Result<(), CommandError> {
    let ids = order_ids
        .iter()
        .map(|raw| {
            raw.parse::<OrderId>()
                .map_err(|_| CommandError::InvalidId(raw.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let api = super::admin_api()?;
    let mut desk = OrderDesk::new();
    desk.refresh(&api).await?;
    for id in ids {
        desk.select(id);
    }

    let outcomes = desk.bulk_transition(&api, action).await;
    for outcome in &outcomes {
        match &outcome.result {
            Ok(status) => {
                tracing::info!(order_id = %outcome.order_id, status = %status, "transitioned");
            }
            Err(e) => {
                tracing::warn!(order_id = %outcome.order_id, error = %e, "transition failed");
            }
        }
    }
    Ok(())
}
