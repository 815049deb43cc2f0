//! Order lifecycle engine, end to end against the mock authority.

#![allow(clippy::unwrap_used)]

use kiosk_admin::OrderDesk;
use kiosk_core::{CustomerInfo, OrderAction, OrderId, OrderStatus};
use kiosk_integration_tests::{TestContext, catalog};
use kiosk_storefront::Checkout;

/// Submit one order per given catalog index and return the assigned ids.
async fn seed_orders(ctx: &TestContext, indexes: &[usize]) -> Vec<OrderId> {
    let products = catalog();
    let pipeline = Checkout::new(ctx.storefront_api());
    let mut ids = Vec::new();

    for &i in indexes {
        let mut cart = ctx.open_cart();
        cart.add(&products[i]).unwrap();
        let customer = CustomerInfo::new("Mira", "12 Hill Lane", None).unwrap();
        let order = pipeline.submit(&mut cart, customer).await.unwrap();
        ids.push(order.id);
    }
    ids
}

#[tokio::test]
async fn bulk_transition_isolates_per_order_failures() {
    let ctx = TestContext::start().await;
    let ids = seed_orders(&ctx, &[0, 1]).await;
    let (ok_id, bad_id) = (ids[0], ids[1]);
    ctx.authority.fail_transitions_for(bad_id.as_i64());

    let api = ctx.admin_api();
    let mut desk = OrderDesk::new();
    desk.refresh(&api).await.unwrap();
    desk.select(ok_id);
    desk.select(bad_id);

    let outcomes = desk.bulk_transition(&api, OrderAction::Approve).await;

    assert_eq!(outcomes.len(), 2);
    let ok = outcomes.iter().find(|o| o.order_id == ok_id).unwrap();
    let bad = outcomes.iter().find(|o| o.order_id == bad_id).unwrap();
    assert_eq!(*ok.result.as_ref().unwrap(), OrderStatus::Approved);
    assert!(bad.result.is_err());

    // The success reconciled locally, the failure stayed DRAFT, and the
    // selection cleared regardless.
    let status_of = |id: OrderId| {
        desk.orders()
            .iter()
            .find(|o| o.id == id)
            .map(|o| o.status)
            .unwrap()
    };
    assert_eq!(status_of(ok_id), OrderStatus::Approved);
    assert_eq!(status_of(bad_id), OrderStatus::Draft);
    assert!(desk.selected().is_empty());
}

#[tokio::test]
async fn bulk_deny_resolves_orders() {
    let ctx = TestContext::start().await;
    let ids = seed_orders(&ctx, &[0, 1]).await;

    let api = ctx.admin_api();
    let mut desk = OrderDesk::new();
    desk.refresh(&api).await.unwrap();
    for id in &ids {
        desk.select(*id);
    }

    let outcomes = desk.bulk_transition(&api, OrderAction::Deny).await;
    assert!(outcomes.iter().all(kiosk_admin::BulkOutcome::is_success));

    assert!(desk.awaiting_approval().is_empty());
    assert_eq!(desk.resolved().len(), 2);
    assert!(
        desk.resolved()
            .iter()
            .all(|o| o.status == OrderStatus::Denied)
    );
}

#[tokio::test]
async fn terminal_orders_reject_further_transitions() {
    let ctx = TestContext::start().await;
    let ids = seed_orders(&ctx, &[0]).await;
    let id = ids[0];

    let api = ctx.admin_api();
    let mut desk = OrderDesk::new();
    desk.refresh(&api).await.unwrap();
    desk.select(id);
    desk.bulk_transition(&api, OrderAction::Approve).await;

    // APPROVED is terminal; the authority rejects the second attempt and
    // the engine takes its word for it.
    desk.select(id);
    let outcomes = desk.bulk_transition(&api, OrderAction::Deny).await;
    assert!(outcomes[0].result.is_err());

    desk.refresh(&api).await.unwrap();
    assert_eq!(desk.orders()[0].status, OrderStatus::Approved);
}

#[tokio::test]
async fn transitioning_an_unknown_order_fails_that_order_only() {
    let ctx = TestContext::start().await;
    let ids = seed_orders(&ctx, &[0]).await;

    let api = ctx.admin_api();
    let mut desk = OrderDesk::new();
    desk.refresh(&api).await.unwrap();
    desk.select(ids[0]);
    desk.select(OrderId::new(999));

    let outcomes = desk.bulk_transition(&api, OrderAction::Approve).await;
    let known = outcomes.iter().find(|o| o.order_id == ids[0]).unwrap();
    let unknown = outcomes
        .iter()
        .find(|o| o.order_id == OrderId::new(999))
        .unwrap();
    assert!(known.is_success());
    assert!(unknown.result.is_err());
}

#[tokio::test]
async fn refresh_partitions_and_prunes_selection() {
    let ctx = TestContext::start().await;
    let ids = seed_orders(&ctx, &[0, 1, 2]).await;

    let api = ctx.admin_api();
    let mut desk = OrderDesk::new();
    desk.refresh(&api).await.unwrap();
    assert_eq!(desk.awaiting_approval().len(), 3);
    assert!(desk.resolved().is_empty());

    desk.select(ids[0]);
    desk.bulk_transition(&api, OrderAction::Approve).await;
    assert_eq!(desk.awaiting_approval().len(), 2);
    assert_eq!(desk.resolved().len(), 1);

    // A selection pointing at an order the authority no longer lists is
    // dropped on refresh; live selections survive.
    desk.select(OrderId::new(999));
    desk.select(ids[1]);
    desk.refresh(&api).await.unwrap();
    assert_eq!(desk.selected(), vec![ids[1]]);
}
