//! Order submission pipeline, end to end against the mock authority.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use rust_decimal::Decimal;

use kiosk_core::{CustomerInfo, OrderStatus};
use kiosk_integration_tests::{TestContext, catalog};
use kiosk_storefront::{ApiError, Checkout, SubmitError};

fn customer() -> CustomerInfo {
    CustomerInfo::new("Mira", "12 Hill Lane", None).unwrap()
}

#[tokio::test]
async fn submit_success_clears_cart_and_resets_badge() {
    let ctx = TestContext::start().await;
    let products = catalog();

    let badge = Arc::new(AtomicUsize::new(usize::MAX));
    let seen = Arc::clone(&badge);
    let _sub = ctx.bus.on_cart_changed(move |e| seen.store(e.count, Ordering::SeqCst));

    let mut cart = ctx.open_cart();
    cart.add(&products[0]).unwrap();
    cart.add(&products[0]).unwrap();
    cart.add(&products[1]).unwrap();
    assert!(ctx.cart_persisted());

    let order = Checkout::new(ctx.storefront_api())
        .submit(&mut cart, customer())
        .await
        .unwrap();

    assert_eq!(order.status, OrderStatus::Draft);
    assert_eq!(order.total_amount, Decimal::new(4498, 2)); // 2 x 19.99 + 5.00
    assert_eq!(order.products.len(), 2);

    // The correctness-critical side of success: the cart is gone, the
    // persisted record deleted, and the badge saw the zero count.
    assert!(cart.is_empty());
    assert!(!ctx.cart_persisted());
    assert_eq!(badge.load(Ordering::SeqCst), 0);

    assert_eq!(ctx.authority.orders().len(), 1);
}

#[tokio::test]
async fn submit_failure_leaves_cart_untouched() {
    let ctx = TestContext::start().await;
    let products = catalog();

    let mut cart = ctx.open_cart();
    cart.add(&products[0]).unwrap();
    cart.add(&products[1]).unwrap();
    let before = cart.items().to_vec();

    ctx.authority.reject_orders(true);
    let result = Checkout::new(ctx.storefront_api())
        .submit(&mut cart, customer())
        .await;

    match result {
        Err(SubmitError::Submission(ApiError::Status { status, .. })) => {
            assert_eq!(status.as_u16(), 503);
        }
        other => panic!("expected a submission failure, got {other:?}"),
    }

    // A customer never loses cart contents for an order that did not
    // durably register.
    assert_eq!(cart.items(), before.as_slice());
    assert!(ctx.cart_persisted());
    assert!(ctx.authority.orders().is_empty());
}

#[tokio::test]
async fn empty_cart_submits_as_zero_total_order() {
    let ctx = TestContext::start().await;

    let mut cart = ctx.open_cart();
    let order = Checkout::new(ctx.storefront_api())
        .submit(&mut cart, customer())
        .await
        .unwrap();

    assert_eq!(order.total_amount, Decimal::ZERO);
    assert!(order.products.is_empty());
}

#[tokio::test]
async fn resubmission_creates_a_second_order() {
    // No idempotency: the pipeline performs no deduplication, so a retry
    // of the same cart registers twice.
    let ctx = TestContext::start().await;
    let products = catalog();
    let pipeline = Checkout::new(ctx.storefront_api());

    let mut cart = ctx.open_cart();
    cart.add(&products[2]).unwrap();
    let first = pipeline.submit(&mut cart, customer()).await.unwrap();

    cart.add(&products[2]).unwrap();
    let second = pipeline.submit(&mut cart, customer()).await.unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(ctx.authority.orders().len(), 2);
}

#[tokio::test]
async fn submitted_order_is_a_snapshot_of_the_cart() {
    let ctx = TestContext::start().await;
    let products = catalog();
    let pipeline = Checkout::new(ctx.storefront_api());

    let mut cart = ctx.open_cart();
    cart.add(&products[0]).unwrap();
    let order = pipeline.submit(&mut cart, customer()).await.unwrap();

    // Later cart activity must never retroactively affect the order.
    cart.add(&products[1]).unwrap();
    cart.add(&products[2]).unwrap();

    let listed = ctx.authority.orders();
    assert_eq!(listed[0].products.len(), 1);
    assert_eq!(listed[0].products[0].id, order.products[0].id);
}
