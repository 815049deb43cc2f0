//! Integration test support for Kiosk.
//!
//! Provides [`MockAuthority`], an in-process stand-in for the remote
//! order/catalog authority, plus a [`TestContext`] that wires the engine
//! against it. Tests drive the real pipeline over real HTTP:
//!
//! ```rust,ignore
//! let ctx = TestContext::start().await;
//! let mut cart = ctx.open_cart();
//! cart.add(&ctx.catalog()[0])?;
//! Checkout::new(ctx.storefront_api()).submit(&mut cart, customer).await?;
//! ```
//!
//! # Failure injection
//!
//! - [`MockAuthority::reject_orders`] makes `POST /orders` answer 503
//! - [`MockAuthority::fail_transitions_for`] makes `PATCH` on the given
//!   order answer 500

use std::collections::HashSet;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use chrono::Utc;
use secrecy::SecretString;

use kiosk_admin::AdminApi;
use kiosk_core::{NewOrder, Order, OrderAction, OrderStatus, Product};
use kiosk_storefront::{CartStore, EventBus, MemoryStore, StorefrontApi};

/// In-process remote authority.
#[derive(Debug, Default)]
pub struct MockAuthority {
    orders: Mutex<Vec<Order>>,
    next_id: AtomicI64,
    reject_orders: AtomicBool,
    failing_transitions: Mutex<HashSet<i64>>,
}

impl MockAuthority {
    /// Make `POST /orders` answer 503 until called with `false`.
    pub fn reject_orders(&self, reject: bool) {
        self.reject_orders.store(reject, Ordering::SeqCst);
    }

    /// Make `PATCH` requests for the given order id answer 500.
    pub fn fail_transitions_for(&self, order_id: i64) {
        self.failing_transitions
            .lock()
            .expect("authority lock poisoned")
            .insert(order_id);
    }

    /// Orders currently registered with the authority.
    pub fn orders(&self) -> Vec<Order> {
        self.orders.lock().expect("authority lock poisoned").clone()
    }
}

async fn list_products() -> Json<Vec<Product>> {
    Json(catalog())
}

async fn create_order(
    State(authority): State<Arc<MockAuthority>>,
    Json(body): Json<NewOrder>,
) -> Response {
    if authority.reject_orders.load(Ordering::SeqCst) {
        return (StatusCode::SERVICE_UNAVAILABLE, "authority offline").into_response();
    }

    let id = authority.next_id.fetch_add(1, Ordering::SeqCst) + 1;
    let order = Order {
        id: id.into(),
        name: body.customer.name.clone(),
        address: body.customer.address.clone(),
        email: body.customer.email.clone(),
        total_amount: body.total_amount(),
        products: body.products,
        status: OrderStatus::Draft,
        date: Some(Utc::now()),
    };

    authority
        .orders
        .lock()
        .expect("authority lock poisoned")
        .push(order.clone());
    (StatusCode::CREATED, Json(order)).into_response()
}

async fn list_orders(State(authority): State<Arc<MockAuthority>>) -> Json<Vec<Order>> {
    Json(authority.orders())
}

async fn transition_order(
    State(authority): State<Arc<MockAuthority>>,
    Path((id, action)): Path<(i64, String)>,
) -> Response {
    if authority
        .failing_transitions
        .lock()
        .expect("authority lock poisoned")
        .contains(&id)
    {
        return (StatusCode::INTERNAL_SERVER_ERROR, "simulated failure").into_response();
    }

    let Ok(action) = action.parse::<OrderAction>() else {
        return (StatusCode::BAD_REQUEST, "unknown action").into_response();
    };

    let mut orders = authority.orders.lock().expect("authority lock poisoned");
    let Some(order) = orders.iter_mut().find(|o| o.id.as_i64() == id) else {
        return (StatusCode::NOT_FOUND, "no such order").into_response();
    };

    if order.status != OrderStatus::Draft {
        return (StatusCode::CONFLICT, "order already resolved").into_response();
    }

    order.status = action.target();
    Json(order.clone()).into_response()
}

/// Spawn the authority on an ephemeral port.
///
/// # Panics
///
/// Panics if the listener cannot be bound.
pub async fn spawn_authority() -> (Arc<MockAuthority>, String) {
    let authority = Arc::new(MockAuthority::default());
    let app = Router::new()
        .route("/products", get(list_products))
        .route("/orders", post(create_order))
        .route("/orders/admin", get(list_orders))
        .route("/orders/admin/{id}/{action}", patch(transition_order))
        .with_state(Arc::clone(&authority));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock authority");
    let addr: SocketAddr = listener.local_addr().expect("mock authority addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock authority serve");
    });

    (authority, format!("http://{addr}"))
}

/// Everything a test needs: the authority plus engine constructors wired
/// against it.
pub struct TestContext {
    pub authority: Arc<MockAuthority>,
    pub base_url: String,
    pub bus: EventBus,
    store: MemoryStore,
}

impl TestContext {
    /// Start a fresh authority and context.
    pub async fn start() -> Self {
        let (authority, base_url) = spawn_authority().await;
        Self {
            authority,
            base_url,
            bus: EventBus::new(),
            store: MemoryStore::new(),
        }
    }

    /// The storefront-facing client.
    #[must_use]
    pub fn storefront_api(&self) -> StorefrontApi {
        StorefrontApi::new(self.base_url.clone(), SecretString::from("test-token"))
    }

    /// The admin-facing client.
    #[must_use]
    pub fn admin_api(&self) -> AdminApi {
        AdminApi::new(self.base_url.clone(), SecretString::from("test-token"))
    }

    /// Open the cart over this context's shared memory store.
    #[must_use]
    pub fn open_cart(&self) -> CartStore {
        CartStore::open(Box::new(self.store.clone()), self.bus.clone())
    }

    /// Whether a cart record is persisted right now.
    #[must_use]
    pub fn cart_persisted(&self) -> bool {
        self.store.contains(kiosk_storefront::cart::CART_KEY)
    }
}

/// The fixed catalog the mock authority serves.
#[must_use]
pub fn catalog() -> Vec<Product> {
    serde_json::from_str(
        r#"[
            {"id": 1, "name": "Copper kettle", "price": 19.99, "category": "kitchen"},
            {"id": 2, "name": "Tea strainer", "price": 5.0, "category": "kitchen"},
            {"id": 3, "name": "Walnut tray", "price": 34.5, "category": "living"}
        ]"#,
    )
    .expect("static catalog parses")
}
