#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response, StatusCode, header},
};
use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use serde_json::Value;
use shared::{
    abstract_trait::{DynJwtService, DynSessionStore, JwtServiceTrait, SessionStoreTrait},
    cache::Session,
    config::JwtConfig,
    errors::{RepositoryError, ServiceError},
};
use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
};
use storefront_order::{
    abstract_trait::{
        CartRepositoryTrait, DynCartRepository, OrderCommandRepositoryTrait,
        OrderQueryRepositoryTrait, PaymentGatewayTrait, UserQueryRepositoryTrait,
    },
    di::DependenciesInjectDeps,
    domain::{
        requests::{CreateIntentRequest, CreateOrderRecordRequest, MAX_LINE_QUANTITY},
        status::OrderStatus,
    },
    gateway::PaymentSignature,
    handler::AppRouter,
    middleware::SessionTtl,
    model::{CartItem, CartLine, Order, OrderItem, OrderWithUser, PaymentIntent, Product, User},
    state::{AppState, AppStateParts},
};
use tower::ServiceExt;

pub const SIGNATURE_SECRET: &str = "test_signature_secret";
pub const JWT_SECRET: &str = "test_jwt_secret";

#[derive(Default)]
struct Store {
    users: HashMap<i32, User>,
    products: HashMap<i32, Product>,
    cart: Vec<CartItem>,
    orders: Vec<Order>,
    items: Vec<OrderItem>,
    next_cart_id: i32,
    next_order_id: i32,
    next_item_id: i32,
}

/// Single-lock stand-in for Postgres: every trait call is atomic.
#[derive(Clone, Default)]
pub struct MemoryDb {
    inner: Arc<Mutex<Store>>,
}

impl MemoryDb {
    fn with<R>(&self, f: impl FnOnce(&mut Store) -> R) -> R {
        let mut store = self.inner.lock().unwrap();
        f(&mut store)
    }

    pub fn add_user(&self, id: i32, username: &str, is_admin: bool) {
        self.with(|s| {
            s.users.insert(
                id,
                User {
                    id,
                    username: username.into(),
                    is_admin,
                    created_at: Some(Utc::now().naive_utc()),
                },
            );
        });
    }

    pub fn add_product(&self, id: i32, name: &str, price: Decimal, stock: i32, cod: bool) {
        self.with(|s| {
            s.products.insert(
                id,
                Product {
                    id,
                    name: name.into(),
                    slug: name.to_lowercase().replace(' ', "-"),
                    price,
                    stock,
                    is_cod_available: cod,
                },
            );
        });
    }

    pub fn set_price(&self, product_id: i32, price: Decimal) {
        self.with(|s| {
            if let Some(product) = s.products.get_mut(&product_id) {
                product.price = price;
            }
        });
    }

    pub fn put_in_cart(&self, user_id: i32, product_id: i32, quantity: i32) {
        self.with(|s| {
            s.next_cart_id += 1;
            let id = s.next_cart_id;
            s.cart.push(CartItem {
                id,
                user_id,
                product_id,
                quantity,
            });
        });
    }

    pub fn cart_of(&self, user_id: i32) -> Vec<CartItem> {
        self.with(|s| {
            s.cart
                .iter()
                .filter(|c| c.user_id == user_id)
                .cloned()
                .collect()
        })
    }

    pub fn order(&self, id: i32) -> Option<Order> {
        self.with(|s| s.orders.iter().find(|o| o.id == id).cloned())
    }

    pub fn order_count(&self) -> usize {
        self.with(|s| s.orders.len())
    }

    pub fn force_status(&self, id: i32, status: OrderStatus) {
        self.with(|s| {
            if let Some(order) = s.orders.iter_mut().find(|o| o.id == id) {
                order.status = status.to_string();
            }
        });
    }
}

#[async_trait]
impl CartRepositoryTrait for MemoryDb {
    async fn list_with_products(&self, user_id: i32) -> Result<Vec<CartLine>, RepositoryError> {
        Ok(self.with(|s| {
            let mut lines: Vec<CartLine> = s
                .cart
                .iter()
                .filter(|c| c.user_id == user_id)
                .filter_map(|c| {
                    s.products.get(&c.product_id).map(|p| CartLine {
                        item: c.clone(),
                        product: p.clone(),
                    })
                })
                .collect();
            lines.sort_by_key(|line| line.item.id);
            lines
        }))
    }

    async fn add_item(
        &self,
        user_id: i32,
        product_id: i32,
        quantity: i32,
    ) -> Result<Option<CartItem>, RepositoryError> {
        Ok(self.with(|s| {
            if !s.products.contains_key(&product_id) {
                return None;
            }
            if let Some(existing) = s
                .cart
                .iter_mut()
                .find(|c| c.user_id == user_id && c.product_id == product_id)
            {
                existing.quantity = (existing.quantity + quantity).min(MAX_LINE_QUANTITY);
                return Some(existing.clone());
            }
            s.next_cart_id += 1;
            let item = CartItem {
                id: s.next_cart_id,
                user_id,
                product_id,
                quantity,
            };
            s.cart.push(item.clone());
            Some(item)
        }))
    }

    async fn update_quantity(
        &self,
        user_id: i32,
        id: i32,
        quantity: i32,
    ) -> Result<Option<CartItem>, RepositoryError> {
        Ok(self.with(|s| {
            s.cart
                .iter_mut()
                .find(|c| c.id == id && c.user_id == user_id)
                .map(|c| {
                    c.quantity = quantity;
                    c.clone()
                })
        }))
    }

    async fn remove_item(&self, user_id: i32, id: i32) -> Result<bool, RepositoryError> {
        Ok(self.with(|s| {
            let before = s.cart.len();
            s.cart.retain(|c| !(c.id == id && c.user_id == user_id));
            s.cart.len() != before
        }))
    }
}

#[async_trait]
impl OrderCommandRepositoryTrait for MemoryDb {
    async fn create_from_cart(
        &self,
        req: &CreateOrderRecordRequest,
    ) -> Result<(Order, Vec<OrderItem>), RepositoryError> {
        self.with(|s| {
            let present = req.items.iter().all(|line| {
                s.cart
                    .iter()
                    .any(|c| c.id == line.cart_item_id && c.user_id == req.user_id)
            });
            if !present {
                return Err(RepositoryError::Conflict(
                    "Cart changed during checkout, please retry".into(),
                ));
            }

            let now = Utc::now().naive_utc();
            s.next_order_id += 1;
            let order = Order {
                id: s.next_order_id,
                user_id: req.user_id,
                status: req
                    .confirm_status
                    .unwrap_or(OrderStatus::Pending)
                    .to_string(),
                total_amount: req.total_amount,
                payment_mode: req.payment_mode.to_string(),
                payment_id: None,
                address: req.address.clone(),
                created_at: now,
                updated_at: now,
            };

            let mut items = Vec::new();
            for line in &req.items {
                s.next_item_id += 1;
                items.push(OrderItem {
                    id: s.next_item_id,
                    order_id: order.id,
                    product_id: line.product_id,
                    quantity: line.quantity,
                    price: line.price,
                });
            }

            let consumed: Vec<i32> = req.items.iter().map(|line| line.cart_item_id).collect();
            s.cart
                .retain(|c| !(c.user_id == req.user_id && consumed.contains(&c.id)));
            s.orders.push(order.clone());
            s.items.extend(items.iter().cloned());

            Ok((order, items))
        })
    }

    async fn set_payment_id(
        &self,
        order_id: i32,
        payment_id: &str,
    ) -> Result<Option<Order>, RepositoryError> {
        Ok(self.with(|s| {
            s.orders
                .iter_mut()
                .find(|o| o.id == order_id && o.payment_id.is_none())
                .map(|o| {
                    o.payment_id = Some(payment_id.to_string());
                    o.updated_at = Utc::now().naive_utc();
                    o.clone()
                })
        }))
    }

    async fn transition_status(
        &self,
        order_id: i32,
        from: OrderStatus,
        to: OrderStatus,
    ) -> Result<Option<Order>, RepositoryError> {
        Ok(self.with(|s| {
            s.orders
                .iter_mut()
                .find(|o| o.id == order_id && o.status == from.as_str())
                .map(|o| {
                    o.status = to.to_string();
                    o.updated_at = Utc::now().naive_utc();
                    o.clone()
                })
        }))
    }
}

#[async_trait]
impl OrderQueryRepositoryTrait for MemoryDb {
    async fn find_by_id(&self, id: i32) -> Result<Option<Order>, RepositoryError> {
        Ok(self.order(id))
    }

    async fn find_by_user(&self, user_id: i32) -> Result<Vec<Order>, RepositoryError> {
        Ok(self.with(|s| {
            let mut orders: Vec<Order> = s
                .orders
                .iter()
                .filter(|o| o.user_id == user_id)
                .cloned()
                .collect();
            orders.sort_by(|a, b| b.id.cmp(&a.id));
            orders
        }))
    }

    async fn find_items(&self, order_id: i32) -> Result<Vec<OrderItem>, RepositoryError> {
        Ok(self.with(|s| {
            s.items
                .iter()
                .filter(|i| i.order_id == order_id)
                .cloned()
                .collect()
        }))
    }

    async fn find_all_with_user(
        &self,
        user_id: Option<i32>,
        status: Option<OrderStatus>,
    ) -> Result<Vec<OrderWithUser>, RepositoryError> {
        Ok(self.with(|s| {
            let mut rows: Vec<OrderWithUser> = s
                .orders
                .iter()
                .filter(|o| user_id.is_none_or(|id| o.user_id == id))
                .filter(|o| status.is_none_or(|st| o.status == st.as_str()))
                .map(|o| OrderWithUser {
                    order: o.clone(),
                    user: s.users.get(&o.user_id).cloned(),
                })
                .collect();
            rows.sort_by(|a, b| b.order.id.cmp(&a.order.id));
            rows
        }))
    }
}

#[async_trait]
impl UserQueryRepositoryTrait for MemoryDb {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, RepositoryError> {
        Ok(self.with(|s| s.users.get(&id).cloned()))
    }
}

/// Gateway double that hands out sequential `order_fake{n}` references.
pub struct FakeGateway {
    failing: AtomicBool,
    created: AtomicUsize,
    signer: PaymentSignature,
    requests: Mutex<Vec<CreateIntentRequest>>,
}

impl Default for FakeGateway {
    fn default() -> Self {
        Self {
            failing: AtomicBool::new(false),
            created: AtomicUsize::new(0),
            signer: PaymentSignature::new(SIGNATURE_SECRET),
            requests: Mutex::new(Vec::new()),
        }
    }
}

impl FakeGateway {
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<CreateIntentRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PaymentGatewayTrait for FakeGateway {
    fn key_id(&self) -> Option<String> {
        Some("rzp_test_key".into())
    }

    fn currency(&self) -> String {
        "INR".into()
    }

    async fn create_intent(&self, req: &CreateIntentRequest) -> Result<PaymentIntent, ServiceError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(ServiceError::GatewayUnavailable(
                "Payment gateway timed out".into(),
            ));
        }

        self.requests.lock().unwrap().push(req.clone());
        let n = self.created.fetch_add(1, Ordering::SeqCst) + 1;

        Ok(PaymentIntent {
            id: format!("order_fake{n}"),
            amount: req.amount,
            currency: req.currency.clone(),
            receipt: Some(req.receipt.clone()),
        })
    }

    fn verify_signature(
        &self,
        gateway_order_id: &str,
        payment_id: &str,
        signature: &str,
    ) -> Result<bool, ServiceError> {
        self.signer.verify(gateway_order_id, payment_id, signature)
    }
}

#[derive(Default)]
pub struct MemorySessionStore {
    sessions: Mutex<HashMap<String, Session>>,
}

impl MemorySessionStore {
    pub fn get(&self, key: &str) -> Option<Session> {
        self.sessions.lock().unwrap().get(key).cloned()
    }
}

#[async_trait]
impl SessionStoreTrait for MemorySessionStore {
    async fn create_session(&self, session_id: &str, session: &Session, _ttl: Duration) -> bool {
        self.sessions
            .lock()
            .unwrap()
            .insert(session_id.to_string(), session.clone());
        true
    }

    async fn get_session(&self, session_id: &str) -> Option<Session> {
        self.get(session_id)
    }

    async fn delete_session(&self, session_id: &str) -> bool {
        self.sessions.lock().unwrap().remove(session_id).is_some()
    }
}

/// Cart repository whose first snapshot is immediately followed by another
/// client removing one of the snapshotted lines.
pub struct ShrinkingCart {
    db: MemoryDb,
    shrunk: AtomicBool,
}

#[async_trait]
impl CartRepositoryTrait for ShrinkingCart {
    async fn list_with_products(&self, user_id: i32) -> Result<Vec<CartLine>, RepositoryError> {
        let lines = self.db.list_with_products(user_id).await?;

        if let Some(first) = lines.first() {
            if !self.shrunk.swap(true, Ordering::SeqCst) {
                self.db.remove_item(user_id, first.item.id).await?;
            }
        }

        Ok(lines)
    }

    async fn add_item(
        &self,
        user_id: i32,
        product_id: i32,
        quantity: i32,
    ) -> Result<Option<CartItem>, RepositoryError> {
        self.db.add_item(user_id, product_id, quantity).await
    }

    async fn update_quantity(
        &self,
        user_id: i32,
        id: i32,
        quantity: i32,
    ) -> Result<Option<CartItem>, RepositoryError> {
        self.db.update_quantity(user_id, id, quantity).await
    }

    async fn remove_item(&self, user_id: i32, id: i32) -> Result<bool, RepositoryError> {
        self.db.remove_item(user_id, id).await
    }
}

pub fn sign(gateway_order_id: &str, payment_id: &str) -> String {
    PaymentSignature::new(SIGNATURE_SECRET)
        .sign(gateway_order_id, payment_id)
        .unwrap()
}

pub struct TestApp {
    pub db: MemoryDb,
    pub gateway: Arc<FakeGateway>,
    pub sessions: Arc<MemorySessionStore>,
    pub state: Arc<AppState>,
    jwt: JwtConfig,
}

impl TestApp {
    pub async fn new() -> Self {
        let db = MemoryDb::default();
        Self::with_cart_repository(db.clone(), Arc::new(db)).await
    }

    pub async fn with_cart_repository(db: MemoryDb, cart: DynCartRepository) -> Self {
        let gateway = Arc::new(FakeGateway::default());
        let sessions = Arc::new(MemorySessionStore::default());

        let state = AppState::from_parts(AppStateParts {
            jwt_config: Arc::new(JwtConfig::new(JWT_SECRET)) as DynJwtService,
            session: sessions.clone() as DynSessionStore,
            session_ttl: SessionTtl(Duration::minutes(30)),
            deps: DependenciesInjectDeps {
                cart,
                order_command: Arc::new(db.clone()),
                order_query: Arc::new(db.clone()),
                user_query: Arc::new(db.clone()),
                gateway: gateway.clone(),
            },
        })
        .await;

        Self {
            db,
            gateway,
            sessions,
            state: Arc::new(state),
            jwt: JwtConfig::new(JWT_SECRET),
        }
    }

    /// Customer 1 with 2 x ring (500.00) and 1 x necklace (1000.00) in the cart.
    pub async fn with_seeded_cart() -> Self {
        let app = Self::new().await;
        app.seed();
        app
    }

    /// Same data as [`TestApp::with_seeded_cart`], but the first cart line
    /// disappears right after checkout has taken its snapshot.
    pub async fn with_cart_edited_during_checkout() -> Self {
        let db = MemoryDb::default();
        let cart = Arc::new(ShrinkingCart {
            db: db.clone(),
            shrunk: AtomicBool::new(false),
        });
        let app = Self::with_cart_repository(db, cart).await;
        app.seed();
        app
    }

    fn seed(&self) {
        self.db.add_user(1, "asha", false);
        self.db.add_user(2, "ravi", false);
        self.db.add_user(9, "admin", true);
        self.db
            .add_product(10, "Gold Ring", Decimal::new(50000, 2), 5, true);
        self.db
            .add_product(11, "Pearl Necklace", Decimal::new(100000, 2), 3, true);
        self.db.put_in_cart(1, 10, 2);
        self.db.put_in_cart(1, 11, 1);
    }

    pub fn router(&self) -> Router {
        AppRouter::build(self.state.clone())
    }

    pub fn token(&self, user_id: i64) -> String {
        self.jwt.generate_token(user_id, "access").unwrap()
    }

    pub async fn call(
        &self,
        method: &str,
        uri: &str,
        user_id: Option<i64>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);

        if let Some(id) = user_id {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", self.token(id)));
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response: Response<Body> = self.router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, json)
    }

    pub async fn get_text(&self, uri: &str) -> (StatusCode, String) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response: Response<Body> = self.router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        (status, String::from_utf8_lossy(&bytes).into_owned())
    }
}
