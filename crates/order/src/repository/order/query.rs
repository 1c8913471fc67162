use crate::{
    abstract_trait::OrderQueryRepositoryTrait,
    domain::status::OrderStatus,
    model::{Order as OrderModel, OrderItem as OrderItemModel, OrderWithUser, User},
    repository::order::ORDER_COLUMNS,
};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use shared::{config::ConnectionPool, errors::RepositoryError};
use sqlx::FromRow;
use tracing::{error, info};

pub struct OrderQueryRepository {
    db: ConnectionPool,
}

impl OrderQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[derive(FromRow)]
struct OrderUserRow {
    id: i32,
    user_id: i32,
    status: String,
    total_amount: Decimal,
    payment_mode: String,
    payment_id: Option<String>,
    address: serde_json::Value,
    created_at: NaiveDateTime,
    updated_at: NaiveDateTime,
    username: Option<String>,
    is_admin: Option<bool>,
    user_created_at: Option<NaiveDateTime>,
}

impl From<OrderUserRow> for OrderWithUser {
    fn from(row: OrderUserRow) -> Self {
        let user = match (row.username, row.is_admin) {
            (Some(username), Some(is_admin)) => Some(User {
                id: row.user_id,
                username,
                is_admin,
                created_at: row.user_created_at,
            }),
            _ => None,
        };

        OrderWithUser {
            order: OrderModel {
                id: row.id,
                user_id: row.user_id,
                status: row.status,
                total_amount: row.total_amount,
                payment_mode: row.payment_mode,
                payment_id: row.payment_id,
                address: row.address,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            user,
        }
    }
}

#[async_trait]
impl OrderQueryRepositoryTrait for OrderQueryRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<OrderModel>, RepositoryError> {
        sqlx::query_as::<_, OrderModel>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .map_err(|err| {
            error!("❌ Failed to fetch order {}: {:?}", id, err);
            RepositoryError::from_sqlx(err)
        })
    }

    async fn find_by_user(&self, user_id: i32) -> Result<Vec<OrderModel>, RepositoryError> {
        let orders = sqlx::query_as::<_, OrderModel>(&format!(
            r#"
            SELECT {ORDER_COLUMNS}
            FROM orders
            WHERE user_id = $1
            ORDER BY created_at DESC, id DESC
            "#
        ))
        .bind(user_id)
        .fetch_all(&self.db)
        .await
        .map_err(|err| {
            error!("❌ Failed to list orders of user {}: {:?}", user_id, err);
            RepositoryError::from_sqlx(err)
        })?;

        info!("📦 Found {} orders for user {}", orders.len(), user_id);
        Ok(orders)
    }

    async fn find_items(&self, order_id: i32) -> Result<Vec<OrderItemModel>, RepositoryError> {
        sqlx::query_as::<_, OrderItemModel>(
            r#"
            SELECT id, order_id, product_id, quantity, price
            FROM order_items
            WHERE order_id = $1
            ORDER BY id
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.db)
        .await
        .map_err(|err| {
            error!("❌ Failed to fetch items of order {}: {:?}", order_id, err);
            RepositoryError::from_sqlx(err)
        })
    }

    async fn find_all_with_user(
        &self,
        user_id: Option<i32>,
        status: Option<OrderStatus>,
    ) -> Result<Vec<OrderWithUser>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderUserRow>(
            r#"
            SELECT o.id, o.user_id, o.status, o.total_amount, o.payment_mode,
                   o.payment_id, o.address, o.created_at, o.updated_at,
                   u.username, u.is_admin, u.created_at AS user_created_at
            FROM orders o
            LEFT JOIN users u ON u.id = o.user_id
            WHERE ($1::INT IS NULL OR o.user_id = $1)
              AND ($2::TEXT IS NULL OR o.status = $2)
            ORDER BY o.created_at DESC, o.id DESC
            "#,
        )
        .bind(user_id)
        .bind(status.map(OrderStatus::as_str))
        .fetch_all(&self.db)
        .await
        .map_err(|err| {
            error!("❌ Failed to list orders for admin: {:?}", err);
            RepositoryError::from_sqlx(err)
        })?;

        info!("📦 Admin listing returned {} orders", rows.len());
        Ok(rows.into_iter().map(OrderWithUser::from).collect())
    }
}
