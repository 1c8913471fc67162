use crate::{
    abstract_trait::OrderCommandRepositoryTrait,
    domain::{requests::CreateOrderRecordRequest, status::OrderStatus},
    model::{Order as OrderModel, OrderItem as OrderItemModel},
    repository::order::ORDER_COLUMNS,
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info, warn};

pub struct OrderCommandRepository {
    db: ConnectionPool,
}

impl OrderCommandRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderCommandRepositoryTrait for OrderCommandRepository {
    async fn create_from_cart(
        &self,
        req: &CreateOrderRecordRequest,
    ) -> Result<(OrderModel, Vec<OrderItemModel>), RepositoryError> {
        let mut tx = self.db.begin().await.map_err(|err| {
            error!("❌ Failed to open checkout transaction: {:?}", err);
            RepositoryError::from_sqlx(err)
        })?;

        let mut order = sqlx::query_as::<_, OrderModel>(&format!(
            r#"
            INSERT INTO orders (user_id, status, total_amount, payment_mode, address, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, current_timestamp, current_timestamp)
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(req.user_id)
        .bind(OrderStatus::Pending.as_str())
        .bind(req.total_amount)
        .bind(req.payment_mode.as_str())
        .bind(&req.address)
        .fetch_one(&mut *tx)
        .await
        .map_err(|err| {
            error!(
                "❌ Failed to insert order for user {}: {:?}",
                req.user_id, err
            );
            RepositoryError::from_sqlx(err)
        })?;

        let mut items = Vec::with_capacity(req.items.len());

        for line in &req.items {
            let item = sqlx::query_as::<_, OrderItemModel>(
                r#"
                INSERT INTO order_items (order_id, product_id, quantity, price)
                VALUES ($1, $2, $3, $4)
                RETURNING id, order_id, product_id, quantity, price
                "#,
            )
            .bind(order.id)
            .bind(line.product_id)
            .bind(line.quantity)
            .bind(line.price)
            .fetch_one(&mut *tx)
            .await
            .map_err(|err| {
                error!(
                    "❌ Failed to insert item for product {} on order {}: {:?}",
                    line.product_id, order.id, err
                );
                RepositoryError::from_sqlx(err)
            })?;

            items.push(item);
        }

        let cart_ids: Vec<i32> = req.items.iter().map(|line| line.cart_item_id).collect();

        let deleted = sqlx::query("DELETE FROM cart_items WHERE user_id = $1 AND id = ANY($2)")
            .bind(req.user_id)
            .bind(&cart_ids)
            .execute(&mut *tx)
            .await
            .map_err(|err| {
                error!(
                    "❌ Failed to clear cart for user {}: {:?}",
                    req.user_id, err
                );
                RepositoryError::from_sqlx(err)
            })?
            .rows_affected();

        if deleted != cart_ids.len() as u64 {
            warn!(
                "⚠️ Cart of user {} changed during checkout (expected {}, deleted {}), rolling back",
                req.user_id,
                cart_ids.len(),
                deleted
            );
            return Err(RepositoryError::Conflict(
                "Cart changed during checkout, please retry".into(),
            ));
        }

        if let Some(next) = req.confirm_status {
            let order_id = order.id;
            order = sqlx::query_as::<_, OrderModel>(&format!(
                r#"
                UPDATE orders
                SET status = $3, updated_at = current_timestamp
                WHERE id = $1 AND status = $2
                RETURNING {ORDER_COLUMNS}
                "#
            ))
            .bind(order_id)
            .bind(OrderStatus::Pending.as_str())
            .bind(next.as_str())
            .fetch_optional(&mut *tx)
            .await
            .map_err(|err| {
                error!("❌ Failed to confirm order {}: {:?}", order_id, err);
                RepositoryError::from_sqlx(err)
            })?
            .ok_or_else(|| {
                RepositoryError::Conflict(format!("Order {order_id} left pending state"))
            })?;
        }

        tx.commit().await.map_err(|err| {
            error!("❌ Failed to commit order {}: {:?}", order.id, err);
            RepositoryError::from_sqlx(err)
        })?;

        info!(
            "✅ Created order ID {} for user {} with {} items (status={})",
            order.id,
            order.user_id,
            items.len(),
            order.status
        );

        Ok((order, items))
    }

    async fn set_payment_id(
        &self,
        order_id: i32,
        payment_id: &str,
    ) -> Result<Option<OrderModel>, RepositoryError> {
        let result = sqlx::query_as::<_, OrderModel>(&format!(
            r#"
            UPDATE orders
            SET payment_id = $2, updated_at = current_timestamp
            WHERE id = $1 AND payment_id IS NULL
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(order_id)
        .bind(payment_id)
        .fetch_optional(&self.db)
        .await
        .map_err(|err| {
            error!(
                "❌ Failed to attach payment reference to order {}: {:?}",
                order_id, err
            );
            RepositoryError::from_sqlx(err)
        })?;

        match &result {
            Some(_) => info!("💳 Attached payment reference {payment_id} to order {order_id}"),
            None => warn!("⚠️ Order {order_id} already has a payment reference or is missing"),
        }

        Ok(result)
    }

    async fn transition_status(
        &self,
        order_id: i32,
        from: OrderStatus,
        to: OrderStatus,
    ) -> Result<Option<OrderModel>, RepositoryError> {
        let result = sqlx::query_as::<_, OrderModel>(&format!(
            r#"
            UPDATE orders
            SET status = $3, updated_at = current_timestamp
            WHERE id = $1 AND status = $2
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(order_id)
        .bind(from.as_str())
        .bind(to.as_str())
        .fetch_optional(&self.db)
        .await
        .map_err(|err| {
            error!(
                "❌ Failed to move order {} from {} to {}: {:?}",
                order_id, from, to, err
            );
            RepositoryError::from_sqlx(err)
        })?;

        if result.is_some() {
            info!("🔄 Order {order_id} moved {from} -> {to}");
        }

        Ok(result)
    }
}
