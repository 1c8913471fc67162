use crate::{
    abstract_trait::CartRepositoryTrait,
    domain::requests::MAX_LINE_QUANTITY,
    model::{CartItem, CartLine, Product},
};
use async_trait::async_trait;
use rust_decimal::Decimal;
use shared::{config::ConnectionPool, errors::RepositoryError};
use sqlx::FromRow;
use tracing::{error, info};

pub struct CartRepository {
    db: ConnectionPool,
}

impl CartRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[derive(FromRow)]
struct CartLineRow {
    id: i32,
    user_id: i32,
    product_id: i32,
    quantity: i32,
    name: String,
    slug: String,
    price: Decimal,
    stock: i32,
    is_cod_available: bool,
}

impl From<CartLineRow> for CartLine {
    fn from(row: CartLineRow) -> Self {
        CartLine {
            item: CartItem {
                id: row.id,
                user_id: row.user_id,
                product_id: row.product_id,
                quantity: row.quantity,
            },
            product: Product {
                id: row.product_id,
                name: row.name,
                slug: row.slug,
                price: row.price,
                stock: row.stock,
                is_cod_available: row.is_cod_available,
            },
        }
    }
}

#[async_trait]
impl CartRepositoryTrait for CartRepository {
    async fn list_with_products(&self, user_id: i32) -> Result<Vec<CartLine>, RepositoryError> {
        let rows = sqlx::query_as::<_, CartLineRow>(
            r#"
            SELECT c.id, c.user_id, c.product_id, c.quantity,
                   p.name, p.slug, p.price, p.stock, p.is_cod_available
            FROM cart_items c
            JOIN products p ON p.id = c.product_id
            WHERE c.user_id = $1
            ORDER BY c.id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await
        .map_err(|err| {
            error!("❌ Failed to read cart of user {}: {:?}", user_id, err);
            RepositoryError::from_sqlx(err)
        })?;

        info!("🛒 Cart of user {} has {} lines", user_id, rows.len());
        Ok(rows.into_iter().map(CartLine::from).collect())
    }

    async fn add_item(
        &self,
        user_id: i32,
        product_id: i32,
        quantity: i32,
    ) -> Result<Option<CartItem>, RepositoryError> {
        let item = sqlx::query_as::<_, CartItem>(
            r#"
            INSERT INTO cart_items (user_id, product_id, quantity)
            SELECT $1, p.id, $3 FROM products p WHERE p.id = $2
            ON CONFLICT (user_id, product_id)
            DO UPDATE SET quantity = LEAST(cart_items.quantity + EXCLUDED.quantity, $4)
            RETURNING id, user_id, product_id, quantity
            "#,
        )
        .bind(user_id)
        .bind(product_id)
        .bind(quantity)
        .bind(MAX_LINE_QUANTITY)
        .fetch_optional(&self.db)
        .await
        .map_err(|err| {
            error!(
                "❌ Failed to add product {} to cart of user {}: {:?}",
                product_id, user_id, err
            );
            RepositoryError::from_sqlx(err)
        })?;

        if let Some(item) = &item {
            info!(
                "🛒 Cart item {} of user {} now holds {} x product {}",
                item.id, user_id, item.quantity, product_id
            );
        }

        Ok(item)
    }

    async fn update_quantity(
        &self,
        user_id: i32,
        id: i32,
        quantity: i32,
    ) -> Result<Option<CartItem>, RepositoryError> {
        sqlx::query_as::<_, CartItem>(
            r#"
            UPDATE cart_items
            SET quantity = $3
            WHERE id = $2 AND user_id = $1
            RETURNING id, user_id, product_id, quantity
            "#,
        )
        .bind(user_id)
        .bind(id)
        .bind(quantity)
        .fetch_optional(&self.db)
        .await
        .map_err(|err| {
            error!("❌ Failed to update cart item {}: {:?}", id, err);
            RepositoryError::from_sqlx(err)
        })
    }

    async fn remove_item(&self, user_id: i32, id: i32) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM cart_items WHERE id = $2 AND user_id = $1")
            .bind(user_id)
            .bind(id)
            .execute(&self.db)
            .await
            .map_err(|err| {
                error!("❌ Failed to remove cart item {}: {:?}", id, err);
                RepositoryError::from_sqlx(err)
            })?;

        Ok(result.rows_affected() > 0)
    }
}
