use crate::{
    abstract_trait::product::{UnitOfWork, UnitOfWorkFactoryTrait, UnitOfWorkTrait},
    model::{
        inventory::{Inventory as InventoryModel, NewInventory},
        product::{NewProduct, Product as ProductModel},
    },
};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use sqlx::{Postgres, Transaction};
use tracing::{error, info};

pub struct PgUnitOfWorkFactory {
    db: ConnectionPool,
}

impl PgUnitOfWorkFactory {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UnitOfWorkFactoryTrait for PgUnitOfWorkFactory {
    async fn begin(&self) -> Result<UnitOfWork, RepositoryError> {
        let tx = self.db.begin().await.map_err(|e| {
            error!("❌ Failed to begin transaction: {:?}", e);
            RepositoryError::from(e)
        })?;

        Ok(Box::new(PgUnitOfWork { tx }))
    }
}

/// Holds the open transaction. sqlx rolls it back when dropped un-committed.
pub struct PgUnitOfWork {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl UnitOfWorkTrait for PgUnitOfWork {
    async fn warehouse_exists(&mut self, warehouse_id: i64) -> Result<bool, RepositoryError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM warehouses WHERE id = $1)")
                .bind(warehouse_id)
                .fetch_one(&mut *self.tx)
                .await
                .map_err(|err| {
                    error!("❌ Failed to look up warehouse {}: {:?}", warehouse_id, err);
                    RepositoryError::from(err)
                })?;

        Ok(exists)
    }

    async fn insert_product(
        &mut self,
        product: &NewProduct,
    ) -> Result<ProductModel, RepositoryError> {
        let result = sqlx::query_as::<_, ProductModel>(
            r#"
            INSERT INTO products (name, sku, price, warehouse_id, low_stock_threshold, supplier_id)
            VALUES ($1, $2, $3::NUMERIC, $4, $5, $6)
            RETURNING id, name, sku, price::FLOAT8 AS price, warehouse_id,
                      low_stock_threshold, supplier_id, created_at
            "#,
        )
        .bind(&product.name)
        .bind(&product.sku)
        .bind(product.price)
        .bind(product.warehouse_id)
        .bind(product.low_stock_threshold)
        .bind(product.supplier_id)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|err| {
            error!("❌ Failed to stage product {}: {:?}", product.sku, err);
            RepositoryError::from(err)
        })?;

        info!("📝 Staged product ID {} ({})", result.id, result.sku);
        Ok(result)
    }

    async fn insert_inventory(
        &mut self,
        inventory: &NewInventory,
    ) -> Result<InventoryModel, RepositoryError> {
        let result = sqlx::query_as::<_, InventoryModel>(
            r#"
            INSERT INTO inventory (product_id, warehouse_id, quantity)
            VALUES ($1, $2, $3)
            RETURNING id, product_id, warehouse_id, quantity, updated_at
            "#,
        )
        .bind(inventory.product_id)
        .bind(inventory.warehouse_id)
        .bind(inventory.quantity)
        .fetch_one(&mut *self.tx)
        .await
        .map_err(|err| {
            error!(
                "❌ Failed to stage inventory for product {}: {:?}",
                inventory.product_id, err
            );
            RepositoryError::from(err)
        })?;

        info!(
            "📝 Staged inventory ID {} (product {}, qty {})",
            result.id, result.product_id, result.quantity
        );
        Ok(result)
    }

    async fn commit(self: Box<Self>) -> Result<(), RepositoryError> {
        self.tx.commit().await.map_err(|err| {
            error!("❌ Failed to commit transaction: {:?}", err);
            RepositoryError::from(err)
        })
    }

    async fn rollback(self: Box<Self>) -> Result<(), RepositoryError> {
        self.tx.rollback().await.map_err(|err| {
            error!("❌ Failed to roll back transaction: {:?}", err);
            RepositoryError::from(err)
        })
    }
}
