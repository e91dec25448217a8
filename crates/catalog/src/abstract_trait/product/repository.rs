use crate::model::{
    inventory::{Inventory as InventoryModel, NewInventory},
    product::{NewProduct, Product as ProductModel},
};
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynUnitOfWorkFactory = Arc<dyn UnitOfWorkFactoryTrait>;
pub type UnitOfWork = Box<dyn UnitOfWorkTrait>;

/// Opens one transaction per call.
#[async_trait]
pub trait UnitOfWorkFactoryTrait: Send + Sync {
    async fn begin(&self) -> Result<UnitOfWork, RepositoryError>;
}

/// Writes staged inside one open transaction.
///
/// Inserts return the storage-assigned identity before anything is durable.
/// `commit` and `rollback` consume the handle; dropping it without either
/// discards every staged write.
#[async_trait]
pub trait UnitOfWorkTrait: Send {
    async fn warehouse_exists(&mut self, warehouse_id: i64) -> Result<bool, RepositoryError>;

    async fn insert_product(
        &mut self,
        product: &NewProduct,
    ) -> Result<ProductModel, RepositoryError>;

    async fn insert_inventory(
        &mut self,
        inventory: &NewInventory,
    ) -> Result<InventoryModel, RepositoryError>;

    async fn commit(self: Box<Self>) -> Result<(), RepositoryError>;

    async fn rollback(self: Box<Self>) -> Result<(), RepositoryError>;
}
