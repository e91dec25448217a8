use crate::model::alert::LowStockRow;
use async_trait::async_trait;
use shared::errors::RepositoryError;
use std::sync::Arc;

pub type DynAlertQueryRepository = Arc<dyn AlertQueryRepositoryTrait + Send + Sync>;

#[async_trait]
pub trait AlertQueryRepositoryTrait {
    /// Inventory rows of the company's warehouses whose quantity is at or
    /// below the product threshold, with sales summed over `window_days`.
    async fn find_low_stock(
        &self,
        company_id: i64,
        window_days: i32,
    ) -> Result<Vec<LowStockRow>, RepositoryError>;
}
