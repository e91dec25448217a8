use crate::domain::response::alert::LowStockAlertsResponse;
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynAlertQueryService = Arc<dyn AlertQueryServiceTrait + Send + Sync>;

#[async_trait]
pub trait AlertQueryServiceTrait {
    async fn find_low_stock_alerts(
        &self,
        company_id: i64,
    ) -> Result<LowStockAlertsResponse, ServiceError>;
}
