use crate::{
    abstract_trait::alert::{AlertQueryServiceTrait, DynAlertQueryRepository},
    domain::response::alert::{LowStockAlertResponse, LowStockAlertsResponse},
    model::alert::LowStockRow,
};
use async_trait::async_trait;
use opentelemetry::KeyValue;
use prometheus_client::registry::Registry;
use shared::{
    errors::ServiceError,
    utils::{Method, Metrics, TracingContext},
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

pub struct AlertQueryService {
    query: DynAlertQueryRepository,
    sales_window_days: i32,
    metrics: Metrics,
}

impl AlertQueryService {
    pub async fn new(
        query: DynAlertQueryRepository,
        sales_window_days: i32,
        registry: Arc<Mutex<Registry>>,
    ) -> Self {
        let metrics = Metrics::new();
        metrics.register(
            &mut *registry.lock().await,
            "alert_query_service",
            "AlertQueryService",
        );

        Self {
            query,
            sales_window_days,
            metrics,
        }
    }
}

/// Whole days of stock left at the average daily sales rate of the window,
/// or `None` when nothing sold.
pub fn days_until_stockout(current_stock: i32, units_sold: i64, window_days: i32) -> Option<i64> {
    if units_sold <= 0 || window_days <= 0 {
        return None;
    }

    // stock / (sold / window), kept in integers so the floor is exact
    Some(i64::from(current_stock.max(0)) * i64::from(window_days) / units_sold)
}

/// Drops rows whose product sold nothing in the window and orders the rest
/// by urgency.
pub fn build_alerts(rows: Vec<LowStockRow>, window_days: i32) -> Vec<LowStockAlertResponse> {
    let mut alerts: Vec<LowStockAlertResponse> = rows
        .into_iter()
        .filter(|row| row.product_units_sold > 0)
        .map(|row| {
            let days = days_until_stockout(row.current_stock, row.units_sold, window_days);
            LowStockAlertResponse::from_row(row, days)
        })
        .collect();

    alerts.sort_by(|a, b| {
        let urgency = match (a.days_until_stockout, b.days_until_stockout) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        };
        urgency
            .then(a.product_id.cmp(&b.product_id))
            .then(a.warehouse_id.cmp(&b.warehouse_id))
    });

    alerts
}

#[async_trait]
impl AlertQueryServiceTrait for AlertQueryService {
    async fn find_low_stock_alerts(
        &self,
        company_id: i64,
    ) -> Result<LowStockAlertsResponse, ServiceError> {
        info!("🔔 Computing low-stock alerts for company {company_id}");

        let method = Method::Get;
        let tracing_ctx = TracingContext::start(
            "alert-query-service",
            "find_low_stock_alerts",
            vec![
                KeyValue::new("component", "alert"),
                KeyValue::new("operation", "find_low_stock"),
                KeyValue::new("company.id", company_id),
            ],
        );

        let rows = match self
            .query
            .find_low_stock(company_id, self.sales_window_days)
            .await
        {
            Ok(rows) => rows,
            Err(err) => {
                error!("❌ Failed to fetch low-stock rows: {err:?}");
                tracing_ctx.complete_error(&self.metrics, method, &err.to_string());
                return Err(ServiceError::Repo(err));
            }
        };

        let alerts = build_alerts(rows, self.sales_window_days);

        tracing_ctx.complete_success(
            &self.metrics,
            method,
            &format!("{} low-stock alerts", alerts.len()),
        );

        Ok(LowStockAlertsResponse::from(alerts))
    }
}
