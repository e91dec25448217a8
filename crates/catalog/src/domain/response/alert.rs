use crate::model::alert::LowStockRow;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct SupplierResponse {
    pub id: i64,
    pub name: String,
    pub contact_email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct LowStockAlertResponse {
    pub product_id: i64,
    pub product_name: String,
    pub sku: String,
    pub warehouse_id: i64,
    pub warehouse_name: String,
    pub current_stock: i32,
    pub threshold: i32,
    /// `null` when the row has no sales inside the window.
    pub days_until_stockout: Option<i64>,
    pub supplier: Option<SupplierResponse>,
}

impl LowStockAlertResponse {
    pub fn from_row(row: LowStockRow, days_until_stockout: Option<i64>) -> Self {
        let supplier = match (row.supplier_id, row.supplier_name) {
            (Some(id), Some(name)) => Some(SupplierResponse {
                id,
                name,
                contact_email: row.supplier_email,
            }),
            _ => None,
        };

        Self {
            product_id: row.product_id,
            product_name: row.product_name,
            sku: row.sku,
            warehouse_id: row.warehouse_id,
            warehouse_name: row.warehouse_name,
            current_stock: row.current_stock,
            threshold: row.threshold,
            days_until_stockout,
            supplier,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LowStockAlertsResponse {
    pub alerts: Vec<LowStockAlertResponse>,
    pub total_alerts: usize,
}

impl From<Vec<LowStockAlertResponse>> for LowStockAlertsResponse {
    fn from(alerts: Vec<LowStockAlertResponse>) -> Self {
        Self {
            total_alerts: alerts.len(),
            alerts,
        }
    }
}
