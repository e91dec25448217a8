use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub sku: String,
    pub price: f64,
    pub warehouse_id: i64,
    pub low_stock_threshold: i32,
    pub supplier_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// Product row before storage has assigned its identity.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub sku: String,
    pub price: f64,
    pub warehouse_id: i64,
    pub low_stock_threshold: i32,
    pub supplier_id: Option<i64>,
}
