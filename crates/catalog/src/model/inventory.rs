use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Inventory {
    pub id: i64,
    pub product_id: i64,
    pub warehouse_id: i64,
    pub quantity: i32,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewInventory {
    pub product_id: i64,
    pub warehouse_id: i64,
    pub quantity: i32,
}
