use crate::model::{inventory::NewInventory, product::NewProduct};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

pub const DEFAULT_LOW_STOCK_THRESHOLD: i32 = 10;

/// Keys that must be present and non-null in a create request body.
pub const CREATE_PRODUCT_REQUIRED_FIELDS: [&str; 5] =
    ["name", "sku", "price", "warehouse_id", "initial_quantity"];

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProductRequest {
    #[validate(
        custom(function = "not_blank", message = "Name is required"),
        length(max = 255, message = "Name must be at most 255 characters")
    )]
    #[schema(example = "Widget")]
    pub name: String,

    #[validate(
        custom(function = "not_blank", message = "SKU is required"),
        length(max = 64, message = "SKU must be at most 64 characters")
    )]
    #[schema(example = "W-1")]
    pub sku: String,

    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    #[schema(example = 9.99)]
    pub price: f64,

    #[schema(example = 1)]
    pub warehouse_id: i64,

    #[validate(range(min = 0, message = "Initial quantity cannot be negative"))]
    #[schema(example = 50)]
    pub initial_quantity: i32,

    #[serde(default)]
    #[validate(range(min = 0, message = "Low stock threshold cannot be negative"))]
    #[schema(example = 10)]
    pub low_stock_threshold: Option<i32>,

    #[serde(default)]
    pub supplier_id: Option<i64>,
}

impl CreateProductRequest {
    pub fn to_new_product(&self) -> NewProduct {
        NewProduct {
            name: self.name.clone(),
            sku: self.sku.clone(),
            price: self.price,
            warehouse_id: self.warehouse_id,
            low_stock_threshold: self
                .low_stock_threshold
                .unwrap_or(DEFAULT_LOW_STOCK_THRESHOLD),
            supplier_id: self.supplier_id,
        }
    }

    pub fn to_new_inventory(&self, product_id: i64) -> NewInventory {
        NewInventory {
            product_id,
            warehouse_id: self.warehouse_id,
            quantity: self.initial_quantity,
        }
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
