use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateProductResponse {
    #[schema(example = "Product created")]
    pub message: String,
    #[schema(example = 1)]
    pub product_id: i64,
}

impl CreateProductResponse {
    pub fn created(product_id: i64) -> Self {
        Self {
            message: "Product created".to_string(),
            product_id,
        }
    }
}
