use sqlx::FromRow;

/// One inventory row at or below its product's threshold, joined with
/// warehouse and supplier data and the sales seen inside the window.
#[derive(Debug, Clone, FromRow)]
pub struct LowStockRow {
    pub product_id: i64,
    pub product_name: String,
    pub sku: String,
    pub warehouse_id: i64,
    pub warehouse_name: String,
    pub current_stock: i32,
    pub threshold: i32,
    /// Units sold from this inventory row.
    pub units_sold: i64,
    /// Units sold of the product across every warehouse.
    pub product_units_sold: i64,
    pub supplier_id: Option<i64>,
    pub supplier_name: Option<String>,
    pub supplier_email: Option<String>,
}
