use crate::{abstract_trait::alert::AlertQueryRepositoryTrait, model::alert::LowStockRow};
use async_trait::async_trait;
use shared::{config::ConnectionPool, errors::RepositoryError};
use tracing::{error, info};

#[derive(Clone)]
pub struct AlertQueryRepository {
    db: ConnectionPool,
}

impl AlertQueryRepository {
    pub fn new(db: ConnectionPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AlertQueryRepositoryTrait for AlertQueryRepository {
    async fn find_low_stock(
        &self,
        company_id: i64,
        window_days: i32,
    ) -> Result<Vec<LowStockRow>, RepositoryError> {
        info!("🔍 Fetching low-stock inventory for company {company_id} (window {window_days}d)");

        let rows = sqlx::query_as::<_, LowStockRow>(
            r#"
            WITH inventory_sales AS (
                SELECT h.inventory_id,
                       SUM(ABS(h.change_amount))::BIGINT AS units_sold
                FROM inventory_history h
                WHERE h.reason = 'SALE'
                  AND h.changed_at > NOW() - make_interval(days => $2)
                GROUP BY h.inventory_id
            ),
            product_sales AS (
                SELECT i.product_id,
                       SUM(s.units_sold)::BIGINT AS units_sold
                FROM inventory_sales s
                JOIN inventory i ON i.id = s.inventory_id
                GROUP BY i.product_id
            )
            SELECT p.id                            AS product_id,
                   p.name                          AS product_name,
                   p.sku                           AS sku,
                   w.id                            AS warehouse_id,
                   w.name                          AS warehouse_name,
                   i.quantity                      AS current_stock,
                   p.low_stock_threshold           AS threshold,
                   COALESCE(isales.units_sold, 0)  AS units_sold,
                   COALESCE(psales.units_sold, 0)  AS product_units_sold,
                   s.id                            AS supplier_id,
                   s.name                          AS supplier_name,
                   s.contact_email                 AS supplier_email
            FROM inventory i
            JOIN products p ON p.id = i.product_id
            JOIN warehouses w ON w.id = i.warehouse_id
            LEFT JOIN suppliers s ON s.id = p.supplier_id
            LEFT JOIN inventory_sales isales ON isales.inventory_id = i.id
            LEFT JOIN product_sales psales ON psales.product_id = p.id
            WHERE w.company_id = $1
              AND i.quantity <= p.low_stock_threshold
            ORDER BY p.id, w.id
            "#,
        )
        .bind(company_id)
        .bind(window_days)
        .fetch_all(&self.db)
        .await
        .map_err(|e| {
            error!("❌ Failed to fetch low-stock inventory for company {company_id}: {:?}", e);
            RepositoryError::from(e)
        })?;

        info!("✅ Found {} low-stock rows for company {company_id}", rows.len());
        Ok(rows)
    }
}
