use crate::{
    abstract_trait::product::{
        DynUnitOfWorkFactory, ProductCommandServiceTrait, UnitOfWorkTrait,
    },
    domain::{
        requests::{format_validation_errors, product::CreateProductRequest},
        response::product::CreateProductResponse,
    },
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
use tracing::{error, info, warn};
use validator::Validate;

pub struct ProductCommandService {
    uow_factory: DynUnitOfWorkFactory,
    verify_warehouse: bool,
    metrics: Metrics,
}

impl ProductCommandService {
    pub async fn new(
        uow_factory: DynUnitOfWorkFactory,
        verify_warehouse: bool,
        registry: Arc<Mutex<Registry>>,
    ) -> Self {
        let metrics = Metrics::new();
        metrics.register(
            &mut *registry.lock().await,
            "product_command_service",
            "ProductCommandService",
        );

        Self {
            uow_factory,
            verify_warehouse,
            metrics,
        }
    }

    /// Product first, so its id can link the inventory row; nothing here is
    /// durable until the caller commits.
    async fn stage(
        &self,
        uow: &mut dyn UnitOfWorkTrait,
        req: &CreateProductRequest,
    ) -> Result<i64, ServiceError> {
        if self.verify_warehouse && !uow.warehouse_exists(req.warehouse_id).await? {
            return Err(ServiceError::Validation(format!(
                "Warehouse {} not found",
                req.warehouse_id
            )));
        }

        let product = uow.insert_product(&req.to_new_product()).await?;
        uow.insert_inventory(&req.to_new_inventory(product.id)).await?;

        Ok(product.id)
    }
}

#[async_trait]
impl ProductCommandServiceTrait for ProductCommandService {
    async fn create_product(
        &self,
        req: &CreateProductRequest,
    ) -> Result<CreateProductResponse, ServiceError> {
        info!("🏗️ Creating product: {} (sku {})", req.name, req.sku);

        let method = Method::Post;
        let tracing_ctx = TracingContext::start(
            "product-command-service",
            "create_product",
            vec![
                KeyValue::new("component", "product"),
                KeyValue::new("operation", "create"),
                KeyValue::new("product.sku", req.sku.clone()),
                KeyValue::new("warehouse.id", req.warehouse_id),
            ],
        );

        if let Err(errors) = req.validate() {
            let message = format_validation_errors(&errors);
            tracing_ctx.complete_error(&self.metrics, method, &message);
            return Err(ServiceError::Validation(message));
        }

        let mut uow = match self.uow_factory.begin().await {
            Ok(uow) => uow,
            Err(err) => {
                tracing_ctx.complete_error(&self.metrics, method, "Failed to open transaction");
                return Err(ServiceError::Repo(err));
            }
        };

        let staged = self.stage(uow.as_mut(), req).await;

        let result = match staged {
            Ok(product_id) => uow
                .commit()
                .await
                .map(|()| product_id)
                .map_err(ServiceError::Repo),
            Err(err) => {
                if let Err(rollback_err) = uow.rollback().await {
                    warn!("⚠️ Rollback after failed staging also failed: {rollback_err}");
                }
                Err(err)
            }
        };

        match result {
            Ok(product_id) => {
                tracing_ctx.complete_success(&self.metrics, method, "Product created");
                info!("✅ Product {} created with inventory", product_id);
                Ok(CreateProductResponse::created(product_id))
            }
            Err(err) => {
                error!("❌ Product creation aborted: {err}");
                tracing_ctx.complete_error(&self.metrics, method, &err.to_string());
                Err(err)
            }
        }
    }
}
