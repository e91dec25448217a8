use crate::{
    abstract_trait::{
        alert::{DynAlertQueryRepository, DynAlertQueryService},
        product::{DynProductCommandService, DynUnitOfWorkFactory},
    },
    config::myconfig::ServiceConfig,
    repository::{alert::AlertQueryRepository, unit_of_work::PgUnitOfWorkFactory},
    service::{alert::AlertQueryService, command::ProductCommandService},
};
use prometheus_client::registry::Registry;
use shared::config::ConnectionPool;
use std::{fmt, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct DependenciesInject {
    pub product_command: DynProductCommandService,
    pub alert_query: DynAlertQueryService,
}

impl fmt::Debug for DependenciesInject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependenciesInject")
            .field("product_command", &"ProductCommandService")
            .field("alert_query", &"AlertQueryService")
            .finish()
    }
}

/// Storage seams the services are built on.
#[derive(Clone)]
pub struct DependenciesInjectDeps {
    pub uow_factory: DynUnitOfWorkFactory,
    pub alert_repository: DynAlertQueryRepository,
    pub config: ServiceConfig,
}

impl DependenciesInjectDeps {
    pub fn postgres(pool: ConnectionPool, config: ServiceConfig) -> Self {
        Self {
            uow_factory: Arc::new(PgUnitOfWorkFactory::new(pool.clone())) as DynUnitOfWorkFactory,
            alert_repository: Arc::new(AlertQueryRepository::new(pool)) as DynAlertQueryRepository,
            config,
        }
    }
}

impl DependenciesInject {
    pub async fn new(deps: DependenciesInjectDeps, registry: Arc<Mutex<Registry>>) -> Self {
        let DependenciesInjectDeps {
            uow_factory,
            alert_repository,
            config,
        } = deps;

        let product_command = Arc::new(
            ProductCommandService::new(uow_factory, config.verify_warehouse, registry.clone())
                .await,
        ) as DynProductCommandService;

        let alert_query = Arc::new(
            AlertQueryService::new(alert_repository, config.sales_window_days, registry.clone())
                .await,
        ) as DynAlertQueryService;

        Self {
            product_command,
            alert_query,
        }
    }
}
