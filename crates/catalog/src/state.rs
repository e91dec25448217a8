use crate::di::{DependenciesInject, DependenciesInjectDeps};
use prometheus_client::registry::Registry;
use shared::utils::{SystemMetrics, run_metrics_collector};
use std::{fmt, sync::Arc};
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub di_container: DependenciesInject,
    pub registry: Arc<Mutex<Registry>>,
    pub system_metrics: Arc<SystemMetrics>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("di_container", &self.di_container)
            .field("system_metrics", &self.system_metrics)
            .finish()
    }
}

impl AppState {
    pub async fn new(deps: DependenciesInjectDeps) -> Self {
        let registry = Arc::new(Mutex::new(Registry::default()));
        let system_metrics = Arc::new(SystemMetrics::new());

        let di_container = DependenciesInject::new(deps, registry.clone()).await;

        system_metrics.register(&mut *registry.lock().await);

        Self {
            di_container,
            registry,
            system_metrics,
        }
    }

    /// Samples process metrics every 15s for the lifetime of the runtime.
    pub fn spawn_metrics_collector(&self) {
        tokio::spawn(run_metrics_collector(self.system_metrics.clone()));
    }
}
