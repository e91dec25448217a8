#![allow(dead_code)]

use async_trait::async_trait;
use catalog::{
    abstract_trait::{
        alert::{AlertQueryRepositoryTrait, DynAlertQueryRepository},
        product::{DynUnitOfWorkFactory, UnitOfWork, UnitOfWorkFactoryTrait, UnitOfWorkTrait},
    },
    config::myconfig::ServiceConfig,
    di::DependenciesInjectDeps,
    handler::AppRouter,
    model::{
        alert::LowStockRow,
        inventory::{Inventory, NewInventory},
        product::{NewProduct, Product},
    },
    state::AppState,
};
use chrono::Utc;
use shared::errors::RepositoryError;
use std::{
    collections::{HashMap, HashSet},
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
};

#[derive(Default)]
struct Tables {
    products: Vec<Product>,
    inventory: Vec<Inventory>,
    next_product_id: i64,
    next_inventory_id: i64,
}

/// Committed rows shared by every unit of work of one test server.
///
/// Ids come from counters that, like database sequences, are not given back
/// when a transaction rolls back.
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
    warehouses: Mutex<HashSet<i64>>,
    pub fail_inventory_insert: AtomicBool,
    pub commits: AtomicUsize,
    pub rollbacks: AtomicUsize,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn with_warehouses(ids: &[i64]) -> Arc<Self> {
        let store = Self::default();
        store.warehouses.lock().unwrap().extend(ids.iter().copied());
        Arc::new(store)
    }

    pub fn products(&self) -> Vec<Product> {
        self.tables.lock().unwrap().products.clone()
    }

    pub fn inventory(&self) -> Vec<Inventory> {
        self.tables.lock().unwrap().inventory.clone()
    }

    fn next_product_id(&self) -> i64 {
        let mut tables = self.tables.lock().unwrap();
        tables.next_product_id += 1;
        tables.next_product_id
    }

    fn next_inventory_id(&self) -> i64 {
        let mut tables = self.tables.lock().unwrap();
        tables.next_inventory_id += 1;
        tables.next_inventory_id
    }

    fn sku_taken(&self, sku: &str) -> bool {
        self.tables
            .lock()
            .unwrap()
            .products
            .iter()
            .any(|p| p.sku == sku)
    }
}

pub struct InMemoryUnitOfWorkFactory {
    store: Arc<InMemoryStore>,
}

#[async_trait]
impl UnitOfWorkFactoryTrait for InMemoryUnitOfWorkFactory {
    async fn begin(&self) -> Result<UnitOfWork, RepositoryError> {
        Ok(Box::new(InMemoryUnitOfWork {
            store: self.store.clone(),
            products: Vec::new(),
            inventory: Vec::new(),
        }))
    }
}

/// Stages rows locally and publishes them to the store only on commit.
pub struct InMemoryUnitOfWork {
    store: Arc<InMemoryStore>,
    products: Vec<Product>,
    inventory: Vec<Inventory>,
}

#[async_trait]
impl UnitOfWorkTrait for InMemoryUnitOfWork {
    async fn warehouse_exists(&mut self, warehouse_id: i64) -> Result<bool, RepositoryError> {
        Ok(self.store.warehouses.lock().unwrap().contains(&warehouse_id))
    }

    async fn insert_product(&mut self, product: &NewProduct) -> Result<Product, RepositoryError> {
        let staged_dup = self.products.iter().any(|p| p.sku == product.sku);
        if staged_dup || self.store.sku_taken(&product.sku) {
            return Err(RepositoryError::Conflict(
                "duplicate key value violates unique constraint \"products_sku_key\"".into(),
            ));
        }

        let row = Product {
            id: self.store.next_product_id(),
            name: product.name.clone(),
            sku: product.sku.clone(),
            price: product.price,
            warehouse_id: product.warehouse_id,
            low_stock_threshold: product.low_stock_threshold,
            supplier_id: product.supplier_id,
            created_at: Utc::now(),
        };
        self.products.push(row.clone());
        Ok(row)
    }

    async fn insert_inventory(
        &mut self,
        inventory: &NewInventory,
    ) -> Result<Inventory, RepositoryError> {
        if self.store.fail_inventory_insert.load(Ordering::SeqCst) {
            return Err(RepositoryError::Custom("inventory insert failed".into()));
        }

        let row = Inventory {
            id: self.store.next_inventory_id(),
            product_id: inventory.product_id,
            warehouse_id: inventory.warehouse_id,
            quantity: inventory.quantity,
            updated_at: Utc::now(),
        };
        self.inventory.push(row.clone());
        Ok(row)
    }

    async fn commit(self: Box<Self>) -> Result<(), RepositoryError> {
        let mut tables = self.store.tables.lock().unwrap();
        tables.products.extend(self.products);
        tables.inventory.extend(self.inventory);
        drop(tables);

        self.store.commits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), RepositoryError> {
        self.store.rollbacks.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Canned low-stock rows per company.
#[derive(Default)]
pub struct InMemoryAlertRepository {
    rows: Mutex<HashMap<i64, Vec<LowStockRow>>>,
    pub fail: AtomicBool,
    pub last_window_days: Mutex<Option<i32>>,
}

impl InMemoryAlertRepository {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn insert(&self, company_id: i64, row: LowStockRow) {
        self.rows
            .lock()
            .unwrap()
            .entry(company_id)
            .or_default()
            .push(row);
    }
}

#[async_trait]
impl AlertQueryRepositoryTrait for InMemoryAlertRepository {
    async fn find_low_stock(
        &self,
        company_id: i64,
        window_days: i32,
    ) -> Result<Vec<LowStockRow>, RepositoryError> {
        *self.last_window_days.lock().unwrap() = Some(window_days);

        if self.fail.load(Ordering::SeqCst) {
            return Err(RepositoryError::Custom("connection reset".into()));
        }

        Ok(self
            .rows
            .lock()
            .unwrap()
            .get(&company_id)
            .cloned()
            .unwrap_or_default())
    }
}

pub struct TestServer {
    pub base_url: String,
    pub client: reqwest::Client,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    pub async fn spawn(store: Arc<InMemoryStore>, config: ServiceConfig) -> Self {
        Self::spawn_with_alerts(store, InMemoryAlertRepository::new(), config).await
    }

    pub async fn spawn_with_alerts(
        store: Arc<InMemoryStore>,
        alerts: Arc<InMemoryAlertRepository>,
        config: ServiceConfig,
    ) -> Self {
        let deps = DependenciesInjectDeps {
            uow_factory: Arc::new(InMemoryUnitOfWorkFactory { store }) as DynUnitOfWorkFactory,
            alert_repository: alerts as DynAlertQueryRepository,
            config,
        };

        // Same router as prod, bound to an ephemeral port.
        let app = AppRouter::build(AppState::new(deps).await);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            client: reqwest::Client::new(),
            handle,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub fn low_stock_row(product_id: i64, warehouse_id: i64, stock: i32, sold: i64) -> LowStockRow {
    LowStockRow {
        product_id,
        product_name: format!("Product {product_id}"),
        sku: format!("SKU-{product_id}"),
        warehouse_id,
        warehouse_name: format!("Warehouse {warehouse_id}"),
        current_stock: stock,
        threshold: 20,
        units_sold: sold,
        product_units_sold: sold,
        supplier_id: None,
        supplier_name: None,
        supplier_email: None,
    }
}
