use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::application::checkout::CheckoutWorkflow;
use crate::application::order_service::OrderService;
use crate::application::todo_service::TodoService;
use crate::db::DbPool;
use crate::domain::cart::CartStore;
use crate::domain::readiness::Readiness;
use crate::infrastructure::catalog_client::CatalogClient;
use crate::infrastructure::order_repo::DieselOrderRepository;
use crate::infrastructure::todo_repo::DieselTodoRepository;

/// Everything one app session owns. The cart lives here rather than in a
/// global, and is handed to checkout explicitly.
pub struct AppState {
    pub cart: Mutex<CartStore>,
    pub checkout: CheckoutWorkflow<DieselOrderRepository>,
    pub orders: OrderService<DieselOrderRepository>,
    pub todos: TodoService<DieselTodoRepository>,
    pub catalog: CatalogClient,
    pub readiness: Readiness,
    pub pool: DbPool,
}

impl AppState {
    pub fn new(pool: DbPool, readiness: Readiness, catalog: CatalogClient) -> Self {
        Self {
            cart: Mutex::new(CartStore::new()),
            checkout: CheckoutWorkflow::new(
                DieselOrderRepository::new(pool.clone()),
                readiness.clone(),
            ),
            orders: OrderService::new(DieselOrderRepository::new(pool.clone())),
            todos: TodoService::new(DieselTodoRepository::new(pool.clone())),
            catalog,
            readiness,
            pool,
        }
    }

    pub fn cart(&self) -> MutexGuard<'_, CartStore> {
        self.cart.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
