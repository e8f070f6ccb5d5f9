pub mod bootstrap;
pub mod catalog_client;
pub mod models;
pub mod order_repo;
pub mod todo_repo;
