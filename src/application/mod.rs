pub mod checkout;
pub mod order_service;
pub mod todo_service;
