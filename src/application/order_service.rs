use crate::domain::errors::DomainError;
use crate::domain::order::OrderHistoryView;
use crate::domain::ports::OrderRepository;

/// Read and delete access to committed order lines.
pub struct OrderService<R> {
    repo: R,
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn history(&self) -> Result<OrderHistoryView, DomainError> {
        self.repo.list_order_lines().map(OrderHistoryView::new)
    }

    pub fn delete_line(&self, id: &str) -> Result<(), DomainError> {
        self.repo.delete_order_line(id)
    }

    pub fn delete_all(&self) -> Result<(), DomainError> {
        self.repo.delete_all_order_lines()
    }
}
