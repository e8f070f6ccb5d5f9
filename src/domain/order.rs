use bigdecimal::{BigDecimal, Zero};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::cart::CartLine;

/// A committed line as written to the local store at checkout.
///
/// `id` is the catalog item id, so one row exists per item.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine {
    pub id: String,
    pub quantity: u32,
    pub image_ref: String,
    pub name: String,
    pub price: BigDecimal,
}

impl OrderLine {
    pub fn subtotal(&self) -> BigDecimal {
        &self.price * BigDecimal::from(self.quantity)
    }
}

impl From<&CartLine> for OrderLine {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.item.id.clone(),
            quantity: line.quantity,
            image_ref: line.item.image_ref.clone(),
            name: line.item.name.clone(),
            price: line.item.price.clone(),
        }
    }
}

/// Order history as shown on the orders screen.
#[derive(Debug, Clone)]
pub struct OrderHistoryView {
    pub lines: Vec<OrderLine>,
    pub total_items: u32,
    pub total_value: BigDecimal,
}

impl OrderHistoryView {
    pub fn new(lines: Vec<OrderLine>) -> Self {
        let total_items = lines.iter().map(|l| l.quantity).sum();
        let total_value = lines
            .iter()
            .fold(BigDecimal::zero(), |total, l| total + l.subtotal());
        Self {
            lines,
            total_items,
            total_value,
        }
    }
}

/// Result of a committed checkout.
#[derive(Debug, Clone)]
pub struct CheckoutReceipt {
    pub id: Uuid,
    pub placed_at: DateTime<Utc>,
    pub lines: Vec<OrderLine>,
    pub total: BigDecimal,
}
