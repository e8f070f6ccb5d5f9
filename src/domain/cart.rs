use bigdecimal::{BigDecimal, RoundingMode, Zero};

use super::catalog::CatalogItem;

/// Flat delivery fee added to every non-empty cart (5.00).
pub fn delivery_fee() -> BigDecimal {
    BigDecimal::new(500.into(), 2)
}

/// Tax applied to the cart subtotal (10%).
pub fn tax_rate() -> BigDecimal {
    BigDecimal::new(10.into(), 2)
}

#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub item: CatalogItem,
    pub quantity: u32,
}

impl CartLine {
    pub fn subtotal(&self) -> BigDecimal {
        &self.item.price * BigDecimal::from(self.quantity)
    }
}

/// The working set of items the user intends to buy.
///
/// Holds at most one line per item id, in insertion order. A line never sits
/// at quantity zero: decrementing the last unit removes it.
#[derive(Debug, Clone, Default)]
pub struct CartStore {
    lines: Vec<CartLine>,
}

impl CartStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Quantity currently held for `id`, or 0.
    pub fn quantity_of(&self, id: &str) -> u32 {
        self.find(id).map_or(0, |line| line.quantity)
    }

    pub fn add_to_cart(&mut self, item: CatalogItem) {
        match self.find_mut(&item.id) {
            Some(line) => line.quantity += 1,
            None => self.lines.push(CartLine { item, quantity: 1 }),
        }
    }

    /// No-op when the item is not in the cart.
    pub fn increase_quantity(&mut self, id: &str) {
        if let Some(line) = self.find_mut(id) {
            line.quantity += 1;
        }
    }

    /// Decrementing a line at quantity 1 removes it.
    pub fn decrease_quantity(&mut self, id: &str) {
        let Some(line) = self.find_mut(id) else {
            return;
        };
        if line.quantity > 1 {
            line.quantity -= 1;
        } else {
            self.remove_from_cart(id);
        }
    }

    pub fn remove_from_cart(&mut self, id: &str) {
        self.lines.retain(|line| line.item.id != id);
    }

    pub fn clear_cart(&mut self) {
        self.lines.clear();
    }

    pub fn total_item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Exact sum of `price × quantity`; no rounding is applied here.
    pub fn total_price(&self) -> BigDecimal {
        self.lines
            .iter()
            .fold(BigDecimal::zero(), |total, line| total + line.subtotal())
    }

    fn find(&self, id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.item.id == id)
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.item.id == id)
    }
}

/// Totals as shown on the cart screen.
#[derive(Debug, Clone, PartialEq)]
pub struct CartSummary {
    pub total_items: u32,
    pub subtotal: BigDecimal,
    pub delivery_fee: BigDecimal,
    pub tax: BigDecimal,
    pub total: BigDecimal,
}

impl CartSummary {
    pub fn of(cart: &CartStore) -> Self {
        let subtotal = cart.total_price();
        let (delivery_fee, tax) = if cart.is_empty() {
            (BigDecimal::zero(), BigDecimal::zero())
        } else {
            (delivery_fee(), &subtotal * tax_rate())
        };
        let total = &subtotal + &delivery_fee + &tax;
        Self {
            total_items: cart.total_item_count(),
            subtotal,
            delivery_fee,
            tax,
            total,
        }
    }
}

/// Render an amount with two decimal places, rounding half-up.
pub fn format_money(amount: &BigDecimal) -> String {
    amount.with_scale_round(2, RoundingMode::HalfUp).to_string()
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn item(id: &str, price: &str) -> CatalogItem {
        CatalogItem {
            id: id.to_string(),
            name: format!("Item {id}"),
            price: BigDecimal::from_str(price).expect("valid decimal"),
            image_ref: format!("https://img.example/{id}.png"),
        }
    }

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).expect("valid decimal")
    }

    #[test]
    fn repeated_adds_accumulate_on_one_line() {
        let mut cart = CartStore::new();
        for _ in 0..5 {
            cart.add_to_cart(item("A", "1.00"));
        }

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.quantity_of("A"), 5);
    }

    #[test]
    fn lines_keep_insertion_order() {
        let mut cart = CartStore::new();
        cart.add_to_cart(item("B", "1.00"));
        cart.add_to_cart(item("A", "1.00"));
        cart.add_to_cart(item("B", "1.00"));

        let ids: Vec<&str> = cart.lines().iter().map(|l| l.item.id.as_str()).collect();
        assert_eq!(ids, vec!["B", "A"]);
    }

    #[test]
    fn decrease_then_increase_restores_quantity() {
        let mut cart = CartStore::new();
        cart.add_to_cart(item("A", "1.00"));
        cart.add_to_cart(item("A", "1.00"));
        cart.add_to_cart(item("A", "1.00"));

        cart.decrease_quantity("A");
        cart.increase_quantity("A");

        assert_eq!(cart.quantity_of("A"), 3);
    }

    #[test]
    fn decrease_at_one_removes_the_line() {
        let mut cart = CartStore::new();
        cart.add_to_cart(item("A", "1.00"));
        cart.add_to_cart(item("B", "1.00"));

        cart.decrease_quantity("A");

        assert_eq!(cart.quantity_of("A"), 0);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].item.id, "B");
    }

    #[test]
    fn increase_and_decrease_ignore_unknown_ids() {
        let mut cart = CartStore::new();
        cart.add_to_cart(item("A", "1.00"));

        cart.increase_quantity("missing");
        cart.decrease_quantity("missing");

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.quantity_of("A"), 1);
    }

    #[test]
    fn remove_ignores_quantity() {
        let mut cart = CartStore::new();
        for _ in 0..4 {
            cart.add_to_cart(item("A", "1.00"));
        }

        cart.remove_from_cart("A");
        cart.remove_from_cart("A");

        assert!(cart.is_empty());
    }

    #[test]
    fn total_price_is_exact() {
        let mut cart = CartStore::new();
        cart.add_to_cart(item("A", "2.50"));
        cart.add_to_cart(item("A", "2.50"));
        for _ in 0..3 {
            cart.add_to_cart(item("B", "1.00"));
        }

        assert_eq!(cart.total_price(), dec("8.00"));
        assert_eq!(cart.total_item_count(), 5);
    }

    #[test]
    fn total_price_keeps_sub_cent_precision() {
        let mut cart = CartStore::new();
        for _ in 0..3 {
            cart.add_to_cart(item("A", "0.333"));
        }

        assert_eq!(cart.total_price(), dec("0.999"));
        assert_eq!(format_money(&cart.total_price()), "1.00");
    }

    #[test]
    fn clear_empties_everything() {
        let mut cart = CartStore::new();
        cart.add_to_cart(item("A", "2.00"));
        cart.add_to_cart(item("B", "3.00"));

        cart.clear_cart();

        assert!(cart.is_empty());
        assert_eq!(cart.total_item_count(), 0);
        assert_eq!(cart.total_price(), BigDecimal::zero());
    }

    #[test]
    fn summary_adds_fee_and_tax() {
        let mut cart = CartStore::new();
        cart.add_to_cart(item("A", "2.50"));
        cart.add_to_cart(item("A", "2.50"));
        for _ in 0..3 {
            cart.add_to_cart(item("B", "1.00"));
        }

        let summary = CartSummary::of(&cart);

        assert_eq!(summary.subtotal, dec("8.00"));
        assert_eq!(summary.delivery_fee, dec("5.00"));
        assert_eq!(summary.tax, dec("0.80"));
        assert_eq!(format_money(&summary.total), "13.80");
    }

    #[test]
    fn summary_of_empty_cart_is_zero() {
        let summary = CartSummary::of(&CartStore::new());

        assert_eq!(summary.total_items, 0);
        assert_eq!(format_money(&summary.total), "0.00");
    }
}
