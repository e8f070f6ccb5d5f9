use std::str::FromStr;

use bigdecimal::{BigDecimal, ToPrimitive};
use diesel::prelude::*;
use diesel::upsert::excluded;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::order::OrderLine;
use crate::domain::ports::OrderRepository;
use crate::schema::order_lines;

use super::models::OrderLineRow;

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<diesel::result::Error> for DomainError {
    fn from(e: diesel::result::Error) -> Self {
        DomainError::Storage(e.to_string())
    }
}

impl From<r2d2::Error> for DomainError {
    fn from(e: r2d2::Error) -> Self {
        DomainError::Storage(e.to_string())
    }
}

// ── Row mapping ───────────────────────────────────────────────────────────────

impl TryFrom<&OrderLine> for OrderLineRow {
    type Error = DomainError;

    fn try_from(line: &OrderLine) -> Result<Self, Self::Error> {
        let quantity = i32::try_from(line.quantity).map_err(|_| {
            DomainError::InvalidInput(format!("quantity {} out of range", line.quantity))
        })?;
        let price = line
            .price
            .to_f64()
            .filter(|p| p.is_finite())
            .ok_or_else(|| DomainError::InvalidInput(format!("price {} out of range", line.price)))?;
        Ok(Self {
            id: line.id.clone(),
            quantity,
            image_ref: line.image_ref.clone(),
            name: line.name.clone(),
            price,
        })
    }
}

impl TryFrom<OrderLineRow> for OrderLine {
    type Error = DomainError;

    fn try_from(row: OrderLineRow) -> Result<Self, Self::Error> {
        let quantity = u32::try_from(row.quantity).map_err(|_| {
            DomainError::Storage(format!("order line {} has quantity {}", row.id, row.quantity))
        })?;
        // Shortest round-trip text keeps "4.5" as 4.5 rather than its binary expansion.
        let price = BigDecimal::from_str(&row.price.to_string()).map_err(|e| {
            DomainError::Storage(format!("order line {} has price {}: {}", row.id, row.price, e))
        })?;
        Ok(Self {
            id: row.id,
            quantity,
            image_ref: row.image_ref,
            name: row.name,
            price,
        })
    }
}

// ── Repository ────────────────────────────────────────────────────────────────

pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl OrderRepository for DieselOrderRepository {
    fn insert_order_line(&self, line: &OrderLine) -> Result<(), DomainError> {
        let row = OrderLineRow::try_from(line)?;
        let mut conn = self.pool.get()?;

        // A repeated checkout of the same item adds to the existing row and
        // refreshes its snapshot fields.
        diesel::insert_into(order_lines::table)
            .values(&row)
            .on_conflict(order_lines::id)
            .do_update()
            .set((
                order_lines::quantity.eq(order_lines::quantity + excluded(order_lines::quantity)),
                order_lines::image_ref.eq(excluded(order_lines::image_ref)),
                order_lines::name.eq(excluded(order_lines::name)),
                order_lines::price.eq(excluded(order_lines::price)),
            ))
            .execute(&mut conn)?;

        Ok(())
    }

    fn list_order_lines(&self) -> Result<Vec<OrderLine>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = order_lines::table
            .select(OrderLineRow::as_select())
            .order(order_lines::name.asc())
            .load(&mut conn)?;

        rows.into_iter().map(OrderLine::try_from).collect()
    }

    fn delete_order_line(&self, id: &str) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;
        diesel::delete(order_lines::table.find(id)).execute(&mut conn)?;
        Ok(())
    }

    fn delete_all_order_lines(&self) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;
        diesel::delete(order_lines::table).execute(&mut conn)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use bigdecimal::BigDecimal;
    use tempfile::TempDir;

    use super::DieselOrderRepository;
    use crate::db::{create_pool, DbPool};
    use crate::domain::errors::DomainError;
    use crate::domain::order::OrderLine;
    use crate::domain::ports::OrderRepository;
    use crate::infrastructure::bootstrap::migrate_if_needed;

    fn setup_db() -> (TempDir, DbPool) {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("orders.db");
        let pool = create_pool(path.to_str().expect("utf-8 path")).expect("Failed to create pool");
        {
            let mut conn = pool.get().expect("Failed to get connection");
            migrate_if_needed(&mut conn).expect("Failed to run migrations");
        }
        (dir, pool)
    }

    fn line(id: &str, name: &str, quantity: u32, price: &str) -> OrderLine {
        OrderLine {
            id: id.to_string(),
            quantity,
            image_ref: format!("https://img.example/{id}.png"),
            name: name.to_string(),
            price: BigDecimal::from_str(price).expect("valid decimal"),
        }
    }

    #[test]
    fn insert_and_list_roundtrip() {
        let (_dir, pool) = setup_db();
        let repo = DieselOrderRepository::new(pool);
        let written = line("A", "Americano", 2, "3.00");

        repo.insert_order_line(&written).expect("insert failed");
        let rows = repo.list_order_lines().expect("list failed");

        assert_eq!(rows, vec![written]);
    }

    #[test]
    fn list_is_empty_for_a_fresh_store() {
        let (_dir, pool) = setup_db();
        let repo = DieselOrderRepository::new(pool);

        assert!(repo.list_order_lines().expect("list failed").is_empty());
    }

    #[test]
    fn list_orders_by_name() {
        let (_dir, pool) = setup_db();
        let repo = DieselOrderRepository::new(pool);
        repo.insert_order_line(&line("1", "Mocha", 1, "4.00")).unwrap();
        repo.insert_order_line(&line("2", "Americano", 1, "3.00")).unwrap();
        repo.insert_order_line(&line("3", "Latte", 1, "3.50")).unwrap();

        let names: Vec<String> = repo
            .list_order_lines()
            .unwrap()
            .into_iter()
            .map(|l| l.name)
            .collect();

        assert_eq!(names, vec!["Americano", "Latte", "Mocha"]);
    }

    #[test]
    fn repeated_id_accumulates_quantity() {
        let (_dir, pool) = setup_db();
        let repo = DieselOrderRepository::new(pool);
        repo.insert_order_line(&line("A", "Americano", 2, "3.00")).unwrap();
        repo.insert_order_line(&line("A", "Americano", 3, "3.25")).unwrap();

        let rows = repo.list_order_lines().unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].quantity, 5);
        assert_eq!(rows[0].price, BigDecimal::from_str("3.25").unwrap());
    }

    #[test]
    fn fractional_prices_survive_the_real_column() {
        let (_dir, pool) = setup_db();
        let repo = DieselOrderRepository::new(pool);
        repo.insert_order_line(&line("A", "Tea", 1, "0.10")).unwrap();

        let rows = repo.list_order_lines().unwrap();

        assert_eq!(rows[0].price, BigDecimal::from_str("0.1").unwrap());
    }

    #[test]
    fn delete_by_id_leaves_other_rows() {
        let (_dir, pool) = setup_db();
        let repo = DieselOrderRepository::new(pool);
        repo.insert_order_line(&line("A", "Americano", 1, "3.00")).unwrap();
        repo.insert_order_line(&line("B", "Brew", 1, "2.00")).unwrap();

        repo.delete_order_line("A").expect("delete failed");
        repo.delete_order_line("missing").expect("deleting a missing id is a no-op");

        let rows = repo.list_order_lines().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "B");
    }

    #[test]
    fn delete_all_empties_the_store() {
        let (_dir, pool) = setup_db();
        let repo = DieselOrderRepository::new(pool);
        repo.insert_order_line(&line("A", "Americano", 1, "3.00")).unwrap();
        repo.insert_order_line(&line("B", "Brew", 4, "2.00")).unwrap();

        repo.delete_all_order_lines().expect("delete all failed");

        assert!(repo.list_order_lines().unwrap().is_empty());
    }

    #[test]
    fn price_beyond_the_real_column_is_rejected() {
        let (_dir, pool) = setup_db();
        let repo = DieselOrderRepository::new(pool);
        repo.insert_order_line(&line("A", "Americano", 1, "3.00")).unwrap();

        let err = repo
            .insert_order_line(&line("B", "Gold Brew", 1, "1e400"))
            .expect_err("an unrepresentable price should not be written");

        assert!(matches!(err, DomainError::InvalidInput(_)));
        let rows = repo.list_order_lines().expect("history should still load");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "A");
    }

    #[test]
    fn missing_table_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let pool = create_pool(dir.path().join("bare.db").to_str().unwrap()).unwrap();
        let repo = DieselOrderRepository::new(pool);

        let err = repo
            .insert_order_line(&line("A", "Americano", 1, "3.00"))
            .expect_err("insert into an uninitialized store should fail");

        assert!(matches!(err, DomainError::Storage(_)));
    }
}
