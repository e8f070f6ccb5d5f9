use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::ports::TodoRepository;
use crate::domain::todo::{TodoBoard, TodoItem};
use crate::schema::todo_items;

use super::models::{NewTodoRow, TodoRow};

impl From<TodoRow> for TodoItem {
    fn from(row: TodoRow) -> Self {
        Self {
            id: row.id,
            done: row.done,
            value: row.value,
        }
    }
}

pub struct DieselTodoRepository {
    pool: DbPool,
}

impl DieselTodoRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl TodoRepository for DieselTodoRepository {
    fn insert(&self, value: &str) -> Result<TodoItem, DomainError> {
        let mut conn = self.pool.get()?;

        let row = diesel::insert_into(todo_items::table)
            .values(&NewTodoRow { done: false, value })
            .returning(TodoRow::as_returning())
            .get_result(&mut conn)?;

        Ok(row.into())
    }

    fn board(&self) -> Result<TodoBoard, DomainError> {
        let mut conn = self.pool.get()?;

        conn.exclusive_transaction(|conn| {
            Ok(TodoBoard {
                pending: load_by_done(conn, false)?,
                done: load_by_done(conn, true)?,
            })
        })
    }

    fn set_done(&self, id: i32, done: bool) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;

        let updated = diesel::update(todo_items::table.find(id))
            .set(todo_items::done.eq(done))
            .execute(&mut conn)?;

        Ok(updated > 0)
    }
}

fn load_by_done(conn: &mut SqliteConnection, done: bool) -> Result<Vec<TodoItem>, DomainError> {
    let rows = todo_items::table
        .filter(todo_items::done.eq(done))
        .order(todo_items::id.asc())
        .select(TodoRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(TodoItem::from).collect())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::DieselTodoRepository;
    use crate::db::{create_pool, DbPool};
    use crate::domain::errors::DomainError;
    use crate::domain::ports::TodoRepository;
    use crate::infrastructure::bootstrap::migrate_if_needed;

    fn setup_db() -> (TempDir, DbPool) {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("todos.db");
        let pool = create_pool(path.to_str().expect("utf-8 path")).expect("Failed to create pool");
        {
            let mut conn = pool.get().expect("Failed to get connection");
            migrate_if_needed(&mut conn).expect("Failed to run migrations");
        }
        (dir, pool)
    }

    #[test]
    fn insert_assigns_ids_and_starts_pending() {
        let (_dir, pool) = setup_db();
        let repo = DieselTodoRepository::new(pool);

        let first = repo.insert("water plants").expect("insert failed");
        let second = repo.insert("call mom").expect("insert failed");

        assert!(second.id > first.id);
        assert!(!first.done);
        let board = repo.board().unwrap();
        assert_eq!(board.pending, vec![first, second]);
        assert!(board.done.is_empty());
    }

    #[test]
    fn set_done_moves_item_between_lists() {
        let (_dir, pool) = setup_db();
        let repo = DieselTodoRepository::new(pool);
        let item = repo.insert("write report").unwrap();

        assert!(repo.set_done(item.id, true).unwrap());

        let board = repo.board().unwrap();
        assert_eq!(board.done.len(), 1);
        assert!(board.done[0].done);
        assert!(board.pending.is_empty());
    }

    #[test]
    fn set_done_reports_unknown_id() {
        let (_dir, pool) = setup_db();
        let repo = DieselTodoRepository::new(pool);

        assert!(!repo.set_done(99, true).unwrap());
    }

    #[test]
    fn board_on_a_missing_table_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let pool = create_pool(dir.path().join("bare.db").to_str().unwrap()).unwrap();
        let repo = DieselTodoRepository::new(pool);

        let err = repo.board().expect_err("board without a schema should fail");

        assert!(matches!(err, DomainError::Storage(_)));
    }
}
