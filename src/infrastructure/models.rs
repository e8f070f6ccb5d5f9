use diesel::prelude::*;

use crate::schema::{order_lines, todo_items};

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Insertable)]
#[diesel(table_name = order_lines)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct OrderLineRow {
    pub id: String,
    pub quantity: i32,
    pub image_ref: String,
    pub name: String,
    pub price: f64,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = todo_items)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TodoRow {
    pub id: i32,
    pub done: bool,
    pub value: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = todo_items)]
pub struct NewTodoRow<'a> {
    pub done: bool,
    pub value: &'a str,
}
