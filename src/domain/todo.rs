#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItem {
    pub id: i32,
    pub done: bool,
    pub value: String,
}

#[derive(Debug, Clone, Default)]
pub struct TodoBoard {
    pub pending: Vec<TodoItem>,
    pub done: Vec<TodoItem>,
}
