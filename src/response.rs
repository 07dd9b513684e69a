use serde::Serialize;

/// `{"success": true, "data": ...}` wrapper for list-style endpoints.
#[derive(Debug, Serialize)]
pub struct Success<T> {
    pub success: bool,
    pub data: T,
}

impl<T> Success<T> {
    pub fn new(data: T) -> Self {
        Success { success: true, data }
    }
}

#[derive(Debug, Serialize)]
pub struct List<T> {
    pub questions: Vec<T>,
    pub total: i64,
}

impl<T> List<T> {
    pub fn new(questions: Vec<T>, total: i64) -> Self {
        List { questions, total }
    }
}

#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub questions: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}
