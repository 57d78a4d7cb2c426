//! Repository layer for database operations

pub mod books;

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::book::{Book, BookForm},
};

/// Row ordering for book queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BookOrder {
    /// Creation order (by id)
    #[default]
    Insertion,
    /// Publication year, oldest first; ties by id
    YearAscending,
}

/// Filter and window for [`BookStore::find_all`]
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BookQuery {
    /// Case-insensitive substring matched against title, author, genre and year
    pub search: Option<String>,
    pub order: BookOrder,
    pub offset: i64,
    /// `None` returns every matching row
    pub limit: Option<i64>,
}

/// Persistence operations on books.
///
/// Writes validate their input and fail with `AppError::Validation` when it is
/// rejected, so callers never need to inspect database errors.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Matching rows in the requested window, and the total number of matches
    async fn find_all(&self, query: &BookQuery) -> AppResult<(Vec<Book>, i64)>;

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Book>>;

    async fn insert(&self, form: &BookForm) -> AppResult<Book>;

    /// Fails with `AppError::NotFound` when no book has this id
    async fn update(&self, id: i32, form: &BookForm) -> AppResult<Book>;

    /// Fails with `AppError::NotFound` when no book has this id
    async fn delete(&self, id: i32) -> AppResult<()>;

    /// Check that the store is reachable
    async fn ping(&self) -> AppResult<()>;
}

/// Main repository struct holding the per-table repositories
#[derive(Clone)]
pub struct Repository {
    pub books: books::BooksRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            books: books::BooksRepository::new(pool),
        }
    }
}
