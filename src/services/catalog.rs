//! Catalog service: listing, search and book writes

use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookForm},
    repository::{BookOrder, BookQuery, BookStore},
};

/// Books per listing page
pub const PAGE_SIZE: i64 = 10;

/// One page of the book listing
#[derive(Debug, Clone)]
pub struct BookPage {
    pub books: Vec<Book>,
    /// Current page, 1-based
    pub page: i64,
    pub total_pages: i64,
    pub total: i64,
}

/// Parse a `page` query value; anything that is not a positive integer means page 1
pub fn page_number(raw: Option<&str>) -> i64 {
    raw.and_then(|value| value.trim().parse::<i64>().ok())
        .filter(|page| *page >= 1)
        .unwrap_or(1)
}

pub fn total_pages(total: i64, per_page: i64) -> i64 {
    if total <= 0 {
        return 0;
    }
    (total + per_page - 1) / per_page
}

#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn BookStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self { store }
    }

    /// List books in insertion order, `PAGE_SIZE` per page
    pub async fn list_books(&self, page: i64) -> AppResult<BookPage> {
        let page = page.max(1);
        let query = BookQuery {
            search: None,
            order: BookOrder::Insertion,
            offset: (page - 1).saturating_mul(PAGE_SIZE),
            limit: Some(PAGE_SIZE),
        };
        let (books, total) = self.store.find_all(&query).await?;

        Ok(BookPage {
            books,
            page,
            total_pages: total_pages(total, PAGE_SIZE),
            total,
        })
    }

    /// Books whose title, author, genre or year contains `term`, oldest first.
    ///
    /// The term is matched as typed; an empty term matches every book.
    pub async fn search_books(&self, term: &str) -> AppResult<Vec<Book>> {
        let query = BookQuery {
            search: (!term.is_empty()).then(|| term.to_string()),
            order: BookOrder::YearAscending,
            offset: 0,
            limit: None,
        };
        let (books, _) = self.store.find_all(&query).await?;
        Ok(books)
    }

    pub async fn get_book(&self, id: i32) -> AppResult<Book> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    pub async fn create_book(&self, form: &BookForm) -> AppResult<Book> {
        self.store.insert(form).await
    }

    /// Update an existing book; a missing book is reported before the form is checked
    pub async fn update_book(&self, id: i32, form: &BookForm) -> AppResult<Book> {
        self.get_book(id).await?;
        self.store.update(id, form).await
    }

    pub async fn delete_book(&self, id: i32) -> AppResult<()> {
        self.get_book(id).await?;
        self.store.delete(id).await
    }

    /// Check store connectivity (readiness)
    pub async fn ping(&self) -> AppResult<()> {
        self.store.ping().await
    }
}
