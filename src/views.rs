//! HTML views rendered with askama templates (`templates/`)

use askama::Template;
use axum::response::Html;

use crate::{
    error::AppResult,
    models::book::{Book, BookForm, FieldErrors},
};

/// Render a template into an HTML response body
pub fn render<T: Template>(template: &T) -> AppResult<Html<String>> {
    Ok(Html(template.render()?))
}

/// Book listing, used for both the paginated index and search results
#[derive(Template)]
#[template(path = "books/index.html")]
pub struct BooksIndexView {
    pub title: String,
    pub books: Vec<Book>,
    /// Search box contents
    pub query: String,
    pub current_page: i64,
    /// Page links; empty for search results
    pub pages: Vec<i64>,
}

impl BooksIndexView {
    pub fn listing(books: Vec<Book>, current_page: i64, total_pages: i64) -> Self {
        Self {
            title: "Books".to_string(),
            books,
            query: String::new(),
            current_page,
            pages: (1..=total_pages).collect(),
        }
    }

    pub fn results(books: Vec<Book>, query: &str) -> Self {
        Self {
            title: "Results".to_string(),
            books,
            query: query.to_string(),
            current_page: 1,
            pages: Vec::new(),
        }
    }
}

#[derive(Template)]
#[template(path = "books/new.html")]
pub struct NewBookView {
    pub title: String,
    pub book: BookForm,
    pub errors: Vec<String>,
}

impl NewBookView {
    pub fn new(book: BookForm, errors: Option<&FieldErrors>) -> Self {
        Self {
            title: "New Book".to_string(),
            book,
            errors: errors.map(FieldErrors::messages).unwrap_or_default(),
        }
    }
}

/// Edit form; `id` is the record being edited, whatever the form holds
#[derive(Template)]
#[template(path = "books/edit.html")]
pub struct EditBookView {
    pub title: String,
    pub id: i32,
    pub book: BookForm,
    pub errors: Vec<String>,
}

impl EditBookView {
    pub fn new(id: i32, book: BookForm, errors: Option<&FieldErrors>) -> Self {
        Self {
            title: "Edit Book".to_string(),
            id,
            book,
            errors: errors.map(FieldErrors::messages).unwrap_or_default(),
        }
    }
}

#[derive(Template)]
#[template(path = "books/show.html")]
pub struct ShowBookView {
    pub title: String,
    pub book: Book,
}

impl ShowBookView {
    pub fn new(book: Book) -> Self {
        Self {
            title: book.title.clone(),
            book,
        }
    }
}

#[derive(Template)]
#[template(path = "books/delete.html")]
pub struct DeleteBookView {
    pub title: String,
    pub book: Book,
}

impl DeleteBookView {
    pub fn new(book: Book) -> Self {
        Self {
            title: "Delete Book".to_string(),
            book,
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorView {
    pub title: String,
    pub status: u16,
    /// Only set in development
    pub detail: Option<String>,
}
