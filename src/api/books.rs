//! Book catalog pages

use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    models::book::BookForm,
    services::catalog::page_number,
    views::{render, BooksIndexView, DeleteBookView, EditBookView, NewBookView, ShowBookView},
    AppState,
};

use super::{BookId, FormInput, QueryParams};

/// Where every successful write sends the browser
const LISTING: &str = "/books";

#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// Kept as text: an unparsable page falls back to the first one
    pub page: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub query: String,
}

/// Home page
pub async fn home() -> Redirect {
    Redirect::to(LISTING)
}

/// Paginated book listing
pub async fn list_books(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<ListParams>,
) -> AppResult<Html<String>> {
    let page = page_number(params.page.as_deref());
    let listing = state.services.catalog.list_books(page).await?;
    render(&BooksIndexView::listing(
        listing.books,
        listing.page,
        listing.total_pages,
    ))
}

/// Search across title, author, genre and year
pub async fn search_books(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<SearchParams>,
) -> AppResult<Html<String>> {
    let books = state.services.catalog.search_books(&params.query).await?;
    render(&BooksIndexView::results(books, &params.query))
}

/// Blank creation form
pub async fn new_book_form() -> AppResult<Html<String>> {
    render(&NewBookView::new(BookForm::default(), None))
}

/// Create a book; an invalid submission is shown again with its errors
pub async fn create_book(
    State(state): State<AppState>,
    FormInput(form): FormInput<BookForm>,
) -> AppResult<Response> {
    match state.services.catalog.create_book(&form).await {
        Ok(_) => Ok(Redirect::to(LISTING).into_response()),
        Err(AppError::Validation(errors)) => {
            Ok(render(&NewBookView::new(form, Some(&errors)))?.into_response())
        }
        Err(e) => Err(e),
    }
}

/// Book details
pub async fn show_book(
    State(state): State<AppState>,
    BookId(id): BookId,
) -> AppResult<Html<String>> {
    let book = state.services.catalog.get_book(id).await?;
    render(&ShowBookView::new(book))
}

/// Edit form pre-filled with the stored values
pub async fn edit_book_form(
    State(state): State<AppState>,
    BookId(id): BookId,
) -> AppResult<Html<String>> {
    let book = state.services.catalog.get_book(id).await?;
    render(&EditBookView::new(book.id, BookForm::from(&book), None))
}

/// Apply an edit; an invalid submission is shown again for the same record
pub async fn update_book(
    State(state): State<AppState>,
    BookId(id): BookId,
    FormInput(form): FormInput<BookForm>,
) -> AppResult<Response> {
    match state.services.catalog.update_book(id, &form).await {
        Ok(_) => Ok(Redirect::to(LISTING).into_response()),
        Err(AppError::Validation(errors)) => {
            Ok(render(&EditBookView::new(id, form, Some(&errors)))?.into_response())
        }
        Err(e) => Err(e),
    }
}

/// Delete confirmation page
pub async fn delete_book_form(
    State(state): State<AppState>,
    BookId(id): BookId,
) -> AppResult<Html<String>> {
    let book = state.services.catalog.get_book(id).await?;
    render(&DeleteBookView::new(book))
}

/// Delete a book for good
pub async fn delete_book(
    State(state): State<AppState>,
    BookId(id): BookId,
) -> AppResult<Redirect> {
    state.services.catalog.delete_book(id).await?;
    Ok(Redirect::to(LISTING))
}
