//! HTTP handlers and routing for Bookshelf

pub mod books;
pub mod errors;
pub mod health;

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Query},
    handler::HandlerWithoutStateExt,
    http::request::Parts,
    middleware,
    routing::get,
    Form, Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer, compression::CompressionLayer, services::ServeDir,
    trace::TraceLayer,
};

use crate::{error::AppError, AppState};

/// Book id taken from the `:id` path segment.
///
/// An id that is not a number cannot name a book, so it is rejected as not found.
pub struct BookId(pub i32);

#[async_trait]
impl<S> FromRequestParts<S> for BookId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        raw.parse::<i32>()
            .map(BookId)
            .map_err(|_| AppError::NotFound(format!("Book {} not found", raw)))
    }
}

/// `Query` whose rejection goes through the error page
#[derive(FromRequestParts)]
#[from_request(via(Query), rejection(AppError))]
pub struct QueryParams<T>(pub T);

/// `Form` whose rejection goes through the error page
#[derive(FromRequest)]
#[from_request(via(Form), rejection(AppError))]
pub struct FormInput<T>(pub T);

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    let assets = ServeDir::new(&state.config.server.static_dir)
        .not_found_service(errors::not_found.into_service());

    Router::new()
        .route("/", get(books::home))
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Books
        .route("/books", get(books::list_books).post(books::create_book))
        .route("/books/new", get(books::new_book_form))
        .route("/books/search", get(books::search_books))
        .route("/books/:id", get(books::show_book))
        .route(
            "/books/:id/edit",
            get(books::edit_book_form).post(books::update_book),
        )
        .route(
            "/books/:id/delete",
            get(books::delete_book_form).post(books::delete_book),
        )
        .nest_service("/static", assets)
        .fallback(errors::not_found)
        .layer(CatchPanicLayer::custom(errors::handle_panic))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            errors::render_error_page,
        ))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
