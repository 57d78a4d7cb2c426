//! Error pipeline: unmatched routes, panics and the error page

use std::any::Any;

use askama::Template;
use axum::{
    extract::{Request, State},
    http::Uri,
    middleware::Next,
    response::{Html, IntoResponse, Response},
};

use crate::{
    error::{AppError, ErrorReport},
    views::ErrorView,
    AppState,
};

/// Fallback for requests no route matched
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No page at {}", uri.path()))
}

/// Turn a handler panic into a 500 report
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    AppError::Internal(format!("handler panicked: {}", message)).into_response()
}

/// Render the error page for any response carrying an [`ErrorReport`].
///
/// Error details only reach the page in development.
pub async fn render_error_page(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;
    let Some(report) = response.extensions().get::<ErrorReport>().cloned() else {
        return response;
    };

    let view = ErrorView {
        title: report.title().to_string(),
        status: report.status.as_u16(),
        detail: state.config.is_development().then_some(report.detail),
    };

    match view.render() {
        Ok(html) => (report.status, Html(html)).into_response(),
        Err(e) => {
            tracing::error!("Failed to render error page: {}", e);
            response
        }
    }
}
