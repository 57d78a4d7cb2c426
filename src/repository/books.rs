//! Books repository backed by PostgreSQL

use async_trait::async_trait;
use sqlx::{postgres::PgDatabaseError, Pool, Postgres};

use super::{BookOrder, BookQuery, BookStore};
use crate::{
    error::{AppError, AppResult},
    models::book::{Book, BookForm, FieldErrors, NewBook},
};

const BOOK_COLUMNS: &str = "id, title, author, genre, year, created_at, updated_at";

/// `$1` is a LIKE pattern, or NULL to match every row
const SEARCH_FILTER: &str = r#"
    $1::text IS NULL
    OR title ILIKE $1
    OR author ILIKE $1
    OR genre ILIKE $1
    OR CAST(year AS TEXT) LIKE $1
"#;

/// Wrap a search term into a LIKE pattern matching it literally anywhere
pub fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn order_clause(order: BookOrder) -> &'static str {
    match order {
        BookOrder::Insertion => "id ASC",
        BookOrder::YearAscending => "year ASC, id ASC",
    }
}

fn field_label(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Field errors for a constraint violation raised by the `books` table.
///
/// Returns `None` for database errors that are not caused by the submitted values.
pub fn violation_field_errors(
    code: &str,
    constraint: Option<&str>,
    column: Option<&str>,
) -> Option<FieldErrors> {
    let mut errors = FieldErrors::default();
    match code {
        // not_null_violation
        "23502" => match column {
            Some(column) => errors.add(column, format!("{} is required", field_label(column))),
            None => errors.add_general("A required value is missing"),
        },
        // check_violation
        "23514" => match constraint {
            Some("books_title_check") => errors.add("title", "Title is required"),
            Some("books_author_check") => errors.add("author", "Author is required"),
            Some("books_year_check") => errors.add("year", "Year must be a four-digit year"),
            _ => errors.add_general("The book could not be saved"),
        },
        _ => return None,
    }
    Some(errors)
}

fn map_write_error(err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(ref db_err) = err {
        let code = db_err.code().unwrap_or_default();
        let column = db_err
            .try_downcast_ref::<PgDatabaseError>()
            .and_then(PgDatabaseError::column);
        if let Some(errors) = violation_field_errors(&code, db_err.constraint(), column) {
            return AppError::Validation(errors);
        }
    }
    AppError::Database(err)
}

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    fn validated(form: &BookForm) -> AppResult<NewBook> {
        form.validate_book().map_err(AppError::Validation)
    }
}

#[async_trait]
impl BookStore for BooksRepository {
    async fn find_all(&self, query: &BookQuery) -> AppResult<(Vec<Book>, i64)> {
        let pattern = query.search.as_deref().map(contains_pattern);
        tracing::debug!(
            "Books query: search={:?} order={:?} offset={} limit={:?}",
            query.search,
            query.order,
            query.offset,
            query.limit
        );

        let count_query = format!("SELECT COUNT(*) FROM books WHERE {}", SEARCH_FILTER);
        let total: i64 = sqlx::query_scalar(&count_query)
            .bind(&pattern)
            .fetch_one(&self.pool)
            .await?;

        let select_query = format!(
            "SELECT {} FROM books WHERE {} ORDER BY {} OFFSET $2 LIMIT $3",
            BOOK_COLUMNS,
            SEARCH_FILTER,
            order_clause(query.order)
        );
        let books = sqlx::query_as::<_, Book>(&select_query)
            .bind(&pattern)
            .bind(query.offset.max(0))
            .bind(query.limit)
            .fetch_all(&self.pool)
            .await?;

        Ok((books, total))
    }

    async fn find_by_id(&self, id: i32) -> AppResult<Option<Book>> {
        let query = format!("SELECT {} FROM books WHERE id = $1", BOOK_COLUMNS);
        let book = sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(book)
    }

    async fn insert(&self, form: &BookForm) -> AppResult<Book> {
        let book = Self::validated(form)?;
        let query = format!(
            r#"
            INSERT INTO books (title, author, genre, year)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            BOOK_COLUMNS
        );
        let created = sqlx::query_as::<_, Book>(&query)
            .bind(&book.title)
            .bind(&book.author)
            .bind(&book.genre)
            .bind(book.year)
            .fetch_one(&self.pool)
            .await
            .map_err(map_write_error)?;

        tracing::info!("Book {} created: {}", created.id, created.title);
        Ok(created)
    }

    async fn update(&self, id: i32, form: &BookForm) -> AppResult<Book> {
        let book = Self::validated(form)?;
        let query = format!(
            r#"
            UPDATE books
            SET title = $1, author = $2, genre = $3, year = $4, updated_at = NOW()
            WHERE id = $5
            RETURNING {}
            "#,
            BOOK_COLUMNS
        );
        let updated = sqlx::query_as::<_, Book>(&query)
            .bind(&book.title)
            .bind(&book.author)
            .bind(&book.genre)
            .bind(book.year)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_write_error)?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))?;

        tracing::info!("Book {} updated", id);
        Ok(updated)
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book {} not found", id)));
        }
        tracing::info!("Book {} deleted", id);
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
