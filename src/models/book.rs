//! Book model, form payloads and validation errors

use std::fmt;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationErrors};

/// Form fields in display order
pub const BOOK_FIELDS: [&str; 4] = ["title", "author", "genre", "year"];

/// Book record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub genre: Option<String>,
    /// Publication year
    pub year: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Book form values as submitted by the browser.
///
/// Every field is kept as text so an invalid submission can be shown back to the
/// user exactly as typed. Missing fields deserialize to empty strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BookForm {
    pub title: String,
    pub author: String,
    pub genre: String,
    pub year: String,
}

impl From<&Book> for BookForm {
    fn from(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            genre: book.genre.clone().unwrap_or_default(),
            year: book.year.to_string(),
        }
    }
}

/// Validated book write payload
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewBook {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
    pub genre: Option<String>,
    #[validate(range(min = 1000, max = 9999, message = "Year must be a four-digit year"))]
    pub year: i32,
}

impl BookForm {
    /// Check the submitted values and convert them into a typed payload.
    ///
    /// Text fields are trimmed and an empty genre becomes `None`. At most one
    /// message is reported per field.
    pub fn validate_book(&self) -> Result<NewBook, FieldErrors> {
        let mut errors = FieldErrors::default();

        let year = match self.year.trim() {
            "" => {
                errors.add("year", "Year is required");
                None
            }
            raw => match raw.parse::<i32>() {
                Ok(year) => Some(year),
                Err(_) => {
                    errors.add("year", "Year must be a number");
                    None
                }
            },
        };

        let genre = Some(self.genre.trim())
            .filter(|genre| !genre.is_empty())
            .map(str::to_string);

        let book = NewBook {
            title: self.title.trim().to_string(),
            author: self.author.trim().to_string(),
            genre,
            year: year.unwrap_or_default(),
        };

        if let Err(invalid) = book.validate() {
            errors.merge_validation(&invalid);
        }

        if errors.is_empty() {
            Ok(book)
        } else {
            errors.sort_fields();
            Err(errors)
        }
    }
}

/// Field name -> messages produced by a rejected write.
///
/// Messages that cannot be attached to a form field are kept apart as general
/// messages.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FieldErrors {
    fields: IndexMap<String, Vec<String>>,
    general: Vec<String>,
}

impl FieldErrors {
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn add_general(&mut self, message: impl Into<String>) {
        self.general.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.general.is_empty()
    }

    pub fn has(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    pub fn get(&self, field: &str) -> &[String] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    /// All messages, general ones first, then by field
    pub fn messages(&self) -> Vec<String> {
        self.general
            .iter()
            .chain(self.fields.values().flatten())
            .cloned()
            .collect()
    }

    /// Add messages from a `validator` run, skipping fields that already failed
    fn merge_validation(&mut self, invalid: &ValidationErrors) {
        for (field, failures) in invalid.field_errors() {
            let field = field.to_string();
            if self.has(&field) {
                continue;
            }
            if let Some(failure) = failures.first() {
                let message = failure
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field));
                self.add(field, message);
            }
        }
    }

    fn sort_fields(&mut self) {
        let rank = |field: &String| {
            BOOK_FIELDS
                .iter()
                .position(|known| *known == field.as_str())
                .unwrap_or(BOOK_FIELDS.len())
        };
        self.fields.sort_by(|a, _, b, _| rank(a).cmp(&rank(b)));
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.messages().join("; "))
    }
}
