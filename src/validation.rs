//! Book field validation
//!
//! Checks are stateless: each call derives the rule violations of one payload and
//! reports them in field declaration order, one violation per field.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

use crate::{
    error::{AppError, AppResult},
    models::{BookChanges, BookPayload, NewBook},
};

static DATE_SHAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());

const DATE_FORMAT: &str = "%Y-%m-%d";
const ISBN_LENGTH: usize = 13;

/// A single failed constraint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldViolation {
    pub field: String,
    pub rule: String,
}

impl FieldViolation {
    pub fn new(field: &str, rule: &str) -> Self {
        Self {
            field: field.to_string(),
            rule: rule.to_string(),
        }
    }
}

/// Create requires every mandatory field, update only checks what is present
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Create,
    Update,
}

/// Check a payload, returning every violation found
pub fn check(payload: &BookPayload, mode: Mode) -> Result<(), Vec<FieldViolation>> {
    if mode == Mode::Update && payload.is_empty() {
        return Err(vec![FieldViolation::new("body", "at_least_one_field_required")]);
    }

    let errors = payload.validate().err();
    let derived = |field: &str| derived_rule(errors.as_ref(), field);
    let missing = || (mode == Mode::Create).then(|| "required".to_string());

    let checks = [
        ("title", payload.title.as_ref().map_or_else(missing, |_| derived("title"))),
        ("author", payload.author.as_ref().map_or_else(missing, |_| derived("author"))),
        ("cover_image_url", derived("cover_image_url")),
        ("description", derived("description")),
        (
            "publication_date",
            payload
                .publication_date
                .as_deref()
                .map_or_else(missing, date_rule),
        ),
        (
            "number_of_pages",
            payload
                .pages()
                .map_or_else(missing, |_| derived("number_of_pages")),
        ),
        ("isbn", payload.isbn.as_deref().map_or_else(missing, isbn_rule)),
    ];

    let violations: Vec<FieldViolation> = checks
        .into_iter()
        .filter_map(|(field, rule)| rule.map(|rule| FieldViolation::new(field, &rule)))
        .collect();

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

/// Validate a create payload and convert it into an insertable book
pub fn validate_new(payload: &BookPayload) -> AppResult<NewBook> {
    check(payload, Mode::Create).map_err(AppError::Validation)?;

    let (Some(title), Some(author), Some(date), Some(number_of_pages), Some(isbn)) = (
        payload.title.clone(),
        payload.author.clone(),
        payload.publication_date.as_deref(),
        payload.pages(),
        payload.isbn.clone(),
    ) else {
        return Err(AppError::Internal(
            "validated book is missing a required field".to_string(),
        ));
    };

    Ok(NewBook {
        title,
        author,
        cover_image_url: payload.cover_image_url.clone(),
        description: payload.description.clone(),
        publication_date: parse_date(date)?,
        number_of_pages,
        isbn,
    })
}

/// Validate an update payload and convert it into the set of column changes
pub fn validate_changes(payload: &BookPayload) -> AppResult<BookChanges> {
    check(payload, Mode::Update).map_err(AppError::Validation)?;

    Ok(BookChanges {
        title: payload.title.clone(),
        author: payload.author.clone(),
        cover_image_url: payload.cover_image_url.clone(),
        description: payload.description.clone(),
        publication_date: payload
            .publication_date
            .as_deref()
            .map(parse_date)
            .transpose()?,
        number_of_pages: payload.pages(),
        isbn: payload.isbn.clone(),
    })
}

fn derived_rule(errors: Option<&ValidationErrors>, field: &str) -> Option<String> {
    errors?
        .field_errors()
        .get(field)
        .and_then(|errors| errors.first())
        .map(|error| error.code.to_string())
}

fn date_rule(value: &str) -> Option<String> {
    let valid = DATE_SHAPE.is_match(value) && NaiveDate::parse_from_str(value, DATE_FORMAT).is_ok();
    (!valid).then(|| "datetime".to_string())
}

fn isbn_rule(value: &str) -> Option<String> {
    if value.chars().count() != ISBN_LENGTH {
        Some("length".to_string())
    } else if !value.chars().all(|c| c.is_ascii_digit()) {
        Some("numeric".to_string())
    } else {
        None
    }
}

fn parse_date(value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| AppError::violation("publication_date", "datetime"))
}
