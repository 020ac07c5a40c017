//! Book model and request payloads

use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Persisted book record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub cover_image_url: Option<String>,
    pub description: Option<String>,
    /// Publication date (YYYY-MM-DD)
    pub publication_date: NaiveDate,
    pub number_of_pages: i32,
    /// 13-digit ISBN
    pub isbn: String,
}

/// Incoming book fields, used by both create and update.
///
/// A field that is absent, `null` or an empty string deserializes to `None`,
/// and so does a page count of zero.
/// The length/url/range rules run on present values only; presence and the
/// format rules are checked in [`crate::validation`].
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct BookPayload {
    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(length(min = 2, max = 255))]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(length(min = 2, max = 255))]
    pub author: Option<String>,

    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(url)]
    pub cover_image_url: Option<String>,

    #[serde(default, deserialize_with = "blank_as_none")]
    #[validate(length(max = 1000))]
    pub description: Option<String>,

    /// Publication date (YYYY-MM-DD)
    #[serde(default, deserialize_with = "blank_as_none")]
    pub publication_date: Option<String>,

    #[serde(default, deserialize_with = "number_or_text")]
    #[validate(range(min = 1))]
    pub number_of_pages: Option<i32>,

    /// 13-digit ISBN
    #[serde(default, deserialize_with = "blank_as_none")]
    pub isbn: Option<String>,
}

impl BookPayload {
    /// True when no field carries a value
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.cover_image_url.is_none()
            && self.description.is_none()
            && self.publication_date.is_none()
            && self.pages().is_none()
            && self.isbn.is_none()
    }

    /// Page count, with zero counted as not supplied
    pub fn pages(&self) -> Option<i32> {
        self.number_of_pages.filter(|&n| n != 0)
    }
}

/// Validated book ready to be inserted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub cover_image_url: Option<String>,
    pub description: Option<String>,
    pub publication_date: NaiveDate,
    pub number_of_pages: i32,
    pub isbn: String,
}

/// Validated partial update; `None` leaves the stored column untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookChanges {
    pub title: Option<String>,
    pub author: Option<String>,
    pub cover_image_url: Option<String>,
    pub description: Option<String>,
    pub publication_date: Option<NaiveDate>,
    pub number_of_pages: Option<i32>,
    pub isbn: Option<String>,
}

impl BookChanges {
    pub fn is_empty(&self) -> bool {
        *self == BookChanges::default()
    }
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

/// JSON sends numbers, forms send text
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(i64),
    Text(String),
}

fn number_or_text<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let number = match Option::<NumberOrText>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(NumberOrText::Number(n)) => n,
        Some(NumberOrText::Text(s)) if s.trim().is_empty() => return Ok(None),
        Some(NumberOrText::Text(s)) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| de::Error::invalid_value(de::Unexpected::Str(&s), &"an integer"))?,
    };

    let number = i32::try_from(number)
        .map_err(|_| de::Error::invalid_value(de::Unexpected::Signed(number), &"a 32-bit integer"))?;
    Ok((number != 0).then_some(number))
}
