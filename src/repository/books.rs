//! Books repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{Book, BookChanges, NewBook},
};

const BOOK_COLUMNS: &str =
    "id, title, author, cover_image_url, description, publication_date, number_of_pages, isbn";

/// Storage operations on the `books` table
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookStore: Send + Sync {
    /// All books, ordered by id; empty when the table is empty
    async fn list(&self) -> AppResult<Vec<Book>>;

    /// Insert a book, returning the stored row with its assigned id
    async fn create(&self, book: &NewBook) -> AppResult<Book>;

    /// Fetch one book, `NotFound` when no row matches
    async fn get_by_id(&self, id: i32) -> AppResult<Book>;

    /// Write the present fields of `changes`, `NotFound` when no row matches
    async fn update(&self, id: i32, changes: &BookChanges) -> AppResult<()>;

    /// Delete a book; deleting a missing id is not an error
    async fn delete(&self, id: i32) -> AppResult<()>;

    /// Round-trip to the database
    async fn ping(&self) -> AppResult<()>;
}

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

/// Build the UPDATE statement for the present fields, `None` when nothing is set.
///
/// Placeholders are numbered in column order; `id` always takes the last one.
pub fn update_statement(changes: &BookChanges) -> Option<String> {
    let mut sets = Vec::new();
    let mut idx = 1;

    macro_rules! add_field {
        ($field:expr, $name:expr) => {
            if $field.is_some() {
                sets.push(format!("{} = ${}", $name, idx));
                idx += 1;
            }
        };
    }

    add_field!(changes.title, "title");
    add_field!(changes.author, "author");
    add_field!(changes.cover_image_url, "cover_image_url");
    add_field!(changes.description, "description");
    add_field!(changes.publication_date, "publication_date");
    add_field!(changes.number_of_pages, "number_of_pages");
    add_field!(changes.isbn, "isbn");

    if sets.is_empty() {
        return None;
    }

    Some(format!(
        "UPDATE books SET {} WHERE id = ${}",
        sets.join(", "),
        idx
    ))
}

#[async_trait]
impl BookStore for BooksRepository {
    async fn list(&self) -> AppResult<Vec<Book>> {
        let books = sqlx::query_as::<_, Book>(&format!(
            "SELECT {} FROM books ORDER BY id",
            BOOK_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(books)
    }

    async fn create(&self, book: &NewBook) -> AppResult<Book> {
        let row = sqlx::query_as::<_, Book>(&format!(
            r#"
            INSERT INTO books (title, author, cover_image_url, description, publication_date, number_of_pages, isbn)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            BOOK_COLUMNS
        ))
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.cover_image_url)
        .bind(&book.description)
        .bind(book.publication_date)
        .bind(book.number_of_pages)
        .bind(&book.isbn)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Book> {
        sqlx::query_as::<_, Book>(&format!("SELECT {} FROM books WHERE id = $1", BOOK_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book {} not found", id)))
    }

    async fn update(&self, id: i32, changes: &BookChanges) -> AppResult<()> {
        // Callers validate first; an empty change set never reaches SQL
        let query = update_statement(changes)
            .ok_or_else(|| AppError::Internal("no fields to update".to_string()))?;

        let mut builder = sqlx::query(&query);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field {
                    builder = builder.bind(val);
                }
            };
        }

        bind_field!(changes.title);
        bind_field!(changes.author);
        bind_field!(changes.cover_image_url);
        bind_field!(changes.description);
        bind_field!(changes.publication_date);
        bind_field!(changes.number_of_pages);
        bind_field!(changes.isbn);

        let result = builder.bind(id).execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Book {} not found", id)));
        }
        Ok(())
    }

    async fn delete(&self, id: i32) -> AppResult<()> {
        sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
