//! Repository layer for database operations

pub mod books;

use sqlx::{Pool, Postgres};

pub use books::{BookStore, BooksRepository};

/// Main repository struct holding the per-table repositories
#[derive(Clone)]
pub struct Repository {
    pub books: BooksRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            books: BooksRepository::new(pool),
        }
    }
}
