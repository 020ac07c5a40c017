//! Book catalogue service

use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{Book, BookPayload},
    repository::BookStore,
    validation,
};

#[derive(Clone)]
pub struct BookService {
    store: Arc<dyn BookStore>,
}

impl BookService {
    pub fn new(store: Arc<dyn BookStore>) -> Self {
        Self { store }
    }

    /// List every book
    pub async fn get_books(&self) -> AppResult<Vec<Book>> {
        self.store.list().await
    }

    /// Validate all fields and insert the book
    pub async fn add_book(&self, payload: &BookPayload) -> AppResult<Book> {
        let book = validation::validate_new(payload)?;
        self.store.create(&book).await
    }

    pub async fn get_book_by_id(&self, id: i32) -> AppResult<Book> {
        self.store.get_by_id(id).await
    }

    /// Validate the supplied fields and write only those
    pub async fn update_book(&self, id: i32, payload: &BookPayload) -> AppResult<()> {
        let changes = validation::validate_changes(payload)?;
        self.store.update(id, &changes).await
    }

    pub async fn delete_book(&self, id: i32) -> AppResult<()> {
        self.store.delete(id).await
    }

    /// Check that storage is reachable
    pub async fn ping(&self) -> AppResult<()> {
        self.store.ping().await
    }
}
