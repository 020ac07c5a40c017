//! Business logic services

pub mod books;
pub mod urls;

use std::sync::Arc;

use crate::{config::UrlsConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub books: books::BookService,
    pub urls: urls::UrlService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, urls_config: &UrlsConfig) -> Self {
        Self {
            books: books::BookService::new(Arc::new(repository.books)),
            urls: urls::UrlService::new(urls_config.canonical_host.clone()),
        }
    }
}
