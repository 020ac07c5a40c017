//! URL processing service

use crate::{
    error::{AppError, AppResult},
    normalizer::{self, Operation},
};

#[derive(Clone)]
pub struct UrlService {
    canonical_host: String,
}

impl UrlService {
    pub fn new(canonical_host: impl Into<String>) -> Self {
        Self {
            canonical_host: canonical_host.into(),
        }
    }

    /// Apply the named operation to `raw`
    pub fn process(&self, raw: &str, operation: &str) -> AppResult<String> {
        operation
            .parse::<Operation>()
            .and_then(|operation| normalizer::process(raw, operation, &self.canonical_host))
            .map_err(|e| AppError::BadRequest(e.to_string()))
    }
}
