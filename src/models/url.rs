//! URL processing request/response bodies

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// URL processing request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UrlRequest {
    /// Absolute URL to process
    pub url: String,
    /// One of `canonical`, `redirection`, `all`
    pub operation: String,
}

/// URL processing result
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UrlResponse {
    pub processed_url: String,
}
