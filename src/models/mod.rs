//! Data models for the Mini Library

pub mod book;
pub mod url;

// Re-export commonly used types
pub use book::{Book, BookChanges, BookPayload, NewBook};
pub use url::{UrlRequest, UrlResponse};
