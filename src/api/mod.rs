//! Library service API: the request/response contract the flows depend on

pub mod client;

use async_trait::async_trait;

use crate::{
    error::ClientResult,
    models::{ApiResponse, Book, SearchRequest, WriteAck},
};

pub use client::HttpLibraryApi;

/// Endpoint paths relative to the service origin
pub mod endpoints {
    pub const LIST_BOOKS: &str = "/book/data";
    pub const CREATE_BOOK: &str = "/add/book";
    pub const UPDATE_BOOK: &str = "/edit/books";
    pub const SEARCH_BOOKS: &str = "/search/book";
}

/// Remote catalog, write and search operations.
///
/// `Ok` carries the decoded envelope, including `status: false` rejections;
/// `Err` means no well-formed envelope was obtained.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LibraryApi: Send + Sync {
    /// Fetch the full catalog
    async fn list_books(&self) -> ClientResult<ApiResponse<Vec<Book>>>;

    /// Create a record
    async fn create_book(&self, book: &Book) -> ClientResult<WriteAck>;

    /// Update the record identified by the book's accession number
    async fn update_book(&self, book: &Book) -> ClientResult<WriteAck>;

    /// Evaluate a two-condition boolean query
    async fn search_books(&self, request: &SearchRequest) -> ClientResult<ApiResponse<Vec<Book>>>;
}
