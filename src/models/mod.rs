//! Data models exchanged with the library service

pub mod book;
pub mod response;
pub mod search;

// Re-export commonly used types
pub use book::{AccessionNumber, Book, BookDraft, BookStatus};
pub use response::{ApiResponse, WriteAck};
pub use search::{BooleanOperator, SearchCondition, SearchField, SearchRequest};
