//! Book (catalog record) model and the edit form draft.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

/// Accession number token. The service may send it as a string or a number;
/// the received representation is kept so updates round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AccessionNumber {
    Number(i64),
    Text(String),
}

impl AccessionNumber {
    /// Compare against user input, e.g. a command line argument
    pub fn matches_input(&self, input: &str) -> bool {
        match self {
            AccessionNumber::Number(n) => input.trim().parse::<i64>() == Ok(*n),
            AccessionNumber::Text(s) => s == input,
        }
    }

    /// Token typed by a user: numeric input becomes a number, anything else text
    pub fn from_input(input: &str) -> Self {
        match input.trim().parse::<i64>() {
            Ok(n) => AccessionNumber::Number(n),
            Err(_) => AccessionNumber::Text(input.to_string()),
        }
    }
}

impl From<&str> for AccessionNumber {
    fn from(s: &str) -> Self {
        AccessionNumber::Text(s.to_string())
    }
}

impl From<i64> for AccessionNumber {
    fn from(n: i64) -> Self {
        AccessionNumber::Number(n)
    }
}

impl std::fmt::Display for AccessionNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccessionNumber::Number(n) => write!(f, "{}", n),
            AccessionNumber::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Availability status as reported by the service.
/// Values other than `available` and `borrowed` are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BookStatus {
    Available,
    Borrowed,
    Other(String),
}

impl BookStatus {
    pub fn as_str(&self) -> &str {
        match self {
            BookStatus::Available => "available",
            BookStatus::Borrowed => "borrowed",
            BookStatus::Other(raw) => raw,
        }
    }
}

impl Default for BookStatus {
    fn default() -> Self {
        BookStatus::Other(String::new())
    }
}

impl From<&str> for BookStatus {
    fn from(s: &str) -> Self {
        match s {
            "available" => BookStatus::Available,
            "borrowed" => BookStatus::Borrowed,
            other => BookStatus::Other(other.to_string()),
        }
    }
}

impl From<String> for BookStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "available" => BookStatus::Available,
            "borrowed" => BookStatus::Borrowed,
            _ => BookStatus::Other(s),
        }
    }
}

impl From<BookStatus> for String {
    fn from(status: BookStatus) -> Self {
        match status {
            BookStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for BookStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Book record as exchanged with the library service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// Absent on a create request when the service assigns the number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accession_number: Option<AccessionNumber>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub publisher: String,
    /// ISBN or ISSN
    #[serde(default, rename = "isbn_issn")]
    pub isbn: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub book_status: BookStatus,
    /// Attributes the client does not interpret, passed back untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Book {
    pub fn is_available(&self) -> bool {
        self.book_status == BookStatus::Available
    }

    /// Accession number for display, empty when unassigned
    pub fn accession_label(&self) -> String {
        self.accession_number
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default()
    }
}

/// Create / edit form contents.
///
/// Built blank for create mode or from the record selected for edit, then
/// validated and turned back into a [`Book`] for submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct BookDraft {
    pub accession_number: Option<AccessionNumber>,
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
    pub publisher: String,
    #[serde(rename = "isbn_issn")]
    pub isbn: String,
    pub category: String,
    pub status: String,
    #[serde(skip)]
    pub extra: Map<String, Value>,
}

impl BookDraft {
    /// Blank form for a new record
    pub fn blank() -> Self {
        Self {
            status: BookStatus::Available.to_string(),
            ..Default::default()
        }
    }

    /// Trim surrounding whitespace from every text input
    pub fn normalized(mut self) -> Self {
        for value in [
            &mut self.title,
            &mut self.author,
            &mut self.publisher,
            &mut self.isbn,
            &mut self.category,
            &mut self.status,
        ] {
            let trimmed = value.trim();
            if trimmed.len() != value.len() {
                *value = trimmed.to_string();
            }
        }
        self
    }

    /// Validate the normalized draft and produce the record to submit
    pub fn into_book(self) -> Result<Book, validator::ValidationErrors> {
        let draft = self.normalized();
        draft.validate()?;

        Ok(Book {
            accession_number: draft.accession_number,
            title: draft.title,
            author: draft.author,
            publisher: draft.publisher,
            isbn: draft.isbn,
            category: draft.category,
            book_status: BookStatus::from(draft.status),
            extra: draft.extra,
        })
    }
}

impl From<&Book> for BookDraft {
    fn from(book: &Book) -> Self {
        Self {
            accession_number: book.accession_number.clone(),
            title: book.title.clone(),
            author: book.author.clone(),
            publisher: book.publisher.clone(),
            isbn: book.isbn.clone(),
            category: book.category.clone(),
            status: book.book_status.to_string(),
            extra: book.extra.clone(),
        }
    }
}
