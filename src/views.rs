//! Plain-text presentation of catalog and search results

use crate::models::{Book, BookStatus};

/// Status presentation for a book row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusBadge {
    /// Positive badge
    Available,
    /// Blocked badge
    Inactive,
    /// Neutral label for any unrecognized status
    Unknown,
}

impl StatusBadge {
    pub fn label(&self) -> &'static str {
        match self {
            StatusBadge::Available => "Available",
            StatusBadge::Inactive => "Inactive",
            StatusBadge::Unknown => "Unknown",
        }
    }

    /// Rendered text; badges are bracketed, the neutral label is not
    pub fn render(&self) -> String {
        match self {
            StatusBadge::Unknown => self.label().to_string(),
            badge => format!("[{}]", badge.label()),
        }
    }
}

impl From<&BookStatus> for StatusBadge {
    fn from(status: &BookStatus) -> Self {
        match status {
            BookStatus::Available => StatusBadge::Available,
            BookStatus::Borrowed => StatusBadge::Inactive,
            BookStatus::Other(_) => StatusBadge::Unknown,
        }
    }
}

pub const RESERVE_ACTION_LABEL: &str = "Reserve Book";

/// One rendered search result
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow<'a> {
    /// Position in the result list, used to trigger the reservation action
    pub index: usize,
    pub book: &'a Book,
    pub badge: StatusBadge,
    /// Present only on rows that offer the reservation control
    pub reserve_action: Option<&'static str>,
}

pub fn result_rows(books: &[Book]) -> Vec<ResultRow<'_>> {
    books
        .iter()
        .enumerate()
        .map(|(index, book)| ResultRow {
            index,
            book,
            badge: StatusBadge::from(&book.book_status),
            reserve_action: book.is_available().then_some(RESERVE_ACTION_LABEL),
        })
        .collect()
}

const CATALOG_HEADERS: [&str; 7] = [
    "Accession Number",
    "Title",
    "Author",
    "Publisher",
    "ISBN/ISSN",
    "Category",
    "Status",
];

fn book_cells(book: &Book) -> Vec<String> {
    vec![
        book.accession_label(),
        book.title.clone(),
        book.author.clone(),
        book.publisher.clone(),
        book.isbn.clone(),
        book.category.clone(),
        StatusBadge::from(&book.book_status).render(),
    ]
}

/// Catalog list as an aligned text table
pub fn render_catalog(books: &[Book]) -> String {
    let headers: Vec<String> = CATALOG_HEADERS.iter().map(|h| h.to_string()).collect();
    let rows: Vec<Vec<String>> = books.iter().map(book_cells).collect();
    render_table(&headers, &rows)
}

/// Search results with a row number and the reservation column
pub fn render_results(rows: &[ResultRow<'_>]) -> String {
    let mut headers = vec!["#".to_string()];
    headers.extend(CATALOG_HEADERS.iter().map(|h| h.to_string()));
    headers.push("Action".to_string());

    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            let mut cells = vec![row.index.to_string()];
            cells.extend(book_cells(row.book));
            cells.push(row.reserve_action.unwrap_or_default().to_string());
            cells
        })
        .collect();

    render_table(&headers, &cells)
}

fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut out = format_line(headers);
    out.push('\n');
    out.push_str(
        &widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    for row in rows {
        out.push('\n');
        out.push_str(&format_line(row));
    }
    out
}
