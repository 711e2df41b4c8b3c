//! Catalog maintenance flow: list, select for edit, create or update

use std::sync::Arc;

use crate::{
    api::LibraryApi,
    error::ClientResult,
    models::{Book, BookDraft},
};

/// Result of fetching the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Local list replaced with this many records
    Replaced(usize),
    /// Service answered `status: false`; list kept
    Rejected,
    /// Request failed; list kept
    Failed,
}

/// Result of a create or update submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created,
    Updated,
    Rejected,
    Failed,
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Created | SubmitOutcome::Updated)
    }
}

/// Local catalog state plus the record selected for edit.
///
/// The local list is a display copy; every successful write is followed by
/// a refetch so the service's canonical list wins.
pub struct CatalogFlow {
    api: Arc<dyn LibraryApi>,
    books: Vec<Book>,
    selected: Option<Book>,
}

impl CatalogFlow {
    pub fn new(api: Arc<dyn LibraryApi>) -> Self {
        Self {
            api,
            books: Vec::new(),
            selected: None,
        }
    }

    /// Create the flow and perform the initial fetch
    pub async fn load(api: Arc<dyn LibraryApi>) -> Self {
        let mut flow = Self::new(api);
        flow.refresh().await;
        flow
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn selected(&self) -> Option<&Book> {
        self.selected.as_ref()
    }

    /// Make `book` the edit target
    pub fn select_for_edit(&mut self, book: Book) {
        tracing::debug!("Selected book {} for edit", book.accession_label());
        self.selected = Some(book);
    }

    /// Select the local record whose accession number matches `input`
    pub fn select_by_accession(&mut self, input: &str) -> Option<&Book> {
        let book = self
            .books
            .iter()
            .find(|b| b.accession_number.as_ref().is_some_and(|a| a.matches_input(input)))?
            .clone();
        self.select_for_edit(book);
        self.selected.as_ref()
    }

    /// Back to create mode
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Form contents: the selected record, or a blank create form
    pub fn form(&self) -> BookDraft {
        self.selected
            .as_ref()
            .map(BookDraft::from)
            .unwrap_or_else(BookDraft::blank)
    }

    /// Fetch the full catalog. Failures are logged and leave the list as is.
    pub async fn refresh(&mut self) -> RefreshOutcome {
        match self.api.list_books().await {
            Ok(response) if response.status => {
                self.books = response.data.unwrap_or_default();
                tracing::debug!("Catalog refreshed: {} books", self.books.len());
                RefreshOutcome::Replaced(self.books.len())
            }
            Ok(response) => {
                tracing::warn!(
                    "Catalog fetch rejected: {}",
                    response.message.as_deref().unwrap_or("no message")
                );
                RefreshOutcome::Rejected
            }
            Err(e) => {
                tracing::error!("Error fetching books: {}", e);
                RefreshOutcome::Failed
            }
        }
    }

    /// Submit `book` to the update endpoint when a record is selected, to the
    /// create endpoint otherwise.
    ///
    /// On success the local list is reconciled, the selection cleared and the
    /// catalog refetched. On failure nothing changes.
    pub async fn submit(&mut self, book: Book) -> SubmitOutcome {
        let updating = self.selected.is_some();
        let result = if updating {
            self.api.update_book(&book).await
        } else {
            self.api.create_book(&book).await
        };

        let outcome = match result {
            Ok(ack) if ack.status => {
                match self.selected.take() {
                    Some(previous) => self.replace_local(&previous, book),
                    None => self.books.push(book),
                }
                if updating {
                    SubmitOutcome::Updated
                } else {
                    SubmitOutcome::Created
                }
            }
            Ok(ack) => {
                tracing::warn!(
                    "Book submission rejected: {}",
                    ack.message.as_deref().unwrap_or("no message")
                );
                return SubmitOutcome::Rejected;
            }
            Err(e) => {
                tracing::error!("Error submitting book data: {}", e);
                return SubmitOutcome::Failed;
            }
        };

        tracing::info!("Book submission succeeded ({:?})", outcome);
        self.refresh().await;
        outcome
    }

    /// Validate a form draft and submit it
    pub async fn submit_draft(&mut self, draft: BookDraft) -> ClientResult<SubmitOutcome> {
        let book = draft.into_book()?;
        Ok(self.submit(book).await)
    }

    /// Replace entries keyed by the record that was selected, so an edited
    /// accession number does not leave the old entry behind.
    fn replace_local(&mut self, previous: &Book, updated: Book) {
        let Some(key) = previous
            .accession_number
            .as_ref()
            .or(updated.accession_number.as_ref())
            .cloned()
        else {
            return;
        };

        for slot in self
            .books
            .iter_mut()
            .filter(|b| b.accession_number.as_ref() == Some(&key))
        {
            *slot = updated.clone();
        }
    }
}
