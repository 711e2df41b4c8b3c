//! Reserved books store shared between the search flow and other surfaces

use std::path::Path;
use std::sync::Arc;
use tokio::sync::watch;

use crate::{
    error::ClientResult,
    models::{AccessionNumber, Book},
};

/// Capability that records a user's intent to reserve a book
pub trait ReservationCollector: Send + Sync {
    fn add_reserved_book(&self, book: Book);
}

/// Cloneable handle over one reserved-books list.
///
/// Every clone mutates the same list; [`subscribe`](Self::subscribe) hands out
/// receivers that observe each change.
#[derive(Clone)]
pub struct SharedReservations {
    books: Arc<watch::Sender<Vec<Book>>>,
}

impl SharedReservations {
    pub fn new() -> Self {
        Self::with_books(Vec::new())
    }

    pub fn with_books(books: Vec<Book>) -> Self {
        let (sender, _) = watch::channel(books);
        Self {
            books: Arc::new(sender),
        }
    }

    /// Snapshot of the current list
    pub fn reserved_books(&self) -> Vec<Book> {
        self.books.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.books.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.borrow().is_empty()
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<Book>> {
        self.books.subscribe()
    }

    /// Remove the entry with the given accession number, returning it
    pub fn remove(&self, accession_number: &AccessionNumber) -> Option<Book> {
        let mut removed = None;
        self.books.send_if_modified(|books| {
            let position = books
                .iter()
                .position(|b| b.accession_number.as_ref() == Some(accession_number));
            match position {
                Some(index) => {
                    removed = Some(books.remove(index));
                    true
                }
                None => false,
            }
        });
        removed
    }

    pub fn clear(&self) {
        self.books.send_modify(Vec::clear);
    }

    /// Load a previously saved list; a missing file yields an empty store
    pub async fn load(path: &Path) -> ClientResult<Self> {
        match tokio::fs::read(path).await {
            Ok(bytes) => {
                let books: Vec<Book> = serde_json::from_slice(&bytes)?;
                tracing::debug!("Loaded {} reserved books from {}", books.len(), path.display());
                Ok(Self::with_books(books))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::new()),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn save(&self, path: &Path) -> ClientResult<()> {
        let body = serde_json::to_vec_pretty(&self.reserved_books())?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, body).await?;
        Ok(())
    }
}

impl Default for SharedReservations {
    fn default() -> Self {
        Self::new()
    }
}

impl ReservationCollector for SharedReservations {
    /// Re-reserving a book already in the list replaces the stored copy
    fn add_reserved_book(&self, book: Book) {
        tracing::info!("Reserving book {} ({})", book.accession_label(), book.title);
        self.books.send_modify(|books| {
            let existing = book.accession_number.as_ref().and_then(|key| {
                books
                    .iter()
                    .position(|b| b.accession_number.as_ref() == Some(key))
            });
            match existing {
                Some(index) => books[index] = book,
                None => books.push(book),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BookStatus;

    fn book(id: &str) -> Book {
        Book {
            accession_number: Some(id.into()),
            title: format!("Title {}", id),
            book_status: BookStatus::Available,
            ..Default::default()
        }
    }

    #[test]
    fn test_clones_share_one_list() {
        let store = SharedReservations::new();
        let other_surface = store.clone();

        store.add_reserved_book(book("A1"));

        assert_eq!(other_surface.reserved_books(), vec![book("A1")]);
    }

    #[test]
    fn test_reserving_twice_keeps_one_entry() {
        let store = SharedReservations::new();
        store.add_reserved_book(book("A1"));
        store.add_reserved_book(book("A1"));
        store.add_reserved_book(book("A2"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_remove_and_clear() {
        let store = SharedReservations::with_books(vec![book("A1"), book("A2")]);

        assert_eq!(store.remove(&"A1".into()), Some(book("A1")));
        assert_eq!(store.remove(&"A1".into()), None);
        assert_eq!(store.len(), 1);

        store.clear();
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_subscribers_observe_changes() {
        let store = SharedReservations::new();
        let mut receiver = store.subscribe();

        store.add_reserved_book(book("A1"));

        receiver.changed().await.unwrap();
        assert_eq!(receiver.borrow_and_update().len(), 1);
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("reservations.json");

        let store = SharedReservations::new();
        store.add_reserved_book(book("A1"));
        store.save(&path).await.unwrap();

        let loaded = SharedReservations::load(&path).await.unwrap();
        assert_eq!(loaded.reserved_books(), vec![book("A1")]);
    }

    #[tokio::test]
    async fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = SharedReservations::load(&dir.path().join("absent.json"))
            .await
            .unwrap();
        assert!(loaded.is_empty());
    }
}
