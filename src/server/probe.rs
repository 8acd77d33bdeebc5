use std::sync::atomic::{AtomicUsize, Ordering};

/// Counts how often the relational fields were resolved.
///
/// `Book.author` and `Author.books` only run when a query selects them, and
/// these counters make that observable.
#[derive(Debug, Default)]
pub struct ResolutionProbe {
    book_author: AtomicUsize,
    author_books: AtomicUsize,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ProbeSnapshot {
    pub book_author: usize,
    pub author_books: usize,
}

impl ResolutionProbe {
    pub(super) fn book_author(&self) {
        let n = self.book_author.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::debug!(count = n, "resolved Book.author");
    }

    pub(super) fn author_books(&self) {
        let n = self.author_books.fetch_add(1, Ordering::Relaxed) + 1;
        tracing::debug!(count = n, "resolved Author.books");
    }

    pub fn snapshot(&self) -> ProbeSnapshot {
        ProbeSnapshot {
            book_author: self.book_author.load(Ordering::Relaxed),
            author_books: self.author_books.load(Ordering::Relaxed),
        }
    }
}
