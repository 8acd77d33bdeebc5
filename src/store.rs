use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::datamodel::{Author, Book, SEED_AUTHORS, SEED_BOOKS};

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Ids are GraphQL `Int`s, so a collection holds at most `i32::MAX` records.
    #[error("no ids left for new {0}")]
    IdsExhausted(&'static str),
}

/// Rows of one collection together with the last id handed out.
///
/// The counter lives under the same lock as the rows, so an append assigns
/// its id and pushes in one critical section: ids are unique and increase in
/// insertion order even with parallel writers.
struct Table<T> {
    rows: Vec<T>,
    last_id: i32,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            last_id: 0,
        }
    }
}

impl<T> Table<T> {
    /// Rows numbered from 1 in the given order.
    fn numbered<S>(seed: impl IntoIterator<Item = S>, make: impl Fn(i32, S) -> T) -> Self {
        let mut table = Self::default();
        for item in seed {
            table.last_id += 1;
            table.rows.push(make(table.last_id, item));
        }
        table
    }

    /// Appends the row built for the next id, or `None` once ids run out.
    fn push_with(&mut self, make: impl FnOnce(i32) -> T) -> Option<&T> {
        self.last_id = self.last_id.checked_add(1)?;
        self.rows.push(make(self.last_id));
        self.rows.last()
    }
}

/// In-memory holder of the books and authors collections.
///
/// Records are only ever appended. Lookups clone records out so that no lock
/// is held across an `.await` in the resolvers.
#[derive(Default)]
pub struct RecordStore {
    books: RwLock<Table<Book>>,
    authors: RwLock<Table<Author>>,
}

// Rows are appended whole, so a panicking writer cannot leave a table in a
// state worth refusing to read.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding the fixed authors and books the server starts with.
    pub fn seeded() -> Self {
        let authors = Table::numbered(SEED_AUTHORS, |id, name| Author {
            id,
            name: (*name).to_owned(),
        });
        let books = Table::numbered(SEED_BOOKS, |id, (name, author_id)| Book {
            id,
            name: (*name).to_owned(),
            author_id: *author_id,
        });
        Self {
            books: RwLock::new(books),
            authors: RwLock::new(authors),
        }
    }

    pub fn find_book(&self, id: i32) -> Option<Book> {
        read(&self.books).rows.iter().find(|b| b.id == id).cloned()
    }

    pub fn find_author(&self, id: i32) -> Option<Author> {
        read(&self.authors).rows.iter().find(|a| a.id == id).cloned()
    }

    pub fn books(&self) -> Vec<Book> {
        read(&self.books).rows.clone()
    }

    pub fn authors(&self) -> Vec<Author> {
        read(&self.authors).rows.clone()
    }

    /// All books written by `author_id`, in insertion order.
    pub fn books_by_author(&self, author_id: i32) -> Vec<Book> {
        read(&self.books)
            .rows
            .iter()
            .filter(|b| b.author_id == author_id)
            .cloned()
            .collect()
    }

    /// Batched form of [`Self::books_by_author`], grouping in a single scan.
    ///
    /// Every requested id gets an entry, authors without books map to an
    /// empty list.
    pub fn books_by_authors(&self, author_ids: &[i32]) -> HashMap<i32, Vec<Book>> {
        let mut books: HashMap<i32, Vec<Book>> = author_ids
            .iter()
            .map(|id| (*id, Vec::new()))
            .collect();
        for book in &read(&self.books).rows {
            if let Some(list) = books.get_mut(&book.author_id) {
                list.push(book.clone());
            }
        }
        books
    }

    /// Batched form of [`Self::find_author`]. Unknown ids are left out.
    pub fn authors_by_ids(&self, ids: &[i32]) -> HashMap<i32, Author> {
        read(&self.authors)
            .rows
            .iter()
            .filter(|a| ids.contains(&a.id))
            .map(|a| (a.id, a.clone()))
            .collect()
    }

    pub fn append_book(
        &self,
        name: impl Into<String>,
        author_id: i32,
    ) -> Result<Book, StoreError> {
        let name = name.into();
        let book = write(&self.books)
            .push_with(|id| Book {
                id,
                name,
                author_id,
            })
            .cloned()
            .ok_or(StoreError::IdsExhausted("books"))?;
        tracing::info!(id = book.id, author_id, "added book `{}`", book.name);
        Ok(book)
    }

    pub fn append_author(&self, name: impl Into<String>) -> Result<Author, StoreError> {
        let name = name.into();
        let author = write(&self.authors)
            .push_with(|id| Author { id, name })
            .cloned()
            .ok_or(StoreError::IdsExhausted("authors"))?;
        tracing::info!(id = author.id, "added author `{}`", author.name);
        Ok(author)
    }
}
