use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::Arc;

use async_graphql::dataloader::{DataLoader, Loader};
use async_graphql::{Context, Result};

use crate::datamodel;
use crate::store::RecordStore;

/// Related-record lookups, batched per selection level through the
/// [`DataLoader`]s registered on the schema.
pub trait Loaders {
    async fn load_author(&self, id: i32) -> Result<Option<datamodel::Author>>;
    async fn load_books(&self, author_id: i32) -> Result<Vec<datamodel::Book>>;
}

impl Loaders for Context<'_> {
    async fn load_author(&self, id: i32) -> Result<Option<datamodel::Author>> {
        let author = self
            .data_unchecked::<DataLoader<AuthorById>>()
            .load_one(id)
            .await?;
        Ok(author)
    }

    async fn load_books(&self, author_id: i32) -> Result<Vec<datamodel::Book>> {
        let books = self
            .data_unchecked::<DataLoader<BooksByAuthor>>()
            .load_one(author_id)
            .await?;
        Ok(books.unwrap_or_default())
    }
}

pub struct BooksByAuthor {
    store: Arc<RecordStore>,
}

impl BooksByAuthor {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }
}

impl Loader<i32> for BooksByAuthor {
    type Value = Vec<datamodel::Book>;
    type Error = Infallible;

    fn load(
        &self,
        keys: &[i32],
    ) -> impl Future<Output = Result<HashMap<i32, Self::Value>, Self::Error>> + Send {
        async move {
            tracing::debug!(?keys, "resolving books by author");
            Ok(self.store.books_by_authors(keys))
        }
    }
}

pub struct AuthorById {
    store: Arc<RecordStore>,
}

impl AuthorById {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }
}

impl Loader<i32> for AuthorById {
    type Value = datamodel::Author;
    type Error = Infallible;

    fn load(
        &self,
        keys: &[i32],
    ) -> impl Future<Output = Result<HashMap<i32, Self::Value>, Self::Error>> + Send {
        async move {
            tracing::debug!(?keys, "resolving authors by id");
            Ok(self.store.authors_by_ids(keys))
        }
    }
}
