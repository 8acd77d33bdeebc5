use std::sync::Arc;

use async_graphql::{ComplexObject, Context, Object, Result, SimpleObject};

use crate::datamodel;
use crate::store::RecordStore;

use super::loaders::Loaders;
use super::probe::ResolutionProbe;

#[derive(SimpleObject)]
#[graphql(complex)]
pub struct Book {
    id: i32,
    name: String,
    author_id: i32,
}

#[ComplexObject]
impl Book {
    /// The author referenced by `authorId`, null if there is no such author.
    async fn author(&self, ctx: &Context<'_>) -> Result<Option<Author>> {
        ctx.data_unchecked::<Arc<ResolutionProbe>>().book_author();
        let author = ctx.load_author(self.author_id).await?;
        Ok(author.map(Author::from))
    }
}

impl From<datamodel::Book> for Book {
    fn from(book: datamodel::Book) -> Self {
        Self {
            id: book.id,
            name: book.name,
            author_id: book.author_id,
        }
    }
}

/// Author of book
#[derive(SimpleObject)]
#[graphql(complex)]
pub struct Author {
    id: i32,
    name: String,
}

#[ComplexObject]
impl Author {
    /// Every book whose `authorId` is this author's id.
    async fn books(&self, ctx: &Context<'_>) -> Result<Vec<Book>> {
        ctx.data_unchecked::<Arc<ResolutionProbe>>().author_books();
        let books = ctx.load_books(self.id).await?;
        Ok(books.into_iter().map(Book::from).collect())
    }
}

impl From<datamodel::Author> for Author {
    fn from(author: datamodel::Author) -> Self {
        Self {
            id: author.id,
            name: author.name,
        }
    }
}

fn store<'a>(ctx: &Context<'a>) -> &'a RecordStore {
    ctx.data_unchecked::<Arc<RecordStore>>()
}

pub struct LibraryQuery;

/// root query
#[Object(name = "Query")]
impl LibraryQuery {
    /// singular book
    async fn book(&self, ctx: &Context<'_>, id: Option<i32>) -> Option<Book> {
        let id = id?;
        store(ctx).find_book(id).map(Book::from)
    }

    /// list of books
    async fn books(&self, ctx: &Context<'_>) -> Vec<Book> {
        store(ctx).books().into_iter().map(Book::from).collect()
    }

    /// Single author
    async fn author(&self, ctx: &Context<'_>, id: Option<i32>) -> Option<Author> {
        let id = id?;
        store(ctx).find_author(id).map(Author::from)
    }

    /// list of authors
    async fn authors(&self, ctx: &Context<'_>) -> Vec<Author> {
        store(ctx).authors().into_iter().map(Author::from).collect()
    }
}

pub struct LibraryMutation;

#[Object(name = "Mutation")]
impl LibraryMutation {
    /// add a book
    async fn add_book(&self, ctx: &Context<'_>, name: String, author_id: i32) -> Result<Book> {
        // the author id is not checked against the authors
        Ok(store(ctx).append_book(name, author_id)?.into())
    }

    /// add an author
    async fn add_author(&self, ctx: &Context<'_>, name: String) -> Result<Author> {
        Ok(store(ctx).append_author(name)?.into())
    }
}
