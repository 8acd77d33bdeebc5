//! A small GraphQL API over in-memory books and authors.
//!
//! The [`store::RecordStore`] holds both collections; the [`server`] module
//! exposes them as a schema whose relational fields (`Book.author`,
//! `Author.books`) are resolved only when a query asks for them.

pub mod datamodel;
pub mod server;
pub mod store;

#[cfg(test)]
mod client;
