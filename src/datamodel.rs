/// A book as held by the [`RecordStore`](crate::store::RecordStore).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: i32,
    pub name: String,
    /// Id of the author, not checked against the authors collection.
    pub author_id: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub id: i32,
    pub name: String,
}

/// Authors every seeded store starts out with, in id order.
pub static SEED_AUTHORS: &[&str] = &["J. K. Rowling", "J. R. R. Tolkien", "Brent Weeks"];

/// Seeded books as `(name, author_id)`, in id order.
pub static SEED_BOOKS: &[(&str, i32)] = &[
    ("Harry Potter and the Chamber of Secrets", 1),
    ("Harry Potter and the Prisoner of Azkaban", 1),
    ("Harry Potter and the Goblet of Fire", 1),
    ("The Fellowship of the Ring", 2),
    ("The Two Towers", 2),
    ("The Return of the King", 2),
    ("The Way of Shadows", 3),
    ("Beyond the Shadows", 3),
];
