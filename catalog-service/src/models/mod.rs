pub mod book;
pub mod genre;

pub use book::{Book, BookSummary};
pub use genre::Genre;
