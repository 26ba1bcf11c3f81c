//! Domain records

mod book;

pub use book::{Book, NewBook, MAX_GENRES, MAX_TITLE_BYTES, MIN_YEAR};
