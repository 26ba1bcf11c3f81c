//! Book storage
//!
//! The list path runs in three steps:
//!
//! 1. a [`ListQuerySpec`] (page, page size, sort key, safelist) is validated
//!    into a [`ValidatedListQuery`], collecting failures in a
//!    [`ValidationSet`](crate::validation::ValidationSet)
//! 2. [`SearchQueryBuilder`] turns [`SearchCriteria`] and the validated query
//!    into parameterized SQL
//! 3. a [`BookRepository`] executes it and returns the page of books
//!
//! Only a `ValidatedListQuery` exposes sort column, direction, limit and
//! offset, so an unvalidated sort key can never reach the SQL text.
//!
//! # Example
//!
//! ```rust,no_run
//! use book_service::repository::{
//!     BookRepository, InMemoryBookRepository, ListQuerySpec, SearchCriteria,
//! };
//! use book_service::validation::ValidationSet;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let repo = InMemoryBookRepository::new();
//! let mut v = ValidationSet::new();
//!
//! if let Some(query) = ListQuerySpec::new(["id", "-year"])
//!     .with_page(2)
//!     .validate_into(&mut v)
//! {
//!     let books = repo.list(&SearchCriteria::new("dune", ["sci-fi"]), &query).await?;
//!     println!("{} books", books.len());
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod memory;
mod pagination;
mod postgres;
mod search;
mod traits;

pub use error::{RepositoryError, RepositoryOperation};
pub use memory::InMemoryBookRepository;
pub use pagination::{
    ListQuerySpec, SortDirection, ValidatedListQuery, DEFAULT_PAGE, DEFAULT_PAGE_SIZE,
    DEFAULT_SORT, MAX_PAGE, MAX_PAGE_SIZE,
};
pub use postgres::PgBookRepository;
pub use search::{SearchCriteria, SearchQuery, SearchQueryBuilder};
pub use traits::{BookRepository, RepositoryResult};
