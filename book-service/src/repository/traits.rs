//! Repository trait definitions
//!
//! Async methods use return-position `impl Future` so implementations can be
//! written with plain `async fn`.

use std::future::Future;

use super::error::RepositoryError;
use super::pagination::ValidatedListQuery;
use super::search::SearchCriteria;
use crate::models::{Book, NewBook};

/// Result type for repository operations
pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;

/// Storage for books
///
/// Implemented by [`PgBookRepository`](super::PgBookRepository) against
/// PostgreSQL and by [`InMemoryBookRepository`](super::InMemoryBookRepository)
/// for tests.
pub trait BookRepository: Send + Sync {
    /// Insert a book; the store assigns `id`, `created_at` and `version`
    fn create(&self, book: NewBook) -> impl Future<Output = RepositoryResult<Book>> + Send;

    /// Fetch one book
    ///
    /// # Errors
    ///
    /// `NotFound` when `id` is below 1 or no row matches.
    fn get_by_id(&self, id: i64) -> impl Future<Output = RepositoryResult<Book>> + Send;

    /// Books matching `criteria`, sorted and paginated by `query`
    ///
    /// No matching rows is an empty `Vec`, never an error. Any failure aborts
    /// the whole call; partial results are never returned.
    fn list(
        &self,
        criteria: &SearchCriteria,
        query: &ValidatedListQuery,
    ) -> impl Future<Output = RepositoryResult<Vec<Book>>> + Send;

    /// Delete one book
    ///
    /// # Errors
    ///
    /// `NotFound` when `id` is below 1 or no row was deleted.
    fn delete(&self, id: i64) -> impl Future<Output = RepositoryResult<()>> + Send;

    /// Check the store can serve queries
    fn ping(&self) -> impl Future<Output = RepositoryResult<()>> + Send;
}
