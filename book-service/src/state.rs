//! Application state shared across handlers

use std::sync::Arc;

use crate::config::Config;
use crate::repository::BookRepository;
use crate::service::BookService;

/// Application state shared across handlers
///
/// Generic over the repository so handlers run unchanged against
/// PostgreSQL or the in-memory store.
pub struct AppState<R> {
    config: Arc<Config>,
    books: Arc<BookService<R>>,
}

// Derived Clone would require `R: Clone`
impl<R> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            books: Arc::clone(&self.books),
        }
    }
}

impl<R: BookRepository> AppState<R> {
    /// State over the given configuration and repository
    pub fn new(config: Config, repository: R) -> Self {
        Self {
            config: Arc::new(config),
            books: Arc::new(BookService::new(repository)),
        }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Book operations
    pub fn books(&self) -> &BookService<R> {
        &self.books
    }
}
