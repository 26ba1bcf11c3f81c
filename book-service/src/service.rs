//! Book operations shared by the HTTP handlers
//!
//! Validation happens here, before any storage call. A request whose
//! validation set holds errors never reaches the repository.

use crate::error::{Error, Result};
use crate::models::{Book, NewBook};
use crate::repository::{BookRepository, ListQuerySpec, SearchCriteria};
use crate::validation::ValidationSet;

/// Sort keys accepted by the book listing; a leading `-` sorts descending
pub const BOOK_SORT_SAFELIST: [&str; 6] = ["id", "title", "year", "-id", "-title", "-year"];

/// Book use cases over a [`BookRepository`]
#[derive(Debug, Clone)]
pub struct BookService<R> {
    repository: R,
}

impl<R: BookRepository> BookService<R> {
    /// Service over `repository`
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// The underlying repository
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Validate and store a new book
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] with every failing field when `book` is invalid;
    /// otherwise any repository failure.
    pub async fn create_book(&self, book: NewBook) -> Result<Book> {
        let mut v = ValidationSet::new();
        book.validate(&mut v);
        v.into_result()?;

        let created = self.repository.create(book).await?;
        tracing::info!(book_id = created.id, "Book created");
        Ok(created)
    }

    /// Fetch one book by id
    pub async fn get_book(&self, id: i64) -> Result<Book> {
        Ok(self.repository.get_by_id(id).await?)
    }

    /// Delete one book by id
    pub async fn delete_book(&self, id: i64) -> Result<()> {
        self.repository.delete(id).await?;
        tracing::info!(book_id = id, "Book deleted");
        Ok(())
    }

    /// List books matching `criteria`, paged and sorted by `spec`
    ///
    /// `v` may already hold errors recorded while reading request input;
    /// they are reported together with any list spec failures.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] when `v` or `spec` has any failure; otherwise
    /// any repository failure.
    pub async fn list_books(
        &self,
        criteria: SearchCriteria,
        spec: ListQuerySpec,
        mut v: ValidationSet,
    ) -> Result<Vec<Book>> {
        let query = spec.validate_into(&mut v);

        match (query, v.is_valid()) {
            (Some(query), true) => Ok(self.repository.list(&criteria, &query).await?),
            _ => Err(Error::Validation(v.into_errors())),
        }
    }

    /// Whether the underlying store answers queries
    pub async fn ping(&self) -> Result<()> {
        Ok(self.repository.ping().await?)
    }
}
