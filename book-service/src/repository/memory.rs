//! In-process book repository
//!
//! Mirrors the PostgreSQL list semantics (token title match, genre
//! containment, safelisted sort with an ascending id tiebreak, limit/offset)
//! so the list path can be exercised without a database.
//!
//! Titles sort by byte order, not by the database collation, so mixed-case
//! or accented titles may order differently than they would in PostgreSQL.

use std::cmp::Ordering;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use super::error::{RepositoryError, RepositoryOperation};
use super::pagination::{SortDirection, ValidatedListQuery};
use super::search::{genres_contain, title_matches, SearchCriteria};
use super::traits::{BookRepository, RepositoryResult};
use crate::models::{Book, NewBook};

#[derive(Debug, Default)]
struct Store {
    last_id: i64,
    books: Vec<Book>,
}

/// Book repository held in memory behind an async `RwLock`
///
/// Clones share the same rows.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBookRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryBookRepository {
    /// Empty repository
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository pre-loaded with `books`, kept as given
    ///
    /// Ids assigned by later `create` calls continue after the largest id.
    #[must_use]
    pub fn with_books(books: Vec<Book>) -> Self {
        let last_id = books.iter().map(|b| b.id).max().unwrap_or(0);
        Self {
            store: Arc::new(RwLock::new(Store { last_id, books })),
        }
    }

    /// Number of stored books
    pub async fn len(&self) -> usize {
        self.store.read().await.books.len()
    }

    /// True when no books are stored
    pub async fn is_empty(&self) -> bool {
        self.store.read().await.books.is_empty()
    }
}

// Columns of the books table, as a sort key would name them
const SORTABLE_COLUMNS: [&str; 5] = ["id", "title", "year", "version", "created_at"];

fn compare_column(a: &Book, b: &Book, column: &str) -> Option<Ordering> {
    let ordering = match column {
        "id" => a.id.cmp(&b.id),
        "title" => a.title.cmp(&b.title),
        "year" => a.year.cmp(&b.year),
        "version" => a.version.cmp(&b.version),
        "created_at" => a.created_at.cmp(&b.created_at),
        _ => return None,
    };
    Some(ordering)
}

fn to_index(value: i64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}

impl BookRepository for InMemoryBookRepository {
    async fn create(&self, book: NewBook) -> RepositoryResult<Book> {
        let mut store = self.store.write().await;
        store.last_id += 1;

        let created = Book {
            id: store.last_id,
            created_at: Utc::now(),
            genres: book.genres().to_vec(),
            title: book.title,
            year: book.year,
            version: 1,
        };
        store.books.push(created.clone());
        Ok(created)
    }

    async fn get_by_id(&self, id: i64) -> RepositoryResult<Book> {
        self.store
            .read()
            .await
            .books
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found("Book", id.to_string()))
    }

    async fn list(
        &self,
        criteria: &SearchCriteria,
        query: &ValidatedListQuery,
    ) -> RepositoryResult<Vec<Book>> {
        let column = query.sort_column();
        if !SORTABLE_COLUMNS.contains(&column) {
            return Err(RepositoryError::execution(
                RepositoryOperation::List,
                format!("column \"{column}\" does not exist"),
            ));
        }

        let store = self.store.read().await;
        let mut matched: Vec<&Book> = store
            .books
            .iter()
            .filter(|b| title_matches(&b.title, &criteria.title))
            .filter(|b| genres_contain(&b.genres, &criteria.genres))
            .collect();

        let descending = query.sort_direction() == SortDirection::Descending;
        matched.sort_by(|a, b| {
            let primary = compare_column(a, b, column).unwrap_or(Ordering::Equal);
            let primary = if descending { primary.reverse() } else { primary };
            primary.then_with(|| a.id.cmp(&b.id))
        });

        Ok(matched
            .into_iter()
            .skip(to_index(query.offset()))
            .take(to_index(query.limit()))
            .cloned()
            .collect())
    }

    async fn delete(&self, id: i64) -> RepositoryResult<()> {
        let mut store = self.store.write().await;
        let before = store.books.len();
        store.books.retain(|b| b.id != id);

        if store.books.len() == before {
            return Err(RepositoryError::not_found("Book", id.to_string())
                .with_operation(RepositoryOperation::Delete));
        }
        Ok(())
    }

    async fn ping(&self) -> RepositoryResult<()> {
        Ok(())
    }
}
