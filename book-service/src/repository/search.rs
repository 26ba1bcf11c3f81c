//! Parameterized search query construction
//!
//! Filter values (title text, genres, limit, offset) always travel as bind
//! parameters. The only text spliced into the SQL is the sort column and
//! direction taken from a [`ValidatedListQuery`], i.e. a safelist entry.
//!
//! # Example
//!
//! ```rust
//! use book_service::repository::{ListQuerySpec, SearchCriteria, SearchQueryBuilder};
//! use book_service::validation::ValidationSet;
//!
//! let mut v = ValidationSet::new();
//! let query = ListQuerySpec::new(["id", "-year"])
//!     .with_sort("-year")
//!     .validate_into(&mut v)
//!     .expect("valid spec");
//!
//! let criteria = SearchCriteria::new("left hand", ["sci-fi"]);
//! let search = SearchQueryBuilder::new(&criteria, &query).build();
//!
//! assert!(search.sql.contains("ORDER BY year DESC, id ASC"));
//! assert_eq!(search.title, "left hand");
//! assert_eq!(search.genres, vec!["sci-fi".to_string()]);
//! ```

use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::QueryAs;

use super::pagination::ValidatedListQuery;
use crate::models::Book;

/// Columns selected for every book row, in `Book` field order
pub(crate) const BOOK_COLUMNS: &str = "id, created_at, title, year, genres, version";

/// Free-text and genre filters for a list request
///
/// An empty title or an empty genre list applies no filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchCriteria {
    /// Text matched against titles token by token
    pub title: String,
    /// Genres every returned book must carry
    pub genres: Vec<String>,
}

impl SearchCriteria {
    /// Criteria from a title filter and required genres
    ///
    /// Repeated genres are collapsed; order is irrelevant to containment.
    pub fn new<I, S>(title: impl Into<String>, genres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut genres: Vec<String> = genres.into_iter().map(Into::into).collect();
        genres.sort();
        genres.dedup();
        Self {
            title: title.into(),
            genres,
        }
    }

    /// True when neither filter is active
    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        self.title.is_empty() && self.genres.is_empty()
    }
}

/// A built search query and its bind parameters, in `$1..$4` order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// SQL text with `$1` title, `$2` genres, `$3` limit, `$4` offset
    pub sql: String,
    /// `$1`
    pub title: String,
    /// `$2`
    pub genres: Vec<String>,
    /// `$3`
    pub limit: i64,
    /// `$4`
    pub offset: i64,
}

impl SearchQuery {
    /// sqlx query with every parameter bound, ready to execute
    pub fn as_query(&self) -> QueryAs<'_, Postgres, Book, PgArguments> {
        sqlx::query_as::<_, Book>(&self.sql)
            .bind(&self.title)
            .bind(&self.genres)
            .bind(self.limit)
            .bind(self.offset)
    }
}

/// Builds the book search query from criteria and a validated list query
#[derive(Debug, Clone, Copy)]
pub struct SearchQueryBuilder<'a> {
    criteria: &'a SearchCriteria,
    query: &'a ValidatedListQuery,
}

impl<'a> SearchQueryBuilder<'a> {
    /// Builder over the given criteria and list query
    #[must_use]
    pub fn new(criteria: &'a SearchCriteria, query: &'a ValidatedListQuery) -> Self {
        Self { criteria, query }
    }

    /// Produce the SQL text and bind values; performs no I/O
    #[must_use]
    pub fn build(&self) -> SearchQuery {
        // id is appended as a tiebreak so page boundaries stay stable
        let sql = format!(
            "SELECT {columns} \
             FROM books \
             WHERE (to_tsvector('simple', title) @@ plainto_tsquery('simple', $1) OR $1 = '') \
             AND (genres @> $2 OR $2 = '{{}}') \
             ORDER BY {column} {direction}, id ASC \
             LIMIT $3 OFFSET $4",
            columns = BOOK_COLUMNS,
            column = self.query.sort_column(),
            direction = self.query.sort_direction().as_sql(),
        );

        SearchQuery {
            sql,
            title: self.criteria.title.clone(),
            genres: self.criteria.genres.clone(),
            limit: self.query.limit(),
            offset: self.query.offset(),
        }
    }
}

/// Lowercased word tokens of `text`, approximating the `simple` text search
/// configuration (no stemming, no stop words)
///
/// A hyphenated word yields the whole compound followed by its parts, so
/// `Left-Hand` gives `left-hand`, `left` and `hand`.
pub(crate) fn simple_tokens(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    for word in text.split(|c: char| !c.is_alphanumeric() && c != '-') {
        let parts: Vec<String> = word
            .split('-')
            .filter(|part| !part.is_empty())
            .map(str::to_lowercase)
            .collect();
        if parts.len() > 1 {
            tokens.push(parts.join("-"));
        }
        tokens.extend(parts);
    }
    tokens
}

/// Whether `title` satisfies the title filter `filter`
///
/// An empty filter matches everything. Otherwise every filter token must be
/// among the title's tokens; a filter with no tokens matches nothing.
pub(crate) fn title_matches(title: &str, filter: &str) -> bool {
    if filter.is_empty() {
        return true;
    }
    let wanted = simple_tokens(filter);
    if wanted.is_empty() {
        return false;
    }
    let present = simple_tokens(title);
    wanted.iter().all(|token| present.contains(token))
}

/// Whether `stored` contains every genre in `required`
pub(crate) fn genres_contain(stored: &[String], required: &[String]) -> bool {
    required.iter().all(|genre| stored.contains(genre))
}
