use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::validation::{unique, ValidationSet};

/// Earliest publication year accepted for a new book
pub const MIN_YEAR: i32 = 1888;

/// Longest title accepted, in bytes
pub const MAX_TITLE_BYTES: usize = 500;

/// Most genres a single book may carry
pub const MAX_GENRES: usize = 5;

/// A stored book
///
/// `version` is bumped by the store on every update. `created_at` is never
/// serialized into responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Book {
    pub id: i64,
    #[serde(skip_serializing)]
    pub created_at: DateTime<Utc>,
    pub title: String,
    pub year: i32,
    pub genres: Vec<String>,
    pub version: i64,
}

/// Payload for creating a book
///
/// Missing fields deserialize to their empty value so that validation, not
/// JSON decoding, reports them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewBook {
    pub title: String,
    pub year: i32,
    pub genres: Option<Vec<String>>,
}

impl NewBook {
    /// Record every rule this payload breaks
    pub fn validate(&self, v: &mut ValidationSet) {
        self.validate_at(v, Utc::now().year());
    }

    fn validate_at(&self, v: &mut ValidationSet, current_year: i32) {
        v.check(!self.title.is_empty(), "title", "must be provided");
        v.check(
            self.title.len() <= MAX_TITLE_BYTES,
            "title",
            "must not be more than 500 bytes long",
        );

        v.check(self.year != 0, "year", "must be provided");
        v.check(self.year >= MIN_YEAR, "year", "must be greater than 1888");
        v.check(self.year <= current_year, "year", "must not be in the future");

        match &self.genres {
            None => v.add_error("genres", "must be provided"),
            Some(genres) => {
                v.check(!genres.is_empty(), "genres", "must contain at least 1 genre");
                v.check(
                    genres.len() <= MAX_GENRES,
                    "genres",
                    "must not contain more than 5 genres",
                );
                v.check(unique(genres), "genres", "must not contain duplicate values");
            }
        }
    }

    /// Genres, empty when none were supplied
    #[must_use]
    pub fn genres(&self) -> &[String] {
        self.genres.as_deref().unwrap_or_default()
    }
}
