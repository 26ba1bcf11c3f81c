//! Book endpoint handlers

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::Json;

use super::query::ListBooksParams;
use super::response::{BookResponse, BooksResponse};
use crate::error::{Error, Result};
use crate::models::NewBook;
use crate::repository::{BookRepository, RepositoryError};
use crate::state::AppState;
use crate::validation::ValidationSet;

/// `GET /v1/books`
pub async fn list_books<R: BookRepository>(
    State(state): State<AppState<R>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<BooksResponse> {
    let mut v = ValidationSet::new();
    let (criteria, spec) = ListBooksParams::from_pairs(pairs).into_parts(&mut v);

    let books = state.books().list_books(criteria, spec, v).await?;
    Ok(BooksResponse::new(books))
}

/// `GET /v1/books/{id}`
///
/// An id that is not a positive integer is reported as not found.
pub async fn show_book<R: BookRepository>(
    State(state): State<AppState<R>>,
    Path(id): Path<String>,
) -> Result<BookResponse> {
    let id = parse_id(&id)?;
    let book = state.books().get_book(id).await?;
    Ok(BookResponse::ok(book))
}

/// `POST /v1/books`
pub async fn create_book<R: BookRepository>(
    State(state): State<AppState<R>>,
    payload: std::result::Result<Json<NewBook>, JsonRejection>,
) -> Result<BookResponse> {
    let Json(book) = payload.map_err(|rejection| Error::BadRequest(rejection.body_text()))?;
    let book = state.books().create_book(book).await?;
    Ok(BookResponse::created(book))
}

fn parse_id(raw: &str) -> Result<i64> {
    match raw.parse::<i64>() {
        Ok(id) if id >= 1 => Ok(id),
        _ => Err(RepositoryError::not_found("Book", raw).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42").unwrap(), 42);
        for raw in ["0", "-1", "abc", "", "9223372036854775808"] {
            let err = parse_id(raw).unwrap_err();
            assert_eq!(err.kind(), crate::error::ErrorKind::NotFound, "{raw}");
        }
    }
}
