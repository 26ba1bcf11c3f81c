//! Response envelopes for the book endpoints

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::models::Book;

/// `{"books": [...]}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BooksResponse {
    pub books: Vec<Book>,
}

impl BooksResponse {
    pub fn new(books: Vec<Book>) -> Self {
        Self { books }
    }
}

impl IntoResponse for BooksResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// `{"book": {...}}`, sent with a configurable status
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookResponse {
    pub book: Book,
    #[serde(skip)]
    status: StatusCode,
}

impl BookResponse {
    /// 200 OK envelope
    pub fn ok(book: Book) -> Self {
        Self {
            book,
            status: StatusCode::OK,
        }
    }

    /// 201 Created envelope
    pub fn created(book: Book) -> Self {
        Self {
            book,
            status: StatusCode::CREATED,
        }
    }
}

impl IntoResponse for BookResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}
