//! HTTP routes for the book service
//!
//! | Method | Path              | Handler                     |
//! |--------|-------------------|-----------------------------|
//! | GET    | `/v1/books`       | [`books::list_books`]       |
//! | POST   | `/v1/books`       | [`books::create_book`]      |
//! | GET    | `/v1/books/{id}`  | [`books::show_book`]        |
//! | GET    | `/health`         | [`health`](crate::health::health) |
//! | GET    | `/ready`          | [`readiness`](crate::health::readiness) |

pub mod books;
mod query;
mod response;

use axum::{routing::get, Router};

use crate::health::{health, readiness};
use crate::repository::BookRepository;
use crate::state::AppState;

pub use query::ListBooksParams;
pub use response::{BookResponse, BooksResponse};

/// Router with every book and health route bound to `state`
pub fn router<R>(state: AppState<R>) -> Router
where
    R: BookRepository + 'static,
{
    Router::new()
        .route(
            "/v1/books",
            get(books::list_books::<R>).post(books::create_book::<R>),
        )
        .route("/v1/books/{id}", get(books::show_book::<R>))
        .route("/health", get(health::<R>))
        .route("/ready", get(readiness::<R>))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::Book;
    use crate::repository::InMemoryBookRepository;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use chrono::Utc;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Router {
        let titles = [
            ("The Left Hand of Darkness", 1969, vec!["sci-fi", "drama"]),
            ("Dune", 1965, vec!["sci-fi"]),
            ("The Big Sleep", 1939, vec!["noir"]),
            ("Kindred", 1979, vec!["sci-fi", "drama"]),
        ];
        let books = titles
            .into_iter()
            .enumerate()
            .map(|(i, (title, year, genres))| Book {
                id: i as i64 + 1,
                created_at: Utc::now(),
                title: title.to_string(),
                year,
                genres: genres.into_iter().map(String::from).collect(),
                version: 1,
            })
            .collect();

        router(AppState::new(
            Config::default(),
            InMemoryBookRepository::with_books(books),
        ))
    }

    async fn get(app: Router, uri: &str) -> Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn post_json(app: Router, uri: &str, body: &str) -> Response {
        app.oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn ids(body: &Value) -> Vec<i64> {
        body["books"]
            .as_array()
            .unwrap()
            .iter()
            .map(|b| b["id"].as_i64().unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_list_defaults() {
        let response = get(app(), "/v1/books").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(ids(&body), vec![1, 2, 3, 4]);
        assert!(body["books"][0].get("created_at").is_none());
    }

    #[tokio::test]
    async fn test_list_filters_and_sorts() {
        let response = get(app(), "/v1/books?genres=drama,%20sci-fi&sort=-year").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(ids(&body_json(response).await), vec![4, 1]);

        let response = get(app(), "/v1/books?title=the&sort=title").await;
        assert_eq!(ids(&body_json(response).await), vec![3, 1]);
    }

    #[tokio::test]
    async fn test_list_pages() {
        let response = get(app(), "/v1/books?page=2&page_size=3").await;
        assert_eq!(ids(&body_json(response).await), vec![4]);

        let response = get(app(), "/v1/books?page=9&page_size=3").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "books": [] }));
    }

    #[tokio::test]
    async fn test_list_repeated_parameter_uses_first_value() {
        let response = get(app(), "/v1/books?page=1&page=2&page_size=2").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(ids(&body_json(response).await), vec![1, 2]);

        let response = get(app(), "/v1/books?page=2&page=1&page_size=2").await;
        assert_eq!(ids(&body_json(response).await), vec![3, 4]);
    }

    #[tokio::test]
    async fn test_list_reports_every_invalid_parameter() {
        let response = get(app(), "/v1/books?page=0&page_size=abc&sort=rating").await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body_json(response).await,
            json!({
                "error": {
                    "page": "must be greater than zero",
                    "page_size": "must be an integer value",
                    "sort": "invalid sort value"
                }
            })
        );
    }

    #[tokio::test]
    async fn test_list_rejects_oversized_values() {
        let response = get(app(), "/v1/books?page=10000001&page_size=101").await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            body_json(response).await,
            json!({
                "error": {
                    "page": "must be a maximum of 10 million",
                    "page_size": "must be a maximum of 100"
                }
            })
        );
    }

    #[tokio::test]
    async fn test_show_book() {
        let response = get(app(), "/v1/books/2").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["book"]["title"], "Dune");
    }

    #[tokio::test]
    async fn test_show_missing_or_invalid_id_is_not_found() {
        for uri in ["/v1/books/99", "/v1/books/0", "/v1/books/abc"] {
            let response = get(app(), uri).await;
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
            assert_eq!(
                body_json(response).await,
                json!({ "error": "the requested resource could not be found" })
            );
        }
    }

    #[tokio::test]
    async fn test_create_book() {
        let app = app();
        let response = post_json(
            app.clone(),
            "/v1/books",
            r#"{"title":"Parable of the Sower","year":1993,"genres":["sci-fi"]}"#,
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = body_json(response).await;
        assert_eq!(body["book"]["id"], 5);
        assert_eq!(body["book"]["version"], 1);

        let response = get(app, "/v1/books/5").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_create_validation_failure() {
        let response = post_json(app(), "/v1/books", r#"{"year":1800,"genres":["a","a"]}"#).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body = body_json(response).await;
        assert_eq!(body["error"]["title"], "must be provided");
        assert_eq!(body["error"]["year"], "must be greater than 1888");
        assert_eq!(body["error"]["genres"], "must not contain duplicate values");
    }

    #[tokio::test]
    async fn test_create_malformed_json_is_bad_request() {
        let response = post_json(app(), "/v1/books", r#"{"title": "#).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(response).await["error"].is_string());
    }

    #[tokio::test]
    async fn test_health_and_ready() {
        let response = get(app(), "/health").await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "book-service");

        let response = get(app(), "/ready").await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["ready"], true);
        assert_eq!(body["dependencies"]["database"]["healthy"], true);
    }
}
