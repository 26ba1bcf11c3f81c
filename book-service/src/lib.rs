//! # book-service
//!
//! Book catalogue HTTP service backed by PostgreSQL.
//!
//! Listing supports a free-text title filter, genre containment, a sort key
//! restricted to a safelist and bounded pagination. Request parameters are
//! validated into a [`ValidationSet`](validation::ValidationSet) before any
//! SQL is built, and every failing field is reported in one response.
//!
//! ## Example
//!
//! ```rust,no_run
//! use book_service::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::load()?;
//!     init_tracing(&config)?;
//!
//!     let pool = create_pool(&config.database).await?;
//!     run_migrations(&pool).await?;
//!
//!     let state = AppState::new(config.clone(), PgBookRepository::new(pool));
//!     Server::new(config).serve(router(state)).await
//! }
//! ```

pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod health;
pub mod models;
pub mod observability;
pub mod repository;
pub mod server;
pub mod service;
pub mod state;
pub mod validation;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{Config, DatabaseConfig, ServiceConfig};
    pub use crate::database::{create_pool, run_migrations};
    pub use crate::error::{Error, ErrorKind, Result};
    pub use crate::handlers::router;
    pub use crate::health::{health, readiness};
    pub use crate::models::{Book, NewBook};
    pub use crate::observability::init_tracing;
    pub use crate::repository::{
        BookRepository, InMemoryBookRepository, ListQuerySpec, PgBookRepository,
        SearchCriteria, SearchQueryBuilder, ValidatedListQuery,
    };
    pub use crate::server::Server;
    pub use crate::service::{BookService, BOOK_SORT_SAFELIST};
    pub use crate::state::AppState;
    pub use crate::validation::ValidationSet;
}
