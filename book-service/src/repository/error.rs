//! Repository error types
//!
//! Every repository failure carries the operation that was running and an
//! [`ErrorKind`], so callers branch on the kind rather than on error identity.
//!
//! # Example
//!
//! ```rust
//! use book_service::error::ErrorKind;
//! use book_service::repository::RepositoryError;
//!
//! let error = RepositoryError::not_found("Book", "42");
//! assert_eq!(error.kind, ErrorKind::NotFound);
//! assert_eq!(error.entity_id.as_deref(), Some("42"));
//! ```

use std::fmt;

use crate::error::ErrorKind;

/// Operation being performed when the repository error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepositoryOperation {
    /// Inserting a new book
    Create,
    /// Point lookup by id
    GetById,
    /// Filtered, sorted, paginated listing
    List,
    /// Deleting a book by id
    Delete,
    /// Connectivity probe
    Ping,
}

impl fmt::Display for RepositoryOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => write!(f, "create"),
            Self::GetById => write!(f, "get_by_id"),
            Self::List => write!(f, "list"),
            Self::Delete => write!(f, "delete"),
            Self::Ping => write!(f, "ping"),
        }
    }
}

/// Structured repository error with operation context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryError {
    /// The operation being performed when the error occurred
    pub operation: RepositoryOperation,
    /// The category of error
    pub kind: ErrorKind,
    /// Human-readable error message (may contain store detail; never sent to clients)
    pub message: String,
    /// The type of entity involved
    pub entity_type: Option<String>,
    /// The id of the entity involved
    pub entity_id: Option<String>,
}

impl RepositoryError {
    /// Create a new repository error
    pub fn new(operation: RepositoryOperation, kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            operation,
            kind,
            message: message.into(),
            entity_type: None,
            entity_id: None,
        }
    }

    /// Create a "not found" error for a point lookup
    pub fn not_found(entity_type: impl Into<String>, entity_id: impl Into<String>) -> Self {
        Self::new(
            RepositoryOperation::GetById,
            ErrorKind::NotFound,
            "Entity not found",
        )
        .with_entity(entity_type, entity_id)
    }

    /// Create a duplicate record error
    pub fn duplicate(operation: RepositoryOperation, message: impl Into<String>) -> Self {
        Self::new(operation, ErrorKind::Duplicate, message)
    }

    /// Create an execution error (connectivity, row mapping, query failure)
    pub fn execution(operation: RepositoryOperation, message: impl Into<String>) -> Self {
        Self::new(operation, ErrorKind::Execution, message)
    }

    /// Classify a sqlx error raised while running `operation`
    ///
    /// `RowNotFound` becomes [`ErrorKind::NotFound`], a unique violation becomes
    /// [`ErrorKind::Duplicate`]; anything else is an execution failure.
    pub fn from_sqlx(operation: RepositoryOperation, err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => {
                Self::new(operation, ErrorKind::NotFound, "Entity not found")
            }
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                Self::duplicate(operation, db.message().to_string())
            }
            _ => Self::execution(operation, err.to_string()),
        }
    }

    /// Add entity context to an existing error
    #[must_use]
    pub fn with_entity(
        mut self,
        entity_type: impl Into<String>,
        entity_id: impl Into<String>,
    ) -> Self {
        self.entity_type = Some(entity_type.into());
        self.entity_id = Some(entity_id.into());
        self
    }

    /// Set the operation that caused the error
    #[must_use]
    pub fn with_operation(mut self, operation: RepositoryOperation) -> Self {
        self.operation = operation;
        self
    }
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Repository {} error during {}: {}",
            self.kind, self.operation, self.message
        )?;
        if let (Some(entity_type), Some(entity_id)) = (&self.entity_type, &self.entity_id) {
            write!(f, " [{}: {}]", entity_type, entity_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for RepositoryError {}
