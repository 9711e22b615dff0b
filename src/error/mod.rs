//! Error types for the DynamoDB integration module.
//!
//! Every failure path in the wrapper surfaces one of the types defined here,
//! never the raw service client error (which is kept as the cause where one
//! exists).
//!
//! # Error Hierarchy
//!
//! [`DynamoError`] carries a [`DynamoErrorKind`], a message and an optional cause:
//! - Connection errors: the service call failed. [`DynamoErrorKind::Connection`]
//!   and the per-operation kinds (delete, query, scan, put, update, get, table)
//! - Missing data: [`DynamoErrorKind::DoesNotExist`],
//!   [`DynamoErrorKind::TableDoesNotExist`]
//! - Transactions: [`DynamoErrorKind::TransactWrite`],
//!   [`DynamoErrorKind::TransactGet`]
//! - Lifecycle misuse: [`DynamoErrorKind::InvalidState`]
//!
//! Attribute failures ([`AttributeDeserializationError`], [`AttributeNullError`])
//! and the enriched client error ([`VerboseClientError`]) are separate types.
//!
//! # Examples
//!
//! ```rust
//! use aws_dynamodb::error::{codes, DynamoError};
//!
//! fn handle(error: &DynamoError) {
//!     if error.is_connection_error() {
//!         println!("service call failed: {}", error);
//!     }
//!     if error.cause_response_code() == Some(codes::CONDITIONAL_CHECK_FAILED) {
//!         println!("condition not met");
//!     }
//! }
//! ```

mod attribute;
mod client;
pub mod codes;
mod mapping;

pub use attribute::{AttributeDeserializationError, AttributeNullError, AttributeResultExt};
pub use client::{
    ClientError, ErrorDetail, ErrorResponse, ResponseMetadata, VerboseClientError,
    VerboseProperties, CLIENT_ERROR_TEMPLATE, VERBOSE_CLIENT_ERROR_TEMPLATE,
};
pub use mapping::parse_service_error;

use std::fmt;
use thiserror::Error;

/// Result type alias for DynamoDB operations.
pub type DynamoResult<T> = Result<T, DynamoError>;

/// Kinds of [`DynamoError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DynamoErrorKind {
    // Connection errors
    /// A service call failed.
    Connection,
    /// Deleting an item failed.
    Delete,
    /// A query failed.
    Query,
    /// A scan failed.
    Scan,
    /// Creating an item failed.
    Put,
    /// Updating an item failed.
    Update,
    /// Retrieving an item failed.
    Get,
    /// A table operation failed.
    Table,

    // Missing data
    /// The queried item does not exist.
    DoesNotExist,
    /// The targeted table does not exist.
    TableDoesNotExist,

    // Transactions
    /// A transactional write failed as a whole.
    TransactWrite,
    /// A transactional get failed as a whole.
    TransactGet,

    /// An operation context was used outside its valid lifecycle.
    InvalidState,
}

impl DynamoErrorKind {
    /// Returns the message used when none is given at construction.
    ///
    /// Kinds without a default require a message.
    pub fn default_message(self) -> Option<&'static str> {
        match self {
            Self::Connection => Some("Connection Error"),
            Self::Delete => Some("Error deleting item"),
            Self::Query => Some("Error performing query"),
            Self::Scan => Some("Error performing scan"),
            Self::Put => Some("Error putting item"),
            Self::Update => Some("Error updating item"),
            Self::Get => Some("Error getting item"),
            Self::Table => Some("Error performing a table operation"),
            Self::DoesNotExist => Some("Item does not exist"),
            Self::InvalidState => Some("Operation in invalid state"),
            Self::TableDoesNotExist | Self::TransactWrite | Self::TransactGet => None,
        }
    }

    /// Returns true for kinds in the connection error family.
    pub fn is_connection_error(self) -> bool {
        matches!(
            self,
            Self::Connection
                | Self::Delete
                | Self::Query
                | Self::Scan
                | Self::Put
                | Self::Update
                | Self::Get
                | Self::Table
        )
    }
}

impl fmt::Display for DynamoErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Connection => write!(f, "connection"),
            Self::Delete => write!(f, "delete"),
            Self::Query => write!(f, "query"),
            Self::Scan => write!(f, "scan"),
            Self::Put => write!(f, "put"),
            Self::Update => write!(f, "update"),
            Self::Get => write!(f, "get"),
            Self::Table => write!(f, "table"),
            Self::DoesNotExist => write!(f, "does_not_exist"),
            Self::TableDoesNotExist => write!(f, "table_does_not_exist"),
            Self::TransactWrite => write!(f, "transact_write"),
            Self::TransactGet => write!(f, "transact_get"),
            Self::InvalidState => write!(f, "invalid_state"),
        }
    }
}

/// DynamoDB operation error.
///
/// Renders as its message alone. The cause, when set, is exposed through
/// [`std::error::Error::source`] and inspected by
/// [`cause_response_code`](Self::cause_response_code) and
/// [`cause_response_message`](Self::cause_response_message).
#[derive(Debug, Error)]
#[error("{message}")]
pub struct DynamoError {
    kind: DynamoErrorKind,
    message: String,
    #[source]
    cause: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl DynamoError {
    /// Creates an error with an explicit message.
    pub fn new(kind: DynamoErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            cause: None,
        }
    }

    /// Creates an error with the kind's default message.
    ///
    /// Returns `None` for kinds that require a message.
    pub fn from_kind(kind: DynamoErrorKind) -> Option<Self> {
        kind.default_message().map(|message| Self::new(kind, message))
    }

    fn with_default(kind: DynamoErrorKind) -> Self {
        Self::new(kind, kind.default_message().unwrap_or_default())
    }

    // Convenience constructors

    /// Creates a connection error.
    pub fn connection() -> Self {
        Self::with_default(DynamoErrorKind::Connection)
    }

    /// Creates a delete error.
    pub fn delete() -> Self {
        Self::with_default(DynamoErrorKind::Delete)
    }

    /// Creates a query error.
    pub fn query() -> Self {
        Self::with_default(DynamoErrorKind::Query)
    }

    /// Creates a scan error.
    pub fn scan() -> Self {
        Self::with_default(DynamoErrorKind::Scan)
    }

    /// Creates a put error.
    pub fn put() -> Self {
        Self::with_default(DynamoErrorKind::Put)
    }

    /// Creates an update error.
    pub fn update() -> Self {
        Self::with_default(DynamoErrorKind::Update)
    }

    /// Creates a get error.
    pub fn get() -> Self {
        Self::with_default(DynamoErrorKind::Get)
    }

    /// Creates a table operation error.
    pub fn table() -> Self {
        Self::with_default(DynamoErrorKind::Table)
    }

    /// Creates an item-does-not-exist error.
    pub fn does_not_exist() -> Self {
        Self::with_default(DynamoErrorKind::DoesNotExist)
    }

    /// Creates an invalid state error.
    pub fn invalid_state() -> Self {
        Self::with_default(DynamoErrorKind::InvalidState)
    }

    /// Creates a table-does-not-exist error for `table_name`.
    pub fn table_does_not_exist(table_name: impl AsRef<str>) -> Self {
        Self::new(
            DynamoErrorKind::TableDoesNotExist,
            format!("Table does not exist: `{}`", table_name.as_ref()),
        )
    }

    /// Creates a transactional write error.
    pub fn transact_write(message: impl Into<String>) -> Self {
        Self::new(DynamoErrorKind::TransactWrite, message)
    }

    /// Creates a transactional get error.
    pub fn transact_get(message: impl Into<String>) -> Self {
        Self::new(DynamoErrorKind::TransactGet, message)
    }

    /// Replaces the message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Sets the underlying cause.
    pub fn with_cause(mut self, cause: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Gets the error kind.
    pub fn kind(&self) -> DynamoErrorKind {
        self.kind
    }

    /// Gets the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Gets the underlying cause.
    pub fn cause(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    /// Returns true if this error belongs to the connection error family.
    pub fn is_connection_error(&self) -> bool {
        self.kind.is_connection_error()
    }

    /// The DynamoDB response code of the cause, such as:
    ///
    /// - `ConditionalCheckFailedException`
    /// - `ProvisionedThroughputExceededException`
    /// - `TransactionCanceledException`
    ///
    /// Returns `None` when there is no cause, the cause is not a service client
    /// error, or its response has no code.
    pub fn cause_response_code(&self) -> Option<&str> {
        self.cause_response().and_then(ErrorResponse::code)
    }

    /// The human-readable description of the cause returned by DynamoDB.
    pub fn cause_response_message(&self) -> Option<&str> {
        self.cause_response().and_then(ErrorResponse::message)
    }

    /// Returns true if the cause is a failed condition expression.
    pub fn is_conditional_check_failed(&self) -> bool {
        self.cause_response_code() == Some(codes::CONDITIONAL_CHECK_FAILED)
    }

    fn cause_response(&self) -> Option<&ErrorResponse> {
        let cause = self.cause.as_deref()?;
        if let Some(err) = cause.downcast_ref::<VerboseClientError>() {
            return Some(err.response());
        }
        cause.downcast_ref::<ClientError>().map(ClientError::response)
    }
}
