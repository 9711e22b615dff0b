//! AWS DynamoDB Integration: error taxonomy
//!
//! Structured errors for the DynamoDB client wrapper. Every failure path in the
//! wrapper surfaces one of these types instead of the raw service client error,
//! so callers can branch on the kind of failure and still reach the service's
//! own response code when they need it.
//!
//! # Overview
//!
//! - [`DynamoError`] / [`DynamoErrorKind`]: the operation-level errors
//!   (connection failures, missing items and tables, transactions, lifecycle
//!   misuse), each carrying a message and an optional cause.
//! - [`ClientError`] / [`VerboseClientError`]: the service client error and its
//!   enriched form that names the request id and table in its message.
//! - [`AttributeDeserializationError`] / [`AttributeNullError`]: attribute-level
//!   failures raised while (de)serializing items.
//!
//! # Example
//!
//! ```rust
//! use aws_dynamodb::{DynamoError, ErrorResponse, VerboseClientError, VerboseProperties};
//!
//! let response = ErrorResponse::new(
//!     "ConditionalCheckFailedException",
//!     "The conditional request failed",
//! );
//! let properties = VerboseProperties::new()
//!     .with_request_id("abc")
//!     .with_table_name("Users");
//! let client_error = VerboseClientError::new(response, "PutItem", Some(&properties));
//!
//! let error = DynamoError::put().with_cause(client_error);
//! assert_eq!(error.to_string(), "Error putting item");
//! assert_eq!(
//!     error.cause_response_code(),
//!     Some("ConditionalCheckFailedException")
//! );
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod error;

pub use error::{
    codes, parse_service_error, AttributeDeserializationError, AttributeNullError,
    AttributeResultExt, ClientError, DynamoError, DynamoErrorKind, DynamoResult, ErrorDetail,
    ErrorResponse, ResponseMetadata, VerboseClientError, VerboseProperties,
};
