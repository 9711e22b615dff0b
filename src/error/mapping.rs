//! Mapping from raw DynamoDB error bodies and failed operations to typed errors.
//!
//! DynamoDB returns errors in the following JSON format:
//!
//! ```json
//! {
//!   "__type": "com.amazonaws.dynamodb.v20120810#ConditionalCheckFailedException",
//!   "message": "The conditional request failed"
//! }
//! ```

use super::{DynamoError, DynamoErrorKind, ErrorDetail, ErrorResponse, ResponseMetadata, VerboseClientError};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct ServiceErrorBody {
    #[serde(rename = "__type", default)]
    error_type: String,
    #[serde(alias = "Message", default)]
    message: Option<String>,
}

/// Parse a raw DynamoDB error body into an [`ErrorResponse`].
///
/// The namespace prefix is stripped from the error type, so
/// `"com.amazonaws.dynamodb.v20120810#ResourceNotFoundException"` becomes
/// `"ResourceNotFoundException"`. A missing message becomes an empty string and
/// an empty type leaves the code unset.
///
/// # Errors
///
/// Returns the serde error if `body` is not a JSON object.
pub fn parse_service_error(
    body: &str,
    status_code: u16,
    request_id: Option<&str>,
) -> Result<ErrorResponse, serde_json::Error> {
    let body: ServiceErrorBody = serde_json::from_str(body)?;

    let code = match body.error_type.rsplit_once('#') {
        Some((_, code)) => code,
        None => body.error_type.as_str(),
    };

    Ok(ErrorResponse {
        error: Some(ErrorDetail {
            code: (!code.is_empty()).then(|| code.to_string()),
            message: Some(body.message.unwrap_or_default()),
        }),
        metadata: Some(ResponseMetadata {
            request_id: request_id.map(str::to_string),
            http_status_code: Some(status_code),
            ..Default::default()
        }),
    })
}

impl DynamoErrorKind {
    /// Maps a DynamoDB operation name to the kind raised when it fails.
    pub fn for_operation(operation_name: &str) -> Self {
        match operation_name {
            "DeleteItem" => Self::Delete,
            "Query" => Self::Query,
            "Scan" => Self::Scan,
            "PutItem" | "BatchWriteItem" => Self::Put,
            "UpdateItem" => Self::Update,
            "GetItem" | "BatchGetItem" => Self::Get,
            "CreateTable" | "DeleteTable" | "DescribeTable" | "UpdateTable" | "ListTables"
            | "UpdateTimeToLive" | "DescribeTimeToLive" => Self::Table,
            "TransactWriteItems" => Self::TransactWrite,
            "TransactGetItems" => Self::TransactGet,
            _ => Self::Connection,
        }
    }

    fn failure_prefix(self) -> &'static str {
        match self {
            Self::Delete => "Failed to delete item",
            Self::Query => "Failed to query items",
            Self::Scan => "Failed to scan table",
            Self::Put => "Failed to put item",
            Self::Update => "Failed to update item",
            Self::Get => "Failed to get item",
            Self::Table => "Failed to perform table operation",
            Self::TransactWrite => "Failed to write transaction items",
            Self::TransactGet => "Failed to get transaction items",
            Self::Connection
            | Self::DoesNotExist
            | Self::TableDoesNotExist
            | Self::InvalidState => "Failed to call the service",
        }
    }
}

impl DynamoError {
    /// Wraps a failed service call.
    ///
    /// The kind is chosen from the operation name of `cause`, and the message
    /// reads `"<what failed>: <rendered cause>"`. The cause is kept so
    /// [`cause_response_code`](Self::cause_response_code) resolves through it.
    pub fn operation_failed(cause: VerboseClientError) -> Self {
        let kind = DynamoErrorKind::for_operation(cause.client_error().operation_name());
        let message = format!("{}: {}", kind.failure_prefix(), cause.render());

        debug!(
            kind = %kind,
            operation = cause.client_error().operation_name(),
            code = cause.client_error().code().unwrap_or_default(),
            "operation failed"
        );

        Self::new(kind, message).with_cause(cause)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{codes, VerboseProperties};

    #[test]
    fn test_parse_service_error_strips_namespace() {
        let body = r#"{
            "__type": "com.amazonaws.dynamodb.v20120810#ConditionalCheckFailedException",
            "message": "The conditional request failed"
        }"#;
        let response = parse_service_error(body, 400, Some("REQ123")).unwrap();

        assert_eq!(response.code(), Some(codes::CONDITIONAL_CHECK_FAILED));
        assert_eq!(response.message(), Some("The conditional request failed"));
        assert_eq!(response.request_id(), Some("REQ123"));
        assert_eq!(response.metadata.unwrap().http_status_code, Some(400));
    }

    #[test]
    fn test_parse_service_error_capitalized_message() {
        let body = r#"{"__type": "ResourceNotFoundException", "Message": "Requested resource not found"}"#;
        let response = parse_service_error(body, 400, None).unwrap();

        assert_eq!(response.code(), Some(codes::RESOURCE_NOT_FOUND));
        assert_eq!(response.message(), Some("Requested resource not found"));
        assert_eq!(response.request_id(), None);
    }

    #[test]
    fn test_parse_service_error_missing_fields() {
        let response = parse_service_error("{}", 500, None).unwrap();
        assert_eq!(response.code(), None);
        assert_eq!(response.message(), Some(""));
    }

    #[test]
    fn test_parse_service_error_invalid_json() {
        assert!(parse_service_error("<html>", 502, None).is_err());
    }

    #[test]
    fn test_kind_for_operation() {
        assert_eq!(DynamoErrorKind::for_operation("PutItem"), DynamoErrorKind::Put);
        assert_eq!(DynamoErrorKind::for_operation("BatchGetItem"), DynamoErrorKind::Get);
        assert_eq!(DynamoErrorKind::for_operation("DescribeTable"), DynamoErrorKind::Table);
        assert_eq!(
            DynamoErrorKind::for_operation("TransactWriteItems"),
            DynamoErrorKind::TransactWrite
        );
        assert_eq!(
            DynamoErrorKind::for_operation("ExecuteStatement"),
            DynamoErrorKind::Connection
        );
    }

    #[test]
    fn test_operation_failed() {
        let properties = VerboseProperties::new()
            .with_request_id("abc")
            .with_table_name("Users");
        let cause = VerboseClientError::new(
            ErrorResponse::new(codes::CONDITIONAL_CHECK_FAILED, "The conditional request failed"),
            "UpdateItem",
            Some(&properties),
        );

        let error = DynamoError::operation_failed(cause);
        assert_eq!(error.kind(), DynamoErrorKind::Update);
        assert_eq!(
            error.to_string(),
            "Failed to update item: An error occurred (ConditionalCheckFailedException) on request (abc) on table (Users) when calling the UpdateItem operation: The conditional request failed"
        );
        assert!(error.is_conditional_check_failed());
    }

    #[test]
    fn test_operation_failed_transaction() {
        let cause = VerboseClientError::new(
            ErrorResponse::new(codes::TRANSACTION_CANCELED, "Transaction cancelled"),
            "TransactWriteItems",
            None,
        );

        let error = DynamoError::operation_failed(cause);
        assert_eq!(error.kind(), DynamoErrorKind::TransactWrite);
        assert!(!error.is_connection_error());
        assert!(error
            .message()
            .starts_with("Failed to write transaction items: "));
        assert_eq!(error.cause_response_code(), Some(codes::TRANSACTION_CANCELED));
    }
}
