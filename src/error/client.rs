//! Service client errors and their verbose form.
//!
//! [`ClientError`] mirrors the error raised by the low-level service client: a
//! response document in the `{"Error": {"Code", "Message"}, "ResponseMetadata": {..}}`
//! shape plus the name of the operation that failed. [`VerboseClientError`] wraps
//! it and injects the request id and table name into the rendered message, so every
//! failure for one request reads the same way in logs.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// Message template used by [`ClientError`].
pub const CLIENT_ERROR_TEMPLATE: &str =
    "An error occurred ({error_code}) when calling the {operation_name} operation{retry_info}: {error_message}";

/// Message template used by [`VerboseClientError`] before the request context is filled in.
pub const VERBOSE_CLIENT_ERROR_TEMPLATE: &str = "An error occurred ({error_code}) on request ({request_id}) on table ({table_name}) when calling the {operation_name} operation: {error_message}";

const UNKNOWN: &str = "Unknown";
const NONE: &str = "None";

/// Error response document returned by the service client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Service error code and message.
    #[serde(rename = "Error", default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetail>,

    /// Request metadata attached by the client.
    #[serde(
        rename = "ResponseMetadata",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub metadata: Option<ResponseMetadata>,
}

/// The `Error` section of an [`ErrorResponse`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Service error code (e.g., "ConditionalCheckFailedException").
    #[serde(rename = "Code", default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Human-readable error message.
    #[serde(rename = "Message", default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// The `ResponseMetadata` section of an [`ErrorResponse`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ResponseMetadata {
    /// AWS request ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,

    /// HTTP status code of the failed response.
    #[serde(rename = "HTTPStatusCode", skip_serializing_if = "Option::is_none")]
    pub http_status_code: Option<u16>,

    /// Whether the client gave up after exhausting its retries.
    pub max_attempts_reached: bool,

    /// Number of retries the client performed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_attempts: Option<u32>,
}

impl ErrorResponse {
    /// Creates a response carrying an error code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: Some(ErrorDetail {
                code: Some(code.into()),
                message: Some(message.into()),
            }),
            metadata: None,
        }
    }

    /// Parses a response document from JSON.
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }

    /// Sets the response metadata.
    pub fn with_metadata(mut self, metadata: ResponseMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Returns `Error.Code` if present.
    pub fn code(&self) -> Option<&str> {
        self.error.as_ref().and_then(|e| e.code.as_deref())
    }

    /// Returns `Error.Message` if present.
    pub fn message(&self) -> Option<&str> {
        self.error.as_ref().and_then(|e| e.message.as_deref())
    }

    /// Returns `ResponseMetadata.RequestId` if present.
    pub fn request_id(&self) -> Option<&str> {
        self.metadata.as_ref().and_then(|m| m.request_id.as_deref())
    }

    fn retry_info(&self) -> String {
        match &self.metadata {
            Some(ResponseMetadata {
                max_attempts_reached: true,
                retry_attempts: Some(attempts),
                ..
            }) => format!(" (reached max retries: {})", attempts),
            _ => String::new(),
        }
    }
}

/// Error raised by the service client for a failed operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct ClientError {
    response: ErrorResponse,
    operation_name: String,
}

impl ClientError {
    /// Creates a client error for the named operation.
    pub fn new(response: ErrorResponse, operation_name: impl Into<String>) -> Self {
        Self {
            response,
            operation_name: operation_name.into(),
        }
    }

    /// Gets the response document.
    pub fn response(&self) -> &ErrorResponse {
        &self.response
    }

    /// Gets the name of the failed operation.
    pub fn operation_name(&self) -> &str {
        &self.operation_name
    }

    /// Gets the service error code.
    pub fn code(&self) -> Option<&str> {
        self.response.code()
    }

    /// Gets the service error message.
    pub fn message(&self) -> Option<&str> {
        self.response.message()
    }

    /// Renders `template`, filling `{error_code}`, `{error_message}`,
    /// `{operation_name}` and `{retry_info}`.
    ///
    /// A missing code or message renders as `Unknown`. Other placeholders are
    /// left as they are.
    pub fn render(&self, template: &str) -> String {
        let retry_info = self.response.retry_info();
        render_template(
            template,
            &[
                ("error_code", self.code().unwrap_or(UNKNOWN)),
                ("error_message", self.message().unwrap_or(UNKNOWN)),
                ("operation_name", &self.operation_name),
                ("retry_info", &retry_info),
            ],
        )
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(CLIENT_ERROR_TEMPLATE))
    }
}

/// Request context injected into a [`VerboseClientError`] message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerboseProperties {
    /// AWS request ID of the failed call.
    pub request_id: Option<String>,
    /// Table the failed call targeted.
    pub table_name: Option<String>,
}

impl VerboseProperties {
    /// Creates empty properties.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the request ID.
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Sets the table name.
    pub fn with_table_name(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = Some(table_name.into());
        self
    }
}

/// A [`ClientError`] whose message names the request ID and table.
///
/// The request ID and table name are written into the message template once, at
/// construction. The error code, message and operation name are filled in by the
/// wrapped [`ClientError`] each time the error is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct VerboseClientError {
    inner: ClientError,
    template: String,
}

impl VerboseClientError {
    /// Creates a verbose client error.
    ///
    /// Absent properties, or absent fields within them, render as `None`.
    pub fn new(
        response: ErrorResponse,
        operation_name: impl Into<String>,
        properties: Option<&VerboseProperties>,
    ) -> Self {
        Self::from_client_error(ClientError::new(response, operation_name), properties)
    }

    /// Wraps an existing client error.
    pub fn from_client_error(inner: ClientError, properties: Option<&VerboseProperties>) -> Self {
        let request_id = properties
            .and_then(|p| p.request_id.as_deref())
            .unwrap_or(NONE);
        let table_name = properties
            .and_then(|p| p.table_name.as_deref())
            .unwrap_or(NONE);

        debug!(
            operation = inner.operation_name(),
            code = inner.code().unwrap_or(UNKNOWN),
            request_id,
            table_name,
            "service client error"
        );

        let template = render_template(
            VERBOSE_CLIENT_ERROR_TEMPLATE,
            &[("request_id", request_id), ("table_name", table_name)],
        );

        Self { inner, template }
    }

    /// Gets the wrapped client error.
    pub fn client_error(&self) -> &ClientError {
        &self.inner
    }

    /// Gets the response document.
    pub fn response(&self) -> &ErrorResponse {
        self.inner.response()
    }

    /// Gets the message template with the request context filled in.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Renders the full message.
    pub fn render(&self) -> String {
        self.inner.render(&self.template)
    }
}

impl fmt::Display for VerboseClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl From<VerboseClientError> for ClientError {
    fn from(err: VerboseClientError) -> Self {
        err.inner
    }
}

/// Substitutes `{name}` placeholders in a single left-to-right pass.
fn render_template(template: &str, fields: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            out.push_str(&rest[open..]);
            return out;
        };

        let name = &after[..close];
        match fields.iter().find(|(key, _)| *key == name) {
            Some((_, value)) => out.push_str(value),
            None => {
                out.push('{');
                out.push_str(name);
                out.push('}');
            }
        }
        rest = &after[close + 1..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conditional_failure() -> ErrorResponse {
        ErrorResponse::new(
            "ConditionalCheckFailedException",
            "The conditional request failed",
        )
    }

    #[test]
    fn test_client_error_display() {
        let error = ClientError::new(conditional_failure(), "PutItem");
        assert_eq!(
            error.to_string(),
            "An error occurred (ConditionalCheckFailedException) when calling the PutItem operation: The conditional request failed"
        );
    }

    #[test]
    fn test_client_error_unknown_fields() {
        let error = ClientError::new(ErrorResponse::default(), "GetItem");
        assert_eq!(
            error.to_string(),
            "An error occurred (Unknown) when calling the GetItem operation: Unknown"
        );
        assert_eq!(error.code(), None);
        assert_eq!(error.message(), None);
    }

    #[test]
    fn test_client_error_retry_info() {
        let response = conditional_failure().with_metadata(ResponseMetadata {
            max_attempts_reached: true,
            retry_attempts: Some(4),
            ..Default::default()
        });
        let error = ClientError::new(response, "PutItem");
        assert!(error
            .to_string()
            .contains("PutItem operation (reached max retries: 4): "));

        let response = conditional_failure().with_metadata(ResponseMetadata {
            max_attempts_reached: false,
            retry_attempts: Some(4),
            ..Default::default()
        });
        let error = ClientError::new(response, "PutItem");
        assert!(!error.to_string().contains("reached max retries"));
    }

    #[test]
    fn test_error_response_from_json() {
        let json = r#"{
            "Error": {"Code": "ProvisionedThroughputExceededException", "Message": "Slow down"},
            "ResponseMetadata": {"RequestId": "req-1", "HTTPStatusCode": 400, "RetryAttempts": 2}
        }"#;
        let response = ErrorResponse::from_json(json).unwrap();

        assert_eq!(response.code(), Some("ProvisionedThroughputExceededException"));
        assert_eq!(response.message(), Some("Slow down"));
        assert_eq!(response.request_id(), Some("req-1"));

        let metadata = response.metadata.unwrap();
        assert_eq!(metadata.http_status_code, Some(400));
        assert_eq!(metadata.retry_attempts, Some(2));
        assert!(!metadata.max_attempts_reached);
    }

    #[test]
    fn test_error_response_missing_sections() {
        let response = ErrorResponse::from_json("{}").unwrap();
        assert_eq!(response.code(), None);
        assert_eq!(response.message(), None);
        assert_eq!(response.request_id(), None);

        let response = ErrorResponse::from_json(r#"{"Error": {"Code": "ValidationException"}}"#)
            .unwrap();
        assert_eq!(response.code(), Some("ValidationException"));
        assert_eq!(response.message(), None);
    }

    #[test]
    fn test_verbose_template_fills_request_context() {
        let properties = VerboseProperties::new()
            .with_request_id("abc")
            .with_table_name("Users");
        let error = VerboseClientError::new(conditional_failure(), "PutItem", Some(&properties));

        assert_eq!(
            error.template(),
            "An error occurred ({error_code}) on request (abc) on table (Users) when calling the {operation_name} operation: {error_message}"
        );
        assert_eq!(
            error.to_string(),
            "An error occurred (ConditionalCheckFailedException) on request (abc) on table (Users) when calling the PutItem operation: The conditional request failed"
        );
    }

    #[test]
    fn test_verbose_without_properties() {
        let error = VerboseClientError::new(conditional_failure(), "PutItem", None);
        let message = error.render();
        assert!(message.contains("on request (None)"));
        assert!(message.contains("on table (None)"));
    }

    #[test]
    fn test_verbose_with_partial_properties() {
        let properties = VerboseProperties::new().with_table_name("Orders");
        let error = VerboseClientError::new(conditional_failure(), "DeleteItem", Some(&properties));
        let message = error.render();
        assert!(message.contains("on request (None)"));
        assert!(message.contains("on table (Orders)"));
        assert!(message.contains("calling the DeleteItem operation"));
    }

    #[test]
    fn test_verbose_drops_retry_info() {
        let response = conditional_failure().with_metadata(ResponseMetadata {
            max_attempts_reached: true,
            retry_attempts: Some(9),
            ..Default::default()
        });
        let error = VerboseClientError::new(response, "PutItem", None);
        assert!(!error.to_string().contains("reached max retries"));
    }

    #[test]
    fn test_verbose_properties_from_json() {
        let properties: VerboseProperties =
            serde_json::from_str(r#"{"table_name": "Users"}"#).unwrap();
        assert_eq!(properties.request_id, None);
        assert_eq!(properties.table_name.as_deref(), Some("Users"));
    }

    #[test]
    fn test_render_template_leaves_unknown_placeholders() {
        let rendered = render_template("{a} and {b} and {", &[("a", "x")]);
        assert_eq!(rendered, "x and {b} and {");
    }
}
