//! DynamoDB service response codes.
//!
//! These values are defined by the service API and are passed through
//! unmodified by [`DynamoError::cause_response_code`](super::DynamoError::cause_response_code).

/// A condition expression evaluated to false.
pub const CONDITIONAL_CHECK_FAILED: &str = "ConditionalCheckFailedException";

/// Provisioned read or write capacity was exceeded.
pub const PROVISIONED_THROUGHPUT_EXCEEDED: &str = "ProvisionedThroughputExceededException";

/// A transactional request was cancelled.
pub const TRANSACTION_CANCELED: &str = "TransactionCanceledException";

/// The referenced table or index does not exist.
pub const RESOURCE_NOT_FOUND: &str = "ResourceNotFoundException";

/// The request was throttled.
pub const THROTTLING: &str = "ThrottlingException";

/// Request validation failed on the service side.
pub const VALIDATION: &str = "ValidationException";
