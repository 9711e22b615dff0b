//! Attribute-level errors raised while (de)serializing items.

use std::collections::VecDeque;
use std::fmt;
use thiserror::Error;
use tracing::trace;

/// Stored attribute value does not match the declared attribute type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AttributeDeserializationError {
    message: String,
}

impl AttributeDeserializationError {
    /// Creates the error for attribute `attr_name` found with DynamoDB type `attr_type`.
    pub fn new(attr_name: impl AsRef<str>, attr_type: impl AsRef<str>) -> Self {
        Self {
            message: format!(
                "Cannot deserialize '{}' attribute from type: {}",
                attr_name.as_ref(),
                attr_type.as_ref()
            ),
        }
    }

    /// Gets the error message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A non-nullable attribute was unset during serialization.
///
/// Raised by the innermost attribute and re-raised by each enclosing container,
/// which calls [`prepend_path`](Self::prepend_path) with its own name. The
/// message always reflects the path at the time it is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct AttributeNullError {
    path: VecDeque<String>,
}

impl AttributeNullError {
    /// Creates the error for the attribute `attr_name`.
    pub fn new(attr_name: impl Into<String>) -> Self {
        Self {
            path: VecDeque::from([attr_name.into()]),
        }
    }

    /// Prepends the name of an enclosing attribute to the path.
    pub fn prepend_path(&mut self, attr_name: impl Into<String>) {
        let attr_name = attr_name.into();
        trace!(ancestor = %attr_name, "prepending attribute path segment");
        self.path.push_front(attr_name);
    }

    /// Returns the dotted attribute path, outermost segment first.
    pub fn attr_path(&self) -> String {
        self.path.iter().map(String::as_str).collect::<Vec<_>>().join(".")
    }

    /// Returns the path segments, outermost first.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.path.iter().map(String::as_str)
    }
}

impl fmt::Display for AttributeNullError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Attribute '{}' cannot be None", self.attr_path())
    }
}

/// Extension methods for results carrying an [`AttributeNullError`].
pub trait AttributeResultExt<T> {
    /// Prepends `attr_name` to the error's path if the result is an error.
    fn prepend_attr_path(self, attr_name: &str) -> Result<T, AttributeNullError>;
}

impl<T> AttributeResultExt<T> for Result<T, AttributeNullError> {
    fn prepend_attr_path(self, attr_name: &str) -> Result<T, AttributeNullError> {
        self.map_err(|mut err| {
            err.prepend_path(attr_name);
            err
        })
    }
}
