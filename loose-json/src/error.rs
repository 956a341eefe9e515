//! Error types for loose decoding and encoding.

use core::fmt::{self, Display};

use crate::{DeclaredType, Shape};

/// Error returned when decoding into a record fails.
///
/// The target may already have been partially written when this is
/// returned: fields are written in declaration order and never rolled back.
#[derive(Debug)]
pub struct DecodeError {
    /// The record type being decoded into.
    pub record: &'static str,
    /// The specific kind of error
    pub kind: DecodeErrorKind,
}

impl DecodeError {
    pub(crate) fn new(shape: &Shape, kind: DecodeErrorKind) -> Self {
        DecodeError {
            record: shape.type_identifier,
            kind,
        }
    }
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            DecodeErrorKind::MalformedJson(e) => Some(e),
            _ => None,
        }
    }
}

/// Specific error kinds for loose decoding
#[derive(Debug)]
pub enum DecodeErrorKind {
    /// The record's field accessors disagree with its shape.
    InvalidTarget {
        /// The field that could not be written
        field: &'static str,
        /// What was wrong with it
        reason: &'static str,
    },
    /// The input is not JSON, or not a JSON object.
    MalformedJson(serde_json::Error),
    /// A scalar could not be converted into the field's declared type.
    Conversion {
        /// The field being decoded
        field: &'static str,
        /// The key the value was found under
        key: String,
        /// The field's declared type
        declared: DeclaredType,
        /// The offending value, as JSON
        value: String,
    },
    /// The field's type is not a supported scalar or `Option` of one.
    UnsupportedFieldType {
        /// The field's declared name
        field: &'static str,
        /// The field's type
        type_name: &'static str,
    },
}

impl Display for DecodeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeErrorKind::InvalidTarget { field, reason } => {
                write!(f, "invalid target: field `{field}` {reason}")
            }
            DecodeErrorKind::MalformedJson(e) => write!(f, "malformed JSON: {e}"),
            DecodeErrorKind::Conversion {
                field,
                key,
                declared,
                value,
            } => write!(
                f,
                "can't convert {value} (key `{key}`) to {declared} for field `{field}`"
            ),
            DecodeErrorKind::UnsupportedFieldType { field, type_name } => {
                write!(f, "can't handle field `{field}` of type `{type_name}`")
            }
        }
    }
}

impl DecodeErrorKind {
    /// Get an error code for this kind of error.
    pub const fn code(&self) -> &'static str {
        match self {
            DecodeErrorKind::InvalidTarget { .. } => "loose_json::invalid_target",
            DecodeErrorKind::MalformedJson(_) => "loose_json::malformed_json",
            DecodeErrorKind::Conversion { .. } => "loose_json::conversion",
            DecodeErrorKind::UnsupportedFieldType { .. } => "loose_json::unsupported_field_type",
        }
    }
}

/// Error returned when encoding a record fails.
#[derive(Debug)]
pub enum SerializeError {
    /// The field's type is not a supported scalar or `Option` of one.
    UnsupportedFieldType {
        /// The record type being encoded
        record: &'static str,
        /// The field's declared name
        field: &'static str,
        /// The field's type
        type_name: &'static str,
    },
    /// JSON has no representation for NaN or infinity.
    NonFiniteFloat {
        /// The record type being encoded
        record: &'static str,
        /// The field holding the value
        field: &'static str,
    },
    /// The record's field accessors disagree with its shape.
    InvalidRecord {
        /// The record type being encoded
        record: &'static str,
        /// The field that could not be read
        field: &'static str,
    },
    /// Writing the JSON text failed.
    Json(serde_json::Error),
}

impl Display for SerializeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SerializeError::UnsupportedFieldType {
                record,
                field,
                type_name,
            } => write!(
                f,
                "can't encode field `{record}::{field}` of type `{type_name}`"
            ),
            SerializeError::NonFiniteFloat { record, field } => {
                write!(f, "field `{record}::{field}` holds a non-finite float")
            }
            SerializeError::InvalidRecord { record, field } => {
                write!(f, "field `{record}::{field}` does not match its shape")
            }
            SerializeError::Json(e) => write!(f, "JSON error: {e}"),
        }
    }
}

impl std::error::Error for SerializeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SerializeError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SerializeError {
    fn from(e: serde_json::Error) -> Self {
        SerializeError::Json(e)
    }
}
