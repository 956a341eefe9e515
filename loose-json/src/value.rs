//! A tagged view over parsed JSON values.

use core::fmt;

use serde_json::Value;

/// A JSON number, keeping integer precision when the parser had it.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Number {
    /// An integer that fits in `i64`.
    Int(i64),
    /// An integer too large for `i64`.
    UInt(u64),
    /// Anything with a fraction or exponent.
    Float(f64),
}

impl Number {
    /// The value as an `f64`, possibly losing precision.
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::UInt(u) => u as f64,
            Number::Float(f) => f,
        }
    }

    /// The value truncated toward zero.
    ///
    /// Floats outside the `i128` range saturate at its bounds.
    pub(crate) fn truncated(self) -> i128 {
        match self {
            Number::Int(i) => i128::from(i),
            Number::UInt(u) => i128::from(u),
            Number::Float(f) => f as i128,
        }
    }
}

impl From<&serde_json::Number> for Number {
    fn from(n: &serde_json::Number) -> Self {
        if let Some(i) = n.as_i64() {
            Number::Int(i)
        } else if let Some(u) = n.as_u64() {
            Number::UInt(u)
        } else {
            Number::Float(n.as_f64().unwrap_or(f64::NAN))
        }
    }
}

/// Formats with the shortest decimal that round-trips, never in exponent form.
impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(i) => write!(f, "{i}"),
            Number::UInt(u) => write!(f, "{u}"),
            Number::Float(x) => write!(f, "{x}"),
        }
    }
}

/// The dynamic type of a value found in the source document.
///
/// Only the scalar variants carry data; null and compound values never reach
/// a field.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum SourceValue<'a> {
    /// `null`
    Null,
    /// `true` or `false`
    Bool(bool),
    /// Any JSON number.
    Number(Number),
    /// A JSON string.
    String(&'a str),
    /// A JSON array.
    Array,
    /// A JSON object.
    Object,
}

impl SourceValue<'_> {
    /// A short name for the JSON type, for diagnostics.
    pub const fn kind(&self) -> &'static str {
        match self {
            SourceValue::Null => "null",
            SourceValue::Bool(_) => "boolean",
            SourceValue::Number(_) => "number",
            SourceValue::String(_) => "string",
            SourceValue::Array => "array",
            SourceValue::Object => "object",
        }
    }

    /// Whether this value can be coerced into a field.
    pub const fn is_scalar(&self) -> bool {
        matches!(
            self,
            SourceValue::Bool(_) | SourceValue::Number(_) | SourceValue::String(_)
        )
    }
}

impl<'a> From<&'a Value> for SourceValue<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::Null => SourceValue::Null,
            Value::Bool(b) => SourceValue::Bool(*b),
            Value::Number(n) => SourceValue::Number(n.into()),
            Value::String(s) => SourceValue::String(s),
            Value::Array(_) => SourceValue::Array,
            Value::Object(_) => SourceValue::Object,
        }
    }
}
