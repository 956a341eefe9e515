//! The coercion matrix: JSON scalar in, declared scalar type out.

use crate::{FloatType, Number, Scalar, ScalarType, SourceValue};

/// A scalar that could not be converted into the requested type.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) struct Unconvertible;

/// Coerces `value` into `target`.
///
/// Returns `Ok(None)` for null, arrays and objects: those never reach a
/// field.
pub(crate) fn coerce(
    value: SourceValue<'_>,
    target: ScalarType,
) -> Result<Option<Scalar>, Unconvertible> {
    let scalar = match value {
        SourceValue::Null | SourceValue::Array | SourceValue::Object => return Ok(None),
        SourceValue::Bool(b) => from_bool(b, target),
        SourceValue::Number(n) => from_number(n, target),
        SourceValue::String(s) => from_string(s, target)?,
    };
    Ok(Some(scalar))
}

fn from_bool(b: bool, target: ScalarType) -> Scalar {
    match target {
        ScalarType::Bool => Scalar::Bool(b),
        ScalarType::Int(ty) => ty.saturating(i128::from(b)),
        ScalarType::Float(FloatType::F32) => Scalar::F32(if b { 1.0 } else { 0.0 }),
        ScalarType::Float(FloatType::F64) => Scalar::F64(if b { 1.0 } else { 0.0 }),
        ScalarType::String => Scalar::String(b.to_string()),
    }
}

fn from_number(n: Number, target: ScalarType) -> Scalar {
    match target {
        ScalarType::Bool => Scalar::Bool(n.as_f64() > 0.5),
        ScalarType::Int(ty) => ty.saturating(n.truncated()),
        ScalarType::Float(FloatType::F32) => Scalar::F32(n.as_f64() as f32),
        ScalarType::Float(FloatType::F64) => Scalar::F64(n.as_f64()),
        ScalarType::String => Scalar::String(n.to_string()),
    }
}

fn from_string(s: &str, target: ScalarType) -> Result<Scalar, Unconvertible> {
    let scalar = match target {
        ScalarType::Bool => bool_literal(s).map(Scalar::Bool),
        ScalarType::Int(ty) => int_literal(s).and_then(|v| ty.exact(v)),
        ScalarType::Float(FloatType::F32) => float_literal(s).map(|v| Scalar::F32(v as f32)),
        ScalarType::Float(FloatType::F64) => float_literal(s).map(Scalar::F64),
        ScalarType::String => Some(Scalar::String(s.to_owned())),
    };
    scalar.ok_or(Unconvertible)
}

/// Parses a boolean literal: `1 t T TRUE true True` or
/// `0 f F FALSE false False`.
pub(crate) fn bool_literal(s: &str) -> Option<bool> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Parses an integer literal with optional sign and base prefix.
///
/// `0x`/`0X` is hex, `0o`/`0O` octal, `0b`/`0B` binary, and a bare leading
/// `0` followed by more digits is octal. Underscores may separate digits, or
/// follow a base prefix.
pub(crate) fn int_literal(s: &str) -> Option<i128> {
    let (negative, body) = match s.as_bytes().first()? {
        b'-' => (true, &s[1..]),
        b'+' => (false, &s[1..]),
        _ => (false, s),
    };

    let (radix, digits, prefixed) = if let Some(rest) = strip_base_prefix(body, 'x') {
        (16, rest, true)
    } else if let Some(rest) = strip_base_prefix(body, 'o') {
        (8, rest, true)
    } else if let Some(rest) = strip_base_prefix(body, 'b') {
        (2, rest, true)
    } else if body.len() > 1 && body.starts_with('0') {
        (8, &body[1..], true)
    } else {
        (10, body, false)
    };

    if !underscores_ok(digits, prefixed) {
        return None;
    }
    let digits: String = digits.chars().filter(|&c| c != '_').collect();
    // from_str_radix tolerates a sign of its own
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return None;
    }

    let magnitude = u128::from_str_radix(&digits, radix).ok()?;
    if negative {
        0i128.checked_sub_unsigned(magnitude)
    } else {
        i128::try_from(magnitude).ok()
    }
}

fn strip_base_prefix(body: &str, letter: char) -> Option<&str> {
    let rest = body.strip_prefix('0')?;
    rest.strip_prefix(letter)
        .or_else(|| rest.strip_prefix(letter.to_ascii_uppercase()))
}

fn underscores_ok(digits: &str, prefixed: bool) -> bool {
    if !digits.contains('_') {
        return true;
    }
    if digits.ends_with('_') || digits.contains("__") {
        return false;
    }
    prefixed || !digits.starts_with('_')
}

/// Parses a floating-point literal, including `inf` and `nan` spellings.
///
/// Always parsed at `f64` precision; `f32` fields narrow the result. A finite
/// literal too large for `f64` is rejected rather than turned into infinity.
pub(crate) fn float_literal(s: &str) -> Option<f64> {
    let value: f64 = s.parse().ok()?;
    if value.is_infinite() && !names_infinity(s) {
        return None;
    }
    Some(value)
}

fn names_infinity(s: &str) -> bool {
    s.trim_start_matches(['+', '-'])
        .get(..3)
        .is_some_and(|head| head.eq_ignore_ascii_case("inf"))
}
