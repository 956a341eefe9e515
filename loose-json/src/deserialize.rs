//! The coercing decoder.

use serde_json::{Map, Value};

use crate::coerce::coerce;
use crate::resolve::resolve;
use crate::{DecodeError, DecodeErrorKind, Record, SourceValue};

/// Options controlling how fields are matched to keys.
#[derive(Clone, Debug)]
pub struct DecodeOptions {
    /// Fall back to the declared field name and its lower-first spelling
    /// when the candidate key is absent (default: `true`).
    pub name_fallback: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl DecodeOptions {
    /// Default options: name fallback enabled.
    pub const fn new() -> Self {
        DecodeOptions {
            name_fallback: true,
        }
    }

    /// Enables or disables the declared-name fallbacks.
    ///
    /// With fallback disabled only the rename (or, for fields without one,
    /// the declared name) is looked up.
    pub const fn name_fallback(mut self, enabled: bool) -> Self {
        self.name_fallback = enabled;
        self
    }
}

/// Decodes JSON bytes into an existing record.
///
/// Fields whose key is absent, or whose value is `null`, an array or an
/// object, keep their current value.
///
/// # Example
///
/// ```
/// use loose_json::Record;
///
/// #[derive(Record, Default)]
/// struct Reading {
///     #[loose(rename = "temp")]
///     temperature: f64,
///     sensor: u32,
/// }
///
/// let mut reading = Reading::default();
/// loose_json::from_slice_into(br#"{"temp": "21.5", "sensor": "0x10"}"#, &mut reading).unwrap();
/// assert_eq!(reading.temperature, 21.5);
/// assert_eq!(reading.sensor, 16);
/// ```
pub fn from_slice_into<T: Record>(input: &[u8], target: &mut T) -> Result<(), DecodeError> {
    from_slice_into_with_options(input, target, &DecodeOptions::default())
}

/// Like [`from_slice_into`], with explicit options.
pub fn from_slice_into_with_options<T: Record>(
    input: &[u8],
    target: &mut T,
    options: &DecodeOptions,
) -> Result<(), DecodeError> {
    let map: Map<String, Value> = serde_json::from_slice(input)
        .map_err(|e| DecodeError::new(T::SHAPE, DecodeErrorKind::MalformedJson(e)))?;
    from_map_into(&map, target, options)
}

/// Decodes a JSON string into an existing record.
pub fn from_str_into<T: Record>(input: &str, target: &mut T) -> Result<(), DecodeError> {
    from_slice_into(input.as_bytes(), target)
}

/// Like [`from_str_into`], with explicit options.
pub fn from_str_into_with_options<T: Record>(
    input: &str,
    target: &mut T,
    options: &DecodeOptions,
) -> Result<(), DecodeError> {
    from_slice_into_with_options(input.as_bytes(), target, options)
}

/// Decodes JSON bytes into a fresh, defaulted record.
pub fn from_slice<T: Record + Default>(input: &[u8]) -> Result<T, DecodeError> {
    let mut target = T::default();
    from_slice_into(input, &mut target)?;
    Ok(target)
}

/// Decodes a JSON string into a fresh, defaulted record.
pub fn from_str<T: Record + Default>(input: &str) -> Result<T, DecodeError> {
    from_slice(input.as_bytes())
}

/// Decodes an already-parsed JSON object into an existing record.
pub fn from_map_into<T: Record>(
    map: &Map<String, Value>,
    target: &mut T,
    options: &DecodeOptions,
) -> Result<(), DecodeError> {
    let shape = T::SHAPE;
    debug!(
        record = shape.type_identifier,
        keys = map.len(),
        "decoding loose JSON object"
    );

    for (index, field) in shape.fields.iter().enumerate() {
        if field.is_excluded() {
            trace!(field = field.name, "excluded");
            continue;
        }

        let Some(declared) = field.declared_type() else {
            return Err(DecodeError::new(
                shape,
                DecodeErrorKind::UnsupportedFieldType {
                    field: field.name,
                    type_name: field.type_name(),
                },
            ));
        };

        let Some(resolved) = resolve(field, map, options.name_fallback) else {
            trace!(field = field.name, "no matching key, left unchanged");
            continue;
        };
        trace!(field = field.name, key = resolved.key, tier = ?resolved.tier, "resolved");

        let source = SourceValue::from(resolved.value);
        let scalar = match coerce(source, declared.scalar) {
            Ok(Some(scalar)) => scalar,
            Ok(None) => {
                trace!(field = field.name, kind = source.kind(), "not a scalar, left unchanged");
                continue;
            }
            Err(_) => {
                return Err(DecodeError::new(
                    shape,
                    DecodeErrorKind::Conversion {
                        field: field.name,
                        key: resolved.key.to_owned(),
                        declared,
                        value: resolved.value.to_string(),
                    },
                ));
            }
        };

        let Some(slot) = target.field_mut(index) else {
            return Err(DecodeError::new(
                shape,
                DecodeErrorKind::InvalidTarget {
                    field: field.name,
                    reason: "is not accessible",
                },
            ));
        };
        if !scalar.poke(slot, declared.optional) {
            return Err(DecodeError::new(
                shape,
                DecodeErrorKind::InvalidTarget {
                    field: field.name,
                    reason: "storage does not match its declared type",
                },
            ));
        }
    }

    Ok(())
}
