//! Encoding records back to JSON, under the same keys the decoder looks up
//! first.

use serde_json::{Map, Number, Value};

use crate::{Record, Scalar, SerializeError};

/// Encodes a record as a JSON object.
///
/// Every non-excluded field is written under its rename (or declared name),
/// in declaration order. Empty optional fields become `null`.
pub fn to_value<T: Record>(value: &T) -> Result<Value, SerializeError> {
    let shape = T::SHAPE;
    let mut map = Map::with_capacity(shape.fields.len());

    for (index, field) in shape.fields.iter().enumerate() {
        if field.is_excluded() {
            continue;
        }
        let declared =
            field
                .declared_type()
                .ok_or_else(|| SerializeError::UnsupportedFieldType {
                    record: shape.type_identifier,
                    field: field.name,
                    type_name: field.type_name(),
                })?;
        let invalid = || SerializeError::InvalidRecord {
            record: shape.type_identifier,
            field: field.name,
        };
        let slot = value.field_ref(index).ok_or_else(invalid)?;
        let json = match declared.peek(slot).ok_or_else(invalid)? {
            None => Value::Null,
            Some(scalar) => scalar_to_json(scalar).ok_or(SerializeError::NonFiniteFloat {
                record: shape.type_identifier,
                field: field.name,
            })?,
        };
        map.insert(field.key().to_owned(), json);
    }

    Ok(Value::Object(map))
}

/// Encodes a record as a compact JSON string.
pub fn to_string<T: Record>(value: &T) -> Result<String, SerializeError> {
    Ok(serde_json::to_string(&to_value(value)?)?)
}

/// Encodes a record as an indented JSON string.
pub fn to_string_pretty<T: Record>(value: &T) -> Result<String, SerializeError> {
    Ok(serde_json::to_string_pretty(&to_value(value)?)?)
}

/// Encodes a record as compact JSON bytes.
pub fn to_vec<T: Record>(value: &T) -> Result<Vec<u8>, SerializeError> {
    Ok(serde_json::to_vec(&to_value(value)?)?)
}

fn scalar_to_json(scalar: Scalar) -> Option<Value> {
    let value = match scalar {
        Scalar::Bool(v) => Value::Bool(v),
        Scalar::I8(v) => Value::from(v),
        Scalar::I16(v) => Value::from(v),
        Scalar::I32(v) => Value::from(v),
        Scalar::I64(v) => Value::from(v),
        Scalar::ISize(v) => Value::from(v),
        Scalar::U8(v) => Value::from(v),
        Scalar::U16(v) => Value::from(v),
        Scalar::U32(v) => Value::from(v),
        Scalar::U64(v) => Value::from(v),
        Scalar::USize(v) => Value::from(v),
        Scalar::F32(v) => Value::Number(Number::from_f64(f64::from(v))?),
        Scalar::F64(v) => Value::Number(Number::from_f64(v)?),
        Scalar::String(v) => Value::String(v),
    };
    Some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn scalars_to_json() {
        assert_eq!(scalar_to_json(Scalar::Bool(true)), Some(json!(true)));
        assert_eq!(scalar_to_json(Scalar::I8(-3)), Some(json!(-3)));
        assert_eq!(scalar_to_json(Scalar::U64(u64::MAX)), Some(json!(u64::MAX)));
        assert_eq!(scalar_to_json(Scalar::F64(0.25)), Some(json!(0.25)));
        assert_eq!(scalar_to_json(Scalar::String("x".into())), Some(json!("x")));
        assert_eq!(scalar_to_json(Scalar::F64(f64::NAN)), None);
        assert_eq!(scalar_to_json(Scalar::F32(f32::INFINITY)), None);
    }
}
