//! Record descriptors: the compile-time generated view of a struct's fields.

use core::any::{Any, TypeId};

use crate::DeclaredType;

/// The key token that excludes a field from decoding and encoding.
///
/// `#[loose(rename = "-")]` and `#[loose(skip)]` mean the same thing.
pub const EXCLUSION_SENTINEL: &str = "-";

/// A struct that can be filled in by the loose decoder.
///
/// Normally derived with `#[derive(Record)]`. A hand-written impl must keep
/// `field_mut` and `field_ref` consistent with [`Record::SHAPE`]: index `i`
/// of the accessors is `SHAPE.fields[i]`, and the returned storage has the
/// field's declared type.
pub trait Record {
    /// The static descriptor of this record type.
    const SHAPE: &'static Shape;

    /// Mutable, type-erased access to the field at `index`.
    fn field_mut(&mut self, index: usize) -> Option<&mut dyn Any>;

    /// Shared, type-erased access to the field at `index`.
    fn field_ref(&self, index: usize) -> Option<&dyn Any>;
}

/// Describes a record type.
#[derive(Clone, Copy, Debug)]
pub struct Shape {
    /// The type's name, without module path.
    pub type_identifier: &'static str,

    /// All fields, in declaration order.
    pub fields: &'static [Field],
}

impl Shape {
    /// Looks a field up by its declared name.
    pub fn field_by_name(&self, name: &str) -> Option<(usize, &'static Field)> {
        self.fields
            .iter()
            .enumerate()
            .find(|(_, field)| field.name == name)
    }
}

/// Describes one field of a record.
#[derive(Clone, Copy, Debug)]
pub struct Field {
    /// The field's declared name (raw identifiers have their `r#` stripped).
    pub name: &'static str,

    /// The external key from `#[loose(rename = "...")]`, if any.
    pub rename: Option<&'static str>,

    /// Set by `#[loose(skip)]`.
    pub skip: bool,

    /// The id of the field's type.
    ///
    /// A function so that it can live in a `const`.
    pub type_id: fn() -> TypeId,

    /// The name of the field's type, for diagnostics.
    pub type_name: fn() -> &'static str,
}

impl Field {
    /// Creates a field with no rename and no skip.
    pub const fn new(
        name: &'static str,
        type_id: fn() -> TypeId,
        type_name: fn() -> &'static str,
    ) -> Self {
        Field {
            name,
            rename: None,
            skip: false,
            type_id,
            type_name,
        }
    }

    /// Sets the external key.
    pub const fn rename(mut self, rename: &'static str) -> Self {
        self.rename = Some(rename);
        self
    }

    /// Excludes the field.
    pub const fn skip(mut self) -> Self {
        self.skip = true;
        self
    }

    /// The key this field is primarily looked up and written under: the
    /// rename if present and non-empty, the declared name otherwise.
    pub fn key(&self) -> &'static str {
        match self.rename {
            Some(rename) if !rename.is_empty() => rename,
            _ => self.name,
        }
    }

    /// Whether the field must never be populated from (or written to) JSON.
    pub fn is_excluded(&self) -> bool {
        self.skip || self.rename == Some(EXCLUSION_SENTINEL)
    }

    /// Classifies the field's type, `None` if it is not supported.
    pub fn declared_type(&self) -> Option<DeclaredType> {
        DeclaredType::from_type_id((self.type_id)())
    }

    /// The name of the field's type.
    pub fn type_name(&self) -> &'static str {
        (self.type_name)()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{IntType, ScalarType};
    use core::any::type_name;

    const PLAIN: Field = Field::new("Count", TypeId::of::<i32>, type_name::<i32>);

    #[test]
    fn key_prefers_non_empty_rename() {
        assert_eq!(PLAIN.key(), "Count");
        assert_eq!(PLAIN.rename("count").key(), "count");
        assert_eq!(PLAIN.rename("").key(), "Count");
    }

    #[test]
    fn exclusion() {
        assert!(!PLAIN.is_excluded());
        assert!(PLAIN.skip().is_excluded());
        assert!(PLAIN.rename(EXCLUSION_SENTINEL).is_excluded());
    }

    #[test]
    fn declared_type_of_field() {
        assert_eq!(
            PLAIN.declared_type(),
            Some(DeclaredType {
                scalar: ScalarType::Int(IntType::I32),
                optional: false
            })
        );
        let bytes = Field::new("raw", TypeId::of::<Vec<u8>>, type_name::<Vec<u8>>);
        assert_eq!(bytes.declared_type(), None);
        assert!(bytes.type_name().contains("Vec<u8>"));
    }

    #[test]
    fn field_by_name() {
        static FIELDS: [Field; 2] = [
            Field::new("a", TypeId::of::<bool>, type_name::<bool>),
            Field::new("b", TypeId::of::<String>, type_name::<String>),
        ];
        let shape = Shape {
            type_identifier: "Pair",
            fields: &FIELDS,
        };
        assert_eq!(shape.field_by_name("b").map(|(i, f)| (i, f.name)), Some((1, "b")));
        assert!(shape.field_by_name("c").is_none());
    }
}
