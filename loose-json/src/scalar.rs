//! Scalar type identification for record fields.
//!
//! A field's declared type is classified at runtime from its [`TypeId`]: one
//! of the supported scalars, optionally wrapped in [`Option`]. Everything else
//! is unsupported.

use core::any::{Any, TypeId};
use core::fmt;

macro_rules! int_types {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        /// Integer types a field may declare.
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
        pub enum IntType {
            $(
                #[doc = concat!("Primitive type `", stringify!($ty), "`.")]
                $variant,
            )*
        }

        impl IntType {
            /// Every supported integer type.
            pub const ALL: &'static [IntType] = &[$(IntType::$variant),*];

            /// The Rust spelling of this type.
            pub const fn name(self) -> &'static str {
                match self {
                    $(IntType::$variant => stringify!($ty),)*
                }
            }

            fn type_ids(self) -> (TypeId, TypeId) {
                match self {
                    $(IntType::$variant => (TypeId::of::<$ty>(), TypeId::of::<Option<$ty>>()),)*
                }
            }

            /// Clamps `value` into this type's range.
            pub(crate) fn saturating(self, value: i128) -> Scalar {
                match self {
                    $(IntType::$variant => Scalar::$variant(
                        value.clamp(<$ty>::MIN as i128, <$ty>::MAX as i128) as $ty,
                    ),)*
                }
            }

            /// Converts `value`, or `None` if it does not fit.
            pub(crate) fn exact(self, value: i128) -> Option<Scalar> {
                match self {
                    $(IntType::$variant => <$ty>::try_from(value).ok().map(Scalar::$variant),)*
                }
            }
        }
    };
}

int_types! {
    I8 => i8,
    I16 => i16,
    I32 => i32,
    I64 => i64,
    ISize => isize,
    U8 => u8,
    U16 => u16,
    U32 => u32,
    U64 => u64,
    USize => usize,
}

/// Floating-point types a field may declare.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum FloatType {
    /// Primitive type `f32`.
    F32,
    /// Primitive type `f64`.
    F64,
}

impl FloatType {
    /// The Rust spelling of this type.
    pub const fn name(self) -> &'static str {
        match self {
            FloatType::F32 => "f32",
            FloatType::F64 => "f64",
        }
    }
}

/// The four scalar families a field can hold, with the concrete width for
/// numeric families.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum ScalarType {
    /// `bool`
    Bool,
    /// One of the integer primitives.
    Int(IntType),
    /// `f32` or `f64`.
    Float(FloatType),
    /// `String`
    String,
}

impl ScalarType {
    /// Every supported scalar type.
    pub const ALL: &'static [ScalarType] = &[
        ScalarType::Bool,
        ScalarType::Int(IntType::I8),
        ScalarType::Int(IntType::I16),
        ScalarType::Int(IntType::I32),
        ScalarType::Int(IntType::I64),
        ScalarType::Int(IntType::ISize),
        ScalarType::Int(IntType::U8),
        ScalarType::Int(IntType::U16),
        ScalarType::Int(IntType::U32),
        ScalarType::Int(IntType::U64),
        ScalarType::Int(IntType::USize),
        ScalarType::Float(FloatType::F32),
        ScalarType::Float(FloatType::F64),
        ScalarType::String,
    ];

    /// The Rust spelling of this type.
    pub const fn name(self) -> &'static str {
        match self {
            ScalarType::Bool => "bool",
            ScalarType::Int(ty) => ty.name(),
            ScalarType::Float(ty) => ty.name(),
            ScalarType::String => "String",
        }
    }

    /// Returns the `(T, Option<T>)` type ids for this scalar.
    fn type_ids(self) -> (TypeId, TypeId) {
        match self {
            ScalarType::Bool => (TypeId::of::<bool>(), TypeId::of::<Option<bool>>()),
            ScalarType::Int(ty) => ty.type_ids(),
            ScalarType::Float(FloatType::F32) => {
                (TypeId::of::<f32>(), TypeId::of::<Option<f32>>())
            }
            ScalarType::Float(FloatType::F64) => {
                (TypeId::of::<f64>(), TypeId::of::<Option<f64>>())
            }
            ScalarType::String => (TypeId::of::<String>(), TypeId::of::<Option<String>>()),
        }
    }
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A field's declared type: a scalar, possibly wrapped in `Option`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct DeclaredType {
    /// The scalar the field holds.
    pub scalar: ScalarType,
    /// Whether the field is `Option<scalar>`.
    pub optional: bool,
}

impl DeclaredType {
    /// Classifies a type by its id.
    ///
    /// Returns `None` for anything that is not one of the supported scalars
    /// or an `Option` of one.
    ///
    /// ```
    /// use core::any::TypeId;
    /// use loose_json::{DeclaredType, IntType, ScalarType};
    ///
    /// let declared = DeclaredType::from_type_id(TypeId::of::<Option<u16>>()).unwrap();
    /// assert_eq!(declared.scalar, ScalarType::Int(IntType::U16));
    /// assert!(declared.optional);
    /// assert!(DeclaredType::from_type_id(TypeId::of::<Vec<u8>>()).is_none());
    /// ```
    pub fn from_type_id(id: TypeId) -> Option<Self> {
        ScalarType::ALL.iter().find_map(|&scalar| {
            let (plain, optional) = scalar.type_ids();
            if id == plain {
                Some(DeclaredType {
                    scalar,
                    optional: false,
                })
            } else if id == optional {
                Some(DeclaredType {
                    scalar,
                    optional: true,
                })
            } else {
                None
            }
        })
    }

    /// Reads the current value out of a field slot.
    ///
    /// Returns `None` if the slot does not hold this type, `Some(None)` for an
    /// empty optional field.
    pub(crate) fn peek(self, slot: &dyn Any) -> Option<Option<Scalar>> {
        macro_rules! peek {
            ($ty:ty, $variant:ident) => {
                if self.optional {
                    slot.downcast_ref::<Option<$ty>>()
                        .map(|v| v.to_owned().map(Scalar::$variant))
                } else {
                    slot.downcast_ref::<$ty>()
                        .map(|v| Some(Scalar::$variant(v.to_owned())))
                }
            };
        }

        match self.scalar {
            ScalarType::Bool => peek!(bool, Bool),
            ScalarType::Int(IntType::I8) => peek!(i8, I8),
            ScalarType::Int(IntType::I16) => peek!(i16, I16),
            ScalarType::Int(IntType::I32) => peek!(i32, I32),
            ScalarType::Int(IntType::I64) => peek!(i64, I64),
            ScalarType::Int(IntType::ISize) => peek!(isize, ISize),
            ScalarType::Int(IntType::U8) => peek!(u8, U8),
            ScalarType::Int(IntType::U16) => peek!(u16, U16),
            ScalarType::Int(IntType::U32) => peek!(u32, U32),
            ScalarType::Int(IntType::U64) => peek!(u64, U64),
            ScalarType::Int(IntType::USize) => peek!(usize, USize),
            ScalarType::Float(FloatType::F32) => peek!(f32, F32),
            ScalarType::Float(FloatType::F64) => peek!(f64, F64),
            ScalarType::String => peek!(String, String),
        }
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.optional {
            write!(f, "Option<{}>", self.scalar)
        } else {
            write!(f, "{}", self.scalar)
        }
    }
}

/// A coerced value, ready to be written into a field.
#[derive(Clone, PartialEq, Debug)]
pub enum Scalar {
    /// `bool`
    Bool(bool),
    /// `i8`
    I8(i8),
    /// `i16`
    I16(i16),
    /// `i32`
    I32(i32),
    /// `i64`
    I64(i64),
    /// `isize`
    ISize(isize),
    /// `u8`
    U8(u8),
    /// `u16`
    U16(u16),
    /// `u32`
    U32(u32),
    /// `u64`
    U64(u64),
    /// `usize`
    USize(usize),
    /// `f32`
    F32(f32),
    /// `f64`
    F64(f64),
    /// `String`
    String(String),
}

impl Scalar {
    /// The type this value was coerced to.
    pub const fn scalar_type(&self) -> ScalarType {
        match self {
            Scalar::Bool(_) => ScalarType::Bool,
            Scalar::I8(_) => ScalarType::Int(IntType::I8),
            Scalar::I16(_) => ScalarType::Int(IntType::I16),
            Scalar::I32(_) => ScalarType::Int(IntType::I32),
            Scalar::I64(_) => ScalarType::Int(IntType::I64),
            Scalar::ISize(_) => ScalarType::Int(IntType::ISize),
            Scalar::U8(_) => ScalarType::Int(IntType::U8),
            Scalar::U16(_) => ScalarType::Int(IntType::U16),
            Scalar::U32(_) => ScalarType::Int(IntType::U32),
            Scalar::U64(_) => ScalarType::Int(IntType::U64),
            Scalar::USize(_) => ScalarType::Int(IntType::USize),
            Scalar::F32(_) => ScalarType::Float(FloatType::F32),
            Scalar::F64(_) => ScalarType::Float(FloatType::F64),
            Scalar::String(_) => ScalarType::String,
        }
    }

    /// Writes this value into a field slot, wrapping it in `Some` for
    /// optional fields.
    ///
    /// Returns `false` (and leaves the slot alone) if the slot's type does not
    /// match.
    pub(crate) fn poke(self, slot: &mut dyn Any, optional: bool) -> bool {
        macro_rules! poke {
            ($value:expr, $ty:ty) => {{
                if optional {
                    if let Some(slot) = slot.downcast_mut::<Option<$ty>>() {
                        *slot = Some($value);
                        return true;
                    }
                } else if let Some(slot) = slot.downcast_mut::<$ty>() {
                    *slot = $value;
                    return true;
                }
                false
            }};
        }

        match self {
            Scalar::Bool(v) => poke!(v, bool),
            Scalar::I8(v) => poke!(v, i8),
            Scalar::I16(v) => poke!(v, i16),
            Scalar::I32(v) => poke!(v, i32),
            Scalar::I64(v) => poke!(v, i64),
            Scalar::ISize(v) => poke!(v, isize),
            Scalar::U8(v) => poke!(v, u8),
            Scalar::U16(v) => poke!(v, u16),
            Scalar::U32(v) => poke!(v, u32),
            Scalar::U64(v) => poke!(v, u64),
            Scalar::USize(v) => poke!(v, usize),
            Scalar::F32(v) => poke!(v, f32),
            Scalar::F64(v) => poke!(v, f64),
            Scalar::String(v) => poke!(v, String),
        }
    }
}
