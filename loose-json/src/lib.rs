#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

/// Trace-level logging macro that forwards to `tracing::trace!` when the `tracing` feature is enabled.
#[cfg(feature = "tracing")]
#[allow(unused_macros)]
macro_rules! trace {
    ($($arg:tt)*) => {
        ::tracing::trace!($($arg)*)
    };
}

/// Trace-level logging macro (no-op when `tracing` feature is disabled).
#[cfg(not(feature = "tracing"))]
#[allow(unused_macros)]
macro_rules! trace {
    ($($arg:tt)*) => {};
}

/// Debug-level logging macro that forwards to `tracing::debug!` when the `tracing` feature is enabled.
#[cfg(feature = "tracing")]
#[allow(unused_macros)]
macro_rules! debug {
    ($($arg:tt)*) => {
        ::tracing::debug!($($arg)*)
    };
}

/// Debug-level logging macro (no-op when `tracing` feature is disabled).
#[cfg(not(feature = "tracing"))]
#[allow(unused_macros)]
macro_rules! debug {
    ($($arg:tt)*) => {};
}

#[allow(unused_imports)]
pub(crate) use debug;
#[allow(unused_imports)]
pub(crate) use trace;

mod coerce;
mod deserialize;
mod error;
mod resolve;
mod scalar;
mod serialize;
mod shape;
mod value;

pub use deserialize::{
    DecodeOptions, from_map_into, from_slice, from_slice_into, from_slice_into_with_options,
    from_str, from_str_into, from_str_into_with_options,
};
pub use error::{DecodeError, DecodeErrorKind, SerializeError};
pub use scalar::{DeclaredType, FloatType, IntType, Scalar, ScalarType};
pub use serialize::{to_string, to_string_pretty, to_value, to_vec};
pub use shape::{EXCLUSION_SENTINEL, Field, Record, Shape};
pub use value::{Number, SourceValue};

/// Derives [`Record`] for a struct with named fields.
///
/// Field attributes: `#[loose(rename = "key")]` sets the external key,
/// `#[loose(skip)]` (or `rename = "-"`) excludes the field.
pub use loose_json_macros::Record;
