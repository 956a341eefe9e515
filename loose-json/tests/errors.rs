use core::any::{Any, TypeId, type_name};

use loose_json::{DecodeErrorKind, Field, Record, Shape};
use loose_json_testhelpers::test;

#[derive(Record, Debug, Default)]
struct Counter {
    n: i32,
}

#[test]
fn unparsable_string_is_a_conversion_error() {
    let err = loose_json::from_str::<Counter>(r#"{"n": "not-a-number"}"#).unwrap_err();
    assert_eq!(err.record, "Counter");
    assert_eq!(err.kind.code(), "loose_json::conversion");
    insta::assert_snapshot!(err.to_string(), @r#"can't convert "not-a-number" (key `n`) to i32 for field `n`"#);
}

#[test]
fn conversion_error_names_the_key_it_came_from() {
    #[derive(Record, Debug, Default)]
    #[allow(non_snake_case)]
    struct Port {
        #[loose(rename = "port")]
        Value: Option<u8>,
    }

    let err = loose_json::from_str::<Port>(r#"{"Value": "300"}"#).unwrap_err();
    let DecodeErrorKind::Conversion {
        field,
        key,
        declared,
        value,
    } = &err.kind
    else {
        panic!("expected a conversion error, got {err:?}");
    };
    assert_eq!(*field, "Value");
    assert_eq!(key, "Value");
    assert_eq!(declared.to_string(), "Option<u8>");
    assert_eq!(value, r#""300""#);
}

#[test]
fn out_of_range_strings_are_rejected() {
    #[derive(Record, Debug, Default)]
    struct Small {
        byte: u8,
        ratio: f32,
        big: f64,
    }

    for json in [
        r#"{"byte": "256"}"#,
        r#"{"byte": "-1"}"#,
        r#"{"ratio": "1e400"}"#,
        r#"{"big": "1e400"}"#,
        r#"{"big": "nope"}"#,
    ] {
        let err = loose_json::from_str::<Small>(json).unwrap_err();
        assert_eq!(err.kind.code(), "loose_json::conversion", "{json}");
    }
}

#[test]
fn unsupported_field_type_is_reported_before_lookup() {
    #[derive(Record, Debug, Default)]
    struct Blob {
        raw: Vec<u8>,
    }

    let err = loose_json::from_str::<Blob>("{}").unwrap_err();
    let DecodeErrorKind::UnsupportedFieldType { field, type_name } = err.kind else {
        panic!("expected an unsupported field type error, got {err:?}");
    };
    assert_eq!(field, "raw");
    assert!(type_name.contains("Vec<u8>"), "{type_name}");
}

#[test]
fn nested_options_and_wide_integers_are_unsupported() {
    #[derive(Record, Debug, Default)]
    struct Nested {
        n: Option<Option<i32>>,
    }
    #[derive(Record, Debug, Default)]
    struct Wide {
        n: i128,
    }

    let err = loose_json::from_str::<Nested>(r#"{"n": 1}"#).unwrap_err();
    assert_eq!(err.kind.code(), "loose_json::unsupported_field_type");
    let err = loose_json::from_str::<Wide>(r#"{"n": 1}"#).unwrap_err();
    assert_eq!(err.kind.code(), "loose_json::unsupported_field_type");
}

#[test]
fn malformed_input() {
    for json in ["", "{", r#"{"n": }"#, "[1, 2]", "42", r#""n""#, "null"] {
        let err = loose_json::from_str::<Counter>(json).unwrap_err();
        assert!(
            matches!(err.kind, DecodeErrorKind::MalformedJson(_)),
            "{json:?}: {err:?}"
        );
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().starts_with("malformed JSON: "), "{err}");
    }
}

#[derive(Record, Debug, Default, PartialEq)]
struct Triple {
    a: i32,
    b: i32,
    c: i32,
}

#[test]
fn earlier_writes_are_kept_on_failure() {
    let mut triple = Triple::default();
    let err = loose_json::from_str_into(r#"{"a": 1, "b": "x", "c": 3}"#, &mut triple).unwrap_err();
    assert_eq!(err.kind.code(), "loose_json::conversion");
    assert!(std::error::Error::source(&err).is_none());
    assert_eq!(triple, Triple { a: 1, b: 0, c: 0 });
}

#[test]
fn unsupported_field_stops_decoding_midway() {
    #[derive(Record, Debug, Default)]
    struct Mixed {
        before: u16,
        raw: Vec<u8>,
        after: u16,
    }

    let mut mixed = Mixed::default();
    let err = loose_json::from_str_into(r#"{"before": 1, "after": 2}"#, &mut mixed).unwrap_err();
    assert_eq!(err.kind.code(), "loose_json::unsupported_field_type");
    assert_eq!(mixed.before, 1);
    assert_eq!(mixed.after, 0);
    assert!(mixed.raw.is_empty());
}

/// Claims an `i32` field but stores a `u8`.
#[derive(Debug, Default)]
struct Mismatched {
    n: u8,
}

impl Record for Mismatched {
    const SHAPE: &'static Shape = &Shape {
        type_identifier: "Mismatched",
        fields: &[Field::new("n", TypeId::of::<i32>, type_name::<i32>)],
    };

    fn field_mut(&mut self, index: usize) -> Option<&mut dyn Any> {
        match index {
            0 => Some(&mut self.n),
            _ => None,
        }
    }

    fn field_ref(&self, index: usize) -> Option<&dyn Any> {
        match index {
            0 => Some(&self.n),
            _ => None,
        }
    }
}

/// Declares a field but exposes no storage for it.
#[derive(Debug, Default)]
struct Hollow;

impl Record for Hollow {
    const SHAPE: &'static Shape = &Shape {
        type_identifier: "Hollow",
        fields: &[Field::new("ghost", TypeId::of::<bool>, type_name::<bool>)],
    };

    fn field_mut(&mut self, _index: usize) -> Option<&mut dyn Any> {
        None
    }

    fn field_ref(&self, _index: usize) -> Option<&dyn Any> {
        None
    }
}

#[test]
fn storage_of_the_wrong_type_is_an_invalid_target() {
    let mut mismatched = Mismatched::default();
    let err = loose_json::from_str_into(r#"{"n": 7}"#, &mut mismatched).unwrap_err();
    assert_eq!(err.record, "Mismatched");
    assert_eq!(err.kind.code(), "loose_json::invalid_target");
    insta::assert_snapshot!(err.to_string(), @"invalid target: field `n` storage does not match its declared type");
    assert_eq!(mismatched.n, 0);
}

#[test]
fn missing_storage_is_an_invalid_target() {
    let mut hollow = Hollow;
    let err = loose_json::from_str_into(r#"{"ghost": true}"#, &mut hollow).unwrap_err();
    assert_eq!(err.kind.code(), "loose_json::invalid_target");
    insta::assert_snapshot!(err.to_string(), @"invalid target: field `ghost` is not accessible");

    // Nothing to write, nothing to check.
    loose_json::from_str_into("{}", &mut hollow).unwrap();
}

#[test]
fn encoding_reports_invalid_records() {
    let err = loose_json::to_value(&Mismatched::default()).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"field `Mismatched::n` does not match its shape");
    let err = loose_json::to_value(&Hollow).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"field `Hollow::ghost` does not match its shape");
}
