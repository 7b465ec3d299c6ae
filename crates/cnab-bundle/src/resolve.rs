//! Typed resolution of parameter payloads.
//!
//! The typed entry points ([`resolve_default_as`], [`resolve_allowed_as`])
//! check the declared type against the requested native type before touching
//! the payload. The type-erased entry points ([`resolve_default`],
//! [`resolve_allowed`]) validate the declared type once and dispatch to the
//! matching typed path.
//!
//! Every call decodes from the raw payload again; nothing is cached.

use serde::de::DeserializeOwned;

use crate::error::ParameterError;
use crate::value::{NativeType, ParameterType, ParameterValue, PayloadKind, RawPayload};

/// Resolve a default value payload as `T`.
///
/// Returns `Ok(None)` when no default was supplied (absent, blank or `null`).
pub fn resolve_default_as<T: NativeType>(
  declared: &str,
  raw: &RawPayload,
) -> Result<Option<T>, ParameterError> {
  expect_type::<T>(declared)?;
  decode(raw, PayloadKind::DefaultValue, T::PARAMETER_TYPE)
}

/// Resolve an allowed values payload as a list of `T`, in document order.
///
/// Returns an empty list when no restriction was supplied.
pub fn resolve_allowed_as<T: NativeType>(
  declared: &str,
  raw: &RawPayload,
) -> Result<Vec<T>, ParameterError> {
  expect_type::<T>(declared)?;
  let values = decode::<Vec<T>>(raw, PayloadKind::AllowedValues, T::PARAMETER_TYPE)?;
  Ok(values.unwrap_or_default())
}

/// Resolve a default value payload according to a declared type read from a
/// document.
pub fn resolve_default(
  declared: &str,
  raw: &RawPayload,
) -> Result<Option<ParameterValue>, ParameterError> {
  declared.parse::<ParameterType>()?.resolve_default(raw)
}

/// Resolve an allowed values payload according to a declared type read from
/// a document.
pub fn resolve_allowed(
  declared: &str,
  raw: &RawPayload,
) -> Result<Vec<ParameterValue>, ParameterError> {
  declared.parse::<ParameterType>()?.resolve_allowed(raw)
}

impl ParameterType {
  /// Resolve a default value payload as this type.
  pub fn resolve_default(self, raw: &RawPayload) -> Result<Option<ParameterValue>, ParameterError> {
    match self {
      ParameterType::String => erased_default::<String>(raw),
      ParameterType::Int => erased_default::<i64>(raw),
      ParameterType::Boolean => erased_default::<bool>(raw),
    }
  }

  /// Resolve an allowed values payload as this type. Every element of the
  /// result has this type.
  pub fn resolve_allowed(self, raw: &RawPayload) -> Result<Vec<ParameterValue>, ParameterError> {
    match self {
      ParameterType::String => erased_allowed::<String>(raw),
      ParameterType::Int => erased_allowed::<i64>(raw),
      ParameterType::Boolean => erased_allowed::<bool>(raw),
    }
  }
}

fn erased_default<T: NativeType>(raw: &RawPayload) -> Result<Option<ParameterValue>, ParameterError> {
  let value = resolve_default_as::<T>(T::PARAMETER_TYPE.as_str(), raw)?;
  Ok(value.map(Into::into))
}

fn erased_allowed<T: NativeType>(raw: &RawPayload) -> Result<Vec<ParameterValue>, ParameterError> {
  let values = resolve_allowed_as::<T>(T::PARAMETER_TYPE.as_str(), raw)?;
  Ok(values.into_iter().map(Into::into).collect())
}

fn expect_type<T: NativeType>(declared: &str) -> Result<(), ParameterError> {
  if declared == T::PARAMETER_TYPE.as_str() {
    Ok(())
  } else {
    Err(ParameterError::TypeMismatch {
      declared: declared.to_string(),
      expected: T::PARAMETER_TYPE,
    })
  }
}

fn decode<V: DeserializeOwned>(
  raw: &RawPayload,
  payload: PayloadKind,
  expected: ParameterType,
) -> Result<Option<V>, ParameterError> {
  let Some(json) = raw.supplied() else {
    return Ok(None);
  };

  serde_json::from_str(json)
    .map(Some)
    .map_err(|source| ParameterError::Decode {
      payload,
      expected,
      source,
    })
}

#[cfg(test)]
mod tests {
  use proptest::prelude::*;

  use super::*;

  fn payload(json: &str) -> RawPayload {
    RawPayload::from_json(json).unwrap()
  }

  fn unset_payloads() -> Vec<RawPayload> {
    vec![
      RawPayload::absent(),
      payload(""),
      payload("   "),
      payload("null"),
      payload("  null\n"),
    ]
  }

  fn assert_mismatch(err: ParameterError, declared: &str, expected: ParameterType) {
    match err {
      ParameterError::TypeMismatch {
        declared: actual,
        expected: target,
      } => {
        assert_eq!(actual, declared);
        assert_eq!(target, expected);
      }
      other => panic!("expected type mismatch, got: {}", other),
    }
  }

  fn assert_decode_error(err: ParameterError, kind: PayloadKind) {
    match err {
      ParameterError::Decode { payload, .. } => assert_eq!(payload, kind),
      other => panic!("expected decode error, got: {}", other),
    }
  }

  #[test]
  fn test_boolean_default() {
    let value = resolve_default_as::<bool>("boolean", &payload("true")).unwrap();
    assert_eq!(value, Some(true));

    let value = resolve_default("boolean", &payload("true")).unwrap();
    assert_eq!(value, Some(ParameterValue::Boolean(true)));
  }

  #[test]
  fn test_int_default_missing() {
    let value = resolve_default_as::<i64>("int", &payload("")).unwrap();
    assert_eq!(value, None);

    let value = resolve_default("int", &RawPayload::absent()).unwrap();
    assert_eq!(value, None);
  }

  #[test]
  fn test_string_allowed_keeps_duplicates() {
    let values = resolve_allowed_as::<String>("string", &payload(r#"["a","b","a"]"#)).unwrap();
    assert_eq!(values, vec!["a", "b", "a"]);

    let values = resolve_allowed("string", &payload(r#"["a","b","a"]"#)).unwrap();
    assert_eq!(
      values,
      vec![
        ParameterValue::String("a".into()),
        ParameterValue::String("b".into()),
        ParameterValue::String("a".into()),
      ]
    );
  }

  #[test]
  fn test_string_default_rejects_number() {
    let err = resolve_default_as::<String>("string", &payload("42")).unwrap_err();
    assert_decode_error(err, PayloadKind::DefaultValue);

    let err = resolve_default("string", &payload("42")).unwrap_err();
    assert_decode_error(err, PayloadKind::DefaultValue);
  }

  #[test]
  fn test_unsupported_type_in_erased_calls() {
    let err = resolve_default("currency", &payload("\"usd\"")).unwrap_err();
    assert!(matches!(err, ParameterError::UnsupportedType { ref declared } if declared == "currency"));
    assert_eq!(err.to_string(), "unsupported parameter type \"currency\"");

    let err = resolve_allowed("currency", &RawPayload::absent()).unwrap_err();
    assert!(matches!(err, ParameterError::UnsupportedType { .. }));
  }

  #[test]
  fn test_int_allowed_null_is_empty() {
    let values = resolve_allowed_as::<i64>("int", &payload("null")).unwrap();
    assert!(values.is_empty());

    let values = resolve_allowed("int", &payload("null")).unwrap();
    assert!(values.is_empty());
  }

  #[test]
  fn test_unset_payloads_for_every_type() {
    for raw in unset_payloads() {
      assert_eq!(resolve_default_as::<String>("string", &raw).unwrap(), None);
      assert_eq!(resolve_default_as::<i64>("int", &raw).unwrap(), None);
      assert_eq!(resolve_default_as::<bool>("boolean", &raw).unwrap(), None);

      assert!(resolve_allowed_as::<String>("string", &raw).unwrap().is_empty());
      assert!(resolve_allowed_as::<i64>("int", &raw).unwrap().is_empty());
      assert!(resolve_allowed_as::<bool>("boolean", &raw).unwrap().is_empty());

      for ty in ParameterType::ALL {
        assert_eq!(ty.resolve_default(&raw).unwrap(), None);
        assert!(ty.resolve_allowed(&raw).unwrap().is_empty());
      }
    }
  }

  #[test]
  fn test_mismatch_even_with_empty_payload() {
    let empty = RawPayload::absent();

    assert_mismatch(
      resolve_default_as::<bool>("string", &empty).unwrap_err(),
      "string",
      ParameterType::Boolean,
    );
    assert_mismatch(
      resolve_allowed_as::<String>("int", &empty).unwrap_err(),
      "int",
      ParameterType::String,
    );
    assert_mismatch(
      resolve_default_as::<i64>("boolean", &payload("1")).unwrap_err(),
      "boolean",
      ParameterType::Int,
    );
  }

  #[test]
  fn test_mismatch_names_unknown_declared_type() {
    let err = resolve_default_as::<String>("currency", &payload("\"usd\"")).unwrap_err();
    assert_eq!(
      err.to_string(),
      "parameter type is \"currency\", not \"string\""
    );
  }

  #[test]
  fn test_allowed_preserves_order() {
    let values = resolve_allowed_as::<i64>("int", &payload("[3, 1, 2]")).unwrap();
    assert_eq!(values, vec![3, 1, 2]);

    let values = resolve_allowed_as::<bool>("boolean", &payload("[true, false, true]")).unwrap();
    assert_eq!(values, vec![true, false, true]);
  }

  #[test]
  fn test_allowed_rejects_any_bad_element() {
    let err = resolve_allowed_as::<String>("string", &payload(r#"["a", 1, "b"]"#)).unwrap_err();
    assert_decode_error(err, PayloadKind::AllowedValues);

    let err = resolve_allowed("int", &payload("[1, null]")).unwrap_err();
    assert_decode_error(err, PayloadKind::AllowedValues);
  }

  #[test]
  fn test_allowed_requires_array() {
    let err = resolve_allowed_as::<i64>("int", &payload("5")).unwrap_err();
    assert_decode_error(err, PayloadKind::AllowedValues);
  }

  #[test]
  fn test_no_coercion() {
    let err = resolve_default_as::<bool>("boolean", &payload("\"true\"")).unwrap_err();
    assert_decode_error(err, PayloadKind::DefaultValue);

    let err = resolve_default_as::<i64>("int", &payload("\"1\"")).unwrap_err();
    assert_decode_error(err, PayloadKind::DefaultValue);

    let err = resolve_default_as::<i64>("int", &payload("3.5")).unwrap_err();
    assert_decode_error(err, PayloadKind::DefaultValue);

    let err = resolve_default_as::<bool>("boolean", &payload("1")).unwrap_err();
    assert_decode_error(err, PayloadKind::DefaultValue);
  }

  #[test]
  fn test_int_out_of_range_is_decode_error() {
    let err = resolve_default_as::<i64>("int", &payload("9223372036854775808")).unwrap_err();
    assert_decode_error(err, PayloadKind::DefaultValue);
  }

  #[test]
  fn test_decode_error_message() {
    let err = resolve_default_as::<String>("string", &payload("42")).unwrap_err();
    assert!(
      err
        .to_string()
        .starts_with("invalid default value for string parameter: "),
      "unexpected message: {}",
      err
    );
    assert!(std::error::Error::source(&err).is_some());
  }

  #[test]
  fn test_erased_results_match_declared_type() {
    let values = ParameterType::Int.resolve_allowed(&payload("[1, 2]")).unwrap();
    assert!(values.iter().all(|v| v.parameter_type() == ParameterType::Int));

    let value = ParameterType::String.resolve_default(&payload("\"x\"")).unwrap();
    assert_eq!(value.unwrap().parameter_type(), ParameterType::String);
  }

  #[test]
  fn test_erased_never_infers_from_payload() {
    // A boolean payload under a string declaration is a decode error, not a boolean.
    let err = resolve_default("string", &payload("true")).unwrap_err();
    assert_decode_error(err, PayloadKind::DefaultValue);
  }

  fn declared_tag() -> impl Strategy<Value = ParameterType> {
    prop::sample::select(ParameterType::ALL.to_vec())
  }

  fn typed_default(declared: &str, ty: ParameterType, raw: &RawPayload) -> Result<(), ParameterError> {
    match ty {
      ParameterType::String => resolve_default_as::<String>(declared, raw).map(|_| ()),
      ParameterType::Int => resolve_default_as::<i64>(declared, raw).map(|_| ()),
      ParameterType::Boolean => resolve_default_as::<bool>(declared, raw).map(|_| ()),
    }
  }

  fn typed_allowed(declared: &str, ty: ParameterType, raw: &RawPayload) -> Result<(), ParameterError> {
    match ty {
      ParameterType::String => resolve_allowed_as::<String>(declared, raw).map(|_| ()),
      ParameterType::Int => resolve_allowed_as::<i64>(declared, raw).map(|_| ()),
      ParameterType::Boolean => resolve_allowed_as::<bool>(declared, raw).map(|_| ()),
    }
  }

  proptest! {
    #[test]
    fn string_default_round_trips(value in ".*") {
      let raw = RawPayload::from_value(&value).unwrap();
      prop_assert_eq!(resolve_default_as::<String>("string", &raw).unwrap(), Some(value));
    }

    #[test]
    fn int_default_round_trips(value in any::<i64>()) {
      let raw = RawPayload::from_value(&value).unwrap();
      prop_assert_eq!(resolve_default_as::<i64>("int", &raw).unwrap(), Some(value));
    }

    #[test]
    fn bool_default_round_trips(value in any::<bool>()) {
      let raw = RawPayload::from_value(&value).unwrap();
      prop_assert_eq!(resolve_default_as::<bool>("boolean", &raw).unwrap(), Some(value));
    }

    #[test]
    fn int_allowed_round_trips_in_order(values in prop::collection::vec(any::<i64>(), 0..16)) {
      let raw = RawPayload::from_value(&values).unwrap();
      prop_assert_eq!(resolve_allowed_as::<i64>("int", &raw).unwrap(), values);
    }

    #[test]
    fn cross_type_calls_always_mismatch(
      declared in declared_tag(),
      requested in declared_tag(),
      json in prop::sample::select(vec!["", "null", "true", "42", "\"x\"", "[1]", "[\"a\"]"]),
    ) {
      prop_assume!(declared != requested);
      let raw = RawPayload::from_json(json).unwrap();

      let is_mismatch = |result: Result<(), ParameterError>| {
        matches!(result, Err(ParameterError::TypeMismatch { .. }))
      };
      prop_assert!(is_mismatch(typed_default(declared.as_str(), requested, &raw)));
      prop_assert!(is_mismatch(typed_allowed(declared.as_str(), requested, &raw)));
    }
  }
}
