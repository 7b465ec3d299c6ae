//! Parameter type tags, raw payloads and resolved values.
//!
//! A parameter's `defaultValue` and `allowedValues` are kept as raw JSON
//! until they are resolved against the parameter's declared type:
//!
//! ```json
//! {
//!   "type": "int",
//!   "defaultValue": 8080,
//!   "allowedValues": [80, 443, 8080]
//! }
//! ```
//!
//! Resolving the payloads above as `int` yields `Some(8080)` and
//! `[80, 443, 8080]`. Resolving them as any other type is an error.

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::value::RawValue;

use crate::error::ParameterError;

/// The declared data type of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ParameterType {
  #[serde(rename = "string")]
  String,
  #[serde(rename = "int")]
  Int,
  #[serde(rename = "boolean")]
  Boolean,
}

impl ParameterType {
  pub const ALL: [ParameterType; 3] = [
    ParameterType::String,
    ParameterType::Int,
    ParameterType::Boolean,
  ];

  /// The literal used for this type in a bundle document.
  pub fn as_str(self) -> &'static str {
    match self {
      ParameterType::String => "string",
      ParameterType::Int => "int",
      ParameterType::Boolean => "boolean",
    }
  }
}

impl fmt::Display for ParameterType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for ParameterType {
  type Err = ParameterError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "string" => Ok(ParameterType::String),
      "int" => Ok(ParameterType::Int),
      "boolean" => Ok(ParameterType::Boolean),
      other => Err(ParameterError::UnsupportedType {
        declared: other.to_string(),
      }),
    }
  }
}

/// Which of a parameter's two payloads is being resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
  DefaultValue,
  AllowedValues,
}

impl fmt::Display for PayloadKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      PayloadKind::DefaultValue => f.write_str("default value"),
      PayloadKind::AllowedValues => f.write_str("allowed values"),
    }
  }
}

/// A resolved parameter value whose variant follows the declared type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParameterValue {
  String(String),
  Int(i64),
  Boolean(bool),
}

impl ParameterValue {
  pub fn parameter_type(&self) -> ParameterType {
    match self {
      ParameterValue::String(_) => ParameterType::String,
      ParameterValue::Int(_) => ParameterType::Int,
      ParameterValue::Boolean(_) => ParameterType::Boolean,
    }
  }

  pub fn as_str(&self) -> Option<&str> {
    match self {
      ParameterValue::String(value) => Some(value.as_str()),
      _ => None,
    }
  }

  pub fn as_int(&self) -> Option<i64> {
    match self {
      ParameterValue::Int(value) => Some(*value),
      _ => None,
    }
  }

  pub fn as_bool(&self) -> Option<bool> {
    match self {
      ParameterValue::Boolean(value) => Some(*value),
      _ => None,
    }
  }
}

impl fmt::Display for ParameterValue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ParameterValue::String(value) => {
        let quoted = serde_json::to_string(value).map_err(|_| fmt::Error)?;
        f.write_str(&quoted)
      }
      ParameterValue::Int(value) => write!(f, "{}", value),
      ParameterValue::Boolean(value) => write!(f, "{}", value),
    }
  }
}

impl From<String> for ParameterValue {
  fn from(value: String) -> Self {
    ParameterValue::String(value)
  }
}

impl From<i64> for ParameterValue {
  fn from(value: i64) -> Self {
    ParameterValue::Int(value)
  }
}

impl From<bool> for ParameterValue {
  fn from(value: bool) -> Self {
    ParameterValue::Boolean(value)
  }
}

mod sealed {
  pub trait Sealed {}

  impl Sealed for String {}
  impl Sealed for i64 {}
  impl Sealed for bool {}
}

/// A Rust type that a parameter payload can be resolved into.
///
/// Implemented for exactly one native type per [`ParameterType`]:
/// `String` for `string`, `i64` for `int` and `bool` for `boolean`.
pub trait NativeType: sealed::Sealed + DeserializeOwned + Into<ParameterValue> {
  const PARAMETER_TYPE: ParameterType;
}

impl NativeType for String {
  const PARAMETER_TYPE: ParameterType = ParameterType::String;
}

impl NativeType for i64 {
  const PARAMETER_TYPE: ParameterType = ParameterType::Int;
}

impl NativeType for bool {
  const PARAMETER_TYPE: ParameterType = ParameterType::Boolean;
}

/// An undecoded JSON payload, or nothing when the field was omitted.
///
/// The JSON text is kept exactly as it appeared in the document and is only
/// decoded when resolved against a declared type. Must be deserialized
/// straight from JSON text; going through `serde_json::Value` loses it.
#[derive(Debug, Clone, Default)]
pub struct RawPayload(Option<Box<RawValue>>);

impl RawPayload {
  /// A payload for an omitted field.
  pub fn absent() -> Self {
    Self(None)
  }

  /// Wrap JSON text. Empty or whitespace-only text is treated as absent.
  pub fn from_json(json: impl Into<String>) -> Result<Self, serde_json::Error> {
    let json = json.into();
    if json.trim().is_empty() {
      return Ok(Self::absent());
    }
    RawValue::from_string(json).map(|raw| Self(Some(raw)))
  }

  /// Encode a value as a payload.
  pub fn from_value<T: Serialize + ?Sized>(value: &T) -> Result<Self, serde_json::Error> {
    serde_json::value::to_raw_value(value).map(|raw| Self(Some(raw)))
  }

  /// The payload's JSON text, verbatim. `None` only when absent.
  pub fn as_json(&self) -> Option<&str> {
    self.0.as_deref().map(RawValue::get)
  }

  /// The payload's JSON text when a value was actually supplied, i.e. the
  /// payload is neither absent nor an explicit `null`.
  pub fn supplied(&self) -> Option<&str> {
    self.as_json().filter(|json| {
      let trimmed = json.trim();
      !trimmed.is_empty() && trimmed != "null"
    })
  }

  pub fn is_absent(&self) -> bool {
    self.0.is_none()
  }

  /// Absent, blank and `null` payloads all mean "no value supplied".
  pub fn is_unset(&self) -> bool {
    self.supplied().is_none()
  }
}

impl PartialEq for RawPayload {
  fn eq(&self, other: &Self) -> bool {
    self.as_json() == other.as_json()
  }
}

impl Eq for RawPayload {}

impl Serialize for RawPayload {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    match &self.0 {
      Some(raw) => raw.serialize(serializer),
      None => serializer.serialize_none(),
    }
  }
}

impl<'de> Deserialize<'de> for RawPayload {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    Box::<RawValue>::deserialize(deserializer).map(|raw| Self(Some(raw)))
  }
}
