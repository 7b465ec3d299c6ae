use serde::{Deserialize, Serialize};

use crate::error::ParameterError;
use crate::resolve::{
  resolve_allowed, resolve_allowed_as, resolve_default, resolve_default_as,
};
use crate::value::{NativeType, ParameterType, ParameterValue, RawPayload};

/// A parameter that can be passed into the invocation image.
///
/// `default_value` and `allowed_values` stay undecoded until they are
/// resolved against `declared_type`. The constraint fields are carried as
/// data only and are not enforced here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
  /// Declared data type as written in the document: "string", "int" or
  /// "boolean".
  #[serde(rename = "type")]
  pub declared_type: String,

  /// Whether a value must be supplied
  #[serde(default, skip_serializing_if = "std::ops::Not::not")]
  pub required: bool,

  #[serde(default, skip_serializing_if = "RawPayload::is_absent")]
  pub default_value: RawPayload,

  /// Exhaustive list of allowed values
  #[serde(default, skip_serializing_if = "RawPayload::is_absent")]
  pub allowed_values: RawPayload,

  /// Minimum value (int parameters)
  #[serde(skip_serializing_if = "Option::is_none")]
  pub min_value: Option<i64>,

  /// Maximum value (int parameters)
  #[serde(skip_serializing_if = "Option::is_none")]
  pub max_value: Option<i64>,

  /// Minimum length (string parameters)
  #[serde(skip_serializing_if = "Option::is_none")]
  pub min_length: Option<u64>,

  /// Maximum length (string parameters)
  #[serde(skip_serializing_if = "Option::is_none")]
  pub max_length: Option<u64>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub metadata: Option<ParameterMetadata>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub destination: Option<ParameterDestination>,
}

/// Extra data about a parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterMetadata {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
}

/// Where a parameter's value is placed in the invocation image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDestination {
  /// File path the value is written to
  #[serde(skip_serializing_if = "Option::is_none")]
  pub path: Option<String>,

  /// Environment variable holding the value, e.g. "PORT"
  #[serde(skip_serializing_if = "Option::is_none")]
  pub env: Option<String>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
}

impl Parameter {
  /// Create a parameter of the given type with no default and no
  /// restriction on its values.
  pub fn new(parameter_type: ParameterType) -> Self {
    Self {
      declared_type: parameter_type.as_str().to_string(),
      ..Default::default()
    }
  }

  /// Validate the declared type.
  pub fn parameter_type(&self) -> Result<ParameterType, ParameterError> {
    self.declared_type.parse()
  }

  /// The metadata description, falling back to the destination's.
  pub fn description(&self) -> Option<&str> {
    self
      .metadata
      .as_ref()
      .and_then(|m| m.description.as_deref())
      .or_else(|| {
        self
          .destination
          .as_ref()
          .and_then(|d| d.description.as_deref())
      })
  }

  /// The default value, assuming the parameter is declared as `T`.
  pub fn default_as<T: NativeType>(&self) -> Result<Option<T>, ParameterError> {
    resolve_default_as(&self.declared_type, &self.default_value)
  }

  /// The allowed values, assuming the parameter is declared as `T`.
  pub fn allowed_as<T: NativeType>(&self) -> Result<Vec<T>, ParameterError> {
    resolve_allowed_as(&self.declared_type, &self.allowed_values)
  }

  pub fn default_string(&self) -> Result<Option<String>, ParameterError> {
    self.default_as()
  }

  pub fn default_int(&self) -> Result<Option<i64>, ParameterError> {
    self.default_as()
  }

  pub fn default_bool(&self) -> Result<Option<bool>, ParameterError> {
    self.default_as()
  }

  pub fn allowed_strings(&self) -> Result<Vec<String>, ParameterError> {
    self.allowed_as()
  }

  pub fn allowed_ints(&self) -> Result<Vec<i64>, ParameterError> {
    self.allowed_as()
  }

  pub fn allowed_bools(&self) -> Result<Vec<bool>, ParameterError> {
    self.allowed_as()
  }

  /// The default value of whatever type the parameter declares, or `None`
  /// if no default is provided.
  pub fn default_value(&self) -> Result<Option<ParameterValue>, ParameterError> {
    resolve_default(&self.declared_type, &self.default_value)
  }

  /// The allowed values of whatever type the parameter declares. Empty when
  /// any value is allowed.
  pub fn allowed_values(&self) -> Result<Vec<ParameterValue>, ParameterError> {
    resolve_allowed(&self.declared_type, &self.allowed_values)
  }
}
