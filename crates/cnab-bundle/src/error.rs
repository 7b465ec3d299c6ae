use thiserror::Error;

use crate::value::{ParameterType, PayloadKind};

/// Errors that can occur when resolving a parameter's values.
#[derive(Debug, Error)]
pub enum ParameterError {
  /// A typed accessor was used on a parameter declared with another type.
  #[error("parameter type is \"{declared}\", not \"{expected}\"")]
  TypeMismatch {
    declared: String,
    expected: ParameterType,
  },

  /// The declared type is not one of `string`, `int` or `boolean`.
  #[error("unsupported parameter type \"{declared}\"")]
  UnsupportedType { declared: String },

  /// A supplied payload is not valid JSON for the declared type.
  #[error("invalid {payload} for {expected} parameter: {source}")]
  Decode {
    payload: PayloadKind,
    expected: ParameterType,
    #[source]
    source: serde_json::Error,
  },
}
