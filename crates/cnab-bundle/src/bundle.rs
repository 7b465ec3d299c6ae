use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::credential::Credential;
use crate::image::{Image, InvocationImage};
use crate::parameter::Parameter;

/// A CNAB bundle descriptor (`bundle.json`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bundle {
  /// Version of the descriptor schema, e.g. "v1"
  pub schema_version: String,

  pub name: String,

  /// SemVer2 version of the bundle
  pub version: String,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,

  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub keywords: Vec<String>,

  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub maintainers: Vec<Maintainer>,

  /// SPDX license code or proprietary license name
  #[serde(skip_serializing_if = "Option::is_none")]
  pub license: Option<String>,

  #[serde(default)]
  pub invocation_images: Vec<InvocationImage>,

  /// Application images, keyed by name
  #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
  pub images: BTreeMap<String, Image>,

  /// Credentials injected into the invocation image, keyed by name
  #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
  pub credentials: BTreeMap<String, Credential>,

  /// Custom actions, keyed by name
  #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
  pub actions: BTreeMap<String, Action>,

  /// Reserved for future use; carried through untouched.
  #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
  pub extensions: BTreeMap<String, serde_json::Value>,

  /// Parameters injected into the invocation image, keyed by name
  #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
  pub parameters: BTreeMap<String, Parameter>,
}

/// A party responsible for the bundle.
///
/// Older descriptors spell the keys `Name`, `Email` and `URL`; both
/// spellings are read, the lowercase one is written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Maintainer {
  #[serde(alias = "Name")]
  pub name: String,

  #[serde(alias = "Email", skip_serializing_if = "Option::is_none")]
  pub email: Option<String>,

  #[serde(alias = "URL", alias = "Url", skip_serializing_if = "Option::is_none")]
  pub url: Option<String>,
}

/// A custom action that can be run against the bundle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
  /// Set when the action can change resources managed by the bundle
  #[serde(default, alias = "Modifies")]
  pub modifies: bool,
}

impl Bundle {
  /// Parse a bundle from JSON text.
  ///
  /// Parameter payloads are captured verbatim, so bundles must be parsed
  /// from text rather than from a `serde_json::Value`.
  pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
    serde_json::from_str(json)
  }

  /// Parse a bundle from JSON bytes.
  pub fn from_json_slice(json: &[u8]) -> Result<Self, serde_json::Error> {
    serde_json::from_slice(json)
  }

  pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(self)
  }

  /// Get a parameter by name.
  pub fn parameter(&self, name: &str) -> Option<&Parameter> {
    self.parameters.get(name)
  }
}
