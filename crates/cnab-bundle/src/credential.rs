use serde::{Deserialize, Serialize};

/// A credential and where it is placed in the invocation image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
  /// Mount path inside the invocation image
  #[serde(skip_serializing_if = "Option::is_none")]
  pub path: Option<String>,

  /// Environment variable that receives the credential, e.g. "KUBECONFIG"
  #[serde(skip_serializing_if = "Option::is_none")]
  pub env: Option<String>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
}
