use serde::{Deserialize, Serialize};

/// Target platform of an image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Platform {
  /// e.g. "amd64", "arm64"
  #[serde(skip_serializing_if = "Option::is_none")]
  pub architecture: Option<String>,

  /// e.g. "linux", "windows"
  #[serde(skip_serializing_if = "Option::is_none")]
  pub os: Option<String>,
}

/// Fields shared by invocation images and application images.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageBase {
  /// Resolvable image reference, e.g. "technosophos/helloworld:0.1.0"
  pub image: String,

  /// How to interpret `image`. Treated as "oci" when not specified.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub image_type: Option<String>,

  /// Content digest, e.g. "sha256:abc123..."
  #[serde(skip_serializing_if = "Option::is_none")]
  pub digest: Option<String>,

  /// Image size in bytes
  #[serde(skip_serializing_if = "Option::is_none")]
  pub size: Option<u64>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub platform: Option<Platform>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub media_type: Option<String>,
}

impl ImageBase {
  /// The image type, defaulting to "oci".
  pub fn image_type(&self) -> &str {
    self.image_type.as_deref().unwrap_or("oci")
  }
}

/// The bootstrapping image that runs the bundle's actions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationImage {
  #[serde(flatten)]
  pub base: ImageBase,
}

/// An application image installed by the bundle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
  #[serde(flatten)]
  pub base: ImageBase,

  /// Locations in the invocation image that reference this image, used for
  /// rewriting.
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub refs: Vec<LocationReference>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
}

/// A file location inside the invocation image that references an image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationReference {
  /// Path of the referencing file, from the root of the container
  #[serde(skip_serializing_if = "Option::is_none")]
  pub path: Option<String>,

  /// Field to replace within that file
  #[serde(skip_serializing_if = "Option::is_none")]
  pub field: Option<String>,

  /// MIME type of the file
  #[serde(skip_serializing_if = "Option::is_none")]
  pub media_type: Option<String>,
}
