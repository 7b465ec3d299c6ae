//! Human and JSON rendering of bundles for the `cnab` CLI.

use std::collections::BTreeMap;
use std::io::{self, Write};

use cnab_bundle::{Bundle, Parameter, ParameterError, ParameterValue};
use serde::Serialize;
use tracing::warn;

/// A parameter with its payloads resolved against its declared type.
pub struct ResolvedParameter<'a> {
  pub name: &'a str,
  pub parameter: &'a Parameter,
  pub default: Result<Option<ParameterValue>, ParameterError>,
  pub allowed: Result<Vec<ParameterValue>, ParameterError>,
}

/// Resolve every parameter of a bundle, in name order.
///
/// A parameter that fails to resolve keeps its error; the others are
/// unaffected.
pub fn resolve_parameters(bundle: &Bundle) -> Vec<ResolvedParameter<'_>> {
  bundle
    .parameters
    .iter()
    .map(|(name, parameter)| {
      let resolved = ResolvedParameter {
        name,
        parameter,
        default: parameter.default_value(),
        allowed: parameter.allowed_values(),
      };
      if let Err(e) = &resolved.default {
        warn!(parameter = %name, error = %e, "failed to resolve default value");
      }
      if let Err(e) = &resolved.allowed {
        warn!(parameter = %name, error = %e, "failed to resolve allowed values");
      }
      resolved
    })
    .collect()
}

pub fn write_summary(out: &mut impl Write, bundle: &Bundle) -> io::Result<()> {
  writeln!(out, "{} {}", bundle.name, bundle.version)?;
  if let Some(description) = &bundle.description {
    writeln!(out, "  {}", description)?;
  }
  if let Some(license) = &bundle.license {
    writeln!(out, "license: {}", license)?;
  }

  writeln!(out, "invocation images:")?;
  for image in &bundle.invocation_images {
    writeln!(out, "  {} ({})", image.base.image, image.base.image_type())?;
  }

  if !bundle.images.is_empty() {
    writeln!(out, "images:")?;
    for (name, image) in &bundle.images {
      writeln!(out, "  {}: {}", name, image.base.image)?;
    }
  }

  if !bundle.credentials.is_empty() {
    writeln!(out, "credentials:")?;
    for (name, credential) in &bundle.credentials {
      let target = credential
        .env
        .as_deref()
        .map(|env| format!("env {}", env))
        .or_else(|| credential.path.as_deref().map(|path| format!("path {}", path)))
        .unwrap_or_else(|| "unmapped".to_string());
      writeln!(out, "  {}: {}", name, target)?;
    }
  }

  if !bundle.actions.is_empty() {
    writeln!(out, "actions:")?;
    for (name, action) in &bundle.actions {
      let note = if action.modifies { " (modifies)" } else { "" };
      writeln!(out, "  {}{}", name, note)?;
    }
  }

  writeln!(out, "parameters: {}", bundle.parameters.len())?;
  Ok(())
}

pub fn write_parameters(out: &mut impl Write, bundle: &Bundle) -> io::Result<()> {
  for resolved in resolve_parameters(bundle) {
    let parameter = resolved.parameter;
    writeln!(out, "{} ({})", resolved.name, parameter.declared_type)?;
    if let Some(description) = parameter.description() {
      writeln!(out, "  {}", description)?;
    }
    writeln!(
      out,
      "  required: {}",
      if parameter.required { "yes" } else { "no" }
    )?;

    match &resolved.default {
      Ok(Some(value)) => writeln!(out, "  default:  {}", value)?,
      Ok(None) => writeln!(out, "  default:  (none)")?,
      Err(e) => writeln!(out, "  default:  error: {}", e)?,
    }

    match &resolved.allowed {
      Ok(values) if values.is_empty() => writeln!(out, "  allowed:  (any)")?,
      Ok(values) => {
        let values: Vec<String> = values.iter().map(ToString::to_string).collect();
        writeln!(out, "  allowed:  {}", values.join(", "))?;
      }
      Err(e) => writeln!(out, "  allowed:  error: {}", e)?,
    }

    if let Some(destination) = &parameter.destination {
      if let Some(env) = &destination.env {
        writeln!(out, "  env:      {}", env)?;
      }
      if let Some(path) = &destination.path {
        writeln!(out, "  path:     {}", path)?;
      }
    }
  }
  Ok(())
}

#[derive(Debug, Serialize)]
pub struct ParameterReport {
  #[serde(rename = "type")]
  pub declared_type: String,
  pub required: bool,
  pub default: Option<ParameterValue>,
  pub allowed: Vec<ParameterValue>,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub errors: Vec<String>,
}

/// Build a JSON-friendly report of every parameter, keyed by name.
pub fn parameter_reports(bundle: &Bundle) -> BTreeMap<String, ParameterReport> {
  resolve_parameters(bundle)
    .into_iter()
    .map(|resolved| {
      let mut errors = Vec::new();
      let default = resolved.default.unwrap_or_else(|e| {
        errors.push(e.to_string());
        None
      });
      let allowed = resolved.allowed.unwrap_or_else(|e| {
        errors.push(e.to_string());
        Vec::new()
      });
      let report = ParameterReport {
        declared_type: resolved.parameter.declared_type.clone(),
        required: resolved.parameter.required,
        default,
        allowed,
        errors,
      };
      (resolved.name.to_string(), report)
    })
    .collect()
}
