use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cnab_bundle::Bundle;

mod render;

/// cnab - inspect CNAB bundle descriptors
#[derive(Parser)]
#[command(name = "cnab")]
#[command(version, about, long_about = None)]
struct Cli {
  /// Log level used when RUST_LOG is not set
  #[arg(long, global = true, default_value = "warn")]
  log_level: String,

  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Show a summary of a bundle
  Show {
    /// Path to the bundle.json file
    bundle_file: PathBuf,
  },

  /// List a bundle's parameters with their default and allowed values
  Params {
    /// Path to the bundle.json file
    bundle_file: PathBuf,

    /// Print the parameters as JSON
    #[arg(long)]
    json: bool,
  },
}

fn main() -> Result<()> {
  let cli = Cli::parse();
  init_tracing(&cli.log_level);

  match cli.command {
    Some(Commands::Show { bundle_file }) => {
      let bundle = load_bundle(&bundle_file)?;
      let mut out = io::stdout().lock();
      render::write_summary(&mut out, &bundle)?;
      out.flush()?;
    }
    Some(Commands::Params { bundle_file, json }) => {
      let bundle = load_bundle(&bundle_file)?;
      let mut out = io::stdout().lock();
      if json {
        let reports = render::parameter_reports(&bundle);
        writeln!(out, "{}", serde_json::to_string_pretty(&reports)?)?;
      } else {
        render::write_parameters(&mut out, &bundle)?;
      }
      out.flush()?;
    }
    None => {
      println!("cnab - use --help to see available commands");
    }
  }

  Ok(())
}

fn init_tracing(level: &str) {
  let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
  let _ = tracing_subscriber::fmt()
    .with_env_filter(env_filter)
    .with_writer(io::stderr)
    .with_target(false)
    .try_init();
}

fn load_bundle(bundle_file: &Path) -> Result<Bundle> {
  let content = std::fs::read_to_string(bundle_file)
    .with_context(|| format!("failed to read bundle file: {}", bundle_file.display()))?;

  let bundle = Bundle::from_json_str(&content)
    .with_context(|| format!("failed to parse bundle file: {}", bundle_file.display()))?;

  debug!(
    name = %bundle.name,
    version = %bundle.version,
    parameters = bundle.parameters.len(),
    "loaded bundle"
  );

  Ok(bundle)
}
