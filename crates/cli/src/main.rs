mod cmd;
mod output;

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use plugcompat_lib::reference::converter::{ConverterConfig, MappedConverter};
use tracing_subscriber::EnvFilter;

use crate::cmd::RecordKind;
use crate::output::{OutputFormat, print_error};

/// pcompat - inspect plugin values under both host file models
#[derive(Parser)]
#[command(name = "pcompat")]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// Enable debug logging
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Output format
  #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
  output: OutputFormat,

  /// Converter root as NAME=DIR (repeatable, overrides the environment)
  #[arg(long = "root", global = true, value_parser = parse_root)]
  roots: Vec<(String, PathBuf)>,

  /// Accept paths outside every root, using the absolute path as id
  #[arg(long, global = true)]
  allow_machine_path: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Show the active model, the separator and the converter roots
  Info,

  /// Compute the virtual reference of a file or directory
  Ref {
    /// Path to hash
    path: PathBuf,
  },

  /// Resolve a virtual id such as ${OUT}/classes to a path
  Resolve {
    /// Virtual id
    id: String,
  },

  /// Encode paths as a string attribute (separator shown as \0)
  EncodeFiles {
    /// Paths in order
    paths: Vec<PathBuf>,
  },

  /// Decode a string attribute back into paths (separator written as \0)
  DecodeFiles {
    /// Encoded value
    encoded: String,
  },

  /// Validate a serialized record and print its canonical form
  CheckRecord {
    /// Record JSON
    json: String,

    /// Record type
    #[arg(long, value_enum, default_value_t = RecordKind::Module)]
    kind: RecordKind,
  },
}

fn parse_root(raw: &str) -> Result<(String, PathBuf)> {
  let (name, dir) = raw.split_once('=').ok_or_else(|| anyhow!("expected NAME=DIR, got '{raw}'"))?;
  if name.is_empty() || dir.is_empty() {
    return Err(anyhow!("expected NAME=DIR, got '{raw}'"));
  }
  Ok((name.to_string(), PathBuf::from(dir)))
}

fn converter(cli: &Cli) -> MappedConverter {
  let mut config = ConverterConfig::current();
  for (name, dir) in &cli.roots {
    config = config.with_root(name, dir.clone());
  }
  if cli.allow_machine_path {
    config = config.with_machine_paths(true);
  }
  MappedConverter::new(config)
}

fn main() {
  let cli = Cli::parse();

  let default_level = if cli.verbose { "debug" } else { "warn" };
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
    .with_writer(std::io::stderr)
    .without_time()
    .init();

  if let Err(e) = run(&cli) {
    print_error(&format!("{:#}", e));
    std::process::exit(1);
  }
}

fn run(cli: &Cli) -> Result<()> {
  let format = cli.output;
  match &cli.command {
    Commands::Info => cmd::cmd_info(&converter(cli), format),
    Commands::Ref { path } => cmd::cmd_ref(&converter(cli), path, format),
    Commands::Resolve { id } => cmd::cmd_resolve(&converter(cli), id, format),
    Commands::EncodeFiles { paths } => cmd::cmd_encode_files(paths, format),
    Commands::DecodeFiles { encoded } => cmd::cmd_decode_files(encoded, format),
    Commands::CheckRecord { json, kind } => cmd::cmd_check_record(json, *kind, format),
  }
}
