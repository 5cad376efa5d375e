use std::fmt::Display;

use anyhow::{Context, Result};
use clap::ValueEnum;
use plugcompat_lib::model::Virtual;
use plugcompat_lib::record::{Artifact, DomainRecord, ModuleId, RecordCodec};

use crate::output::{OutputFormat, print_json, print_stat, print_success};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RecordKind {
  Module,
  Artifact,
}

pub fn cmd_check_record(json: &str, kind: RecordKind, format: OutputFormat) -> Result<()> {
  match kind {
    RecordKind::Module => check::<ModuleId>(json, format),
    RecordKind::Artifact => check::<Artifact>(json, format),
  }
}

fn check<R: DomainRecord + Display>(json: &str, format: OutputFormat) -> Result<()> {
  let record: R = Virtual::decode_record(&json.to_string()).context("Invalid record")?;
  let canonical = Virtual::encode_record(&record)?;

  if format.is_json() {
    return print_json(&record);
  }

  print_success(&format!("valid {}: {}", R::KIND, record));
  print_stat("Canonical", &canonical);
  Ok(())
}
