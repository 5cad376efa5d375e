use std::path::PathBuf;

use anyhow::Result;
use plugcompat_lib::attributes::encoding::{decode_files, encode_files};

use crate::output::{OutputFormat, print_json, read_separators, show_separators};

pub fn cmd_encode_files(paths: &[PathBuf], format: OutputFormat) -> Result<()> {
  let encoded = encode_files(paths);

  if format.is_json() {
    return print_json(&serde_json::json!({ "encoded": encoded, "count": paths.len() }));
  }

  println!("{}", show_separators(&encoded));
  Ok(())
}

pub fn cmd_decode_files(visible: &str, format: OutputFormat) -> Result<()> {
  let files = decode_files(&read_separators(visible));

  if format.is_json() {
    return print_json(&files);
  }

  for file in &files {
    println!("{}", file.display());
  }
  Ok(())
}
