//! Reference commands.
//!
//! Always go through the virtual model: the classic model's references are
//! the paths themselves and have nothing to show.

use std::path::Path;

use anyhow::{Context, Result};
use plugcompat_lib::consts::CONTENT_HASH_ALGORITHM;
use plugcompat_lib::model::Virtual;
use plugcompat_lib::reference::ReferenceModel;
use plugcompat_lib::reference::converter::MappedConverter;

use crate::output::{self, OutputFormat, format_bytes, print_json, print_stat, print_success, truncate_hash};

pub fn cmd_ref(converter: &MappedConverter, path: &Path, format: OutputFormat) -> Result<()> {
  let handle = Virtual::to_handle(path, Some(converter))
    .with_context(|| format!("Failed to reference {}", path.display()))?;

  if format.is_json() {
    return print_json(&handle);
  }

  print_success(&handle.id);
  print_stat("Name", &Virtual::name(&handle));
  print_stat("Hash", &format!("{}-{}", CONTENT_HASH_ALGORITHM, truncate_hash(&handle.content_hash.0)));
  print_stat("Size", &format_bytes(handle.size_bytes));
  Ok(())
}

pub fn cmd_resolve(converter: &MappedConverter, id: &str, format: OutputFormat) -> Result<()> {
  let path = converter.path_for(id).with_context(|| format!("Failed to resolve {}", id))?;
  let exists = path.exists();

  if format.is_json() {
    return print_json(&serde_json::json!({ "id": id, "path": path, "exists": exists }));
  }

  println!("{} {} {}", id, output::symbols::ARROW, path.display());
  if !exists {
    print_stat("Note", "nothing on disk at this path yet");
  }
  Ok(())
}
