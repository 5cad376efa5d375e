use anyhow::Result;
use plugcompat_lib::consts::{APP_NAME, FILE_LIST_SEPARATOR};
use plugcompat_lib::model::{Active, Compat};
use plugcompat_lib::reference::converter::MappedConverter;

use crate::output::{OutputFormat, print_info, print_json, print_stat};

pub fn cmd_info(converter: &MappedConverter, format: OutputFormat) -> Result<()> {
  let config = converter.config();
  let separator = format!("U+{:04X}", FILE_LIST_SEPARATOR as u32);

  if format.is_json() {
    let json = serde_json::json!({
      "model": <Active as Compat>::NAME,
      "separator": separator,
      "roots": config.roots,
      "allow_machine_path": config.allow_machine_path,
    });
    return print_json(&json);
  }

  print_info(&format!("{} ({} model)", APP_NAME, <Active as Compat>::NAME));
  print_stat("File list separator", &separator);
  print_stat("Machine paths", if config.allow_machine_path { "allowed" } else { "rejected" });
  println!();
  println!("Roots:");
  for (name, dir) in &config.roots {
    print_stat(name, &dir.display().to_string());
  }

  Ok(())
}
