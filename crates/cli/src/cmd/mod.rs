mod files;
mod info;
mod record;
mod reference;

pub use files::{cmd_decode_files, cmd_encode_files};
pub use info::cmd_info;
pub use record::{RecordKind, cmd_check_record};
pub use reference::{cmd_ref, cmd_resolve};
