/// Application name.
pub const APP_NAME: &str = "plugcompat";

/// Reserved separator between members of an encoded file collection.
///
/// This is part of the string-attribute wire format and must never change:
/// values written by one version are read back by another. NUL is the one
/// character no mainstream filesystem accepts in a path. A path that contains
/// it cannot be encoded faithfully and the resulting value is undefined.
pub const FILE_LIST_SEPARATOR: char = '\u{0}';

/// Prefix marking a virtual id as relative to a named converter root.
pub const ROOT_ID_PREFIX: &str = "${";

/// Suffix closing the root name of a virtual id.
pub const ROOT_ID_SUFFIX: &str = "}";

/// Algorithm tag prepended to content hashes of virtual references.
pub const CONTENT_HASH_ALGORITHM: &str = "sha256";

/// Placeholder for an unset axis in a composite setting key.
pub const ZERO_AXIS: &str = "Zero";

/// Root name of the project base directory.
pub const BASE_ROOT: &str = "BASE";

/// Root name of the build output directory.
pub const OUT_ROOT: &str = "OUT";

/// Environment variable overriding the `BASE` root directory.
pub const ENV_BASE: &str = "PLUGCOMPAT_BASE";

/// Environment variable overriding the `OUT` root directory.
pub const ENV_OUT: &str = "PLUGCOMPAT_OUT";

/// Environment variable accepting paths outside every root (`1` or `true`).
pub const ENV_ALLOW_MACHINE_PATH: &str = "PLUGCOMPAT_ALLOW_MACHINE_PATH";
