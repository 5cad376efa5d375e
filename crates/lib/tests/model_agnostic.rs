//! The same plugin logic run against both host models.

use std::fs;
use std::path::{Path, PathBuf};

use plugcompat_lib::attributes::AttributeKey;
use plugcompat_lib::attributes::keys::{CONFIGURATION, MODULE_ID};
use plugcompat_lib::host::credentials::{Credentials, DirectCredentials};
use plugcompat_lib::host::settings::{Scope, SettingsStore};
use plugcompat_lib::model::{Active, Classic, Classpath, Compat, Virtual};
use plugcompat_lib::record::{Artifact, ModuleId};
use plugcompat_lib::reference::{FileConverter, ReferenceModel};
use plugcompat_lib::reference::converter::{ConverterConfig, MappedConverter};
use serial_test::serial;
use tempfile::TempDir;

const SOURCE_DIRS: AttributeKey<Vec<PathBuf>> = AttributeKey::new("sourceDirectories");

struct Fixture {
  _temp: TempDir,
  base: PathBuf,
  converter: MappedConverter,
}

impl Fixture {
  fn new() -> Self {
    let temp = TempDir::new().unwrap();
    let base = temp.path().canonicalize().unwrap().join("project");
    let out = base.join("target").join("out");
    fs::create_dir_all(&out).unwrap();
    let converter = MappedConverter::new(ConverterConfig::new(base.clone(), out));
    Self {
      _temp: temp,
      base,
      converter,
    }
  }

  fn file(&self, relative: &str) -> PathBuf {
    let path = self.base.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, relative).unwrap();
    path
  }
}

// Plugin code: builds a classpath entry, tags it, and reads it back.
fn tag_dependency<M: Compat>(jar: &Path, ctx: &dyn FileConverter, module: &ModuleId) -> Classpath<M> {
  let handle = M::to_handle(jar, Some(ctx)).unwrap();
  let entry = M::blank(handle);
  let entry = M::put(&entry, &MODULE_ID, module.clone());
  let entry = M::put(&entry, &CONFIGURATION, "compile".to_string());
  vec![entry]
}

fn path_round_trip<M: Compat>(fixture: &Fixture) {
  let path = fixture.file("a/b/report.txt");
  let ctx: &dyn FileConverter = &fixture.converter;

  let handle = M::to_handle(&path, Some(ctx)).unwrap();
  assert_eq!(M::resolve_path(&handle, Some(ctx)).unwrap(), path, "{}", M::NAME);
  assert_eq!(M::name(&handle), "report.txt", "{}", M::NAME);
}

fn relative_path_round_trip<M: Compat>(fixture: &Fixture) {
  let absolute = fixture.file("docs/notes.txt");
  let relative = Path::new("docs/notes.txt");
  let ctx: &dyn FileConverter = &fixture.converter;

  let handle = M::to_handle(relative, Some(ctx)).unwrap();
  let resolved = M::resolve_path(&handle, Some(ctx)).unwrap();
  assert_eq!(std::path::absolute(&resolved).unwrap(), absolute, "{}", M::NAME);
  assert_eq!(M::name(&handle), "notes.txt", "{}", M::NAME);
}

fn attribute_round_trip<M: Compat>(fixture: &Fixture) {
  let dirs = vec![
    fixture.base.join("x"),
    fixture.base.join("y"),
    fixture.base.join("z"),
  ];

  let entry = M::put(&M::blank(()), &SOURCE_DIRS, dirs.clone());
  assert_eq!(M::get(&entry, &SOURCE_DIRS), Some(dirs), "{}", M::NAME);

  let entry = M::put(&M::blank(()), &SOURCE_DIRS, Vec::new());
  assert_eq!(M::get(&entry, &SOURCE_DIRS), Some(Vec::new()), "{}", M::NAME);
}

fn record_round_trip<M: Compat>() {
  let module = ModuleId::new("org.example", "core", "2.0")
    .artifacts([Artifact::classified("core", "javadoc")])
    .exclude("commons-logging", "commons-logging");

  let encoded = M::encode_record(&module).unwrap();
  assert_eq!(M::decode_record::<ModuleId>(&encoded).unwrap(), module, "{}", M::NAME);
}

fn classpath_scenario<M: Compat>(fixture: &Fixture) {
  let jar = fixture.file("lib/core.jar");
  let module = ModuleId::new("org.example", "core", "2.0");

  let classpath = tag_dependency::<M>(&jar, &fixture.converter, &module);
  let resolved = M::resolve_classpath(&classpath, Some(&fixture.converter)).unwrap();

  assert_eq!(resolved[0].data, jar, "{}", M::NAME);
  assert_eq!(M::get(&resolved[0], &MODULE_ID), Some(module), "{}", M::NAME);
  assert_eq!(M::get(&resolved[0], &CONFIGURATION), Some("compile".to_string()), "{}", M::NAME);
}

fn settings_scenario<M: Compat>() {
  let scope = Scope::project("root").with_config("Compile");
  let key = M::setting_key(&scope, "javacOptions");

  let store = M::set_setting(&SettingsStore::new(), &key, "-parameters").unwrap();
  assert_eq!(M::get_setting(&store, &key).unwrap(), Some("-parameters"), "{}", M::NAME);

  let creds = vec![Credentials::Direct(DirectCredentials::new(
    None,
    "repo.example.com",
    "deploy",
    "secret",
  ))];
  let found = M::credentials_for_host(&creds, "repo.example.com").unwrap();
  assert_eq!(found.map(|c| c.user_name), Some("deploy".to_string()), "{}", M::NAME);
  assert_eq!(M::credentials_for_host(&creds, "elsewhere").unwrap(), None, "{}", M::NAME);
}

#[test]
fn paths_round_trip_under_both_models() {
  let fixture = Fixture::new();
  path_round_trip::<Classic>(&fixture);
  path_round_trip::<Virtual>(&fixture);
}

#[test]
#[serial]
fn relative_paths_round_trip_under_both_models() {
  let fixture = Fixture::new();
  let previous = std::env::current_dir().unwrap();
  std::env::set_current_dir(&fixture.base).unwrap();

  relative_path_round_trip::<Classic>(&fixture);
  relative_path_round_trip::<Virtual>(&fixture);

  // Classic hands the relative path back; Virtual resolves it to the absolute one.
  let ctx: &dyn FileConverter = &fixture.converter;
  let relative = Path::new("docs/notes.txt");
  let classic = Classic::resolve_path(&Classic::to_handle(relative, Some(ctx)).unwrap(), Some(ctx)).unwrap();
  let virt = Virtual::resolve_path(&Virtual::to_handle(relative, Some(ctx)).unwrap(), Some(ctx)).unwrap();

  std::env::set_current_dir(previous).unwrap();
  assert_eq!(classic, relative);
  assert_eq!(virt, fixture.base.join("docs/notes.txt"));
}

#[test]
fn attributes_round_trip_under_both_models() {
  let fixture = Fixture::new();
  attribute_round_trip::<Classic>(&fixture);
  attribute_round_trip::<Virtual>(&fixture);
}

#[test]
fn records_round_trip_under_both_models() {
  record_round_trip::<Classic>();
  record_round_trip::<Virtual>();
}

#[test]
fn classpath_metadata_survives_under_both_models() {
  let fixture = Fixture::new();
  classpath_scenario::<Classic>(&fixture);
  classpath_scenario::<Virtual>(&fixture);
}

#[test]
fn settings_and_credentials_agree_under_both_models() {
  settings_scenario::<Classic>();
  settings_scenario::<Virtual>();
}

#[test]
fn active_model_matches_feature() {
  let expected = if cfg!(feature = "virtual-refs") { "virtual" } else { "classic" };
  assert_eq!(<Active as Compat>::NAME, expected);
}
