use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{DomainRecord, decode_record_attribute, encode_record_attribute};
use crate::attributes::AttributeValue;

fn default_true() -> bool {
  true
}

fn is_true(value: &bool) -> bool {
  *value
}

fn is_false(value: &bool) -> bool {
  !*value
}

fn wildcard() -> String {
  "*".to_string()
}

/// How a module name is suffixed with the toolchain's version.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CrossVersion {
  #[default]
  Disabled,
  /// Binary version, e.g. `_2.13`.
  Binary {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    prefix: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    suffix: String,
  },
  /// Full version, e.g. `_2.13.12`.
  Full {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    prefix: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    suffix: String,
  },
  /// A fixed suffix.
  Constant { value: String },
}

/// Digest a downloaded artifact must match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Checksum {
  pub digest: String,
  #[serde(rename = "type")]
  pub type_: String,
}

/// Excludes matching transitive dependencies. `*` matches anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExclusionRule {
  #[serde(default = "wildcard")]
  pub organization: String,
  #[serde(default = "wildcard")]
  pub name: String,
  #[serde(default = "wildcard")]
  pub artifact: String,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub configurations: Vec<String>,
  #[serde(default)]
  pub cross_version: CrossVersion,
}

impl ExclusionRule {
  pub fn new(organization: &str, name: &str) -> Self {
    Self {
      organization: organization.to_string(),
      name: name.to_string(),
      artifact: wildcard(),
      configurations: Vec::new(),
      cross_version: CrossVersion::Disabled,
    }
  }
}

/// A published file of a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
  pub name: String,
  #[serde(rename = "type")]
  pub type_: String,
  pub extension: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub classifier: Option<String>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub configurations: Vec<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub url: Option<String>,
  #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
  pub extra_attributes: BTreeMap<String, String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub checksum: Option<Checksum>,
  #[serde(default, skip_serializing_if = "is_false")]
  pub allow_insecure_protocol: bool,
}

impl Artifact {
  /// A plain `jar` artifact.
  pub fn new(name: &str) -> Self {
    Self::typed(name, "jar", "jar")
  }

  pub fn typed(name: &str, type_: &str, extension: &str) -> Self {
    Self {
      name: name.to_string(),
      type_: type_.to_string(),
      extension: extension.to_string(),
      classifier: None,
      configurations: Vec::new(),
      url: None,
      extra_attributes: BTreeMap::new(),
      checksum: None,
      allow_insecure_protocol: false,
    }
  }

  /// A classified artifact such as `sources` or `javadoc`.
  pub fn classified(name: &str, classifier: &str) -> Self {
    let type_ = match classifier {
      "sources" => "src",
      "javadoc" => "doc",
      other => other,
    };
    Self {
      classifier: Some(classifier.to_string()),
      ..Self::typed(name, type_, "jar")
    }
  }

  pub fn with_url(mut self, url: &str) -> Self {
    self.url = Some(url.to_string());
    self
  }

  pub fn with_checksum(mut self, type_: &str, digest: &str) -> Self {
    self.checksum = Some(Checksum {
      digest: digest.to_string(),
      type_: type_.to_string(),
    });
    self
  }
}

impl fmt::Display for Artifact {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.classifier {
      Some(classifier) => write!(f, "{}-{}.{}", self.name, classifier, self.extension),
      None => write!(f, "{}.{}", self.name, self.extension),
    }
  }
}

/// Coordinates of a dependency module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleId {
  pub organization: String,
  pub name: String,
  pub revision: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub configurations: Option<String>,
  #[serde(default, skip_serializing_if = "is_false")]
  pub is_changing: bool,
  #[serde(default = "default_true", skip_serializing_if = "is_true")]
  pub is_transitive: bool,
  #[serde(default, skip_serializing_if = "is_false")]
  pub is_force: bool,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub explicit_artifacts: Vec<Artifact>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub exclusions: Vec<ExclusionRule>,
  #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
  pub extra_attributes: BTreeMap<String, String>,
  #[serde(default)]
  pub cross_version: CrossVersion,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub branch_name: Option<String>,
}

impl ModuleId {
  pub fn new(organization: &str, name: &str, revision: &str) -> Self {
    Self {
      organization: organization.to_string(),
      name: name.to_string(),
      revision: revision.to_string(),
      configurations: None,
      is_changing: false,
      is_transitive: true,
      is_force: false,
      explicit_artifacts: Vec::new(),
      exclusions: Vec::new(),
      extra_attributes: BTreeMap::new(),
      cross_version: CrossVersion::Disabled,
      branch_name: None,
    }
  }

  pub fn in_configurations(mut self, configurations: &str) -> Self {
    self.configurations = Some(configurations.to_string());
    self
  }

  pub fn cross(mut self, cross_version: CrossVersion) -> Self {
    self.cross_version = cross_version;
    self
  }

  pub fn intransitive(mut self) -> Self {
    self.is_transitive = false;
    self
  }

  pub fn exclude(mut self, organization: &str, name: &str) -> Self {
    self.exclusions.push(ExclusionRule::new(organization, name));
    self
  }

  pub fn artifacts(mut self, artifacts: impl IntoIterator<Item = Artifact>) -> Self {
    self.explicit_artifacts.extend(artifacts);
    self
  }

  pub fn extra(mut self, key: &str, value: &str) -> Self {
    self.extra_attributes.insert(key.to_string(), value.to_string());
    self
  }
}

impl fmt::Display for ModuleId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}:{}:{}", self.organization, self.name, self.revision)?;
    if let Some(configurations) = &self.configurations {
      write!(f, ":{}", configurations)?;
    }
    Ok(())
  }
}

impl DomainRecord for ModuleId {
  const KIND: &'static str = "module";
}

impl DomainRecord for Artifact {
  const KIND: &'static str = "artifact";
}

impl AttributeValue for ModuleId {
  fn encode(&self) -> String {
    encode_record_attribute(self)
  }

  fn decode(raw: &str) -> Option<Self> {
    decode_record_attribute(raw)
  }
}

impl AttributeValue for Artifact {
  fn encode(&self) -> String {
    encode_record_attribute(self)
  }

  fn decode(raw: &str) -> Option<Self> {
    decode_record_attribute(raw)
  }
}
