use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;
use anyhow::{Context, Result};
use crate::error::ElementError;
use crate::host::Scope;

/// Access to an element's configuration node.
///
/// Values are already variable-substituted by the host; this only looks
/// members up and checks the key set.
pub trait ConfigNode {
    /// Reject any key not in `allowed`.
    fn validate_keys(&self, allowed: &[&str]) -> Result<(), ElementError>;

    fn string_member(&self, key: &str) -> Result<String, ElementError>;

    fn list_member(&self, key: &str) -> Result<Vec<String>, ElementError>;
}

impl ConfigNode for toml::Table {
    fn validate_keys(&self, allowed: &[&str]) -> Result<(), ElementError> {
        let unknown: Vec<String> = self
            .keys()
            .filter(|key| !allowed.contains(&key.as_str()))
            .cloned()
            .collect();

        if unknown.is_empty() {
            Ok(())
        } else {
            Err(ElementError::UnknownKeys {
                keys: unknown,
                allowed: allowed.iter().map(|key| key.to_string()).collect(),
            })
        }
    }

    fn string_member(&self, key: &str) -> Result<String, ElementError> {
        match self.get(key) {
            Some(toml::Value::String(value)) => Ok(value.clone()),
            Some(other) => Err(ElementError::InvalidMember {
                key: key.to_string(),
                reason: format!("must be a string, found {}", other.type_str()),
            }),
            None => Err(ElementError::MissingMember(key.to_string())),
        }
    }

    fn list_member(&self, key: &str) -> Result<Vec<String>, ElementError> {
        let items = match self.get(key) {
            Some(toml::Value::Array(items)) => items,
            Some(other) => {
                return Err(ElementError::InvalidMember {
                    key: key.to_string(),
                    reason: format!("must be a list of strings, found {}", other.type_str()),
                })
            }
            None => return Err(ElementError::MissingMember(key.to_string())),
        };

        items
            .iter()
            .map(|item| match item {
                toml::Value::String(value) => Ok(value.clone()),
                other => Err(ElementError::InvalidMember {
                    key: key.to_string(),
                    reason: format!("contains a non-string entry ({})", other.type_str()),
                }),
            })
            .collect()
    }
}

/// Value of the `dependency_scope` option.
///
/// `None` means only direct build dependencies are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DependencyScope {
    Run,
    Build,
    All,
    None,
}

impl DependencyScope {
    /// Parse a user-supplied scope name, ignoring case.
    pub fn parse(value: &str) -> Result<Self, ElementError> {
        match value.to_lowercase().as_str() {
            "run" => Ok(DependencyScope::Run),
            "build" => Ok(DependencyScope::Build),
            "all" => Ok(DependencyScope::All),
            "none" => Ok(DependencyScope::None),
            _ => Err(ElementError::InvalidScope {
                value: value.to_string(),
            }),
        }
    }

    /// Host scope for the second traversal hop, if any.
    pub fn host_scope(self) -> Option<Scope> {
        match self {
            DependencyScope::Run => Some(Scope::Run),
            DependencyScope::Build => Some(Scope::Build),
            DependencyScope::All => Some(Scope::All),
            DependencyScope::None => None,
        }
    }
}

impl fmt::Display for DependencyScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.host_scope() {
            Some(scope) => write!(f, "{}", scope),
            None => f.write_str("none"),
        }
    }
}

/// Resolved element configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LicenseConfig {
    /// Output file, relative to the sandbox root
    pub path: String,

    pub dependency_scope: DependencyScope,

    /// Forbidden license substrings; only set for the denylist variant
    pub blacklist: Option<Vec<String>>,
}

/// An element declaration file: the element kind plus its configuration node.
#[derive(Debug, Clone, Deserialize)]
pub struct ElementFile {
    pub kind: String,
    #[serde(default)]
    pub config: toml::Table,
}

/// Load an element declaration from a TOML file
pub fn load_element_file<P: AsRef<Path>>(path: P) -> Result<ElementFile> {
    let path = path.as_ref();

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read element file: {}", path.display()))?;

    let element: ElementFile = toml::from_str(&content)
        .with_context(|| format!("Failed to parse element file: {}", path.display()))?;

    Ok(element)
}
