//! Strongly-typed package.json record
//!
//! Handles:
//! - dependencies
//! - devDependencies
//! - every other top-level field, passed through untouched
//!
//! Top-level key order and dependency entry order are kept exactly as read,
//! so a manifest written back only differs where a constraint changed.

use crate::domain::DependencyGroup;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Package name to declared constraint. `None` is a JSON `null` constraint.
pub type DependencyMap = IndexMap<String, Option<String>>;

/// A dependency group held something other than a name to string map
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{key}: {message}")]
pub struct InvalidManifest {
    key: String,
    message: String,
}

impl InvalidManifest {
    fn new(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            message: message.into(),
        }
    }
}

/// package.json with the two dependency groups lifted into typed fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct PackageJson {
    /// `dependencies`, if present as an object
    pub dependencies: Option<DependencyMap>,
    /// `devDependencies`, if present as an object
    pub dev_dependencies: Option<DependencyMap>,
    /// All other top-level fields
    extra: Map<String, Value>,
    /// Top-level keys in input order
    key_order: Vec<String>,
}

impl PackageJson {
    /// Creates an empty manifest
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a manifest from JSON text
    pub fn from_json_str(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Serialize with 2-space indentation, without a trailing newline
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Returns a dependency group
    pub fn group(&self, group: DependencyGroup) -> Option<&DependencyMap> {
        match group {
            DependencyGroup::Runtime => self.dependencies.as_ref(),
            DependencyGroup::Development => self.dev_dependencies.as_ref(),
        }
    }

    /// Returns a dependency group for mutation
    pub fn group_mut(&mut self, group: DependencyGroup) -> Option<&mut DependencyMap> {
        match group {
            DependencyGroup::Runtime => self.dependencies.as_mut(),
            DependencyGroup::Development => self.dev_dependencies.as_mut(),
        }
    }

    fn group_slot(&mut self, group: DependencyGroup) -> &mut Option<DependencyMap> {
        match group {
            DependencyGroup::Runtime => &mut self.dependencies,
            DependencyGroup::Development => &mut self.dev_dependencies,
        }
    }

    /// Set a top-level pass-through field
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        let key = key.into();
        if !self.key_order.contains(&key) {
            self.key_order.push(key.clone());
        }
        self.extra.insert(key, value);
        self
    }

    /// Add a dependency, creating the group if needed
    pub fn with_dependency(
        mut self,
        group: DependencyGroup,
        name: impl Into<String>,
        constraint: impl Into<String>,
    ) -> Self {
        let key = group.manifest_key().to_string();
        if !self.key_order.contains(&key) {
            self.key_order.push(key);
        }
        self.group_slot(group)
            .get_or_insert_with(DependencyMap::new)
            .insert(name.into(), Some(constraint.into()));
        self
    }

    /// Returns a pass-through field
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    /// The package name, if declared
    pub fn name(&self) -> Option<&str> {
        self.field("name").and_then(Value::as_str)
    }

    /// The package version, if declared
    pub fn version(&self) -> Option<&str> {
        self.field("version").and_then(Value::as_str)
    }

    /// Constraint declared for a package in a group
    pub fn constraint(&self, group: DependencyGroup, name: &str) -> Option<&str> {
        self.group(group)?.get(name)?.as_deref()
    }
}

fn parse_group(key: &str, value: Map<String, Value>) -> Result<DependencyMap, InvalidManifest> {
    let mut deps = DependencyMap::with_capacity(value.len());
    for (name, constraint) in value {
        let constraint = match constraint {
            Value::String(s) => Some(s),
            Value::Null => None,
            other => {
                return Err(InvalidManifest::new(
                    key,
                    format!("constraint for '{}' must be a string, found {}", name, other),
                ))
            }
        };
        deps.insert(name, constraint);
    }
    Ok(deps)
}

fn group_to_value(deps: DependencyMap) -> Value {
    Value::Object(
        deps.into_iter()
            .map(|(name, constraint)| (name, constraint.map_or(Value::Null, Value::String)))
            .collect(),
    )
}

impl TryFrom<Map<String, Value>> for PackageJson {
    type Error = InvalidManifest;

    fn try_from(map: Map<String, Value>) -> Result<Self, Self::Error> {
        let mut manifest = PackageJson::new();

        for (key, value) in map {
            manifest.key_order.push(key.clone());

            match (DependencyGroup::from_manifest_key(&key), value) {
                (Some(group), Value::Object(deps)) => {
                    *manifest.group_slot(group) = Some(parse_group(&key, deps)?);
                }
                // `"dependencies": null` is kept verbatim
                (Some(_), Value::Null) => {
                    manifest.extra.insert(key, Value::Null);
                }
                (Some(_), other) => {
                    return Err(InvalidManifest::new(
                        key,
                        format!("expected an object, found {}", other),
                    ));
                }
                (None, value) => {
                    manifest.extra.insert(key, value);
                }
            }
        }

        Ok(manifest)
    }
}

impl From<PackageJson> for Map<String, Value> {
    fn from(mut manifest: PackageJson) -> Self {
        let mut map = Map::new();

        for key in std::mem::take(&mut manifest.key_order) {
            if let Some(group) = DependencyGroup::from_manifest_key(&key) {
                if let Some(deps) = manifest.group_slot(group).take() {
                    map.insert(key, group_to_value(deps));
                    continue;
                }
            }
            if let Some(value) = manifest.extra.remove(&key) {
                map.insert(key, value);
            }
        }

        // Groups or fields set without going through the builders
        for group in DependencyGroup::all() {
            if let Some(deps) = manifest.group_slot(*group).take() {
                map.insert(group.manifest_key().to_string(), group_to_value(deps));
            }
        }
        map.extend(manifest.extra);

        map
    }
}
