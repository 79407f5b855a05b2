//! Build plan schema
//!
//! The plan is the only artifact a detection run produces: an ordered list of
//! components this buildpack provides and an ordered list of components it
//! requires from other buildpacks. Order is part of the contract, so every
//! collection here is a `Vec` and serialization never reorders entries.

use crate::stack::ComponentId;
use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

fn deserialize_null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::deserialize(deserializer)?.unwrap_or_default())
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Phases in which a required component must be present.
///
/// Serialized as the buildpack plan metadata table, where only phases that
/// apply are written (`{ build = true }`, never `launch = false`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Applicability {
    #[serde(default, skip_serializing_if = "is_false")]
    pub build: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub launch: bool,
}

impl Applicability {
    pub const BUILD: Self = Self {
        build: true,
        launch: false,
    };

    pub const BUILD_AND_LAUNCH: Self = Self {
        build: true,
        launch: true,
    };
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provided {
    pub name: ComponentId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Required {
    pub name: ComponentId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub metadata: Applicability,
}

impl Required {
    pub fn new(name: ComponentId, version: Option<String>, metadata: Applicability) -> Self {
        Self {
            name,
            version,
            metadata,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BuildPlan {
    #[serde(default, deserialize_with = "deserialize_null_default")]
    provides: Vec<Provided>,
    #[serde(default, deserialize_with = "deserialize_null_default")]
    requires: Vec<Required>,
}

impl BuildPlan {
    pub fn new(provides: Vec<Provided>, requires: Vec<Required>) -> Self {
        Self { provides, requires }
    }

    pub fn provides(&self) -> &[Provided] {
        &self.provides
    }

    pub fn requires(&self) -> &[Required] {
        &self.requires
    }

    pub fn requirement(&self, name: &ComponentId) -> Option<&Required> {
        self.requires.iter().find(|r| &r.name == name)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string(self).context("Failed to serialize build plan to TOML")
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse build plan TOML")
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize build plan to JSON")
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize build plan to YAML")
    }
}

impl fmt::Display for BuildPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_toml() {
            Ok(toml) => write!(f, "{}", toml),
            Err(e) => write!(f, "Error formatting BuildPlan: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn web_plan() -> BuildPlan {
        BuildPlan::new(
            vec![Provided {
                name: ComponentId::Publish,
            }],
            vec![
                Required::new(ComponentId::Publish, None, Applicability::BUILD),
                Required::new(
                    ComponentId::DotnetSdk,
                    Some("2.2.0".to_string()),
                    Applicability::BUILD_AND_LAUNCH,
                ),
                Required::new(
                    ComponentId::DotnetRuntime,
                    Some("2.2.*".to_string()),
                    Applicability::BUILD_AND_LAUNCH,
                ),
                Required::new(ComponentId::Icu, None, Applicability::BUILD),
            ],
        )
    }

    #[test]
    fn test_toml_layout() {
        let toml = web_plan().to_toml().unwrap();

        assert!(toml.contains("[[provides]]"));
        assert!(toml.contains("[[requires]]"));
        assert!(toml.contains("name = \"dotnet-sdk\""));
        assert!(toml.contains("version = \"2.2.0\""));
        assert!(toml.contains("build = true"));
        assert!(!toml.contains("launch = false"));
    }

    #[test]
    fn test_toml_round_trip_preserves_order() {
        let plan = web_plan();
        let parsed = BuildPlan::from_toml(&plan.to_toml().unwrap()).unwrap();

        assert_eq!(parsed, plan);
        let names: Vec<&str> = parsed.requires().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["dotnet-build", "dotnet-sdk", "dotnet-runtime", "icu"]
        );
    }

    #[test]
    fn test_json_omits_absent_version() {
        let json = web_plan().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let icu = &value["requires"][3];
        assert_eq!(icu["name"], "icu");
        assert!(icu.get("version").is_none());
        assert_eq!(icu["metadata"], serde_json::json!({ "build": true }));
    }

    #[test]
    fn test_yaml_deserializes_back() {
        let plan = web_plan();
        let parsed: BuildPlan = serde_yaml::from_str(&plan.to_yaml().unwrap()).unwrap();
        assert_eq!(parsed, plan);
    }

    #[test]
    fn test_missing_metadata_defaults_to_empty() {
        let plan = BuildPlan::from_toml("[[requires]]\nname = \"node\"\n").unwrap();

        assert!(plan.provides().is_empty());
        assert_eq!(plan.requires()[0].metadata, Applicability::default());
    }

    #[test]
    fn test_requirement_lookup() {
        let plan = web_plan();

        let sdk = plan.requirement(&ComponentId::DotnetSdk).unwrap();
        assert_eq!(sdk.version.as_deref(), Some("2.2.0"));
        assert!(plan.requirement(&ComponentId::Node).is_none());
    }
}
