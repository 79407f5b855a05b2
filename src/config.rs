//! Configuration for a detection run
//!
//! Two sources feed a run:
//!
//! - `buildpack.yml` at the application root, decoded into [`BuildpackConfig`].
//!   The only key this buildpack reads is `dotnet-build.project-path`, which
//!   redirects the project-file scan into a sub-directory.
//! - Process environment, decoded into [`DetectConfig`].
//!
//! # Environment Variables
//!
//! - `CNB_STACK_ID`: identifier of the target stack - **required**
//! - `DOTNET_DETECT_LOG_LEVEL`: logging level - default: "info"
//! - `DOTNET_DETECT_LOG_JSON`: emit JSON log lines (true|false) - default: "false"

use crate::fs::FileSystem;
use crate::stack::StackId;
use serde::{Deserialize, Deserializer, Serialize};
use std::env;
use std::fmt;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

pub const BUILDPACK_YML: &str = "buildpack.yml";

const DEFAULT_LOG_LEVEL: &str = "info";
const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path:?}: {message}")]
    Read { path: PathBuf, message: String },

    #[error("Failed to decode {path:?}: {message}")]
    Decode { path: PathBuf, message: String },

    #[error("Invalid dotnet-build.project-path '{0}': must be a relative path inside the application")]
    InvalidProjectPath(String),

    #[error("Stack not specified. Set CNB_STACK_ID or pass --stack")]
    MissingStack,

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

fn deserialize_null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::deserialize(deserializer)?.unwrap_or_default())
}

/// Decoded `buildpack.yml`. Keys owned by other buildpacks are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildpackConfig {
    #[serde(
        rename = "dotnet-build",
        default,
        deserialize_with = "deserialize_null_default"
    )]
    pub dotnet_build: DotnetBuildConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DotnetBuildConfig {
    #[serde(
        rename = "project-path",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub project_path: Option<String>,
}

impl BuildpackConfig {
    /// Loads `buildpack.yml` from the application root.
    ///
    /// Returns `Ok(None)` when the file is absent. A file that exists but
    /// cannot be read or decoded is an error, never silently ignored.
    pub fn load(fs: &dyn FileSystem, app_root: &Path) -> Result<Option<Self>, ConfigError> {
        let path = app_root.join(BUILDPACK_YML);
        if !fs.exists(&path) {
            return Ok(None);
        }

        let content = fs.read_to_string(&path).map_err(|e| ConfigError::Read {
            path: path.clone(),
            message: format!("{:#}", e),
        })?;

        Self::parse(&content)
            .map(Some)
            .map_err(|e| ConfigError::Decode {
                path,
                message: e.to_string(),
            })
    }

    pub fn parse(content: &str) -> Result<Self, serde_yaml::Error> {
        let is_blank = content.lines().all(|line| {
            let line = line.trim();
            line.is_empty() || line == "---" || line.starts_with('#')
        });
        if is_blank {
            return Ok(Self::default());
        }

        let config: Option<Self> = serde_yaml::from_str(content)?;
        Ok(config.unwrap_or_default())
    }

    /// The validated project-path override, relative to the application root.
    ///
    /// `.` and `..` are resolved lexically; the path is rejected only if it
    /// is absolute or climbs above the application root. A path that
    /// resolves to the root itself is no override.
    pub fn project_path(&self) -> Result<Option<PathBuf>, ConfigError> {
        let raw = match self.dotnet_build.project_path.as_deref().map(str::trim) {
            None | Some("") => return Ok(None),
            Some(raw) => raw,
        };
        let invalid = || ConfigError::InvalidProjectPath(raw.to_string());

        let mut normalized = PathBuf::new();
        for component in Path::new(raw).components() {
            match component {
                Component::Normal(part) => normalized.push(part),
                Component::CurDir => {}
                Component::ParentDir => {
                    if !normalized.pop() {
                        return Err(invalid());
                    }
                }
                Component::RootDir | Component::Prefix(_) => return Err(invalid()),
            }
        }

        if normalized.as_os_str().is_empty() {
            return Ok(None);
        }
        Ok(Some(normalized))
    }
}

/// Process-level settings, loaded from the environment by `Default`.
#[derive(Debug, Clone)]
pub struct DetectConfig {
    pub stack: Option<StackId>,
    pub log_level: String,
    pub log_json: bool,
}

impl Default for DetectConfig {
    fn default() -> Self {
        let stack = env::var("CNB_STACK_ID")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(|s| StackId::parse(&s));

        let log_level = env::var("DOTNET_DETECT_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        let log_json = env::var("DOTNET_DETECT_LOG_JSON")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(false);

        Self {
            stack,
            log_level,
            log_json,
        }
    }
}

impl DetectConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(ConfigError::ValidationFailed(format!(
                "Invalid log level '{}'. Valid levels: {}",
                self.log_level,
                VALID_LOG_LEVELS.join(", ")
            )));
        }

        self.stack()?;
        Ok(())
    }

    /// Applies command-line values on top of the environment. A flag, when
    /// given, always replaces the environment value.
    pub fn with_overrides(mut self, stack: Option<StackId>, log_level: Option<&str>) -> Self {
        if let Some(stack) = stack {
            self.stack = Some(stack);
        }
        if let Some(level) = log_level {
            self.log_level = level.trim().to_lowercase();
        }
        self
    }

    pub fn stack(&self) -> Result<&StackId, ConfigError> {
        self.stack.as_ref().ok_or(ConfigError::MissingStack)
    }
}

impl fmt::Display for DetectConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "dotnet-detect Configuration:")?;
        match &self.stack {
            Some(stack) => writeln!(f, "  Stack: {} ({})", stack, stack.label())?,
            None => writeln!(f, "  Stack: (not set)")?,
        }
        writeln!(f, "  Log Level: {}", self.log_level)?;
        writeln!(f, "  Log JSON: {}", self.log_json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MockFileSystem;
    use crate::util::env_guard::EnvGuard;
    use serial_test::serial;

    #[test]
    fn test_parse_project_path() {
        let config = BuildpackConfig::parse(
            r#"---
dotnet-build:
  project-path: "src/proj1"
"#,
        )
        .unwrap();

        assert_eq!(
            config.project_path().unwrap(),
            Some(PathBuf::from("src/proj1"))
        );
    }

    #[test]
    fn test_parse_ignores_other_buildpacks() {
        let config = BuildpackConfig::parse(
            r#"
nodejs:
  version: 10.x
dotnet-build:
  project-path: app
"#,
        )
        .unwrap();

        assert_eq!(config.project_path().unwrap(), Some(PathBuf::from("app")));
    }

    #[test]
    fn test_parse_empty_document() {
        assert_eq!(BuildpackConfig::parse("").unwrap(), BuildpackConfig::default());
        assert_eq!(
            BuildpackConfig::parse("---\n").unwrap(),
            BuildpackConfig::default()
        );
    }

    #[test]
    fn test_parse_null_section() {
        let config = BuildpackConfig::parse("dotnet-build:\n").unwrap();
        assert_eq!(config.project_path().unwrap(), None);
    }

    #[test]
    fn test_parse_malformed_yaml() {
        assert!(BuildpackConfig::parse("dotnet-build: [unclosed").is_err());
        assert!(BuildpackConfig::parse("dotnet-build:\n  project-path: [1, 2]\n").is_err());
    }

    #[test]
    fn test_project_path_rejects_escapes() {
        for raw in ["../outside", "/etc", "src/../../x"] {
            let config = BuildpackConfig {
                dotnet_build: DotnetBuildConfig {
                    project_path: Some(raw.to_string()),
                },
            };
            assert!(
                matches!(config.project_path(), Err(ConfigError::InvalidProjectPath(_))),
                "{} should be rejected",
                raw
            );
        }
    }

    #[test]
    fn test_project_path_resolves_dot_segments_inside_root() {
        let cases = [
            ("src/../src/proj1", Some(PathBuf::from("src/proj1"))),
            ("./src/proj1/", Some(PathBuf::from("src/proj1"))),
            ("src/..", None),
        ];

        for (raw, expected) in cases {
            let config = BuildpackConfig {
                dotnet_build: DotnetBuildConfig {
                    project_path: Some(raw.to_string()),
                },
            };
            assert_eq!(config.project_path().unwrap(), expected, "{}", raw);
        }
    }

    #[test]
    fn test_blank_project_path_is_none() {
        let config = BuildpackConfig {
            dotnet_build: DotnetBuildConfig {
                project_path: Some("  ".to_string()),
            },
        };
        assert_eq!(config.project_path().unwrap(), None);
    }

    #[test]
    fn test_load_absent_file() {
        let fs = MockFileSystem::new();
        let config = BuildpackConfig::load(&fs, Path::new("/app")).unwrap();
        assert!(config.is_none());
    }

    #[test]
    fn test_load_present_file() {
        let fs = MockFileSystem::new();
        fs.add_file("buildpack.yml", "dotnet-build:\n  project-path: src/proj1\n");

        let config = BuildpackConfig::load(&fs, Path::new("/app"))
            .unwrap()
            .unwrap();
        assert_eq!(
            config.dotnet_build.project_path.as_deref(),
            Some("src/proj1")
        );
    }

    #[test]
    fn test_load_undecodable_file() {
        let fs = MockFileSystem::new();
        fs.add_file("buildpack.yml", "dotnet-build: [");

        let err = BuildpackConfig::load(&fs, Path::new("/app")).unwrap_err();
        assert!(matches!(err, ConfigError::Decode { .. }));
        assert!(err.to_string().contains("buildpack.yml"));
    }

    #[test]
    fn test_load_unreadable_entry() {
        let fs = MockFileSystem::new();
        fs.add_dir("buildpack.yml");

        let err = BuildpackConfig::load(&fs, Path::new("/app")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    #[serial]
    fn test_default_configuration() {
        let _guards = [
            EnvGuard::unset("CNB_STACK_ID"),
            EnvGuard::unset("DOTNET_DETECT_LOG_LEVEL"),
            EnvGuard::unset("DOTNET_DETECT_LOG_JSON"),
        ];

        let config = DetectConfig::default();

        assert!(config.stack.is_none());
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
        assert!(!config.log_json);
        assert!(matches!(config.validate(), Err(ConfigError::MissingStack)));
    }

    #[test]
    #[serial]
    fn test_environment_variable_parsing() {
        let _guards = [
            EnvGuard::set("CNB_STACK_ID", "io.buildpacks.stacks.bionic"),
            EnvGuard::set("DOTNET_DETECT_LOG_LEVEL", "DEBUG"),
            EnvGuard::set("DOTNET_DETECT_LOG_JSON", "true"),
        ];

        let config = DetectConfig::default();

        assert_eq!(config.stack, Some(StackId::Bionic));
        assert_eq!(config.log_level, "debug");
        assert!(config.log_json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_invalid_log_level() {
        let config = DetectConfig {
            stack: Some(StackId::Cflinuxfs3),
            log_level: "loud".to_string(),
            log_json: false,
        };

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("loud"));
    }

    #[test]
    #[serial]
    fn test_overrides_replace_environment() {
        let _guards = [
            EnvGuard::set("CNB_STACK_ID", "org.cloudfoundry.stacks.cflinuxfs3"),
            EnvGuard::set("DOTNET_DETECT_LOG_LEVEL", "verbose"),
        ];

        let config =
            DetectConfig::default().with_overrides(Some(StackId::Bionic), Some("Debug"));

        assert_eq!(config.stack, Some(StackId::Bionic));
        assert_eq!(config.log_level, "debug");
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_no_overrides_keep_environment() {
        let _guards = [
            EnvGuard::set("CNB_STACK_ID", "org.cloudfoundry.stacks.cflinuxfs3"),
            EnvGuard::set("DOTNET_DETECT_LOG_LEVEL", "warn"),
        ];

        let config = DetectConfig::default().with_overrides(None, None);

        assert_eq!(config.stack, Some(StackId::Cflinuxfs3));
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_config_display() {
        let config = DetectConfig {
            stack: Some(StackId::Bionic),
            log_level: "info".to_string(),
            log_json: false,
        };
        let display = format!("{}", config);
        assert!(display.contains("io.buildpacks.stacks.bionic"));
        assert!(display.contains("Log Level: info"));
    }
}
