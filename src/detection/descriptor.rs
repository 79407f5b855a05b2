//! Project file parsing
//!
//! Turns the XML of a `.csproj`/`.fsproj`/`.vbproj` into the handful of
//! signals the resolver needs. Elements are matched by local name, so legacy
//! files carrying the MSBuild 2003 namespace parse the same way.

use regex::Regex;
use roxmltree::{Document, Node};
use std::fmt;
use thiserror::Error;

const WEB_SDK_SUFFIX: &str = ".Web";
const NODE_INSTALL_COMMAND: &str = "npm install";

#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("failed to read project file: {0}")]
    Read(String),

    #[error("invalid XML: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("expected root element <Project>, found <{0}>")]
    MissingProjectElement(String),

    #[error("no <TargetFramework> declared")]
    MissingTargetFramework,

    #[error("unsupported target framework '{0}', expected netcoreapp<major>.<minor>")]
    UnsupportedTargetFramework(String),
}

/// Flavour of the MSBuild SDK named by `<Project Sdk="...">`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SdkKind {
    Standard,
    Web,
}

impl SdkKind {
    pub fn from_sdk_attribute(sdk: Option<&str>) -> Self {
        match sdk {
            Some(sdk) if sdk.trim().ends_with(WEB_SDK_SUFFIX) => SdkKind::Web,
            _ => SdkKind::Standard,
        }
    }
}

/// `netcoreapp<major>.<minor>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetFramework {
    pub major: u32,
    pub minor: u32,
}

impl TargetFramework {
    pub fn parse(moniker: &str) -> Result<Self, DescriptorError> {
        let unsupported = || DescriptorError::UnsupportedTargetFramework(moniker.to_string());

        let caps = Regex::new(r"^netcoreapp(\d+)\.(\d+)$")
            .ok()
            .and_then(|re| re.captures(moniker))
            .ok_or_else(unsupported)?;

        let major = caps[1].parse().map_err(|_| unsupported())?;
        let minor = caps[2].parse().map_err(|_| unsupported())?;

        Ok(Self { major, minor })
    }
}

impl fmt::Display for TargetFramework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDescriptor {
    pub sdk_kind: SdkKind,
    pub target_framework: TargetFramework,
    /// Exact runtime pin, e.g. `2.2.7`
    pub runtime_framework_version: Option<String>,
    /// True when a build target runs `npm install`
    pub has_client_build_step: bool,
}

impl ProjectDescriptor {
    pub fn parse(content: &str) -> Result<Self, DescriptorError> {
        let doc = Document::parse(content)?;
        let project = doc.root_element();

        if project.tag_name().name() != "Project" {
            return Err(DescriptorError::MissingProjectElement(
                project.tag_name().name().to_string(),
            ));
        }

        let sdk_kind = SdkKind::from_sdk_attribute(project.attribute("Sdk"));

        let moniker = first_text(project, "TargetFramework")
            .ok_or(DescriptorError::MissingTargetFramework)?;
        let target_framework = TargetFramework::parse(moniker)?;

        let runtime_framework_version = elements(project, "RuntimeFrameworkVersion")
            .filter_map(element_text)
            .find(|v| is_exact_version(v))
            .map(str::to_string);

        let has_client_build_step = elements(project, "Exec")
            .filter_map(|exec| exec.attribute("Command"))
            .any(installs_node_modules);

        Ok(Self {
            sdk_kind,
            target_framework,
            runtime_framework_version,
            has_client_build_step,
        })
    }

    pub fn is_web(&self) -> bool {
        self.sdk_kind == SdkKind::Web
    }
}

/// Whether a build step command installs node packages.
///
/// Plain substring match on the command text, case-sensitive.
pub fn installs_node_modules(command: &str) -> bool {
    command.contains(NODE_INSTALL_COMMAND)
}

fn elements<'a, 'input: 'a>(
    root: Node<'a, 'input>,
    name: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    root.descendants()
        .filter(move |n| n.is_element() && n.tag_name().name() == name)
}

fn element_text<'a>(node: Node<'a, '_>) -> Option<&'a str> {
    node.text().map(str::trim).filter(|t| !t.is_empty())
}

fn first_text<'a>(root: Node<'a, '_>, name: &'a str) -> Option<&'a str> {
    elements(root, name).next().and_then(element_text)
}

fn is_exact_version(version: &str) -> bool {
    Regex::new(r"^\d+\.\d+\.\d+(-[0-9A-Za-z.-]+)?$")
        .map(|re| re.is_match(version))
        .unwrap_or(false)
}
