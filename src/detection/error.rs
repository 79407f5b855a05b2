use super::descriptor::DescriptorError;
use crate::config::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

/// Why a detection run did not pass. Every variant is terminal for the run.
#[derive(Debug, Error)]
pub enum DetectError {
    #[error("no proj file found in {}", root.display())]
    NoDescriptorFound { root: PathBuf },

    #[error("malformed project file {}: {source}", path.display())]
    MalformedDescriptor {
        path: PathBuf,
        #[source]
        source: DescriptorError,
    },

    #[error("invalid buildpack configuration: {0}")]
    Configuration(#[from] ConfigError),
}

impl DetectError {
    /// Returns a user-facing message with a hint on how to fix the application
    pub fn help_message(&self) -> String {
        match self {
            DetectError::NoDescriptorFound { root } => format!(
                "Error: No .NET project file found\nSearched: {}\n\n\
                Help: This buildpack expects a *.csproj, *.fsproj or *.vbproj file.\n\
                - Place the project file at the application root, or\n\
                - Set dotnet-build.project-path in buildpack.yml to its directory",
                root.display()
            ),
            DetectError::MalformedDescriptor { path, source } => format!(
                "Error: Could not read project file\nPath: {}\n\n\
                Help: The project file must be valid MSBuild XML with a <Project> root\n\
                and a <TargetFramework> of the form netcoreapp<major>.<minor>.\n\n\
                Details: {}",
                path.display(),
                source
            ),
            DetectError::Configuration(source) => format!(
                "Error: Invalid configuration\n\n\
                Help: Check buildpack.yml at the application root and the stack settings.\n\n\
                Details: {}",
                source
            ),
        }
    }
}
