use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

#[allow(dead_code)]
pub fn get_dotnet_detect_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_dotnet-detect"))
}

/// Builds a project file body with the given SDK attribute, target framework
/// and extra `<Project>` children.
#[allow(dead_code)]
pub fn project_file(sdk: &str, target_framework: &str, extra: &str) -> String {
    format!(
        r#"<Project Sdk="{sdk}">

  <PropertyGroup>
    <OutputType>Exe</OutputType>
    <TargetFramework>{target_framework}</TargetFramework>
  </PropertyGroup>
{extra}
</Project>
"#
    )
}

/// Temporary application tree.
pub struct AppTree {
    dir: TempDir,
}

#[allow(dead_code)]
impl AppTree {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    pub fn with_console_app(self, name: &str, target_framework: &str) -> Self {
        self.write(name, &project_file("Microsoft.NET.Sdk", target_framework, ""));
        self
    }

    pub fn with_web_app(self, name: &str, target_framework: &str) -> Self {
        self.write(name, &project_file("Microsoft.NET.Sdk.Web", target_framework, ""));
        self
    }
}
