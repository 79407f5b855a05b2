//! Output formatting for detection results
//!
//! TOML is the buildpack plan layout and the default. JSON and YAML carry the
//! same logical plan; the human format adds the selected project file.

use crate::detection::{Detection, SdkKind};
use crate::output::{Applicability, Required};
use anyhow::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Buildpack plan TOML (machine-readable)
    Toml,
    Json,
    Yaml,
    /// Human-readable formatted text
    Human,
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self, detection: &Detection) -> Result<String> {
        match self.format {
            OutputFormat::Toml => detection.plan.to_toml(),
            OutputFormat::Json => detection.plan.to_json(),
            OutputFormat::Yaml => detection.plan.to_yaml(),
            OutputFormat::Human => Ok(self.format_human(detection)),
        }
    }

    fn format_human(&self, detection: &Detection) -> String {
        let descriptor = &detection.descriptor;
        let mut output = String::new();

        output.push_str("\u{2713} .NET Core project detected\n");
        output.push_str(&"\u{2501}".repeat(42));
        output.push_str("\n\n");

        output.push_str(&format!(
            "Project:    {}\n",
            detection.descriptor_path.display()
        ));
        let sdk = match descriptor.sdk_kind {
            SdkKind::Web => "Microsoft.NET.Sdk.Web",
            SdkKind::Standard => "Microsoft.NET.Sdk",
        };
        output.push_str(&format!("SDK:        {}\n", sdk));
        output.push_str(&format!(
            "Framework:  netcoreapp{}\n\n",
            descriptor.target_framework
        ));

        output.push_str("Provides:\n");
        let provides = detection.plan.provides();
        for (i, provided) in provides.iter().enumerate() {
            output.push_str(&format!(
                "{}\u{2500} {}\n",
                connector(i, provides.len()),
                provided.name
            ));
        }

        output.push_str("\nRequires:\n");
        let requires = detection.plan.requires();
        for (i, required) in requires.iter().enumerate() {
            output.push_str(&format!(
                "{}\u{2500} {}\n",
                connector(i, requires.len()),
                requirement_line(required)
            ));
        }

        output
    }
}

fn connector(index: usize, len: usize) -> char {
    if index + 1 == len {
        '\u{2514}'
    } else {
        '\u{251C}'
    }
}

fn requirement_line(required: &Required) -> String {
    let name = match &required.version {
        Some(version) => format!("{} {}", required.name, version),
        None => required.name.to_string(),
    };
    format!("{:<28} ({})", name, phases(required.metadata))
}

fn phases(metadata: Applicability) -> String {
    let mut phases = Vec::new();
    if metadata.build {
        phases.push("build");
    }
    if metadata.launch {
        phases.push("launch");
    }
    phases.join(", ")
}
