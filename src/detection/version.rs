//! Version constraints derived from the target framework
//!
//! The SDK is pinned to the `.0` patch of the target framework; the runtime
//! floats on the patch (`major.minor.*`) unless the project pins it. The SDK
//! patch never influences the runtime constraint.

use super::descriptor::ProjectDescriptor;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVersions {
    pub sdk: String,
    pub runtime: String,
    /// Present only for web projects
    pub aspnet_core: Option<String>,
}

pub fn resolve_versions(descriptor: &ProjectDescriptor) -> ResolvedVersions {
    let framework = descriptor.target_framework;
    let wildcard = format!("{}.*", framework);

    let runtime = descriptor
        .runtime_framework_version
        .clone()
        .unwrap_or_else(|| wildcard.clone());

    let aspnet_core = descriptor.is_web().then_some(wildcard);

    ResolvedVersions {
        sdk: format!("{}.0", framework),
        runtime,
        aspnet_core,
    }
}
