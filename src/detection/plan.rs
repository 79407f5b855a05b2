//! Build plan assembly
//!
//! Entry order is fixed and compared verbatim by downstream consumers:
//! publish, SDK, runtime, ASP.NET Core, node, ICU. Each component appears at
//! most once, so no deduplication is needed.

use super::version::ResolvedVersions;
use crate::output::{Applicability, BuildPlan, Provided, Required};
use crate::stack::{ComponentId, StackId};

pub fn assemble_plan(
    versions: &ResolvedVersions,
    has_client_build_step: bool,
    stack: &StackId,
) -> BuildPlan {
    let provides = vec![Provided {
        name: ComponentId::Publish,
    }];

    let mut requires = vec![
        Required::new(ComponentId::Publish, None, Applicability::BUILD),
        Required::new(
            ComponentId::DotnetSdk,
            Some(versions.sdk.clone()),
            Applicability::BUILD_AND_LAUNCH,
        ),
        Required::new(
            ComponentId::DotnetRuntime,
            Some(versions.runtime.clone()),
            Applicability::BUILD_AND_LAUNCH,
        ),
    ];

    if let Some(aspnet_core) = &versions.aspnet_core {
        requires.push(Required::new(
            ComponentId::DotnetAspNetCore,
            Some(aspnet_core.clone()),
            Applicability::BUILD_AND_LAUNCH,
        ));
    }

    if has_client_build_step {
        requires.push(Required::new(
            ComponentId::Node,
            None,
            Applicability::BUILD_AND_LAUNCH,
        ));
    }

    if stack.requires_icu() {
        requires.push(Required::new(ComponentId::Icu, None, Applicability::BUILD));
    }

    BuildPlan::new(provides, requires)
}
