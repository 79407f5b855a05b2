//! .NET project detection
//!
//! Data flows strictly one way:
//! [`locator`] → [`descriptor`] → [`version`] / [`plan`] → [`service`].

pub mod descriptor;
pub mod error;
pub mod locator;
pub mod plan;
pub mod service;
pub mod version;

pub use descriptor::{installs_node_modules, DescriptorError, ProjectDescriptor, SdkKind, TargetFramework};
pub use error::DetectError;
pub use locator::{DescriptorCandidate, DescriptorKind, DescriptorLocator};
pub use plan::assemble_plan;
pub use service::{DetectOutcome, DetectPhase, Detection, DetectionService, ResolutionContext};
pub use version::{resolve_versions, ResolvedVersions};
