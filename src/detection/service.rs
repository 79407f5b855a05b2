//! Detection service orchestration
//!
//! Sequences one detection run:
//! 1. Scanning - list project files under the (possibly redirected) root
//! 2. Parsing - parse the first project file by path
//! 3. Resolving - derive version constraints
//! 4. Assembled - build the plan
//!
//! Any failure moves the run to `Failed` and no plan is produced.
//!
//! # Example
//!
//! ```no_run
//! use dotnet_detect::detection::{DetectionService, ResolutionContext};
//! use dotnet_detect::fs::RealFileSystem;
//! use dotnet_detect::stack::StackId;
//! use std::path::Path;
//!
//! let fs = RealFileSystem::new();
//! let service = DetectionService::new(&fs);
//!
//! let context = ResolutionContext::load(&fs, Path::new("/workspace"), StackId::Bionic)?;
//! let detection = service.detect(&context)?;
//! println!("{}", detection.plan);
//! # Ok::<(), dotnet_detect::detection::DetectError>(())
//! ```

use super::descriptor::{DescriptorError, ProjectDescriptor};
use super::error::DetectError;
use super::locator::DescriptorLocator;
use super::plan::assemble_plan;
use super::version::resolve_versions;
use crate::config::BuildpackConfig;
use crate::fs::FileSystem;
use crate::output::BuildPlan;
use crate::stack::StackId;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectPhase {
    Scanning,
    Parsing,
    Resolving,
    Assembled,
    Failed,
}

/// Inputs of one detection run. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionContext {
    app_root: PathBuf,
    project_path: Option<PathBuf>,
    stack: StackId,
}

impl ResolutionContext {
    pub fn new(app_root: impl Into<PathBuf>, stack: StackId) -> Self {
        Self {
            app_root: app_root.into(),
            project_path: None,
            stack,
        }
    }

    /// Redirects the scan into `app_root/project_path`.
    pub fn with_project_path(mut self, project_path: impl Into<PathBuf>) -> Self {
        self.project_path = Some(project_path.into());
        self
    }

    /// Builds the context, applying `dotnet-build.project-path` from
    /// `buildpack.yml` when the file is present.
    pub fn load(fs: &dyn FileSystem, app_root: &Path, stack: StackId) -> Result<Self, DetectError> {
        let context = Self::new(app_root, stack);

        let project_path = match BuildpackConfig::load(fs, app_root)? {
            Some(config) => config.project_path()?,
            None => None,
        };

        Ok(match project_path {
            Some(path) => {
                debug!(project_path = %path.display(), "Using project path from buildpack.yml");
                context.with_project_path(path)
            }
            None => context,
        })
    }

    pub fn app_root(&self) -> &Path {
        &self.app_root
    }

    pub fn project_path(&self) -> Option<&Path> {
        self.project_path.as_deref()
    }

    pub fn stack(&self) -> &StackId {
        &self.stack
    }

    /// Directory the locator scans; the application root is never scanned
    /// when a project path is configured.
    pub fn scan_root(&self) -> PathBuf {
        match &self.project_path {
            Some(path) => self.app_root.join(path),
            None => self.app_root.clone(),
        }
    }
}

/// Successful run: the plan plus the project file it was derived from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection {
    pub descriptor_path: PathBuf,
    pub descriptor: ProjectDescriptor,
    pub plan: BuildPlan,
}

/// Terminal outcome handed to the host.
#[derive(Debug)]
pub enum DetectOutcome {
    Pass(Detection),
    Fail(DetectError),
}

impl DetectOutcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, DetectOutcome::Pass(_))
    }

    pub fn plan(&self) -> Option<&BuildPlan> {
        match self {
            DetectOutcome::Pass(detection) => Some(&detection.plan),
            DetectOutcome::Fail(_) => None,
        }
    }

    pub fn error(&self) -> Option<&DetectError> {
        match self {
            DetectOutcome::Pass(_) => None,
            DetectOutcome::Fail(err) => Some(err),
        }
    }
}

impl From<Result<Detection, DetectError>> for DetectOutcome {
    fn from(result: Result<Detection, DetectError>) -> Self {
        match result {
            Ok(detection) => DetectOutcome::Pass(detection),
            Err(err) => DetectOutcome::Fail(err),
        }
    }
}

pub struct DetectionService<'a> {
    fs: &'a dyn FileSystem,
}

impl<'a> DetectionService<'a> {
    pub fn new(fs: &'a dyn FileSystem) -> Self {
        Self { fs }
    }

    /// Loads the context for `app_root` and runs detection against it.
    pub fn run(&self, app_root: &Path, stack: StackId) -> DetectOutcome {
        let outcome: DetectOutcome = ResolutionContext::load(self.fs, app_root, stack)
            .and_then(|context| self.detect(&context))
            .into();

        match &outcome {
            DetectOutcome::Pass(detection) => info!(
                descriptor = %detection.descriptor_path.display(),
                requires = detection.plan.requires().len(),
                "Detection passed"
            ),
            DetectOutcome::Fail(err) => warn!(error = %err, "Detection failed"),
        }

        outcome
    }

    pub fn detect(&self, context: &ResolutionContext) -> Result<Detection, DetectError> {
        let result = self.resolve(context);
        if result.is_err() {
            debug!(phase = ?DetectPhase::Failed, "Detection phase");
        }
        result
    }

    fn resolve(&self, context: &ResolutionContext) -> Result<Detection, DetectError> {
        let scan_root = context.scan_root();
        debug!(phase = ?DetectPhase::Scanning, root = %scan_root.display(), "Detection phase");

        let candidates = DescriptorLocator::new(self.fs).locate(&scan_root);
        let selected = DescriptorLocator::select(&candidates).ok_or_else(|| {
            DetectError::NoDescriptorFound {
                root: scan_root.clone(),
            }
        })?;

        debug!(
            phase = ?DetectPhase::Parsing,
            descriptor = %selected.path.display(),
            kind = %selected.kind,
            "Detection phase"
        );
        let descriptor = self.parse_descriptor(&selected.path)?;

        debug!(
            phase = ?DetectPhase::Resolving,
            target_framework = %descriptor.target_framework,
            sdk = ?descriptor.sdk_kind,
            "Detection phase"
        );
        let versions = resolve_versions(&descriptor);

        let plan = assemble_plan(&versions, descriptor.has_client_build_step, context.stack());
        debug!(phase = ?DetectPhase::Assembled, stack = %context.stack(), "Detection phase");

        Ok(Detection {
            descriptor_path: selected.path.clone(),
            descriptor,
            plan,
        })
    }

    fn parse_descriptor(&self, path: &Path) -> Result<ProjectDescriptor, DetectError> {
        let malformed = |source: DescriptorError| DetectError::MalformedDescriptor {
            path: path.to_path_buf(),
            source,
        };

        let content = self
            .fs
            .read_to_string(path)
            .map_err(|e| malformed(DescriptorError::Read(format!("{:#}", e))))?;

        ProjectDescriptor::parse(&content).map_err(malformed)
    }
}
