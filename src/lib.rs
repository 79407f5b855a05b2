//! dotnet-detect - detect phase for .NET Core applications
//!
//! Decides whether an application tree is a .NET Core project and, if so,
//! resolves the build plan: which SDK, runtime, ASP.NET Core and auxiliary
//! components later build stages must provide.
//!
//! # Example
//!
//! ```no_run
//! use dotnet_detect::{DetectOutcome, DetectionService, RealFileSystem, StackId};
//! use std::path::Path;
//!
//! let fs = RealFileSystem::new();
//! match DetectionService::new(&fs).run(Path::new("/workspace"), StackId::Bionic) {
//!     DetectOutcome::Pass(detection) => println!("{}", detection.plan),
//!     DetectOutcome::Fail(err) => eprintln!("{}", err.help_message()),
//! }
//! ```
//!
//! # Project Structure
//!
//! - [`detection`]: locator, parser, version resolver, plan assembler, service
//! - [`output`]: the build plan schema and its serializations
//! - [`config`]: `buildpack.yml` and environment configuration
//! - [`fs`]: read-only filesystem abstraction
//! - [`stack`]: stack and component identifiers

pub mod cli;
pub mod config;
pub mod detection;
pub mod fs;
pub mod output;
pub mod stack;
pub mod util;

pub use config::{BuildpackConfig, ConfigError, DetectConfig};
pub use detection::{DetectError, DetectOutcome, Detection, DetectionService, ResolutionContext};
pub use fs::{FileSystem, MockFileSystem, RealFileSystem};
pub use output::BuildPlan;
pub use stack::{ComponentId, StackId};
pub use util::{init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
