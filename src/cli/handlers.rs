use super::commands::{CliArgs, Commands, DetectArgs};
use super::output::{OutputFormat, OutputFormatter};
use crate::config::DetectConfig;
use crate::detection::{DetectOutcome, DetectionService};
use crate::fs::RealFileSystem;
use crate::stack::StackId;
use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use tracing::{debug, error, info};

/// The application is a .NET Core project; a plan was produced.
pub const EXIT_PASS: i32 = 0;
/// Host-level failure: bad arguments, unreadable directory, unwritable plan.
pub const EXIT_ERROR: i32 = 1;
/// The application is not something this detector builds.
pub const EXIT_FAIL: i32 = 100;

/// Process configuration: environment first, then command-line flags.
///
/// `--log-level` wins over `-v`/`-q`, which win over `DOTNET_DETECT_LOG_LEVEL`.
/// `--stack` wins over `CNB_STACK_ID`.
pub fn load_config(args: &CliArgs) -> DetectConfig {
    let log_level = match &args.log_level {
        Some(level) => Some(level.as_str()),
        None if args.verbose => Some("debug"),
        None if args.quiet => Some("error"),
        None => None,
    };

    let stack = match &args.command {
        Commands::Detect(detect_args) => stack_flag(detect_args),
    };

    DetectConfig::default().with_overrides(stack, log_level)
}

pub fn handle_detect(args: &DetectArgs, config: DetectConfig, quiet: bool) -> i32 {
    let app_path = match resolve_app_path(args) {
        Ok(path) => path,
        Err(e) => {
            error!("{:#}", e);
            return EXIT_ERROR;
        }
    };
    debug!("Application path: {}", app_path.display());

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        eprintln!("\nPlease check your environment variables and command-line arguments.");
        return EXIT_ERROR;
    }
    debug!("{}", config);

    let stack = match config.stack {
        Some(stack) => stack,
        None => return EXIT_ERROR,
    };

    let fs = RealFileSystem::new();
    let service = DetectionService::new(&fs);

    let detection = match service.run(&app_path, stack) {
        DetectOutcome::Pass(detection) => detection,
        DetectOutcome::Fail(err) => {
            if !quiet {
                eprintln!("{}", err.help_message());
            }
            return EXIT_FAIL;
        }
    };

    if let Some(plan_file) = &args.plan {
        let written = detection.plan.to_toml().and_then(|toml| {
            std::fs::write(plan_file, toml)
                .with_context(|| format!("Failed to write build plan to {:?}", plan_file))
        });

        return match written {
            Ok(()) => {
                info!("Build plan written to: {}", plan_file.display());
                EXIT_PASS
            }
            Err(e) => {
                error!("{:#}", e);
                EXIT_ERROR
            }
        };
    }

    let format: OutputFormat = args.format.into();
    match OutputFormatter::new(format).format(&detection) {
        Ok(output) => {
            println!("{}", output);
            EXIT_PASS
        }
        Err(e) => {
            error!("Failed to format output: {:#}", e);
            EXIT_ERROR
        }
    }
}

fn resolve_app_path(args: &DetectArgs) -> Result<PathBuf> {
    let app_path = match &args.app_path {
        Some(path) => path.clone(),
        None => env::current_dir().context("Failed to get current directory")?,
    };

    if !app_path.is_dir() {
        anyhow::bail!(
            "Application path is not a directory: {}",
            app_path.display()
        );
    }

    app_path
        .canonicalize()
        .with_context(|| format!("Failed to canonicalize {}", app_path.display()))
}

fn stack_flag(args: &DetectArgs) -> Option<StackId> {
    args.stack
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(StackId::parse)
}
