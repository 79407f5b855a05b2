use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Detect phase for .NET Core applications
#[derive(Parser, Debug)]
#[command(
    name = "dotnet-detect",
    about = "Detect .NET Core projects and resolve their build plan",
    version,
    long_about = "dotnet-detect inspects an application directory for a .csproj, .fsproj or \
                  .vbproj file and resolves the build plan: the .NET Core SDK, runtime, \
                  ASP.NET Core and auxiliary components later build stages must provide."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Detect a .NET Core project and print its build plan",
        long_about = "Scans the application directory (or the directory named by \
                      dotnet-build.project-path in buildpack.yml) for a project file and \
                      resolves the build plan.\n\n\
                      Exit status: 0 when the application is a .NET Core project, 100 when \
                      it is not, 1 on usage or I/O errors.\n\n\
                      Examples:\n  \
                      dotnet-detect detect\n  \
                      dotnet-detect detect /workspace --stack io.buildpacks.stacks.bionic\n  \
                      dotnet-detect detect /workspace --plan /tmp/plan.toml"
    )]
    Detect(DetectArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct DetectArgs {
    #[arg(
        value_name = "APP_DIR",
        help = "Path to the application (defaults to current directory)"
    )]
    pub app_path: Option<PathBuf>,

    #[arg(
        short = 's',
        long,
        value_name = "STACK_ID",
        help = "Target stack identifier (defaults to $CNB_STACK_ID)"
    )]
    pub stack: Option<String>,

    #[arg(
        short = 'p',
        long,
        value_name = "FILE",
        help = "Write the build plan as TOML to FILE instead of stdout"
    )]
    pub plan: Option<PathBuf>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "toml",
        help = "Output format for stdout"
    )]
    pub format: OutputFormatArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Toml,
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Toml => super::output::OutputFormat::Toml,
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}
