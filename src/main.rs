use dotnet_detect::cli::commands::{CliArgs, Commands};
use dotnet_detect::cli::handlers::{handle_detect, load_config};
use dotnet_detect::util::logging::{self, LoggingConfig};
use dotnet_detect::VERSION;

use clap::Parser;
use tracing::debug;

fn main() {
    let args = CliArgs::parse();
    let config = load_config(&args);
    logging::init_logging(LoggingConfig::from(&config));

    debug!("dotnet-detect v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command {
        Commands::Detect(detect_args) => handle_detect(detect_args, config, args.quiet),
    };

    std::process::exit(exit_code);
}
