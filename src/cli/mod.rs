pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{CliArgs, Commands, DetectArgs, OutputFormatArg};
pub use handlers::{handle_detect, load_config, EXIT_ERROR, EXIT_FAIL, EXIT_PASS};
pub use output::{OutputFormat, OutputFormatter};
