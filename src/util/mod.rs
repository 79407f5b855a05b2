pub mod logging;

#[cfg(test)]
pub(crate) mod env_guard;

pub use logging::{init_logging, LoggingConfig};
