mod errors;
mod logging;
mod resolver;
mod root;

pub use errors::ConfigError;
pub use logging::LoggingConfig;
pub use resolver::{IpPreference, ResolverConfig, TsigCredentials};
pub use root::{CliOverrides, Config};
