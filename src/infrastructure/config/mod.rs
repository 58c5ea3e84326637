//! Configuration file and logging setup.

pub mod endpoint;
pub mod logging;
pub mod settings;

pub use endpoint::EndpointConfig;
pub use logging::LoggingConfig;
pub use settings::Config;
