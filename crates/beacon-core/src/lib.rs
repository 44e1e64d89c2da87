pub mod config;
pub mod endpoint;
pub mod error;

pub use config::{ConfigFormat, MonitorConfig};
pub use endpoint::{domain_of, Endpoint, EndpointConfig};
pub use error::{ConfigError, ConfigResult};
