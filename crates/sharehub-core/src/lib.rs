pub mod config;
pub mod error;

pub use config::{GatewayConfig, ShareHubConfig, SlackConfig};
pub use error::{CoreError, Result};
