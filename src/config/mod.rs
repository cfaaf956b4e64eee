pub mod app_config;
pub mod booking_request;
#[cfg(feature = "cli")]
pub mod cli;

pub use app_config::{AppConfig, SimulationConfig};
pub use booking_request::BookingRequest;
#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command};
