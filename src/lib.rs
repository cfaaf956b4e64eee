pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use adapters::{
    catalog::StaticCatalog, navigation::HistoryNavigator, notify::TracingNotifier,
    payment::SimulatedGateway,
};
pub use config::{AppConfig, BookingRequest};
pub use crate::core::{engine::BookingEngine, wizard::BookingWizard};
pub use utils::error::{BookingError, Result};
