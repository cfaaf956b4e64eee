pub mod engine;
pub mod filter;
pub mod pricing;
pub mod task;
pub mod wizard;

pub use crate::domain::model::{BookingDetails, PriceBreakdown, Priest, Service, WizardStep};
pub use crate::domain::ports::{Catalog, Navigator, Notifier, PaymentGateway};
pub use crate::utils::error::Result;
