// Adapters layer: concrete implementations of the domain ports (catalog, payment, notices, navigation).

pub mod catalog;
pub mod navigation;
pub mod notify;
pub mod payment;
