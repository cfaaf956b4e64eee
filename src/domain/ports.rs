use crate::domain::model::{
    BookingDetails, PaymentOutcome, PriceBreakdown, Priest, Service, WizardStep,
};
use crate::utils::error::{BookingError, Result};
use async_trait::async_trait;

/// 唯讀的服務與祭司目錄
pub trait Catalog: Send + Sync {
    fn list_services(&self) -> &[Service];
    fn list_priests(&self) -> &[Priest];

    fn get_service(&self, id: &str) -> Result<&Service> {
        self.list_services()
            .iter()
            .find(|service| service.id == id)
            .ok_or_else(|| BookingError::not_found("service", id))
    }

    fn get_priest(&self, id: &str) -> Result<&Priest> {
        self.list_priests()
            .iter()
            .find(|priest| priest.id == id)
            .ok_or_else(|| BookingError::not_found("priest", id))
    }
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn charge(&self, booking: &BookingDetails, breakdown: &PriceBreakdown) -> PaymentOutcome;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    CouponApplied { discount: u64 },
    PaymentSucceeded { reference: String },
    BookingCompleted { reference: String },
}

/// 使用者訊息的出口；文字格式由實作決定
pub trait Notifier: Send + Sync {
    fn success(&self, notice: Notice);
    fn error(&self, error: &BookingError);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    ServiceListing,
    Home,
}

pub trait Navigator: Send + Sync {
    fn step_changed(&self, from: WizardStep, to: WizardStep);
    fn leave(&self, destination: Destination);
}
