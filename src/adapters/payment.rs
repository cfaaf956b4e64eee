use crate::domain::model::{BookingDetails, PaymentOutcome, PriceBreakdown};
use crate::domain::ports::PaymentGateway;
use async_trait::async_trait;
use rand::distributions::Alphanumeric;
use rand::Rng;
use std::time::Duration;

pub const REFERENCE_LENGTH: usize = 8;

/// 不接真實金流，延遲後回傳結果
#[derive(Debug, Clone)]
pub struct SimulatedGateway {
    delay: Duration,
    decline_reason: Option<String>,
}

impl SimulatedGateway {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            decline_reason: None,
        }
    }

    pub fn declining(mut self, reason: impl Into<String>) -> Self {
        self.decline_reason = Some(reason.into());
        self
    }

    /// 僅供顯示，不保證唯一
    pub fn generate_reference() -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(REFERENCE_LENGTH)
            .map(char::from)
            .collect::<String>()
            .to_uppercase()
    }
}

#[async_trait]
impl PaymentGateway for SimulatedGateway {
    async fn charge(&self, booking: &BookingDetails, breakdown: &PriceBreakdown) -> PaymentOutcome {
        tracing::debug!(
            "Simulating charge of {} for service {} ({:?})",
            breakdown.total,
            booking.service_id,
            self.delay
        );
        tokio::time::sleep(self.delay).await;

        match &self.decline_reason {
            Some(reason) => PaymentOutcome::Failure {
                reason: reason.clone(),
            },
            None => PaymentOutcome::Success {
                reference: Self::generate_reference(),
            },
        }
    }
}
