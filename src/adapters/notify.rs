use crate::domain::ports::{Notice, Notifier};
use crate::utils::error::{BookingError, ErrorSeverity};

/// 把使用者訊息輸出到 tracing
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, notice: Notice) {
        match notice {
            Notice::CouponApplied { discount } => {
                tracing::info!("🎁 Coupon applied successfully! Discount: {}", discount)
            }
            Notice::PaymentSucceeded { reference } => {
                tracing::info!("💳 Payment successful! Booking reference: {}", reference)
            }
            Notice::BookingCompleted { reference } => tracing::info!(
                "🙏 Booking {} completed successfully! Check your email for details.",
                reference
            ),
        }
    }

    fn error(&self, error: &BookingError) {
        match error.severity() {
            ErrorSeverity::Low => tracing::warn!("{}", error.user_friendly_message()),
            _ => tracing::error!(
                "❌ {} 💡 {}",
                error.user_friendly_message(),
                error.recovery_suggestion()
            ),
        }
    }
}
