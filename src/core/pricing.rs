use crate::domain::model::{PriceBreakdown, Priest, Service};
use crate::utils::error::{BookingError, Result};

pub const PLATFORM_FEE_PERCENT: u64 = 5;
pub const COUPON_CODE: &str = "FIRST10";
pub const COUPON_PERCENT: u64 = 10;

/// 百分比後四捨五入 (round half up)
pub fn percent_of(amount: u64, percent: u64) -> u64 {
    amount.saturating_mul(percent).saturating_add(50) / 100
}

/// 平台費只以服務費 (subtotal) 為基數，不含祭司費
pub fn compute_breakdown(service: &Service, priest: &Priest, discount: u64) -> PriceBreakdown {
    let subtotal = service.price;
    let officiant_fee = priest.price;
    let platform_fee = percent_of(subtotal, PLATFORM_FEE_PERCENT);
    let total = subtotal
        .saturating_add(officiant_fee)
        .saturating_add(platform_fee)
        .saturating_sub(discount);

    PriceBreakdown {
        subtotal,
        officiant_fee,
        platform_fee,
        discount,
        total,
    }
}

/// 優惠碼只能套用一次，也沒有移除的操作
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CouponState {
    applied: bool,
    discount: u64,
}

impl CouponState {
    pub fn is_applied(&self) -> bool {
        self.applied
    }

    pub fn discount(&self) -> u64 {
        self.discount
    }

    pub fn apply(&mut self, code: &str, running_total: u64) -> Result<u64> {
        if code.to_uppercase() != COUPON_CODE {
            return Err(BookingError::InvalidCouponError {
                code: code.to_string(),
            });
        }

        if self.applied {
            return Err(BookingError::AlreadyAppliedError);
        }

        self.discount = percent_of(running_total, COUPON_PERCENT);
        self.applied = true;
        tracing::debug!(
            "Coupon {} applied: discount {} on {}",
            COUPON_CODE,
            self.discount,
            running_total
        );
        Ok(self.discount)
    }
}
