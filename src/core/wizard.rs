use crate::core::filter::FilterState;
use crate::core::pricing::CouponState;
use crate::domain::model::{BookingDetails, DetailsForm, StepChange, WizardStep};
use crate::utils::error::{BookingError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_not_before, validate_required_field};
use chrono::NaiveDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorState {
    Completed,
    Current,
    Upcoming,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepIndicator {
    pub step: WizardStep,
    pub state: IndicatorState,
}

impl StepIndicator {
    /// 只有已完成的步驟可以點回去
    pub fn is_navigable(&self) -> bool {
        self.state == IndicatorState::Completed
    }
}

/// 預約流程的狀態：目前步驟、累積的預約資料、篩選條件與優惠碼
#[derive(Debug, Clone)]
pub struct BookingWizard {
    step: WizardStep,
    booking: BookingDetails,
    filters: FilterState,
    coupon: CouponState,
    today: NaiveDate,
}

impl BookingWizard {
    pub fn new(service_id: impl Into<String>, today: NaiveDate) -> Self {
        Self {
            step: WizardStep::Details,
            booking: BookingDetails::for_service(service_id),
            filters: FilterState::default(),
            coupon: CouponState::default(),
            today,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn booking(&self) -> &BookingDetails {
        &self.booking
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn filters_mut(&mut self) -> &mut FilterState {
        &mut self.filters
    }

    pub fn coupon(&self) -> &CouponState {
        &self.coupon
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    fn expect_step(&self, expected: WizardStep, action: &'static str) -> Result<()> {
        if self.step != expected {
            return Err(BookingError::InvalidTransition {
                step: self.step.to_string(),
                action,
            });
        }
        Ok(())
    }

    fn move_to(&mut self, to: WizardStep) -> StepChange {
        let change = StepChange { from: self.step, to };
        if change.from == WizardStep::Payment && to < WizardStep::Payment {
            // 付款頁的優惠碼只對當下的金額有效
            self.coupon = CouponState::default();
        }
        self.step = to;
        tracing::debug!("Wizard step {} -> {}", change.from, change.to);
        change
    }

    /// Details -> OfficiantSelection；全部驗證通過才會寫入
    pub fn submit_details(&mut self, form: DetailsForm) -> Result<StepChange> {
        self.expect_step(WizardStep::Details, "submit booking details")?;

        let date = *validate_required_field("date", &form.date)
            .map_err(|_| BookingError::validation("date", "Please select a date for the ceremony"))?;
        validate_not_before("date", date, self.today)?;
        let time = *validate_required_field("time", &form.time)?;
        validate_non_empty_string("name", &form.name)?;
        validate_non_empty_string("email", &form.email)?;
        validate_non_empty_string("phone", &form.phone)?;

        self.booking.merge_form(form, date, time);
        Ok(self.move_to(WizardStep::OfficiantSelection))
    }

    /// OfficiantSelection -> Payment
    pub fn select_priest(&mut self, priest_id: &str) -> Result<StepChange> {
        self.expect_step(WizardStep::OfficiantSelection, "select a priest")?;
        if priest_id.trim().is_empty() {
            return Err(BookingError::validation(
                "priest",
                "Please select a priest to continue",
            ));
        }

        self.booking.priest_id = Some(priest_id.to_string());
        Ok(self.move_to(WizardStep::Payment))
    }

    pub fn apply_coupon(&mut self, code: &str, running_total: u64) -> Result<u64> {
        self.expect_step(WizardStep::Payment, "apply a coupon")?;
        self.coupon.apply(code, running_total)
    }

    /// Payment -> Complete，不可逆
    pub fn complete(&mut self) -> Result<StepChange> {
        self.expect_step(WizardStep::Payment, "complete the booking")?;
        Ok(self.move_to(WizardStep::Complete))
    }

    /// 往回一步，不重新驗證也不清資料
    pub fn back(&mut self) -> Option<StepChange> {
        let previous = self.step.previous()?;
        Some(self.move_to(previous))
    }

    /// 瀏覽器/系統的返回手勢，與 back() 相同
    pub fn history_back(&mut self) -> Option<StepChange> {
        self.back()
    }

    /// 步驟指示器：只允許跳回已完成的步驟
    pub fn jump_to(&mut self, number: u8) -> Option<StepChange> {
        let target = WizardStep::from_number(number)?;
        if self.step == WizardStep::Complete || target >= self.step {
            return None;
        }
        Some(self.move_to(target))
    }

    pub fn indicator(&self) -> Vec<StepIndicator> {
        WizardStep::INDICATED
            .iter()
            .map(|&step| StepIndicator {
                step,
                state: if step < self.step {
                    IndicatorState::Completed
                } else if step == self.step {
                    IndicatorState::Current
                } else {
                    IndicatorState::Upcoming
                },
            })
            .collect()
    }
}
