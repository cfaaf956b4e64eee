use crate::adapters::navigation::HistoryNavigator;
use crate::adapters::notify::TracingNotifier;
use crate::config::app_config::SimulationConfig;
use crate::core::filter::{available_languages, filter_priests, FilterState};
use crate::core::pricing::compute_breakdown;
use crate::core::task::CancellableTask;
use crate::core::wizard::BookingWizard;
use crate::domain::model::{
    BookingConfirmation, BookingStatus, DetailsForm, PaymentOutcome, PaymentStatus,
    PriceBreakdown, Priest, Service, StepChange, WizardStep,
};
use crate::domain::ports::{Catalog, Destination, Navigator, Notice, Notifier, PaymentGateway};
use crate::utils::error::{BookingError, Result};
use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::sync::Arc;

pub struct BookingEngineBuilder<C: Catalog, G: PaymentGateway> {
    catalog: Arc<C>,
    gateway: Arc<G>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    simulation: SimulationConfig,
    today: Option<NaiveDate>,
}

impl<C: Catalog + 'static, G: PaymentGateway + 'static> BookingEngineBuilder<C, G> {
    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = navigator;
        self
    }

    pub fn simulation(mut self, simulation: SimulationConfig) -> Self {
        self.simulation = simulation;
        self
    }

    pub fn today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// 模擬讀取服務資料；找不到時通知並導回服務列表
    pub async fn open(self, service_id: &str) -> Result<BookingEngine<C, G>> {
        let catalog = self.catalog.clone();
        let id = service_id.to_string();
        let fetch = CancellableTask::spawn_after(
            "service fetch",
            self.simulation.fetch_delay(),
            async move { catalog.get_service(&id).cloned() },
        );

        let service = match fetch.join().await.and_then(|found| found) {
            Ok(service) => service,
            Err(e) => {
                tracing::warn!("❌ Cannot open booking for '{}': {}", service_id, e);
                self.notifier.error(&e);
                if matches!(e, BookingError::NotFoundError { .. }) {
                    self.navigator.leave(Destination::ServiceListing);
                }
                return Err(e);
            }
        };

        let today = self
            .today
            .unwrap_or_else(|| chrono::Local::now().date_naive());
        tracing::info!("📿 Booking opened for {} ({})", service.name, service.id);

        Ok(BookingEngine {
            wizard: BookingWizard::new(service.id.clone(), today),
            service,
            catalog: self.catalog,
            gateway: self.gateway,
            notifier: self.notifier,
            navigator: self.navigator,
            simulation: self.simulation,
            payment: None,
        })
    }
}

/// 預約流程控制器：持有 wizard 狀態，並把每個轉換回報給協作者
pub struct BookingEngine<C: Catalog, G: PaymentGateway> {
    service: Service,
    wizard: BookingWizard,
    catalog: Arc<C>,
    gateway: Arc<G>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    simulation: SimulationConfig,
    payment: Option<CancellableTask<PaymentOutcome>>,
}

impl<C: Catalog + 'static, G: PaymentGateway + 'static> BookingEngine<C, G> {
    pub fn builder(catalog: Arc<C>, gateway: Arc<G>) -> BookingEngineBuilder<C, G> {
        BookingEngineBuilder {
            catalog,
            gateway,
            notifier: Arc::new(TracingNotifier),
            navigator: Arc::new(HistoryNavigator::new()),
            simulation: SimulationConfig::default(),
            today: None,
        }
    }

    pub fn service(&self) -> &Service {
        &self.service
    }

    pub fn wizard(&self) -> &BookingWizard {
        &self.wizard
    }

    pub fn step(&self) -> WizardStep {
        self.wizard.step()
    }

    pub fn filters_mut(&mut self) -> &mut FilterState {
        self.wizard.filters_mut()
    }

    pub fn visible_priests(&self) -> Vec<&Priest> {
        filter_priests(self.catalog.list_priests(), self.wizard.filters())
    }

    pub fn available_languages(&self) -> BTreeSet<String> {
        available_languages(self.catalog.list_priests())
    }

    pub fn payment_in_flight(&self) -> bool {
        self.payment.is_some()
    }

    fn report<T>(&self, result: Result<T>) -> Result<T> {
        if let Err(e) = &result {
            tracing::warn!("⚠️ {} ({:?})", e, e.category());
            self.notifier.error(e);
        }
        result
    }

    fn announce(&self, change: Option<StepChange>) -> Option<StepChange> {
        if let Some(change) = change {
            self.navigator.step_changed(change.from, change.to);
        }
        change
    }

    pub fn submit_details(&mut self, form: DetailsForm) -> Result<StepChange> {
        let result = self.wizard.submit_details(form);
        let change = self.report(result)?;
        self.announce(Some(change));
        Ok(change)
    }

    pub fn select_priest(&mut self, priest_id: &str) -> Result<StepChange> {
        let result = if priest_id.trim().is_empty() {
            self.wizard.select_priest(priest_id)
        } else {
            self.catalog
                .get_priest(priest_id)
                .map(|_| ())
                .and_then(|_| self.wizard.select_priest(priest_id))
        };
        let change = self.report(result)?;
        self.announce(Some(change));
        Ok(change)
    }

    /// 往回導覽；離開付款頁時一併取消進行中的付款
    fn retreat(&mut self, change: Option<StepChange>) -> Option<StepChange> {
        if let Some(StepChange {
            from: WizardStep::Payment,
            ..
        }) = change
        {
            self.abandon();
        }
        self.announce(change)
    }

    pub fn back(&mut self) -> Option<StepChange> {
        let change = self.wizard.back();
        self.retreat(change)
    }

    pub fn history_back(&mut self) -> Option<StepChange> {
        let change = self.wizard.history_back();
        self.retreat(change)
    }

    pub fn jump_to(&mut self, number: u8) -> Option<StepChange> {
        let change = self.wizard.jump_to(number);
        self.retreat(change)
    }

    fn selected_priest(&self) -> Result<&Priest> {
        let priest_id = self.wizard.booking().priest_id.as_deref().ok_or_else(|| {
            BookingError::validation("priest", "Please select a priest to continue")
        })?;
        self.catalog.get_priest(priest_id)
    }

    pub fn price_breakdown(&self) -> Result<PriceBreakdown> {
        let priest = self.selected_priest()?;
        Ok(compute_breakdown(
            &self.service,
            priest,
            self.wizard.coupon().discount(),
        ))
    }

    pub fn apply_coupon(&mut self, code: &str) -> Result<u64> {
        let result = self.price_breakdown().and_then(|breakdown| {
            self.wizard
                .apply_coupon(code, breakdown.total_before_discount())
        });
        let discount = self.report(result)?;
        self.notifier.success(Notice::CouponApplied { discount });
        Ok(discount)
    }

    /// 非互動流程用：優惠碼失敗只記錄警告，不中斷預約
    pub fn try_coupon(&mut self, code: &str) -> Option<u64> {
        match self.apply_coupon(code) {
            Ok(discount) => Some(discount),
            Err(e) => {
                tracing::warn!("🏷️ Coupon '{}' skipped: {}", code, e.user_friendly_message());
                None
            }
        }
    }

    /// 開始付款；已有付款進行中則回傳 false 且不做任何事
    pub fn start_payment(&mut self) -> Result<bool> {
        if self.payment_in_flight() {
            tracing::warn!("⏳ Payment already in progress, ignoring duplicate submit");
            return Ok(false);
        }

        let prepared = if self.wizard.step() != WizardStep::Payment {
            Err(BookingError::InvalidTransition {
                step: self.wizard.step().to_string(),
                action: "pay",
            })
        } else {
            self.price_breakdown()
        };
        let breakdown = self.report(prepared)?;

        let gateway = self.gateway.clone();
        let booking = self.wizard.booking().clone();
        tracing::info!("💳 Processing payment of {}", breakdown.total);
        self.payment = Some(CancellableTask::spawn("payment", async move {
            gateway.charge(&booking, &breakdown).await
        }));
        Ok(true)
    }

    /// 等待付款結果；成功後再等確認延遲才進入 Complete
    pub async fn finish_payment(&mut self) -> Result<BookingConfirmation> {
        let result = self.settle_payment().await;
        self.report(result)
    }

    async fn settle_payment(&mut self) -> Result<BookingConfirmation> {
        let task = self.payment.take().ok_or(BookingError::InvalidTransition {
            step: self.wizard.step().to_string(),
            action: "finish a payment that was never started",
        })?;

        let outcome = task.join().await?;
        let reference = match outcome {
            PaymentOutcome::Success { reference } => reference,
            PaymentOutcome::Failure { reason } => {
                return Err(BookingError::PaymentFailure { reason });
            }
        };

        // 成功通知之前先確認仍停在付款頁
        if self.wizard.step() != WizardStep::Payment {
            return Err(BookingError::InvalidTransition {
                step: self.wizard.step().to_string(),
                action: "complete the booking",
            });
        }

        tracing::info!("✅ Payment succeeded, reference {}", reference);
        self.notifier.success(Notice::PaymentSucceeded {
            reference: reference.clone(),
        });

        let confirmation_delay =
            CancellableTask::spawn_after("confirmation", self.simulation.confirmation_delay(), async {});
        confirmation_delay.join().await?;

        let breakdown = self.price_breakdown()?;
        let priest_name = self.selected_priest()?.name.clone();
        let change = self.wizard.complete()?;
        self.announce(Some(change));

        let mut booking = self.wizard.booking().clone();
        booking.status = BookingStatus::Confirmed;
        booking.payment_status = PaymentStatus::Completed;
        booking.payment_id = Some(reference.clone());

        self.notifier.success(Notice::BookingCompleted {
            reference: reference.clone(),
        });
        self.navigator.leave(Destination::Home);

        Ok(BookingConfirmation {
            reference,
            service_name: self.service.name.clone(),
            priest_name,
            booking,
            breakdown,
        })
    }

    pub async fn pay(&mut self) -> Result<BookingConfirmation> {
        self.start_payment()?;
        self.finish_payment().await
    }

    /// 離開流程時取消尚未完成的付款
    pub fn abandon(&mut self) {
        if let Some(mut task) = self.payment.take() {
            tracing::info!("🛑 Booking abandoned, cancelling '{}'", task.name());
            task.cancel();
        }
    }
}
