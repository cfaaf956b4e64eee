use anyhow::Result;
use chrono::NaiveDate;
use homam_booking::adapters::navigation::HistoryEntry;
use homam_booking::config::SimulationConfig;
use homam_booking::domain::model::{
    Address, BookingStatus, DetailsForm, ModeDetails, PaymentStatus, TimeSlot, WizardStep,
};
use homam_booking::domain::ports::{Destination, Notice, Notifier};
use homam_booking::utils::error::ErrorCategory;
use homam_booking::{
    BookingEngine, BookingError, HistoryNavigator, SimulatedGateway, StaticCatalog,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
enum Recorded {
    Success(Notice),
    Error(ErrorCategory),
}

#[derive(Clone, Default)]
struct RecordingNotifier {
    events: Arc<Mutex<Vec<Recorded>>>,
}

impl RecordingNotifier {
    fn events(&self) -> Vec<Recorded> {
        self.events.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn success(&self, notice: Notice) {
        self.events.lock().unwrap().push(Recorded::Success(notice));
    }

    fn error(&self, error: &BookingError) {
        self.events
            .lock()
            .unwrap()
            .push(Recorded::Error(error.category()));
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
}

fn instant() -> SimulationConfig {
    SimulationConfig {
        fetch_delay_ms: 0,
        payment_delay_ms: 0,
        confirmation_delay_ms: 0,
    }
}

fn offline_form() -> DetailsForm {
    DetailsForm {
        delivery: ModeDetails::Offline {
            address: Address {
                line1: "221 Temple Road".into(),
                line2: "Flat 3".into(),
                city: "Bengaluru".into(),
                state: "Karnataka".into(),
                postal_code: "560001".into(),
                country: "India".into(),
            },
        },
        date: NaiveDate::from_ymd_opt(2026, 10, 28),
        time: Some("11:00 AM".parse().unwrap()),
        name: "Lakshmi Narayan".into(),
        email: "lakshmi@example.com".into(),
        phone: "+91 99000 12345".into(),
        special_requirements: None,
    }
}

struct Harness {
    engine: BookingEngine<StaticCatalog, SimulatedGateway>,
    notifier: RecordingNotifier,
    navigator: HistoryNavigator,
}

async fn open_with(gateway: SimulatedGateway, simulation: SimulationConfig) -> Result<Harness> {
    let notifier = RecordingNotifier::default();
    let navigator = HistoryNavigator::new();
    let engine = BookingEngine::builder(Arc::new(StaticCatalog::builtin()?), Arc::new(gateway))
        .simulation(simulation)
        .notifier(Arc::new(notifier.clone()))
        .navigator(Arc::new(navigator.clone()))
        .today(today())
        .open("mercury-homam")
        .await?;
    Ok(Harness {
        engine,
        notifier,
        navigator,
    })
}

async fn open() -> Result<Harness> {
    open_with(SimulatedGateway::new(Duration::ZERO), instant()).await
}

#[tokio::test]
async fn test_full_booking_with_coupon() -> Result<()> {
    let Harness {
        mut engine,
        notifier,
        navigator,
    } = open().await?;

    engine.submit_details(offline_form())?;
    engine.select_priest("priest-1")?;
    assert_eq!(engine.step(), WizardStep::Payment);

    let breakdown = engine.price_breakdown()?;
    assert_eq!(breakdown.total, 7205);

    assert_eq!(engine.apply_coupon("first10")?, 721);
    assert_eq!(engine.price_breakdown()?.total, 6484);

    let confirmation = engine.pay().await?;
    assert_eq!(engine.step(), WizardStep::Complete);
    assert_eq!(confirmation.reference.len(), 8);
    assert_eq!(confirmation.breakdown.total, 6484);
    assert_eq!(confirmation.priest_name, "Pandit Ramakrishna Sharma");
    assert_eq!(confirmation.booking.status, BookingStatus::Confirmed);
    assert_eq!(confirmation.booking.payment_status, PaymentStatus::Completed);
    assert_eq!(
        confirmation.booking.payment_id.as_deref(),
        Some(confirmation.reference.as_str())
    );

    assert_eq!(
        notifier.events(),
        vec![
            Recorded::Success(Notice::CouponApplied { discount: 721 }),
            Recorded::Success(Notice::PaymentSucceeded {
                reference: confirmation.reference.clone()
            }),
            Recorded::Success(Notice::BookingCompleted {
                reference: confirmation.reference.clone()
            }),
        ]
    );
    assert_eq!(
        navigator.entries(),
        vec![
            HistoryEntry::Push(WizardStep::OfficiantSelection),
            HistoryEntry::Push(WizardStep::Payment),
            HistoryEntry::Push(WizardStep::Complete),
            HistoryEntry::Left(Destination::Home),
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_going_back_preserves_entered_fields() -> Result<()> {
    let Harness {
        mut engine,
        navigator,
        ..
    } = open().await?;

    engine.submit_details(offline_form())?;
    engine.select_priest("priest-2")?;

    engine.back();
    engine.history_back();
    assert_eq!(engine.step(), WizardStep::Details);
    assert!(engine.history_back().is_none());

    let booking = engine.wizard().booking();
    let expected = offline_form();
    assert_eq!(booking.name, expected.name);
    assert_eq!(booking.email, expected.email);
    assert_eq!(booking.phone, expected.phone);
    assert_eq!(booking.date, expected.date);
    assert_eq!(booking.time, Some(TimeSlot::new(11)?));
    assert_eq!(booking.delivery, expected.delivery);
    assert_eq!(booking.priest_id.as_deref(), Some("priest-2"));

    assert_eq!(
        navigator.entries()[2..],
        [
            HistoryEntry::Rewind(WizardStep::OfficiantSelection),
            HistoryEntry::Rewind(WizardStep::Details),
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_missing_date_reports_validation_error() -> Result<()> {
    let Harness {
        mut engine,
        notifier,
        navigator,
    } = open().await?;

    let result = engine.submit_details(DetailsForm {
        date: None,
        ..offline_form()
    });

    assert!(matches!(result, Err(BookingError::ValidationError { .. })));
    assert_eq!(engine.step(), WizardStep::Details);
    assert!(engine.wizard().booking().name.is_empty());
    assert_eq!(notifier.events(), vec![Recorded::Error(ErrorCategory::Validation)]);
    assert!(navigator.entries().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_coupon_cannot_stack() -> Result<()> {
    let Harness {
        mut engine,
        notifier,
        ..
    } = open().await?;
    engine.submit_details(offline_form())?;
    engine.select_priest("priest-1")?;

    assert!(matches!(
        engine.apply_coupon("WELCOME"),
        Err(BookingError::InvalidCouponError { .. })
    ));
    engine.apply_coupon("FIRST10")?;
    assert!(matches!(
        engine.apply_coupon("FIRST10"),
        Err(BookingError::AlreadyAppliedError)
    ));
    assert_eq!(engine.price_breakdown()?.discount, 721);

    assert_eq!(
        notifier.events(),
        vec![
            Recorded::Error(ErrorCategory::Coupon),
            Recorded::Success(Notice::CouponApplied { discount: 721 }),
            Recorded::Error(ErrorCategory::Coupon),
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_declined_payment_stays_on_payment_step() -> Result<()> {
    let Harness {
        mut engine,
        notifier,
        ..
    } = open_with(
        SimulatedGateway::new(Duration::ZERO).declining("insufficient funds"),
        instant(),
    )
    .await?;
    engine.submit_details(offline_form())?;
    engine.select_priest("priest-3")?;

    let err = engine.pay().await.unwrap_err();
    assert!(matches!(err, BookingError::PaymentFailure { ref reason } if reason == "insufficient funds"));
    assert_eq!(engine.step(), WizardStep::Payment);
    assert!(!engine.payment_in_flight());
    assert_eq!(notifier.events(), vec![Recorded::Error(ErrorCategory::Payment)]);

    // 可以重新付款
    assert!(engine.start_payment()?);
    Ok(())
}

#[tokio::test]
async fn test_double_submit_is_ignored_while_in_flight() -> Result<()> {
    let simulation = SimulationConfig {
        payment_delay_ms: 50,
        ..instant()
    };
    let Harness { mut engine, .. } =
        open_with(SimulatedGateway::new(Duration::from_millis(50)), simulation).await?;
    engine.submit_details(offline_form())?;
    engine.select_priest("priest-1")?;

    assert!(engine.start_payment()?);
    assert!(engine.payment_in_flight());
    assert!(!engine.start_payment()?);

    let confirmation = engine.finish_payment().await?;
    assert_eq!(engine.step(), WizardStep::Complete);
    assert!(!confirmation.reference.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_abandon_cancels_pending_payment() -> Result<()> {
    let Harness {
        mut engine,
        notifier,
        navigator,
    } = open_with(SimulatedGateway::new(Duration::from_secs(30)), instant()).await?;
    engine.submit_details(offline_form())?;
    engine.select_priest("priest-1")?;

    assert!(engine.start_payment()?);
    engine.abandon();
    assert!(!engine.payment_in_flight());
    assert_eq!(engine.step(), WizardStep::Payment);
    assert!(notifier.events().is_empty());
    assert!(!navigator
        .entries()
        .contains(&HistoryEntry::Left(Destination::Home)));
    Ok(())
}

#[tokio::test]
async fn test_unknown_service_redirects_to_listing() -> Result<()> {
    let notifier = RecordingNotifier::default();
    let navigator = HistoryNavigator::new();

    let result = BookingEngine::builder(
        Arc::new(StaticCatalog::builtin()?),
        Arc::new(SimulatedGateway::new(Duration::ZERO)),
    )
    .simulation(instant())
    .notifier(Arc::new(notifier.clone()))
    .navigator(Arc::new(navigator.clone()))
    .open("saturn-homam")
    .await;

    assert!(matches!(result, Err(BookingError::NotFoundError { .. })));
    assert_eq!(notifier.events(), vec![Recorded::Error(ErrorCategory::NotFound)]);
    assert_eq!(
        navigator.entries(),
        vec![HistoryEntry::Left(Destination::ServiceListing)]
    );
    Ok(())
}

#[tokio::test]
async fn test_dropping_open_cancels_fetch() -> Result<()> {
    let navigator = HistoryNavigator::new();
    let simulation = SimulationConfig {
        fetch_delay_ms: 10_000,
        ..instant()
    };

    let opening = BookingEngine::builder(
        Arc::new(StaticCatalog::builtin()?),
        Arc::new(SimulatedGateway::new(Duration::ZERO)),
    )
    .simulation(simulation)
    .navigator(Arc::new(navigator.clone()))
    .open("saturn-homam");

    let timed_out = tokio::time::timeout(Duration::from_millis(20), opening).await;
    assert!(timed_out.is_err());
    assert!(navigator.entries().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_indicator_jump_back_from_payment() -> Result<()> {
    let Harness { mut engine, .. } = open().await?;
    engine.submit_details(offline_form())?;
    engine.select_priest("priest-1")?;

    assert!(engine.jump_to(3).is_none());
    let change = engine.jump_to(2).expect("step 2 is completed");
    assert_eq!(change.to, WizardStep::OfficiantSelection);
    assert!(engine.jump_to(3).is_none());

    engine.filters_mut().set_min_experience("25")?;
    let ids: Vec<&str> = engine
        .visible_priests()
        .iter()
        .map(|p| p.id.as_str())
        .collect();
    assert_eq!(ids, vec!["priest-1", "priest-2"]);
    Ok(())
}

#[tokio::test]
async fn test_leaving_payment_cancels_in_flight_charge() -> Result<()> {
    let simulation = SimulationConfig {
        payment_delay_ms: 50,
        ..instant()
    };
    let Harness {
        mut engine,
        notifier,
        navigator,
    } = open_with(SimulatedGateway::new(Duration::from_millis(50)), simulation).await?;
    engine.submit_details(offline_form())?;
    engine.select_priest("priest-1")?;

    assert!(engine.start_payment()?);
    let change = engine.back().expect("payment step has a previous step");
    assert_eq!(change.to, WizardStep::OfficiantSelection);
    assert!(!engine.payment_in_flight());

    // 被取消的付款不能再發出任何通知
    tokio::time::sleep(Duration::from_millis(120)).await;
    assert!(notifier.events().is_empty());

    assert!(matches!(
        engine.finish_payment().await,
        Err(BookingError::InvalidTransition { .. })
    ));
    assert_eq!(engine.step(), WizardStep::OfficiantSelection);
    assert_eq!(notifier.events(), vec![Recorded::Error(ErrorCategory::Lifecycle)]);

    engine.select_priest("priest-2")?;
    let confirmation = engine.pay().await?;
    assert_eq!(engine.step(), WizardStep::Complete);
    assert_eq!(confirmation.priest_name, "Acharya Vidyasagar");
    assert_eq!(
        navigator
            .entries()
            .iter()
            .filter(|e| **e == HistoryEntry::Left(Destination::Home))
            .count(),
        1
    );
    Ok(())
}

#[tokio::test]
async fn test_coupon_is_recomputed_after_changing_priest() -> Result<()> {
    let Harness { mut engine, .. } = open().await?;
    engine.submit_details(offline_form())?;
    engine.select_priest("priest-1")?;
    assert_eq!(engine.apply_coupon("FIRST10")?, 721);

    engine.back();
    engine.select_priest("priest-3")?;

    // 2100 + 4500 + 105
    let breakdown = engine.price_breakdown()?;
    assert_eq!(breakdown.discount, 0);
    assert_eq!(breakdown.total, 6705);

    assert_eq!(engine.apply_coupon("first10")?, 671);
    assert_eq!(engine.price_breakdown()?.total, 6034);
    Ok(())
}
