use crate::utils::error::{BookingError, Result};
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: String,
    pub name: String,
    pub short_description: String,
    pub description: String,
    pub benefits: Vec<String>,
    pub purpose: String,
    pub when_performed: String,
    pub price: u64,
    pub duration: String,
    pub images: ServiceImages,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub performed_by: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceImages {
    pub main: String,
    #[serde(default)]
    pub gallery: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Priest {
    pub id: String,
    pub name: String,
    pub image: String,
    pub rating: f32,
    pub languages: Vec<String>,
    pub experience: u32,
    pub specializations: Vec<String>,
    pub price: u64,
    pub availability: Vec<Weekday>,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

impl Priest {
    pub fn speaks(&self, language: &str) -> bool {
        self.languages.iter().any(|l| l == language)
    }

    /// 只做資訊提示，不會擋住選擇
    pub fn is_available_on(&self, date: NaiveDate) -> bool {
        self.availability.contains(&date.weekday())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub user_name: String,
    pub rating: f32,
    pub comment: String,
    pub date: NaiveDate,
}

/// 每小時一個時段，07:00 AM 到 07:00 PM
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeSlot {
    hour: u8,
}

impl TimeSlot {
    pub const FIRST_HOUR: u8 = 7;
    pub const LAST_HOUR: u8 = 19;

    pub fn new(hour: u8) -> Result<Self> {
        if !(Self::FIRST_HOUR..=Self::LAST_HOUR).contains(&hour) {
            return Err(BookingError::validation(
                "time",
                format!("no time slot starts at hour {}", hour),
            ));
        }
        Ok(Self { hour })
    }

    pub fn all() -> impl Iterator<Item = TimeSlot> {
        (Self::FIRST_HOUR..=Self::LAST_HOUR).map(|hour| TimeSlot { hour })
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (display_hour, suffix) = match self.hour {
            0 => (12, "AM"),
            h @ 1..=11 => (h, "AM"),
            12 => (12, "PM"),
            h => (h - 12, "PM"),
        };
        write!(f, "{:02}:00 {}", display_hour, suffix)
    }
}

impl FromStr for TimeSlot {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        TimeSlot::all()
            .find(|slot| slot.to_string().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| BookingError::validation("time", format!("unknown time slot '{}'", s)))
    }
}

impl TryFrom<String> for TimeSlot {
    type Error = BookingError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<TimeSlot> for String {
    fn from(slot: TimeSlot) -> Self {
        slot.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryMode {
    Online,
    Offline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MeetingPlatform {
    Zoom,
    GoogleMeet,
    Other,
}

impl fmt::Display for MeetingPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeetingPlatform::Zoom => write!(f, "Zoom"),
            MeetingPlatform::GoogleMeet => write!(f, "Google Meet"),
            MeetingPlatform::Other => write!(f, "Online Platform"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    pub line1: String,
    pub line2: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

/// 線上儀式帶會議偏好，到府儀式帶地址
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum ModeDetails {
    Online {
        #[serde(default)]
        platform: Option<MeetingPlatform>,
        #[serde(default)]
        language: Option<String>,
    },
    Offline {
        #[serde(default)]
        address: Address,
    },
}

impl ModeDetails {
    pub fn mode(&self) -> DeliveryMode {
        match self {
            ModeDetails::Online { .. } => DeliveryMode::Online,
            ModeDetails::Offline { .. } => DeliveryMode::Offline,
        }
    }
}

impl Default for ModeDetails {
    fn default() -> Self {
        ModeDetails::Offline {
            address: Address::default(),
        }
    }
}

/// Step 1 表單送出的內容
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetailsForm {
    #[serde(default)]
    pub delivery: ModeDetails,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub time: Option<TimeSlot>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub special_requirements: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Completed,
    Failed,
    Refunded,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingDetails {
    pub service_id: String,
    pub delivery: ModeDetails,
    pub date: Option<NaiveDate>,
    pub time: Option<TimeSlot>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub special_requirements: Option<String>,
    pub priest_id: Option<String>,
    pub status: BookingStatus,
    pub payment_status: PaymentStatus,
    pub payment_id: Option<String>,
}

impl BookingDetails {
    pub fn for_service(service_id: impl Into<String>) -> Self {
        Self {
            service_id: service_id.into(),
            delivery: ModeDetails::default(),
            date: None,
            time: None,
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            special_requirements: None,
            priest_id: None,
            status: BookingStatus::default(),
            payment_status: PaymentStatus::default(),
            payment_id: None,
        }
    }

    /// 合併已驗證的表單；service_id 與 priest_id 保留不動
    pub(crate) fn merge_form(&mut self, form: DetailsForm, date: NaiveDate, time: TimeSlot) {
        self.delivery = form.delivery;
        self.date = Some(date);
        self.time = Some(time);
        self.name = form.name;
        self.email = form.email;
        self.phone = form.phone;
        self.special_requirements = form
            .special_requirements
            .filter(|text| !text.trim().is_empty());
    }
}

/// 衍生值，不存檔
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    pub subtotal: u64,
    pub officiant_fee: u64,
    pub platform_fee: u64,
    pub discount: u64,
    pub total: u64,
}

impl PriceBreakdown {
    pub fn total_before_discount(&self) -> u64 {
        self.subtotal + self.officiant_fee + self.platform_fee
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    Success { reference: String },
    Failure { reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingConfirmation {
    pub reference: String,
    pub service_name: String,
    pub priest_name: String,
    pub booking: BookingDetails,
    pub breakdown: PriceBreakdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum WizardStep {
    Details,
    OfficiantSelection,
    Payment,
    Complete,
}

impl WizardStep {
    pub const INDICATED: [WizardStep; 3] = [
        WizardStep::Details,
        WizardStep::OfficiantSelection,
        WizardStep::Payment,
    ];

    pub fn number(&self) -> u8 {
        match self {
            WizardStep::Details => 1,
            WizardStep::OfficiantSelection => 2,
            WizardStep::Payment => 3,
            WizardStep::Complete => 4,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(WizardStep::Details),
            2 => Some(WizardStep::OfficiantSelection),
            3 => Some(WizardStep::Payment),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::Details => "Booking Details",
            WizardStep::OfficiantSelection => "Select Priest",
            WizardStep::Payment => "Payment",
            WizardStep::Complete => "Complete",
        }
    }

    pub fn previous(&self) -> Option<Self> {
        match self {
            WizardStep::OfficiantSelection => Some(WizardStep::Details),
            WizardStep::Payment => Some(WizardStep::OfficiantSelection),
            WizardStep::Details | WizardStep::Complete => None,
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.number(), self.title())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepChange {
    pub from: WizardStep,
    pub to: WizardStep,
}
