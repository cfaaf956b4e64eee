use crate::domain::model::DetailsForm;
use crate::utils::error::{BookingError, Result};
use crate::utils::validation::{validate_non_empty_string, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 非互動式預約：一次給齊三個步驟需要的資料
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingRequest {
    pub service_id: String,
    pub priest_id: String,
    pub coupon: Option<String>,
    pub details: DetailsForm,
}

impl BookingRequest {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| BookingError::ConfigError {
            message: format!("Booking request parsing error: {}", e),
        })
    }
}

impl Validate for BookingRequest {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("service_id", &self.service_id)?;
        validate_non_empty_string("priest_id", &self.priest_id)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{DeliveryMode, MeetingPlatform, ModeDetails};
    use chrono::NaiveDate;

    #[test]
    fn test_parse_offline_request() {
        let toml_content = r#"
service_id = "venus-homam"
priest_id = "priest-2"

[details]
date = "2026-11-06"
time = "10:00 AM"
name = "Meera Iyer"
email = "meera@example.com"
phone = "+91 90000 11111"

[details.delivery]
mode = "offline"

[details.delivery.address]
line1 = "4 Temple Street"
city = "Chennai"
country = "India"
"#;
        let request = BookingRequest::from_toml_str(toml_content).unwrap();
        assert!(request.validate().is_ok());
        assert!(request.coupon.is_none());
        assert_eq!(request.details.date, NaiveDate::from_ymd_opt(2026, 11, 6));
        assert_eq!(request.details.time.unwrap().hour(), 10);
        assert_eq!(request.details.delivery.mode(), DeliveryMode::Offline);
    }

    #[test]
    fn test_parse_online_request_with_coupon() {
        let toml_content = r#"
service_id = "mercury-homam"
priest_id = "priest-1"
coupon = "first10"

[details]
date = "2026-11-04"
time = "07:00 PM"
name = "Dev"
email = "dev@example.com"
phone = "555-0100"
special_requirements = "Please explain each step in English"

[details.delivery]
mode = "online"
platform = "google-meet"
language = "english"
"#;
        let request = BookingRequest::from_toml_str(toml_content).unwrap();
        assert_eq!(request.coupon.as_deref(), Some("first10"));
        assert_eq!(
            request.details.delivery,
            ModeDetails::Online {
                platform: Some(MeetingPlatform::GoogleMeet),
                language: Some("english".to_string()),
            }
        );
    }

    #[test]
    fn test_unknown_time_slot_is_rejected() {
        let toml_content = r#"
service_id = "mercury-homam"
priest_id = "priest-1"

[details]
time = "11:30 PM"
"#;
        assert!(BookingRequest::from_toml_str(toml_content).is_err());
    }

    #[test]
    fn test_blank_ids_fail_validation() {
        let toml_content = r#"
service_id = ""
priest_id = "priest-1"

[details]
"#;
        let request = BookingRequest::from_toml_str(toml_content).unwrap();
        assert!(request.validate().is_err());
    }
}
