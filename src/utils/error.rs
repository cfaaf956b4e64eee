use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookingError {
    #[error("Validation error on {field}: {message}")]
    ValidationError { field: String, message: String },

    #[error("{entity} not found: {id}")]
    NotFoundError { entity: &'static str, id: String },

    #[error("Invalid coupon code: {code}")]
    InvalidCouponError { code: String },

    #[error("Coupon already applied")]
    AlreadyAppliedError,

    #[error("Payment failed: {reason}")]
    PaymentFailure { reason: String },

    #[error("Cannot {action} while on step {step}")]
    InvalidTransition { step: String, action: &'static str },

    #[error("Task cancelled: {task}")]
    Cancelled { task: &'static str },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Coupon,
    Payment,
    Lifecycle,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl BookingError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFoundError {
            entity,
            id: id.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ValidationError { .. } => ErrorCategory::Validation,
            Self::NotFoundError { .. } => ErrorCategory::NotFound,
            Self::InvalidCouponError { .. } | Self::AlreadyAppliedError => ErrorCategory::Coupon,
            Self::PaymentFailure { .. } => ErrorCategory::Payment,
            Self::InvalidTransition { .. } | Self::Cancelled { .. } => ErrorCategory::Lifecycle,
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            Self::IoError(_) | Self::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Coupon | ErrorCategory::Lifecycle => ErrorSeverity::Low,
            ErrorCategory::Validation | ErrorCategory::Payment => ErrorSeverity::Medium,
            ErrorCategory::NotFound | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 使用者可修正後重試，或僅為提示性質
    pub fn is_recoverable(&self) -> bool {
        !matches!(self.category(), ErrorCategory::System)
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ValidationError { field, message } => format!("Please check {}: {}", field, message),
            Self::NotFoundError { entity, .. } => format!("The requested {} could not be found", entity),
            Self::InvalidCouponError { .. } => "Invalid coupon code".to_string(),
            Self::AlreadyAppliedError => "Coupon already applied".to_string(),
            Self::PaymentFailure { reason } => format!("Payment could not be completed: {}", reason),
            Self::InvalidTransition { .. } => "That action is not available at this step".to_string(),
            Self::Cancelled { .. } => "The operation was cancelled".to_string(),
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                format!("Configuration problem: {}", self)
            }
            Self::IoError(_) | Self::SerializationError(_) => {
                format!("Unexpected system error: {}", self)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Validation => "Correct the highlighted field and submit again",
            ErrorCategory::NotFound => "Return to the service listing and choose again",
            ErrorCategory::Coupon => "Continue without the coupon or check the code",
            ErrorCategory::Payment => "Retry the payment",
            ErrorCategory::Lifecycle => "Follow the booking steps in order",
            ErrorCategory::Configuration => "Check the configuration file and environment variables",
            ErrorCategory::System => "Check file permissions and try again",
        }
    }
}

pub type Result<T> = std::result::Result<T, BookingError>;
