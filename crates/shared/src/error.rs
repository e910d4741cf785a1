use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidDate,
    Validation,
    NotAssignable,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum CalendarError {
    #[error("invalid date '{input}': expected YYYY-MM-DD")]
    InvalidDate { input: String },
    #[error("malformed states definition: {source}")]
    MalformedStates {
        #[source]
        source: serde_json::Error,
    },
    #[error("unknown property '{name}'")]
    UnknownProperty { name: String },
    #[error("property '{name}' is read-only")]
    ReadOnlyProperty { name: String },
    #[error("invalid value for property '{name}': {reason}")]
    InvalidPropertyValue { name: String, reason: String },
}

impl CalendarError {
    pub fn code(&self) -> ErrorCode {
        match self {
            CalendarError::InvalidDate { .. } => ErrorCode::InvalidDate,
            CalendarError::MalformedStates { .. } | CalendarError::InvalidPropertyValue { .. } => {
                ErrorCode::Validation
            }
            CalendarError::UnknownProperty { .. } | CalendarError::ReadOnlyProperty { .. } => {
                ErrorCode::NotAssignable
            }
        }
    }
}

impl From<CalendarError> for ApiError {
    fn from(value: CalendarError) -> Self {
        Self {
            code: value.code(),
            message: value.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_carries_code_and_message() {
        let err: ApiError = CalendarError::InvalidDate {
            input: "tomorrow".into(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::InvalidDate);
        assert!(err.message.contains("tomorrow"));

        let json = serde_json::to_value(&err).expect("serialize");
        assert_eq!(json["code"], "invalid_date");
    }

    #[test]
    fn read_only_property_is_not_assignable() {
        let err = CalendarError::ReadOnlyProperty {
            name: "$selecteddate".into(),
        };
        assert_eq!(err.code(), ErrorCode::NotAssignable);
    }
}
