use thiserror::Error;

use crate::codes::InfoCode;

#[derive(Error, Debug)]
pub enum HandleError {
    #[error("Unknown option: {0}")]
    UnknownOption(String),

    #[error("Unknown option code: {0}")]
    UnknownCode(u32),

    #[error("Invalid value for {option}: {reason}")]
    InvalidValue {
        option: &'static str,
        reason: String,
    },

    #[error("Config error: {0}")]
    Config(#[from] confique::Error),
}

impl HandleError {
    pub(crate) fn invalid(option: &'static str, reason: impl Into<String>) -> Self {
        HandleError::InvalidValue {
            option,
            reason: reason.into(),
        }
    }

    /// True for both unknown names and unknown numeric codes.
    pub fn is_unknown_option(&self) -> bool {
        matches!(
            self,
            HandleError::UnknownOption(_) | HandleError::UnknownCode(_)
        )
    }

    pub fn is_invalid_value(&self) -> bool {
        matches!(self, HandleError::InvalidValue { .. })
    }

    /// True when `name` is a derived, read-only attribute that was used as
    /// a write target.
    pub fn is_read_only(&self, name: &str) -> bool {
        matches!(self, HandleError::UnknownOption(n) if n == name)
            && InfoCode::from_attr(name).is_ok_and(InfoCode::is_derived)
    }
}

pub type Result<T> = std::result::Result<T, HandleError>;
