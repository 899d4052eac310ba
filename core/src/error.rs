use thiserror::Error;

use crate::model::hour::Field;

/// Errors raised by the day/hour model and the statistics functions.
///
/// None of these are fatal: the caller decides whether to reprompt, reject the
/// input or report "no data".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LogError {
    #[error("{field} must be between 0 and {max}, got {value}")]
    Validation { field: Field, value: u8, max: u8 },

    #[error("hour {hour} is outside 0-23")]
    OutOfRange { hour: usize },

    #[error("invalid hour range {start}-{end}")]
    InvalidRange { start: usize, end: usize },

    #[error("no {field} data to analyse")]
    NoData { field: Field },
}

impl LogError {
    /// True for both a bad hour index and a bad range.
    pub fn is_out_of_range(&self) -> bool {
        matches!(self, LogError::OutOfRange { .. } | LogError::InvalidRange { .. })
    }
}

pub type LogResult<T> = Result<T, LogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_field_and_bounds() {
        let err = LogError::Validation { field: Field::Strength, value: 15, max: 14 };
        assert_eq!(err.to_string(), "strength must be between 0 and 14, got 15");

        let err = LogError::NoData { field: Field::Pain };
        assert_eq!(err.to_string(), "no pain data to analyse");
    }

    #[test]
    fn test_out_of_range_kind() {
        assert!(LogError::OutOfRange { hour: 24 }.is_out_of_range());
        assert!(LogError::InvalidRange { start: 8, end: 5 }.is_out_of_range());
        assert!(!LogError::NoData { field: Field::Program }.is_out_of_range());
    }
}
