//! Error types for record parsing and configuration loading
//!
//! Transform failures are not listed here: an action creator returns whatever
//! error its transform produced, unchanged.

/// Errors from reading an [`ActionRecord`](crate::ActionRecord) back from JSON.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("Action record must be a JSON object")]
    NotAnObject,
    #[error("Action record has no `type` key")]
    MissingType,
    #[error("Action `type` must be a string")]
    InvalidType,
    #[error("Action record has no `payload` key")]
    MissingPayload,
    #[error("Action `error` must be `true` when present")]
    InvalidErrorFlag,
    #[error("Unexpected key in action record: {0}")]
    UnexpectedKey(String),
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors from loading a [`FactoryConfig`](crate::FactoryConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid factory config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_error_display() {
        assert_eq!(
            RecordError::NotAnObject.to_string(),
            "Action record must be a JSON object"
        );
        assert_eq!(
            RecordError::UnexpectedKey("extra".to_string()).to_string(),
            "Unexpected key in action record: extra"
        );
        assert_eq!(
            RecordError::MissingPayload.to_string(),
            "Action record has no `payload` key"
        );
        assert_eq!(
            RecordError::InvalidErrorFlag.to_string(),
            "Action `error` must be `true` when present"
        );
    }

    #[test]
    fn test_record_error_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: RecordError = json_err.into();
        assert!(matches!(err, RecordError::Json(_)));
        assert!(err.to_string().starts_with("Invalid JSON: "));
    }

    #[test]
    fn test_config_error_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("[").unwrap_err();
        let err: ConfigError = json_err.into();
        assert!(err.to_string().starts_with("Invalid factory config: "));
    }
}
