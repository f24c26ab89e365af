//! Reading action records back from JSON
//!
//! Records that were serialized for logging or sent over a channel can be
//! parsed again. Parsing is strict about shape: `type` and `payload` are
//! required, only `error` and `meta` may appear besides them, and `error` may
//! only be `true`. Error values are restored from their tagged
//! `{"$error": {...}}` form wherever they appear, so any record built by a
//! creator parses back equal to itself.

use crate::action::{ActionRecord, ActionType};
use crate::error::RecordError;
use crate::value::Value;

const RECORD_KEYS: &[&str] = &["type", "payload", "error", "meta"];

impl ActionRecord {
    /// Parse a record from a JSON value
    ///
    /// ```
    /// use flux_action_core::{ActionRecord, Value};
    /// use serde_json::json;
    ///
    /// let record = ActionRecord::from_json(json!({"type": "SEND_NUMBER", "payload": 1})).unwrap();
    /// assert_eq!(record.action_type(), "SEND_NUMBER");
    /// assert_eq!(record.payload(), &Value::from(1));
    ///
    /// assert!(ActionRecord::from_json(json!({"type": "X", "payload": 1, "extra": 1})).is_err());
    /// ```
    pub fn from_json(json: serde_json::Value) -> Result<Self, RecordError> {
        let serde_json::Value::Object(mut obj) = json else {
            return Err(RecordError::NotAnObject);
        };

        if let Some(key) = obj.keys().find(|k| !RECORD_KEYS.contains(&k.as_str())) {
            return Err(RecordError::UnexpectedKey(key.clone()));
        }

        let action_type = match obj.remove("type") {
            Some(serde_json::Value::String(label)) => ActionType::from(label),
            Some(_) => return Err(RecordError::InvalidType),
            None => return Err(RecordError::MissingType),
        };

        let error = match obj.remove("error") {
            None => false,
            Some(serde_json::Value::Bool(true)) => true,
            Some(_) => return Err(RecordError::InvalidErrorFlag),
        };

        let payload = obj
            .remove("payload")
            .map(Value::from_tagged_json)
            .ok_or(RecordError::MissingPayload)?;

        let mut record = ActionRecord::new(action_type, payload);
        if error {
            record.flag_error();
        }
        if let Some(meta) = obj.remove("meta") {
            record.set_meta(Value::from_tagged_json(meta));
        }
        Ok(record)
    }

    /// Parse a record from a JSON string
    pub fn from_json_str(s: &str) -> Result<Self, RecordError> {
        let json: serde_json::Value = serde_json::from_str(s)?;
        Self::from_json(json)
    }
}
