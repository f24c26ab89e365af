//! Action records and the traits that describe them

use std::fmt::{self, Debug};
use std::sync::Arc;

use serde::{Serialize, Serializer};

use crate::value::Value;

/// Marker trait for actions that can be handed to a dispatcher
///
/// Actions represent intents to change state. They should be:
/// - Clone: Actions may be logged, replayed, or sent to multiple handlers
/// - Debug: For debugging and logging
/// - Send + 'static: For async dispatch across threads
pub trait Action: Clone + Debug + Send + 'static {
    /// Get the action name for logging and filtering
    fn name(&self) -> &str;
}

/// Compact one-line rendering of an action for log output
pub trait ActionSummary: Action {
    /// Defaults to the `Debug` representation
    fn summary(&self) -> String {
        format!("{:?}", self)
    }
}

/// The label identifying an action kind
///
/// Labels are always strings. Symbol-like identifiers are expressed as
/// string constants (`const FETCH: &str = "FETCH";`); two labels are the same
/// action kind when their text is equal.
///
/// Cloning is cheap: every record built by one creator shares the same
/// allocation.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ActionType(Arc<str>);

impl ActionType {
    pub fn new(label: impl AsRef<str>) -> Self {
        Self(Arc::from(label.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Debug for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Debug::fmt(&*self.0, f)
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ActionType {
    fn from(label: &str) -> Self {
        Self(Arc::from(label))
    }
}

impl From<String> for ActionType {
    fn from(label: String) -> Self {
        Self(Arc::from(label))
    }
}

impl From<&ActionType> for ActionType {
    fn from(label: &ActionType) -> Self {
        label.clone()
    }
}

impl PartialEq<str> for ActionType {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for ActionType {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl Serialize for ActionType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// A standardized action: `{ type, payload, error?, meta? }`
///
/// Built by [`ActionCreator`](crate::creator::ActionCreator) or parsed with
/// [`ActionRecord::from_json`]. The fields are private so that the shape
/// invariants hold: `payload` is always present, `error` only ever reads as
/// `true` when set, and `meta` exists only for creators with a meta transform.
///
/// # Example
/// ```
/// use flux_action_core::{create_action, Value};
///
/// let send_number = create_action("SEND_NUMBER").build();
/// let action = send_number.create1(1);
///
/// assert_eq!(action.action_type(), "SEND_NUMBER");
/// assert_eq!(action.payload(), &Value::from(1));
/// assert!(!action.is_error());
/// assert!(action.meta().is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ActionRecord {
    action_type: ActionType,
    payload: Value,
    error: bool,
    meta: Option<Value>,
}

impl ActionRecord {
    pub(crate) fn new(action_type: ActionType, payload: Value) -> Self {
        Self {
            action_type,
            payload,
            error: false,
            meta: None,
        }
    }

    pub(crate) fn flag_error(&mut self) {
        self.error = true;
    }

    pub(crate) fn set_meta(&mut self, meta: Value) {
        self.meta = Some(meta);
    }

    pub fn action_type(&self) -> &ActionType {
        &self.action_type
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }

    /// Whether the record carries `error: true`
    pub fn is_error(&self) -> bool {
        self.error
    }

    pub fn meta(&self) -> Option<&Value> {
        self.meta.as_ref()
    }

    pub fn has_meta(&self) -> bool {
        self.meta.is_some()
    }

    /// Take the payload and meta out of the record
    pub fn into_parts(self) -> (ActionType, Value, Option<Value>) {
        (self.action_type, self.payload, self.meta)
    }

    /// Render as a plain JSON object with only the keys that are present
    ///
    /// `Serialize` writes this same object.
    pub fn to_json(&self) -> serde_json::Value {
        let mut obj = serde_json::Map::new();
        obj.insert("type".into(), self.action_type.as_str().into());
        obj.insert("payload".into(), self.payload.to_json());
        if self.error {
            obj.insert("error".into(), true.into());
        }
        if let Some(meta) = &self.meta {
            obj.insert("meta".into(), meta.to_json());
        }
        serde_json::Value::Object(obj)
    }
}

impl Serialize for ActionRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl Action for ActionRecord {
    fn name(&self) -> &str {
        self.action_type.as_str()
    }
}

impl ActionSummary for ActionRecord {
    /// `TYPE payload` with `!` after the type for error records and the meta
    /// value appended in brackets
    fn summary(&self) -> String {
        let mut out = String::from(self.action_type.as_str());
        if self.error {
            out.push('!');
        }
        out.push(' ');
        out.push_str(&self.payload.to_string());
        if let Some(meta) = &self.meta {
            out.push_str(&format!(" [{}]", meta));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ErrorValue;
    use serde_json::json;

    #[test]
    fn test_action_type_shares_allocation() {
        let a = ActionType::from("LOG");
        let b = a.clone();
        assert!(Arc::ptr_eq(&a.0, &b.0));
        assert_eq!(a, "LOG");
        assert_eq!(format!("{:?}", a), "\"LOG\"");
    }

    #[test]
    fn test_action_type_compares_by_text() {
        const FETCH: &str = "FETCH";
        let from_const = ActionType::from(FETCH);
        let from_owned = ActionType::from(String::from("FETCH"));

        assert_eq!(from_const, from_owned);
        assert!(!Arc::ptr_eq(&from_const.0, &from_owned.0));
        assert_eq!(serde_json::to_value(&from_const).unwrap(), "FETCH");
    }

    #[test]
    fn test_serialize_minimal() {
        let record = ActionRecord::new("TYPE".into(), Value::from(1));
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({"type": "TYPE", "payload": 1})
        );
        assert_eq!(record.to_json(), json!({"type": "TYPE", "payload": 1}));
    }

    #[test]
    fn test_serialize_error_and_meta() {
        let mut record = ActionRecord::new("TYPE".into(), ErrorValue::new("bad").into());
        record.flag_error();
        record.set_meta(Value::from("m"));

        let expected = json!({
            "type": "TYPE",
            "payload": {"$error": {"name": "Error", "message": "bad"}},
            "error": true,
            "meta": "m",
        });
        assert_eq!(serde_json::to_value(&record).unwrap(), expected);
        assert_eq!(record.to_json(), expected);
    }

    #[test]
    fn test_null_payload_is_kept() {
        let record = ActionRecord::new("TYPE".into(), Value::Null);
        assert_eq!(record.to_json(), json!({"type": "TYPE", "payload": null}));
    }

    #[test]
    fn test_name_and_summary() {
        let mut record = ActionRecord::new("LOG".into(), Value::from(json!({"id": "1"})));
        assert_eq!(record.name(), "LOG");
        assert_eq!(record.summary(), r#"LOG {"id":"1"}"#);

        record.set_meta(Value::from("v"));
        assert_eq!(record.summary(), r#"LOG {"id":"1"} ["v"]"#);

        let mut failed = ActionRecord::new("LOG".into(), ErrorValue::new("boom").into());
        failed.flag_error();
        assert_eq!(failed.summary(), "LOG! Error: boom");
    }
}
