//! Test utilities for code that produces action records
//!
//! - [`ActionAssertions`]: lookups over a slice of records by type
//! - Assertion macros for verifying which actions were produced
//!
//! # Example
//!
//! ```
//! use flux_action_core::testing::ActionAssertions;
//! use flux_action_core::{assert_action, assert_no_action, count_actions, create_action};
//!
//! let send = create_action("SEND_NUMBER").build();
//! let records = vec![send.create1(1), send.create1(2)];
//!
//! assert_action!(records, "SEND_NUMBER");
//! assert_action!(records, "SEND_NUMBER", payload = 2);
//! assert_no_action!(records, "RESET");
//! assert_eq!(count_actions!(records, "SEND_NUMBER"), 2);
//! assert!(records.find_type("SEND_NUMBER").is_some());
//! ```

use crate::action::ActionRecord;

/// Lookup helpers over a collection of records
pub trait ActionAssertions {
    /// Check if any record has the given type
    fn has_type(&self, action_type: &str) -> bool;

    /// First record with the given type
    fn find_type(&self, action_type: &str) -> Option<&ActionRecord>;

    /// Number of records with the given type
    fn count_type(&self, action_type: &str) -> usize;

    /// Records flagged with `error: true`
    fn errors(&self) -> Vec<&ActionRecord>;
}

impl ActionAssertions for [ActionRecord] {
    fn has_type(&self, action_type: &str) -> bool {
        self.find_type(action_type).is_some()
    }

    fn find_type(&self, action_type: &str) -> Option<&ActionRecord> {
        self.iter().find(|r| r.action_type() == action_type)
    }

    fn count_type(&self, action_type: &str) -> usize {
        self.iter()
            .filter(|r| r.action_type() == action_type)
            .count()
    }

    fn errors(&self) -> Vec<&ActionRecord> {
        self.iter().filter(|r| r.is_error()).collect()
    }
}

/// Assert that a record of the given type (and optionally payload) exists.
///
/// # Example
///
/// ```ignore
/// assert_action!(records, "INCREMENT");
/// assert_action!(records, "INCREMENT", payload = 2);
/// ```
#[macro_export]
macro_rules! assert_action {
    ($records:expr, $action_type:expr) => {
        assert!(
            $records.iter().any(|r| r.action_type() == $action_type),
            "Expected action of type `{}`, but got: {:?}",
            $action_type,
            $records
                .iter()
                .map(|r| r.action_type().as_str())
                .collect::<Vec<_>>()
        );
    };
    ($records:expr, $action_type:expr, payload = $payload:expr) => {{
        let expected = $crate::Value::from($payload);
        assert!(
            $records
                .iter()
                .any(|r| r.action_type() == $action_type && r.payload() == &expected),
            "Expected action of type `{}` with payload {}, but got: {:?}",
            $action_type,
            expected,
            $records
        );
    }};
}

/// Assert that no record of the given type exists.
#[macro_export]
macro_rules! assert_no_action {
    ($records:expr, $action_type:expr) => {
        assert!(
            !$records.iter().any(|r| r.action_type() == $action_type),
            "Expected NO action of type `{}`, but found: {:?}",
            $action_type,
            $records
                .iter()
                .filter(|r| r.action_type() == $action_type)
                .collect::<Vec<_>>()
        );
    };
}

/// Count how many records have the given type.
#[macro_export]
macro_rules! count_actions {
    ($records:expr, $action_type:expr) => {
        $records
            .iter()
            .filter(|r| r.action_type() == $action_type)
            .count()
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creator::create_action;
    use crate::value::{ErrorValue, Value};

    fn sample() -> Vec<ActionRecord> {
        let send = create_action("SEND").build();
        let fail = create_action("FAIL").build();
        vec![
            send.create1(1),
            fail.create1(ErrorValue::new("bad")),
            send.create1(2),
        ]
    }

    #[test]
    fn test_lookups() {
        let records = sample();

        assert!(records.has_type("SEND"));
        assert!(!records.has_type("RESET"));
        assert_eq!(records.count_type("SEND"), 2);
        assert_eq!(
            records.find_type("SEND").map(|r| r.payload()),
            Some(&Value::from(1))
        );

        let errors = records.errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].action_type(), "FAIL");
    }

    #[test]
    fn test_assert_macros() {
        let records = sample();

        assert_action!(records, "SEND");
        assert_action!(records, "SEND", payload = 2);
        assert_no_action!(records, "RESET");
        assert_eq!(count_actions!(records, "FAIL"), 1);
    }

    #[test]
    #[should_panic(expected = "Expected action of type `RESET`")]
    fn test_assert_action_panics() {
        let records = sample();
        assert_action!(records, "RESET");
    }
}
