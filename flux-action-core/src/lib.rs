//! Core types and the action factory for flux-action
//!
//! This crate builds standardized actions for applications following a
//! Flux/Redux-style unidirectional data flow. An action is a plain record:
//!
//! ```text
//! { type, payload, error?: true, meta? }
//! ```
//!
//! # Core Concepts
//!
//! - **Value**: Dynamic argument, payload and meta values, including errors
//! - **ActionRecord**: The standardized action produced by a creator
//! - **ActionCreator**: Callable bound to one action type
//! - **IdentityPolicy**: What the default payload transform returns
//!
//! # Basic Example
//!
//! ```
//! use flux_action_core::prelude::*;
//! use serde_json::json;
//!
//! let log = create_action("LOG")
//!     .payload(|args| args[0].clone())
//!     .meta(|args| {
//!         Value::object([
//!             ("id", args[0].get("id").cloned().unwrap_or_default()),
//!             ("v", Value::from("0.3.0")),
//!         ])
//!     })
//!     .build();
//!
//! let action = log.create1(json!({"id": "1", "msg": "connection"}));
//! assert_eq!(
//!     action.to_json(),
//!     json!({
//!         "type": "LOG",
//!         "payload": {"id": "1", "msg": "connection"},
//!         "meta": {"id": "1", "v": "0.3.0"},
//!     })
//! );
//! ```
//!
//! # Errors as payloads
//!
//! Calling a creator with a single [`ErrorValue`] flags the record:
//!
//! ```
//! use flux_action_core::prelude::*;
//!
//! let fetch_failed = create_action("FETCH").build();
//! let err = "x".parse::<u8>().unwrap_err();
//! let action = fetch_failed.create1(Value::from_error(&err));
//! assert!(action.is_error());
//! ```

pub mod action;
pub mod config;
pub mod creator;
pub mod error;
mod parse;
pub mod testing;
pub mod value;

// Core trait exports
pub use action::{Action, ActionRecord, ActionSummary, ActionType};

// Factory exports
pub use creator::{
    create_action, create_action_configured, create_action_with, try_create_action,
    ActionCreator, ActionCreatorBuilder, TransformFn,
};

// Config exports
pub use config::{FactoryConfig, IdentityPolicy};

// Error exports
pub use error::{ConfigError, RecordError};

// Value exports
pub use value::{ErrorValue, Value};

// Testing exports
pub use testing::ActionAssertions;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::action::{Action, ActionRecord, ActionSummary, ActionType};
    pub use crate::config::{FactoryConfig, IdentityPolicy};
    pub use crate::creator::{
        create_action, create_action_configured, create_action_with, try_create_action,
        ActionCreator, ActionCreatorBuilder, TransformFn,
    };
    pub use crate::value::{ErrorValue, Value};
}
