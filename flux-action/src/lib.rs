//! flux-action: standardized action creators for Flux/Redux-style apps
//!
//! Bind an action type once, then turn call arguments into
//! `{ type, payload, error?, meta? }` records.
//!
//! # Example
//! ```
//! use flux_action::prelude::*;
//!
//! let send_number = create_action("SEND_NUMBER").build();
//! let action = send_number.create1(1);
//!
//! assert_eq!(action.action_type(), "SEND_NUMBER");
//! assert_eq!(action.payload(), &Value::from(1));
//! ```

// Re-export everything from core
pub use flux_action_core::*;

// Re-export test macros
pub use flux_action_core::{assert_action, assert_no_action, count_actions};

/// Prelude for convenient imports
pub mod prelude {
    // Traits
    pub use flux_action_core::{Action, ActionAssertions, ActionSummary};

    // Records and values
    pub use flux_action_core::{ActionRecord, ActionType, ErrorValue, Value};

    // Factory
    pub use flux_action_core::{
        create_action, create_action_configured, create_action_with, try_create_action,
        ActionCreator, ActionCreatorBuilder, TransformFn,
    };

    // Config and errors
    pub use flux_action_core::{ConfigError, FactoryConfig, IdentityPolicy, RecordError};
}
