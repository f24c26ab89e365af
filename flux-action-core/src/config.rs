//! Factory configuration
//!
//! The only tunable is how the default payload transform treats argument
//! lists that are not exactly one value long. A config can be built in code
//! or loaded from JSON settings:
//!
//! ```
//! use flux_action_core::{FactoryConfig, IdentityPolicy};
//!
//! let config = FactoryConfig::from_json_str(r#"{ "identity": "arguments" }"#).unwrap();
//! assert_eq!(config.identity, IdentityPolicy::Arguments);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::value::Value;

/// Behavior of the identity fallback used when no payload transform is set
///
/// Both policies return a single argument unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentityPolicy {
    /// Return the first argument, or `Null` when called with none
    #[default]
    FirstArgument,
    /// Return the whole argument list as an array unless there is exactly one
    Arguments,
}

impl IdentityPolicy {
    /// Apply the identity fallback to call arguments
    pub fn apply(self, args: &[Value]) -> Value {
        match (self, args) {
            (Self::FirstArgument, _) => args.first().cloned().unwrap_or_default(),
            (Self::Arguments, [single]) => single.clone(),
            (Self::Arguments, _) => Value::Array(args.to_vec()),
        }
    }
}

/// Settings applied to every creator built through
/// [`create_action_configured`](crate::creator::create_action_configured)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FactoryConfig {
    pub identity: IdentityPolicy,
}

impl FactoryConfig {
    pub fn new(identity: IdentityPolicy) -> Self {
        Self { identity }
    }

    /// Parse a config from a JSON document; missing keys take defaults
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }
}
