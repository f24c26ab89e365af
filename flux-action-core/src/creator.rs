//! The action factory
//!
//! [`create_action`] binds an action type and optional payload/meta transforms
//! into an [`ActionCreator`]. Each call on the creator runs one fixed pipeline:
//!
//! 1. `payload` = payload transform applied to the arguments, or the identity
//!    fallback when no transform was given
//! 2. the record starts as `{ type, payload }`
//! 3. exactly one argument that is an error value sets `error: true`
//! 4. `meta` = meta transform applied to the original arguments, if one was given
//!
//! # Example
//!
//! ```
//! use flux_action_core::{create_action, Value};
//!
//! let increment = create_action("INCREMENT")
//!     .payload(|args| Value::from(args[0].as_i64().unwrap_or(0) + 1))
//!     .build();
//!
//! let action = increment.create1(1);
//! assert_eq!(action.payload(), &Value::from(2));
//! ```
//!
//! # Fallible transforms
//!
//! Transforms that can fail return `Result<Value, E>`. The creator hands back
//! the transform's own error, untouched:
//!
//! ```
//! use flux_action_core::{try_create_action, Value};
//!
//! let parse = try_create_action("PARSE")
//!     .try_payload(|args| {
//!         let raw = args.first().and_then(Value::as_str).unwrap_or_default();
//!         raw.parse::<i64>().map(Value::from)
//!     })
//!     .build();
//!
//! assert_eq!(parse.call1("42").unwrap().payload(), &Value::from(42));
//! assert!(parse.call1("forty-two").is_err());
//! ```

use std::convert::Infallible;
use std::fmt;
use std::sync::Arc;

use crate::action::{ActionRecord, ActionType};
use crate::config::{FactoryConfig, IdentityPolicy};
use crate::value::Value;

/// Plain function pointer transform, handy for naming `None` in
/// [`create_action_with`]
pub type TransformFn = fn(&[Value]) -> Value;

type Transform<E> = Arc<dyn Fn(&[Value]) -> Result<Value, E> + Send + Sync>;

/// Start building an action creator with infallible transforms
pub fn create_action(action_type: impl Into<ActionType>) -> ActionCreatorBuilder {
    ActionCreatorBuilder::new(action_type.into())
}

/// Start building an action creator whose transforms may fail with `E`
pub fn try_create_action<E: 'static>(
    action_type: impl Into<ActionType>,
) -> ActionCreatorBuilder<E> {
    ActionCreatorBuilder::new(action_type.into())
}

/// Start building an action creator that uses `config`'s settings
pub fn create_action_configured(
    action_type: impl Into<ActionType>,
    config: &FactoryConfig,
) -> ActionCreatorBuilder {
    create_action(action_type).identity(config.identity)
}

/// Build an action creator from a type and two optional transforms
///
/// `None` plays the part of an omitted or non-callable transform: the payload
/// falls back to the identity function and `meta` is never produced.
///
/// ```
/// use flux_action_core::{create_action_with, TransformFn, Value};
///
/// let log = create_action_with(
///     "LOG",
///     None::<TransformFn>,
///     Some(|args: &[Value]| Value::object([("id", args[0].get("id").cloned())])),
/// );
/// let action = log.create1(Value::object([("id", "1")]));
/// assert_eq!(action.meta(), Some(&Value::object([("id", "1")])));
/// ```
pub fn create_action_with<P, M>(
    action_type: impl Into<ActionType>,
    payload: Option<P>,
    meta: Option<M>,
) -> ActionCreator
where
    P: Fn(&[Value]) -> Value + Send + Sync + 'static,
    M: Fn(&[Value]) -> Value + Send + Sync + 'static,
{
    let mut builder = create_action(action_type);
    if let Some(payload) = payload {
        builder = builder.payload(payload);
    }
    if let Some(meta) = meta {
        builder = builder.meta(meta);
    }
    builder.build()
}

/// Builder for [`ActionCreator`]
pub struct ActionCreatorBuilder<E = Infallible> {
    action_type: ActionType,
    payload: Option<Transform<E>>,
    meta: Option<Transform<E>>,
    identity: IdentityPolicy,
}

impl<E: 'static> ActionCreatorBuilder<E> {
    fn new(action_type: ActionType) -> Self {
        Self {
            action_type,
            payload: None,
            meta: None,
            identity: IdentityPolicy::default(),
        }
    }

    /// Set the payload transform
    pub fn payload<F>(mut self, f: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        self.payload = Some(Arc::new(move |args: &[Value]| Ok(f(args))));
        self
    }

    /// Set a payload transform that may fail
    pub fn try_payload<F>(mut self, f: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, E> + Send + Sync + 'static,
    {
        self.payload = Some(Arc::new(f));
        self
    }

    /// Set the meta transform
    pub fn meta<F>(mut self, f: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        self.meta = Some(Arc::new(move |args: &[Value]| Ok(f(args))));
        self
    }

    /// Set a meta transform that may fail
    pub fn try_meta<F>(mut self, f: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value, E> + Send + Sync + 'static,
    {
        self.meta = Some(Arc::new(f));
        self
    }

    /// Choose how the identity fallback handles zero or many arguments
    pub fn identity(mut self, policy: IdentityPolicy) -> Self {
        self.identity = policy;
        self
    }

    pub fn build(self) -> ActionCreator<E> {
        tracing::trace!(
            action_type = %self.action_type,
            payload_transform = self.payload.is_some(),
            meta_transform = self.meta.is_some(),
            identity = ?self.identity,
            "Action creator built"
        );
        ActionCreator {
            action_type: self.action_type,
            payload: self.payload,
            meta: self.meta,
            identity: self.identity,
        }
    }
}

impl<E> fmt::Debug for ActionCreatorBuilder<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionCreatorBuilder")
            .field("action_type", &self.action_type)
            .field("payload", &self.payload.is_some())
            .field("meta", &self.meta.is_some())
            .field("identity", &self.identity)
            .finish()
    }
}

/// A callable bound to one action type that turns arguments into records
///
/// Creators are immutable once built. They can be cloned cheaply and shared
/// across threads; calls never observe each other.
pub struct ActionCreator<E = Infallible> {
    action_type: ActionType,
    payload: Option<Transform<E>>,
    meta: Option<Transform<E>>,
    identity: IdentityPolicy,
}

impl<E> ActionCreator<E> {
    /// Build a record from the call arguments
    ///
    /// A failing transform's error is returned as is. When the payload
    /// transform fails the meta transform is not run.
    pub fn call(&self, args: &[Value]) -> Result<ActionRecord, E> {
        let payload = match &self.payload {
            Some(transform) => transform(args)?,
            None => self.identity.apply(args),
        };

        let mut record = ActionRecord::new(self.action_type.clone(), payload);

        if let [arg] = args {
            if arg.is_error() {
                record.flag_error();
            }
        }

        if let Some(transform) = &self.meta {
            record.set_meta(transform(args)?);
        }

        Ok(record)
    }

    /// [`call`](Self::call) with a single argument
    pub fn call1(&self, arg: impl Into<Value>) -> Result<ActionRecord, E> {
        self.call(&[arg.into()])
    }

    pub fn action_type(&self) -> &ActionType {
        &self.action_type
    }

    pub fn has_payload_transform(&self) -> bool {
        self.payload.is_some()
    }

    /// Whether records from this creator carry a `meta` key
    pub fn has_meta(&self) -> bool {
        self.meta.is_some()
    }

    pub fn identity_policy(&self) -> IdentityPolicy {
        self.identity
    }
}

impl ActionCreator<Infallible> {
    /// Build a record; infallible creators cannot fail
    pub fn create(&self, args: &[Value]) -> ActionRecord {
        match self.call(args) {
            Ok(record) => record,
            Err(never) => match never {},
        }
    }

    /// [`create`](Self::create) with a single argument
    pub fn create1(&self, arg: impl Into<Value>) -> ActionRecord {
        self.create(&[arg.into()])
    }

    /// Turn the creator into a plain closure
    pub fn into_fn(self) -> impl Fn(&[Value]) -> ActionRecord + Send + Sync + 'static {
        move |args: &[Value]| self.create(args)
    }
}

impl<E> Clone for ActionCreator<E> {
    fn clone(&self) -> Self {
        Self {
            action_type: self.action_type.clone(),
            payload: self.payload.clone(),
            meta: self.meta.clone(),
            identity: self.identity,
        }
    }
}

impl<E> fmt::Debug for ActionCreator<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionCreator")
            .field("action_type", &self.action_type)
            .field("payload", &self.payload.is_some())
            .field("meta", &self.meta.is_some())
            .field("identity", &self.identity)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ErrorValue;

    fn increment(args: &[Value]) -> Value {
        Value::from(args[0].as_i64().unwrap_or_default() + 1)
    }

    #[test]
    fn test_identity_fallback() {
        let creator = create_action("TYPE").build();
        let record = creator.create1(1);

        assert_eq!(record.action_type(), "TYPE");
        assert_eq!(record.payload(), &Value::from(1));
        assert!(!record.is_error());
        assert!(!record.has_meta());
    }

    #[test]
    fn test_payload_transform() {
        let creator = create_action("INCREMENT").payload(increment).build();
        assert_eq!(creator.create1(1).payload(), &Value::from(2));
        assert!(creator.has_payload_transform());
    }

    #[test]
    fn test_error_flag_requires_single_error_argument() {
        let creator = create_action("TYPE").build();
        let err = Value::from(ErrorValue::new("Something bad..."));

        let record = creator.create(std::slice::from_ref(&err));
        assert!(record.is_error());
        assert_eq!(record.payload(), &err);

        // Two arguments never flag, even when the first is an error
        let record = creator.create(&[err.clone(), Value::from(1)]);
        assert!(!record.is_error());

        assert!(!creator.create(&[]).is_error());
    }

    #[test]
    fn test_error_flag_uses_argument_not_payload() {
        let creator = create_action("TYPE")
            .payload(|_| Value::from(ErrorValue::new("made up")))
            .build();
        assert!(!creator.create1("fine").is_error());

        let creator = create_action("TYPE").payload(|_| Value::Null).build();
        assert!(creator.create1(ErrorValue::new("bad")).is_error());
    }

    #[test]
    fn test_meta_uses_original_arguments() {
        let creator = create_action("TYPE")
            .payload(increment)
            .meta(|args| args[0].clone())
            .build();
        let record = creator.create1(1);

        assert_eq!(record.payload(), &Value::from(2));
        assert_eq!(record.meta(), Some(&Value::from(1)));
    }

    #[test]
    fn test_meta_may_be_null() {
        let creator = create_action("TYPE").meta(|_| Value::Null).build();
        let record = creator.create1(1);
        assert!(record.has_meta());
        assert_eq!(record.meta(), Some(&Value::Null));
    }

    #[test]
    fn test_identity_policy_on_creator() {
        let first = create_action("TYPE").build();
        assert_eq!(first.create(&[]).payload(), &Value::Null);
        assert_eq!(
            first.create(&[Value::from(1), Value::from(2)]).payload(),
            &Value::from(1)
        );

        let all = create_action("TYPE")
            .identity(IdentityPolicy::Arguments)
            .build();
        assert_eq!(
            all.create(&[Value::from(1), Value::from(2)]).payload(),
            &Value::from(vec![1, 2])
        );
        assert_eq!(all.identity_policy(), IdentityPolicy::Arguments);
    }

    #[test]
    fn test_identity_policy_ignored_with_transform() {
        let creator = create_action("TYPE")
            .identity(IdentityPolicy::Arguments)
            .payload(|args| Value::from(args.len()))
            .build();
        assert_eq!(
            creator.create(&[Value::from(1), Value::from(2)]).payload(),
            &Value::from(2)
        );
    }

    #[test]
    fn test_configured_creator() {
        let config = FactoryConfig::new(IdentityPolicy::Arguments);
        let creator = create_action_configured("TYPE", &config).build();
        assert_eq!(creator.create(&[]).payload(), &Value::Array(vec![]));
    }

    #[derive(Debug, PartialEq)]
    struct Boom(&'static str);

    #[test]
    fn test_payload_error_propagates_and_skips_meta() {
        let meta_calls = Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let counter = Arc::clone(&meta_calls);

        let creator = try_create_action("TYPE")
            .try_payload(|_| Err(Boom("payload")))
            .meta(move |_| {
                counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
                Value::Null
            })
            .build();

        assert_eq!(creator.call1(1), Err(Boom("payload")));
        assert_eq!(meta_calls.load(std::sync::atomic::Ordering::SeqCst), 0);
    }

    #[test]
    fn test_meta_error_propagates() {
        let creator = try_create_action("TYPE")
            .try_meta(|_| Err(Boom("meta")))
            .build();
        assert_eq!(creator.call1(1), Err(Boom("meta")));
    }

    #[test]
    fn test_create_action_with_none() {
        let creator = create_action_with("TYPE", None::<TransformFn>, None::<TransformFn>);
        assert!(!creator.has_payload_transform());
        assert!(!creator.has_meta());
        assert_eq!(creator.create1("v").payload(), &Value::from("v"));
    }

    #[test]
    fn test_into_fn() {
        let f = create_action("TYPE").payload(increment).build().into_fn();
        assert_eq!(f(&[Value::from(41)]).payload(), &Value::from(42));
    }

    #[test]
    fn test_debug_hides_closures() {
        let creator = create_action("TYPE").meta(|_| Value::Null).build();
        let dbg = format!("{:?}", creator);
        assert!(dbg.contains("ActionCreator"));
        assert!(dbg.contains("meta: true"));
    }
}
