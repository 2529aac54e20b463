use super::model::Model;
use super::scalar::{ScalarParam, ScalarValue};
use crate::session::Session;
use anyhow::{anyhow, bail};
use smallvec::SmallVec;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Number of handler arguments stored inline before spilling to the heap.
pub const MAX_INLINE_ARGS: usize = 8;

/// Value bound to one handler parameter slot.
pub enum BoundValue {
    Scalar(ScalarValue),
    Model(Box<dyn Any + Send>),
    Session(Session),
    /// No binding source applied to this slot
    Unresolved,
}

impl fmt::Debug for BoundValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundValue::Scalar(v) => f.debug_tuple("Scalar").field(v).finish(),
            BoundValue::Model(_) => f.write_str("Model(..)"),
            BoundValue::Session(s) => f.debug_tuple("Session").field(s).finish(),
            BoundValue::Unresolved => f.write_str("Unresolved"),
        }
    }
}

/// Bound handler arguments, in parameter declaration order.
///
/// Handlers read their slots by declared name through the typed accessors.
/// A slot of the wrong kind, or an unresolved one, yields an error that the
/// invoker reports as an invocation failure.
#[derive(Debug, Default)]
pub struct Arguments {
    slots: SmallVec<[(Arc<str>, BoundValue); MAX_INLINE_ARGS]>,
}

impl Arguments {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: Arc<str>, value: BoundValue) {
        self.slots.push((name, value));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Raw slot by declared name
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&BoundValue> {
        self.slots
            .iter()
            .find(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v)
    }

    fn value_mut(&mut self, name: &str) -> Option<&mut BoundValue> {
        self.slots
            .iter_mut()
            .find(|(k, _)| k.as_ref() == name)
            .map(|(_, v)| v)
    }

    /// Raw slot by position
    #[must_use]
    pub fn slot(&self, index: usize) -> Option<&BoundValue> {
        self.slots.get(index).map(|(_, v)| v)
    }

    #[must_use]
    pub fn is_resolved(&self, name: &str) -> bool {
        matches!(self.value(name), Some(v) if !matches!(v, BoundValue::Unresolved))
    }

    /// Read a scalar argument.
    ///
    /// ```rust,ignore
    /// let id: i64 = args.get("id")?;
    /// let note: Option<String> = args.get("note")?;
    /// ```
    pub fn get<T: ScalarParam>(&self, name: &str) -> anyhow::Result<T> {
        match self.value(name) {
            Some(BoundValue::Scalar(v)) => T::from_scalar(v.clone()).ok_or_else(|| {
                anyhow!(
                    "argument '{name}' holds a {} value, not {}",
                    v.scalar_type(),
                    std::any::type_name::<T>()
                )
            }),
            Some(other) => bail!("argument '{name}' is not a scalar ({other:?})"),
            None => bail!("no argument named '{name}'"),
        }
    }

    /// Move a structured argument out of its slot.
    pub fn take_model<M: Model>(&mut self, name: &str) -> anyhow::Result<M> {
        let slot = self
            .value_mut(name)
            .ok_or_else(|| anyhow!("no argument named '{name}'"))?;
        match std::mem::replace(slot, BoundValue::Unresolved) {
            BoundValue::Model(boxed) => boxed.downcast::<M>().map(|m| *m).map_err(|boxed| {
                *slot = BoundValue::Model(boxed);
                anyhow!(
                    "argument '{name}' is not a {}",
                    std::any::type_name::<M>()
                )
            }),
            other => {
                let message = format!("argument '{name}' is not a model ({other:?})");
                *slot = other;
                Err(anyhow!(message))
            }
        }
    }

    /// Borrow a structured argument in place.
    pub fn model<M: Model>(&self, name: &str) -> anyhow::Result<&M> {
        match self.value(name) {
            Some(BoundValue::Model(boxed)) => boxed.downcast_ref::<M>().ok_or_else(|| {
                anyhow!(
                    "argument '{name}' is not a {}",
                    std::any::type_name::<M>()
                )
            }),
            Some(other) => bail!("argument '{name}' is not a model ({other:?})"),
            None => bail!("no argument named '{name}'"),
        }
    }

    /// Read a session argument.
    pub fn session(&self, name: &str) -> anyhow::Result<Session> {
        match self.value(name) {
            Some(BoundValue::Session(session)) => Ok(session.clone()),
            Some(other) => bail!("argument '{name}' is not a session ({other:?})"),
            None => bail!("no argument named '{name}'"),
        }
    }
}
