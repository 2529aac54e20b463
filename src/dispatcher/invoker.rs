use crate::binding::Arguments;
use crate::error::{MvcError, Result};
use crate::mapping::Route;
use crate::session::Session;
use crate::view::ReturnValue;
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Instant;
use tracing::{debug, error};

/// Calls the handler of a resolved route.
#[derive(Debug, Default, Clone, Copy)]
pub struct Invoker;

impl Invoker {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Construct the route's controller with `session` and call its handler
    /// with `args`.
    ///
    /// # Errors
    ///
    /// [`MvcError::Invocation`] when construction or the handler fails,
    /// including when either panics.
    pub fn invoke(&self, route: &Route, session: Session, args: &mut Arguments) -> Result<ReturnValue> {
        let handler = route.mapping().handler_id();
        let start = Instant::now();

        let outcome = catch_unwind(AssertUnwindSafe(|| (route.handler())(session, args)));

        match outcome {
            Ok(Ok(value)) => {
                debug!(
                    handler = %handler,
                    return_type = value.type_name(),
                    execution_time_us = start.elapsed().as_micros(),
                    "Handler execution complete"
                );
                Ok(value)
            }
            Ok(Err(source)) => {
                error!(handler = %handler, error = %format!("{source:#}"), "Handler invocation failed");
                Err(MvcError::Invocation { handler, source })
            }
            Err(panic) => {
                let panic_message = panic_message(panic.as_ref());
                error!(
                    handler = %handler,
                    panic_message = %panic_message,
                    "Handler panicked"
                );
                Err(MvcError::Invocation {
                    handler,
                    source: anyhow::anyhow!("handler panicked: {panic_message}"),
                })
            }
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_owned()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        format!("{panic:?}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_message_variants() {
        let boxed: Box<dyn Any + Send> = Box::new("static");
        assert_eq!(panic_message(boxed.as_ref()), "static");
        let boxed: Box<dyn Any + Send> = Box::new(String::from("owned"));
        assert_eq!(panic_message(boxed.as_ref()), "owned");
    }
}
