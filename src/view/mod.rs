//! # View Module
//!
//! Interprets handler return values.
//!
//! Handlers return either text, which is written straight to the response,
//! or a [`ModelView`], which names a destination and the attributes to
//! publish into the request before a server-side forward. The forward itself
//! is delegated to a [`Forwarder`] supplied by the host;
//! [`TemplateForwarder`] renders minijinja templates from a views directory.

mod forward;
mod model_view;
mod resolver;

pub use forward::{ForwardRecord, Forwarder, RecordingForwarder, TemplateForwarder};
pub use model_view::ModelView;
pub use resolver::{is_supported_result, ResultResolver, ReturnValue, SUCCESS_NOTICE, VIEW_NOT_FOUND};
