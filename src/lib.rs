//! # brrtmvc
//!
//! **brrtmvc** is the dispatch core of a small MVC layer: controllers declare
//! handler methods mapped to paths, and every request is routed to exactly one
//! handler whose arguments are bound from the request and whose return value
//! is either written as text or forwarded to a view.
//!
//! ## Overview
//!
//! - **[`controller`]** - the [`Controller`](controller::Controller) trait,
//!   handler declarations and controller sets (explicit or package scan)
//! - **[`registry`]** - builds the path → route table and validates it
//! - **[`router`]** - exact-path lookup over the route table
//! - **[`binding`]** - scalar, model and session parameter binding
//! - **[`dispatcher`]** - the per-request pipeline and handler invocation
//! - **[`view`]** - result interpretation and server-side forwards
//! - **[`session`]** - the session capability handed to controllers
//! - **[`server`]** - request/response types, `http` adapter, `tiny_http` host
//! - **[`config`]**, **[`logging`]**, **[`cli`]** - application plumbing
//!
//! ## Request Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Host as server::MvcService
//!     participant D as Dispatcher
//!     participant R as Router
//!     participant B as ParameterBinder
//!     participant I as Invoker
//!     participant V as ResultResolver
//!
//!     Host->>D: handle(MvcRequest)
//!     D->>R: resolve(path)
//!     R-->>D: Route (or RouteNotFound → 404)
//!     D->>B: bind(route.params, request)
//!     B-->>D: Arguments (or ParameterBinding → 400)
//!     D->>I: invoke(route, Session, Arguments)
//!     I->>I: Controller::create(session), call handler
//!     I-->>D: ReturnValue (or Invocation → 500)
//!     D->>V: resolve(value, request)
//!     V-->>D: text body, 404 view, or forward
//!     D-->>Host: MvcResponse
//! ```
//!
//! ## Declaring a Controller
//!
//! ```rust
//! use brrtmvc::binding::ParamSpec;
//! use brrtmvc::controller::{Controller, ControllerSet, HandlerDef};
//! use brrtmvc::dispatcher::Dispatcher;
//! use brrtmvc::registry::ControllerRegistry;
//! use brrtmvc::router::Router;
//! use brrtmvc::server::MvcRequest;
//! use brrtmvc::session::Session;
//! use brrtmvc::view::{ModelView, RecordingForwarder};
//! use brrtmvc::Model;
//! use std::sync::Arc;
//!
//! #[derive(Debug, Default, Model)]
//! struct Employee {
//!     name: String,
//!     age: i32,
//! }
//!
//! struct EmpController {
//!     session: Session,
//! }
//!
//! impl Controller for EmpController {
//!     fn create(session: Session) -> anyhow::Result<Self> {
//!         Ok(Self { session })
//!     }
//!
//!     fn handlers() -> Vec<HandlerDef<Self>> {
//!         vec![
//!             HandlerDef::get("/emp/greet", "greet", |_: &mut Self, args| {
//!                 let name: String = args.get("name")?;
//!                 Ok(format!("Hello {name}"))
//!             })
//!             .param(ParamSpec::scalar::<String>("name")),
//!             HandlerDef::get("/emp/save", "save", |c: &mut Self, args| {
//!                 let emp: Employee = args.take_model("emp")?;
//!                 c.session.set("last_saved", &emp.name)?;
//!                 Ok(ModelView::new("/emp.html").with("age", emp.age))
//!             })
//!             .param(ParamSpec::model::<Employee>("emp")),
//!         ]
//!     }
//! }
//!
//! # fn main() -> Result<(), brrtmvc::MvcError> {
//! let set = ControllerSet::new().with::<EmpController>();
//! let router = Router::new(ControllerRegistry::build(Some(&set))?);
//! let dispatcher = Dispatcher::new(router, Arc::new(RecordingForwarder::new()));
//!
//! let mut request = MvcRequest::new("/emp/greet").with_param("name", "Ann");
//! let response = dispatcher.dispatch(&mut request)?;
//! assert_eq!(response.body, "Hello Ann\nMethod executed successfully.");
//!
//! let mut request = MvcRequest::new("/emp/save")
//!     .with_param("emp.name", "Bob")
//!     .with_param("emp.age", "41");
//! let response = dispatcher.dispatch(&mut request)?;
//! assert_eq!(response.forwarded_to.as_deref(), Some("/emp.html"));
//! assert_eq!(request.attribute("age"), Some(&serde_json::json!(41)));
//! # Ok(())
//! # }
//! ```
//!
//! ## Package Scan
//!
//! Controllers submitted with [`register_controller!`] are collected at link
//! time. [`Application::bootstrap`](app::Application::bootstrap) builds the
//! route table from every submitted controller under the configured
//! `base_package`:
//!
//! ```rust,ignore
//! brrtmvc::register_controller!(EmpController);
//!
//! let config = brrtmvc::config::AppConfig::load("config/app.yaml".as_ref())?;
//! let app = brrtmvc::app::Application::bootstrap(config)?;
//! app.serve()?.join().ok();
//! ```

extern crate self as brrtmvc;

pub mod app;
pub mod binding;
pub mod cli;
pub mod config;
pub mod controller;
pub mod dispatcher;
pub mod error;
pub mod ids;
pub mod logging;
pub mod mapping;
pub mod registry;
pub mod router;
pub mod server;
pub mod session;
pub mod view;

pub use anyhow;
pub use binding::Model;
pub use brrtmvc_macros::Model;
pub use error::{MvcError, Result};
#[doc(hidden)]
pub use inventory;
