//! # Controller Module
//!
//! Controllers declare their routable methods as [`HandlerDef`]s: a path,
//! the method's name, its parameter descriptors, and one concrete callable.
//! A [`ControllerSet`] gathers the controller types a route table is built
//! from, either listed explicitly or collected by package with
//! [`ControllerSet::scan`] from controllers submitted through
//! [`register_controller!`](crate::register_controller).
//!
//! ```rust
//! use brrtmvc::controller::{Controller, ControllerSet, HandlerDef};
//! use brrtmvc::session::Session;
//! use brrtmvc::view::ModelView;
//!
//! #[derive(Default)]
//! struct Home;
//!
//! impl Controller for Home {
//!     fn create(_session: Session) -> anyhow::Result<Self> {
//!         Ok(Home)
//!     }
//!
//!     fn handlers() -> Vec<HandlerDef<Self>> {
//!         vec![HandlerDef::get("/", "index", |_: &mut Self, _| {
//!             Ok(ModelView::new("/index.html").with("title", "Home"))
//!         })]
//!     }
//! }
//!
//! let set = ControllerSet::new().with::<Home>();
//! assert_eq!(set.len(), 1);
//! ```

mod core;

pub use core::{Controller, ControllerEntry, ControllerSet, HandlerDef};
pub(crate) use core::{ErasedHandler, RouteDef};
