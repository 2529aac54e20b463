use crate::binding::{Arguments, ParamSpec};
use crate::session::Session;
use crate::view::{is_supported_result, ReturnValue};
use std::any::Any;
use std::sync::Arc;

/// A type whose handlers are reachable through the route table.
///
/// The controller is constructed once per request through
/// [`Controller::create`], which always receives a fresh [`Session`].
///
/// ```rust
/// use brrtmvc::binding::ParamSpec;
/// use brrtmvc::controller::{Controller, HandlerDef};
/// use brrtmvc::session::Session;
///
/// struct Greeting {
///     session: Session,
/// }
///
/// impl Controller for Greeting {
///     fn create(session: Session) -> anyhow::Result<Self> {
///         Ok(Self { session })
///     }
///
///     fn handlers() -> Vec<HandlerDef<Self>> {
///         vec![HandlerDef::get("/hello", "hello", |c: &mut Self, args| {
///             let name: String = args.get("name")?;
///             c.session.set("last", &name)?;
///             Ok(format!("Hello {name}"))
///         })
///         .param(ParamSpec::scalar::<String>("name"))]
///     }
/// }
/// ```
pub trait Controller: Sized + Send + 'static {
    /// Build the per-request instance
    fn create(session: Session) -> anyhow::Result<Self>;

    /// Handler declarations of this controller
    fn handlers() -> Vec<HandlerDef<Self>>;
}

type TypedHandler<C> = Arc<dyn Fn(&mut C, &mut Arguments) -> anyhow::Result<ReturnValue> + Send + Sync>;

/// Type-erased handler: constructs the controller, then calls the method.
pub(crate) type ErasedHandler =
    Arc<dyn Fn(Session, &mut Arguments) -> anyhow::Result<ReturnValue> + Send + Sync>;

/// Declaration of one controller method.
pub struct HandlerDef<C> {
    path: Option<String>,
    method: &'static str,
    params: Vec<ParamSpec>,
    return_type: &'static str,
    return_supported: bool,
    call: TypedHandler<C>,
}

impl<C: Controller> HandlerDef<C> {
    /// Handler without a path; it must be given one with [`HandlerDef::path`]
    /// before the controller is registered.
    pub fn new<R, F>(method: &'static str, handler: F) -> Self
    where
        R: Any + Send,
        F: Fn(&mut C, &mut Arguments) -> anyhow::Result<R> + Send + Sync + 'static,
    {
        Self {
            path: None,
            method,
            params: Vec::new(),
            return_type: std::any::type_name::<R>(),
            return_supported: is_supported_result::<R>(),
            call: Arc::new(move |controller, args| handler(controller, args).map(ReturnValue::new)),
        }
    }

    /// Handler mapped to `path`
    pub fn get<R, F>(path: &str, method: &'static str, handler: F) -> Self
    where
        R: Any + Send,
        F: Fn(&mut C, &mut Arguments) -> anyhow::Result<R> + Send + Sync + 'static,
    {
        Self::new(method, handler).path(path)
    }

    #[must_use]
    pub fn path(mut self, path: &str) -> Self {
        self.path = Some(path.to_owned());
        self
    }

    /// Append a parameter descriptor; order is declaration order.
    #[must_use]
    pub fn param(mut self, spec: ParamSpec) -> Self {
        self.params.push(spec);
        self
    }

    pub(crate) fn into_route_def(self) -> RouteDef {
        let call = self.call;
        RouteDef {
            path: self.path,
            controller: std::any::type_name::<C>(),
            method: self.method,
            params: self.params,
            return_type: self.return_type,
            return_supported: self.return_supported,
            call: Arc::new(move |session, args| {
                let mut controller = C::create(session).map_err(|e| {
                    e.context(format!(
                        "unable to construct controller {}",
                        std::any::type_name::<C>()
                    ))
                })?;
                call(&mut controller, args)
            }),
        }
    }
}

/// A handler declaration with its controller type erased.
pub(crate) struct RouteDef {
    pub(crate) path: Option<String>,
    pub(crate) controller: &'static str,
    pub(crate) method: &'static str,
    pub(crate) params: Vec<ParamSpec>,
    pub(crate) return_type: &'static str,
    pub(crate) return_supported: bool,
    pub(crate) call: ErasedHandler,
}

impl RouteDef {
    pub(crate) fn identifier(&self) -> String {
        format!("{}.{}", self.controller, self.method)
    }
}

/// A registered controller type.
///
/// Entries are plain data so they can be submitted to the link-time
/// collection used by [`ControllerSet::scan`].
#[derive(Clone, Copy)]
pub struct ControllerEntry {
    type_name: fn() -> &'static str,
    routes: fn() -> Vec<RouteDef>,
}

impl ControllerEntry {
    #[must_use]
    pub const fn of<C: Controller>() -> Self {
        Self {
            type_name: std::any::type_name::<C>,
            routes: route_defs::<C>,
        }
    }

    /// Fully qualified Rust path of the controller type
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        (self.type_name)()
    }

    pub(crate) fn route_defs(&self) -> Vec<RouteDef> {
        (self.routes)()
    }
}

impl std::fmt::Debug for ControllerEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControllerEntry")
            .field("type_name", &self.type_name())
            .finish()
    }
}

fn route_defs<C: Controller>() -> Vec<RouteDef> {
    C::handlers()
        .into_iter()
        .map(HandlerDef::into_route_def)
        .collect()
}

inventory::collect!(ControllerEntry);

/// Submit a controller to the link-time collection scanned by
/// [`ControllerSet::scan`].
///
/// ```rust,ignore
/// brrtmvc::register_controller!(crate::controllers::EmpController);
/// ```
#[macro_export]
macro_rules! register_controller {
    ($controller:ty) => {
        $crate::inventory::submit! {
            $crate::controller::ControllerEntry::of::<$controller>()
        }
    };
}

/// The controller types a route table is built from.
#[derive(Debug, Clone, Default)]
pub struct ControllerSet {
    entries: Vec<ControllerEntry>,
}

impl ControllerSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with<C: Controller>(mut self) -> Self {
        self.add::<C>();
        self
    }

    pub fn add<C: Controller>(&mut self) {
        self.entries.push(ControllerEntry::of::<C>());
    }

    /// Every submitted controller whose type lives under `base_package`.
    ///
    /// The package may be written with `::` or `.` separators
    /// (`app::controllers` or `app.controllers`).
    #[must_use]
    pub fn scan(base_package: &str) -> Self {
        let base = base_package.trim().replace('.', "::");
        let mut entries: Vec<ControllerEntry> = inventory::iter::<ControllerEntry>
            .into_iter()
            .filter(|entry| in_package(entry.type_name(), &base))
            .copied()
            .collect();
        entries.sort_by_key(ControllerEntry::type_name);
        Self { entries }
    }

    #[must_use]
    pub fn entries(&self) -> &[ControllerEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn in_package(type_name: &str, base: &str) -> bool {
    if base.is_empty() {
        return true;
    }
    type_name
        .strip_prefix(base)
        .is_some_and(|rest| rest.starts_with("::"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_package() {
        assert!(in_package("app::controllers::Emp", "app::controllers"));
        assert!(in_package("app::controllers::admin::Users", "app::controllers"));
        assert!(!in_package("app::controllers_old::Emp", "app::controllers"));
        assert!(!in_package("other::Emp", "app"));
        assert!(in_package("other::Emp", ""));
    }
}
