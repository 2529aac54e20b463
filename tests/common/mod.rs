#![allow(dead_code)]

use brrtmvc::binding::ParamSpec;
use brrtmvc::controller::{Controller, ControllerSet, HandlerDef};
use brrtmvc::dispatcher::Dispatcher;
use brrtmvc::registry::ControllerRegistry;
use brrtmvc::router::Router;
use brrtmvc::session::Session;
use brrtmvc::view::{ModelView, RecordingForwarder};
use brrtmvc::Model;
use std::sync::Arc;

#[derive(Debug, Default, Model)]
pub struct User {
    pub name: String,
    pub age: i32,
    #[field(name = "mail")]
    pub email: Option<String>,
}

/// Controller exercising every binding kind and result type.
pub struct UserController {
    session: Session,
}

impl Controller for UserController {
    fn create(session: Session) -> anyhow::Result<Self> {
        Ok(Self { session })
    }

    fn handlers() -> Vec<HandlerDef<Self>> {
        vec![
            HandlerDef::get("/user/id", "by_id", |_: &mut Self, args| {
                let id: i32 = args.get("id")?;
                Ok(format!("id={id}"))
            })
            .param(ParamSpec::scalar::<i32>("id")),
            HandlerDef::get("/user/raw", "raw", |_: &mut Self, args| {
                let html: Option<String> = args.get("html")?;
                Ok(html.unwrap_or_default())
            })
            .param(ParamSpec::scalar::<Option<String>>("html")),
            HandlerDef::get("/user/age", "age", |_: &mut Self, args| {
                let user: User = args.take_model("user")?;
                Ok(format!("{}:{}", user.name, user.age))
            })
            .param(ParamSpec::model::<User>("user")),
            HandlerDef::get("/user/show", "show", |_: &mut Self, args| {
                let user = args.model::<User>("user")?;
                Ok(ModelView::new("/user.html")
                    .with("name", user.name.clone())
                    .with("age", user.age))
            })
            .param(ParamSpec::model::<User>("user")),
            HandlerDef::get("/user/none", "none", |_: &mut Self, _| {
                Ok(ModelView::without_url().with("ignored", true))
            }),
            HandlerDef::get("/user/login", "login", |c: &mut Self, args| {
                let name: String = args.get("name")?;
                c.session.set("user", &name)?;
                Ok("logged in")
            })
            .param(ParamSpec::scalar::<String>("name")),
            HandlerDef::get("/user/whoami", "whoami", |_: &mut Self, args| {
                let session = args.session("session")?;
                let user: Option<String> = session.get_as("user")?;
                Ok(user.unwrap_or_else(|| "anonymous".to_owned()))
            })
            .param(ParamSpec::session("session")),
            HandlerDef::get("/user/upload", "upload", |_: &mut Self, args| {
                let id: i32 = args.get("id")?;
                if args.is_resolved("file") {
                    anyhow::bail!("file slot unexpectedly resolved");
                }
                Ok(format!("upload {id}"))
            })
            .param(ParamSpec::unmatched::<Vec<u8>>("file"))
            .param(ParamSpec::scalar::<i32>("id")),
            HandlerDef::get("/user/fail", "fail", |_: &mut Self, _| -> anyhow::Result<String> {
                anyhow::bail!("database unavailable")
            }),
            HandlerDef::get("/user/panic", "explode", |_: &mut Self, _| -> anyhow::Result<String> {
                panic!("boom")
            }),
        ]
    }
}

/// Controller whose construction always fails.
pub struct BrokenController;

impl Controller for BrokenController {
    fn create(_session: Session) -> anyhow::Result<Self> {
        anyhow::bail!("dependency missing")
    }

    fn handlers() -> Vec<HandlerDef<Self>> {
        vec![HandlerDef::get("/broken", "index", |_: &mut Self, _| Ok("unreachable"))]
    }
}

pub fn controllers() -> ControllerSet {
    ControllerSet::new()
        .with::<UserController>()
        .with::<BrokenController>()
}

/// Dispatcher over [`controllers`] with a recording forwarder.
pub fn dispatcher() -> (Arc<RecordingForwarder>, Dispatcher) {
    let forwarder = Arc::new(RecordingForwarder::new());
    let table = ControllerRegistry::build(Some(&controllers())).unwrap();
    let dispatcher = Dispatcher::new(Router::new(table), forwarder.clone());
    (forwarder, dispatcher)
}
