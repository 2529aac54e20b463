use brrtmvc::binding::ParamSpec;
use brrtmvc::controller::{Controller, HandlerDef};
use brrtmvc::session::Session;

pub struct DeptController;

impl Controller for DeptController {
    fn create(_session: Session) -> anyhow::Result<Self> {
        Ok(Self)
    }

    fn handlers() -> Vec<HandlerDef<Self>> {
        vec![
            HandlerDef::get("/dept/list", "list", |_: &mut Self, _| {
                Ok("<ul><li>Sales</li><li>Engineering</li></ul>")
            }),
            HandlerDef::get("/dept/visits", "visits", |_: &mut Self, args| {
                let session = args.session("session")?;
                let visits: i64 = session.get_as("dept_visits")?.unwrap_or(0) + 1;
                session.set("dept_visits", &visits)?;
                Ok(format!("Visits this session: {visits}"))
            })
            .param(ParamSpec::session("session")),
        ]
    }
}

brrtmvc::register_controller!(DeptController);
