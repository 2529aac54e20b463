use brrtmvc::binding::ParamSpec;
use brrtmvc::controller::{Controller, HandlerDef};
use brrtmvc::session::Session;
use brrtmvc::view::ModelView;
use brrtmvc::Model;
use serde::Serialize;

#[derive(Debug, Default, Serialize, Model)]
pub struct Employee {
    pub name: String,
    #[field(name = "years")]
    pub age: i32,
    pub salary: f64,
    pub manager: bool,
}

pub struct EmpController {
    session: Session,
}

impl EmpController {
    fn greet(&mut self, name: Option<String>) -> String {
        let name = name.unwrap_or_else(|| "stranger".to_owned());
        format!("Hello {name}")
    }

    fn save(&mut self, emp: Employee) -> anyhow::Result<ModelView> {
        let saved: i64 = self.session.get_as("saved")?.unwrap_or(0) + 1;
        self.session.set("saved", &saved)?;

        let mut view = ModelView::new("/emp.html");
        view.add_object("name", &emp.name)?;
        view.add_object("age", &emp.age)?;
        view.add_object("salary", &emp.salary)?;
        view.add_object("manager", &emp.manager)?;
        Ok(view.with("saved", saved))
    }
}

impl Controller for EmpController {
    fn create(session: Session) -> anyhow::Result<Self> {
        Ok(Self { session })
    }

    fn handlers() -> Vec<HandlerDef<Self>> {
        vec![
            HandlerDef::get("/emp/hello", "greet", |c: &mut Self, args| {
                Ok(c.greet(args.get("name")?))
            })
            .param(ParamSpec::scalar::<Option<String>>("name")),
            HandlerDef::get("/emp/save", "save", |c: &mut Self, args| {
                c.save(args.take_model("emp")?)
            })
            .param(ParamSpec::model::<Employee>("emp")),
            HandlerDef::get("/emp/detail", "detail", |_: &mut Self, args| {
                let id: i64 = args.get("id")?;
                Ok(ModelView::new("/emp.html")
                    .with("name", format!("Employee #{id}"))
                    .with("age", 0)
                    .with("salary", 0.0)
                    .with("manager", false)
                    .with("saved", 0))
            })
            .param(ParamSpec::scalar::<i64>("id").named("emp_id")),
            HandlerDef::get("/emp/missing", "missing", |_: &mut Self, _| {
                Ok(ModelView::without_url())
            }),
        ]
    }
}

brrtmvc::register_controller!(EmpController);
