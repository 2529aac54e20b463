use super::*;
use crate::binding::ParamSpec;
use crate::controller::{Controller, ControllerEntry, ControllerSet, HandlerDef};
use crate::error::MvcError;
use crate::session::Session;
use crate::view::ModelView;

struct EmpController;

impl Controller for EmpController {
    fn create(_session: Session) -> anyhow::Result<Self> {
        Ok(Self)
    }

    fn handlers() -> Vec<HandlerDef<Self>> {
        vec![
            HandlerDef::get("/emp/list", "list", |_: &mut Self, _| Ok("list")),
            HandlerDef::get("/emp/view", "view", |_: &mut Self, _| {
                Ok(ModelView::new("/emp.html"))
            })
            .param(ParamSpec::scalar::<i64>("id")),
        ]
    }
}

struct ClashController;

impl Controller for ClashController {
    fn create(_session: Session) -> anyhow::Result<Self> {
        Ok(Self)
    }

    fn handlers() -> Vec<HandlerDef<Self>> {
        vec![HandlerDef::get("/emp/list", "all", |_: &mut Self, _| {
            Ok(String::from("all"))
        })]
    }
}

struct SelfClashController;

impl Controller for SelfClashController {
    fn create(_session: Session) -> anyhow::Result<Self> {
        Ok(Self)
    }

    fn handlers() -> Vec<HandlerDef<Self>> {
        vec![
            HandlerDef::get("/same", "first", |_: &mut Self, _| Ok("1")),
            HandlerDef::get("/same", "second", |_: &mut Self, _| Ok("2")),
        ]
    }
}

struct PathlessController;

impl Controller for PathlessController {
    fn create(_session: Session) -> anyhow::Result<Self> {
        Ok(Self)
    }

    fn handlers() -> Vec<HandlerDef<Self>> {
        vec![HandlerDef::new("orphan", |_: &mut Self, _| Ok("orphan"))]
    }
}

struct NumericController;

impl Controller for NumericController {
    fn create(_session: Session) -> anyhow::Result<Self> {
        Ok(Self)
    }

    fn handlers() -> Vec<HandlerDef<Self>> {
        vec![HandlerDef::get("/count", "count", |_: &mut Self, _| Ok(7_u32))]
    }
}

fn config_message(err: MvcError) -> String {
    match err {
        MvcError::Configuration(message) => message,
        other => panic!("expected configuration error, got {other}"),
    }
}

#[test]
fn test_build_collects_every_handler() {
    let set = ControllerSet::new().with::<EmpController>();
    let table = ControllerRegistry::build(Some(&set)).unwrap();

    assert_eq!(table.len(), 2);
    let view = table.get("/emp/view").unwrap();
    assert_eq!(view.mapping().method(), "view");
    assert!(view.mapping().controller().ends_with("EmpController"));
    assert_eq!(view.params().len(), 1);
    assert_eq!(view.params()[0].declared_name(), "id");
}

#[test]
fn test_build_without_controllers_fails() {
    let err = ControllerRegistry::build(None).unwrap_err();
    assert!(config_message(err).contains("no controller set"));
}

#[test]
fn test_empty_set_builds_empty_table() {
    let table = ControllerRegistry::build(Some(&ControllerSet::new())).unwrap();
    assert!(table.is_empty());
}

#[test]
fn test_duplicate_across_controllers_names_both() {
    let set = ControllerSet::new()
        .with::<EmpController>()
        .with::<ClashController>();
    let message = config_message(ControllerRegistry::build(Some(&set)).unwrap_err());

    assert!(message.contains("/emp/list"), "{message}");
    assert!(message.contains("EmpController.list"), "{message}");
    assert!(message.contains("ClashController.all"), "{message}");
}

#[test]
fn test_duplicate_within_controller_names_both() {
    let set = ControllerSet::new().with::<SelfClashController>();
    let message = config_message(ControllerRegistry::build(Some(&set)).unwrap_err());

    assert!(message.contains("SelfClashController.first"), "{message}");
    assert!(message.contains("SelfClashController.second"), "{message}");
}

#[test]
fn test_pathless_handler_is_rejected() {
    let set = ControllerSet::new().with::<PathlessController>();
    let message = config_message(ControllerRegistry::build(Some(&set)).unwrap_err());
    assert!(message.contains("PathlessController.orphan"), "{message}");
    assert!(message.contains("without a path"), "{message}");
}

#[test]
fn test_unsupported_return_type_is_rejected() {
    let set = ControllerSet::new().with::<NumericController>();
    let message = config_message(ControllerRegistry::build(Some(&set)).unwrap_err());
    assert!(message.contains("u32"), "{message}");
}

#[test]
fn test_register_into_overwrites_existing_path() {
    let set = ControllerSet::new().with::<EmpController>();
    let mut table = ControllerRegistry::build(Some(&set)).unwrap();

    ControllerRegistry::register_into(&mut table, &ControllerEntry::of::<ClashController>()).unwrap();

    assert_eq!(table.len(), 2);
    let list = table.get("/emp/list").unwrap();
    assert_eq!(list.mapping().method(), "all");
}

#[test]
fn test_mappings_are_sorted_by_path() {
    let set = ControllerSet::new().with::<EmpController>();
    let table = ControllerRegistry::build(Some(&set)).unwrap();
    let paths: Vec<&str> = table.mappings().iter().map(|m| m.path()).collect();
    assert_eq!(paths, vec!["/emp/list", "/emp/view"]);
}
