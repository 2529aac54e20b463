use super::Router;
use crate::controller::{Controller, ControllerSet, HandlerDef};
use crate::error::MvcError;
use crate::registry::{ControllerRegistry, RouteTable};
use crate::session::Session;

struct Pages;

impl Controller for Pages {
    fn create(_session: Session) -> anyhow::Result<Self> {
        Ok(Pages)
    }

    fn handlers() -> Vec<HandlerDef<Self>> {
        vec![
            HandlerDef::get("/", "home", |_: &mut Self, _| Ok("home")),
            HandlerDef::get("/about", "about", |_: &mut Self, _| Ok("about")),
        ]
    }
}

fn router() -> Router {
    let set = ControllerSet::new().with::<Pages>();
    Router::new(ControllerRegistry::build(Some(&set)).unwrap())
}

#[test]
fn test_root_path() {
    let router = router();
    assert_eq!(router.resolve("/").unwrap().mapping().method(), "home");
}

#[test]
fn test_exact_match_only() {
    let router = router();
    assert!(router.resolve("/about").is_ok());
    assert!(router.resolve("/about/").is_err());
    assert!(router.resolve("/About").is_err());
    assert!(router.resolve("about").is_err());
}

#[test]
fn test_unknown_path_is_route_not_found() {
    let router = router();
    match router.resolve("/missing").unwrap_err() {
        MvcError::RouteNotFound { path } => assert_eq!(path, "/missing"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_route_listing() {
    let listing = router().route_listing();
    let lines: Vec<&str> = listing.lines().collect();
    assert_eq!(lines[0], "[routes] count=2");
    assert!(lines[1].starts_with("[route] / -> "));
    assert!(lines[1].ends_with("Pages.home"));
    assert!(lines[2].starts_with("[route] /about -> "));
}

#[test]
fn test_empty_router() {
    let router = Router::new(RouteTable::new());
    assert!(router.is_empty());
    assert!(router.resolve("/").is_err());
}
