use brrtmvc::binding::ParamSpec;
use brrtmvc::controller::{Controller, ControllerSet, HandlerDef};
use brrtmvc::dispatcher::Dispatcher;
use brrtmvc::registry::ControllerRegistry;
use brrtmvc::router::Router;
use brrtmvc::server::MvcRequest;
use brrtmvc::session::{MemorySessionStore, Session, SessionStore};
use brrtmvc::view::{RecordingForwarder, SUCCESS_NOTICE, VIEW_NOT_FOUND};
use brrtmvc::MvcError;
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

mod common;

#[test]
fn test_scalar_parameter_is_coerced() {
    let (_, dispatcher) = common::dispatcher();
    let mut req = MvcRequest::new("/user/id").with_param("id", "42");
    let res = dispatcher.dispatch(&mut req).unwrap();
    assert_eq!(res.status, 200);
    assert_eq!(res.body, format!("id=42\n{SUCCESS_NOTICE}"));
}

#[test]
fn test_uncoercible_scalar_is_bad_request() {
    let (_, dispatcher) = common::dispatcher();
    let mut req = MvcRequest::new("/user/id").with_param("id", "abc");
    let err = dispatcher.dispatch(&mut req).unwrap_err();
    assert!(matches!(err, MvcError::ParameterBinding { .. }));

    let res = dispatcher.handle(&mut req);
    assert_eq!(res.status, 400);
    assert!(res.body.contains("abc"));
}

#[test]
fn test_text_is_not_escaped() {
    let (_, dispatcher) = common::dispatcher();
    let mut req = MvcRequest::new("/user/raw").with_param("html", "<b>&</b>");
    let res = dispatcher.dispatch(&mut req).unwrap();
    assert_eq!(res.body, format!("<b>&</b>\n{SUCCESS_NOTICE}"));
    assert!(!res.is_forward());
}

#[test]
fn test_model_parameter_fields() {
    let (_, dispatcher) = common::dispatcher();
    let mut req = MvcRequest::new("/user/age")
        .with_param("user.name", "Ann")
        .with_param("user.age", "30");
    let res = dispatcher.dispatch(&mut req).unwrap();
    assert!(res.body.starts_with("Ann:30\n"));
}

#[test]
fn test_model_defaults_when_keys_absent() {
    let (_, dispatcher) = common::dispatcher();
    let mut req = MvcRequest::new("/user/age");
    let res = dispatcher.dispatch(&mut req).unwrap();
    assert!(res.body.starts_with(":0\n"));
}

#[test]
fn test_view_data_published_before_forward() {
    let (forwarder, dispatcher) = common::dispatcher();
    let mut req = MvcRequest::new("/user/show")
        .with_param("user.name", "Ann")
        .with_param("user.age", "30");
    let res = dispatcher.dispatch(&mut req).unwrap();

    assert_eq!(res.forwarded_to.as_deref(), Some("/user.html"));
    let records = forwarder.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].url, "/user.html");
    assert_eq!(records[0].attributes.get("name"), Some(&json!("Ann")));
    assert_eq!(records[0].attributes.get("age"), Some(&json!(30)));
}

#[test]
fn test_view_without_url_is_not_found() {
    let (forwarder, dispatcher) = common::dispatcher();
    let mut req = MvcRequest::new("/user/none");
    let res = dispatcher.dispatch(&mut req).unwrap();

    assert_eq!(res.status, 404);
    assert_eq!(res.body, VIEW_NOT_FOUND);
    assert!(forwarder.records().is_empty());
    assert!(req.attribute("ignored").is_none());
}

#[test]
fn test_session_slot_is_always_present() {
    let (_, dispatcher) = common::dispatcher();
    let store = Arc::new(MemorySessionStore::new());

    let mut anonymous = MvcRequest::new("/user/whoami").with_session(store.clone());
    let res = dispatcher.dispatch(&mut anonymous).unwrap();
    assert!(res.body.starts_with("anonymous\n"));

    let mut login = MvcRequest::new("/user/login")
        .with_param("name", "ann")
        .with_session(store.clone());
    dispatcher.dispatch(&mut login).unwrap();
    assert_eq!(store.get("user"), Some(json!("ann")));

    let mut whoami = MvcRequest::new("/user/whoami").with_session(store.clone());
    let res = dispatcher.dispatch(&mut whoami).unwrap();
    assert!(res.body.starts_with("ann\n"));
}

#[test]
fn test_absent_string_parameter_binds_empty() {
    let (_, dispatcher) = common::dispatcher();
    let store = Arc::new(MemorySessionStore::new());
    let mut req = MvcRequest::new("/user/login").with_session(store.clone());

    let res = dispatcher.handle(&mut req);
    assert_eq!(res.status, 200);
    assert_eq!(res.body, format!("logged in\n{SUCCESS_NOTICE}"));
    assert_eq!(store.get("user"), Some(json!("")));
}

#[test]
fn test_unmatched_parameter_does_not_fail() {
    let (_, dispatcher) = common::dispatcher();
    let mut req = MvcRequest::new("/user/upload").with_param("id", "5");
    let res = dispatcher.dispatch(&mut req).unwrap();
    assert!(res.body.starts_with("upload 5\n"));
}

#[test]
fn test_handler_error_is_surfaced() {
    let (_, dispatcher) = common::dispatcher();
    let mut req = MvcRequest::new("/user/fail");
    match dispatcher.dispatch(&mut req).unwrap_err() {
        MvcError::Invocation { handler, source } => {
            assert!(handler.ends_with("UserController.fail"), "{handler}");
            assert!(source.to_string().contains("database unavailable"));
        }
        other => panic!("unexpected error: {other}"),
    }

    let res = dispatcher.handle(&mut req);
    assert_eq!(res.status, 500);
    assert!(res.body.contains("database unavailable"));
}

#[test]
fn test_handler_panic_is_surfaced() {
    let (_, dispatcher) = common::dispatcher();
    let mut req = MvcRequest::new("/user/panic");
    let res = dispatcher.handle(&mut req);
    assert_eq!(res.status, 500);
    assert!(res.body.contains("boom"), "{}", res.body);
}

#[test]
fn test_controller_construction_failure() {
    let (_, dispatcher) = common::dispatcher();
    let mut req = MvcRequest::new("/broken");
    let err = dispatcher.dispatch(&mut req).unwrap_err();
    assert_eq!(err.status(), 500);
    let message = err.to_string();
    assert!(message.contains("BrokenController"), "{message}");
    assert!(message.contains("dependency missing"), "{message}");
}

#[test]
fn test_unknown_path_is_not_found() {
    let (_, dispatcher) = common::dispatcher();
    let mut req = MvcRequest::new("/nope");
    let res = dispatcher.handle(&mut req);
    assert_eq!(res.status, 404);
    assert_eq!(res.body, "No associated method found for URL: /nope");
}

static CONSTRUCTED: AtomicUsize = AtomicUsize::new(0);

struct CountingController;

impl Controller for CountingController {
    fn create(_session: Session) -> anyhow::Result<Self> {
        CONSTRUCTED.fetch_add(1, Ordering::SeqCst);
        Ok(Self)
    }

    fn handlers() -> Vec<HandlerDef<Self>> {
        vec![HandlerDef::get("/count", "count", |_: &mut Self, _| Ok("counted"))
            .param(ParamSpec::scalar::<i32>("n"))]
    }
}

#[test]
fn test_controller_constructed_only_for_bound_requests() {
    let set = ControllerSet::new().with::<CountingController>();
    let table = ControllerRegistry::build(Some(&set)).unwrap();
    let dispatcher = Dispatcher::new(Router::new(table), Arc::new(RecordingForwarder::new()));

    let mut unknown = MvcRequest::new("/other");
    assert!(dispatcher.dispatch(&mut unknown).is_err());
    assert_eq!(CONSTRUCTED.load(Ordering::SeqCst), 0);

    let mut bad = MvcRequest::new("/count").with_param("n", "x");
    assert!(dispatcher.dispatch(&mut bad).is_err());
    assert_eq!(CONSTRUCTED.load(Ordering::SeqCst), 0);

    let mut ok = MvcRequest::new("/count").with_param("n", "1");
    dispatcher.dispatch(&mut ok).unwrap();
    assert_eq!(CONSTRUCTED.load(Ordering::SeqCst), 1);
}

#[test]
fn test_dispatcher_is_shared_across_threads() {
    let (_, dispatcher) = common::dispatcher();
    let dispatcher = Arc::new(dispatcher);

    let workers: Vec<_> = (0..8)
        .map(|i| {
            let dispatcher = Arc::clone(&dispatcher);
            std::thread::spawn(move || {
                let mut req = MvcRequest::new("/user/id").with_param("id", i.to_string());
                dispatcher.dispatch(&mut req).unwrap().body
            })
        })
        .collect();

    for (i, worker) in workers.into_iter().enumerate() {
        assert!(worker.join().unwrap().starts_with(&format!("id={i}\n")));
    }
}
