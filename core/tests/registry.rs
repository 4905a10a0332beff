use futures_executor::block_on;
use serde::{Serialize, Serializer};
use serde_json::{json, Value};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use tools::{double, fetch_user, OutcomeCase};
use tranqui_core::{Call, Error, ErrorKind, Registry};


fn registry() -> Registry {
    Registry::new()
        .register("double", double)
        .register("fetch_user", fetch_user)
        .register("ping", || Ok::<_, Error>("pong"))
}

#[test]
fn test_invoke_registered_callbacks() {
    tools::init_logger();
    let registry = registry();

    OutcomeCase::new(block_on(registry.invoke("double", json!([5]))))
        .name("double 5")
        .value(json!(10))
        .run();

    OutcomeCase::new(block_on(registry.invoke("double", json!([-5]))))
        .name("double -5")
        .error("Negative not allowed")
        .kind(ErrorKind::Execution)
        .run();

    OutcomeCase::new(block_on(registry.invoke("fetch_user", json!([7]))))
        .name("fetch_user 7")
        .value(json!("User-7"))
        .run();

    OutcomeCase::new(block_on(registry.invoke("fetch_user", json!([0]))))
        .name("fetch_user 0")
        .error("User not found")
        .run();

    OutcomeCase::new(block_on(registry.invoke("ping", json!([]))))
        .name("ping []")
        .value(json!("pong"))
        .run();

    OutcomeCase::new(block_on(registry.invoke("ping", Value::Null)))
        .name("ping null")
        .value(json!("pong"))
        .run();
}

#[test]
fn test_unknown_callback_is_invalid_function() {
    let registry = registry();

    OutcomeCase::new(block_on(registry.invoke("triple", json!([5]))))
        .name("unknown name")
        .error("Invalid function")
        .kind(ErrorKind::InvalidFunction)
        .run();
}

#[test]
fn test_refused_callbacks_are_never_called() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counted = {
        let calls = calls.clone();
        move |n: u8| {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, Error>(n)
        }
    };
    let registry = Registry::new().register("counted", counted);

    for (name, args) in [
        ("missing", json!([1])),
        ("counted", json!(["one"])),
        ("counted", json!([1, 2])),
        ("counted", json!([1024])),
        ("counted", json!({ "n": 1 })),
    ] {
        OutcomeCase::new(block_on(registry.invoke(name, args.clone())))
            .name(format!("{} {}", name, args))
            .error("Invalid function")
            .kind(ErrorKind::InvalidFunction)
            .run();
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    OutcomeCase::new(block_on(registry.invoke("counted", json!([1]))))
        .name("counted 1")
        .value(json!(1))
        .run();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_callback_runs_before_invoke_returns() {
    let calls = Arc::new(AtomicUsize::new(0));
    let registry = Registry::new().register("bump", {
        let calls = calls.clone();
        move || Ok::<_, Error>(calls.fetch_add(1, Ordering::SeqCst) + 1)
    });

    let pending = registry.invoke("bump", json!([]));
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let outcome = block_on(pending);
    assert_eq!(outcome.value(), Some(&json!(1)));
}

#[test]
fn test_dispatch_calls_from_json() -> anyhow::Result<()> {
    let calls: Vec<Call> = serde_json::from_str(
        r#"[
            { "callback": "double", "args": [21] },
            { "callback": "ping" },
            { "callback": "nope", "args": [] }
        ]"#,
    )?;
    assert_eq!(calls[1], Call::new("ping", vec![]));

    let registry = registry();
    let outcomes: Vec<Value> = calls
        .iter()
        .map(|call| serde_json::to_value(block_on(registry.dispatch(call))))
        .collect::<Result<_, _>>()?;

    assert_eq!(
        outcomes,
        vec![
            json!({ "ok": true, "value": 42, "error": null }),
            json!({ "ok": true, "value": "pong", "error": null }),
            json!({ "ok": false, "value": null, "error": "Invalid function" }),
        ]
    );
    Ok(())
}

#[test]
fn test_register_replaces_and_lists_names() {
    let registry = registry().register("double", |n: i32| Ok::<_, Error>(n * 4));

    assert!(registry.contains("double"));
    assert!(!registry.contains("triple"));

    let mut names: Vec<&str> = registry.names().collect();
    names.sort_unstable();
    assert_eq!(names, vec!["double", "fetch_user", "ping"]);

    OutcomeCase::new(block_on(registry.invoke("double", json!([5]))))
        .name("replaced double")
        .value(json!(20))
        .run();
}

struct Unencodable;

impl Serialize for Unencodable {
    fn serialize<S>(&self, _serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        panic!("cannot encode settled value")
    }
}

#[test]
fn test_panicking_encoding_becomes_failure() {
    let registry = Registry::new().register("unencodable", || Ok::<_, Error>(Unencodable));

    let outcome = block_on(registry.invoke("unencodable", json!([])));
    assert!(outcome.has_error());
    assert_eq!(
        outcome.error().map(Error::message).as_deref(),
        Some("cannot encode settled value")
    );
    assert_eq!(outcome.error().map(Error::kind), Some(ErrorKind::Execution));
}
