use crate::execution::tests::assert_response;
use crate::execution::tests::run_with;
use crate::execution::ExecuteOptions;
use crate::execution::Resolved;
use crate::execution::ResolverContext;
use crate::runtime::BlockingRuntime;
use crate::runtime::CancelToken;
use crate::runtime::CooperativeRuntime;
use crate::runtime::Runtime;
use crate::runtime::ThreadPoolRuntime;
use crate::schema::Schema;
use crate::Value;
use serde_json::json;
use std::sync::atomic::AtomicI64;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;
use std::time::Instant;

/// A schema whose two sibling fields record wall-clock execution windows.
fn timed_schema(clock: Instant, windows: Arc<Mutex<Vec<(u128, u128)>>>) -> Schema {
    let timed_resolver = move |_ctx: ResolverContext<'_>| {
        let start = clock.elapsed().as_millis();
        std::thread::sleep(Duration::from_millis(60));
        let end = clock.elapsed().as_millis();
        windows.lock().unwrap().push((start, end));
        Ok(Resolved::value(1))
    };

    Schema::builder()
        .load_sdl("type Query { left: Int, right: Int }")
        .unwrap()
        .with_resolver("Query", "left", timed_resolver.clone())
        .with_resolver("Query", "right", timed_resolver)
        .build()
        .unwrap()
}

fn overlapping(windows: &[(u128, u128)]) -> bool {
    windows.len() == 2 && windows[0].0 < windows[1].1 && windows[1].0 < windows[0].1
}

#[test]
fn blocking_runtime_never_interleaves_resolvers() {
    let clock = Instant::now();
    let windows = Arc::new(Mutex::new(vec![]));
    let schema = timed_schema(clock, windows.clone());

    let response = run_with(
        &schema,
        "{ left right }",
        ExecuteOptions {
            runtime: Some(&BlockingRuntime::new()),
            ..Default::default()
        },
    );
    assert!(response.is_ok());
    let windows = windows.lock().unwrap();
    assert!(!overlapping(&windows), "{windows:?}");
}

#[test]
fn cooperative_runtime_never_interleaves_resolvers() {
    let clock = Instant::now();
    let windows = Arc::new(Mutex::new(vec![]));
    let schema = timed_schema(clock, windows.clone());

    let response = run_with(
        &schema,
        "{ left right }",
        ExecuteOptions {
            runtime: Some(&CooperativeRuntime::new()),
            ..Default::default()
        },
    );
    assert!(response.is_ok());
    let windows = windows.lock().unwrap();
    assert!(!overlapping(&windows), "{windows:?}");
}

#[test]
fn thread_pool_runtime_overlaps_sibling_query_fields() {
    let clock = Instant::now();
    let windows = Arc::new(Mutex::new(vec![]));
    let schema = timed_schema(clock, windows.clone());
    let runtime = ThreadPoolRuntime::new(4).unwrap();

    let response = run_with(
        &schema,
        "{ left right }",
        ExecuteOptions {
            runtime: Some(&runtime),
            ..Default::default()
        },
    );
    assert!(response.is_ok());
    let windows = windows.lock().unwrap();
    assert!(overlapping(&windows), "{windows:?}");
}

/// Mutations serialize under every runtime, parallel or not.
#[test]
fn mutations_serialize_under_every_runtime() {
    let blocking = BlockingRuntime::new();
    let cooperative = CooperativeRuntime::new();
    let thread_pool = ThreadPoolRuntime::new(4).unwrap();
    let runtimes: Vec<(&str, &dyn Runtime)> = vec![
        ("blocking", &blocking),
        ("cooperative", &cooperative),
        ("thread-pool", &thread_pool),
    ];

    for (name, runtime) in runtimes {
        let counter = Arc::new(AtomicI64::new(0));
        let schema = Schema::builder()
            .load_sdl("type Mutation { inc: Int } type Query { noop: Int }")
            .unwrap()
            .with_resolver("Mutation", "inc", {
                let counter = counter.clone();
                move |_ctx: ResolverContext<'_>| {
                    // A sleep would let out-of-order execution win the race
                    // if ordering were broken.
                    std::thread::sleep(Duration::from_millis(5));
                    Ok(Resolved::value(counter.fetch_add(1, Ordering::SeqCst) + 1))
                }
            })
            .build()
            .unwrap();

        let response = run_with(
            &schema,
            "mutation { a: inc b: inc c: inc }",
            ExecuteOptions {
                runtime: Some(runtime),
                ..Default::default()
            },
        );
        let serialized = serde_json::to_value(&response).unwrap();
        assert_eq!(
            serialized["data"],
            json!({ "a": 1, "b": 2, "c": 3 }),
            "runtime {name}",
        );
    }
}

#[test]
fn parallel_results_keep_selection_order() {
    let schema = Schema::builder()
        .load_sdl("type Query { slow: Int, fast: Int }")
        .unwrap()
        .with_resolver("Query", "slow", |_ctx: ResolverContext<'_>| {
            std::thread::sleep(Duration::from_millis(50));
            Ok(Resolved::value(1))
        })
        .with_resolver("Query", "fast", |_ctx: ResolverContext<'_>| {
            Ok(Resolved::value(2))
        })
        .build()
        .unwrap();
    let runtime = ThreadPoolRuntime::new(4).unwrap();

    let response = run_with(
        &schema,
        "{ slow fast }",
        ExecuteOptions {
            runtime: Some(&runtime),
            ..Default::default()
        },
    );
    let keys: Vec<&String> = match &response.data {
        Some(Value::Object(entries)) => entries.keys().collect(),
        other => panic!("expected object data, got {other:?}"),
    };
    assert_eq!(keys, ["slow", "fast"]);
}

#[test]
fn cancellation_stops_dispatch_and_reports_once() {
    let calls = Arc::new(AtomicI64::new(0));
    let token = CancelToken::new();
    token.cancel();
    let runtime = BlockingRuntime::with_cancel_token(token);

    let schema = Schema::builder()
        .load_sdl("type Query { a: Int, b: Int }")
        .unwrap()
        .with_resolver("Query", "a", {
            let calls = calls.clone();
            move |_ctx: ResolverContext<'_>| {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(Resolved::value(1))
            }
        })
        .with_resolver("Query", "b", {
            let calls = calls.clone();
            move |_ctx: ResolverContext<'_>| {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(Resolved::value(2))
            }
        })
        .build()
        .unwrap();

    let response = run_with(
        &schema,
        "{ a b }",
        ExecuteOptions {
            runtime: Some(&runtime),
            ..Default::default()
        },
    );

    // No resolver ran; both fields are null; cancellation is reported as
    // one execution error.
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    let serialized = serde_json::to_value(&response).unwrap();
    assert_eq!(serialized["data"], json!({ "a": null, "b": null }));
    let cancel_errors: Vec<_> = response
        .errors
        .iter()
        .filter(|e| e.message.contains("cancelled"))
        .collect();
    assert_eq!(cancel_errors.len(), 1);
}
