//! HandlerRegistry and ReducerSlot behaviour: ordering, duplicates, removal,
//! mid-pass mutation and fault isolation. No transport or decoding involved.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use blackholio_dispatch::{
    ArgsHandler, ContextHandler, HandlerId, HandlerRegistry, ReducerArgs, ReducerEventContext,
    ReducerSlot,
};
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Test reducers
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct Ping {}

impl ReducerArgs for Ping {
    const NAME: &'static str = "ping";
    type Handler = ContextHandler;

    fn call(handler: &ContextHandler, ctx: &ReducerEventContext, _args: &Self) {
        handler(ctx)
    }
}

#[derive(Debug, Deserialize)]
struct Score {
    points: u32,
}

impl ReducerArgs for Score {
    const NAME: &'static str = "score";
    type Handler = ArgsHandler<Score>;

    fn call(handler: &ArgsHandler<Score>, ctx: &ReducerEventContext, args: &Self) {
        handler(ctx, args)
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

type Log = Arc<Mutex<Vec<String>>>;

fn new_log() -> Log {
    Arc::new(Mutex::new(Vec::new()))
}

fn recording(log: &Log, label: &str) -> Arc<ContextHandler> {
    let log = Arc::clone(log);
    let label = label.to_string();
    Arc::new(move |_ctx: &ReducerEventContext| log.lock().unwrap().push(label.clone()))
}

fn entries(log: &Log) -> Vec<String> {
    log.lock().unwrap().clone()
}

fn ping_ctx() -> ReducerEventContext {
    ReducerEventContext::new("ping")
}

// =========================================================================
// Tests
// =========================================================================

#[test]
fn empty_slot_reports_unhandled() {
    let slot = ReducerSlot::<Ping>::new();
    assert!(!slot.invoke(&ping_ctx(), &Ping {}));
}

#[test]
fn handlers_run_in_registration_order() {
    let log = new_log();
    let slot = ReducerSlot::<Ping>::new();
    slot.on(recording(&log, "a"));
    slot.on(recording(&log, "b"));
    slot.on(recording(&log, "c"));

    assert!(slot.invoke(&ping_ctx(), &Ping {}));
    assert_eq!(entries(&log), vec!["a", "b", "c"]);
}

#[test]
fn same_handler_registered_twice_runs_twice() {
    let log = new_log();
    let slot = ReducerSlot::<Ping>::new();
    let h = recording(&log, "h");
    slot.on(Arc::clone(&h));
    slot.on(Arc::clone(&h));

    assert!(slot.invoke(&ping_ctx(), &Ping {}));
    assert_eq!(entries(&log), vec!["h", "h"]);
}

#[test]
fn remove_drops_the_earliest_registration_only() {
    let log = new_log();
    let slot = ReducerSlot::<Ping>::new();
    let h = recording(&log, "h");
    let other = recording(&log, "other");
    slot.on(Arc::clone(&h));
    slot.on(Arc::clone(&other));
    slot.on(Arc::clone(&h));

    assert!(slot.remove(&h));
    assert_eq!(slot.handler_count(), 2);

    slot.invoke(&ping_ctx(), &Ping {});
    assert_eq!(entries(&log), vec!["other", "h"]);
}

#[test]
fn remove_all_drops_every_registration_of_a_handler() {
    let log = new_log();
    let slot = ReducerSlot::<Ping>::new();
    let h = recording(&log, "h");
    let other = recording(&log, "other");
    slot.on(Arc::clone(&h));
    slot.on(Arc::clone(&other));
    slot.on(Arc::clone(&h));

    assert_eq!(slot.remove_all(&h), 2);
    assert_eq!(slot.handler_count(), 1);

    slot.invoke(&ping_ctx(), &Ping {});
    assert_eq!(entries(&log), vec!["other"]);
}

#[test]
fn removing_unregistered_handler_is_a_noop() {
    let log = new_log();
    let slot = ReducerSlot::<Ping>::new();
    slot.on(recording(&log, "kept"));

    let stranger = recording(&log, "stranger");
    assert!(!slot.remove(&stranger));
    assert_eq!(slot.remove_all(&stranger), 0);
    assert_eq!(slot.handler_count(), 1);
}

#[test]
fn remove_id_drops_exactly_one_registration() {
    let log = new_log();
    let slot = ReducerSlot::<Ping>::new();
    let h = recording(&log, "h");
    let first = slot.on(Arc::clone(&h));
    slot.on(Arc::clone(&h));

    assert!(slot.remove_id(first));
    assert!(!slot.remove_id(first));

    slot.invoke(&ping_ctx(), &Ping {});
    assert_eq!(entries(&log), vec!["h"]);
}

#[test]
fn handler_ids_do_not_cross_slots() {
    let log = new_log();
    let connect = ReducerSlot::<Ping>::new();
    let disconnect = ReducerSlot::<Ping>::new();
    let scores = ReducerSlot::<Score>::new();

    let id = connect.on(recording(&log, "connect"));
    disconnect.on(recording(&log, "disconnect"));
    scores.on(Arc::new(|_ctx: &ReducerEventContext, _args: &Score| {}));

    assert!(!disconnect.remove_id(id));
    assert!(!scores.remove_id(id));
    assert_eq!(disconnect.handler_count(), 1);
    assert_eq!(scores.handler_count(), 1);

    assert!(disconnect.invoke(&ping_ctx(), &Ping {}));
    assert_eq!(entries(&log), vec!["disconnect"]);

    assert!(connect.remove_id(id));
}

#[test]
fn registry_is_empty_once_every_registration_is_gone() {
    let log = new_log();
    let registry = HandlerRegistry::<Ping>::new();
    assert!(registry.is_empty());

    let h = recording(&log, "h");
    registry.add(Arc::clone(&h));
    registry.add(Arc::clone(&h));
    assert!(!registry.is_empty());
    assert_eq!(registry.len(), 2);

    assert_eq!(registry.remove_all(&h), 2);
    assert!(registry.is_empty());
    assert!(!registry.invoke_all(&ping_ctx(), &Ping {}).handled());
}

#[test]
fn every_handler_sees_the_same_context_and_args() {
    let seen: Arc<Mutex<Vec<(String, u32)>>> = Arc::new(Mutex::new(Vec::new()));
    let slot = ReducerSlot::<Score>::new();
    for _ in 0..2 {
        let seen = Arc::clone(&seen);
        slot.on(Arc::new(move |ctx: &ReducerEventContext, args: &Score| {
            seen.lock().unwrap().push((ctx.reducer.clone(), args.points));
        }));
    }

    let ctx = ReducerEventContext::new("score");
    assert!(slot.invoke(&ctx, &Score { points: 7 }));
    assert_eq!(
        *seen.lock().unwrap(),
        vec![("score".to_string(), 7), ("score".to_string(), 7)]
    );
}

#[test]
fn handler_removing_itself_mid_pass_does_not_stop_others() {
    let log = new_log();
    let slot = Arc::new(ReducerSlot::<Ping>::new());
    let own_id: Arc<Mutex<Option<HandlerId>>> = Arc::new(Mutex::new(None));

    let once: Arc<ContextHandler> = {
        let log = Arc::clone(&log);
        let slot = Arc::clone(&slot);
        let own_id = Arc::clone(&own_id);
        Arc::new(move |_ctx: &ReducerEventContext| {
            log.lock().unwrap().push("once".into());
            if let Some(id) = own_id.lock().unwrap().take() {
                slot.remove_id(id);
            }
        })
    };
    *own_id.lock().unwrap() = Some(slot.on(once));
    slot.on(recording(&log, "steady"));

    assert!(slot.invoke(&ping_ctx(), &Ping {}));
    assert_eq!(entries(&log), vec!["once", "steady"]);

    assert!(slot.invoke(&ping_ctx(), &Ping {}));
    assert_eq!(entries(&log), vec!["once", "steady", "steady"]);
}

#[test]
fn removal_during_pass_does_not_shrink_the_current_pass() {
    let log = new_log();
    let slot = Arc::new(ReducerSlot::<Ping>::new());
    let victim = recording(&log, "victim");

    let remover: Arc<ContextHandler> = {
        let log = Arc::clone(&log);
        let slot = Arc::clone(&slot);
        let victim = Arc::clone(&victim);
        Arc::new(move |_ctx: &ReducerEventContext| {
            log.lock().unwrap().push("remover".into());
            slot.remove(&victim);
        })
    };
    slot.on(remover);
    slot.on(Arc::clone(&victim));

    let report = slot.invoke_report(&ping_ctx(), &Ping {});
    assert_eq!(report.invoked, 2);
    assert_eq!(entries(&log), vec!["remover", "victim"]);

    slot.invoke(&ping_ctx(), &Ping {});
    assert_eq!(entries(&log), vec!["remover", "victim", "remover"]);
}

#[test]
fn handler_added_during_pass_runs_from_next_pass() {
    let log = new_log();
    let slot = Arc::new(ReducerSlot::<Ping>::new());
    let late = recording(&log, "late");
    let added = Arc::new(Mutex::new(false));

    let adder: Arc<ContextHandler> = {
        let log = Arc::clone(&log);
        let slot = Arc::clone(&slot);
        let late = Arc::clone(&late);
        Arc::new(move |_ctx: &ReducerEventContext| {
            log.lock().unwrap().push("adder".into());
            let mut added = added.lock().unwrap();
            if !*added {
                *added = true;
                slot.on(Arc::clone(&late));
            }
        })
    };
    slot.on(adder);

    slot.invoke(&ping_ctx(), &Ping {});
    assert_eq!(entries(&log), vec!["adder"]);

    slot.invoke(&ping_ctx(), &Ping {});
    assert_eq!(entries(&log), vec!["adder", "adder", "late"]);
}

#[test]
fn panicking_handler_is_isolated_and_reported() {
    let log = new_log();
    let slot = ReducerSlot::<Ping>::new();
    slot.on(recording(&log, "before"));
    slot.on(Arc::new(|_ctx: &ReducerEventContext| panic!("handler exploded")));
    slot.on(recording(&log, "after"));

    let report = slot.invoke_report(&ping_ctx(), &Ping {});

    assert!(report.handled());
    assert_eq!(report.invoked, 3);
    assert_eq!(report.faults.len(), 1);
    assert_eq!(report.faults[0].reducer, "ping");
    assert_eq!(report.faults[0].position, 1);
    assert_eq!(report.faults[0].message, "handler exploded");
    assert_eq!(entries(&log), vec!["before", "after"]);

    // The slot is still usable after a fault.
    assert!(slot.invoke(&ping_ctx(), &Ping {}));
}

#[test]
fn invocation_count_matches_registrations_across_a_sequence() {
    let log = new_log();
    let slot = ReducerSlot::<Ping>::new();
    let a = recording(&log, "a");
    let b = recording(&log, "b");

    slot.on(Arc::clone(&a));
    slot.on(Arc::clone(&b));
    slot.on(Arc::clone(&a));
    assert_eq!(slot.invoke_report(&ping_ctx(), &Ping {}).invoked, 3);

    slot.remove(&a);
    assert_eq!(slot.invoke_report(&ping_ctx(), &Ping {}).invoked, 2);

    slot.remove(&a);
    slot.remove(&b);
    let report = slot.invoke_report(&ping_ctx(), &Ping {});
    assert_eq!(report.invoked, 0);
    assert!(!report.handled());

    assert_eq!(entries(&log), vec!["a", "b", "a", "b", "a"]);
}

// =========================================================================
// Concurrency
// =========================================================================

#[test]
fn subscribe_and_unsubscribe_from_another_thread_while_invoking() {
    const PASSES: usize = 1000;

    let slot = Arc::new(ReducerSlot::<Ping>::new());
    let steady_calls = Arc::new(AtomicUsize::new(0));
    {
        let steady_calls = Arc::clone(&steady_calls);
        slot.on(Arc::new(move |_ctx: &ReducerEventContext| {
            steady_calls.fetch_add(1, Ordering::SeqCst);
        }));
    }

    let done = Arc::new(AtomicBool::new(false));
    let churn = {
        let slot = Arc::clone(&slot);
        let done = Arc::clone(&done);
        thread::spawn(move || {
            let transient: Arc<ContextHandler> = Arc::new(|_ctx: &ReducerEventContext| {});
            while !done.load(Ordering::SeqCst) {
                slot.on(Arc::clone(&transient));
                assert!(slot.remove(&transient));
            }
        })
    };

    for _ in 0..PASSES {
        let report = slot.invoke_report(&ping_ctx(), &Ping {});
        assert!(report.handled());
        assert!((1..=2).contains(&report.invoked));
        assert!(report.faults.is_empty());
    }

    done.store(true, Ordering::SeqCst);
    churn.join().unwrap();

    assert_eq!(steady_calls.load(Ordering::SeqCst), PASSES);
    assert_eq!(slot.handler_count(), 1);
}
