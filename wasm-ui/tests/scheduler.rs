//! Browser tests for the debounced preview scheduler.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::timers::future::TimeoutFuture;
use playground_rs::Session;
use wasm_bindgen_test::*;
use wasm_ui::scheduler::PreviewScheduler;

wasm_bindgen_test_configure!(run_in_browser);

fn plain_session() -> Session {
    Session {
        script_is_typed: false,
        ..Session::default()
    }
}

#[wasm_bindgen_test]
async fn burst_of_edits_collapses_to_one_run() {
    let scheduler = PreviewScheduler::new();
    let runs = Rc::new(RefCell::new(Vec::new()));

    // Five edits inside one quiescence window.
    for i in 0..5 {
        let runs = runs.clone();
        scheduler.schedule(&plain_session(), move |_| runs.borrow_mut().push(i));
    }

    TimeoutFuture::new(400).await;

    // Exactly one run, and it is the latest one.
    assert_eq!(*runs.borrow(), vec![4]);
}

#[wasm_bindgen_test]
async fn typed_script_defers_until_ready() {
    let scheduler = PreviewScheduler::new();
    let session = Session::default(); // typed script by default
    let runs = Rc::new(RefCell::new(0));

    {
        let runs = runs.clone();
        scheduler.schedule(&session, move |_| *runs.borrow_mut() += 1);
    }
    TimeoutFuture::new(400).await;
    assert_eq!(*runs.borrow(), 0, "gated while the compiler is not ready");

    // Readiness arrived; the scheduling effect re-runs and fires once.
    scheduler.mark_ready();
    {
        let runs = runs.clone();
        scheduler.schedule(&session, move |_| *runs.borrow_mut() += 1);
    }
    TimeoutFuture::new(400).await;
    assert_eq!(*runs.borrow(), 1);
}

#[wasm_bindgen_test]
async fn force_bypasses_quiescence_and_supersedes_pending() {
    let scheduler = PreviewScheduler::new();
    let session = plain_session();
    let runs = Rc::new(RefCell::new(Vec::new()));

    {
        let runs = runs.clone();
        scheduler.schedule(&session, move |_| runs.borrow_mut().push("debounced"));
    }
    {
        let runs = runs.clone();
        scheduler.force(&session, move |_| runs.borrow_mut().push("forced"));
    }

    // force ran synchronously, before the window elapsed.
    assert_eq!(*runs.borrow(), vec!["forced"]);

    TimeoutFuture::new(400).await;

    // The pending debounced run was cancelled, not merely delayed.
    assert_eq!(*runs.borrow(), vec!["forced"]);
}

#[wasm_bindgen_test]
async fn force_honors_readiness_gate() {
    let scheduler = PreviewScheduler::new();
    let session = Session::default(); // typed script
    let runs = Rc::new(RefCell::new(0));

    assert!(!scheduler.is_ready());
    {
        let runs = runs.clone();
        scheduler.force(&session, move |_| *runs.borrow_mut() += 1);
    }
    assert_eq!(*runs.borrow(), 0, "forced runs are still gated");

    scheduler.mark_ready();
    assert!(scheduler.is_ready());
    {
        let runs = runs.clone();
        scheduler.force(&session, move |_| *runs.borrow_mut() += 1);
    }
    assert_eq!(*runs.borrow(), 1);
}

#[wasm_bindgen_test]
async fn superseded_ticket_goes_stale() {
    let scheduler = PreviewScheduler::new();
    let session = plain_session();
    let ticket = Rc::new(RefCell::new(None));

    {
        let ticket = ticket.clone();
        scheduler.force(&session, move |t| *ticket.borrow_mut() = Some(t));
    }
    let first = ticket.borrow().unwrap();
    assert!(scheduler.is_current(first));

    // A later rebuild supersedes it; the in-flight result of the first
    // must now be discarded by its is_current check.
    scheduler.force(&session, |_| {});
    assert!(!scheduler.is_current(first));
}
