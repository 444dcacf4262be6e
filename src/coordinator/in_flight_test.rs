use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use super::*;

fn counter_callback(counter: &Arc<AtomicUsize>) -> crate::DeferredCallback {
    let counter = Arc::clone(counter);
    Box::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    })
}

#[test]
fn counter_tracks_begin_finish_pairs() {
    let mut tracker = InFlightTracker::new();
    assert_eq!(tracker.in_flight(), 0);

    tracker.begin();
    tracker.begin();
    assert_eq!(tracker.in_flight(), 2);

    tracker.finish();
    assert_eq!(tracker.in_flight(), 1);
    tracker.finish();
    assert_eq!(tracker.in_flight(), 0);
}

#[test]
fn pending_flag_flips_once_per_crossing() {
    let mut tracker = InFlightTracker::new();
    let rx = tracker.subscribe();
    assert!(!*rx.borrow());

    tracker.begin();
    assert!(*rx.borrow());
    tracker.begin();
    assert!(*rx.borrow());

    tracker.finish();
    assert!(*rx.borrow());
    tracker.finish();
    assert!(!*rx.borrow());

    // A second cycle flips it again
    tracker.begin();
    assert!(*rx.borrow());
    tracker.finish();
    assert!(!*rx.borrow());
}

#[test]
fn waiters_fire_once_after_the_last_outstanding_refresh() {
    let mut tracker = InFlightTracker::new();
    let fired = Arc::new(AtomicUsize::new(0));

    tracker.begin();
    tracker.begin();
    tracker.wait_for_idle(counter_callback(&fired));
    tracker.wait_for_idle(counter_callback(&fired));

    tracker.finish();
    assert_eq!(fired.load(Ordering::SeqCst), 0);

    tracker.finish();
    assert_eq!(fired.load(Ordering::SeqCst), 2);
}

#[test]
fn idle_waiter_runs_immediately() {
    let mut tracker = InFlightTracker::new();
    let fired = Arc::new(AtomicUsize::new(0));

    tracker.wait_for_idle(counter_callback(&fired));
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[test]
fn waiter_queue_refills_after_a_crossing() {
    let mut tracker = InFlightTracker::new();
    let fired = Arc::new(AtomicUsize::new(0));

    tracker.begin();
    tracker.wait_for_idle(counter_callback(&fired));
    tracker.finish();
    assert_eq!(fired.load(Ordering::SeqCst), 1);

    tracker.begin();
    tracker.wait_for_idle(counter_callback(&fired));
    assert_eq!(fired.load(Ordering::SeqCst), 1);
    tracker.finish();
    assert_eq!(fired.load(Ordering::SeqCst), 2);
}
