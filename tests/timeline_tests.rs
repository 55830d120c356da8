// Host-side tests for the self-rescheduling task timeline.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod timeline {
    include!("../src/core/timeline.rs");
}

use timeline::Timeline;

#[test]
fn pops_in_fire_time_order() {
    let mut tl = Timeline::new();
    tl.schedule(3.0, "c");
    tl.schedule(1.0, "a");
    tl.schedule(2.0, "b");

    assert_eq!(tl.next_fire_at(), Some(1.0));
    assert_eq!(tl.pop_due(10.0), Some("a"));
    assert_eq!(tl.pop_due(10.0), Some("b"));
    assert_eq!(tl.pop_due(10.0), Some("c"));
    assert_eq!(tl.pop_due(10.0), None);
    assert!(tl.is_empty());
}

#[test]
fn equal_fire_times_pop_in_scheduling_order() {
    let mut tl = Timeline::new();
    for i in 0..8 {
        tl.schedule(5.0, i);
    }
    for i in 0..8 {
        assert_eq!(tl.pop_due(5.0), Some(i));
    }
}

#[test]
fn nothing_due_before_fire_time() {
    let mut tl = Timeline::new();
    tl.schedule(4.0, ());
    assert_eq!(tl.pop_due(3.999), None);
    assert_eq!(tl.len(), 1);
    // boundary is inclusive
    assert_eq!(tl.pop_due(4.0), Some(()));
}

#[test]
fn rearming_keeps_the_chain_alive() {
    // Simulate a self-rescheduling task with a varying period
    let mut tl = Timeline::new();
    tl.schedule(0.0, ());
    let mut fired_at = Vec::new();
    let mut now = 0.0;
    while now < 10.0 {
        while let Some(()) = tl.pop_due(now) {
            fired_at.push(now);
            tl.schedule(now + 1.0 + 0.5 * (fired_at.len() % 3) as f64, ());
        }
        now += 0.25;
    }
    assert!(fired_at.len() >= 5, "chain stalled: {:?}", fired_at);
    assert_eq!(tl.len(), 1, "exactly one pending entry per chain");
}
