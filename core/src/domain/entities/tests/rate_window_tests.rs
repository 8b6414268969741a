//! Unit tests for the sliding-window counter

use std::time::Duration;

use vg_shared::config::SlidingWindowConfig;

use crate::domain::entities::rate_window::*;

#[test]
fn test_admits_up_to_threshold() {
    let window = RateWindow::new("sms-limiter", Duration::from_millis(1000), 3);
    let mut counter = RateWindowCounter::new();

    assert!(counter.admit(0, &window));
    assert!(counter.admit(10, &window));
    assert!(counter.admit(20, &window));
    assert!(!counter.admit(30, &window));
    assert_eq!(counter.len(), 3);
}

#[test]
fn test_window_slides() {
    let window = RateWindow::new("sms-limiter", Duration::from_millis(1000), 2);
    let mut counter = RateWindowCounter::new();

    assert!(counter.admit(5_000, &window));
    assert!(counter.admit(5_500, &window));
    assert!(!counter.admit(5_999, &window));
    // The first event leaves the window once it is older than one window
    assert!(!counter.admit(6_000, &window));
    assert!(counter.admit(6_001, &window));
    assert!(!counter.admit(6_500, &window));
    assert!(counter.admit(6_501, &window));
}

#[test]
fn test_event_on_window_edge_still_counts() {
    let window = RateWindow::new("sms-limiter", Duration::from_millis(1000), 2);
    let mut counter = RateWindowCounter::new();

    assert!(counter.admit(0, &window));
    assert!(counter.admit(600, &window));
    // [0, 1000] already holds two events
    assert!(!counter.admit(1_000, &window));
    assert_eq!(counter.len(), 2);
}

#[test]
fn test_prune_keeps_closed_window() {
    let window = RateWindow::new("k", Duration::from_millis(100), 5);
    let mut counter = RateWindowCounter::new();
    counter.admit(0, &window);
    counter.admit(50, &window);

    counter.prune(150, &window);
    assert_eq!(counter.len(), 1);
    counter.prune(151, &window);
    assert!(counter.is_empty());
}

#[test]
fn test_denials_are_not_recorded() {
    let window = RateWindow::new("k", Duration::from_millis(100), 1);
    let mut counter = RateWindowCounter::new();

    assert!(counter.admit(0, &window));
    for t in 1..50 {
        assert!(!counter.admit(t, &window));
    }
    assert_eq!(counter.len(), 1);
    assert!(!counter.admit(100, &window));
    assert!(counter.admit(101, &window));
}

#[test]
fn test_from_config() {
    let window = RateWindow::from(&SlidingWindowConfig::default());
    assert_eq!(window.key, "sms-limiter");
    assert_eq!(window.window_ms(), 1000);
    assert_eq!(window.threshold, 10);
}
