//! Tests for termination conditions.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::*;

fn scope_with_nodes(n: u64) -> SearchScope {
    let mut scope = SearchScope::new();
    scope.start_solving();
    for _ in 0..n {
        scope.stats_mut().record_node();
    }
    scope
}

#[test]
fn test_no_termination() {
    let scope = scope_with_nodes(1_000);
    assert!(!NoTermination.is_terminated(&scope));
    assert!(!None::<NodeCountTermination>.is_terminated(&scope));
}

#[test]
fn test_node_count_termination() {
    let term = NodeCountTermination::new(3);
    assert!(!term.is_terminated(&scope_with_nodes(2)));
    assert!(term.is_terminated(&scope_with_nodes(3)));
}

#[test]
fn test_time_termination() {
    let scope = scope_with_nodes(0);
    assert!(TimeTermination::millis(0).is_terminated(&scope));
    assert!(!TimeTermination::seconds(3_600).is_terminated(&scope));
}

#[test]
fn test_external_termination() {
    let flag = Arc::new(AtomicBool::new(false));
    let term = ExternalTermination::new(flag.clone());
    let scope = scope_with_nodes(0);
    assert!(!term.is_terminated(&scope));
    flag.store(true, Ordering::SeqCst);
    assert!(term.is_terminated(&scope));
}

#[test]
fn test_deadline_termination() {
    let scope = scope_with_nodes(0);
    assert!(DeadlineTermination::at(Instant::now()).is_terminated(&scope));
    assert!(!DeadlineTermination::after(Duration::from_secs(3_600)).is_terminated(&scope));
}

#[test]
fn test_or_termination() {
    let term = OrTermination((NodeCountTermination::new(10), NoTermination));
    assert!(!term.is_terminated(&scope_with_nodes(5)));
    assert!(term.is_terminated(&scope_with_nodes(10)));
}

#[test]
fn test_standard_from_config() {
    let config = TerminationConfig {
        node_limit: Some(4),
        ..Default::default()
    };
    let term = StandardTermination::from_config(Some(&config));
    assert!(term.is_terminated(&scope_with_nodes(4)));

    let unbounded = StandardTermination::from_config(None);
    assert!(!unbounded.is_terminated(&scope_with_nodes(1_000_000)));
}

#[test]
fn test_standard_with_external() {
    let flag = Arc::new(AtomicBool::new(true));
    let term = StandardTermination::default().with_external(ExternalTermination::new(flag));
    assert!(term.is_terminated(&scope_with_nodes(0)));
}
