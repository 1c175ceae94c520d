//! Lineup validity checks.

use std::collections::HashSet;

use courtside_core::{Lineup, RosterSpec};

/// Asserts that a lineup fills every slot of `roster` in order with a
/// distinct eligible player and stays within `salary_cap`.
///
/// # Panics
///
/// Panics with a description of the first broken rule.
pub fn assert_valid_lineup(lineup: &Lineup, roster: &RosterSpec, salary_cap: u64) {
    let assignments = lineup.assignments();
    assert_eq!(
        assignments.len(),
        roster.len(),
        "lineup fills {} of {} slots",
        assignments.len(),
        roster.len()
    );

    let mut seen = HashSet::new();
    for (assignment, slot) in assignments.iter().zip(roster.slots()) {
        assert_eq!(assignment.slot(), slot.label(), "slots out of roster order");
        assert!(
            slot.accepts_player(assignment.player()),
            "{} is not eligible for {}",
            assignment.player().id(),
            slot
        );
        assert!(
            seen.insert(assignment.player().id()),
            "{} appears twice",
            assignment.player().id()
        );
    }

    let salary: u64 = lineup.players().map(|p| u64::from(p.salary())).sum();
    assert_eq!(salary, lineup.total_salary());
    assert!(
        salary <= salary_cap,
        "salary {} exceeds cap {}",
        salary,
        salary_cap
    );
}
