//! Objective bounders for branch-and-bound pruning.
//!
//! A bounder estimates the most points the unassigned slots of a partial
//! lineup can still add. The estimate must never be below what any
//! completion actually achieves, or the search loses optimal lineups.

use std::fmt::Debug;

use super::plan::SlotCandidates;

/// The unassigned part of a partial lineup.
#[derive(Debug, Clone, Copy)]
pub struct Frontier<'s> {
    /// Slots in search order; those at `depth..` are still open.
    pub slots: &'s [SlotCandidates],
    /// Number of slots already filled.
    pub depth: usize,
    /// Salary left under the cap.
    pub budget: i64,
    /// Players already in the partial lineup, by pool index.
    pub used: &'s [bool],
}

impl<'s> Frontier<'s> {
    /// Open slots in search order.
    pub fn open_slots(&self) -> &'s [SlotCandidates] {
        &self.slots[self.depth..]
    }
}

/// Calculates optimistic bounds on the points still to be added.
pub trait ObjectiveBounder: Send + Debug {
    /// Returns an upper bound on the milli-points the open slots can add,
    /// or `None` if the open slots cannot be filled at all.
    fn optimistic_bound(&self, frontier: &Frontier<'_>) -> Option<i64>;
}

/// Bounds each open slot by its best unused candidate within budget.
///
/// Ignores that two open slots may pick the same player and that their
/// salaries add up, so the bound is optimistic.
#[derive(Debug, Clone, Copy, Default)]
pub struct BestCandidateBounder;

impl ObjectiveBounder for BestCandidateBounder {
    fn optimistic_bound(&self, frontier: &Frontier<'_>) -> Option<i64> {
        let mut total = 0i64;
        for slot in frontier.open_slots() {
            // Candidates are sorted by points, so the first fit is the best.
            let best = slot
                .candidates
                .iter()
                .find(|c| !frontier.used[c.player] && c.salary <= frontier.budget)?;
            total += best.points;
        }
        Some(total)
    }
}

/// Bounds the open slots by the best points-per-salary ratio times the
/// remaining budget.
///
/// Tight when the cap binds, which is the usual case for salary-capped
/// contests.
#[derive(Debug, Clone, Copy, Default)]
pub struct DensityBounder;

impl ObjectiveBounder for DensityBounder {
    fn optimistic_bound(&self, frontier: &Frontier<'_>) -> Option<i64> {
        let open = frontier.open_slots();
        if open.is_empty() {
            return Some(0);
        }
        let density = open.iter().map(|s| s.max_density).fold(0.0, f64::max);
        // Float-to-int casts saturate.
        Some((density * frontier.budget.max(0) as f64).ceil() as i64)
    }
}

/// Takes the tighter of two bounds.
impl<A: ObjectiveBounder, B: ObjectiveBounder> ObjectiveBounder for (A, B) {
    fn optimistic_bound(&self, frontier: &Frontier<'_>) -> Option<i64> {
        let a = self.0.optimistic_bound(frontier)?;
        let b = self.1.optimistic_bound(frontier)?;
        Some(a.min(b))
    }
}

/// The bounder used unless another is configured.
pub type DefaultBounder = (BestCandidateBounder, DensityBounder);
