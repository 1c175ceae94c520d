//! Exact lineup search using branch-and-bound.
//!
//! The search fills one roster slot per level, depth first, trying the
//! highest projected candidates first so that good lineups are found early.
//! A node is cut when
//!
//! - a constraint can no longer hold whatever the open slots pick, or
//! - the objective bound cannot beat the incumbent lineup.
//!
//! Ties on points go to the cheaper lineup, then to the lexically smaller
//! sorted list of player identifiers, so every run on the same input returns
//! the same lineup.
//!
//! # Example
//!
//! ```
//! use courtside_core::{PlayerPool, PlayerRecord, RosterSlot, RosterSpec};
//! use courtside_solver::model::{ConstraintModel, ModelRules};
//! use courtside_solver::search::{BranchAndBound, SolveOutcome};
//!
//! let pool = PlayerPool::try_from_records(vec![
//!     PlayerRecord::new("a", "A", "BOS", &["PG"], 8_000, 50.0),
//!     PlayerRecord::new("b", "B", "NYK", &["SG"], 7_000, 45.0),
//!     PlayerRecord::new("c", "C", "NYK", &["PG", "SG"], 4_000, 20.0),
//! ]).unwrap();
//! let roster = RosterSpec::new(vec![
//!     RosterSlot::of("PG", &["PG"]).unwrap(),
//!     RosterSlot::of("SG", &["SG"]).unwrap(),
//! ]).unwrap();
//! let model = ConstraintModel::build(&pool, &roster, &ModelRules::new(15_000)).unwrap();
//!
//! let result = BranchAndBound::new().solve(&model).unwrap();
//! let SolveOutcome::Optimal(lineup) = result.outcome else { panic!("expected optimum") };
//! assert_eq!(lineup.player_ids(), vec!["a", "b"]);
//! assert_eq!(lineup.total_salary(), 15_000);
//! ```

mod bounder;
mod plan;

use std::cmp::Ordering;
use std::fmt;

use courtside_core::{Lineup, Player, SlotAssignment};
use tracing::debug;

use crate::error::OptimizerError;
use crate::model::ConstraintModel;
use crate::scope::SearchScope;
use crate::stats::SearchStats;
use crate::termination::{NoTermination, Termination};

pub use bounder::{
    BestCandidateBounder, DefaultBounder, DensityBounder, Frontier, ObjectiveBounder,
};
pub use plan::{Candidate, SlotCandidates};

use plan::SearchPlan;

/// Result of a single solve.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveOutcome {
    /// The search completed; no better lineup exists.
    Optimal(Lineup),
    /// The search was cut short; this is the best lineup found.
    Feasible(Lineup),
    /// The search completed and no lineup satisfies the constraints.
    Infeasible,
    /// The search was cut short before any lineup was found.
    Unknown,
}

impl SolveOutcome {
    pub fn lineup(&self) -> Option<&Lineup> {
        match self {
            SolveOutcome::Optimal(l) | SolveOutcome::Feasible(l) => Some(l),
            SolveOutcome::Infeasible | SolveOutcome::Unknown => None,
        }
    }

    pub fn into_lineup(self) -> Option<Lineup> {
        match self {
            SolveOutcome::Optimal(l) | SolveOutcome::Feasible(l) => Some(l),
            SolveOutcome::Infeasible | SolveOutcome::Unknown => None,
        }
    }

    /// True if the search ran to completion.
    pub fn is_complete(&self) -> bool {
        matches!(self, SolveOutcome::Optimal(_) | SolveOutcome::Infeasible)
    }
}

impl fmt::Display for SolveOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveOutcome::Optimal(l) => write!(f, "Optimal({})", l.score()),
            SolveOutcome::Feasible(l) => write!(f, "Feasible({})", l.score()),
            SolveOutcome::Infeasible => write!(f, "Infeasible"),
            SolveOutcome::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Outcome and statistics of a solve.
#[derive(Debug, Clone)]
pub struct SolveResult {
    pub outcome: SolveOutcome,
    pub stats: SearchStats,
}

/// Depth-first branch-and-bound over a [`ConstraintModel`].
///
/// Without a termination condition the search always runs to a proof of
/// optimality or infeasibility.
#[derive(Debug, Clone)]
pub struct BranchAndBound<T = NoTermination, B = DefaultBounder> {
    termination: T,
    bounder: B,
}

impl BranchAndBound {
    pub fn new() -> Self {
        Self {
            termination: NoTermination,
            bounder: DefaultBounder::default(),
        }
    }
}

impl Default for BranchAndBound {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Termination, B: ObjectiveBounder> BranchAndBound<T, B> {
    /// Replaces the termination condition.
    pub fn with_termination<T2: Termination>(self, termination: T2) -> BranchAndBound<T2, B> {
        BranchAndBound {
            termination,
            bounder: self.bounder,
        }
    }

    /// Replaces the objective bounder.
    pub fn with_bounder<B2: ObjectiveBounder>(self, bounder: B2) -> BranchAndBound<T, B2> {
        BranchAndBound {
            termination: self.termination,
            bounder,
        }
    }

    /// Finds the best lineup the model admits.
    ///
    /// # Errors
    ///
    /// Returns [`OptimizerError::Internal`] if the lineup found fails the
    /// model's own constraint check.
    pub fn solve(&self, model: &ConstraintModel<'_>) -> Result<SolveResult, OptimizerError> {
        let plan = SearchPlan::new(model);
        let player_ids: Vec<&str> = model.pool().iter().map(Player::id).collect();
        let mut search = Search {
            plan: &plan,
            player_ids: &player_ids,
            termination: &self.termination,
            bounder: &self.bounder,
            scope: SearchScope::new(),
            activity: vec![0; plan.rhs.len()],
            used: vec![false; model.pool().len()],
            chosen: vec![0; plan.slots.len()],
            points: 0,
            salary: 0,
            best: None,
            aborted: false,
        };
        search.scope.start_solving();
        if plan.root_feasible() {
            search.explore(0);
        }

        let aborted = search.aborted;
        let best = search.best.take();
        let stats = search.scope.into_stats();

        let outcome = match best {
            Some(incumbent) => {
                let lineup = build_lineup(model, &incumbent.vars, !aborted)?;
                if aborted {
                    SolveOutcome::Feasible(lineup)
                } else {
                    SolveOutcome::Optimal(lineup)
                }
            }
            None if aborted => SolveOutcome::Unknown,
            None => SolveOutcome::Infeasible,
        };

        debug!(
            event = "search_end",
            outcome = %outcome,
            nodes = stats.nodes_explored,
            pruned = stats.nodes_pruned,
            rejected = stats.placements_rejected,
            incumbents = stats.incumbents_found,
            duration_ms = stats.elapsed().as_millis() as u64,
        );

        Ok(SolveResult { outcome, stats })
    }
}

/// Best complete lineup found so far.
#[derive(Debug, Clone)]
struct Incumbent<'s> {
    vars: Vec<usize>,
    points: i64,
    salary: i64,
    ids: Vec<&'s str>,
}

struct Search<'s, T, B> {
    plan: &'s SearchPlan,
    player_ids: &'s [&'s str],
    termination: &'s T,
    bounder: &'s B,
    scope: SearchScope,
    activity: Vec<i64>,
    used: Vec<bool>,
    /// Candidate position chosen per depth.
    chosen: Vec<usize>,
    points: i64,
    salary: i64,
    best: Option<Incumbent<'s>>,
    aborted: bool,
}

impl<'s, T: Termination, B: ObjectiveBounder> Search<'s, T, B> {
    fn explore(&mut self, depth: usize) {
        if self.termination.is_terminated(&self.scope) {
            self.aborted = true;
            return;
        }
        self.scope.stats_mut().record_node();

        let plan = self.plan;
        if depth == plan.slots.len() {
            self.evaluate_leaf();
            return;
        }
        if !self.promising(depth) {
            self.scope.stats_mut().record_prune();
            return;
        }

        let slot = &plan.slots[depth];
        let start = slot.twin_of.map_or(0, |twin| self.chosen[twin] + 1);
        for pos in start..slot.candidates.len() {
            let cand = slot.candidates[pos];
            if self.used[cand.player] {
                continue;
            }
            if !plan.fits(cand.var, &self.activity, depth + 1) {
                self.scope.stats_mut().record_rejection();
                continue;
            }

            self.apply(cand, depth, pos);
            if plan.reachable(&self.activity, depth + 1) {
                self.explore(depth + 1);
            } else {
                self.scope.stats_mut().record_rejection();
            }
            self.undo(cand);

            if self.aborted {
                return;
            }
        }
    }

    fn promising(&self, depth: usize) -> bool {
        let frontier = Frontier {
            slots: &self.plan.slots,
            depth,
            budget: self.plan.rhs[self.plan.cap] - self.activity[self.plan.cap],
            used: &self.used,
        };
        let Some(rest) = self.bounder.optimistic_bound(&frontier) else {
            return false;
        };
        match &self.best {
            None => true,
            Some(best) => {
                let bound = self.points.saturating_add(rest);
                match bound.cmp(&best.points) {
                    Ordering::Greater => true,
                    Ordering::Less => false,
                    // Only a lineup at most as expensive can still win the tie.
                    Ordering::Equal => {
                        self.salary + self.plan.min_rest_salary(depth) <= best.salary
                    }
                }
            }
        }
    }

    fn apply(&mut self, cand: Candidate, depth: usize, pos: usize) {
        for &(c, coef) in &self.plan.var_terms[cand.var] {
            self.activity[c] += coef;
        }
        self.used[cand.player] = true;
        self.chosen[depth] = pos;
        self.points += cand.points;
        self.salary += cand.salary;
    }

    fn undo(&mut self, cand: Candidate) {
        for &(c, coef) in &self.plan.var_terms[cand.var] {
            self.activity[c] -= coef;
        }
        self.used[cand.player] = false;
        self.points -= cand.points;
        self.salary -= cand.salary;
    }

    fn evaluate_leaf(&mut self) {
        self.scope.stats_mut().record_leaf();
        let better = match &self.best {
            None => true,
            Some(best) => match self.points.cmp(&best.points) {
                Ordering::Greater => true,
                Ordering::Less => false,
                Ordering::Equal => match self.salary.cmp(&best.salary) {
                    Ordering::Less => true,
                    Ordering::Greater => false,
                    Ordering::Equal => self.current_ids() < best.ids,
                },
            },
        };
        if !better {
            return;
        }

        let vars = self.current_vars();
        let ids = self.current_ids();
        self.best = Some(Incumbent {
            vars,
            points: self.points,
            salary: self.salary,
            ids,
        });
        self.scope.set_has_incumbent();
        self.scope.stats_mut().record_incumbent();
        debug!(
            event = "incumbent",
            points_milli = self.points,
            salary = self.salary,
            nodes = self.scope.nodes_explored(),
        );
    }

    fn current_vars(&self) -> Vec<usize> {
        self.plan
            .slots
            .iter()
            .zip(&self.chosen)
            .map(|(slot, &pos)| slot.candidates[pos].var)
            .collect()
    }

    /// Identifiers of the current lineup, sorted.
    fn current_ids(&self) -> Vec<&'s str> {
        let mut ids: Vec<&'s str> = self
            .plan
            .slots
            .iter()
            .zip(&self.chosen)
            .map(|(slot, &pos)| self.player_ids[slot.candidates[pos].player])
            .collect();
        ids.sort_unstable();
        ids
    }
}

fn build_lineup(
    model: &ConstraintModel<'_>,
    vars: &[usize],
    certified: bool,
) -> Result<Lineup, OptimizerError> {
    let violations = model.evaluate(vars);
    if let Some(first) = violations.first() {
        return Err(OptimizerError::Internal(format!(
            "search produced a lineup breaking {} constraint(s), first: {}",
            violations.len(),
            first
        )));
    }
    let mut by_slot: Vec<(usize, usize)> = vars
        .iter()
        .map(|&v| (model.variables()[v].slot, v))
        .collect();
    by_slot.sort_unstable();
    let roster = model.roster();
    let assignments = by_slot
        .into_iter()
        .map(|(slot, var)| {
            SlotAssignment::new(roster.slots()[slot].label(), model.player_of(var).clone())
        })
        .collect();
    Ok(Lineup::new(assignments, certified))
}

#[cfg(test)]
mod tests;
