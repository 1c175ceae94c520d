//! Search plan: the model flattened into the tables the search walks.

use smallvec::SmallVec;

use crate::model::{ConstraintKind, ConstraintModel, Sense};

/// A variable as seen from the slot it fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    /// Model variable index.
    pub var: usize,
    /// Pool index of the player.
    pub player: usize,
    /// Objective coefficient in milli-points.
    pub points: i64,
    pub salary: i64,
}

/// Candidates for one roster slot, best first.
#[derive(Debug, Clone)]
pub struct SlotCandidates {
    /// Roster index of the slot.
    pub slot: usize,
    /// Sorted by points descending, then salary ascending, then player id.
    pub candidates: Vec<Candidate>,
    /// Search depth of an earlier slot with the same candidate players.
    ///
    /// Filling two such slots with players `x, y` or `y, x` gives the same
    /// lineup, so the later slot only takes candidates after the earlier
    /// slot's choice.
    pub twin_of: Option<usize>,
    /// Largest points-per-salary ratio among the candidates.
    pub max_density: f64,
}

/// Precomputed search tables for one model.
#[derive(Debug, Clone)]
pub(crate) struct SearchPlan {
    /// Slots in search order: fewest candidates first, ties by roster index.
    pub slots: Vec<SlotCandidates>,
    /// `(constraint, coefficient)` pairs per variable.
    pub var_terms: Vec<SmallVec<[(usize, i64); 8]>>,
    pub senses: Vec<Sense>,
    pub rhs: Vec<i64>,
    /// Constraints with a lower bound, checked at every node.
    pub lower: Vec<usize>,
    /// Per depth and constraint, the least activity the slots from that
    /// depth on must add. Length `slots.len() + 1`.
    pub min_rest: Vec<Vec<i64>>,
    /// Per depth and constraint, the most activity the slots from that
    /// depth on can add.
    pub max_rest: Vec<Vec<i64>>,
    /// Index of the salary cap constraint.
    pub cap: usize,
}

impl SearchPlan {
    pub fn new(model: &ConstraintModel<'_>) -> Self {
        let pool = model.pool();
        let constraints = model.constraints();
        let n_constraints = constraints.len();

        let mut var_terms: Vec<SmallVec<[(usize, i64); 8]>> =
            vec![SmallVec::new(); model.variables().len()];
        for (c, constraint) in constraints.iter().enumerate() {
            for &(var, coef) in &constraint.terms {
                var_terms[var].push((c, coef));
            }
        }

        let cap = constraints
            .iter()
            .position(|c| c.kind == ConstraintKind::SalaryCap)
            .unwrap_or(0);

        let mut slots: Vec<SlotCandidates> = (0..model.roster().len())
            .map(|slot| {
                let mut candidates: Vec<Candidate> = model
                    .slot_variables(slot)
                    .iter()
                    .map(|&var| {
                        let player = model.variables()[var].player;
                        Candidate {
                            var,
                            player,
                            points: model.objective()[var],
                            salary: i64::from(pool.players()[player].salary()),
                        }
                    })
                    .collect();
                candidates.sort_by(|a, b| {
                    b.points
                        .cmp(&a.points)
                        .then(a.salary.cmp(&b.salary))
                        .then_with(|| {
                            pool.players()[a.player]
                                .id()
                                .cmp(pool.players()[b.player].id())
                        })
                });
                let max_density = candidates
                    .iter()
                    .map(|c| c.points.max(0) as f64 / c.salary.max(1) as f64)
                    .fold(0.0, f64::max);
                SlotCandidates {
                    slot,
                    candidates,
                    twin_of: None,
                    max_density,
                }
            })
            .collect();
        slots.sort_by_key(|s| (s.candidates.len(), s.slot));

        for depth in 0..slots.len() {
            let twin = (0..depth).rev().find(|&earlier| {
                slots[earlier].candidates.len() == slots[depth].candidates.len()
                    && slots[earlier]
                        .candidates
                        .iter()
                        .zip(&slots[depth].candidates)
                        .all(|(a, b)| a.player == b.player)
            });
            slots[depth].twin_of = twin;
        }

        let depth_count = slots.len();
        let mut min_rest = vec![vec![0i64; n_constraints]; depth_count + 1];
        let mut max_rest = vec![vec![0i64; n_constraints]; depth_count + 1];
        let mut slot_min = vec![0i64; n_constraints];
        let mut slot_max = vec![0i64; n_constraints];
        let mut slot_hits = vec![0usize; n_constraints];
        for depth in (0..depth_count).rev() {
            slot_min.iter_mut().for_each(|v| *v = i64::MAX);
            slot_max.iter_mut().for_each(|v| *v = 0);
            slot_hits.iter_mut().for_each(|v| *v = 0);
            let candidates = &slots[depth].candidates;
            for cand in candidates {
                for &(c, coef) in &var_terms[cand.var] {
                    slot_min[c] = slot_min[c].min(coef);
                    slot_max[c] = slot_max[c].max(coef);
                    slot_hits[c] += 1;
                }
            }
            for c in 0..n_constraints {
                // A candidate outside the constraint contributes zero.
                let least = if slot_hits[c] == candidates.len() && slot_hits[c] > 0 {
                    slot_min[c]
                } else {
                    0
                };
                min_rest[depth][c] = min_rest[depth + 1][c].saturating_add(least);
                max_rest[depth][c] = max_rest[depth + 1][c].saturating_add(slot_max[c]);
            }
        }

        Self {
            slots,
            var_terms,
            senses: constraints.iter().map(|c| c.sense).collect(),
            rhs: constraints.iter().map(|c| c.rhs).collect(),
            lower: (0..n_constraints)
                .filter(|&c| constraints[c].sense.bounds_below())
                .collect(),
            min_rest,
            max_rest,
            cap,
        }
    }

    /// True if selecting `var` keeps every upper-bounded constraint it
    /// touches satisfiable by the slots from `next_depth` on.
    #[inline]
    pub fn fits(&self, var: usize, activity: &[i64], next_depth: usize) -> bool {
        let rest = &self.min_rest[next_depth];
        self.var_terms[var].iter().all(|&(c, coef)| {
            !self.senses[c].bounds_above() || activity[c] + coef + rest[c] <= self.rhs[c]
        })
    }

    /// True if every lower-bounded constraint can still be reached.
    #[inline]
    pub fn reachable(&self, activity: &[i64], depth: usize) -> bool {
        let rest = &self.max_rest[depth];
        self.lower
            .iter()
            .all(|&c| activity[c].saturating_add(rest[c]) >= self.rhs[c])
    }

    /// True if the empty assignment can still be completed.
    pub fn root_feasible(&self) -> bool {
        let zero = vec![0i64; self.rhs.len()];
        let upper_ok = (0..self.rhs.len())
            .all(|c| !self.senses[c].bounds_above() || self.min_rest[0][c] <= self.rhs[c]);
        upper_ok && self.reachable(&zero, 0)
    }

    /// Least salary the slots from `depth` on must add.
    #[inline]
    pub fn min_rest_salary(&self, depth: usize) -> i64 {
        self.min_rest[depth][self.cap]
    }
}
