//! Declarative 0/1 lineup model.
//!
//! The model has one binary variable per eligible (player, slot) pair and a
//! list of linear constraints over those variables. It says nothing about
//! how it is solved; the branch-and-bound in [`crate::search`] is one
//! consumer, [`ConstraintModel::evaluate`] is another.
//!
//! All constraint coefficients are non-negative. The search relies on this
//! when it bounds the contribution of unassigned slots.

mod precheck;

use std::collections::{HashMap, HashSet};
use std::fmt;

use courtside_config::OptimizerConfig;
use courtside_core::{
    to_milli_points, InfeasibleModelError, Lineup, Player, PlayerPool, RosterSpec,
    ValidationError,
};

use crate::error::OptimizerError;

/// Player rules and salary limits applied to every lineup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRules {
    /// Ceiling on total salary.
    pub salary_cap: u64,
    /// Floor on total salary.
    pub min_salary: Option<u64>,
    /// Maximum players from one team.
    pub max_per_team: Option<usize>,
    /// Players every lineup must contain.
    pub locked: Vec<String>,
    /// Players no lineup may contain.
    pub excluded: Vec<String>,
    /// Minimum players a lineup must not share with each prior lineup.
    pub min_unique: usize,
}

impl ModelRules {
    /// Creates rules with only a salary cap.
    pub fn new(salary_cap: u64) -> Self {
        Self {
            salary_cap,
            min_salary: None,
            max_per_team: None,
            locked: Vec::new(),
            excluded: Vec::new(),
            min_unique: 1,
        }
    }

    /// Extracts the rules from an optimizer configuration.
    pub fn from_config(config: &OptimizerConfig) -> Self {
        Self {
            salary_cap: config.contest.salary_cap,
            min_salary: config.contest.min_salary,
            max_per_team: config.rules.max_per_team,
            locked: config.rules.locked.clone(),
            excluded: config.rules.excluded.clone(),
            min_unique: config.generation.min_unique,
        }
    }

    pub fn with_min_salary(mut self, floor: u64) -> Self {
        self.min_salary = Some(floor);
        self
    }

    pub fn with_max_per_team(mut self, max: usize) -> Self {
        self.max_per_team = Some(max);
        self
    }

    pub fn with_locked(mut self, id: impl Into<String>) -> Self {
        self.locked.push(id.into());
        self
    }

    pub fn with_excluded(mut self, id: impl Into<String>) -> Self {
        self.excluded.push(id.into());
        self
    }

    pub fn with_min_unique(mut self, min_unique: usize) -> Self {
        self.min_unique = min_unique;
        self
    }
}

/// A binary selection variable: `player` fills `slot`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Variable {
    /// Pool index of the player.
    pub player: usize,
    /// Roster index of the slot.
    pub slot: usize,
}

/// Relation between a constraint's activity and its right-hand side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    /// activity ≤ rhs
    AtMost,
    /// activity = rhs
    Exactly,
    /// activity ≥ rhs
    AtLeast,
}

impl Sense {
    /// True if the constraint caps its activity from above.
    #[inline]
    pub fn bounds_above(self) -> bool {
        matches!(self, Sense::AtMost | Sense::Exactly)
    }

    /// True if the constraint requires a minimum activity.
    #[inline]
    pub fn bounds_below(self) -> bool {
        matches!(self, Sense::AtLeast | Sense::Exactly)
    }
}

impl fmt::Display for Sense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sense::AtMost => write!(f, "<="),
            Sense::Exactly => write!(f, "="),
            Sense::AtLeast => write!(f, ">="),
        }
    }
}

/// What a constraint encodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintKind {
    /// The slot is filled by exactly one player.
    SlotFill { slot: usize },
    /// The player fills at most one slot.
    PlayerOnce { player: usize },
    /// Total salary stays within the cap.
    SalaryCap,
    /// Total salary reaches the floor.
    SalaryFloor,
    /// At most `max_per_team` players from the team.
    TeamLimit { team: String },
    /// The player must be in the lineup.
    Locked { player: usize },
    /// The lineup differs from prior lineup `prior` in enough players.
    Distinct { prior: usize },
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintKind::SlotFill { slot } => write!(f, "slot_fill[{}]", slot),
            ConstraintKind::PlayerOnce { player } => write!(f, "player_once[{}]", player),
            ConstraintKind::SalaryCap => write!(f, "salary_cap"),
            ConstraintKind::SalaryFloor => write!(f, "salary_floor"),
            ConstraintKind::TeamLimit { team } => write!(f, "team_limit[{}]", team),
            ConstraintKind::Locked { player } => write!(f, "locked[{}]", player),
            ConstraintKind::Distinct { prior } => write!(f, "distinct[{}]", prior),
        }
    }
}

/// A linear constraint `Σ coef·x  (sense)  rhs` over selection variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    pub kind: ConstraintKind,
    /// `(variable index, coefficient)` pairs; coefficients are non-negative.
    pub terms: Vec<(usize, i64)>,
    pub sense: Sense,
    pub rhs: i64,
}

impl Constraint {
    /// Computes the activity for a selection given as a 0/1 mask.
    pub fn activity(&self, selected: &[bool]) -> i64 {
        self.terms
            .iter()
            .filter(|(var, _)| selected[*var])
            .map(|(_, coef)| *coef)
            .sum()
    }

    /// Returns true if the activity satisfies the constraint.
    pub fn holds(&self, activity: i64) -> bool {
        match self.sense {
            Sense::AtMost => activity <= self.rhs,
            Sense::Exactly => activity == self.rhs,
            Sense::AtLeast => activity >= self.rhs,
        }
    }
}

/// A constraint broken by a selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub kind: ConstraintKind,
    pub activity: i64,
    pub sense: Sense,
    pub rhs: i64,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} {} {} does not hold",
            self.kind, self.activity, self.sense, self.rhs
        )
    }
}

/// The lineup problem as a 0/1 linear program.
///
/// Borrows the pool and roster read-only for its whole lifetime.
///
/// # Examples
///
/// ```
/// use courtside_core::{PlayerPool, PlayerRecord, RosterSlot, RosterSpec};
/// use courtside_solver::model::{ConstraintModel, ModelRules};
///
/// let pool = PlayerPool::try_from_records(vec![
///     PlayerRecord::new("a", "A", "BOS", &["PG"], 8_000, 50.0),
///     PlayerRecord::new("b", "B", "NYK", &["SG"], 7_000, 45.0),
///     PlayerRecord::new("c", "C", "NYK", &["PG/SG"], 4_000, 20.0),
/// ]).unwrap();
/// let roster = RosterSpec::new(vec![
///     RosterSlot::of("PG", &["PG"]).unwrap(),
///     RosterSlot::of("SG", &["SG"]).unwrap(),
/// ]).unwrap();
///
/// let model = ConstraintModel::build(&pool, &roster, &ModelRules::new(15_000)).unwrap();
/// assert_eq!(model.variables().len(), 4); // a-PG, b-SG, c-PG, c-SG
/// model.precheck().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ConstraintModel<'a> {
    pool: &'a PlayerPool,
    roster: &'a RosterSpec,
    rules: ModelRules,
    variables: Vec<Variable>,
    objective: Vec<i64>,
    constraints: Vec<Constraint>,
    slot_vars: Vec<Vec<usize>>,
    player_vars: Vec<Vec<usize>>,
    locked: Vec<usize>,
    excluded: Vec<bool>,
    prior_count: usize,
}

impl<'a> ConstraintModel<'a> {
    /// Builds the model for a pool, roster and rule set.
    ///
    /// # Errors
    ///
    /// Returns [`OptimizerError::Validation`] for an empty pool, a zero
    /// salary cap, rules naming unknown players, a player both locked and
    /// excluded, or `min_unique` outside `1..=roster.len()`.
    pub fn build(
        pool: &'a PlayerPool,
        roster: &'a RosterSpec,
        rules: &ModelRules,
    ) -> Result<Self, OptimizerError> {
        if pool.is_empty() {
            return Err(ValidationError::EmptyPool.into());
        }
        if roster.is_empty() {
            return Err(ValidationError::EmptyRoster.into());
        }
        if rules.min_unique == 0 || rules.min_unique > roster.len() {
            return Err(ValidationError::InvalidRule(format!(
                "min_unique must be between 1 and {}, got {}",
                roster.len(),
                rules.min_unique
            ))
            .into());
        }
        if rules.salary_cap == 0 {
            return Err(
                ValidationError::InvalidRule("salary_cap must be positive".into()).into(),
            );
        }
        if rules.max_per_team == Some(0) {
            return Err(
                ValidationError::InvalidRule("max_per_team must be at least 1".into()).into(),
            );
        }

        let mut excluded = vec![false; pool.len()];
        for id in &rules.excluded {
            let idx = pool
                .index_of(id)
                .ok_or_else(|| ValidationError::UnknownPlayer {
                    rule: "excluded",
                    id: id.clone(),
                })?;
            excluded[idx] = true;
        }

        let mut locked: Vec<usize> = Vec::with_capacity(rules.locked.len());
        for id in &rules.locked {
            let idx = pool
                .index_of(id)
                .ok_or_else(|| ValidationError::UnknownPlayer {
                    rule: "locked",
                    id: id.clone(),
                })?;
            if excluded[idx] {
                return Err(ValidationError::LockedAndExcluded { id: id.clone() }.into());
            }
            if !locked.contains(&idx) {
                locked.push(idx);
            }
        }

        let mut model = Self {
            pool,
            roster,
            rules: rules.clone(),
            variables: Vec::new(),
            objective: Vec::new(),
            constraints: Vec::new(),
            slot_vars: vec![Vec::new(); roster.len()],
            player_vars: vec![Vec::new(); pool.len()],
            locked,
            excluded,
            prior_count: 0,
        };
        model.add_variables();
        model.add_structural_constraints();
        Ok(model)
    }

    fn add_variables(&mut self) {
        let (pool, roster) = (self.pool, self.roster);
        for (p, player) in pool.iter().enumerate() {
            if self.excluded[p] {
                continue;
            }
            for (s, slot) in roster.slots().iter().enumerate() {
                if slot.accepts_player(player) {
                    let var = self.variables.len();
                    self.variables.push(Variable { player: p, slot: s });
                    self.objective.push(to_milli_points(player.projection()));
                    self.slot_vars[s].push(var);
                    self.player_vars[p].push(var);
                }
            }
        }
    }

    fn add_structural_constraints(&mut self) {
        let pool = self.pool;
        for s in 0..self.roster.len() {
            let terms = self.slot_vars[s].iter().map(|&v| (v, 1)).collect();
            self.constraints.push(Constraint {
                kind: ConstraintKind::SlotFill { slot: s },
                terms,
                sense: Sense::Exactly,
                rhs: 1,
            });
        }

        for p in 0..pool.len() {
            if self.player_vars[p].len() < 2 {
                continue;
            }
            let terms = self.player_vars[p].iter().map(|&v| (v, 1)).collect();
            self.constraints.push(Constraint {
                kind: ConstraintKind::PlayerOnce { player: p },
                terms,
                sense: Sense::AtMost,
                rhs: 1,
            });
        }

        let salary_terms: Vec<(usize, i64)> = self
            .variables
            .iter()
            .enumerate()
            .map(|(v, var)| (v, i64::from(pool.players()[var.player].salary())))
            .collect();
        self.constraints.push(Constraint {
            kind: ConstraintKind::SalaryCap,
            terms: salary_terms.clone(),
            sense: Sense::AtMost,
            rhs: clamp_rhs(self.rules.salary_cap),
        });
        if let Some(floor) = self.rules.min_salary {
            self.constraints.push(Constraint {
                kind: ConstraintKind::SalaryFloor,
                terms: salary_terms,
                sense: Sense::AtLeast,
                rhs: clamp_rhs(floor),
            });
        }

        if let Some(max) = self.rules.max_per_team {
            let mut by_team: HashMap<&str, Vec<(usize, i64)>> = HashMap::new();
            for (v, var) in self.variables.iter().enumerate() {
                let team = pool.players()[var.player].team();
                by_team.entry(team).or_default().push((v, 1));
            }
            let mut teams: Vec<(&str, Vec<(usize, i64)>)> = by_team.into_iter().collect();
            teams.sort_by(|a, b| a.0.cmp(b.0));
            for (team, terms) in teams {
                let players: HashSet<usize> =
                    terms.iter().map(|(v, _)| self.variables[*v].player).collect();
                if players.len() <= max {
                    continue;
                }
                self.constraints.push(Constraint {
                    kind: ConstraintKind::TeamLimit {
                        team: team.to_string(),
                    },
                    terms,
                    sense: Sense::AtMost,
                    rhs: max as i64,
                });
            }
        }

        for &p in &self.locked {
            let terms = self.player_vars[p].iter().map(|&v| (v, 1)).collect();
            self.constraints.push(Constraint {
                kind: ConstraintKind::Locked { player: p },
                terms,
                sense: Sense::Exactly,
                rhs: 1,
            });
        }
    }

    /// Adds a uniqueness constraint against a previously generated lineup.
    ///
    /// The new lineup must contain at least `min_unique` players that are
    /// not in `prior`. Players of `prior` missing from the pool cannot be
    /// selected and are ignored.
    pub fn add_prior_lineup(&mut self, prior: &Lineup) {
        let members: HashSet<usize> = prior
            .players()
            .filter_map(|p| self.pool.index_of(p.id()))
            .collect();
        let terms: Vec<(usize, i64)> = self
            .variables
            .iter()
            .enumerate()
            .filter(|(_, var)| members.contains(&var.player))
            .map(|(v, _)| (v, 1))
            .collect();
        let rhs = self.roster.len() as i64 - self.rules.min_unique as i64;
        self.constraints.push(Constraint {
            kind: ConstraintKind::Distinct {
                prior: self.prior_count,
            },
            terms,
            sense: Sense::AtMost,
            rhs,
        });
        self.prior_count += 1;
    }

    /// Adds uniqueness constraints for every lineup in `priors`.
    pub fn with_prior_lineups<'l>(mut self, priors: impl IntoIterator<Item = &'l Lineup>) -> Self {
        for prior in priors {
            self.add_prior_lineup(prior);
        }
        self
    }

    /// Runs the structural feasibility checks.
    ///
    /// # Errors
    ///
    /// Returns [`InfeasibleModelError`] when no lineup can exist regardless
    /// of salaries and projections, e.g. a slot with too few eligible
    /// players.
    pub fn precheck(&self) -> Result<(), InfeasibleModelError> {
        precheck::run(self)
    }

    /// Returns every constraint the selection breaks.
    ///
    /// `selection` lists the variables set to 1.
    pub fn evaluate(&self, selection: &[usize]) -> Vec<Violation> {
        let mut mask = vec![false; self.variables.len()];
        for &v in selection {
            if let Some(slot) = mask.get_mut(v) {
                *slot = true;
            }
        }
        self.constraints
            .iter()
            .filter_map(|c| {
                let activity = c.activity(&mask);
                (!c.holds(activity)).then(|| Violation {
                    kind: c.kind.clone(),
                    activity,
                    sense: c.sense,
                    rhs: c.rhs,
                })
            })
            .collect()
    }

    /// Returns true if the selection satisfies every constraint.
    pub fn is_satisfied(&self, selection: &[usize]) -> bool {
        self.evaluate(selection).is_empty()
    }

    /// Objective value of a selection in milli-points.
    pub fn objective_value(&self, selection: &[usize]) -> i64 {
        selection.iter().map(|&v| self.objective[v]).sum()
    }

    #[inline]
    pub fn pool(&self) -> &'a PlayerPool {
        self.pool
    }

    #[inline]
    pub fn roster(&self) -> &'a RosterSpec {
        self.roster
    }

    #[inline]
    pub fn rules(&self) -> &ModelRules {
        &self.rules
    }

    #[inline]
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Objective coefficient (milli-points) per variable.
    #[inline]
    pub fn objective(&self) -> &[i64] {
        &self.objective
    }

    #[inline]
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Variables that fill slot `slot`.
    #[inline]
    pub fn slot_variables(&self, slot: usize) -> &[usize] {
        &self.slot_vars[slot]
    }

    /// Variables that select player `player`.
    #[inline]
    pub fn player_variables(&self, player: usize) -> &[usize] {
        &self.player_vars[player]
    }

    /// Pool indexes of locked players.
    #[inline]
    pub fn locked(&self) -> &[usize] {
        &self.locked
    }

    /// True if the player at pool index `player` is excluded.
    #[inline]
    pub fn is_excluded(&self, player: usize) -> bool {
        self.excluded[player]
    }

    /// Number of prior lineups the model must differ from.
    #[inline]
    pub fn prior_count(&self) -> usize {
        self.prior_count
    }

    /// Player for a variable.
    #[inline]
    pub fn player_of(&self, var: usize) -> &'a Player {
        &self.pool.players()[self.variables[var].player]
    }
}

fn clamp_rhs(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[cfg(test)]
mod tests;
