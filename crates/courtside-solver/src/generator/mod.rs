//! Generation of several distinct lineups.
//!
//! The generator solves repeatedly. Every accepted lineup becomes a
//! uniqueness constraint for the following solves, so each new lineup
//! differs from all earlier ones in at least `min_unique` players.
//!
//! ```text
//! Init → Solving → Accepted → Solving → … → Done
//!                ↘ Infeasible → Exhausted
//!                ↘ Unknown    → TimedOut
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::{Duration, Instant};

use courtside_config::{OptimizerConfig, TerminationConfig};
use courtside_core::{GenerationStatus, Lineup, LineupSet, PlayerPool, RosterSpec, ValidationError};
use tracing::{debug, info, warn};

use crate::error::OptimizerError;
use crate::model::{ConstraintModel, ModelRules};
use crate::search::{BranchAndBound, SolveOutcome};
use crate::stats::SearchStats;
use crate::termination::{DeadlineTermination, ExternalTermination, StandardTermination};

/// Where a generation run currently is.
#[derive(Debug, Clone, PartialEq)]
pub enum GeneratorState {
    /// Inputs not yet checked.
    Init,
    /// About to solve for the next lineup.
    Solving,
    /// A lineup was found and will be added to the set.
    Accepted(Lineup),
    /// No further lineup satisfies the constraints.
    Infeasible,
    /// The solve budget ran out before any further lineup was found.
    Unknown,
    /// The run is over.
    Finished(GenerationStatus),
}

impl fmt::Display for GeneratorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneratorState::Init => write!(f, "Init"),
            GeneratorState::Solving => write!(f, "Solving"),
            GeneratorState::Accepted(l) => write!(f, "Accepted({})", l.score()),
            GeneratorState::Infeasible => write!(f, "Infeasible"),
            GeneratorState::Unknown => write!(f, "Unknown"),
            GeneratorState::Finished(status) => write!(f, "Finished({})", status),
        }
    }
}

/// Builds up to `lineups` distinct lineups from one pool.
///
/// # Example
///
/// ```
/// use courtside_core::{GenerationStatus, PlayerPool, PlayerRecord, RosterSlot, RosterSpec};
/// use courtside_solver::generator::LineupSetGenerator;
/// use courtside_solver::model::ModelRules;
///
/// let pool = PlayerPool::try_from_records(vec![
///     PlayerRecord::new("A", "A", "BOS", &["PG"], 5_000, 30.0),
///     PlayerRecord::new("B", "B", "NYK", &["SG"], 5_000, 25.0),
///     PlayerRecord::new("C", "C", "MIA", &["SG"], 4_000, 20.0),
/// ]).unwrap();
/// let roster = RosterSpec::new(vec![
///     RosterSlot::of("PG", &["PG"]).unwrap(),
///     RosterSlot::of("SG", &["SG"]).unwrap(),
/// ]).unwrap();
///
/// let set = LineupSetGenerator::new(&pool, &roster, ModelRules::new(50_000))
///     .with_lineups(3)
///     .generate()
///     .unwrap();
///
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.status(), GenerationStatus::Exhausted);
/// ```
#[derive(Debug, Clone)]
pub struct LineupSetGenerator<'a> {
    pool: &'a PlayerPool,
    roster: &'a RosterSpec,
    rules: ModelRules,
    lineups: usize,
    max_exposure: Option<f64>,
    priors: Vec<Lineup>,
    termination: Option<TerminationConfig>,
    external: Option<Arc<AtomicBool>>,
    deadline: Option<Instant>,
}

impl<'a> LineupSetGenerator<'a> {
    /// Creates a generator for one lineup under `rules`.
    pub fn new(pool: &'a PlayerPool, roster: &'a RosterSpec, rules: ModelRules) -> Self {
        Self {
            pool,
            roster,
            rules,
            lineups: 1,
            max_exposure: None,
            priors: Vec::new(),
            termination: None,
            external: None,
            deadline: None,
        }
    }

    /// Creates a generator from a loaded configuration.
    ///
    /// `roster` is normally `config.roster_spec()`; it is passed in so the
    /// generator can borrow it.
    pub fn from_config(
        pool: &'a PlayerPool,
        roster: &'a RosterSpec,
        config: &OptimizerConfig,
    ) -> Self {
        Self {
            lineups: config.generation.lineups,
            max_exposure: config.generation.max_exposure,
            termination: config.termination.clone(),
            ..Self::new(pool, roster, ModelRules::from_config(config))
        }
    }

    /// Sets the number of lineups requested.
    pub fn with_lineups(mut self, count: usize) -> Self {
        self.lineups = count;
        self
    }

    /// Caps the fraction of lineups any unlocked player may appear in.
    pub fn with_max_exposure(mut self, exposure: f64) -> Self {
        self.max_exposure = Some(exposure);
        self
    }

    /// Lineups from earlier runs that new lineups must also differ from.
    ///
    /// Priors are never part of the returned set.
    pub fn with_prior_lineups(mut self, priors: Vec<Lineup>) -> Self {
        self.priors = priors;
        self
    }

    /// Applies limits to each individual solve.
    pub fn with_termination(mut self, termination: TerminationConfig) -> Self {
        self.termination = Some(termination);
        self
    }

    /// Stops the run when `flag` is set.
    pub fn with_external_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.external = Some(flag);
        self
    }

    /// Stops the run at `deadline`, keeping the lineups found so far.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Stops the run `budget` after this call.
    pub fn with_time_budget(self, budget: Duration) -> Self {
        self.with_deadline(Instant::now() + budget)
    }

    /// Generates the lineup set.
    ///
    /// Running out of lineups or time is not an error; the set reports it
    /// through [`LineupSet::status`].
    ///
    /// # Errors
    ///
    /// Returns [`OptimizerError::Validation`] for malformed inputs and
    /// [`OptimizerError::InfeasibleModel`] when not even one lineup can
    /// exist.
    pub fn generate(&self) -> Result<LineupSet, OptimizerError> {
        self.generate_with_stats().map(|(set, _)| set)
    }

    /// Generates the lineup set and returns the search statistics summed over
    /// every solve.
    pub fn generate_with_stats(&self) -> Result<(LineupSet, SearchStats), OptimizerError> {
        let started = Instant::now();
        let exposure_limit = self.exposure_limit()?;
        let mut accepted: Vec<Lineup> = Vec::with_capacity(self.lineups);
        let mut appearances: HashMap<String, usize> = HashMap::new();
        let mut stats = SearchStats::default();
        let mut state = GeneratorState::Init;

        let status = loop {
            state = match state {
                GeneratorState::Init => {
                    let model = ConstraintModel::build(self.pool, self.roster, &self.rules)?;
                    model.precheck()?;
                    info!(
                        event = "generation_start",
                        players = self.pool.len(),
                        slots = self.roster.len(),
                        variables = model.variables().len(),
                        constraints = model.constraints().len(),
                        requested = self.lineups,
                    );
                    GeneratorState::Solving
                }
                GeneratorState::Solving => {
                    self.solve_next(&accepted, &appearances, exposure_limit, &mut stats)?
                }
                GeneratorState::Accepted(lineup) => {
                    if !lineup.is_certified_optimal() {
                        warn!(
                            event = "lineup_uncertified",
                            index = accepted.len(),
                            score = %lineup.score(),
                        );
                    }
                    info!(
                        event = "lineup_accepted",
                        index = accepted.len(),
                        points = lineup.total_projection(),
                        salary = lineup.total_salary(),
                        certified = lineup.is_certified_optimal(),
                    );
                    for player in lineup.players() {
                        *appearances.entry(player.id().to_string()).or_default() += 1;
                    }
                    accepted.push(lineup);
                    if accepted.len() >= self.lineups {
                        GeneratorState::Finished(GenerationStatus::Done)
                    } else {
                        GeneratorState::Solving
                    }
                }
                GeneratorState::Infeasible => {
                    GeneratorState::Finished(GenerationStatus::Exhausted)
                }
                GeneratorState::Unknown => GeneratorState::Finished(GenerationStatus::TimedOut),
                GeneratorState::Finished(status) => break status,
            };
        };

        let set = LineupSet::new(accepted, self.lineups, status);
        info!(
            event = "generation_end",
            status = %status,
            lineups = set.len(),
            requested = self.lineups,
            nodes = stats.nodes_explored,
            duration_ms = started.elapsed().as_millis() as u64,
        );
        Ok((set, stats))
    }

    fn exposure_limit(&self) -> Result<Option<usize>, OptimizerError> {
        if self.lineups == 0 {
            return Err(ValidationError::InvalidRule("lineups must be at least 1".into()).into());
        }
        match self.max_exposure {
            None => Ok(None),
            Some(e) if e > 0.0 && e <= 1.0 => {
                Ok(Some(((e * self.lineups as f64).ceil() as usize).max(1)))
            }
            Some(e) => Err(ValidationError::InvalidRule(format!(
                "max_exposure must be in (0, 1], got {}",
                e
            ))
            .into()),
        }
    }

    fn solve_next(
        &self,
        accepted: &[Lineup],
        appearances: &HashMap<String, usize>,
        exposure_limit: Option<usize>,
        stats: &mut SearchStats,
    ) -> Result<GeneratorState, OptimizerError> {
        let mut rules = self.rules.clone();
        if let Some(limit) = exposure_limit {
            let mut capped: Vec<&String> = appearances
                .iter()
                .filter(|(id, &n)| n >= limit && !self.rules.locked.iter().any(|l| l == *id))
                .map(|(id, _)| id)
                .collect();
            capped.sort();
            rules.excluded.extend(capped.into_iter().cloned());
        }

        let model = ConstraintModel::build(self.pool, self.roster, &rules)?
            .with_prior_lineups(self.priors.iter().chain(accepted));
        if let Err(reason) = model.precheck() {
            // Only exposure exclusions can break a model that passed Init.
            debug!(event = "precheck_failed", index = accepted.len(), reason = %reason);
            return Ok(GeneratorState::Infeasible);
        }

        info!(
            event = "solve_start",
            index = accepted.len(),
            priors = model.prior_count(),
            excluded = rules.excluded.len(),
        );
        let result = BranchAndBound::new()
            .with_termination(self.termination())
            .solve(&model)?;
        stats.absorb(&result.stats);
        info!(
            event = "solve_end",
            index = accepted.len(),
            outcome = %result.outcome,
            nodes = result.stats.nodes_explored,
            duration_ms = result.stats.elapsed().as_millis() as u64,
        );

        Ok(match result.outcome {
            SolveOutcome::Optimal(lineup) | SolveOutcome::Feasible(lineup) => {
                GeneratorState::Accepted(lineup)
            }
            SolveOutcome::Infeasible => GeneratorState::Infeasible,
            SolveOutcome::Unknown => GeneratorState::Unknown,
        })
    }

    fn termination(&self) -> StandardTermination {
        let mut termination = StandardTermination::from_config(self.termination.as_ref());
        if let Some(flag) = &self.external {
            termination = termination.with_external(ExternalTermination::new(flag.clone()));
        }
        if let Some(deadline) = self.deadline {
            termination = termination.with_deadline(DeadlineTermination::at(deadline));
        }
        termination
    }
}
