//! Optimizer entry point that hides the model and generator wiring.

use courtside_config::OptimizerConfig;
use courtside_core::{LineupSet, PlayerPool};
use courtside_solver::{LineupSetGenerator, OptimizerError, SearchStats};
use tracing::debug;

/// Builds the lineup set `config` asks for from `pool`.
///
/// # Errors
///
/// Returns [`OptimizerError::Config`] when the configuration fails
/// [`OptimizerConfig::validate`], and whatever
/// [`LineupSetGenerator::generate`] reports for the pool itself.
pub fn optimize(pool: &PlayerPool, config: &OptimizerConfig) -> Result<LineupSet, OptimizerError> {
    optimize_with_stats(pool, config).map(|(set, _)| set)
}

/// Like [`optimize`], also returning search statistics summed over every
/// solve.
pub fn optimize_with_stats(
    pool: &PlayerPool,
    config: &OptimizerConfig,
) -> Result<(LineupSet, SearchStats), OptimizerError> {
    config.validate()?;
    let roster = config.roster_spec()?;
    debug!(
        event = "optimize",
        players = pool.len(),
        slots = roster.len(),
        salary_cap = config.contest.salary_cap,
    );
    LineupSetGenerator::from_config(pool, &roster, config).generate_with_stats()
}

#[cfg(test)]
mod tests {
    use courtside_config::SlotConfig;
    use courtside_core::GenerationStatus;
    use courtside_test::fixtures::{nba_slate, scenario_pool, two_lineup_pool};

    use super::*;

    fn two_guard_config(cap: u64) -> OptimizerConfig {
        OptimizerConfig::new()
            .with_salary_cap(cap)
            .with_slots(vec![SlotConfig::new("PG", &["PG"]), SlotConfig::new("SG", &["SG"])])
    }

    #[test]
    fn test_optimize_scenario() {
        let set = optimize(&scenario_pool(), &two_guard_config(12_000)).unwrap();
        assert_eq!(set.status(), GenerationStatus::Done);
        assert_eq!(set.best().unwrap().player_ids(), vec!["A", "C"]);
    }

    #[test]
    fn test_optimize_rejects_invalid_config() {
        let config = two_guard_config(15_000).with_lineups(0);
        let err = optimize(&scenario_pool(), &config).unwrap_err();
        assert!(matches!(err, OptimizerError::Config(_)));
    }

    #[test]
    fn test_optimize_reports_exhaustion() {
        let config = two_guard_config(50_000).with_lineups(3);
        let (set, stats) = optimize_with_stats(&two_lineup_pool(), &config).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.status(), GenerationStatus::Exhausted);
        assert_eq!(set.shortfall(), 1);
        assert!(stats.nodes_explored > 0);
    }

    #[test]
    fn test_optimize_default_contest_on_slate() {
        let config = OptimizerConfig::new().with_lineups(3).with_min_unique(2);
        let set = optimize(&nba_slate(), &config).unwrap();
        assert_eq!(set.len(), 3);
        assert!(set.min_pairwise_difference().unwrap() >= 2);
        for lineup in set.iter() {
            assert_eq!(lineup.assignments().len(), 8);
            assert!(lineup.total_salary() <= 50_000);
        }
    }
}
