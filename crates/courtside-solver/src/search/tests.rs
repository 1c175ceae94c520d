//! Tests for the branch-and-bound search.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use courtside_core::{PlayerPool, PlayerRecord, RosterSlot, RosterSpec};
use courtside_test::fixtures::{
    nba_slate, pool_of, scenario_pool, two_guard_roster, two_lineup_pool,
};
use courtside_test::oracle::{brute_force_best, OracleRules};
use courtside_test::{assert_valid_lineup, random_pool};

use super::*;
use crate::model::ModelRules;
use crate::termination::{ExternalTermination, NodeCountTermination};

fn solve(pool: &PlayerPool, roster: &RosterSpec, rules: &ModelRules) -> SolveOutcome {
    let model = ConstraintModel::build(pool, roster, rules).unwrap();
    BranchAndBound::new().solve(&model).unwrap().outcome
}

fn optimal(pool: &PlayerPool, roster: &RosterSpec, rules: &ModelRules) -> Lineup {
    match solve(pool, roster, rules) {
        SolveOutcome::Optimal(lineup) => lineup,
        other => panic!("expected an optimal lineup, got {}", other),
    }
}

fn three_slot_roster() -> RosterSpec {
    RosterSpec::new(vec![
        RosterSlot::of("G", &["PG", "SG"]).unwrap(),
        RosterSlot::of("F", &["SF", "PF"]).unwrap(),
        RosterSlot::of("UTIL", &["PG", "SG", "SF", "PF", "C"]).unwrap(),
    ])
    .unwrap()
}

#[test]
fn test_exact_cap_boundary() {
    let lineup = optimal(&scenario_pool(), &two_guard_roster(), &ModelRules::new(15_000));
    assert_eq!(lineup.player_ids(), vec!["A", "B"]);
    assert_eq!(lineup.total_salary(), 15_000);
    assert_eq!(lineup.score().points_milli(), 95_000);
    assert!(lineup.is_certified_optimal());
}

#[test]
fn test_cap_driven_substitution() {
    let pool = scenario_pool();
    let roster = two_guard_roster();

    let lineup = optimal(&pool, &roster, &ModelRules::new(12_000));
    assert_eq!(lineup.player_ids(), vec!["A", "C"]);
    assert_eq!(lineup.assignments()[1].player().id(), "C");

    let lineup = optimal(&pool, &roster, &ModelRules::new(11_500));
    assert_eq!(lineup.player_ids(), vec!["B", "C"]);
    assert_eq!(lineup.assignments()[0].player().id(), "C");
}

#[test]
fn test_cap_below_every_pair_is_infeasible() {
    let outcome = solve(&scenario_pool(), &two_guard_roster(), &ModelRules::new(10_000));
    assert_eq!(outcome, SolveOutcome::Infeasible);
    assert!(outcome.is_complete());
}

#[test]
fn test_salary_tie_break() {
    let pool = pool_of(vec![
        PlayerRecord::new("a", "A", "BOS", &["PG"], 6_000, 30.0),
        PlayerRecord::new("b", "B", "BOS", &["PG"], 5_000, 30.0),
        PlayerRecord::new("c", "C", "NYK", &["SG"], 5_000, 20.0),
    ]);
    let lineup = optimal(&pool, &two_guard_roster(), &ModelRules::new(20_000));
    assert_eq!(lineup.player_ids(), vec!["b", "c"]);
}

#[test]
fn test_identifier_tie_break() {
    let pool = pool_of(vec![
        PlayerRecord::new("z", "Z", "BOS", &["PG"], 5_000, 30.0),
        PlayerRecord::new("m", "M", "BOS", &["PG"], 5_000, 30.0),
        PlayerRecord::new("c", "C", "NYK", &["SG"], 5_000, 20.0),
    ]);
    let lineup = optimal(&pool, &two_guard_roster(), &ModelRules::new(20_000));
    assert_eq!(lineup.player_ids(), vec!["c", "m"]);
}

#[test]
fn test_zero_projections_are_valid() {
    let pool = pool_of(vec![
        PlayerRecord::new("a", "A", "BOS", &["PG"], 5_000, 0.0),
        PlayerRecord::new("b", "B", "NYK", &["SG"], 5_000, 0.0),
    ]);
    let lineup = optimal(&pool, &two_guard_roster(), &ModelRules::new(20_000));
    assert_eq!(lineup.player_ids(), vec!["a", "b"]);
    assert_eq!(lineup.score().points_milli(), 0);
}

#[test]
fn test_rules_change_optimum() {
    let pool = scenario_pool();
    let roster = two_guard_roster();

    let rules = ModelRules::new(15_000).with_excluded("B");
    assert_eq!(optimal(&pool, &roster, &rules).player_ids(), vec!["A", "C"]);

    let rules = ModelRules::new(15_000).with_locked("C");
    assert_eq!(optimal(&pool, &roster, &rules).player_ids(), vec!["A", "C"]);

    let rules = ModelRules::new(15_000).with_locked("C").with_excluded("A");
    assert_eq!(optimal(&pool, &roster, &rules).player_ids(), vec!["B", "C"]);

    let rules = ModelRules::new(15_000).with_min_salary(15_000);
    assert_eq!(optimal(&pool, &roster, &rules).player_ids(), vec!["A", "B"]);

    let rules = ModelRules::new(15_000).with_min_salary(15_001);
    assert_eq!(solve(&pool, &roster, &rules), SolveOutcome::Infeasible);
}

#[test]
fn test_team_limit() {
    let pool = pool_of(vec![
        PlayerRecord::new("a", "A", "BOS", &["PG"], 5_000, 40.0),
        PlayerRecord::new("b", "B", "BOS", &["SG"], 5_000, 40.0),
        PlayerRecord::new("c", "C", "NYK", &["SG"], 5_000, 10.0),
    ]);
    let rules = ModelRules::new(20_000).with_max_per_team(1);
    assert_eq!(
        optimal(&pool, &two_guard_roster(), &rules).player_ids(),
        vec!["a", "c"]
    );
}

#[test]
fn test_prior_lineups_force_difference() {
    let pool = two_lineup_pool();
    let roster = two_guard_roster();
    let first = optimal(&pool, &roster, &ModelRules::new(50_000));
    assert_eq!(first.player_ids(), vec!["A", "B"]);

    let model = ConstraintModel::build(&pool, &roster, &ModelRules::new(50_000))
        .unwrap()
        .with_prior_lineups([&first]);
    let second = BranchAndBound::new().solve(&model).unwrap().outcome;
    assert_eq!(second.lineup().unwrap().player_ids(), vec!["A", "C"]);

    let model = model.with_prior_lineups([second.lineup().unwrap()]);
    let third = BranchAndBound::new().solve(&model).unwrap().outcome;
    assert_eq!(third, SolveOutcome::Infeasible);
}

#[test]
fn test_matches_brute_force_on_random_pools() {
    let roster = three_slot_roster();
    for seed in 0..40 {
        let pool = random_pool(seed, 12, &["PG", "SG", "SF", "PF", "C"]);
        for cap in [12_000, 18_000, 25_000] {
            let expected = brute_force_best(&pool, &roster, &OracleRules::new(cap));
            let outcome = solve(&pool, &roster, &ModelRules::new(cap));
            match (expected, outcome) {
                (None, SolveOutcome::Infeasible) => {}
                (Some(best), SolveOutcome::Optimal(lineup)) => {
                    assert_valid_lineup(&lineup, &roster, cap);
                    assert_eq!(lineup.score().points_milli(), best.points_milli, "seed {seed}");
                    assert_eq!(lineup.total_salary(), best.salary, "seed {seed}");
                    let ids: Vec<String> =
                        lineup.player_ids().iter().map(|s| s.to_string()).collect();
                    assert_eq!(ids, best.ids, "seed {seed}");
                }
                (expected, outcome) => {
                    panic!("seed {seed} cap {cap}: oracle {:?}, solver {}", expected, outcome)
                }
            }
        }
    }
}

/// Two pairs of interchangeable slots, so the search skips mirrored
/// assignments.
fn twin_slot_roster() -> RosterSpec {
    RosterSpec::new(vec![
        RosterSlot::of("UTIL", &["PG", "SG", "SF", "C"]).unwrap(),
        RosterSlot::of("G", &["PG", "SG"]).unwrap(),
        RosterSlot::of("UTIL", &["PG", "SG", "SF", "C"]).unwrap(),
        RosterSlot::of("G", &["PG", "SG"]).unwrap(),
    ])
    .unwrap()
}

#[test]
fn test_twin_slots_match_brute_force() {
    let roster = twin_slot_roster();
    for seed in 200..240 {
        let pool = random_pool(seed, 9, &["PG", "SG", "SF", "C"]);
        let base = ModelRules::new(30_000).with_max_per_team(2);
        let mut oracle = OracleRules::new(30_000);
        oracle.max_per_team = Some(2);

        let expected = brute_force_best(&pool, &roster, &oracle);
        let first = match (expected, solve(&pool, &roster, &base)) {
            (None, SolveOutcome::Infeasible) => continue,
            (Some(best), SolveOutcome::Optimal(lineup)) => {
                assert_valid_lineup(&lineup, &roster, 30_000);
                assert_eq!(lineup.player_ids(), best.ids, "seed {seed}");
                lineup
            }
            (expected, outcome) => panic!("seed {seed}: oracle {:?}, solver {}", expected, outcome),
        };

        for k in 1..=3 {
            let mut oracle = oracle.clone();
            oracle.priors = vec![first.player_ids().iter().map(|s| s.to_string()).collect()];
            oracle.min_unique = k;
            let expected = brute_force_best(&pool, &roster, &oracle);

            let model = ConstraintModel::build(&pool, &roster, &base.clone().with_min_unique(k))
                .unwrap()
                .with_prior_lineups([&first]);
            let outcome = BranchAndBound::new().solve(&model).unwrap().outcome;
            match (expected, outcome) {
                (None, SolveOutcome::Infeasible) => {}
                (Some(best), SolveOutcome::Optimal(lineup)) => {
                    assert_eq!(lineup.score().points_milli(), best.points_milli, "seed {seed} k {k}");
                    assert_eq!(lineup.total_salary(), best.salary, "seed {seed} k {k}");
                    assert_eq!(lineup.player_ids(), best.ids, "seed {seed} k {k}");
                    assert!(lineup.difference(&first) >= k, "seed {seed} k {k}");
                }
                (expected, outcome) => {
                    panic!("seed {seed} k {k}: oracle {:?}, solver {}", expected, outcome)
                }
            }
        }
    }
}

#[test]
fn test_matches_brute_force_with_rules() {
    let roster = three_slot_roster();
    for seed in 100..120 {
        let pool = random_pool(seed, 10, &["PG", "SG", "SF", "PF", "C"]);
        let locked = pool.players()[0].id().to_string();
        let excluded = pool.players()[1].id().to_string();

        let mut oracle = OracleRules::new(20_000);
        oracle.min_salary = Some(12_000);
        oracle.max_per_team = Some(2);
        oracle.locked = vec![locked.clone()];
        oracle.excluded = vec![excluded.clone()];

        let rules = ModelRules::new(20_000)
            .with_min_salary(12_000)
            .with_max_per_team(2)
            .with_locked(locked)
            .with_excluded(excluded);

        let expected = brute_force_best(&pool, &roster, &oracle);
        let model = match ConstraintModel::build(&pool, &roster, &rules) {
            Ok(model) => model,
            Err(e) => panic!("seed {seed}: {e}"),
        };
        let outcome = BranchAndBound::new().solve(&model).unwrap().outcome;
        assert_eq!(
            expected.map(|b| b.points_milli),
            outcome.lineup().map(|l| l.score().points_milli()),
            "seed {seed}"
        );
    }
}

#[test]
fn test_full_slate_is_deterministic() {
    let pool = nba_slate();
    let roster = RosterSpec::draftkings_classic();
    let rules = ModelRules::new(50_000);

    let first = optimal(&pool, &roster, &rules);
    let second = optimal(&pool, &roster, &rules);
    assert_valid_lineup(&first, &roster, 50_000);
    assert_eq!(first, second);
}

#[test]
fn test_node_limit_without_incumbent_is_unknown() {
    let pool = scenario_pool();
    let roster = two_guard_roster();
    let model = ConstraintModel::build(&pool, &roster, &ModelRules::new(15_000)).unwrap();
    let result = BranchAndBound::new()
        .with_termination(NodeCountTermination::new(0))
        .solve(&model)
        .unwrap();
    assert_eq!(result.outcome, SolveOutcome::Unknown);
    assert!(!result.outcome.is_complete());
}

#[test]
fn test_node_limit_keeps_incumbent_uncertified() {
    let pool = nba_slate();
    let roster = RosterSpec::draftkings_classic();
    let model = ConstraintModel::build(&pool, &roster, &ModelRules::new(50_000)).unwrap();
    // The first dive reaches a leaf after one node per slot plus the leaf.
    let result = BranchAndBound::new()
        .with_termination(NodeCountTermination::new(200))
        .solve(&model)
        .unwrap();
    match result.outcome {
        SolveOutcome::Feasible(lineup) => {
            assert!(!lineup.is_certified_optimal());
            assert_valid_lineup(&lineup, &roster, 50_000);
        }
        SolveOutcome::Optimal(lineup) => assert!(lineup.is_certified_optimal()),
        other => panic!("expected a lineup, got {}", other),
    }
}

#[test]
fn test_external_flag_stops_search() {
    let pool = nba_slate();
    let roster = RosterSpec::draftkings_classic();
    let model = ConstraintModel::build(&pool, &roster, &ModelRules::new(50_000)).unwrap();
    let flag = Arc::new(AtomicBool::new(true));
    let result = BranchAndBound::new()
        .with_termination(ExternalTermination::new(flag))
        .solve(&model)
        .unwrap();
    assert_eq!(result.outcome, SolveOutcome::Unknown);
    assert_eq!(result.stats.nodes_explored, 0);
}

#[test]
fn test_single_bounder_agrees() {
    let pool = nba_slate();
    let roster = RosterSpec::draftkings_classic();
    let model = ConstraintModel::build(&pool, &roster, &ModelRules::new(50_000)).unwrap();

    let default = BranchAndBound::new().solve(&model).unwrap();
    let candidate_only = BranchAndBound::new()
        .with_bounder(BestCandidateBounder)
        .solve(&model)
        .unwrap();
    assert_eq!(default.outcome, candidate_only.outcome);
}

#[test]
fn test_stats_recorded() {
    let pool = scenario_pool();
    let roster = two_guard_roster();
    let model = ConstraintModel::build(&pool, &roster, &ModelRules::new(15_000)).unwrap();
    let result = BranchAndBound::new().solve(&model).unwrap();
    assert!(result.stats.nodes_explored >= 3);
    assert!(result.stats.incumbents_found >= 1);
    assert!(result.stats.leaves_evaluated >= 1);
}
