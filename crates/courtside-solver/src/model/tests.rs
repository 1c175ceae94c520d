//! Tests for model construction and the feasibility precheck.

use courtside_core::{
    InfeasibleModelError, Lineup, PlayerRecord, RosterSpec, SlotAssignment, ValidationError,
};
use courtside_test::fixtures::{nba_slate, pool_of, scenario_pool, two_guard_roster};

use super::*;

fn kinds(model: &ConstraintModel<'_>) -> Vec<String> {
    model.constraints().iter().map(|c| c.kind.to_string()).collect()
}

#[test]
fn test_variables_per_eligible_pair() {
    let pool = scenario_pool();
    let roster = two_guard_roster();
    let model = ConstraintModel::build(&pool, &roster, &ModelRules::new(15_000)).unwrap();

    assert_eq!(model.variables().len(), 4);
    assert_eq!(model.slot_variables(0).len(), 2);
    assert_eq!(model.slot_variables(1).len(), 2);
    assert_eq!(model.player_variables(2).len(), 2);
    assert_eq!(model.objective()[0], 50_000);
}

#[test]
fn test_structural_constraints() {
    let pool = scenario_pool();
    let roster = two_guard_roster();
    let model = ConstraintModel::build(&pool, &roster, &ModelRules::new(15_000)).unwrap();

    // Only C has two variables, so only C needs a player-once row.
    assert_eq!(
        kinds(&model),
        vec!["slot_fill[0]", "slot_fill[1]", "player_once[2]", "salary_cap"]
    );
    let cap = &model.constraints()[3];
    assert_eq!(cap.sense, Sense::AtMost);
    assert_eq!(cap.rhs, 15_000);
    assert!(cap.terms.iter().all(|&(_, coef)| coef > 0));
}

#[test]
fn test_optional_constraints() {
    let pool = pool_of(vec![
        PlayerRecord::new("a", "A", "BOS", &["PG"], 5_000, 30.0),
        PlayerRecord::new("b", "B", "BOS", &["SG"], 5_000, 30.0),
        PlayerRecord::new("c", "C", "NYK", &["SG"], 5_000, 20.0),
    ]);
    let roster = two_guard_roster();
    let rules = ModelRules::new(20_000)
        .with_min_salary(9_000)
        .with_max_per_team(1)
        .with_locked("c");
    let model = ConstraintModel::build(&pool, &roster, &rules).unwrap();

    let kinds = kinds(&model);
    assert!(kinds.contains(&"salary_floor".to_string()));
    assert!(kinds.contains(&"team_limit[BOS]".to_string()));
    // NYK has one player and can never exceed the limit.
    assert!(!kinds.contains(&"team_limit[NYK]".to_string()));
    assert!(kinds.contains(&"locked[2]".to_string()));
    assert_eq!(model.locked(), &[2]);
}

#[test]
fn test_excluded_players_get_no_variables() {
    let pool = scenario_pool();
    let roster = two_guard_roster();
    let model =
        ConstraintModel::build(&pool, &roster, &ModelRules::new(15_000).with_excluded("C"))
            .unwrap();
    assert!(model.is_excluded(2));
    assert!(model.player_variables(2).is_empty());
    assert_eq!(model.variables().len(), 2);
}

#[test]
fn test_build_rejects_bad_rules() {
    let pool = scenario_pool();
    let roster = two_guard_roster();

    let err = ConstraintModel::build(&pool, &roster, &ModelRules::new(15_000).with_locked("Z"))
        .unwrap_err();
    assert!(matches!(
        err,
        OptimizerError::Validation(ValidationError::UnknownPlayer { rule: "locked", .. })
    ));

    let rules = ModelRules::new(15_000).with_locked("A").with_excluded("A");
    let err = ConstraintModel::build(&pool, &roster, &rules).unwrap_err();
    assert!(matches!(
        err,
        OptimizerError::Validation(ValidationError::LockedAndExcluded { .. })
    ));

    let rules = ModelRules::new(15_000).with_min_unique(3);
    assert!(ConstraintModel::build(&pool, &roster, &rules).is_err());

    let rules = ModelRules::new(15_000).with_max_per_team(0);
    assert!(ConstraintModel::build(&pool, &roster, &rules).is_err());

    let err = ConstraintModel::build(&pool, &roster, &ModelRules::new(0)).unwrap_err();
    assert!(matches!(
        err,
        OptimizerError::Validation(ValidationError::InvalidRule(_))
    ));
}

#[test]
fn test_evaluate_reports_violations() {
    let pool = scenario_pool();
    let roster = two_guard_roster();
    let model = ConstraintModel::build(&pool, &roster, &ModelRules::new(11_000)).unwrap();

    // Variables in build order: A-PG, B-SG, C-PG, C-SG.
    assert!(model.is_satisfied(&[2, 1]));
    assert_eq!(model.objective_value(&[2, 1]), 65_000);

    let violations = model.evaluate(&[0, 1]);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].kind, ConstraintKind::SalaryCap);
    assert_eq!(violations[0].activity, 15_000);
    assert_eq!(
        violations[0].to_string(),
        "salary_cap: 15000 <= 11000 does not hold"
    );

    let violations = model.evaluate(&[2, 3]);
    assert!(violations
        .iter()
        .any(|v| v.kind == ConstraintKind::PlayerOnce { player: 2 }));
}

#[test]
fn test_prior_lineup_constraint() {
    let pool = scenario_pool();
    let roster = two_guard_roster();
    let prior = Lineup::new(
        vec![
            SlotAssignment::new("PG", pool.players()[0].clone()),
            SlotAssignment::new("SG", pool.players()[1].clone()),
        ],
        true,
    );
    let model = ConstraintModel::build(&pool, &roster, &ModelRules::new(15_000))
        .unwrap()
        .with_prior_lineups([&prior]);

    assert_eq!(model.prior_count(), 1);
    let distinct = model.constraints().last().unwrap();
    assert_eq!(distinct.kind, ConstraintKind::Distinct { prior: 0 });
    assert_eq!(distinct.rhs, 1);
    assert!(!model.is_satisfied(&[0, 1]));
    assert!(model.is_satisfied(&[0, 3]));
}

#[test]
fn test_precheck_passes_for_slate() {
    let pool = nba_slate();
    let roster = RosterSpec::draftkings_classic();
    let model = ConstraintModel::build(&pool, &roster, &ModelRules::new(50_000)).unwrap();
    model.precheck().unwrap();
}

#[test]
fn test_precheck_missing_category() {
    let pool = pool_of(vec![
        PlayerRecord::new("a", "A", "BOS", &["PG"], 5_000, 30.0),
        PlayerRecord::new("b", "B", "NYK", &["PG"], 5_000, 30.0),
    ]);
    let roster = two_guard_roster();
    let model = ConstraintModel::build(&pool, &roster, &ModelRules::new(50_000)).unwrap();
    assert_eq!(
        model.precheck().unwrap_err(),
        InfeasibleModelError::UnfillableSlot {
            slot: "SG".into(),
            eligible: 0,
            required: 1,
        }
    );
}

#[test]
fn test_precheck_shared_eligibility() {
    // Two slots, one player eligible for both.
    let pool = pool_of(vec![PlayerRecord::new("c", "C", "BOS", &["PG", "SG"], 5_000, 30.0)]);
    let roster = two_guard_roster();
    let model = ConstraintModel::build(&pool, &roster, &ModelRules::new(50_000)).unwrap();
    assert!(matches!(
        model.precheck(),
        Err(InfeasibleModelError::UnfillableSlot {
            eligible: 1,
            required: 2,
            ..
        })
    ));
}

#[test]
fn test_precheck_locked_rules() {
    let pool = scenario_pool();
    let roster = two_guard_roster();

    let rules = ModelRules::new(10_000).with_locked("A").with_locked("B");
    let model = ConstraintModel::build(&pool, &roster, &rules).unwrap();
    assert_eq!(
        model.precheck().unwrap_err(),
        InfeasibleModelError::LockedOverCap {
            salary: 15_000,
            cap: 10_000
        }
    );

    let rules = ModelRules::new(50_000)
        .with_locked("A")
        .with_locked("B")
        .with_locked("C");
    let model = ConstraintModel::build(&pool, &roster, &rules).unwrap();
    assert!(matches!(
        model.precheck(),
        Err(InfeasibleModelError::TooManyLocked { locked: 3, slots: 2 })
    ));
}

#[test]
fn test_precheck_locked_team_limit() {
    let pool = pool_of(vec![
        PlayerRecord::new("a", "A", "BOS", &["PG"], 5_000, 30.0),
        PlayerRecord::new("b", "B", "BOS", &["SG"], 5_000, 30.0),
    ]);
    let rules = ModelRules::new(50_000)
        .with_max_per_team(1)
        .with_locked("a")
        .with_locked("b");
    let roster = two_guard_roster();
    let model = ConstraintModel::build(&pool, &roster, &rules).unwrap();
    assert_eq!(
        model.precheck().unwrap_err(),
        InfeasibleModelError::LockedOverTeamLimit {
            team: "BOS".into(),
            count: 2,
            max: 1
        }
    );
}

#[test]
fn test_precheck_unplaceable_locked() {
    // Both locked players only fit the single PG slot.
    let pool = pool_of(vec![
        PlayerRecord::new("a", "A", "BOS", &["PG"], 5_000, 30.0),
        PlayerRecord::new("d", "D", "NYK", &["PG"], 5_000, 30.0),
        PlayerRecord::new("b", "B", "MIA", &["SG"], 5_000, 30.0),
    ]);
    let rules = ModelRules::new(50_000).with_locked("a").with_locked("d");
    let roster = two_guard_roster();
    let model = ConstraintModel::build(&pool, &roster, &rules).unwrap();
    assert_eq!(
        model.precheck().unwrap_err(),
        InfeasibleModelError::UnplaceableLocked { id: "d".into() }
    );
}

#[test]
fn test_rules_from_config() {
    let config = courtside_config::OptimizerConfig::new()
        .with_salary_cap(40_000)
        .with_min_unique(2)
        .with_max_per_team(3);
    let rules = ModelRules::from_config(&config);
    assert_eq!(rules.salary_cap, 40_000);
    assert_eq!(rules.min_unique, 2);
    assert_eq!(rules.max_per_team, Some(3));
}
