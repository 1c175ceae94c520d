//! Brute-force reference optimizer.
//!
//! Enumerates every assignment of players to slots. Only usable for small
//! pools, which is all it is meant for: checking the real solver.

use std::collections::{BTreeSet, HashMap};

use courtside_core::{to_milli_points, PlayerPool, RosterSpec};

/// Rules the oracle enforces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleRules {
    pub salary_cap: u64,
    pub min_salary: Option<u64>,
    pub max_per_team: Option<usize>,
    pub locked: Vec<String>,
    pub excluded: Vec<String>,
    /// Player sets a lineup must differ from.
    pub priors: Vec<Vec<String>>,
    pub min_unique: usize,
}

impl OracleRules {
    pub fn new(salary_cap: u64) -> Self {
        Self {
            salary_cap,
            min_salary: None,
            max_per_team: None,
            locked: Vec::new(),
            excluded: Vec::new(),
            priors: Vec::new(),
            min_unique: 1,
        }
    }
}

/// A lineup found by enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleLineup {
    /// Player identifiers, sorted.
    pub ids: Vec<String>,
    pub points_milli: i64,
    pub salary: u64,
}

/// Returns the best lineup: most points, then lowest salary, then the
/// lexically smallest sorted identifier list.
///
/// # Example
///
/// ```
/// use courtside_test::fixtures::{scenario_pool, two_guard_roster};
/// use courtside_test::oracle::{brute_force_best, OracleRules};
///
/// let best = brute_force_best(&scenario_pool(), &two_guard_roster(), &OracleRules::new(15_000)).unwrap();
/// assert_eq!(best.ids, vec!["A", "B"]);
/// assert_eq!(best.points_milli, 95_000);
/// ```
pub fn brute_force_best(
    pool: &PlayerPool,
    roster: &RosterSpec,
    rules: &OracleRules,
) -> Option<OracleLineup> {
    all_lineups(pool, roster, rules).into_iter().min_by(|a, b| {
        b.points_milli
            .cmp(&a.points_milli)
            .then(a.salary.cmp(&b.salary))
            .then_with(|| a.ids.cmp(&b.ids))
    })
}

/// Every distinct player set that forms a valid lineup.
pub fn all_lineups(pool: &PlayerPool, roster: &RosterSpec, rules: &OracleRules) -> Vec<OracleLineup> {
    let mut found: BTreeSet<Vec<usize>> = BTreeSet::new();
    let mut current = Vec::with_capacity(roster.len());
    enumerate(pool, roster, rules, &mut current, &mut found);

    found
        .into_iter()
        .map(|members| {
            let mut ids: Vec<String> = members
                .iter()
                .map(|&p| pool.players()[p].id().to_string())
                .collect();
            ids.sort();
            OracleLineup {
                ids,
                points_milli: members
                    .iter()
                    .map(|&p| to_milli_points(pool.players()[p].projection()))
                    .sum(),
                salary: members
                    .iter()
                    .map(|&p| u64::from(pool.players()[p].salary()))
                    .sum(),
            }
        })
        .collect()
}

fn enumerate(
    pool: &PlayerPool,
    roster: &RosterSpec,
    rules: &OracleRules,
    current: &mut Vec<usize>,
    found: &mut BTreeSet<Vec<usize>>,
) {
    let depth = current.len();
    if depth == roster.len() {
        if is_valid(pool, rules, current) {
            let mut members = current.clone();
            members.sort_unstable();
            found.insert(members);
        }
        return;
    }
    let slot = &roster.slots()[depth];
    for (p, player) in pool.iter().enumerate() {
        if current.contains(&p)
            || !slot.accepts_player(player)
            || rules.excluded.iter().any(|id| id == player.id())
        {
            continue;
        }
        current.push(p);
        enumerate(pool, roster, rules, current, found);
        current.pop();
    }
}

fn is_valid(pool: &PlayerPool, rules: &OracleRules, members: &[usize]) -> bool {
    let players: Vec<_> = members.iter().map(|&p| &pool.players()[p]).collect();
    let salary: u64 = players.iter().map(|p| u64::from(p.salary())).sum();
    if salary > rules.salary_cap {
        return false;
    }
    if rules.min_salary.is_some_and(|floor| salary < floor) {
        return false;
    }
    if let Some(max) = rules.max_per_team {
        let mut per_team: HashMap<&str, usize> = HashMap::new();
        for p in &players {
            *per_team.entry(p.team()).or_default() += 1;
        }
        if per_team.values().any(|&n| n > max) {
            return false;
        }
    }
    if !rules
        .locked
        .iter()
        .all(|id| players.iter().any(|p| p.id() == id))
    {
        return false;
    }
    rules.priors.iter().all(|prior| {
        let fresh = players
            .iter()
            .filter(|p| !prior.iter().any(|id| id == p.id()))
            .count();
        fresh >= rules.min_unique
    })
}
