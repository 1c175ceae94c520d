//! Hand-built player pools.
//!
//! # Example
//!
//! ```
//! use courtside_test::fixtures::{scenario_pool, two_guard_roster};
//!
//! let pool = scenario_pool();
//! assert_eq!(pool.len(), 3);
//! assert_eq!(two_guard_roster().labels(), vec!["PG", "SG"]);
//! ```

use courtside_core::{PlayerPool, PlayerRecord, RosterSlot, RosterSpec};

/// Builds a pool from records known to be valid.
///
/// # Panics
///
/// Panics if a record is invalid; fixtures are meant to be well formed.
pub fn pool_of(records: Vec<PlayerRecord>) -> PlayerPool {
    PlayerPool::try_from_records(records).expect("fixture records must be valid")
}

/// A roster of one `PG` slot and one `SG` slot.
pub fn two_guard_roster() -> RosterSpec {
    RosterSpec::new(vec![
        RosterSlot::of("PG", &["PG"]).expect("valid slot"),
        RosterSlot::of("SG", &["SG"]).expect("valid slot"),
    ])
    .expect("valid roster")
}

/// Three guards:
///
/// | id | salary | points | positions |
/// |----|--------|--------|-----------|
/// | A  | 8000   | 50     | PG        |
/// | B  | 7000   | 45     | SG        |
/// | C  | 4000   | 20     | PG/SG     |
pub fn scenario_pool() -> PlayerPool {
    pool_of(vec![
        PlayerRecord::new("A", "Alpha Guard", "BOS", &["PG"], 8_000, 50.0),
        PlayerRecord::new("B", "Bravo Wing", "NYK", &["SG"], 7_000, 45.0),
        PlayerRecord::new("C", "Charlie Combo", "MIA", &["PG", "SG"], 4_000, 20.0),
    ])
}

/// A pool with exactly two lineups for [`two_guard_roster`]: `{A, B}` and
/// `{A, C}`.
pub fn two_lineup_pool() -> PlayerPool {
    pool_of(vec![
        PlayerRecord::new("A", "Alpha Guard", "BOS", &["PG"], 5_000, 30.0),
        PlayerRecord::new("B", "Bravo Wing", "NYK", &["SG"], 5_000, 25.0),
        PlayerRecord::new("C", "Charlie Wing", "MIA", &["SG"], 4_000, 20.0),
    ])
}

/// A 30-player NBA slate across six teams, feasible for the DraftKings
/// classic roster under a $50,000 cap.
pub fn nba_slate() -> PlayerPool {
    let rows: [(&str, &str, &str, &[&str], i64, f64); 30] = [
        ("1001", "Luka Vance", "DAL", &["PG", "SG"], 11_200, 58.4),
        ("1002", "Kyrie Holt", "DAL", &["SG"], 7_900, 41.2),
        ("1003", "Dereck Lively", "DAL", &["C"], 5_100, 27.9),
        ("1004", "P.J. Waters", "DAL", &["SF", "PF"], 4_300, 22.1),
        ("1005", "Josh Greene", "DAL", &["SG", "SF"], 3_600, 17.5),
        ("1006", "Jayson Tate", "BOS", &["SF", "PF"], 10_100, 52.6),
        ("1007", "Jaylen Brooks", "BOS", &["SG", "SF"], 8_600, 43.8),
        ("1008", "Kristaps Zin", "BOS", &["PF", "C"], 7_200, 37.0),
        ("1009", "Jrue Holland", "BOS", &["PG"], 6_400, 31.3),
        ("1010", "Sam Pritch", "BOS", &["PG", "SG"], 3_500, 16.2),
        ("1011", "Nikola Jovan", "DEN", &["C"], 11_500, 60.1),
        ("1012", "Jamal Murr", "DEN", &["PG"], 8_200, 42.0),
        ("1013", "Michael Porter", "DEN", &["SF"], 6_000, 30.4),
        ("1014", "Aaron Gordy", "DEN", &["PF"], 5_500, 28.8),
        ("1015", "Christian Braun", "DEN", &["SG"], 3_900, 19.6),
        ("1016", "Shai Gilder", "OKC", &["PG"], 10_800, 55.7),
        ("1017", "Jalen Wills", "OKC", &["SF", "PF"], 7_600, 39.5),
        ("1018", "Chet Holm", "OKC", &["PF", "C"], 7_000, 36.1),
        ("1019", "Lu Dort", "OKC", &["SG"], 4_100, 20.3),
        ("1020", "Isaiah Hart", "OKC", &["C"], 3_300, 15.8),
        ("1021", "Anthony Edge", "MIN", &["SG"], 9_300, 46.9),
        ("1022", "Rudy Gobel", "MIN", &["C"], 6_700, 33.4),
        ("1023", "Karl Towns", "MIN", &["PF", "C"], 7_400, 38.0),
        ("1024", "Mike Conway", "MIN", &["PG"], 4_800, 23.9),
        ("1025", "Jaden McDan", "MIN", &["SF", "PF"], 3_700, 18.2),
        ("1026", "Jalen Brunsen", "NYK", &["PG"], 9_600, 49.5),
        ("1027", "Mikal Bridger", "NYK", &["SG", "SF"], 6_200, 31.0),
        ("1028", "Josh Hart", "NYK", &["SG", "SF"], 5_800, 30.2),
        ("1029", "OG Anunoby", "NYK", &["SF", "PF"], 5_300, 26.5),
        ("1030", "Mitchell Robins", "NYK", &["C"], 3_000, 14.0),
    ];
    pool_of(
        rows.iter()
            .map(|&(id, name, team, positions, salary, points)| {
                PlayerRecord::new(id, name, team, positions, salary, points)
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slate_has_every_position() {
        let pool = nba_slate();
        assert_eq!(pool.len(), 30);
        assert_eq!(pool.teams().len(), 6);
        for slot in RosterSpec::draftkings_classic().slots() {
            assert!(pool.iter().any(|p| slot.accepts_player(p)), "{}", slot);
        }
    }

    #[test]
    fn test_cheapest_lineup_under_cap() {
        let pool = nba_slate();
        let mut salaries: Vec<u32> = pool.iter().map(|p| p.salary()).collect();
        salaries.sort_unstable();
        let cheapest: u32 = salaries.iter().take(8).sum();
        assert!(cheapest < 50_000);
    }
}
