//! Lineups and ordered lineup sets.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;

use crate::player::Player;
use crate::score::{to_milli_points, LineupScore};

/// One roster slot and the player filling it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SlotAssignment {
    slot: String,
    player: Player,
}

impl SlotAssignment {
    pub fn new(slot: impl Into<String>, player: Player) -> Self {
        Self {
            slot: slot.into(),
            player,
        }
    }

    #[inline]
    pub fn slot(&self) -> &str {
        &self.slot
    }

    #[inline]
    pub fn player(&self) -> &Player {
        &self.player
    }
}

/// A complete roster: one distinct player per slot.
///
/// Lineups are value objects. They own copies of their players and hold no
/// reference back to the pool they were drawn from.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Lineup {
    assignments: Vec<SlotAssignment>,
    total_salary: u64,
    total_projection: f64,
    score: LineupScore,
    certified_optimal: bool,
}

impl Lineup {
    /// Creates a lineup from slot assignments in roster order.
    ///
    /// `certified_optimal` is false when the producing search was cut short
    /// and could not prove that no better lineup exists.
    pub fn new(assignments: Vec<SlotAssignment>, certified_optimal: bool) -> Self {
        let total_salary = assignments
            .iter()
            .map(|a| u64::from(a.player.salary()))
            .sum();
        let total_projection = assignments.iter().map(|a| a.player.projection()).sum();
        let points_milli = assignments
            .iter()
            .map(|a| to_milli_points(a.player.projection()))
            .sum();
        Self {
            assignments,
            total_salary,
            total_projection,
            score: LineupScore::of(points_milli, total_salary),
            certified_optimal,
        }
    }

    /// Slot assignments in roster order.
    #[inline]
    pub fn assignments(&self) -> &[SlotAssignment] {
        &self.assignments
    }

    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.assignments.iter().map(|a| &a.player)
    }

    #[inline]
    pub fn total_salary(&self) -> u64 {
        self.total_salary
    }

    #[inline]
    pub fn total_projection(&self) -> f64 {
        self.total_projection
    }

    #[inline]
    pub fn score(&self) -> LineupScore {
        self.score
    }

    /// True if the solver proved this lineup optimal.
    #[inline]
    pub fn is_certified_optimal(&self) -> bool {
        self.certified_optimal
    }

    /// Player identifiers, sorted lexically.
    pub fn player_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.players().map(Player::id).collect();
        ids.sort_unstable();
        ids
    }

    /// Returns true if the player is part of this lineup.
    pub fn contains(&self, id: &str) -> bool {
        self.players().any(|p| p.id() == id)
    }

    /// Number of players that appear in both lineups.
    pub fn shared_players(&self, other: &Lineup) -> usize {
        let mine: HashSet<&str> = self.players().map(Player::id).collect();
        other.players().filter(|p| mine.contains(p.id())).count()
    }

    /// Number of players in this lineup that are not in `other`.
    pub fn difference(&self, other: &Lineup) -> usize {
        self.assignments.len() - self.shared_players(other)
    }

    /// Orders lineups best first.
    ///
    /// More points first, then lower salary, then the lexically smaller
    /// sorted identifier list.
    pub fn rank_cmp(&self, other: &Lineup) -> Ordering {
        other
            .score
            .cmp(&self.score)
            .then_with(|| self.player_ids().cmp(&other.player_ids()))
    }
}

impl fmt::Display for Lineup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for a in &self.assignments {
            writeln!(f, "{:<5} {}", a.slot, a.player)?;
        }
        write!(
            f,
            "total ${} {:.2}pts{}",
            self.total_salary,
            self.total_projection,
            if self.certified_optimal {
                ""
            } else {
                " (not certified optimal)"
            }
        )
    }
}

/// How a lineup generation run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GenerationStatus {
    /// The requested number of lineups was produced.
    Done,
    /// No further distinct lineup exists under the constraints.
    Exhausted,
    /// The solve budget ran out before a further lineup was found.
    TimedOut,
}

impl fmt::Display for GenerationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationStatus::Done => write!(f, "Done"),
            GenerationStatus::Exhausted => write!(f, "Exhausted"),
            GenerationStatus::TimedOut => write!(f, "TimedOut"),
        }
    }
}

/// Lineups ordered best first, with the outcome of the run that built them.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineupSet {
    lineups: Vec<Lineup>,
    requested: usize,
    status: GenerationStatus,
}

impl LineupSet {
    /// Creates a set, sorting the lineups with [`Lineup::rank_cmp`].
    pub fn new(mut lineups: Vec<Lineup>, requested: usize, status: GenerationStatus) -> Self {
        lineups.sort_by(Lineup::rank_cmp);
        Self {
            lineups,
            requested,
            status,
        }
    }

    #[inline]
    pub fn lineups(&self) -> &[Lineup] {
        &self.lineups
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Lineup> {
        self.lineups.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.lineups.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lineups.is_empty()
    }

    /// The best lineup, if any.
    pub fn best(&self) -> Option<&Lineup> {
        self.lineups.first()
    }

    #[inline]
    pub fn requested(&self) -> usize {
        self.requested
    }

    #[inline]
    pub fn status(&self) -> GenerationStatus {
        self.status
    }

    /// How many of the requested lineups are missing.
    pub fn shortfall(&self) -> usize {
        self.requested.saturating_sub(self.lineups.len())
    }

    /// True if every lineup was proved optimal for its iteration.
    pub fn is_fully_certified(&self) -> bool {
        self.lineups.iter().all(Lineup::is_certified_optimal)
    }

    /// Smallest difference between any two lineups, `None` with fewer than two.
    pub fn min_pairwise_difference(&self) -> Option<usize> {
        let mut min: Option<usize> = None;
        for (i, a) in self.lineups.iter().enumerate() {
            for b in &self.lineups[i + 1..] {
                let d = a.difference(b);
                min = Some(min.map_or(d, |m| m.min(d)));
            }
        }
        min
    }

    pub fn into_lineups(self) -> Vec<Lineup> {
        self.lineups
    }
}

impl<'a> IntoIterator for &'a LineupSet {
    type Item = &'a Lineup;
    type IntoIter = std::slice::Iter<'a, Lineup>;

    fn into_iter(self) -> Self::IntoIter {
        self.lineups.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::Category;

    fn p(id: &str, salary: u32, points: f64) -> Player {
        Player::new(id, id, "BOS", vec![Category::new("C")], salary, points).unwrap()
    }

    fn lineup(players: &[(&str, u32, f64)]) -> Lineup {
        let assignments = players
            .iter()
            .enumerate()
            .map(|(i, (id, s, pts))| SlotAssignment::new(format!("S{i}"), p(id, *s, *pts)))
            .collect();
        Lineup::new(assignments, true)
    }

    #[test]
    fn test_totals() {
        let l = lineup(&[("a", 8_000, 50.0), ("b", 7_000, 45.5)]);
        assert_eq!(l.total_salary(), 15_000);
        assert!((l.total_projection() - 95.5).abs() < 1e-9);
        assert_eq!(l.score().points_milli(), 95_500);
    }

    #[test]
    fn test_difference() {
        let a = lineup(&[("a", 1, 1.0), ("b", 1, 1.0), ("c", 1, 1.0)]);
        let b = lineup(&[("c", 1, 1.0), ("d", 1, 1.0), ("a", 1, 1.0)]);
        assert_eq!(a.shared_players(&b), 2);
        assert_eq!(a.difference(&b), 1);
    }

    #[test]
    fn test_set_sorted_best_first() {
        let low = lineup(&[("a", 1_000, 10.0)]);
        let high = lineup(&[("b", 1_000, 20.0)]);
        let high_cheap = lineup(&[("c", 900, 20.0)]);
        let set = LineupSet::new(vec![low, high, high_cheap], 4, GenerationStatus::Exhausted);

        let ids: Vec<&str> = set.iter().map(|l| l.player_ids()[0]).collect();
        assert_eq!(ids, vec!["c", "b", "a"]);
        assert_eq!(set.shortfall(), 1);
        assert_eq!(set.min_pairwise_difference(), Some(1));
    }

    #[test]
    fn test_rank_ties_use_ids() {
        let x = lineup(&[("y", 1_000, 10.0)]);
        let y = lineup(&[("x", 1_000, 10.0)]);
        assert_eq!(x.rank_cmp(&y), Ordering::Greater);
    }

    #[test]
    fn test_certification_flag() {
        let a = Lineup::new(vec![SlotAssignment::new("C", p("a", 1, 1.0))], false);
        let set = LineupSet::new(vec![a], 1, GenerationStatus::Done);
        assert!(!set.is_fully_certified());
        assert_eq!(set.status().to_string(), "Done");
    }
}
