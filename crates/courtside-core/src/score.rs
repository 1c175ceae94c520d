//! LineupScore - projected points with a salary tie-break

use std::cmp::Ordering;
use std::fmt;

/// Fixed-point scale for projected points.
///
/// Projections are compared in thousandths of a point so that equal totals
/// compare equal regardless of summation order.
pub const POINTS_SCALE: f64 = 1_000.0;

/// Largest projection a player may carry.
///
/// Keeps milli-point totals over any realistic pool well inside `i64`.
pub const MAX_PROJECTION: f64 = 1_000_000.0;

/// Converts projected points to milli-points, rounding to nearest.
#[inline]
pub fn to_milli_points(points: f64) -> i64 {
    (points * POINTS_SCALE).round() as i64
}

/// The quality of a lineup.
///
/// When comparing scores:
/// 1. More projected points is better
/// 2. On equal points, lower total salary is better
///
/// # Examples
///
/// ```
/// use courtside_core::LineupScore;
///
/// let a = LineupScore::of(95_000, 15_000);
/// let b = LineupScore::of(95_000, 14_500);
/// let c = LineupScore::of(96_000, 20_000);
///
/// assert!(b > a); // same points, cheaper
/// assert!(c > b); // more points wins regardless of salary
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineupScore {
    points_milli: i64,
    salary: u64,
}

impl LineupScore {
    /// The zero score.
    pub const ZERO: LineupScore = LineupScore {
        points_milli: 0,
        salary: 0,
    };

    /// Creates a score from milli-points and total salary.
    #[inline]
    pub const fn of(points_milli: i64, salary: u64) -> Self {
        LineupScore {
            points_milli,
            salary,
        }
    }

    /// Returns the points component in milli-points.
    #[inline]
    pub const fn points_milli(&self) -> i64 {
        self.points_milli
    }

    /// Returns the points component as projected points.
    #[inline]
    pub fn points(&self) -> f64 {
        self.points_milli as f64 / POINTS_SCALE
    }

    /// Returns the salary component.
    #[inline]
    pub const fn salary(&self) -> u64 {
        self.salary
    }
}

impl Ord for LineupScore {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.points_milli.cmp(&other.points_milli) {
            Ordering::Equal => other.salary.cmp(&self.salary),
            other => other,
        }
    }
}

impl PartialOrd for LineupScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for LineupScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LineupScore({:.3}pts, ${})", self.points(), self.salary)
    }
}

impl fmt::Display for LineupScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}pts/${}", self.points(), self.salary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_milli_rounding() {
        assert_eq!(to_milli_points(47.25), 47_250);
        assert_eq!(to_milli_points(0.0004), 0);
        assert_eq!(to_milli_points(12.3456), 12_346);
    }

    #[test]
    fn test_ordering() {
        let mut scores = vec![
            LineupScore::of(10, 5),
            LineupScore::of(20, 9),
            LineupScore::of(20, 3),
        ];
        scores.sort();
        assert_eq!(
            scores,
            vec![
                LineupScore::of(10, 5),
                LineupScore::of(20, 9),
                LineupScore::of(20, 3)
            ]
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", LineupScore::of(95_000, 15_000)), "95.00pts/$15000");
    }
}
