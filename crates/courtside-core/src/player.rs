//! Players and the position categories they are eligible for.

use std::fmt;

use crate::error::ValidationError;
use crate::score::MAX_PROJECTION;

/// A normalized position label such as `PG` or `C`.
///
/// Labels are trimmed and upper-cased on construction so that `pg`, ` PG`
/// and `PG` compare equal.
///
/// # Examples
///
/// ```
/// use courtside_core::Category;
///
/// assert_eq!(Category::new(" pg "), Category::new("PG"));
/// assert_eq!(Category::new("sf").as_str(), "SF");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Category(String);

impl Category {
    /// Creates a normalized category.
    pub fn new(label: impl AsRef<str>) -> Self {
        Category(label.as_ref().trim().to_ascii_uppercase())
    }

    /// Returns the normalized label.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Splits a combined position string such as `PG/SG` or `SF,PF`.
    ///
    /// Empty fragments are skipped and duplicates removed, keeping the first
    /// occurrence.
    pub fn parse_list(s: &str) -> Vec<Category> {
        let mut out: Vec<Category> = Vec::new();
        for part in s.split(['/', ',', '|']) {
            if part.trim().is_empty() {
                continue;
            }
            let cat = Category::new(part);
            if !out.contains(&cat) {
                out.push(cat);
            }
        }
        out
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        Category::new(s)
    }
}

/// An unvalidated player row as supplied by an importer.
///
/// Salary is signed so that negative values coming from a file can be
/// reported instead of silently wrapping.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerRecord {
    pub id: String,
    pub name: String,
    pub team: String,
    pub positions: Vec<String>,
    pub salary: i64,
    pub projection: f64,
}

impl PlayerRecord {
    /// Creates a record from its raw fields.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        team: impl Into<String>,
        positions: &[&str],
        salary: i64,
        projection: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            team: team.into(),
            positions: positions.iter().map(|p| p.to_string()).collect(),
            salary,
            projection,
        }
    }
}

/// A validated, immutable player.
///
/// Invariants: non-empty identifier, salary > 0, at least one category,
/// projection finite, non-negative and at most [`MAX_PROJECTION`]. A
/// projection of zero is legal; the player is simply unattractive to the
/// optimizer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    id: String,
    name: String,
    team: String,
    categories: Vec<Category>,
    salary: u32,
    projection: f64,
}

impl Player {
    /// Creates a player, validating every field.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] when a field breaks a player invariant.
    ///
    /// # Examples
    ///
    /// ```
    /// use courtside_core::{Category, Player};
    ///
    /// let p = Player::new("1", "Luka Doncic", "DAL", vec![Category::new("PG")], 11_000, 55.0).unwrap();
    /// assert_eq!(p.salary(), 11_000);
    ///
    /// assert!(Player::new("2", "Nobody", "DAL", vec![], 3_000, 1.0).is_err());
    /// ```
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        team: impl Into<String>,
        categories: Vec<Category>,
        salary: u32,
        projection: f64,
    ) -> Result<Self, ValidationError> {
        let id = id.into().trim().to_string();
        if id.is_empty() {
            return Err(ValidationError::EmptyIdentifier);
        }
        if salary == 0 {
            return Err(ValidationError::NonPositiveSalary { id, salary: 0 });
        }
        let mut deduped: Vec<Category> = Vec::with_capacity(categories.len());
        for cat in categories {
            if !cat.as_str().is_empty() && !deduped.contains(&cat) {
                deduped.push(cat);
            }
        }
        if deduped.is_empty() {
            return Err(ValidationError::NoCategories { id });
        }
        if !projection.is_finite() || !(0.0..=MAX_PROJECTION).contains(&projection) {
            return Err(ValidationError::InvalidProjection {
                id,
                points: projection,
            });
        }
        Ok(Self {
            id,
            name: name.into(),
            team: team.into().trim().to_ascii_uppercase(),
            categories: deduped,
            salary,
            projection,
        })
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Team abbreviation, upper-cased.
    #[inline]
    pub fn team(&self) -> &str {
        &self.team
    }

    #[inline]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    #[inline]
    pub fn salary(&self) -> u32 {
        self.salary
    }

    #[inline]
    pub fn projection(&self) -> f64 {
        self.projection
    }

    /// Returns true if the player carries the given category.
    pub fn has_category(&self, category: &Category) -> bool {
        self.categories.contains(category)
    }
}

impl TryFrom<PlayerRecord> for Player {
    type Error = ValidationError;

    fn try_from(record: PlayerRecord) -> Result<Self, Self::Error> {
        let id = record.id.trim().to_string();
        if id.is_empty() {
            return Err(ValidationError::EmptyIdentifier);
        }
        if record.salary <= 0 {
            return Err(ValidationError::NonPositiveSalary {
                id,
                salary: record.salary,
            });
        }
        let salary = u32::try_from(record.salary).map_err(|_| ValidationError::SalaryOutOfRange {
            id: id.clone(),
            salary: record.salary,
        })?;
        let categories = record
            .positions
            .iter()
            .flat_map(|p| Category::parse_list(p))
            .collect();
        Player::new(id, record.name, record.team, categories, salary, record.projection)
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cats: Vec<&str> = self.categories.iter().map(Category::as_str).collect();
        write!(
            f,
            "{} ({}, {}) ${} {:.2}",
            self.name,
            cats.join("/"),
            self.team,
            self.salary,
            self.projection
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_parse_list() {
        let cats = Category::parse_list("pg/SG, pg");
        assert_eq!(cats, vec![Category::new("PG"), Category::new("SG")]);
        assert!(Category::parse_list(" / ").is_empty());
    }

    #[test]
    fn test_player_rejects_zero_salary() {
        let err = Player::new("a", "A", "BOS", vec![Category::new("C")], 0, 10.0).unwrap_err();
        assert!(matches!(err, ValidationError::NonPositiveSalary { .. }));
    }

    #[test]
    fn test_player_rejects_bad_projection() {
        let cats = vec![Category::new("C")];
        assert!(Player::new("a", "A", "BOS", cats.clone(), 100, -1.0).is_err());
        assert!(Player::new("a", "A", "BOS", cats, 100, f64::NAN).is_err());
    }

    #[test]
    fn test_player_rejects_oversized_projection() {
        let cats = vec![Category::new("PG")];
        let err = Player::new("a", "A", "BOS", cats.clone(), 100, 1e16).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidProjection { points, .. } if points == 1e16));
        assert!(Player::new("b", "B", "BOS", cats, 100, MAX_PROJECTION).is_ok());
    }

    #[test]
    fn test_player_allows_zero_projection() {
        let p = Player::new("a", "A", "bos", vec![Category::new("C")], 100, 0.0).unwrap();
        assert_eq!(p.projection(), 0.0);
        assert_eq!(p.team(), "BOS");
    }

    #[test]
    fn test_record_negative_salary() {
        let record = PlayerRecord::new("x", "X", "LAL", &["SF"], -5, 3.0);
        let err = Player::try_from(record).unwrap_err();
        assert_eq!(
            err,
            ValidationError::NonPositiveSalary {
                id: "x".into(),
                salary: -5
            }
        );
    }

    #[test]
    fn test_record_combined_positions() {
        let record = PlayerRecord::new("x", "X", "LAL", &["SF/PF"], 5_000, 30.0);
        let player = Player::try_from(record).unwrap();
        assert_eq!(player.categories().len(), 2);
        assert!(player.has_category(&Category::new("PF")));
    }

    #[test]
    fn test_record_empty_positions() {
        let record = PlayerRecord::new("x", "X", "LAL", &[""], 5_000, 30.0);
        assert!(matches!(
            Player::try_from(record),
            Err(ValidationError::NoCategories { .. })
        ));
    }
}
