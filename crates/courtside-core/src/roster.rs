//! Roster slot definitions.
//!
//! A [`RosterSpec`] is the ordered list of slots a contest format requires.
//! Each [`RosterSlot`] accepts a set of player categories; a player may fill
//! the slot if any of its categories is accepted.

use std::fmt;

use crate::error::ValidationError;
use crate::player::{Category, Player};

/// A single lineup position, e.g. `G` accepting `PG` and `SG`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RosterSlot {
    label: String,
    accepts: Vec<Category>,
}

impl RosterSlot {
    /// Creates a slot accepting the given categories.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptySlot`] if no category is given.
    pub fn new(label: impl Into<String>, accepts: Vec<Category>) -> Result<Self, ValidationError> {
        let label = label.into().trim().to_string();
        let mut deduped: Vec<Category> = Vec::with_capacity(accepts.len());
        for cat in accepts {
            if !cat.as_str().is_empty() && !deduped.contains(&cat) {
                deduped.push(cat);
            }
        }
        if deduped.is_empty() {
            return Err(ValidationError::EmptySlot { label });
        }
        Ok(Self {
            label,
            accepts: deduped,
        })
    }

    /// Convenience constructor from string labels.
    pub fn of(label: &str, accepts: &[&str]) -> Result<Self, ValidationError> {
        Self::new(label, accepts.iter().map(Category::new).collect())
    }

    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[inline]
    pub fn accepts(&self) -> &[Category] {
        &self.accepts
    }

    /// Returns true if the player is eligible for this slot.
    pub fn accepts_player(&self, player: &Player) -> bool {
        player.categories().iter().any(|c| self.accepts.contains(c))
    }

    /// Returns true if both slots accept exactly the same categories.
    pub fn same_eligibility(&self, other: &RosterSlot) -> bool {
        self.accepts.len() == other.accepts.len()
            && self.accepts.iter().all(|c| other.accepts.contains(c))
    }
}

impl fmt::Display for RosterSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cats: Vec<&str> = self.accepts.iter().map(Category::as_str).collect();
        write!(f, "{} [{}]", self.label, cats.join("/"))
    }
}

/// Ordered slot definitions for a contest format.
///
/// Fixed for the duration of an optimization run.
///
/// # Examples
///
/// ```
/// use courtside_core::RosterSpec;
///
/// let roster = RosterSpec::draftkings_classic();
/// assert_eq!(roster.len(), 8);
/// assert_eq!(roster.slots()[5].label(), "G");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RosterSpec {
    slots: Vec<RosterSlot>,
}

impl RosterSpec {
    /// Creates a roster from its slots.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyRoster`] when `slots` is empty.
    pub fn new(slots: Vec<RosterSlot>) -> Result<Self, ValidationError> {
        if slots.is_empty() {
            return Err(ValidationError::EmptyRoster);
        }
        Ok(Self { slots })
    }

    /// DraftKings NBA classic: PG, SG, SF, PF, C, G, F, UTIL.
    pub fn draftkings_classic() -> Self {
        const SLOTS: [(&str, &[&str]); 8] = [
            ("PG", &["PG"]),
            ("SG", &["SG"]),
            ("SF", &["SF"]),
            ("PF", &["PF"]),
            ("C", &["C"]),
            ("G", &["PG", "SG"]),
            ("F", &["SF", "PF"]),
            ("UTIL", &["PG", "SG", "SF", "PF", "C"]),
        ];
        let slots = SLOTS
            .iter()
            .map(|(label, accepts)| RosterSlot {
                label: (*label).to_string(),
                accepts: accepts.iter().map(Category::new).collect(),
            })
            .collect();
        Self { slots }
    }

    #[inline]
    pub fn slots(&self) -> &[RosterSlot] {
        &self.slots
    }

    /// Number of slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns the slot labels in order.
    pub fn labels(&self) -> Vec<&str> {
        self.slots.iter().map(RosterSlot::label).collect()
    }
}

impl Default for RosterSpec {
    fn default() -> Self {
        Self::draftkings_classic()
    }
}
