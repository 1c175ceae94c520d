//! Validated player pool.

use std::collections::HashMap;

use crate::error::ValidationError;
use crate::player::{Player, PlayerRecord};

/// A record that failed validation, with its position in the input.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedRecord {
    /// Zero-based position of the record in the input sequence.
    pub index: usize,
    pub error: ValidationError,
}

/// An immutable, validated collection of candidate players.
///
/// Player order is the input order and is stable for the lifetime of the
/// pool; solver variables refer to players by this index.
///
/// # Examples
///
/// ```
/// use courtside_core::{PlayerPool, PlayerRecord};
///
/// let (pool, rejected) = PlayerPool::from_records(vec![
///     PlayerRecord::new("1", "A", "BOS", &["PG"], 8_000, 50.0),
///     PlayerRecord::new("2", "B", "BOS", &["SG"], -1, 45.0),
/// ]);
/// assert_eq!(pool.len(), 1);
/// assert_eq!(rejected.len(), 1);
/// assert_eq!(rejected[0].index, 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PlayerPool {
    players: Vec<Player>,
    by_id: HashMap<String, usize>,
}

impl PlayerPool {
    /// Builds a pool, failing on the first invalid or duplicate player.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::DuplicateIdentifier`] if two players share
    /// an identifier.
    pub fn new(players: Vec<Player>) -> Result<Self, ValidationError> {
        let mut by_id = HashMap::with_capacity(players.len());
        for (idx, player) in players.iter().enumerate() {
            if by_id.insert(player.id().to_string(), idx).is_some() {
                return Err(ValidationError::DuplicateIdentifier {
                    id: player.id().to_string(),
                });
            }
        }
        Ok(Self { players, by_id })
    }

    /// Builds a pool from raw records, failing on the first bad record.
    pub fn try_from_records(records: Vec<PlayerRecord>) -> Result<Self, ValidationError> {
        let players = records
            .into_iter()
            .map(Player::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(players)
    }

    /// Builds a pool from raw records, keeping every valid one.
    ///
    /// Invalid records and later duplicates of an identifier are returned
    /// as rejections; the first occurrence of an identifier wins.
    pub fn from_records(records: Vec<PlayerRecord>) -> (Self, Vec<RejectedRecord>) {
        let mut players = Vec::with_capacity(records.len());
        let mut by_id = HashMap::with_capacity(records.len());
        let mut rejected = Vec::new();

        for (index, record) in records.into_iter().enumerate() {
            match Player::try_from(record) {
                Ok(player) if by_id.contains_key(player.id()) => {
                    rejected.push(RejectedRecord {
                        index,
                        error: ValidationError::DuplicateIdentifier {
                            id: player.id().to_string(),
                        },
                    });
                }
                Ok(player) => {
                    by_id.insert(player.id().to_string(), players.len());
                    players.push(player);
                }
                Err(error) => rejected.push(RejectedRecord { index, error }),
            }
        }

        (Self { players, by_id }, rejected)
    }

    /// Players in input order.
    #[inline]
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Player> {
        self.players.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.players.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Looks up a player by identifier.
    pub fn get(&self, id: &str) -> Option<&Player> {
        self.index_of(id).map(|idx| &self.players[idx])
    }

    /// Returns the pool index of the player with the given identifier.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.by_id.get(id.trim()).copied()
    }

    /// Returns the distinct teams represented in the pool, sorted.
    pub fn teams(&self) -> Vec<&str> {
        let mut teams: Vec<&str> = self.players.iter().map(Player::team).collect();
        teams.sort_unstable();
        teams.dedup();
        teams
    }
}

impl<'a> IntoIterator for &'a PlayerPool {
    type Item = &'a Player;
    type IntoIter = std::slice::Iter<'a, Player>;

    fn into_iter(self) -> Self::IntoIter {
        self.players.iter()
    }
}
