//! Structural feasibility checks run before the search.
//!
//! Slot filling is a bipartite matching between slots and eligible players.
//! Locked players are matched first; slot-side augmenting paths never unmatch
//! a player, so the locked players stay in the matching while the remaining
//! slots are filled. A slot with no augmenting path identifies a set of
//! slots with fewer eligible players than slots (Hall's condition).

use std::collections::HashMap;

use courtside_core::InfeasibleModelError;

use super::ConstraintModel;

pub(super) fn run(model: &ConstraintModel<'_>) -> Result<(), InfeasibleModelError> {
    let pool = model.pool();
    let roster = model.roster();
    let rules = model.rules();
    let locked = model.locked();

    if locked.len() > roster.len() {
        return Err(InfeasibleModelError::TooManyLocked {
            locked: locked.len(),
            slots: roster.len(),
        });
    }

    let locked_salary: u64 = locked
        .iter()
        .map(|&p| u64::from(pool.players()[p].salary()))
        .sum();
    if locked_salary > rules.salary_cap {
        return Err(InfeasibleModelError::LockedOverCap {
            salary: locked_salary,
            cap: rules.salary_cap,
        });
    }

    if let Some(max) = rules.max_per_team {
        let mut per_team: HashMap<&str, usize> = HashMap::new();
        for &p in locked {
            *per_team.entry(pool.players()[p].team()).or_default() += 1;
        }
        let mut over: Vec<(&str, usize)> =
            per_team.into_iter().filter(|(_, n)| *n > max).collect();
        over.sort_unstable();
        if let Some((team, count)) = over.first() {
            return Err(InfeasibleModelError::LockedOverTeamLimit {
                team: team.to_string(),
                count: *count,
                max,
            });
        }
    }

    let mut matching = Matching::new(model);

    for &p in locked {
        let mut seen_slots = vec![false; roster.len()];
        if !matching.augment_from_player(p, &mut seen_slots) {
            return Err(InfeasibleModelError::UnplaceableLocked {
                id: pool.players()[p].id().to_string(),
            });
        }
    }

    for s in 0..roster.len() {
        if matching.slot_match[s].is_some() {
            continue;
        }
        let mut seen_players = vec![false; pool.len()];
        if !matching.augment_from_slot(s, &mut seen_players) {
            let eligible = seen_players.iter().filter(|&&seen| seen).count();
            return Err(InfeasibleModelError::UnfillableSlot {
                slot: roster.slots()[s].label().to_string(),
                eligible,
                required: eligible + 1,
            });
        }
    }

    Ok(())
}

/// Slot/player matching over the model's variables.
struct Matching {
    slot_players: Vec<Vec<usize>>,
    player_slots: Vec<Vec<usize>>,
    slot_match: Vec<Option<usize>>,
    player_match: Vec<Option<usize>>,
}

impl Matching {
    fn new(model: &ConstraintModel<'_>) -> Self {
        let slots = model.roster().len();
        let players = model.pool().len();
        let mut slot_players = vec![Vec::new(); slots];
        let mut player_slots = vec![Vec::new(); players];
        for var in model.variables() {
            slot_players[var.slot].push(var.player);
            player_slots[var.player].push(var.slot);
        }
        Self {
            slot_players,
            player_slots,
            slot_match: vec![None; slots],
            player_match: vec![None; players],
        }
    }

    // Only locked players are matched while this runs.
    fn augment_from_player(&mut self, player: usize, seen_slots: &mut [bool]) -> bool {
        for i in 0..self.player_slots[player].len() {
            let slot = self.player_slots[player][i];
            if seen_slots[slot] {
                continue;
            }
            seen_slots[slot] = true;
            let free = match self.slot_match[slot] {
                None => true,
                Some(other) => self.augment_from_player(other, seen_slots),
            };
            if free {
                self.slot_match[slot] = Some(player);
                self.player_match[player] = Some(slot);
                return true;
            }
        }
        false
    }

    fn augment_from_slot(&mut self, slot: usize, seen_players: &mut [bool]) -> bool {
        for i in 0..self.slot_players[slot].len() {
            let player = self.slot_players[slot][i];
            if seen_players[player] {
                continue;
            }
            seen_players[player] = true;
            let free = match self.player_match[player] {
                None => true,
                Some(other) => self.augment_from_slot(other, seen_players),
            };
            if free {
                self.player_match[player] = Some(slot);
                self.slot_match[slot] = Some(player);
                return true;
            }
        }
        false
    }
}
