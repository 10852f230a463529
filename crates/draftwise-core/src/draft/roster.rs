// Roster slot view for the user's team.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use super::pick::Position;
use crate::valuation::projections::Player;
use crate::valuation::suggest::position_counts;

/// A single slot on the user's roster.
#[derive(Debug, Clone, Serialize)]
pub struct RosterSlot {
    /// The position designation of this slot.
    pub position: Position,
    /// The player occupying this slot, if any.
    pub player: Option<Player>,
}

/// The user's roster laid out by slot.
#[derive(Debug, Clone, Serialize)]
pub struct RosterView {
    pub slots: Vec<RosterSlot>,
    /// Players that fit no slot.
    pub overflow: Vec<Player>,
    pub counts: HashMap<Position, usize>,
}

/// Empty slots built from a position -> count layout such as
/// `{"QB": 2, "RB": 2, "FLEX": 1, "BE": 6}`, in `Position::sort_order()`.
pub fn empty_slots(roster_config: &HashMap<String, usize>) -> Vec<RosterSlot> {
    let mut slots: Vec<RosterSlot> = Vec::new();

    for (pos_str, &count) in roster_config {
        if let Some(pos) = Position::from_str_pos(pos_str) {
            for _ in 0..count {
                slots.push(RosterSlot {
                    position: pos,
                    player: None,
                });
            }
        }
    }

    slots.sort_by_key(|s| s.position.sort_order());
    slots
}

impl RosterView {
    /// Assign `players` to the layout's slots.
    ///
    /// Slots are filled in layout order:
    /// 1. Dedicated slot: first unused player at that position
    /// 2. FLEX: first unused RB/WR/TE
    /// 3. Bench: first unused player of any position
    ///
    /// Players are considered in the order given (draft order).
    pub fn build(roster_config: &HashMap<String, usize>, players: &[Player]) -> Self {
        let mut slots = empty_slots(roster_config);
        let mut used: HashSet<usize> = HashSet::new();

        for slot in slots.iter_mut() {
            let pick = players.iter().enumerate().position(|(i, p)| {
                !used.contains(&i)
                    && match slot.position {
                        Position::Flex => p.position.is_flex_eligible(),
                        Position::Bench => true,
                        pos => p.position == pos,
                    }
            });
            if let Some(i) = pick {
                used.insert(i);
                slot.player = Some(players[i].clone());
            }
        }

        let overflow = players
            .iter()
            .enumerate()
            .filter(|(i, _)| !used.contains(i))
            .map(|(_, p)| p.clone())
            .collect();

        RosterView {
            slots,
            overflow,
            counts: position_counts(players),
        }
    }

    /// Number of slots holding a player.
    pub fn filled_count(&self) -> usize {
        self.slots.iter().filter(|s| s.player.is_some()).count()
    }

    /// Count of empty slots.
    pub fn empty_count(&self) -> usize {
        self.slots.len() - self.filled_count()
    }

    /// Number of rostered players at `pos`.
    pub fn count_at(&self, pos: Position) -> usize {
        self.counts.get(&pos).copied().unwrap_or(0)
    }
}
