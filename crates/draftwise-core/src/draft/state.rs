// Draft state: the ordered log of drafted players.

use std::collections::HashSet;

use chrono::Utc;
use tracing::info;

use super::pick::{snake_seat, DraftEntry, DraftSide};
use crate::valuation::projections::Player;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DraftError {
    #[error("{name} was already drafted ({})", .side.label())]
    AlreadyDrafted { name: String, side: DraftSide },

    #[error("there is no pick {pick} ({made} made so far)")]
    NoSuchPick { pick: u32, made: usize },
}

/// Everything drafted so far, in pick order.
#[derive(Debug, Clone)]
pub struct DraftState {
    entries: Vec<DraftEntry>,
    num_teams: u32,
}

impl DraftState {
    pub fn new(num_teams: usize) -> Self {
        DraftState {
            entries: Vec::new(),
            num_teams: num_teams as u32,
        }
    }

    pub fn num_teams(&self) -> u32 {
        self.num_teams
    }

    /// The draft log in pick order.
    pub fn entries(&self) -> &[DraftEntry] {
        &self.entries
    }

    pub fn draft_to_mine(&mut self, player: &Player) -> Result<&DraftEntry, DraftError> {
        self.record(player, DraftSide::Mine)
    }

    pub fn draft_to_others(&mut self, player: &Player) -> Result<&DraftEntry, DraftError> {
        self.record(player, DraftSide::Others)
    }

    fn record(&mut self, player: &Player, side: DraftSide) -> Result<&DraftEntry, DraftError> {
        if let Some(existing) = self.entry_for(&player.id) {
            return Err(DraftError::AlreadyDrafted {
                name: player.name.clone(),
                side: existing.side,
            });
        }

        let pick_number = self.entries.len() as u32 + 1;
        info!(
            "pick {}: {} ({} {}) -> {}",
            pick_number,
            player.name,
            player.position,
            player.team,
            side.label()
        );
        self.entries.push(DraftEntry {
            pick_number,
            player: player.clone(),
            side,
            drafted_at: Utc::now(),
        });
        Ok(&self.entries[self.entries.len() - 1])
    }

    /// Remove a player from the log and renumber the picks after it.
    pub fn undraft(&mut self, player_id: &str) -> Option<DraftEntry> {
        let idx = self.entries.iter().position(|e| e.player.id == player_id)?;
        let removed = self.entries.remove(idx);
        self.renumber_from(idx);
        info!(
            "undrafted {} (was pick {})",
            removed.player.name, removed.pick_number
        );
        Some(removed)
    }

    /// Exchange the players taken at two pick numbers. Each player keeps its
    /// side; only the slot in the log changes.
    pub fn swap(&mut self, pick_a: u32, pick_b: u32) -> Result<(), DraftError> {
        let a = self.index_of(pick_a)?;
        let b = self.index_of(pick_b)?;
        if a == b {
            return Ok(());
        }
        self.entries.swap(a, b);
        self.renumber_from(a.min(b));
        info!(
            "swapped picks {} and {}: now {} and {}",
            pick_a, pick_b, self.entries[a].player.name, self.entries[b].player.name
        );
        Ok(())
    }

    fn index_of(&self, pick: u32) -> Result<usize, DraftError> {
        let idx = (pick as usize).wrapping_sub(1);
        if idx < self.entries.len() {
            Ok(idx)
        } else {
            Err(DraftError::NoSuchPick {
                pick,
                made: self.entries.len(),
            })
        }
    }

    fn renumber_from(&mut self, idx: usize) {
        for (i, entry) in self.entries.iter_mut().enumerate().skip(idx) {
            entry.pick_number = i as u32 + 1;
        }
    }

    /// Forget every pick. Returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        info!("draft cleared ({} picks removed)", count);
        count
    }

    pub fn entry_for(&self, player_id: &str) -> Option<&DraftEntry> {
        self.entries.iter().find(|e| e.player.id == player_id)
    }

    pub fn is_drafted(&self, player_id: &str) -> bool {
        self.entry_for(player_id).is_some()
    }

    /// The user's players in draft order.
    pub fn my_players(&self) -> Vec<Player> {
        self.players_on(DraftSide::Mine)
    }

    /// Players taken by the other teams, in draft order.
    pub fn other_players(&self) -> Vec<Player> {
        self.players_on(DraftSide::Others)
    }

    fn players_on(&self, side: DraftSide) -> Vec<Player> {
        self.entries
            .iter()
            .filter(|e| e.side == side)
            .map(|e| e.player.clone())
            .collect()
    }

    pub fn drafted_ids(&self) -> HashSet<String> {
        self.entries.iter().map(|e| e.player.id.clone()).collect()
    }

    pub fn pick_count(&self) -> usize {
        self.entries.len()
    }

    /// Pool players nobody has drafted, in pool order.
    pub fn available(&self, pool: &[Player]) -> Vec<Player> {
        let drafted = self.drafted_ids();
        pool.iter()
            .filter(|p| !drafted.contains(&p.id))
            .cloned()
            .collect()
    }

    /// 1-based (round, pick within round) of the next pick.
    pub fn round_and_pick(&self) -> (u32, u32) {
        if self.num_teams == 0 {
            return (1, 1);
        }
        let total = self.entries.len() as u32;
        (total / self.num_teams + 1, total % self.num_teams + 1)
    }

    /// Draft seat (1-based) that owns the next pick.
    pub fn on_the_clock(&self) -> u32 {
        snake_seat(self.entries.len() as u32 + 1, self.num_teams)
    }
}
