// Draft suggestions: value-based scoring and the bounded suggestion queue.
//
// Score = round(VOR x need x open-slot x scarcity x saturation). The queue
// shows the top `queue_size` players (at most `max_qbs` quarterbacks) and is
// updated incrementally on draft events so entries on screen stay put.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::config::{LeagueConfig, StrategyConfig};
use crate::draft::pick::Position;
use crate::valuation::need::{roster_need, NeedBreakdown};
use crate::valuation::projections::Player;
use crate::valuation::vor::{compute_vor, determine_replacement_levels};

/// A scored candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct Suggestion {
    pub player: Player,
    /// Final rounded draft value score.
    pub score: i64,
    /// Projection minus positional baseline, before need weighting.
    pub vor: f64,
    pub breakdown: NeedBreakdown,
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// Count of rostered players per position.
pub fn position_counts(roster: &[Player]) -> HashMap<Position, usize> {
    let mut counts = HashMap::new();
    for p in roster {
        *counts.entry(p.position).or_insert(0) += 1;
    }
    counts
}

/// Score every available player against the current roster, sorted by score
/// descending (ties by projection descending, then name).
pub fn score_players(
    available: &[Player],
    roster: &[Player],
    league: &LeagueConfig,
    strategy: &StrategyConfig,
) -> Vec<Suggestion> {
    let replacement_levels = determine_replacement_levels(available, league);
    let counts = position_counts(roster);

    let mut scored: Vec<Suggestion> = available
        .iter()
        .map(|player| {
            let held = counts.get(&player.position).copied().unwrap_or(0);
            let vor = compute_vor(player, &replacement_levels);
            let breakdown = roster_need(player.position, held, league, strategy);
            Suggestion {
                player: player.clone(),
                score: (vor * breakdown.multiplier()).round() as i64,
                vor,
                breakdown,
            }
        })
        .collect();

    scored.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| {
                b.player
                    .projected_points
                    .partial_cmp(&a.player.projected_points)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .then_with(|| a.player.name.cmp(&b.player.name))
    });

    scored
}

/// Ranked candidates excluding rostered players and every id in `exclude`.
pub fn rank_candidates(
    available: &[Player],
    roster: &[Player],
    exclude: &HashSet<String>,
    league: &LeagueConfig,
    strategy: &StrategyConfig,
) -> Vec<Suggestion> {
    let rostered: HashSet<&str> = roster.iter().map(|p| p.id.as_str()).collect();
    score_players(available, roster, league, strategy)
        .into_iter()
        .filter(|s| !rostered.contains(s.player.id.as_str()) && !exclude.contains(&s.player.id))
        .collect()
}

// ---------------------------------------------------------------------------
// Suggestion queue
// ---------------------------------------------------------------------------

/// Bounded, ordered list of suggestions shown to the user.
#[derive(Debug, Clone)]
pub struct SuggestionQueue {
    entries: Vec<Suggestion>,
    capacity: usize,
    max_qbs: usize,
}

impl SuggestionQueue {
    pub fn new(capacity: usize, max_qbs: usize) -> Self {
        SuggestionQueue {
            entries: Vec::with_capacity(capacity),
            capacity,
            max_qbs,
        }
    }

    pub fn from_strategy(strategy: &StrategyConfig) -> Self {
        Self::new(
            strategy.suggestions.queue_size,
            strategy.suggestions.max_qbs,
        )
    }

    pub fn entries(&self) -> &[Suggestion] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, player_id: &str) -> bool {
        self.entries.iter().any(|s| s.player.id == player_id)
    }

    /// Ids currently on screen.
    pub fn shown_ids(&self) -> HashSet<String> {
        self.entries.iter().map(|s| s.player.id.clone()).collect()
    }

    fn qb_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|s| s.player.position == Position::Quarterback)
            .count()
    }

    /// Discard the current queue and select from scratch.
    pub fn rebuild(
        &mut self,
        available: &[Player],
        roster: &[Player],
        league: &LeagueConfig,
        strategy: &StrategyConfig,
    ) {
        self.entries.clear();
        let candidates = rank_candidates(available, roster, &HashSet::new(), league, strategy);
        self.fill_from(candidates);
    }

    /// Apply a draft event without reshuffling what is already shown.
    ///
    /// Drops the drafted player and any entry no longer in `available` (or
    /// now on `roster`), then appends newly ranked players, excluding
    /// everyone still shown, until the queue is back at capacity.
    pub fn on_player_drafted(
        &mut self,
        drafted_id: &str,
        available: &[Player],
        roster: &[Player],
        league: &LeagueConfig,
        strategy: &StrategyConfig,
    ) {
        let available_ids: HashSet<&str> = available.iter().map(|p| p.id.as_str()).collect();
        let rostered: HashSet<&str> = roster.iter().map(|p| p.id.as_str()).collect();
        let before = self.entries.len();
        self.entries.retain(|s| {
            let id = s.player.id.as_str();
            id != drafted_id && available_ids.contains(id) && !rostered.contains(id)
        });

        if self.entries.len() == before {
            debug!("drafted player {} was not in the suggestion queue", drafted_id);
        }
        if self.entries.len() >= self.capacity {
            return;
        }

        let shown = self.shown_ids();
        let candidates = rank_candidates(available, roster, &shown, league, strategy);
        let added = self.fill_from(candidates);
        debug!(
            "suggestion queue refilled with {} player(s), now {}",
            added,
            self.entries.len()
        );
    }

    /// Append candidates in order while respecting capacity and the QB cap.
    /// Returns how many were added.
    fn fill_from(&mut self, candidates: Vec<Suggestion>) -> usize {
        let mut added = 0;
        let mut qbs = self.qb_count();
        for candidate in candidates {
            if self.entries.len() >= self.capacity {
                break;
            }
            if self.contains(&candidate.player.id) {
                continue;
            }
            if candidate.player.position == Position::Quarterback {
                if qbs >= self.max_qbs {
                    continue;
                }
                qbs += 1;
            }
            self.entries.push(candidate);
            added += 1;
        }
        added
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
