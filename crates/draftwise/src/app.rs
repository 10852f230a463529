// Application state and orchestration logic.
//
// The event loop owns every piece of mutable state. It consumes commands
// from the console and pushes UI updates back; nothing else mutates the
// draft.

use std::collections::HashMap;

use tokio::sync::mpsc;
use tracing::{info, warn};

use draftwise_core::draft::board::DraftBoard;
use draftwise_core::draft::pick::{DraftEntry, DraftSide, Position};
use draftwise_core::draft::roster::RosterView;
use draftwise_core::draft::state::{DraftError, DraftState};
use draftwise_core::valuation::projections::{
    browse, find_player, BrowseSort, LookupError, Player,
};
use draftwise_core::valuation::scarcity::{compute_scarcity, scarcity_for_position, ScarcityEntry};
use draftwise_core::valuation::suggest::SuggestionQueue;
use draftwise_core::valuation::vor::{compute_vor, determine_replacement_levels};

use crate::config::Config;
use crate::protocol::{
    BoardCell, BoardSnapshot, DraftProgress, ListingRow, ListingSnapshot, SuggestionsSnapshot,
    UiUpdate, UserCommand,
};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a user command could not be applied. Reported to the console; never
/// ends the loop.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Draft(#[from] DraftError),

    #[error("{0} has not been drafted")]
    NotDrafted(String),
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

/// The complete application state.
pub struct AppState {
    pub config: Config,
    /// Every loaded player, drafted or not.
    pub pool: Vec<Player>,
    pub draft_state: DraftState,
    pub queue: SuggestionQueue,
    /// Free-text notes by player id. Kept across undraft and clear.
    pub notes: HashMap<String, String>,
}

impl AppState {
    pub fn new(config: Config, pool: Vec<Player>) -> Self {
        let draft_state = DraftState::new(config.league.num_teams);
        let queue = SuggestionQueue::from_strategy(&config.strategy);
        let mut state = AppState {
            config,
            pool,
            draft_state,
            queue,
            notes: HashMap::new(),
        };
        state.rebuild_queue();
        state
    }

    /// Undrafted players in pool order.
    pub fn available(&self) -> Vec<Player> {
        self.draft_state.available(&self.pool)
    }

    fn rebuild_queue(&mut self) {
        let available = self.available();
        let roster = self.draft_state.my_players();
        self.queue
            .rebuild(&available, &roster, &self.config.league, &self.config.strategy);
    }

    /// Draft the player matching `query` to `side`.
    pub fn draft(&mut self, query: &str, side: DraftSide) -> Result<DraftEntry, CommandError> {
        let player = find_player(&self.pool, query)?.clone();
        let entry = match side {
            DraftSide::Mine => self.draft_state.draft_to_mine(&player)?,
            DraftSide::Others => self.draft_state.draft_to_others(&player)?,
        }
        .clone();

        let available = self.available();
        let roster = self.draft_state.my_players();
        self.queue.on_player_drafted(
            &player.id,
            &available,
            &roster,
            &self.config.league,
            &self.config.strategy,
        );
        Ok(entry)
    }

    /// Return the drafted player matching `query` to the pool.
    pub fn undraft(&mut self, query: &str) -> Result<DraftEntry, CommandError> {
        let mut drafted = self.draft_state.my_players();
        drafted.extend(self.draft_state.other_players());
        let player = match find_player(&drafted, query) {
            Ok(p) => p.clone(),
            Err(LookupError::NotFound(q)) => return Err(CommandError::NotDrafted(q)),
            Err(e) => return Err(e.into()),
        };
        let entry = self
            .draft_state
            .undraft(&player.id)
            .ok_or_else(|| CommandError::NotDrafted(player.name.clone()))?;
        self.rebuild_queue();
        Ok(entry)
    }

    /// Exchange two picks in the log, then rebuild the queue.
    pub fn swap_picks(&mut self, pick_a: u32, pick_b: u32) -> Result<(), CommandError> {
        self.draft_state.swap(pick_a, pick_b)?;
        self.rebuild_queue();
        Ok(())
    }

    /// Attach `text` to the player matching `query`, or clear the note when
    /// `text` is blank. Drafted players can carry notes too.
    pub fn set_note(&mut self, query: &str, text: &str) -> Result<Player, CommandError> {
        let player = find_player(&self.pool, query)?.clone();
        let text = text.trim();
        if text.is_empty() {
            self.notes.remove(&player.id);
        } else {
            self.notes.insert(player.id.clone(), text.to_string());
        }
        Ok(player)
    }

    pub fn note_for(&self, player_id: &str) -> Option<&str> {
        self.notes.get(player_id).map(String::as_str)
    }

    /// Reset the draft. Returns how many picks were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.draft_state.clear();
        self.rebuild_queue();
        removed
    }

    pub fn progress(&self) -> DraftProgress {
        let (round, pick_in_round) = self.draft_state.round_and_pick();
        DraftProgress {
            round,
            pick_in_round,
            on_the_clock: self.draft_state.on_the_clock(),
            num_teams: self.draft_state.num_teams(),
            picks_made: self.draft_state.pick_count(),
        }
    }

    pub fn suggestions_snapshot(&self) -> SuggestionsSnapshot {
        SuggestionsSnapshot {
            progress: self.progress(),
            entries: self.queue.entries().to_vec(),
            notes: self
                .queue
                .entries()
                .iter()
                .filter_map(|s| {
                    self.note_for(&s.player.id)
                        .map(|n| (s.player.id.clone(), n.to_string()))
                })
                .collect(),
        }
    }

    pub fn roster_view(&self) -> RosterView {
        RosterView::build(&self.config.league.roster, &self.draft_state.my_players())
    }

    pub fn board_snapshot(&self) -> BoardSnapshot {
        let num_teams = self.config.league.num_teams;
        let board = DraftBoard::build(
            self.draft_state.entries(),
            num_teams,
            self.config.league.roster_size(),
        );
        let rows = (1..=board.rounds())
            .map(|round| {
                (1..=num_teams)
                    .map(|seat| {
                        board.get(round, seat).map(|e| BoardCell {
                            pick_number: e.pick_number,
                            name: e.player.display_name().to_string(),
                            position: e.player.position,
                            side: e.side,
                        })
                    })
                    .collect()
            })
            .collect();
        BoardSnapshot { num_teams, rows }
    }

    pub fn scarcity(&self) -> Vec<ScarcityEntry> {
        let available = self.available();
        let levels = determine_replacement_levels(&available, &self.config.league);
        compute_scarcity(&available, &levels)
    }

    /// Available players filtered by position and search text. A position
    /// filter also reports that position's scarcity.
    pub fn listing(
        &self,
        position: Option<Position>,
        search: Option<&str>,
        sort: BrowseSort,
    ) -> ListingSnapshot {
        let available = self.available();
        let levels = determine_replacement_levels(&available, &self.config.league);
        let rows = browse(&available, position, search, sort)
            .into_iter()
            .map(|p| ListingRow {
                player: p.clone(),
                vor: compute_vor(p, &levels),
                note: self.note_for(&p.id).map(str::to_string),
            })
            .collect();
        let scarcity = position.and_then(|pos| {
            let all = compute_scarcity(&available, &levels);
            scarcity_for_position(&all, pos).cloned()
        });
        ListingSnapshot { rows, scarcity }
    }
}

// ---------------------------------------------------------------------------
// Event loop
// ---------------------------------------------------------------------------

/// Main application event loop.
///
/// Runs until `UserCommand::Quit`, the command channel closing, or Ctrl+C.
pub async fn run(
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    ui_tx: mpsc::Sender<UiUpdate>,
    mut state: AppState,
) -> anyhow::Result<()> {
    info!(
        "Application event loop started ({} players in pool)",
        state.pool.len()
    );

    let _ = ui_tx
        .send(UiUpdate::Suggestions(Box::new(state.suggestions_snapshot())))
        .await;

    loop {
        tokio::select! {
            cmd = cmd_rx.recv() => {
                match cmd {
                    Some(UserCommand::Quit) => {
                        info!("Quit command received, shutting down");
                        break;
                    }
                    Some(cmd) => {
                        handle_user_command(&mut state, cmd, &ui_tx).await;
                    }
                    None => {
                        info!("Command channel closed, shutting down");
                        break;
                    }
                }
            }

            _ = tokio::signal::ctrl_c() => {
                info!("Ctrl+C received, shutting down");
                break;
            }
        }
    }

    info!(
        "Application event loop exiting after {} picks",
        state.draft_state.pick_count()
    );
    Ok(())
}

async fn handle_user_command(
    state: &mut AppState,
    cmd: UserCommand,
    ui_tx: &mpsc::Sender<UiUpdate>,
) {
    match cmd {
        UserCommand::DraftMine(query) => {
            draft_and_report(state, &query, DraftSide::Mine, ui_tx).await;
        }
        UserCommand::DraftTheirs(query) => {
            draft_and_report(state, &query, DraftSide::Others, ui_tx).await;
        }
        UserCommand::Undraft(query) => match state.undraft(&query) {
            Ok(entry) => {
                let _ = ui_tx.send(UiUpdate::Undrafted(Box::new(entry))).await;
                send_suggestions(state, ui_tx).await;
            }
            Err(e) => {
                warn!("undraft '{}' failed: {}", query, e);
                let _ = ui_tx.send(UiUpdate::Error(e.to_string())).await;
            }
        },
        UserCommand::SwapPicks(a, b) => match state.swap_picks(a, b) {
            Ok(()) => {
                let _ = ui_tx
                    .send(UiUpdate::Message(format!("Swapped picks {a} and {b}")))
                    .await;
                let _ = ui_tx
                    .send(UiUpdate::Board(Box::new(state.board_snapshot())))
                    .await;
                send_suggestions(state, ui_tx).await;
            }
            Err(e) => {
                warn!("swap {} <-> {} failed: {}", a, b, e);
                let _ = ui_tx.send(UiUpdate::Error(e.to_string())).await;
            }
        },
        UserCommand::Note { player, text } => match state.set_note(&player, &text) {
            Ok(p) => {
                let msg = if text.trim().is_empty() {
                    format!("Cleared note for {}", p.name)
                } else if state.draft_state.is_drafted(&p.id) {
                    format!("Note saved for {} (already drafted)", p.name)
                } else {
                    format!("Note saved for {}", p.name)
                };
                let _ = ui_tx.send(UiUpdate::Message(msg)).await;
            }
            Err(e) => {
                warn!("note for '{}' failed: {}", player, e);
                let _ = ui_tx.send(UiUpdate::Error(e.to_string())).await;
            }
        },
        UserCommand::ClearDraft => {
            let removed = state.clear();
            let _ = ui_tx
                .send(UiUpdate::Message(format!(
                    "Draft cleared ({removed} picks removed)"
                )))
                .await;
            send_suggestions(state, ui_tx).await;
        }
        UserCommand::ShowSuggestions => send_suggestions(state, ui_tx).await,
        UserCommand::ShowRoster => {
            let _ = ui_tx
                .send(UiUpdate::Roster(Box::new(state.roster_view())))
                .await;
        }
        UserCommand::ShowBoard => {
            let _ = ui_tx
                .send(UiUpdate::Board(Box::new(state.board_snapshot())))
                .await;
        }
        UserCommand::ShowScarcity => {
            let _ = ui_tx.send(UiUpdate::Scarcity(state.scarcity())).await;
        }
        UserCommand::List {
            position,
            search,
            sort,
        } => {
            let listing = state.listing(position, search.as_deref(), sort);
            let _ = ui_tx.send(UiUpdate::Listing(Box::new(listing))).await;
        }
        UserCommand::Help => {
            let _ = ui_tx.send(UiUpdate::Help).await;
        }
        UserCommand::Quit => {
            // Handled in the main loop
        }
    }
}

async fn draft_and_report(
    state: &mut AppState,
    query: &str,
    side: DraftSide,
    ui_tx: &mpsc::Sender<UiUpdate>,
) {
    match state.draft(query, side) {
        Ok(entry) => {
            let _ = ui_tx.send(UiUpdate::Drafted(Box::new(entry))).await;
            send_suggestions(state, ui_tx).await;
        }
        Err(e) => {
            warn!("draft '{}' to {} failed: {}", query, side.label(), e);
            let _ = ui_tx.send(UiUpdate::Error(e.to_string())).await;
        }
    }
}

async fn send_suggestions(state: &AppState, ui_tx: &mpsc::Sender<UiUpdate>) {
    let _ = ui_tx
        .send(UiUpdate::Suggestions(Box::new(state.suggestions_snapshot())))
        .await;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DataPaths;
    use draftwise_core::config::{LeagueConfig, StrategyConfig};
    use std::collections::HashSet;

    fn test_config() -> Config {
        Config {
            league: LeagueConfig::default(),
            strategy: StrategyConfig::default(),
            data_paths: DataPaths {
                rankings: "unused.json".into(),
            },
        }
    }

    fn test_pool() -> Vec<Player> {
        let mut pool = Vec::new();
        let specs: &[(&str, Position, f64, f64)] = &[
            ("QB", Position::Quarterback, 360.0, 5.0),
            ("RB", Position::RunningBack, 300.0, 7.0),
            ("WR", Position::WideReceiver, 290.0, 6.0),
            ("TE", Position::TightEnd, 210.0, 8.0),
            ("K", Position::Kicker, 150.0, 2.0),
            ("DEF", Position::Defense, 140.0, 3.0),
        ];
        for &(prefix, pos, top, step) in specs {
            for i in 0..25 {
                pool.push(Player::new(
                    &format!("{prefix} Player {}", i + 1),
                    pos,
                    "TST",
                    top - i as f64 * step,
                ));
            }
        }
        pool
    }

    fn create_test_app_state() -> AppState {
        AppState::new(test_config(), test_pool())
    }

    fn queue_ids(state: &AppState) -> Vec<String> {
        state
            .queue
            .entries()
            .iter()
            .map(|s| s.player.id.clone())
            .collect()
    }

    // -----------------------------------------------------------------------
    // Tests: state transitions
    // -----------------------------------------------------------------------

    #[test]
    fn new_state_has_full_queue() {
        let state = create_test_app_state();
        assert_eq!(state.queue.len(), 5);
        assert_eq!(state.available().len(), 150);
    }

    #[test]
    fn draft_mine_updates_roster_and_queue() {
        let mut state = create_test_app_state();
        let top = state.queue.entries()[0].player.clone();

        let entry = state.draft(&top.name, DraftSide::Mine).unwrap();

        assert_eq!(entry.pick_number, 1);
        assert_eq!(entry.side, DraftSide::Mine);
        assert_eq!(state.draft_state.my_players(), vec![top.clone()]);
        assert!(!state.queue.contains(&top.id));
        assert_eq!(state.queue.len(), 5);
        assert_eq!(state.available().len(), 149);
    }

    #[test]
    fn draft_theirs_keeps_my_roster_empty() {
        let mut state = create_test_app_state();
        state.draft("RB Player 1", DraftSide::Others).unwrap();

        assert!(state.draft_state.my_players().is_empty());
        assert_eq!(state.draft_state.other_players().len(), 1);
        assert!(state.roster_view().filled_count() == 0);
    }

    #[test]
    fn drafting_twice_reports_error() {
        let mut state = create_test_app_state();
        state.draft("RB Player 1", DraftSide::Others).unwrap();

        let err = state.draft("RB Player 1", DraftSide::Mine).unwrap_err();

        assert!(matches!(err, CommandError::Draft(DraftError::AlreadyDrafted { .. })));
        assert_eq!(state.draft_state.pick_count(), 1);
    }

    #[test]
    fn unknown_and_ambiguous_queries() {
        let mut state = create_test_app_state();

        let err = state.draft("Nobody", DraftSide::Mine).unwrap_err();
        assert!(matches!(err, CommandError::Lookup(LookupError::NotFound(_))));

        let err = state.draft("RB Player", DraftSide::Mine).unwrap_err();
        assert!(matches!(err, CommandError::Lookup(LookupError::Ambiguous { .. })));
    }

    #[test]
    fn undraft_returns_player_to_pool() {
        let mut state = create_test_app_state();
        state.draft("WR Player 1", DraftSide::Mine).unwrap();
        state.draft("TE Player 1", DraftSide::Others).unwrap();

        let entry = state.undraft("WR Player 1").unwrap();

        assert_eq!(entry.player.name, "WR Player 1");
        assert_eq!(state.draft_state.pick_count(), 1);
        assert_eq!(state.draft_state.entries()[0].pick_number, 1);
        assert_eq!(state.available().len(), 149);
    }

    #[test]
    fn undraft_searches_both_sides_only() {
        let mut state = create_test_app_state();
        state.draft("RB Player 1", DraftSide::Mine).unwrap();
        state.draft("WR Player 7", DraftSide::Others).unwrap();

        // Ambiguous across the pool, unique among drafted players.
        let entry = state.undraft("player 7").unwrap();

        assert_eq!(entry.player.name, "WR Player 7");
        assert_eq!(state.undraft("player 1").unwrap().player.name, "RB Player 1");
    }

    #[test]
    fn undraft_of_undrafted_player_fails() {
        let mut state = create_test_app_state();
        let err = state.undraft("QB Player 1").unwrap_err();
        assert!(matches!(err, CommandError::NotDrafted(_)));
    }

    #[test]
    fn clear_restores_initial_queue() {
        let mut state = create_test_app_state();
        let initial = queue_ids(&state);
        for name in ["RB Player 1", "WR Player 1", "QB Player 1"] {
            state.draft(name, DraftSide::Mine).unwrap();
        }

        assert_eq!(state.clear(), 3);
        assert_eq!(queue_ids(&state), initial);
    }

    #[test]
    fn queue_never_shows_drafted_players() {
        let mut state = create_test_app_state();
        let mut drafted = HashSet::new();
        for pick in 0..30 {
            let next = state.queue.entries()[0].player.clone();
            let side = if pick % 3 == 0 {
                DraftSide::Mine
            } else {
                DraftSide::Others
            };
            state.draft(&next.id, side).unwrap();
            drafted.insert(next.id);

            let ids = queue_ids(&state);
            assert!(ids.iter().all(|id| !drafted.contains(id)));
            let qbs = state
                .queue
                .entries()
                .iter()
                .filter(|s| s.player.position == Position::Quarterback)
                .count();
            assert!(qbs <= 2);
        }
    }

    #[test]
    fn progress_tracks_snake_order() {
        let mut state = create_test_app_state();
        for i in 0..11 {
            state
                .draft(&format!("K Player {}", i + 1), DraftSide::Others)
                .unwrap();
        }

        let progress = state.progress();
        assert_eq!(progress.round, 2);
        assert_eq!(progress.pick_in_round, 2);
        // Pick 12 of a 10-team snake belongs to seat 9.
        assert_eq!(progress.on_the_clock, 9);
        assert_eq!(progress.picks_made, 11);
    }

    #[test]
    fn board_snapshot_covers_roster_rounds() {
        let mut state = create_test_app_state();
        for i in 0..11 {
            state
                .draft(&format!("DEF Player {}", i + 1), DraftSide::Others)
                .unwrap();
        }

        let board = state.board_snapshot();

        assert_eq!(board.rows.len(), 16);
        assert_eq!(board.rows[0][0].as_ref().unwrap().pick_number, 1);
        // Round 2 runs backwards: pick 11 sits in the last seat.
        assert_eq!(board.rows[1][9].as_ref().unwrap().pick_number, 11);
        assert!(board.rows[1][0].is_none());
    }

    #[test]
    fn listing_filters_available_players() {
        let mut state = create_test_app_state();
        state.draft("TE Player 1", DraftSide::Others).unwrap();

        let listing = state.listing(Some(Position::TightEnd), None, BrowseSort::Rank);

        assert_eq!(listing.rows.len(), 24);
        assert_eq!(listing.rows[0].player.name, "TE Player 2");
        assert!(listing.rows[0].vor > 0.0);
        let te = listing.scarcity.expect("position filter reports scarcity");
        assert_eq!(te.position, Position::TightEnd);

        let listing = state.listing(None, Some("player 25"), BrowseSort::Points);
        assert_eq!(listing.rows.len(), 6);
        assert!(listing.scarcity.is_none());
    }

    #[test]
    fn notes_show_in_listing_and_suggestions() {
        let mut state = create_test_app_state();
        let top = state.queue.entries()[0].player.clone();

        state.set_note(&top.name, "  injury risk ").unwrap();
        state.set_note("K Player 3", "strong leg").unwrap();

        assert_eq!(state.note_for(&top.id), Some("injury risk"));
        let snapshot = state.suggestions_snapshot();
        assert_eq!(snapshot.notes.get(&top.id).map(String::as_str), Some("injury risk"));
        assert_eq!(snapshot.notes.len(), 1, "only suggested players are included");

        let listing = state.listing(Some(Position::Kicker), Some("player 3"), BrowseSort::Rank);
        assert_eq!(listing.rows[0].note.as_deref(), Some("strong leg"));
    }

    #[test]
    fn blank_note_clears_and_notes_survive_clear() {
        let mut state = create_test_app_state();
        state.set_note("RB Player 1", "bellcow").unwrap();
        state.set_note("WR Player 1", "target hog").unwrap();
        state.draft("RB Player 1", DraftSide::Others).unwrap();

        state.set_note("WR Player 1", "   ").unwrap();
        state.clear();

        assert_eq!(state.notes.len(), 1);
        assert_eq!(state.note_for(&state.pool[25].id), Some("bellcow"));
    }

    #[test]
    fn note_for_unknown_player_fails() {
        let mut state = create_test_app_state();
        let err = state.set_note("Nobody", "hi").unwrap_err();
        assert!(matches!(err, CommandError::Lookup(LookupError::NotFound(_))));
        assert!(state.notes.is_empty());
    }

    #[test]
    fn swap_picks_reorders_the_board() {
        let mut state = create_test_app_state();
        state.draft("QB Player 1", DraftSide::Others).unwrap();
        state.draft("RB Player 1", DraftSide::Mine).unwrap();

        state.swap_picks(1, 2).unwrap();

        let board = state.board_snapshot();
        assert_eq!(board.rows[0][0].as_ref().unwrap().name, "RB Player 1");
        assert_eq!(board.rows[0][1].as_ref().unwrap().name, "QB Player 1");
        assert_eq!(state.draft_state.my_players()[0].name, "RB Player 1");
        assert_eq!(state.queue.len(), 5);
        assert!(!state.queue.contains(&state.pool[25].id));
    }

    #[test]
    fn swap_of_missing_pick_fails() {
        let mut state = create_test_app_state();
        state.draft("QB Player 1", DraftSide::Others).unwrap();
        let err = state.swap_picks(1, 4).unwrap_err();
        assert!(matches!(err, CommandError::Draft(DraftError::NoSuchPick { pick: 4, .. })));
    }

    #[test]
    fn scarcity_covers_every_position() {
        let state = create_test_app_state();
        assert_eq!(state.scarcity().len(), 6);
    }

    // -----------------------------------------------------------------------
    // Tests: Async event loop
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn event_loop_sends_initial_suggestions_and_quits() {
        let state = create_test_app_state();
        let (cmd_tx, cmd_rx) = mpsc::channel(16);
        let (ui_tx, mut ui_rx) = mpsc::channel(64);

        let handle = tokio::spawn(run(cmd_rx, ui_tx, state));

        let update = ui_rx.recv().await.unwrap();
        match update {
            UiUpdate::Suggestions(snapshot) => {
                assert_eq!(snapshot.entries.len(), 5);
                assert_eq!(snapshot.progress.round, 1);
            }
            other => panic!("expected Suggestions, got {:?}", other),
        }

        cmd_tx.send(UserCommand::Quit).await.unwrap();
        let result = handle.await.unwrap();
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn event_loop_exits_when_command_channel_closes() {
        let state = create_test_app_state();
        let (cmd_tx, cmd_rx) = mpsc::channel::<UserCommand>(16);
        let (ui_tx, _ui_rx) = mpsc::channel(64);

        let handle = tokio::spawn(run(cmd_rx, ui_tx, state));
        drop(cmd_tx);

        assert!(handle.await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn event_loop_drafts_and_reports() {
        let state = create_test_app_state();
        let (cmd_tx, cmd_rx) = mpsc::channel(16);
        let (ui_tx, mut ui_rx) = mpsc::channel(64);

        let handle = tokio::spawn(run(cmd_rx, ui_tx, state));
        let _initial = ui_rx.recv().await.unwrap();

        cmd_tx
            .send(UserCommand::DraftMine("RB Player 1".into()))
            .await
            .unwrap();

        match ui_rx.recv().await.unwrap() {
            UiUpdate::Drafted(entry) => {
                assert_eq!(entry.player.name, "RB Player 1");
                assert_eq!(entry.side, DraftSide::Mine);
            }
            other => panic!("expected Drafted, got {:?}", other),
        }
        match ui_rx.recv().await.unwrap() {
            UiUpdate::Suggestions(snapshot) => {
                assert_eq!(snapshot.progress.picks_made, 1);
                assert!(snapshot
                    .entries
                    .iter()
                    .all(|s| s.player.name != "RB Player 1"));
            }
            other => panic!("expected Suggestions, got {:?}", other),
        }

        cmd_tx.send(UserCommand::Quit).await.unwrap();
        let _ = handle.await;
    }

    #[tokio::test]
    async fn event_loop_reports_errors_without_exiting() {
        let state = create_test_app_state();
        let (cmd_tx, cmd_rx) = mpsc::channel(16);
        let (ui_tx, mut ui_rx) = mpsc::channel(64);

        let handle = tokio::spawn(run(cmd_rx, ui_tx, state));
        let _initial = ui_rx.recv().await.unwrap();

        cmd_tx
            .send(UserCommand::Undraft("QB Player 1".into()))
            .await
            .unwrap();
        match ui_rx.recv().await.unwrap() {
            UiUpdate::Error(msg) => assert!(msg.contains("has not been drafted")),
            other => panic!("expected Error, got {:?}", other),
        }

        cmd_tx.send(UserCommand::ShowRoster).await.unwrap();
        match ui_rx.recv().await.unwrap() {
            UiUpdate::Roster(view) => assert_eq!(view.slots.len(), 16),
            other => panic!("expected Roster, got {:?}", other),
        }

        cmd_tx.send(UserCommand::Quit).await.unwrap();
        assert!(handle.await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn event_loop_notes_and_swaps() {
        let state = create_test_app_state();
        let (cmd_tx, cmd_rx) = mpsc::channel(16);
        let (ui_tx, mut ui_rx) = mpsc::channel(64);

        let handle = tokio::spawn(run(cmd_rx, ui_tx, state));
        let _initial = ui_rx.recv().await.unwrap();

        cmd_tx
            .send(UserCommand::Note {
                player: "TE Player 1".into(),
                text: "breakout".into(),
            })
            .await
            .unwrap();
        match ui_rx.recv().await.unwrap() {
            UiUpdate::Message(msg) => assert_eq!(msg, "Note saved for TE Player 1"),
            other => panic!("expected Message, got {:?}", other),
        }

        for name in ["TE Player 1", "K Player 1"] {
            cmd_tx
                .send(UserCommand::DraftTheirs(name.into()))
                .await
                .unwrap();
            let _drafted = ui_rx.recv().await.unwrap();
            let _suggestions = ui_rx.recv().await.unwrap();
        }

        cmd_tx.send(UserCommand::SwapPicks(2, 1)).await.unwrap();
        match ui_rx.recv().await.unwrap() {
            UiUpdate::Message(msg) => assert_eq!(msg, "Swapped picks 2 and 1"),
            other => panic!("expected Message, got {:?}", other),
        }
        match ui_rx.recv().await.unwrap() {
            UiUpdate::Board(board) => {
                assert_eq!(board.rows[0][0].as_ref().unwrap().name, "K Player 1");
            }
            other => panic!("expected Board, got {:?}", other),
        }
        assert!(matches!(ui_rx.recv().await.unwrap(), UiUpdate::Suggestions(_)));

        cmd_tx
            .send(UserCommand::Note {
                player: "TE Player 1".into(),
                text: "gone".into(),
            })
            .await
            .unwrap();
        match ui_rx.recv().await.unwrap() {
            UiUpdate::Message(msg) => assert!(msg.ends_with("(already drafted)")),
            other => panic!("expected Message, got {:?}", other),
        }

        cmd_tx.send(UserCommand::Quit).await.unwrap();
        assert!(handle.await.unwrap().is_ok());
    }
}
