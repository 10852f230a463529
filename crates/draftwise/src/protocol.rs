// Messages exchanged between the console front end and the app event loop.

use std::collections::HashMap;

use draftwise_core::draft::pick::{DraftEntry, DraftSide, Position};
use draftwise_core::draft::roster::RosterView;
use draftwise_core::valuation::projections::{BrowseSort, Player};
use draftwise_core::valuation::scarcity::ScarcityEntry;
use draftwise_core::valuation::suggest::Suggestion;

/// Commands from the console to the app.
#[derive(Debug, Clone, PartialEq)]
pub enum UserCommand {
    /// Draft a player to the user's roster.
    DraftMine(String),
    /// Mark a player as taken by another team.
    DraftTheirs(String),
    /// Return a drafted player to the pool.
    Undraft(String),
    /// Exchange the players at two pick numbers.
    SwapPicks(u32, u32),
    /// Reset the whole draft.
    ClearDraft,
    /// Attach a note to a player. Empty text clears it.
    Note { player: String, text: String },
    ShowSuggestions,
    ShowRoster,
    ShowBoard,
    ShowScarcity,
    /// Browse available players.
    List {
        position: Option<Position>,
        search: Option<String>,
        sort: BrowseSort,
    },
    Help,
    Quit,
}

/// Where the draft stands, shown alongside suggestions.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftProgress {
    pub round: u32,
    pub pick_in_round: u32,
    /// Seat (1-based) that owns the next pick.
    pub on_the_clock: u32,
    pub num_teams: u32,
    pub picks_made: usize,
}

#[derive(Debug, Clone)]
pub struct SuggestionsSnapshot {
    pub progress: DraftProgress,
    pub entries: Vec<Suggestion>,
    /// Notes for the suggested players, by player id.
    pub notes: HashMap<String, String>,
}

/// One filled cell on the draft board.
#[derive(Debug, Clone, PartialEq)]
pub struct BoardCell {
    pub pick_number: u32,
    pub name: String,
    pub position: Position,
    pub side: DraftSide,
}

/// Owned copy of the snake board, `rows[round][seat]`.
#[derive(Debug, Clone)]
pub struct BoardSnapshot {
    pub num_teams: usize,
    pub rows: Vec<Vec<Option<BoardCell>>>,
}

/// An available player in a browse listing.
#[derive(Debug, Clone)]
pub struct ListingRow {
    pub player: Player,
    pub vor: f64,
    pub note: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ListingSnapshot {
    pub rows: Vec<ListingRow>,
    /// Scarcity of the filtered position, when the listing has one.
    pub scarcity: Option<ScarcityEntry>,
}

/// Updates pushed from the app to the console.
#[derive(Debug, Clone)]
pub enum UiUpdate {
    Suggestions(Box<SuggestionsSnapshot>),
    Roster(Box<RosterView>),
    Board(Box<BoardSnapshot>),
    Scarcity(Vec<ScarcityEntry>),
    Listing(Box<ListingSnapshot>),
    Drafted(Box<DraftEntry>),
    Undrafted(Box<DraftEntry>),
    Help,
    Message(String),
    Error(String),
}
