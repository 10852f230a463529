// Console line parsing.
//
// Translates one line of user input into a UserCommand for the app.

use draftwise_core::draft::pick::{Position, DRAFTABLE_POSITIONS};
use draftwise_core::valuation::projections::BrowseSort;

use crate::protocol::UserCommand;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InputError {
    #[error("unknown command '{0}' (type 'help' for a list)")]
    UnknownCommand(String),

    #[error("'{0}' needs a player name or id")]
    MissingPlayer(&'static str),

    #[error("'{command}' takes no arguments")]
    UnexpectedArgs { command: &'static str },

    #[error("'swap' needs two pick numbers, e.g. 'swap 3 4'")]
    BadPicks,
}

/// Command reference shown by `help`.
pub const HELP: &[(&str, &str)] = &[
    ("mine <player>", "draft a player to your roster"),
    ("theirs <player>", "mark a player as taken by another team"),
    ("undo <player>", "return a drafted player to the pool"),
    ("swap <pick> <pick>", "exchange the players at two picks"),
    ("clear", "reset the draft"),
    ("note <player> = <text>", "attach a note; no text clears it"),
    ("suggest", "show the suggestion queue"),
    ("roster", "show your roster by slot"),
    ("board", "show the snake draft board"),
    ("scarcity", "show positional scarcity"),
    ("list [POS] [search]", "browse available players by rank"),
    ("top [POS] [search]", "browse available players by projection"),
    ("help", "show this help"),
    ("quit", "exit"),
];

/// Parse one input line.
///
/// Returns `Ok(None)` for blank lines.
pub fn parse_command(line: &str) -> Result<Option<UserCommand>, InputError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((w, r)) => (w, r.trim()),
        None => (line, ""),
    };

    let cmd = match word.to_ascii_lowercase().as_str() {
        "mine" | "m" => UserCommand::DraftMine(player_arg("mine", rest)?),
        "theirs" | "t" => UserCommand::DraftTheirs(player_arg("theirs", rest)?),
        "undo" | "u" => UserCommand::Undraft(player_arg("undo", rest)?),
        "swap" => parse_swap(rest)?,
        "clear" => no_args("clear", rest, UserCommand::ClearDraft)?,
        "note" | "n" => parse_note(rest)?,
        "suggest" | "s" => no_args("suggest", rest, UserCommand::ShowSuggestions)?,
        "roster" | "r" => no_args("roster", rest, UserCommand::ShowRoster)?,
        "board" | "b" => no_args("board", rest, UserCommand::ShowBoard)?,
        "scarcity" => no_args("scarcity", rest, UserCommand::ShowScarcity)?,
        "list" | "l" => parse_list(rest, BrowseSort::Rank),
        "top" => parse_list(rest, BrowseSort::Points),
        "help" | "?" => UserCommand::Help,
        "quit" | "q" | "exit" => UserCommand::Quit,
        other => return Err(InputError::UnknownCommand(other.to_string())),
    };

    Ok(Some(cmd))
}

fn player_arg(command: &'static str, rest: &str) -> Result<String, InputError> {
    if rest.is_empty() {
        Err(InputError::MissingPlayer(command))
    } else {
        Ok(rest.to_string())
    }
}

fn no_args(
    command: &'static str,
    rest: &str,
    cmd: UserCommand,
) -> Result<UserCommand, InputError> {
    if rest.is_empty() {
        Ok(cmd)
    } else {
        Err(InputError::UnexpectedArgs { command })
    }
}

/// `swap <pick> <pick>`.
fn parse_swap(rest: &str) -> Result<UserCommand, InputError> {
    let picks: Vec<u32> = rest
        .split_whitespace()
        .map(str::parse)
        .collect::<Result<Vec<u32>, _>>()
        .map_err(|_| InputError::BadPicks)?;
    match picks[..] {
        [a, b] => Ok(UserCommand::SwapPicks(a, b)),
        _ => Err(InputError::BadPicks),
    }
}

/// `note <player> = <text>`; without `=` the note is cleared.
fn parse_note(rest: &str) -> Result<UserCommand, InputError> {
    let (player, text) = match rest.split_once('=') {
        Some((p, t)) => (p.trim(), t.trim()),
        None => (rest, ""),
    };
    Ok(UserCommand::Note {
        player: player_arg("note", player)?,
        text: text.to_string(),
    })
}

/// Position filter token: only the canonical abbreviation (QB, RB, WR, TE,
/// K, DEF), so aliases like "d" stay searchable.
fn position_filter(token: &str) -> Option<Position> {
    DRAFTABLE_POSITIONS
        .iter()
        .copied()
        .find(|p| p.display_str().eq_ignore_ascii_case(token))
}

/// `list [POS] [search]`: a leading position token is a filter, everything
/// else is search text.
fn parse_list(rest: &str, sort: BrowseSort) -> UserCommand {
    let (first, tail) = match rest.split_once(char::is_whitespace) {
        Some((f, t)) => (f, t.trim()),
        None => (rest, ""),
    };

    let position = position_filter(first);
    let search = if position.is_some() { tail } else { rest };

    UserCommand::List {
        position,
        search: (!search.is_empty()).then(|| search.to_string()),
        sort,
    }
}
