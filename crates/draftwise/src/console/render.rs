// Plain-text rendering of UI updates.
//
// Every function here is pure: it formats an update into a String and the
// console loop writes it out.

use std::fmt::Write;

use chrono::Local;

use draftwise_core::draft::pick::{DraftEntry, DraftSide, DRAFTABLE_POSITIONS};
use draftwise_core::draft::roster::RosterView;
use draftwise_core::valuation::scarcity::ScarcityEntry;

use super::input::HELP;
use crate::protocol::{BoardSnapshot, ListingSnapshot, SuggestionsSnapshot, UiUpdate};

/// Longest name printed in a board cell.
const BOARD_NAME_WIDTH: usize = 14;

/// Listing rows shown before truncating.
const LISTING_LIMIT: usize = 25;

/// Render any update.
pub fn render(update: &UiUpdate) -> String {
    match update {
        UiUpdate::Suggestions(snapshot) => render_suggestions(snapshot),
        UiUpdate::Roster(view) => render_roster(view),
        UiUpdate::Board(board) => render_board(board),
        UiUpdate::Scarcity(entries) => render_scarcity(entries),
        UiUpdate::Listing(listing) => render_listing(listing),
        UiUpdate::Drafted(entry) => render_drafted(entry),
        UiUpdate::Undrafted(entry) => format!(
            "Returned {} to the pool (was pick {})\n",
            entry.player.name, entry.pick_number
        ),
        UiUpdate::Help => render_help(),
        UiUpdate::Message(msg) => format!("{msg}\n"),
        UiUpdate::Error(msg) => format!("error: {msg}\n"),
    }
}

pub fn render_suggestions(snapshot: &SuggestionsSnapshot) -> String {
    let p = &snapshot.progress;
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Round {}, pick {} ({} made) - seat {} of {} on the clock",
        p.round, p.pick_in_round, p.picks_made, p.on_the_clock, p.num_teams
    );

    if snapshot.entries.is_empty() {
        out.push_str("  no players available\n");
        return out;
    }

    let _ = writeln!(
        out,
        "  {:<3} {:<26} {:<4} {:<4} {:>7} {:>7} {:>6}",
        "#", "Player", "Pos", "Team", "Proj", "VOR", "Score"
    );
    for (i, s) in snapshot.entries.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {:<3} {:<26} {:<4} {:<4} {:>7.1} {:>7.1} {:>6}",
            i + 1,
            s.player.display_name(),
            s.player.position.display_str(),
            s.player.team,
            s.player.projected_points,
            s.vor,
            s.score
        );
        if let Some(note) = snapshot.notes.get(&s.player.id) {
            let _ = writeln!(out, "      note: {note}");
        }
    }
    out
}

pub fn render_roster(view: &RosterView) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "My roster ({}/{} filled, {} open)",
        view.filled_count(),
        view.slots.len(),
        view.empty_count()
    );
    for slot in &view.slots {
        match &slot.player {
            Some(p) => {
                let bye = p.bye_week.map(|b| format!("bye {b}")).unwrap_or_default();
                let _ = writeln!(
                    out,
                    "  {:<5} {:<26} {:<4} {}",
                    slot.position.display_str(),
                    p.display_name(),
                    p.team,
                    bye
                );
            }
            None => {
                let _ = writeln!(out, "  {:<5} -", slot.position.display_str());
            }
        }
    }
    if !view.overflow.is_empty() {
        let names: Vec<&str> = view.overflow.iter().map(|p| p.display_name()).collect();
        let _ = writeln!(out, "  no slot: {}", names.join(", "));
    }
    let held: Vec<String> = DRAFTABLE_POSITIONS
        .iter()
        .map(|&pos| format!("{} {}", pos.display_str(), view.count_at(pos)))
        .collect();
    let _ = writeln!(out, "  held: {}", held.join("  "));
    out
}

fn truncate(name: &str, width: usize) -> String {
    if name.chars().count() <= width {
        name.to_string()
    } else {
        let mut s: String = name.chars().take(width - 1).collect();
        s.push('.');
        s
    }
}

pub fn render_board(board: &BoardSnapshot) -> String {
    let mut out = String::new();
    if board.num_teams == 0 {
        out.push_str("no teams configured\n");
        return out;
    }

    let cell_width = BOARD_NAME_WIDTH + 5;
    let _ = write!(out, "{:>4} ", "Rd");
    for seat in 1..=board.num_teams {
        let _ = write!(out, "{:<cell_width$}", format!("Team {seat}"));
    }
    out.push('\n');

    for (round, row) in board.rows.iter().enumerate() {
        let _ = write!(out, "{:>4} ", round + 1);
        for cell in row {
            let text = match cell {
                Some(c) => {
                    let marker = if c.side == DraftSide::Mine { "*" } else { "" };
                    format!(
                        "{}{} {}",
                        marker,
                        truncate(&c.name, BOARD_NAME_WIDTH),
                        c.position.display_str()
                    )
                }
                None => ".".to_string(),
            };
            let _ = write!(out, "{:<cell_width$}", text);
        }
        out.push('\n');
    }
    out.push_str("  * = your pick\n");
    out
}

pub fn render_scarcity(entries: &[ScarcityEntry]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "  {:<4} {:>6} {:>8} {:>8} {:>8}  {}",
        "Pos", "Above", "Top VOR", "3rd VOR", "Dropoff", "Urgency"
    );
    for e in entries {
        let _ = writeln!(
            out,
            "  {:<4} {:>6} {:>8.1} {:>8.1} {:>8.1}  {}",
            e.position.display_str(),
            e.players_above_replacement,
            e.top_available_vor,
            e.third_best_vor,
            e.dropoff,
            e.urgency.label()
        );
    }
    out
}

pub fn render_listing(listing: &ListingSnapshot) -> String {
    let mut out = String::new();
    if let Some(e) = &listing.scarcity {
        let _ = writeln!(
            out,
            "{}: {} above replacement, top VOR {:.1}, dropoff {:.1} ({})",
            e.position.display_str(),
            e.players_above_replacement,
            e.top_available_vor,
            e.dropoff,
            e.urgency.label()
        );
    }
    let rows = &listing.rows;
    if rows.is_empty() {
        out.push_str("no matching players\n");
        return out;
    }
    let _ = writeln!(
        out,
        "  {:>4} {:<26} {:<4} {:<4} {:>4} {:>7} {:>7}",
        "Rank", "Player", "Pos", "Team", "Bye", "Proj", "VOR"
    );
    for row in rows.iter().take(LISTING_LIMIT) {
        let p = &row.player;
        let rank = p.overall_rank.map(|r| r.to_string()).unwrap_or_else(|| "-".into());
        let bye = p.bye_week.map(|b| b.to_string()).unwrap_or_else(|| "-".into());
        let _ = writeln!(
            out,
            "  {:>4} {:<26} {:<4} {:<4} {:>4} {:>7.1} {:>7.1}",
            rank,
            p.display_name(),
            p.position.display_str(),
            p.team,
            bye,
            p.projected_points,
            row.vor
        );
        if let Some(note) = &row.note {
            let _ = writeln!(out, "       note: {note}");
        }
    }
    if rows.len() > LISTING_LIMIT {
        let _ = writeln!(out, "  ... {} more", rows.len() - LISTING_LIMIT);
    }
    out
}

pub fn render_drafted(entry: &DraftEntry) -> String {
    let when = entry.drafted_at.with_timezone(&Local).format("%H:%M:%S");
    format!(
        "[{}] Pick {}: {} ({} {}) -> {}\n",
        when,
        entry.pick_number,
        entry.player.display_name(),
        entry.player.position.display_str(),
        entry.player.team,
        entry.side.label()
    )
}

pub fn render_help() -> String {
    let mut out = String::from("Commands:\n");
    for (usage, what) in HELP {
        let _ = writeln!(out, "  {:<22} {}", usage, what);
    }
    out
}
