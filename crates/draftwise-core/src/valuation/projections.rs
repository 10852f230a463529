// Player pool loading, lookup and browsing.
//
// Reads either a rankings JSON file (an object keyed by player name, as
// produced by the ranking scrapers, or a plain array of players) or a
// projections CSV with one row per player.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::io::Read;
use std::path::Path;
use tracing::warn;

use crate::draft::pick::Position;

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// A draftable player. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub position: Position,
    pub team: String,
    /// Projected fantasy points for the upcoming season.
    pub projected_points: f64,
    pub bye_week: Option<u8>,
    pub overall_rank: Option<u32>,
    pub position_rank: Option<u32>,
    pub adp: Option<f64>,
}

impl Player {
    /// Build a player with a derived id and no ranking metadata.
    pub fn new(name: &str, position: Position, team: &str, projected_points: f64) -> Self {
        Player {
            id: player_id(name, team, position),
            name: name.to_string(),
            position,
            team: team.to_string(),
            projected_points,
            bye_week: None,
            overall_rank: None,
            position_rank: None,
            adp: None,
        }
    }

    /// Name for display; team defenses drop the " Defense" suffix.
    pub fn display_name(&self) -> &str {
        if self.position == Position::Defense {
            self.name.strip_suffix(" Defense").unwrap_or(&self.name)
        } else {
            &self.name
        }
    }
}

/// Stable id: `name-team-position`, whitespace runs collapsed to `-`,
/// lowercased.
pub fn player_id(name: &str, team: &str, position: Position) -> String {
    format!("{name} {team} {position}")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase()
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum ProjectionError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("JSON error in {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },

    #[error("validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LookupError {
    #[error("no player matches '{0}'")]
    NotFound(String),

    #[error("'{query}' matches several players: {}", .candidates.join(", "))]
    Ambiguous {
        query: String,
        candidates: Vec<String>,
    },
}

// ---------------------------------------------------------------------------
// Raw serde structs (private)
// ---------------------------------------------------------------------------

/// Rankings JSON value. Keyed by player name in the object form, so the name
/// is optional here.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRanking {
    #[serde(default)]
    id: Option<String>,
    #[serde(default, alias = "fullName")]
    name: Option<String>,
    position: String,
    #[serde(default)]
    team: String,
    #[serde(default, alias = "projectedFantasyPoints2025", alias = "projectedPoints")]
    projected_fantasy_points: Option<f64>,
    #[serde(default)]
    bye_week: Option<u8>,
    #[serde(default)]
    overall_rank: Option<u32>,
    #[serde(default)]
    position_rank: Option<u32>,
    #[serde(default)]
    adp: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawRankingsFile {
    ByName(HashMap<String, RawRanking>),
    List(Vec<RawRanking>),
}

/// Projections CSV row. Extra columns are ignored.
#[derive(Debug, Deserialize)]
#[allow(non_snake_case)]
struct RawProjectionRow {
    Name: String,
    #[serde(default)]
    Team: String,
    Position: String,
    #[serde(default)]
    Bye: Option<u8>,
    #[serde(default, alias = "FPTS", alias = "Proj")]
    Points: Option<f64>,
    #[serde(default)]
    ADP: Option<f64>,
    #[serde(default)]
    Rank: Option<u32>,
}

// ---------------------------------------------------------------------------
// Reader-based loaders (enable testing without temp files)
// ---------------------------------------------------------------------------

fn finite_or_zero(name: &str, value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() => v,
        Some(_) => {
            warn!("player '{}' has a non-finite projection, using 0", name);
            0.0
        }
        None => 0.0,
    }
}

fn player_from_raw(name: &str, raw: RawRanking) -> Option<Player> {
    let name = name.trim();
    let Some(position) = Position::from_str_pos(&raw.position).filter(|p| !p.is_meta_slot())
    else {
        warn!("skipping '{}': unknown position '{}'", name, raw.position);
        return None;
    };
    let team = raw.team.trim().to_string();
    Some(Player {
        id: raw
            .id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| player_id(name, &team, position)),
        name: name.to_string(),
        position,
        team,
        projected_points: finite_or_zero(name, raw.projected_fantasy_points),
        bye_week: raw.bye_week,
        overall_rank: raw.overall_rank,
        position_rank: raw.position_rank,
        adp: raw.adp.filter(|v| v.is_finite()),
    })
}

/// Parse a rankings JSON document into players, sorted by overall rank
/// (unranked players last, then by name).
pub fn load_rankings_from_reader<R: Read>(rdr: R) -> Result<Vec<Player>, serde_json::Error> {
    let file: RawRankingsFile = serde_json::from_reader(rdr)?;
    let mut players: Vec<Player> = match file {
        RawRankingsFile::ByName(map) => map
            .into_iter()
            .filter_map(|(name, raw)| player_from_raw(&name, raw))
            .collect(),
        RawRankingsFile::List(list) => list
            .into_iter()
            .filter_map(|mut raw| match raw.name.take() {
                Some(name) => player_from_raw(&name, raw),
                None => {
                    warn!("skipping ranking entry without a name");
                    None
                }
            })
            .collect(),
    };
    players.sort_by(|a, b| {
        a.overall_rank
            .unwrap_or(u32::MAX)
            .cmp(&b.overall_rank.unwrap_or(u32::MAX))
            .then_with(|| a.name.cmp(&b.name))
    });
    Ok(dedup_by_id(players))
}

/// Parse a projections CSV into players, in file order.
pub fn load_projections_from_reader<R: Read>(rdr: R) -> Result<Vec<Player>, csv::Error> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut players = Vec::new();
    for result in reader.deserialize::<RawProjectionRow>() {
        match result {
            Ok(row) => {
                let raw = RawRanking {
                    id: None,
                    name: None,
                    position: row.Position,
                    team: row.Team,
                    projected_fantasy_points: row.Points,
                    bye_week: row.Bye,
                    overall_rank: row.Rank,
                    position_rank: None,
                    adp: row.ADP,
                };
                if let Some(player) = player_from_raw(&row.Name, raw) {
                    players.push(player);
                }
            }
            Err(e) => {
                warn!("skipping malformed projection row: {}", e);
            }
        }
    }
    Ok(dedup_by_id(players))
}

fn dedup_by_id(players: Vec<Player>) -> Vec<Player> {
    let mut seen = HashSet::new();
    players
        .into_iter()
        .filter(|p| {
            let fresh = seen.insert(p.id.clone());
            if !fresh {
                warn!("duplicate player id '{}', keeping the first entry", p.id);
            }
            fresh
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Path-based public API
// ---------------------------------------------------------------------------

/// Load a player pool from `path`. Files ending in `.csv` are read as
/// projections; anything else as rankings JSON.
pub fn load_pool(path: &Path) -> Result<Vec<Player>, ProjectionError> {
    let path_str = path.display().to_string();
    let file = std::fs::File::open(path).map_err(|e| ProjectionError::Io {
        path: path_str.clone(),
        source: e,
    })?;

    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));

    let players = if is_csv {
        load_projections_from_reader(file).map_err(|e| ProjectionError::Csv {
            path: path_str.clone(),
            source: e,
        })?
    } else {
        load_rankings_from_reader(file).map_err(|e| ProjectionError::Json {
            path: path_str.clone(),
            source: e,
        })?
    };

    if players.is_empty() {
        return Err(ProjectionError::Validation(format!(
            "{path_str} contains no usable players"
        )));
    }

    Ok(players)
}

// ---------------------------------------------------------------------------
// Lookup and browsing
// ---------------------------------------------------------------------------

/// Resolve a user query to a single player.
///
/// Tries an exact id match, then a case-insensitive exact name match, then a
/// case-insensitive substring match on the name that must be unique.
pub fn find_player<'a>(pool: &'a [Player], query: &str) -> Result<&'a Player, LookupError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(LookupError::NotFound(String::new()));
    }

    if let Some(p) = pool.iter().find(|p| p.id == query) {
        return Ok(p);
    }

    let lowered = query.to_lowercase();
    let exact: Vec<&Player> = pool
        .iter()
        .filter(|p| p.name.to_lowercase() == lowered)
        .collect();
    if exact.len() == 1 {
        return Ok(exact[0]);
    }

    let partial: Vec<&Player> = if exact.is_empty() {
        pool.iter()
            .filter(|p| p.name.to_lowercase().contains(&lowered))
            .collect()
    } else {
        exact
    };

    match partial.len() {
        0 => Err(LookupError::NotFound(query.to_string())),
        1 => Ok(partial[0]),
        _ => Err(LookupError::Ambiguous {
            query: query.to_string(),
            candidates: partial
                .iter()
                .map(|p| format!("{} ({} {})", p.name, p.team, p.position))
                .collect(),
        }),
    }
}

/// Ordering for [`browse`] results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BrowseSort {
    /// Overall rank ascending; unranked players last, by points.
    #[default]
    Rank,
    /// Projected points descending, ties by rank.
    Points,
}

fn rank_key(p: &Player) -> u32 {
    p.overall_rank.unwrap_or(u32::MAX)
}

fn points_desc(a: &Player, b: &Player) -> Ordering {
    b.projected_points
        .partial_cmp(&a.projected_points)
        .unwrap_or(Ordering::Equal)
}

/// Filter a pool by position and a case-insensitive search over name and
/// team.
pub fn browse<'a>(
    pool: &'a [Player],
    position: Option<Position>,
    search: Option<&str>,
    sort: BrowseSort,
) -> Vec<&'a Player> {
    let needle = search
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty());

    let mut players: Vec<&Player> = pool
        .iter()
        .filter(|p| position.map_or(true, |pos| p.position == pos))
        .filter(|p| {
            needle.as_ref().map_or(true, |n| {
                p.name.to_lowercase().contains(n) || p.team.to_lowercase().contains(n)
            })
        })
        .collect();

    match sort {
        BrowseSort::Rank => players.sort_by(|a, b| {
            rank_key(a)
                .cmp(&rank_key(b))
                .then_with(|| points_desc(a, b))
        }),
        BrowseSort::Points => players.sort_by(|a, b| {
            points_desc(a, b).then_with(|| rank_key(a).cmp(&rank_key(b)))
        }),
    }
    players
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
