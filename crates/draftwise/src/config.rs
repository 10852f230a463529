// Configuration loading and validation (league.toml, strategy.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use draftwise_core::config::{
    LeagueConfig, NeedConfig, SaturationConfig, ScarcityBoost, StrategyConfig, SuggestionConfig,
};
use draftwise_core::draft::pick::{Position, DRAFTABLE_POSITIONS};

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to write default file {path}: {source}")]
    SeedError {
        path: PathBuf,
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub league: LeagueConfig,
    pub strategy: StrategyConfig,
    pub data_paths: DataPaths,
}

/// Wrapper for the top-level `[league]` table in league.toml.
#[derive(Debug, Clone, Deserialize)]
struct LeagueFile {
    league: LeagueConfig,
}

/// Raw deserialization target for the entire strategy.toml file.
#[derive(Debug, Clone, Deserialize)]
struct StrategyFile {
    #[serde(default)]
    suggestions: SuggestionConfig,
    #[serde(default)]
    need: NeedConfig,
    #[serde(default)]
    scarcity_boost: ScarcityBoost,
    #[serde(default)]
    saturation: SaturationConfig,
    data_paths: DataPaths,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataPaths {
    /// Player pool: rankings JSON or projections CSV.
    pub rankings: String,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/league.toml` and `config/strategy.toml`
/// relative to `base_dir`. Does not seed defaults; see `load_config()`.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let config_dir = base_dir.join("config");

    let league_path = config_dir.join("league.toml");
    let league_text = read_file(&league_path)?;
    let league_file: LeagueFile =
        toml::from_str(&league_text).map_err(|e| ConfigError::ParseError {
            path: league_path.clone(),
            source: e,
        })?;

    let strategy_path = config_dir.join("strategy.toml");
    let strategy_text = read_file(&strategy_path)?;
    let strategy_file: StrategyFile =
        toml::from_str(&strategy_text).map_err(|e| ConfigError::ParseError {
            path: strategy_path.clone(),
            source: e,
        })?;

    let config = Config {
        league: league_file.league,
        strategy: StrategyConfig {
            suggestions: strategy_file.suggestions,
            need: strategy_file.need,
            scarcity_boost: strategy_file.scarcity_boost,
            saturation: strategy_file.saturation,
        },
        data_paths: strategy_file.data_paths,
    };

    validate(&config)?;

    Ok(config)
}

// ---------------------------------------------------------------------------
// Shipped defaults
// ---------------------------------------------------------------------------

pub const DEFAULT_LEAGUE_TOML: &str = include_str!("../defaults/league.toml");
pub const DEFAULT_STRATEGY_TOML: &str = include_str!("../defaults/strategy.toml");
/// Sample pool the default strategy.toml points at.
pub const SAMPLE_RANKINGS_JSON: &str = include_str!("../data/rankings.json");

/// Files a working directory needs, relative to its root.
const SEED_FILES: [(&str, &str); 3] = [
    ("config/league.toml", DEFAULT_LEAGUE_TOML),
    ("config/strategy.toml", DEFAULT_STRATEGY_TOML),
    ("data/rankings.json", SAMPLE_RANKINGS_JSON),
];

/// Write every shipped file missing under `base_dir`. Existing files, edited
/// or not, are left alone. Returns the paths written.
pub fn seed_defaults(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let mut written = Vec::new();
    for (rel, contents) in SEED_FILES {
        let path = base_dir.join(rel);
        if path.exists() {
            continue;
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::SeedError {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(&path, contents).map_err(|source| ConfigError::SeedError {
            path: path.clone(),
            source,
        })?;
        info!("wrote default {}", path.display());
        written.push(path);
    }
    Ok(written)
}

/// Load config relative to the current working directory, seeding any
/// missing defaults first.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    seed_defaults(&cwd)?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

fn invalid(field: impl Into<String>, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        field: field.into(),
        message: message.into(),
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    let league = &config.league;
    if league.num_teams == 0 {
        return Err(invalid("league.num_teams", "must be greater than 0"));
    }

    for key in league.roster.keys() {
        if Position::from_str_pos(key).is_none() {
            return Err(invalid(
                format!("league.roster.{key}"),
                "unknown position",
            ));
        }
    }

    for &pos in DRAFTABLE_POSITIONS {
        if pos.is_core() && league.starters(pos) == 0 {
            return Err(invalid(
                format!("league.roster.{}", pos.display_str()),
                "core positions need at least one slot",
            ));
        }
    }

    let strategy = &config.strategy;
    if strategy.suggestions.queue_size == 0 {
        return Err(invalid("suggestions.queue_size", "must be > 0"));
    }

    let b = &strategy.scarcity_boost;
    let factor_fields: &[(&str, f64)] = &[
        ("need.excess_decay", strategy.need.excess_decay),
        ("need.min_multiplier", strategy.need.min_multiplier),
        ("need.open_slot_bonus", strategy.need.open_slot_bonus),
        ("scarcity_boost.QB", b.QB),
        ("scarcity_boost.RB", b.RB),
        ("scarcity_boost.WR", b.WR),
        ("scarcity_boost.TE", b.TE),
        ("saturation.penalty", strategy.saturation.penalty),
        ("saturation.single_te_penalty", strategy.saturation.single_te_penalty),
    ];
    for (name, val) in factor_fields {
        if !val.is_finite() || *val < 0.0 {
            return Err(invalid(*name, format!("must be finite and >= 0, got {val}")));
        }
    }

    if strategy.saturation.threshold < 2 {
        return Err(invalid(
            "saturation.threshold",
            format!(
                "must be >= 2 so a single TE or an empty position is not penalized, got {}",
                strategy.saturation.threshold
            ),
        ));
    }

    if strategy.need.min_multiplier > 1.0 {
        return Err(invalid(
            "need.min_multiplier",
            format!("must be <= 1.0, got {}", strategy.need.min_multiplier),
        ));
    }

    if config.data_paths.rankings.trim().is_empty() {
        return Err(invalid("data_paths.rankings", "must not be empty"));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
