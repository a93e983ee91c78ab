//! Request field validation
//!
//! Bounds a box score must satisfy before it is allowed near the
//! aggregates. A batch with any violation is rejected as a whole, and every
//! violation is reported with the dotted path of the offending field.

use serde::Serialize;
use statline_common::{GameStats, StatsEntry};

/// Maximum personal fouls before disqualification
pub const MAX_FOULS: i32 = 6;

/// Length of a regulation game in minutes
pub const MAX_MINUTES: f64 = 48.0;

/// One failed field check
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    fn new(field: String, message: &str) -> Self {
        Self {
            field,
            message: message.to_string(),
        }
    }
}

/// Check every entry of a batch; empty result means the batch is valid
pub fn validate_batch(entries: &[StatsEntry]) -> Vec<FieldViolation> {
    if entries.is_empty() {
        return vec![FieldViolation::new(
            "entries".to_string(),
            "At least one stats entry is required",
        )];
    }

    entries
        .iter()
        .enumerate()
        .flat_map(|(i, entry)| validate_entry(&format!("entries[{}]", i), entry))
        .collect()
}

/// Check a single entry, prefixing field paths with `path`
pub fn validate_entry(path: &str, entry: &StatsEntry) -> Vec<FieldViolation> {
    let mut violations = Vec::new();

    if is_blank(entry.player_name.as_deref()) {
        violations.push(FieldViolation::new(
            format!("{}.playerName", path),
            "Player name cannot be empty",
        ));
    }
    if is_blank(entry.team_name.as_deref()) {
        violations.push(FieldViolation::new(
            format!("{}.teamName", path),
            "Team name cannot be empty",
        ));
    }

    match &entry.stats {
        Some(stats) => validate_stats(path, stats, &mut violations),
        None => violations.push(FieldViolation::new(
            format!("{}.stats", path),
            "Stats cannot be null",
        )),
    }

    violations
}

fn validate_stats(path: &str, stats: &GameStats, violations: &mut Vec<FieldViolation>) {
    let counts = [
        ("points", stats.points, "Points cannot be negative"),
        ("rebounds", stats.rebounds, "Rebounds cannot be negative"),
        ("assists", stats.assists, "Assists cannot be negative"),
        ("steals", stats.steals, "Steals cannot be negative"),
        ("blocks", stats.blocks, "Blocks cannot be negative"),
        ("fouls", stats.fouls, "Fouls cannot be negative"),
        ("turnovers", stats.turnovers, "Turnovers cannot be negative"),
    ];
    for (name, value, message) in counts {
        if value < 0 {
            violations.push(FieldViolation::new(format!("{}.{}", path, name), message));
        }
    }

    if stats.fouls > MAX_FOULS {
        violations.push(FieldViolation::new(
            format!("{}.fouls", path),
            "Fouls cannot exceed 6",
        ));
    }

    let minutes = stats.minutes_played;
    if !minutes.is_finite() || minutes < 0.0 {
        violations.push(FieldViolation::new(
            format!("{}.minutesPlayed", path),
            "Minutes played cannot be negative",
        ));
    } else if minutes > MAX_MINUTES {
        violations.push(FieldViolation::new(
            format!("{}.minutesPlayed", path),
            "Minutes played cannot exceed 48",
        ));
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}
