//! Incoming game records
//!
//! A [`StatsEntry`] is one player's box score for one game, tagged with the
//! team the player played for. The stat fields are flattened into the entry
//! on the wire:
//!
//! ```json
//! { "playerName": "LeBron James", "teamName": "Lakers",
//!   "points": 27, "rebounds": 7, "assists": 8, "steals": 1,
//!   "blocks": 1, "fouls": 2, "turnovers": 3, "minutesPlayed": 35.5 }
//! ```
//!
//! A stat field left out of the JSON counts as zero. A stat field of the
//! wrong type is a deserialization error that names the field.
//!
//! Field bounds (non-negative counts, foul and minute caps) are checked by
//! the service layer before entries reach the coordinator. Mapping here only
//! fails when the stat block is missing or cannot be represented as a sample.

use serde::{Deserialize, Serialize};

use crate::sample::Sample;
use crate::{Error, Result};

/// Raw per-game numbers as submitted by clients
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameStats {
    pub points: i32,
    pub rebounds: i32,
    pub assists: i32,
    pub steals: i32,
    pub blocks: i32,
    pub fouls: i32,
    pub turnovers: i32,
    pub minutes_played: f64,
}

impl From<&GameStats> for Sample {
    fn from(stats: &GameStats) -> Self {
        Sample {
            points: f64::from(stats.points),
            rebounds: f64::from(stats.rebounds),
            assists: f64::from(stats.assists),
            steals: f64::from(stats.steals),
            blocks: f64::from(stats.blocks),
            fouls: f64::from(stats.fouls),
            turnovers: f64::from(stats.turnovers),
            minutes_played: stats.minutes_played,
        }
    }
}

/// One ingest record: who played, for whom, and what they did
///
/// `stats` is `None` only for entries built in code; every entry read from
/// JSON carries a stat block.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "WireEntry")]
pub struct StatsEntry {
    pub player_name: Option<String>,
    pub team_name: Option<String>,
    #[serde(flatten)]
    pub stats: Option<GameStats>,
}

/// Flat JSON shape of a [`StatsEntry`]
///
/// Read without `flatten` so type errors keep their field path.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireEntry {
    player_name: Option<String>,
    team_name: Option<String>,
    #[serde(default)]
    points: i32,
    #[serde(default)]
    rebounds: i32,
    #[serde(default)]
    assists: i32,
    #[serde(default)]
    steals: i32,
    #[serde(default)]
    blocks: i32,
    #[serde(default)]
    fouls: i32,
    #[serde(default)]
    turnovers: i32,
    #[serde(default)]
    minutes_played: f64,
}

impl From<WireEntry> for StatsEntry {
    fn from(wire: WireEntry) -> Self {
        Self {
            player_name: wire.player_name,
            team_name: wire.team_name,
            stats: Some(GameStats {
                points: wire.points,
                rebounds: wire.rebounds,
                assists: wire.assists,
                steals: wire.steals,
                blocks: wire.blocks,
                fouls: wire.fouls,
                turnovers: wire.turnovers,
                minutes_played: wire.minutes_played,
            }),
        }
    }
}

/// A record split into its two keys and the sample filed under both
#[derive(Debug, Clone, PartialEq)]
pub struct MappedRecord<'a> {
    pub player: &'a str,
    pub team: &'a str,
    pub sample: Sample,
}

impl StatsEntry {
    pub fn new(player: impl Into<String>, team: impl Into<String>, stats: GameStats) -> Self {
        Self {
            player_name: Some(player.into()),
            team_name: Some(team.into()),
            stats: Some(stats),
        }
    }

    /// Derive `(player, team, sample)` from this entry
    ///
    /// Absent names map to the empty key, which the stores reject on their
    /// own; only a missing or non-finite stat block is a mapping error.
    pub fn map(&self) -> Result<MappedRecord<'_>> {
        let stats = self
            .stats
            .as_ref()
            .ok_or_else(|| Error::InvalidInput("stats cannot be null".to_string()))?;

        let sample = Sample::from(stats);
        if !sample.is_finite() {
            return Err(Error::InvalidInput(format!(
                "non-finite stat value (minutesPlayed = {})",
                stats.minutes_played
            )));
        }

        Ok(MappedRecord {
            player: self.player_name.as_deref().unwrap_or(""),
            team: self.team_name.as_deref().unwrap_or(""),
            sample,
        })
    }
}
