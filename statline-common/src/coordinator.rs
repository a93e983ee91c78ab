//! Dual-namespace ingest coordinator
//!
//! Every record is filed twice: once under the player's name in the player
//! store and once under the team's name in the team store. The two writes
//! are independent single-key operations. A failure on one side does not
//! undo the other, so a record can be partially applied; the record then
//! counts as failed in the batch total and is logged.

use tracing::{debug, info, warn};

use crate::aggregate::Snapshot;
use crate::record::StatsEntry;
use crate::sample::Sample;
use crate::store::{StatsStore, Store};

/// Which of the two stores an operation addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// Individual subjects (players)
    Player,
    /// Collective groups (teams)
    Team,
}

impl Namespace {
    pub fn as_str(&self) -> &'static str {
        match self {
            Namespace::Player => "player",
            Namespace::Team => "team",
        }
    }
}

impl std::fmt::Display for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fans records out into a player store and a team store
pub struct IngestCoordinator<S = Store> {
    players: S,
    teams: S,
}

impl IngestCoordinator<Store> {
    /// Coordinator over two fresh in-memory stores
    pub fn in_memory() -> Self {
        Self::new(Store::new("players"), Store::new("teams"))
    }
}

impl<S: StatsStore> IngestCoordinator<S> {
    pub fn new(players: S, teams: S) -> Self {
        Self { players, teams }
    }

    /// Store backing `namespace`
    pub fn store(&self, namespace: Namespace) -> &S {
        match namespace {
            Namespace::Player => &self.players,
            Namespace::Team => &self.teams,
        }
    }

    /// Submit one sample to one namespace
    pub fn submit(&self, namespace: Namespace, key: &str, sample: &Sample) -> bool {
        self.store(namespace).submit(key, sample)
    }

    /// Committed average for `key` in `namespace`, if it was ever written
    pub fn query(&self, namespace: Namespace, key: &str) -> Option<Snapshot> {
        self.store(namespace).query(key)
    }

    /// File `sample` under both `player` and `team`
    ///
    /// Both submissions are always attempted; the result is `true` only if
    /// both succeeded.
    pub fn process(&self, player: &str, team: &str, sample: &Sample) -> bool {
        let player_ok = self.players.submit(player, sample);
        let team_ok = self.teams.submit(team, sample);

        if player_ok != team_ok {
            warn!(
                player,
                team,
                player_ok,
                team_ok,
                "Record partially applied"
            );
        }

        player_ok && team_ok
    }

    /// Map and file one record
    ///
    /// A record that fails mapping touches neither store.
    pub fn process_record(&self, entry: &StatsEntry) -> bool {
        match entry.map() {
            Ok(record) => self.process(record.player, record.team, &record.sample),
            Err(e) => {
                warn!(
                    player = entry.player_name.as_deref().unwrap_or("<none>"),
                    team = entry.team_name.as_deref().unwrap_or("<none>"),
                    "Error processing stats entry: {}",
                    e
                );
                false
            }
        }
    }

    /// Process every record in order; returns how many fully succeeded
    pub fn process_batch(&self, entries: &[StatsEntry]) -> usize {
        if entries.is_empty() {
            return 0;
        }

        let success_count = entries
            .iter()
            .filter(|entry| self.process_record(entry))
            .count();

        if success_count == entries.len() {
            debug!(total = entries.len(), "Batch ingested");
        } else {
            info!(
                total = entries.len(),
                success_count,
                "Batch ingested with failures"
            );
        }

        success_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::GameStats;

    fn game(points: i32) -> GameStats {
        GameStats {
            points,
            rebounds: 5,
            assists: 3,
            steals: 1,
            blocks: 2,
            fouls: 3,
            turnovers: 2,
            minutes_played: 30.0,
        }
    }

    #[test]
    fn test_process_record_updates_both_namespaces() {
        let coordinator = IngestCoordinator::in_memory();

        assert!(coordinator.process_record(&StatsEntry::new("X", "Y", game(10))));

        let player = coordinator.query(Namespace::Player, "X").unwrap();
        let team = coordinator.query(Namespace::Team, "Y").unwrap();
        assert_eq!(player, team);
        assert_eq!(player.count, 1);
        assert_eq!(player.mean.points, 10.0);

        // Keys do not leak across namespaces
        assert!(coordinator.query(Namespace::Player, "Y").is_none());
        assert!(coordinator.query(Namespace::Team, "X").is_none());
    }

    #[test]
    fn test_mapping_failure_updates_neither_store() {
        let coordinator = IngestCoordinator::in_memory();
        let entry = StatsEntry {
            player_name: Some("X".to_string()),
            team_name: Some("Y".to_string()),
            stats: None,
        };

        assert!(!coordinator.process_record(&entry));
        assert!(coordinator.store(Namespace::Player).is_empty());
        assert!(coordinator.store(Namespace::Team).is_empty());
    }

    #[test]
    fn test_blank_player_still_files_team() {
        let coordinator = IngestCoordinator::in_memory();
        let entry = StatsEntry {
            player_name: None,
            team_name: Some("Y".to_string()),
            stats: Some(game(12)),
        };

        assert!(!coordinator.process_record(&entry));
        assert!(coordinator.store(Namespace::Player).is_empty());
        assert_eq!(coordinator.query(Namespace::Team, "Y").unwrap().count, 1);
    }

    #[test]
    fn test_empty_batch_is_zero() {
        let coordinator = IngestCoordinator::in_memory();
        assert_eq!(coordinator.process_batch(&[]), 0);
    }

    #[test]
    fn test_submit_addresses_one_namespace() {
        let coordinator = IngestCoordinator::in_memory();
        let sample = Sample::from(&game(8));

        assert!(coordinator.submit(Namespace::Team, "Y", &sample));
        assert!(coordinator.query(Namespace::Team, "Y").is_some());
        assert!(coordinator.store(Namespace::Player).is_empty());
        assert!(!coordinator.submit(Namespace::Player, "", &sample));
    }

    #[test]
    fn test_namespace_display() {
        assert_eq!(Namespace::Player.to_string(), "player");
        assert_eq!(Namespace::Team.to_string(), "team");
    }
}
