use std::collections::VecDeque;
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::stats::{GameRecord, MoveStats};

/// Runtime options persisted between sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub board_size: usize,
    pub hard_mode: bool,
    /// Pause before each computer move, purely for pacing.
    pub move_delay_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            board_size: 3,
            hard_mode: false,
            move_delay_ms: 500,
        }
    }
}

fn project_config_dir() -> Option<PathBuf> {
    // Application-specific qualifiers; these determine platform default locations.
    ProjectDirs::from("io.github", "tictacn", "TicTacN").map(|p| p.config_dir().to_path_buf())
}

fn ensure_config_dir() -> io::Result<PathBuf> {
    if let Some(dir) = project_config_dir() {
        fs::create_dir_all(&dir)?;
        Ok(dir)
    } else {
        // Fallback to current directory
        Ok(std::env::current_dir()?)
    }
}

fn settings_path() -> io::Result<PathBuf> {
    let mut p = ensure_config_dir()?;
    p.push("settings.json");
    Ok(p)
}

fn history_path() -> io::Result<PathBuf> {
    let mut p = ensure_config_dir()?;
    p.push("history.json");
    Ok(p)
}

fn move_stats_path() -> io::Result<PathBuf> {
    let mut p = ensure_config_dir()?;
    p.push("move_stats.json");
    Ok(p)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> io::Result<T> {
    let mut contents = String::new();
    File::open(path)?.read_to_string(&mut contents)?;
    serde_json::from_str(&contents).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> io::Result<()> {
    let data = serde_json::to_string_pretty(value)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())
}

/// Absent or unreadable records fall back to their defaults; the game never
/// refuses to start over bad persisted state.
fn load_or_default<T: DeserializeOwned + Default>(path: io::Result<PathBuf>, what: &str) -> T {
    let Ok(path) = path else {
        return T::default();
    };
    if !path.is_file() {
        return T::default();
    }
    match read_json(&path) {
        Ok(value) => value,
        Err(err) => {
            warn!(error = %err, what, "discarding unreadable record");
            T::default()
        }
    }
}

pub fn load_settings() -> Settings {
    load_or_default(settings_path(), "settings")
}

pub fn save_settings(settings: &Settings) -> io::Result<()> {
    write_json(&settings_path()?, settings)
}

pub fn load_history() -> VecDeque<GameRecord> {
    load_or_default(history_path(), "game history")
}

pub fn save_history(history: &VecDeque<GameRecord>) -> io::Result<()> {
    write_json(&history_path()?, history)
}

pub fn load_move_stats() -> MoveStats {
    load_or_default(move_stats_path(), "move statistics")
}

pub fn save_move_stats(stats: &MoveStats) -> io::Result<()> {
    write_json(&move_stats_path()?, stats)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::game::types::{GameResult, Mark, Move};
    use crate::stats::ActionStats;

    #[test]
    fn json_records_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let settings = Settings {
            board_size: 5,
            hard_mode: true,
            move_delay_ms: 100,
        };
        write_json(&path, &settings).unwrap();
        let back: Settings = read_json(&path).unwrap();
        assert_eq!(back.board_size, 5);
        assert!(back.hard_mode);
        assert_eq!(back.move_delay_ms, 100);
    }

    #[test]
    fn history_and_stats_serialize_as_plain_json() {
        let dir = tempfile::tempdir().unwrap();

        let history: VecDeque<GameRecord> = VecDeque::from([GameRecord {
            moves: vec![Move {
                index: 4,
                player: Mark::O,
            }],
            result: GameResult::Computer,
        }]);
        let history_path = dir.path().join("history.json");
        write_json(&history_path, &history).unwrap();
        let back: VecDeque<GameRecord> = read_json(&history_path).unwrap();
        assert_eq!(back, history);

        let mut stats: MoveStats = BTreeMap::new();
        stats
            .entry("    O    ".to_string())
            .or_default()
            .insert(0, ActionStats {
                wins: 2,
                draws: 1,
                total: 4,
            });
        let stats_path = dir.path().join("move_stats.json");
        write_json(&stats_path, &stats).unwrap();
        let back: MoveStats = read_json(&stats_path).unwrap();
        assert_eq!(back, stats);
    }

    #[test]
    fn unreadable_records_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{not json").unwrap();

        let settings: Settings = load_or_default(Ok(path), "settings");
        assert_eq!(settings.board_size, Settings::default().board_size);
    }

    #[test]
    fn missing_records_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let history: VecDeque<GameRecord> = load_or_default(Ok(path), "game history");
        assert!(history.is_empty());
    }
}
