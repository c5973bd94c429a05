use std::collections::{BTreeMap, VecDeque};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::game::board::{board_key, Board};
use crate::game::types::{GameResult, Mark, Move};
use crate::storage;

/// Maximum number of finished games kept in the history; the oldest entry is
/// evicted first.
pub const HISTORY_CAPACITY: usize = 100;

/// One finished game: the move sequence and who won.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    pub moves: Vec<Move>,
    pub result: GameResult,
}

/// Aggregated outcome counters for one (position key, action) pair. Counters
/// only ever grow; a lost game touches `total` alone, which is what drags a
/// bad move's score down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionStats {
    pub wins: u32,
    pub draws: u32,
    pub total: u32,
}

impl ActionStats {
    /// Win-rate proxy with draws weighted half.
    pub fn score(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.wins as f64 + 0.5 * self.draws as f64) / self.total as f64
    }
}

/// Per-position move statistics. Ordered maps keep persistence output and
/// action scanning deterministic (actions in ascending index order).
pub type MoveStats = BTreeMap<String, BTreeMap<usize, ActionStats>>;

/// Game history and move statistics, persisted across sessions. Loaded once
/// at startup and rewritten in full after every recorded game; an in-memory
/// store never touches the filesystem.
#[derive(Debug, Default)]
pub struct StatsStore {
    history: VecDeque<GameRecord>,
    move_stats: MoveStats,
    persist: bool,
}

impl StatsStore {
    /// Load both records from disk, falling back to empty defaults.
    pub fn load() -> Self {
        Self {
            history: storage::load_history(),
            move_stats: storage::load_move_stats(),
            persist: true,
        }
    }

    /// Fresh store that never reads or writes the filesystem.
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn history(&self) -> &VecDeque<GameRecord> {
        &self.history
    }

    pub fn move_stats(&self) -> &MoveStats {
        &self.move_stats
    }

    /// Record a finished game: append it to the bounded history and fold
    /// every computer move into the statistics, then persist both records.
    pub fn record_game(&mut self, moves: &[Move], result: GameResult) {
        if self.history.len() >= HISTORY_CAPACITY {
            self.history.pop_front();
        }
        self.history.push_back(GameRecord {
            moves: moves.to_vec(),
            result,
        });

        self.update_move_stats(moves, result);

        if self.persist {
            if let Err(err) = storage::save_history(&self.history) {
                warn!(error = %err, "failed to save game history");
            }
            if let Err(err) = storage::save_move_stats(&self.move_stats) {
                warn!(error = %err, "failed to save move statistics");
            }
        }
    }

    /// Replay the game from an empty position, crediting each O move with
    /// the position key it was played from. The scratch sequence spans the
    /// highest index the game touched (nine cells when there are no moves).
    fn update_move_stats(&mut self, moves: &[Move], result: GameResult) {
        let cells = moves
            .iter()
            .map(|mv| mv.index)
            .max()
            .map_or(9, |max| max + 1);
        let mut state: Vec<Option<Mark>> = vec![None; cells];
        for mv in moves {
            if mv.player == Mark::O {
                let key = board_key(&state);
                let entry = self
                    .move_stats
                    .entry(key)
                    .or_default()
                    .entry(mv.index)
                    .or_default();
                if result.is_computer_win() {
                    entry.wins += 1;
                } else if result.is_draw() {
                    entry.draws += 1;
                }
                entry.total += 1;
            }
            state[mv.index] = Some(mv.player);
        }
    }

    /// Highest-scoring recorded action for this position that still targets
    /// an empty cell. Occupied cells are skipped before comparison, so a
    /// stale entry can never be returned; equal scores keep the lowest
    /// action index.
    pub fn best_action(&self, board: &Board) -> Option<usize> {
        let actions = self.move_stats.get(&board.stats_key())?;
        let mut best = None;
        let mut best_score = f64::NEG_INFINITY;
        for (&action, stats) in actions {
            if !board.is_empty(action) {
                continue;
            }
            let score = stats.score();
            if score > best_score {
                best_score = score;
                best = Some(action);
            }
        }
        best
    }
}
