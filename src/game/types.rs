use std::fmt;

use serde::{Deserialize, Serialize};

/// A player's symbol on the board. X is the human (or first) player, O the
/// computer (or second) player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A single placed move, immutable once recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub index: usize,
    pub player: Mark,
}

/// Final result of a finished game, as stored in the game history. The
/// labels distinguish the two-human and human-vs-computer variants of the
/// same mark winning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Player,
    #[serde(rename = "Player 1")]
    PlayerOne,
    #[serde(rename = "Player 2")]
    PlayerTwo,
    Computer,
    Draw,
}

impl GameResult {
    pub fn win(mark: Mark, pvp: bool) -> Self {
        match (mark, pvp) {
            (Mark::X, false) => GameResult::Player,
            (Mark::O, false) => GameResult::Computer,
            (Mark::X, true) => GameResult::PlayerOne,
            (Mark::O, true) => GameResult::PlayerTwo,
        }
    }

    pub fn is_computer_win(self) -> bool {
        self == GameResult::Computer
    }

    pub fn is_draw(self) -> bool {
        self == GameResult::Draw
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GameResult::Player => "Player",
            GameResult::PlayerOne => "Player 1",
            GameResult::PlayerTwo => "Player 2",
            GameResult::Computer => "Computer",
            GameResult::Draw => "Draw",
        };
        write!(f, "{label}")
    }
}

/// Result of evaluating a board against the winning combinations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Ongoing,
    Won { mark: Mark, combo: Vec<usize> },
    Draw,
}

impl Outcome {
    pub fn is_finished(&self) -> bool {
        !matches!(self, Outcome::Ongoing)
    }

    /// First and last cell index of the winning line, for the frontend to
    /// draw across the grid.
    pub fn winning_line(&self) -> Option<(usize, usize)> {
        match self {
            Outcome::Won { combo, .. } => Some((*combo.first()?, *combo.last()?)),
            _ => None,
        }
    }
}

/// Turn state of a session. A pending computer turn doubles as the input
/// block for the human player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingHumanMove,
    AwaitingComputerMove,
    Finished,
}

/// Result of asking the session to apply a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveResult {
    /// Move was invalid (wrong phase, occupied cell) and was ignored.
    Rejected,
    /// Move applied, game is still running.
    Continue,
    /// Move applied, game is now over.
    GameOver,
}

/// Settings for one game session. `size` must be validated (> 2) before a
/// session is built.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    pub size: usize,
    pub pvp: bool,
    pub player_first: bool,
    pub hard_mode: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_labels_depend_on_mode() {
        assert_eq!(GameResult::win(Mark::X, false), GameResult::Player);
        assert_eq!(GameResult::win(Mark::O, false), GameResult::Computer);
        assert_eq!(GameResult::win(Mark::X, true), GameResult::PlayerOne);
        assert_eq!(GameResult::win(Mark::O, true), GameResult::PlayerTwo);
    }

    #[test]
    fn results_serialize_with_history_labels() {
        let json = serde_json::to_string(&GameResult::PlayerTwo).unwrap();
        assert_eq!(json, "\"Player 2\"");
        let back: GameResult = serde_json::from_str("\"Player 1\"").unwrap();
        assert_eq!(back, GameResult::PlayerOne);
    }

    #[test]
    fn winning_line_exposes_endpoints() {
        let outcome = Outcome::Won {
            mark: Mark::O,
            combo: vec![2, 4, 6],
        };
        assert_eq!(outcome.winning_line(), Some((2, 6)));
        assert_eq!(Outcome::Draw.winning_line(), None);
    }
}
