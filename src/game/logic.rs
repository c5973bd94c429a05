use tracing::error;

use super::board::Board;
use super::combos::winning_combinations;
use super::types::{Config, GameResult, Mark, Move, MoveResult, Outcome, Phase};
use crate::ai;
use crate::stats::StatsStore;

/// Evaluate a board against the winning lines. The first complete line in
/// generation order (rows, then columns, then diagonals) wins; a full board
/// with no winner is a draw. Stateless: the same board always evaluates to
/// the same outcome.
pub fn evaluate(board: &Board, combos: &[Vec<usize>]) -> Outcome {
    for combo in combos {
        let Some(mark) = board.mark_at(combo[0]) else {
            continue;
        };
        if combo[1..].iter().all(|&idx| board.mark_at(idx) == Some(mark)) {
            return Outcome::Won {
                mark,
                combo: combo.clone(),
            };
        }
    }
    if board.is_full() {
        Outcome::Draw
    } else {
        Outcome::Ongoing
    }
}

/// One round of the game: board, move history and turn state. The phase
/// machine gates input, so a human move is silently ignored while the
/// computer's turn is pending and after the game has finished.
#[derive(Debug)]
pub struct GameSession {
    config: Config,
    board: Board,
    combos: Vec<Vec<usize>>,
    moves: Vec<Move>,
    turn: Mark,
    phase: Phase,
    outcome: Outcome,
}

impl GameSession {
    pub fn new(config: Config) -> Self {
        debug_assert!(config.size > 2, "board size must be validated by the caller");
        let mut session = Self {
            board: Board::new(config.size),
            combos: winning_combinations(config.size),
            moves: Vec::new(),
            turn: Mark::X,
            phase: Phase::AwaitingHumanMove,
            outcome: Outcome::Ongoing,
            config,
        };
        session.reset_turn();
        session
    }

    /// Start a fresh round with the same configuration. Because the frontend
    /// is synchronous there is never a computer move in flight to cancel
    /// here; a new board simply means the next computer move is computed
    /// from it.
    pub fn restart(&mut self) {
        self.board = Board::new(self.config.size);
        self.moves.clear();
        self.outcome = Outcome::Ongoing;
        self.reset_turn();
    }

    fn reset_turn(&mut self) {
        if self.config.pvp || self.config.player_first {
            self.turn = Mark::X;
            self.phase = Phase::AwaitingHumanMove;
        } else {
            self.turn = Mark::O;
            self.phase = Phase::AwaitingComputerMove;
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// Mark that moves next (in PvP this alternates between both humans).
    pub fn turn(&self) -> Mark {
        self.turn
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Apply a human move. Ignored unless a human move is awaited and the
    /// target cell is free.
    pub fn play_human(&mut self, index: usize, store: &mut StatsStore) -> MoveResult {
        if self.phase != Phase::AwaitingHumanMove {
            return MoveResult::Rejected;
        }
        self.apply(index, self.turn, store)
    }

    /// Run the move selector and apply its choice. Ignored unless a computer
    /// move is awaited.
    pub fn play_computer(&mut self, store: &mut StatsStore) -> MoveResult {
        if self.phase != Phase::AwaitingComputerMove {
            return MoveResult::Rejected;
        }
        let choice =
            ai::find_computer_move(&self.board, &self.combos, store, self.config.hard_mode);
        let Some(index) = choice else {
            // The selector only comes up empty on a full board, and a full
            // board ends the game before another computer turn is reachable.
            error!("move selector returned no move on an unfinished board");
            debug_assert!(false, "selector returned no move mid-game");
            return MoveResult::Rejected;
        };
        self.apply(index, Mark::O, store)
    }

    fn apply(&mut self, index: usize, mark: Mark, store: &mut StatsStore) -> MoveResult {
        if !self.board.place(index, mark) {
            return MoveResult::Rejected;
        }
        self.moves.push(Move {
            index,
            player: mark,
        });
        self.outcome = evaluate(&self.board, &self.combos);
        match self.outcome.clone() {
            Outcome::Ongoing => {
                self.turn = mark.opponent();
                self.phase = if !self.config.pvp && self.turn == Mark::O {
                    Phase::AwaitingComputerMove
                } else {
                    Phase::AwaitingHumanMove
                };
                MoveResult::Continue
            }
            Outcome::Won { mark, .. } => {
                self.finish(GameResult::win(mark, self.config.pvp), store)
            }
            Outcome::Draw => self.finish(GameResult::Draw, store),
        }
    }

    fn finish(&mut self, result: GameResult, store: &mut StatsStore) -> MoveResult {
        self.phase = Phase::Finished;
        store.record_game(&self.moves, result);
        MoveResult::GameOver
    }
}
