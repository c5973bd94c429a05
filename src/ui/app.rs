use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use super::render;
use crate::game::logic::GameSession;
use crate::game::types::{Config, Mark, MoveResult, Outcome, Phase};
use crate::stats::StatsStore;

/// Cumulative results across the rounds of one sitting.
#[derive(Debug, Default)]
struct ScoreBoard {
    first: u32,
    second: u32,
    draws: u32,
}

impl ScoreBoard {
    fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Won { mark: Mark::X, .. } => self.first += 1,
            Outcome::Won { mark: Mark::O, .. } => self.second += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::Ongoing => {}
        }
    }

    fn line(&self, pvp: bool) -> String {
        let (first, second) = if pvp {
            ("Player 1", "Player 2")
        } else {
            ("Player", "Computer")
        };
        format!(
            "{first}: {}  {second}: {}  Draws: {}",
            self.first, self.second, self.draws
        )
    }
}

/// Drive games until the player quits. Blocks on stdin between human moves;
/// the pause before each computer move is pure pacing.
pub fn run(config: Config, mut store: StatsStore, delay: Duration) -> io::Result<()> {
    let mut session = GameSession::new(config);
    let mut scores = ScoreBoard::default();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    println!(
        "{}×{} board — enter moves as `row col`, q to quit.",
        config.size, config.size
    );

    loop {
        while session.phase() != Phase::Finished {
            match session.phase() {
                Phase::AwaitingComputerMove => {
                    println!("\n{}", render::board_text(session.board(), None));
                    println!("Computer is thinking...");
                    thread::sleep(delay);
                    session.play_computer(&mut store);
                }
                Phase::AwaitingHumanMove => {
                    println!("\n{}", render::board_text(session.board(), None));
                    print!("{}", prompt_for(&session));
                    io::stdout().flush()?;
                    let Some(line) = lines.next() else {
                        return Ok(());
                    };
                    let line = line?;
                    let input = line.trim();
                    if input.eq_ignore_ascii_case("q") {
                        return Ok(());
                    }
                    let Some(index) = parse_move(input, session.board().size()) else {
                        println!("Enter a move as `row col` (1-based), or q to quit.");
                        continue;
                    };
                    if session.play_human(index, &mut store) == MoveResult::Rejected {
                        println!("That cell is taken.");
                    }
                }
                Phase::Finished => {}
            }
        }

        let outcome = session.outcome().clone();
        println!(
            "\n{}",
            render::board_text(session.board(), winning_cells(&outcome))
        );
        println!("{}", render::status_line(&outcome, config.pvp));
        if let Some((start, end)) = outcome.winning_line() {
            println!("{}", render::line_description(start, end, config.size));
        }
        scores.record(&outcome);
        println!("{}", scores.line(config.pvp));

        print!("Play again? [y/N] ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            return Ok(());
        };
        if !line?.trim().eq_ignore_ascii_case("y") {
            return Ok(());
        }
        session.restart();
    }
}

fn winning_cells(outcome: &Outcome) -> Option<&[usize]> {
    match outcome {
        Outcome::Won { combo, .. } => Some(combo.as_slice()),
        _ => None,
    }
}

fn prompt_for(session: &GameSession) -> String {
    if session.config().pvp {
        let number = if session.turn() == Mark::X { 1 } else { 2 };
        format!("Player {number} ({}), your move: ", session.turn())
    } else {
        "Your move: ".to_string()
    }
}

/// Parse `row col` (1-based) into a cell index, rejecting anything off the
/// board.
fn parse_move(input: &str, n: usize) -> Option<usize> {
    let mut parts = input.split_whitespace();
    let row: usize = parts.next()?.parse().ok()?;
    let col: usize = parts.next()?.parse().ok()?;
    if parts.next().is_some() || row == 0 || col == 0 || row > n || col > n {
        return None;
    }
    Some((row - 1) * n + (col - 1))
}
