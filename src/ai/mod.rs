use tracing::{debug, warn};

use crate::game::board::Board;
use crate::game::types::Mark;
use crate::stats::StatsStore;

/// Largest board hard mode searches exhaustively. The move tree of a blank
/// n×n board has up to (n²)! interleavings; 3×3 stays in the hundreds of
/// thousands of nodes while anything bigger does not finish in useful time.
pub const MAX_MINIMAX_CELLS: usize = 9;

/// Pick the computer's (O's) next move, or `None` when the board has no
/// empty cell left.
pub fn find_computer_move(
    board: &Board,
    combos: &[Vec<usize>],
    store: &StatsStore,
    hard_mode: bool,
) -> Option<usize> {
    let empties = board.empty_indices();
    if empties.is_empty() {
        return None;
    }

    if hard_mode {
        if board.cell_count() <= MAX_MINIMAX_CELLS {
            return minimax_move(board, combos);
        }
        warn!(
            cells = board.cell_count(),
            limit = MAX_MINIMAX_CELLS,
            "board too large for exhaustive search, falling back to heuristics"
        );
    }

    heuristic_move(board, combos, store, &empties)
}

// ════════════════════════════════════════════════════════════════════════════
// Normal mode – immediate rules, remembered outcomes, line counting
// ════════════════════════════════════════════════════════════════════════════

fn heuristic_move(
    board: &Board,
    combos: &[Vec<usize>],
    store: &StatsStore,
    empties: &[usize],
) -> Option<usize> {
    let n = board.size();

    // A line one mark short of complete decides the move outright: finishing
    // our own line beats blocking the opponent's. When several lines
    // qualify, the last one in generation order wins.
    let mut win_move = None;
    let mut block_move = None;
    for combo in combos {
        let mut ours = 0;
        let mut theirs = 0;
        let mut empty = None;
        for &idx in combo {
            match board.mark_at(idx) {
                Some(Mark::O) => ours += 1,
                Some(Mark::X) => theirs += 1,
                None => {
                    if empty.is_none() {
                        empty = Some(idx);
                    }
                }
            }
        }
        if ours == n - 1 && empty.is_some() {
            win_move = empty;
        }
        if theirs == n - 1 && empty.is_some() {
            block_move = empty;
        }
    }
    if let Some(index) = win_move {
        debug!(index, "completing own line");
        return Some(index);
    }
    if let Some(index) = block_move {
        debug!(index, "blocking opponent line");
        return Some(index);
    }

    // Remembered outcomes for this exact position.
    if let Some(index) = store.best_action(board) {
        debug!(index, "following recorded statistics");
        return Some(index);
    }

    // No memory of this position: take the cell crossed by the most lines.
    // Stable sort, so equal counts keep board order and the first maximum
    // wins.
    let mut scored: Vec<(usize, usize)> = empties.iter().map(|&idx| (idx, 0)).collect();
    for combo in combos {
        for entry in scored.iter_mut() {
            if combo.contains(&entry.0) {
                entry.1 += 1;
            }
        }
    }
    scored.sort_by(|a, b| b.1.cmp(&a.1));
    let choice = scored.first().map(|&(idx, _)| idx);
    if let Some(index) = choice {
        debug!(index, "using line-count fallback");
    }
    choice
}

// ════════════════════════════════════════════════════════════════════════════
// Hard mode – exhaustive minimax
// ════════════════════════════════════════════════════════════════════════════

fn minimax_move(board: &Board, combos: &[Vec<usize>]) -> Option<usize> {
    let mut flat = board.flatten();
    let (score, best) = minimax(&mut flat, combos, true);
    debug!(?best, score, "minimax result");
    best
}

/// Plain minimax over the flattened board, maximizing for O. Terminal
/// positions score +10 for a computer win, -10 for a human win and 0 for a
/// full board; the score carries no depth component, so the search is
/// indifferent between fast and slow wins. Ties keep the first candidate in
/// increasing index order.
fn minimax(
    flat: &mut [Option<Mark>],
    combos: &[Vec<usize>],
    maximizing: bool,
) -> (i32, Option<usize>) {
    if has_line(flat, combos, Mark::O) {
        return (10, None);
    }
    if has_line(flat, combos, Mark::X) {
        return (-10, None);
    }
    if flat.iter().all(|cell| cell.is_some()) {
        return (0, None);
    }

    let (mark, mut best_score) = if maximizing {
        (Mark::O, i32::MIN)
    } else {
        (Mark::X, i32::MAX)
    };
    let mut best_move = None;

    for idx in 0..flat.len() {
        if flat[idx].is_some() {
            continue;
        }
        flat[idx] = Some(mark);
        let (score, _) = minimax(flat, combos, !maximizing);
        flat[idx] = None;

        let better = if maximizing {
            score > best_score
        } else {
            score < best_score
        };
        if better {
            best_score = score;
            best_move = Some(idx);
        }
    }

    (best_score, best_move)
}

fn has_line(flat: &[Option<Mark>], combos: &[Vec<usize>], mark: Mark) -> bool {
    combos
        .iter()
        .any(|combo| combo.iter().all(|&idx| flat[idx] == Some(mark)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::combos::winning_combinations;
    use crate::game::types::{GameResult, Move};

    fn board_with(n: usize, marks: &[(usize, Mark)]) -> Board {
        let mut board = Board::new(n);
        for &(index, mark) in marks {
            assert!(board.place(index, mark));
        }
        board
    }

    fn pick(board: &Board, hard: bool) -> Option<usize> {
        let combos = winning_combinations(board.size());
        let store = StatsStore::in_memory();
        find_computer_move(board, &combos, &store, hard)
    }

    #[test]
    fn full_board_yields_no_move() {
        let mut board = Board::new(3);
        for i in 0..9 {
            board.place(i, if i % 2 == 0 { Mark::X } else { Mark::O });
        }
        assert_eq!(pick(&board, false), None);
        assert_eq!(pick(&board, true), None);
    }

    #[test]
    fn completing_own_line_beats_blocking() {
        // O O _ / X X _ / _ _ _ — both sides threaten; O takes its own win.
        let board = board_with(
            3,
            &[(0, Mark::O), (1, Mark::O), (3, Mark::X), (4, Mark::X)],
        );
        assert_eq!(pick(&board, false), Some(2));
    }

    #[test]
    fn winning_cell_is_taken_even_when_the_opponent_also_threatens() {
        // X X _ / O O _ / _ _ _ — O's own open line at 5 outranks the block
        // at 2 (win check runs before block check).
        let board = board_with(
            3,
            &[(0, Mark::X), (1, Mark::X), (3, Mark::O), (4, Mark::O)],
        );
        assert_eq!(pick(&board, false), Some(5));
    }

    #[test]
    fn opponent_line_is_blocked_when_no_win_exists() {
        // X X _ / _ O _ / _ _ _ — no O line to finish, so block at 2.
        let board = board_with(3, &[(0, Mark::X), (1, Mark::X), (4, Mark::O)]);
        assert_eq!(pick(&board, false), Some(2));
    }

    #[test]
    fn fallback_prefers_the_cell_on_the_most_lines() {
        // Empty 3×3: the center sits on four lines, corners on three.
        let board = Board::new(3);
        assert_eq!(pick(&board, false), Some(4));
    }

    #[test]
    fn recorded_statistics_outrank_the_fallback() {
        let combos = winning_combinations(3);
        let mut store = StatsStore::in_memory();
        // One remembered win through 8 and one loss through 4 from the same
        // position.
        store.record_game(
            &[
                Move {
                    index: 0,
                    player: Mark::X,
                },
                Move {
                    index: 8,
                    player: Mark::O,
                },
            ],
            GameResult::Computer,
        );
        store.record_game(
            &[
                Move {
                    index: 0,
                    player: Mark::X,
                },
                Move {
                    index: 4,
                    player: Mark::O,
                },
                Move {
                    index: 8,
                    player: Mark::X,
                },
            ],
            GameResult::Player,
        );
        let board = board_with(3, &[(0, Mark::X)]);
        assert_eq!(find_computer_move(&board, &combos, &store, false), Some(8));
    }

    #[test]
    fn minimax_values_the_empty_board_as_a_draw() {
        // Optimal play by both sides from an empty 3×3 board is a draw.
        let combos = winning_combinations(3);
        let mut flat = vec![None; 9];
        let (score, best) = minimax(&mut flat, &combos, true);
        assert_eq!(score, 0);
        assert!(best.is_some());
    }

    #[test]
    fn minimax_takes_an_immediate_win() {
        let board = board_with(
            3,
            &[(0, Mark::O), (1, Mark::O), (3, Mark::X), (4, Mark::X)],
        );
        assert_eq!(pick(&board, true), Some(2));
    }

    #[test]
    fn minimax_blocks_a_forced_loss() {
        // X X _ / _ O _ / _ _ X? keep it simple: X threatens row 0.
        let board = board_with(3, &[(0, Mark::X), (1, Mark::X), (4, Mark::O)]);
        assert_eq!(pick(&board, true), Some(2));
    }

    #[test]
    fn oversized_hard_mode_falls_back_to_heuristics() {
        // 4×4 is past the exhaustive-search cap; the heuristic path answers
        // instead of recursing for hours.
        let board = Board::new(4);
        let choice = pick(&board, true);
        assert_eq!(choice, Some(0));
    }
}
