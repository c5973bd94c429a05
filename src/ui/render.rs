use crate::game::board::Board;
use crate::game::types::{Mark, Outcome};

/// Render the grid with 1-based row/column headers. Cells listed in
/// `highlight` are bracketed, which is how the winning line is shown.
pub fn board_text(board: &Board, highlight: Option<&[usize]>) -> String {
    let n = board.size();
    let label_width = n.to_string().len();
    let mut out = String::new();

    out.push_str(&" ".repeat(label_width + 1));
    for col in 1..=n {
        out.push_str(&format!(" {col:^3}"));
    }
    out.push('\n');

    let rule = format!("{}{}+\n", " ".repeat(label_width + 1), "+---".repeat(n));
    for row in 0..n {
        out.push_str(&rule);
        out.push_str(&format!("{:>label_width$} ", row + 1));
        for col in 0..n {
            let index = row * n + col;
            let mark = board.mark_at(index).map_or(' ', Mark::as_char);
            let lit = highlight.is_some_and(|cells| cells.contains(&index));
            if lit {
                out.push_str(&format!("|[{mark}]"));
            } else {
                out.push_str(&format!("| {mark} "));
            }
        }
        out.push_str("|\n");
    }
    out.push_str(&rule);
    out
}

/// Status message for a finished game.
pub fn status_line(outcome: &Outcome, pvp: bool) -> String {
    match outcome {
        Outcome::Won { mark, .. } => {
            let winner = match (*mark, pvp) {
                (Mark::X, false) => "Player",
                (Mark::O, false) => "Computer",
                (Mark::X, true) => "Player 1",
                (Mark::O, true) => "Player 2",
            };
            format!("{winner} wins!")
        }
        Outcome::Draw => "Draw!".to_string(),
        Outcome::Ongoing => String::new(),
    }
}

/// Where the winning line runs, in 1-based (row, column) coordinates.
pub fn line_description(start: usize, end: usize, n: usize) -> String {
    format!(
        "Winning line: ({}, {}) to ({}, {})",
        start / n + 1,
        start % n + 1,
        end / n + 1,
        end % n + 1
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_text_places_marks_on_the_grid() {
        let mut board = Board::new(3);
        board.place(0, Mark::X);
        board.place(4, Mark::O);
        let text = board_text(&board, None);
        let rows: Vec<&str> = text
            .lines()
            .filter(|line| line.contains('|'))
            .collect();
        assert_eq!(rows.len(), 3);
        assert!(rows[0].contains("| X |"));
        assert!(rows[1].contains("| O |"));
    }

    #[test]
    fn highlighted_cells_are_bracketed() {
        let mut board = Board::new(3);
        board.place(0, Mark::O);
        let text = board_text(&board, Some(&[0]));
        assert!(text.contains("|[O]|"));
    }

    #[test]
    fn status_lines_follow_the_mode() {
        let won = Outcome::Won {
            mark: Mark::O,
            combo: vec![0, 1, 2],
        };
        assert_eq!(status_line(&won, false), "Computer wins!");
        assert_eq!(status_line(&won, true), "Player 2 wins!");
        assert_eq!(status_line(&Outcome::Draw, false), "Draw!");
    }

    #[test]
    fn line_description_uses_one_based_coordinates() {
        assert_eq!(
            line_description(0, 8, 3),
            "Winning line: (1, 1) to (3, 3)"
        );
        assert_eq!(
            line_description(2, 6, 3),
            "Winning line: (1, 3) to (3, 1)"
        );
    }
}
