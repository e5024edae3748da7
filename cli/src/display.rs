use std::fmt::Write;

use minefield_core::{CellValue, Coord2, GameState, Minesweeper};

const MINE: &str = "X";
const FLAG: &str = "F";
const COVERED: &str = "■";

fn glyph(game: &Minesweeper, coords: Coord2) -> String {
    match game.visible_value(coords) {
        Some(CellValue::Mine) => MINE.to_owned(),
        Some(CellValue::Clear(0)) => " ".to_owned(),
        Some(CellValue::Clear(count)) => count.to_string(),
        None if game.is_flagged(coords) => FLAG.to_owned(),
        None => COVERED.to_owned(),
    }
}

fn digits(n: u8) -> usize {
    n.to_string().len()
}

/// Renders the board with column numbers on top and row numbers on the left.
pub fn render(game: &Minesweeper) -> String {
    let (height, width) = game.size();
    let row_label = digits(height.saturating_sub(1));
    let cell = digits(width.saturating_sub(1));

    let mut out = String::new();
    let _ = write!(out, "{:row_label$} |", "");
    for col in 0..width {
        let _ = write!(out, " {col:>cell$}");
    }
    out.push('\n');
    let _ = writeln!(
        out,
        "{}+{}",
        "-".repeat(row_label + 1),
        "-".repeat((cell + 1) * usize::from(width))
    );

    for row in 0..height {
        let _ = write!(out, "{row:>row_label$} |");
        for col in 0..width {
            let _ = write!(out, " {:>cell$}", glyph(game, (row, col)));
        }
        out.push('\n');
    }

    out
}

pub fn status(game: &Minesweeper) -> String {
    match game.state() {
        GameState::InProgress => format!("Mines left: {}", game.remaining_mines()),
        GameState::Won => "You won!".to_owned(),
        GameState::Lost => "Boom! You lost.".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minefield_core::Board;

    fn game() -> Minesweeper {
        let board = Board::from_mine_coords((3, 3), &[(0, 0)]).unwrap();
        Minesweeper::from_board(board, 0)
    }

    #[test]
    fn covered_board() {
        let game = game();

        assert_eq!(
            render(&game),
            "  | 0 1 2\n--+------\n0 | ■ ■ ■\n1 | ■ ■ ■\n2 | ■ ■ ■\n"
        );
    }

    #[test]
    fn shows_numbers_blanks_flags_and_mines() {
        let mut game = game();
        game.play((2, 2)).unwrap();
        game.toggle_flag((0, 0)).unwrap();

        assert_eq!(
            render(&game),
            "  | 0 1 2\n--+------\n0 | F 1  \n1 | 1 1  \n2 |      \n"
        );

        assert_eq!(status(&game), "You won!");

        let mut game = self::game();
        game.play((0, 0)).unwrap();
        assert!(render(&game).starts_with("  | 0 1 2\n--+------\n0 | X"));
        assert_eq!(status(&game), "Boom! You lost.");
    }

    #[test]
    fn wide_boards_pad_columns() {
        let board = Board::from_mine_coords((2, 11), &[]).unwrap();
        let game = Minesweeper::from_board(board, 0);

        let header = render(&game).lines().next().unwrap().to_owned();
        assert_eq!(header, "  |  0  1  2  3  4  5  6  7  8  9 10");
    }

    #[test]
    fn status_counts_flags() {
        let mut game = game();
        game.toggle_flag((1, 1)).unwrap();
        game.toggle_flag((2, 2)).unwrap();

        assert_eq!(status(&game), "Mines left: -1");
    }
}
