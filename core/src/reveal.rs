use alloc::collections::BTreeSet;
use alloc::vec;
use alloc::vec::Vec;
use ndarray::Array2;

use crate::*;

/// Player-side state of a board: which cells are uncovered and which carry a flag.
///
/// Flags and reveals are tracked independently, a revealed cell may still hold a flag.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct PlayField {
    revealed: Array2<bool>,
    flags: Array2<bool>,
    revealed_count: CellCount,
    flag_count: CellCount,
}

impl PlayField {
    pub(crate) fn new(size: Coord2) -> Self {
        Self {
            revealed: Array2::default(size.to_nd_index()),
            flags: Array2::default(size.to_nd_index()),
            revealed_count: 0,
            flag_count: 0,
        }
    }

    pub(crate) fn is_revealed(&self, coords: Coord2) -> bool {
        self.revealed[coords.to_nd_index()]
    }

    pub(crate) fn is_flagged(&self, coords: Coord2) -> bool {
        self.flags[coords.to_nd_index()]
    }

    pub(crate) fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub(crate) fn flag_count(&self) -> CellCount {
        self.flag_count
    }

    pub(crate) fn revealed_positions(&self) -> BTreeSet<Coord2> {
        collect_marked(&self.revealed)
    }

    pub(crate) fn flag_positions(&self) -> BTreeSet<Coord2> {
        collect_marked(&self.flags)
    }

    /// Flips the flag at `coords`, returning the play describing the change.
    pub(crate) fn toggle_flag(&mut self, coords: Coord2) -> Play {
        let flag = &mut self.flags[coords.to_nd_index()];
        *flag = !*flag;
        let kind = if *flag {
            self.flag_count += 1;
            PlayKind::FlagAdded
        } else {
            self.flag_count -= 1;
            PlayKind::FlagRemoved
        };
        Play::new(kind, vec![coords], false)
    }

    /// Covers `coords` again, used when undoing a loss.
    pub(crate) fn unreveal(&mut self, coords: Coord2) {
        let revealed = &mut self.revealed[coords.to_nd_index()];
        if *revealed {
            *revealed = false;
            self.revealed_count -= 1;
        }
    }

    /// Direct play on `coords`, which must be inside `board`.
    ///
    /// Flagged cells are left alone, revealed cells are chorded, anything else is revealed.
    pub(crate) fn play(&mut self, board: &Board, coords: Coord2) -> Play {
        if self.is_flagged(coords) {
            Play::nothing(coords)
        } else if self.is_revealed(coords) {
            self.chord(board, coords)
        } else {
            self.reveal_hidden(board, coords)
        }
    }

    /// Reveal triggered from inside a chord: never chords again and never fails.
    fn reveal_nested(&mut self, board: &Board, coords: Coord2) -> Play {
        if self.is_flagged(coords) || self.is_revealed(coords) {
            Play::nothing(coords)
        } else {
            self.reveal_hidden(board, coords)
        }
    }

    fn reveal_hidden(&mut self, board: &Board, coords: Coord2) -> Play {
        match board[coords] {
            CellValue::Mine => {
                self.mark_revealed(coords);
                Play::new(PlayKind::MineExploded, vec![coords], true)
            }
            CellValue::Clear(0) => Play::new(PlayKind::Spreading, self.spread(board, coords), false),
            CellValue::Clear(_) => {
                self.mark_revealed(coords);
                Play::new(PlayKind::SingleNumberRevealed, vec![coords], false)
            }
        }
    }

    /// Reveals the zero region connected to `start` plus its numbered border.
    ///
    /// Depth-first with an explicit stack; neighbors are pushed in reverse so they come off the stack in adjacency
    /// order. Revealed and flagged cells stop the expansion.
    fn spread(&mut self, board: &Board, start: Coord2) -> Vec<Coord2> {
        let mut positions = Vec::new();
        let mut to_visit = vec![start];

        while let Some(coords) = to_visit.pop() {
            if self.is_revealed(coords) || self.is_flagged(coords) {
                continue;
            }

            self.mark_revealed(coords);
            positions.push(coords);

            if board[coords].is_zero() {
                let neighbors: Vec<Coord2> = board
                    .iter_neighbors(coords)
                    .filter(|&pos| !self.is_revealed(pos) && !self.is_flagged(pos))
                    .collect();
                to_visit.extend(neighbors.into_iter().rev());
            }
        }

        positions
    }

    /// Reveals every neighbor of a revealed number once exactly that many neighbors are flagged.
    ///
    /// Each neighbor goes through the nested path, so a mine among them marks the whole chord as a loss but does not
    /// stop the remaining neighbors from being revealed.
    fn chord(&mut self, board: &Board, coords: Coord2) -> Play {
        let Some(count) = board[coords].count().filter(|&count| count > 0) else {
            return Play::nothing(coords);
        };

        if usize::from(count) != self.count_flagged_neighbors(board, coords) {
            return Play::nothing(coords);
        }

        let mut positions = Vec::new();
        let mut caused_loss = false;
        for neighbor in board.iter_neighbors(coords) {
            let play = self.reveal_nested(board, neighbor);
            if play.has_update() {
                positions.extend_from_slice(play.positions());
            }
            caused_loss |= play.caused_loss();
        }

        Play::new(PlayKind::Chord, positions, caused_loss)
    }

    fn count_flagged_neighbors(&self, board: &Board, coords: Coord2) -> usize {
        board
            .iter_neighbors(coords)
            .filter(|&pos| self.is_flagged(pos))
            .count()
    }

    fn mark_revealed(&mut self, coords: Coord2) {
        let revealed = &mut self.revealed[coords.to_nd_index()];
        if !*revealed {
            *revealed = true;
            self.revealed_count += 1;
        }
    }
}

fn collect_marked(mask: &Array2<bool>) -> BTreeSet<Coord2> {
    let (rows, cols) = mask.dim();
    iter_coords((rows as Coord, cols as Coord))
        .filter(|&coords| mask[coords.to_nd_index()])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(size: Coord2, mines: &[Coord2]) -> Board {
        Board::from_mine_coords(size, mines).unwrap()
    }

    fn set(positions: &[Coord2]) -> BTreeSet<Coord2> {
        positions.iter().copied().collect()
    }

    #[test]
    fn number_reveals_single_cell() {
        let board = layout((3, 3), &[(0, 0)]);
        let mut field = PlayField::new(board.size());

        let play = field.play(&board, (1, 1));

        assert_eq!(play.kind(), PlayKind::SingleNumberRevealed);
        assert_eq!(play.positions(), &[(1, 1)]);
        assert_eq!(field.revealed_count(), 1);
    }

    #[test]
    fn mine_reveal_causes_loss() {
        let board = layout((2, 2), &[(0, 0)]);
        let mut field = PlayField::new(board.size());

        let play = field.play(&board, (0, 0));

        assert_eq!(play.kind(), PlayKind::MineExploded);
        assert!(play.caused_loss());
        assert!(field.is_revealed((0, 0)));
    }

    #[test]
    fn spread_reveals_zero_region_and_border_once() {
        // column 3 is all mines, columns 0 and 1 are zeros bordered by numbers in column 2
        let board = layout((4, 5), &[(0, 3), (1, 3), (2, 3), (3, 3)]);
        let mut field = PlayField::new(board.size());

        let play = field.play(&board, (0, 0));

        let expected: BTreeSet<Coord2> = iter_coords((4, 3)).collect();
        assert_eq!(play.kind(), PlayKind::Spreading);
        assert_eq!(play.positions().len(), expected.len());
        assert_eq!(set(play.positions()), expected);
        assert_eq!(field.revealed_positions(), expected);
        assert!(!field.is_revealed((0, 4)));
    }

    #[test]
    fn spread_visits_in_depth_first_adjacency_order() {
        let board = layout((2, 3), &[(1, 2)]);
        let mut field = PlayField::new(board.size());

        let play = field.play(&board, (0, 0));

        assert_eq!(play.positions(), &[(0, 0), (0, 1), (1, 0), (1, 1)]);
        assert!(!field.is_revealed((0, 2)));
    }

    #[test]
    fn spread_skips_flagged_cells() {
        let board = layout((3, 3), &[]);
        let mut field = PlayField::new(board.size());
        field.toggle_flag((2, 2));

        let play = field.play(&board, (0, 0));

        assert_eq!(play.positions().len(), 8);
        assert!(!field.is_revealed((2, 2)));
        assert!(field.is_flagged((2, 2)));
    }

    #[test]
    fn flagged_cell_is_not_revealed() {
        let board = layout((2, 2), &[(0, 0)]);
        let mut field = PlayField::new(board.size());
        field.toggle_flag((0, 0));

        let play = field.play(&board, (0, 0));

        assert_eq!(play.kind(), PlayKind::Nothing);
        assert!(!play.caused_loss());
        assert_eq!(field.revealed_count(), 0);
    }

    #[test]
    fn chord_reveals_unflagged_neighbors() {
        let board = layout((3, 3), &[(0, 0)]);
        let mut field = PlayField::new(board.size());
        field.play(&board, (1, 1));
        field.toggle_flag((0, 0));

        let play = field.play(&board, (1, 1));

        assert_eq!(play.kind(), PlayKind::Chord);
        assert!(!play.caused_loss());
        assert_eq!(
            set(play.positions()),
            set(&[(0, 1), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1), (2, 2)])
        );
        assert!(!field.is_revealed((0, 0)));
    }

    #[test]
    fn chord_with_wrong_flag_count_is_nothing() {
        let board = layout((3, 3), &[(0, 0)]);
        let mut field = PlayField::new(board.size());
        field.play(&board, (1, 1));

        let play = field.play(&board, (1, 1));
        assert_eq!(play.kind(), PlayKind::Nothing);

        field.toggle_flag((0, 0));
        field.toggle_flag((2, 2));
        let play = field.play(&board, (1, 1));
        assert_eq!(play.kind(), PlayKind::Nothing);
        assert_eq!(field.revealed_count(), 1);
    }

    #[test]
    fn chord_on_misflagged_number_keeps_revealing_after_mine() {
        let board = layout((3, 3), &[(0, 0)]);
        let mut field = PlayField::new(board.size());
        field.play(&board, (1, 1));
        field.toggle_flag((2, 2));

        let play = field.play(&board, (1, 1));

        assert_eq!(play.kind(), PlayKind::Chord);
        assert!(play.caused_loss());
        assert_eq!(play.positions().first(), Some(&(0, 0)));
        assert_eq!(play.positions().len(), 7);
        assert_eq!(field.revealed_count(), 8);
    }

    #[test]
    fn chord_spreads_through_zero_neighbors() {
        let board = layout((3, 5), &[(0, 0)]);
        let mut field = PlayField::new(board.size());
        field.play(&board, (1, 1));
        field.toggle_flag((0, 0));

        let play = field.play(&board, (1, 1));

        assert_eq!(play.kind(), PlayKind::Chord);
        assert_eq!(field.revealed_count(), 14);
        assert_eq!(play.positions().len(), 13);
    }

    #[test]
    fn toggle_flag_flips_membership() {
        let mut field = PlayField::new((2, 2));

        assert_eq!(field.toggle_flag((1, 1)).kind(), PlayKind::FlagAdded);
        assert_eq!(field.flag_positions(), set(&[(1, 1)]));
        assert_eq!(field.toggle_flag((1, 1)).kind(), PlayKind::FlagRemoved);
        assert_eq!(field.flag_count(), 0);
    }

    #[test]
    fn spread_handles_large_open_board() {
        let board = layout((255, 255), &[(254, 254)]);
        let mut field = PlayField::new(board.size());

        let play = field.play(&board, (0, 0));

        assert_eq!(play.positions().len(), 255 * 255 - 1);
        assert_eq!(field.revealed_count(), board.safe_cell_count());
    }
}
