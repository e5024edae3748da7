use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Mine layout together with the neighbor count of every safe cell.
///
/// A board never changes after construction, all play state lives in [`Minesweeper`].
///
/// Serializes as rows of raw cell values; deserializing goes through [`Board::from_values`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<i8>>", into = "Vec<Vec<i8>>")]
pub struct Board {
    cells: Array2<CellValue>,
    mine_count: CellCount,
}

impl Board {
    /// Builds the board from a mask of mine positions, counting neighbors for every other cell.
    pub fn from_mine_mask(mine_mask: &Array2<bool>) -> Result<Self> {
        let size = checked_size(mine_mask.dim())?;
        let mut cells: Array2<CellValue> = Array2::default(size.to_nd_index());
        let mut mine_count: CellCount = 0;

        for coords in iter_coords(size) {
            if mine_mask[coords.to_nd_index()] {
                cells[coords.to_nd_index()] = CellValue::Mine;
                mine_count += 1;
            }
        }

        for coords in iter_coords(size) {
            if mine_mask[coords.to_nd_index()] {
                continue;
            }
            let adjacent_mines = mine_mask
                .iter_neighbors(coords)
                .filter(|&pos| mine_mask[pos.to_nd_index()])
                .count();
            cells[coords.to_nd_index()] = CellValue::Clear(adjacent_mines as u8);
        }

        Ok(Self { cells, mine_count })
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let size = checked_size((size.0.into(), size.1.into()))?;
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if !in_bounds(coords, size) {
                return Err(GameError::OutOfBounds);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Self::from_mine_mask(&mine_mask)
    }

    /// Builds a board from raw rows of `-1..=8` values.
    ///
    /// Every safe value must match the mines around it, so a board built this way behaves exactly like a generated
    /// one.
    pub fn from_values<R: AsRef<[i8]>>(rows: &[R]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.as_ref().len());
        let size = checked_size((height, width))?;

        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != width {
                return Err(GameError::InvalidBoardShape);
            }
            for (col, &value) in values.iter().enumerate() {
                mine_mask[[row, col]] = CellValue::try_from(value)?.is_mine();
            }
        }

        let board = Self::from_mine_mask(&mine_mask)?;
        for (row, values) in rows.iter().enumerate() {
            for (col, &value) in values.as_ref().iter().enumerate() {
                if board.cells[[row, col]].as_i8() != value {
                    return Err(GameError::InvalidCellValue(value));
                }
            }
        }

        Ok(board)
    }

    /// `(height, width)`
    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        // dimensions were checked against `Coord` on construction
        (rows as Coord, cols as Coord)
    }

    pub fn height(&self) -> Coord {
        self.size().0
    }

    pub fn width(&self) -> Coord {
        self.size().1
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        let (height, width) = self.size();
        mult(height, width)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if in_bounds(coords, self.size()) {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn get(&self, coords: Coord2) -> Option<CellValue> {
        self.validate_coords(coords)
            .ok()
            .map(|coords| self.cells[coords.to_nd_index()])
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords].is_mine()
    }

    /// All mine positions, derived by scanning the board.
    pub fn mine_positions(&self) -> BTreeSet<Coord2> {
        iter_coords(self.size())
            .filter(|&coords| self.contains_mine(coords))
            .collect()
    }

    pub fn safe_positions(&self) -> BTreeSet<Coord2> {
        iter_coords(self.size())
            .filter(|&coords| !self.contains_mine(coords))
            .collect()
    }

    /// Raw `-1..=8` values, one vector per row.
    pub fn to_values(&self) -> Vec<Vec<i8>> {
        self.cells
            .rows()
            .into_iter()
            .map(|row| row.iter().map(|cell| cell.as_i8()).collect())
            .collect()
    }

    pub fn cells(&self) -> &Array2<CellValue> {
        &self.cells
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        adjacent(coords, self.size())
    }
}

impl Index<Coord2> for Board {
    type Output = CellValue;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl TryFrom<Vec<Vec<i8>>> for Board {
    type Error = GameError;

    fn try_from(rows: Vec<Vec<i8>>) -> Result<Self> {
        Board::from_values(&rows)
    }
}

impl From<Board> for Vec<Vec<i8>> {
    fn from(board: Board) -> Self {
        board.to_values()
    }
}

fn checked_size((rows, cols): (usize, usize)) -> Result<Coord2> {
    if rows == 0 || cols == 0 {
        return Err(GameError::InvalidSize);
    }
    let height = Coord::try_from(rows).map_err(|_| GameError::InvalidSize)?;
    let width = Coord::try_from(cols).map_err(|_| GameError::InvalidSize)?;
    Ok((height, width))
}
