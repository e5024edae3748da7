use ndarray::Array2;

/// Single coordinate axis used for board height, width, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, column)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Whether `coords` lies inside a board of `size` `(height, width)`.
pub const fn in_bounds(coords: Coord2, size: Coord2) -> bool {
    coords.0 < size.0 && coords.1 < size.1
}

/// King-move neighbors of `coords` that lie inside a board of `size`.
///
/// The order is fixed (row above, same row, row below; left to right), so anything derived from it, like the order of
/// positions in a spreading play, is reproducible.
pub fn adjacent(coords: Coord2, size: Coord2) -> NeighborIter {
    NeighborIter::new(coords, size)
}

/// Row-major `(row, column)` iterator over every cell of a board of `size`.
pub fn iter_coords((height, width): Coord2) -> impl Iterator<Item = Coord2> {
    (0..height).flat_map(move |row| (0..width).map(move |col| (row, col)))
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: Coord2) -> NeighborIter {
        let (rows, cols) = self.dim();
        let size = (
            rows.try_into().unwrap_or(Coord::MAX),
            cols.try_into().unwrap_or(Coord::MAX),
        );
        NeighborIter::new(index, size)
    }
}

const DISPLACEMENTS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (isize, isize), bounds: Coord2) -> Option<Coord2> {
    let (row, col) = coords;
    let (d_row, d_col) = delta;
    let (max_row, max_col) = bounds;

    let next_row = row.checked_add_signed(d_row.try_into().ok()?)?;
    if next_row >= max_row {
        return None;
    }

    let next_col = col.checked_add_signed(d_col.try_into().ok()?)?;
    if next_col >= max_col {
        return None;
    }

    Some((next_row, next_col))
}

#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item =
                apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.bounds);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    #[test]
    fn interior_cell_has_eight_neighbors_in_row_major_order() {
        let neighbors: Vec<_> = adjacent((1, 1), (3, 3)).collect();

        assert_eq!(
            neighbors,
            vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1), (2, 2)]
        );
    }

    #[test]
    fn corner_neighbors_are_clipped() {
        let top_left: Vec<_> = adjacent((0, 0), (3, 4)).collect();
        let bottom_right: Vec<_> = adjacent((2, 3), (3, 4)).collect();

        assert_eq!(top_left, vec![(0, 1), (1, 0), (1, 1)]);
        assert_eq!(bottom_right, vec![(1, 2), (1, 3), (2, 2)]);
    }

    #[test]
    fn single_cell_board_has_no_neighbors() {
        assert_eq!(adjacent((0, 0), (1, 1)).count(), 0);
    }

    #[test]
    fn neighbors_never_leave_a_max_sized_board() {
        let size = (Coord::MAX, Coord::MAX);
        let neighbors: Vec<_> = adjacent((Coord::MAX - 1, Coord::MAX - 1), size).collect();

        assert_eq!(neighbors.len(), 3);
        assert!(neighbors.iter().all(|&coords| in_bounds(coords, size)));
    }

    #[test]
    fn array_neighbors_use_array_shape() {
        let grid: Array2<bool> = Array2::default((2, 5));

        assert_eq!(grid.iter_neighbors((0, 4)).count(), 3);
    }

    #[test]
    fn coords_iterate_row_major() {
        let coords: Vec<_> = iter_coords((2, 2)).collect();

        assert_eq!(coords, vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
    }
}
