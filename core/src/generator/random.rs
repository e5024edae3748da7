use alloc::vec::Vec;
use ndarray::Array2;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::index;

use super::*;

/// Generation strategy that places mines uniformly at random, keeping the config's initial play free of mines.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomBoardGenerator {
    seed: u64,
}

impl RandomBoardGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: GameConfig) -> Result<Board> {
        let mut rng = SmallRng::seed_from_u64(self.seed);
        generate_board(config, &mut rng)
    }
}

/// Samples `config.mines` distinct cells from `rng` and builds the board around them.
///
/// Candidates are taken in row-major order with the initial play left out, so the same rng state and config always
/// give the same board.
pub fn generate_board<R: rand::Rng + ?Sized>(config: GameConfig, rng: &mut R) -> Result<Board> {
    let config = config.validated()?;
    let safe_cell = config.initial_play;

    let candidates: Vec<Coord2> = iter_coords(config.size)
        .filter(|&coords| Some(coords) != safe_cell)
        .collect();

    let mut mine_mask: Array2<bool> = Array2::default(config.size.to_nd_index());
    for candidate in index::sample(rng, candidates.len(), config.mines.into()).iter() {
        mine_mask[candidates[candidate].to_nd_index()] = true;
    }

    let board = Board::from_mine_mask(&mine_mask)?;
    log::debug!(
        "Generated {}x{} board with {} mines, safe cell: {:?}",
        config.size.0,
        config.size.1,
        board.mine_count(),
        safe_cell
    );
    Ok(board)
}
