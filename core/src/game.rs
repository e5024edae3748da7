use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::reveal::PlayField;
use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameState {
    InProgress,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::InProgress
    }
}

/// A single game: the board, the player's reveals and flags, and the history of plays.
///
/// The state is never stored, it is derived from the flags, the reveals and the last play on every query.
#[derive(Clone, Debug)]
pub struct Minesweeper {
    config: GameConfig,
    board: Board,
    field: PlayField,
    history: Vec<Play>,
    rng: SmallRng,
}

impl Minesweeper {
    /// Generates a board for `config` from `seed`, then plays `config.initial_play` if there is one.
    pub fn from_config(config: GameConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, SmallRng::seed_from_u64(seed))
    }

    pub fn with_rng(config: GameConfig, mut rng: SmallRng) -> Result<Self> {
        let board = generate_board(config, &mut rng)?;
        let mut game = Self::from_parts(board, rng);
        if let Some(coords) = config.initial_play {
            game.play(coords)?;
        }
        Ok(game)
    }

    /// Plays on a fixed board. `seed` only matters once [`Minesweeper::new_game`] asks for a fresh layout.
    pub fn from_board(board: Board, seed: u64) -> Self {
        Self::from_parts(board, SmallRng::seed_from_u64(seed))
    }

    fn from_parts(board: Board, rng: SmallRng) -> Self {
        let config = GameConfig::new_unchecked(board.size(), board.mine_count());
        Self {
            config,
            field: PlayField::new(board.size()),
            board,
            history: Vec::new(),
            rng,
        }
    }

    pub fn state(&self) -> GameState {
        if self.is_won() {
            GameState::Won
        } else if self.history.last().is_some_and(Play::caused_loss) {
            GameState::Lost
        } else {
            GameState::InProgress
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.state().is_finished()
    }

    /// Won when the flags are exactly the mines and every other cell is revealed.
    fn is_won(&self) -> bool {
        if self.field.flag_count() != self.board.mine_count()
            || self.field.revealed_count() != self.board.safe_cell_count()
        {
            return false;
        }

        iter_coords(self.size()).all(|coords| {
            let has_mine = self.board.contains_mine(coords);
            self.field.is_flagged(coords) == has_mine && self.field.is_revealed(coords) != has_mine
        })
    }

    /// Reveals `coords`, or chords it when it is already revealed. Flagged cells are left alone.
    pub fn play(&mut self, coords: Coord2) -> Result<Play> {
        self.check_not_finished()?;
        let coords = self.board.validate_coords(coords)?;

        let play = self.field.play(&self.board, coords);
        log::debug!(
            "Played {:?}: {:?}, {} position(s) revealed",
            coords,
            play.kind(),
            if play.has_update() { play.positions().len() } else { 0 }
        );
        if play.caused_loss() {
            log::debug!("Mine hit at {:?}", coords);
        }

        self.history.push(play.clone());
        Ok(play)
    }

    /// Adds or removes a flag at `coords`, whether or not the cell is revealed.
    ///
    /// This is allowed after the game ended too. The flag record becomes the last history entry, so a lost
    /// game reads as in progress again afterwards.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<Play> {
        let coords = self.board.validate_coords(coords)?;

        let play = self.field.toggle_flag(coords);
        log::debug!("Flag at {:?}: {:?}", coords, play.kind());

        self.history.push(play.clone());
        Ok(play)
    }

    /// Takes back the losing play, covering the mine it revealed again.
    ///
    /// Does nothing unless the game is lost. Returns whether a play was undone.
    pub fn undo(&mut self) -> bool {
        if self.state() != GameState::Lost {
            return false;
        }
        let Some(play) = self.history.pop() else {
            return false;
        };

        for &coords in play.positions() {
            if self.board.contains_mine(coords) {
                self.field.unreveal(coords);
            }
        }
        log::debug!("Undid {:?} at {:?}", play.kind(), play.positions().first());
        true
    }

    /// Clears flags, reveals and history, keeping the same mines.
    pub fn restart(&mut self) {
        self.field = PlayField::new(self.board.size());
        self.history.clear();
        log::debug!("Game restarted");
    }

    /// Generates a new board with the same dimensions and mine count.
    ///
    /// When `safe_cell` is given the new board has no mine there and it is played right away.
    pub fn new_game(&mut self, safe_cell: Option<Coord2>) -> Result<Option<Play>> {
        let config = match safe_cell {
            Some(coords) => self.config.with_initial_play(coords)?,
            None => self.config,
        };

        self.board = generate_board(config, &mut self.rng)?;
        self.restart();

        safe_cell.map(|coords| self.play(coords)).transpose()
    }

    /// `(height, width)`
    pub fn size(&self) -> Coord2 {
        self.board.size()
    }

    pub fn mine_count(&self) -> CellCount {
        self.board.mine_count()
    }

    /// Mines not yet accounted for by a flag, negative when there are more flags than mines.
    pub fn remaining_mines(&self) -> isize {
        (self.board.mine_count() as isize) - (self.field.flag_count() as isize)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn mine_positions(&self) -> BTreeSet<Coord2> {
        self.board.mine_positions()
    }

    /// Plays from oldest to newest.
    pub fn history(&self) -> &[Play] {
        &self.history
    }

    pub fn revealed(&self) -> BTreeSet<Coord2> {
        self.field.revealed_positions()
    }

    pub fn flags(&self) -> BTreeSet<Coord2> {
        self.field.flag_positions()
    }

    pub fn revealed_count(&self) -> CellCount {
        self.field.revealed_count()
    }

    pub fn is_revealed(&self, coords: Coord2) -> bool {
        in_bounds(coords, self.size()) && self.field.is_revealed(coords)
    }

    pub fn is_flagged(&self, coords: Coord2) -> bool {
        in_bounds(coords, self.size()) && self.field.is_flagged(coords)
    }

    /// Board value at `coords`, only once it is revealed.
    pub fn visible_value(&self, coords: Coord2) -> Option<CellValue> {
        if self.is_revealed(coords) {
            self.board.get(coords)
        } else {
            None
        }
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.is_game_over() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
