use alloc::vec;
use alloc::vec::Vec;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PlayKind {
    /// A mine was revealed.
    MineExploded,
    /// A zero cell was revealed along with its connected region.
    Spreading,
    SingleNumberRevealed,
    /// The play changed nothing, e.g. a flagged cell or a chord whose flag count did not match.
    Nothing,
    Chord,
    FlagAdded,
    FlagRemoved,
}

impl PlayKind {
    pub const fn is_flag_change(self) -> bool {
        matches!(self, Self::FlagAdded | Self::FlagRemoved)
    }
}

/// One entry of the game history.
///
/// `positions` lists the coordinates the play touched, in the order they were revealed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Play {
    kind: PlayKind,
    positions: Vec<Coord2>,
    caused_loss: bool,
}

impl Play {
    pub(crate) fn new(kind: PlayKind, positions: Vec<Coord2>, caused_loss: bool) -> Self {
        Self {
            kind,
            positions,
            caused_loss,
        }
    }

    pub(crate) fn nothing(coords: Coord2) -> Self {
        Self::new(PlayKind::Nothing, vec![coords], false)
    }

    pub fn kind(&self) -> PlayKind {
        self.kind
    }

    pub fn positions(&self) -> &[Coord2] {
        &self.positions
    }

    pub fn caused_loss(&self) -> bool {
        self.caused_loss
    }

    /// Whether this play uncovered at least one cell.
    pub fn has_update(&self) -> bool {
        match self.kind {
            PlayKind::MineExploded | PlayKind::Spreading | PlayKind::SingleNumberRevealed => true,
            PlayKind::Chord => !self.positions.is_empty(),
            PlayKind::Nothing | PlayKind::FlagAdded | PlayKind::FlagRemoved => false,
        }
    }
}
