use serde::{Deserialize, Serialize};

use crate::*;

/// Content of a board cell, fixed once the board is generated.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum CellValue {
    Mine,
    /// Number of mines among the neighbors, `0..=8`.
    Clear(u8),
}

impl CellValue {
    pub const MINE_VALUE: i8 = -1;

    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }

    pub const fn is_zero(self) -> bool {
        matches!(self, Self::Clear(0))
    }

    /// Adjacent mine count, `None` for a mine.
    pub const fn count(self) -> Option<u8> {
        match self {
            Self::Mine => None,
            Self::Clear(count) => Some(count),
        }
    }

    pub const fn as_i8(self) -> i8 {
        match self {
            Self::Mine => Self::MINE_VALUE,
            Self::Clear(count) => count as i8,
        }
    }
}

impl Default for CellValue {
    fn default() -> Self {
        Self::Clear(0)
    }
}

impl From<CellValue> for i8 {
    fn from(value: CellValue) -> Self {
        value.as_i8()
    }
}

impl TryFrom<i8> for CellValue {
    type Error = GameError;

    fn try_from(value: i8) -> Result<Self> {
        match value {
            CellValue::MINE_VALUE => Ok(Self::Mine),
            0..=8 => Ok(Self::Clear(value as u8)),
            _ => Err(GameError::InvalidCellValue(value)),
        }
    }
}
