use std::str::FromStr;

use minefield_core::{Coord, Coord2};
use thiserror::Error;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Reveal(Coord2),
    Flag(Coord2),
    Undo,
    Restart,
    NewGame,
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseCommandError {
    #[error("Empty command")]
    Empty,
    #[error("Expected `row,col`, got `{0}`")]
    InvalidCoords(String),
    #[error("Unknown command `{0}`, type `h` for help")]
    Unknown(String),
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "" => Err(ParseCommandError::Empty),
            "u" | "undo" => Ok(Self::Undo),
            "r" | "restart" => Ok(Self::Restart),
            "n" | "new" => Ok(Self::NewGame),
            "h" | "help" | "?" => Ok(Self::Help),
            "q" | "quit" | "exit" => Ok(Self::Quit),
            _ => {
                if let Some(rest) = s.strip_prefix(['f', 'F']) {
                    parse_coords(rest).map(Self::Flag)
                } else if s.starts_with(|c: char| c.is_ascii_digit()) {
                    parse_coords(s).map(Self::Reveal)
                } else {
                    Err(ParseCommandError::Unknown(s.to_owned()))
                }
            }
        }
    }
}

/// Parses `row,col`, tolerating spaces around both numbers.
pub fn parse_coords(s: &str) -> Result<Coord2, ParseCommandError> {
    let invalid = || ParseCommandError::InvalidCoords(s.trim().to_owned());
    let (row, col) = s.split_once(',').ok_or_else(invalid)?;
    let row: Coord = row.trim().parse().map_err(|_| invalid())?;
    let col: Coord = col.trim().parse().map_err(|_| invalid())?;
    Ok((row, col))
}

pub const HELP: &str = "\
Commands:
  row,col     reveal a cell, or chord a revealed number
  f row,col   toggle a flag
  u           undo the move that lost the game
  r           restart with the same mines
  n           new game
  q           quit
  h           show this help";
