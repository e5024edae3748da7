use std::io::{self, BufRead, Write};

use minefield_core::{GameState, Minesweeper};

use crate::command::{Command, HELP};
use crate::display;

/// Drives a game from line-based commands until `q` or end of input.
///
/// With `safe_start`, the first reveal of the game goes through [`Minesweeper::new_game`] so it can never hit a
/// mine. Games started with `n` always get a safe first reveal.
pub fn run<R: BufRead, W: Write>(
    game: &mut Minesweeper,
    safe_start: bool,
    input: R,
    mut out: W,
) -> io::Result<()> {
    let mut awaiting_first_move = safe_start;
    let mut lines = input.lines();

    loop {
        write!(out, "\n{}", display::render(game))?;
        writeln!(out, "{}", display::status(game))?;
        match game.state() {
            GameState::InProgress if awaiting_first_move => {
                writeln!(out, "Where do you want to start? e.g. '0,0'")?
            }
            GameState::InProgress => {
                writeln!(out, "Where do you want to play? e.g. '0,0', or 'f 0,0' for a flag")?
            }
            GameState::Lost => writeln!(out, "What next? u for undo, r for restart, n for new")?,
            GameState::Won => writeln!(out, "What next? r for restart, n for new")?,
        }
        out.flush()?;

        let Some(line) = lines.next().transpose()? else {
            return Ok(());
        };

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                writeln!(out, "{err}")?;
                continue;
            }
        };
        log::debug!("Command: {command:?}");

        let outcome = match command {
            Command::Reveal(coords) if awaiting_first_move => game.new_game(Some(coords)).map(|_| ()),
            Command::Reveal(coords) => game.play(coords).map(|_| ()),
            Command::Flag(_) if awaiting_first_move => {
                writeln!(out, "Reveal a cell before placing flags")?;
                Ok(())
            }
            Command::Flag(_) if game.is_game_over() => {
                writeln!(out, "The game is over, no more flags")?;
                Ok(())
            }
            Command::Flag(coords) => game.toggle_flag(coords).map(|_| ()),
            Command::Undo => {
                if !game.undo() {
                    writeln!(out, "Nothing to undo")?;
                }
                Ok(())
            }
            Command::Restart => {
                game.restart();
                Ok(())
            }
            Command::NewGame => {
                awaiting_first_move = true;
                game.new_game(None).map(|_| ())
            }
            Command::Help => {
                writeln!(out, "{HELP}")?;
                Ok(())
            }
            Command::Quit => return Ok(()),
        };

        match outcome {
            Ok(()) => {
                if matches!(command, Command::Reveal(_)) {
                    awaiting_first_move = false;
                }
            }
            Err(err) => writeln!(out, "{err}")?,
        }
    }
}
