use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use minefield_core::{CellCount, Coord, GameConfig, Minesweeper};
use tracing_subscriber::filter::LevelFilter;

mod command;
mod display;
mod session;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Preset {
    Beginner,
    Intermediate,
    Expert,
}

impl From<Preset> for GameConfig {
    fn from(preset: Preset) -> Self {
        match preset {
            Preset::Beginner => GameConfig::BEGINNER,
            Preset::Intermediate => GameConfig::INTERMEDIATE,
            Preset::Expert => GameConfig::EXPERT,
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about = "Minesweeper in the terminal", long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Start from a standard board
    #[arg(short, long, value_enum, conflicts_with = "config")]
    preset: Option<Preset>,

    /// Read the board settings from a JSON file, e.g. {"size":[9,9],"mines":10}
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of rows, overrides the preset or config file
    #[arg(long)]
    height: Option<Coord>,

    /// Number of columns, overrides the preset or config file
    #[arg(long)]
    width: Option<Coord>,

    /// Number of mines, overrides the preset or config file
    #[arg(short, long)]
    mines: Option<CellCount>,
}

impl Args {
    fn game_config(&self) -> anyhow::Result<GameConfig> {
        let base = match (&self.config, self.preset) {
            (Some(path), _) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("Could not read config file {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("Invalid config file {}", path.display()))?
            }
            (None, Some(preset)) => preset.into(),
            (None, None) => GameConfig::default(),
        };

        let config = GameConfig {
            size: (
                self.height.unwrap_or(base.size.0),
                self.width.unwrap_or(base.size.1),
            ),
            mines: self.mines.unwrap_or(base.mines),
            ..base
        };
        config.validated().context("Invalid board settings")
    }
}

fn init_logging(verbose: &clap_verbosity_flag::Verbosity) {
    let level = match verbose.log_level_filter() {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.verbose);

    let config = args.game_config()?;
    let seed = args.seed.unwrap_or_else(rand::random);
    log::info!("seed: {seed}, config: {config:?}");

    let mut game = Minesweeper::from_config(config, seed).context("Could not create the game")?;
    let safe_start = config.initial_play.is_none();

    println!("{}", command::HELP);
    session::run(&mut game, safe_start, io::stdin().lock(), io::stdout().lock())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_with_overrides() {
        let args = Args::parse_from(["minefield", "--preset", "expert", "--mines", "50"]);

        let config = args.game_config().unwrap();

        assert_eq!(config.size, (16, 30));
        assert_eq!(config.mines, 50);
    }

    #[test]
    fn defaults_to_beginner() {
        let args = Args::parse_from(["minefield"]);

        assert_eq!(args.game_config().unwrap(), GameConfig::BEGINNER);
    }

    #[test]
    fn rejects_impossible_boards() {
        let args = Args::parse_from(["minefield", "--height", "2", "--width", "2", "--mines", "5"]);

        assert!(args.game_config().is_err());
    }

    #[test]
    fn reads_config_file() {
        let path = std::env::temp_dir().join("minefield-cli-config-test.json");
        fs::write(&path, r#"{"size":[5,6],"mines":7,"initial_play":[2,2]}"#).unwrap();
        let args = Args::parse_from(["minefield", "--config", path.to_str().unwrap()]);

        let config = args.game_config().unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(config.size, (5, 6));
        assert_eq!(config.mines, 7);
        assert_eq!(config.initial_play, Some((2, 2)));
    }

    #[test]
    fn args_are_well_formed() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
