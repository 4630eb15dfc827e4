use std::io;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use sweeper_core::{
    CellCount, Coord, FirstMovePolicy, GameConfig, Minesweeper, RandomLayoutGenerator,
};
use tracing_subscriber::filter::LevelFilter;
use web_time::{SystemTime, UNIX_EPOCH};

mod command;
mod render;
mod session;
mod ticker;

use session::Session;

#[derive(Copy, Clone, Debug, Default, ValueEnum)]
enum Preset {
    Beginner,
    #[default]
    Intermediate,
    Expert,
}

impl From<Preset> for GameConfig {
    fn from(preset: Preset) -> Self {
        match preset {
            Preset::Beginner => GameConfig::beginner(),
            Preset::Intermediate => GameConfig::intermediate(),
            Preset::Expert => GameConfig::expert(),
        }
    }
}

/// Play minesweeper in the terminal.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Board preset, overridden by explicit dimensions
    #[arg(long, value_enum, default_value_t)]
    preset: Preset,

    #[arg(long)]
    width: Option<Coord>,

    #[arg(long)]
    height: Option<Coord>,

    #[arg(long)]
    mines: Option<CellCount>,

    /// Seed for the mine layout, derived from the clock when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Keep the neighbors of the first revealed cell free of mines too
    #[arg(long)]
    safe_neighborhood: bool,

    /// Print a JSON snapshot after every board
    #[arg(long)]
    json: bool,

    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

impl Args {
    fn game_config(&self) -> GameConfig {
        let base = GameConfig::from(self.preset);
        let size = (
            self.width.unwrap_or(base.size.0),
            self.height.unwrap_or(base.size.1),
        );
        let mines = self.mines.unwrap_or(base.mines);

        let config = GameConfig::new(size, mines);
        if config.size != size || config.mines != mines {
            log::warn!(
                "Adjusted {}x{} with {} mines to {}x{} with {} mines",
                size.0,
                size.1,
                mines,
                config.size.0,
                config.size.1,
                config.mines
            );
        }
        config
    }

    fn policy(&self) -> FirstMovePolicy {
        if self.safe_neighborhood {
            FirstMovePolicy::SafeNeighborhood
        } else {
            FirstMovePolicy::SafeCell
        }
    }
}

fn init_logging(verbose: &Verbosity<WarnLevel>) {
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

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default()
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.verbose);

    let config = args.game_config();
    let seed = args.seed.unwrap_or_else(clock_seed);
    log::info!(
        "Starting {}x{} game with {} mines, seed {}",
        config.size.0,
        config.size.1,
        config.mines,
        seed
    );

    let generator = RandomLayoutGenerator::new(seed, args.policy());
    let mut session = Session::new(Minesweeper::new(config, generator), args.json);
    session.run(io::stdin().lock(), io::stdout().lock())?;
    log::info!(
        "Finished after {}s with {} of {} cells revealed",
        session.game().elapsed_secs(),
        session.game().revealed_count(),
        session.game().safe_cell_count()
    );
    Ok(())
}
