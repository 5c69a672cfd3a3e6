use anyhow::Context;
use clap::Parser;
use rand::prelude::*;
use sapper_core::{Board, Difficulty, RevealOutcome, time_seed};
use tracing_subscriber::filter::LevelFilter;

/// Plays a game by revealing random cells until it ends, printing the board as it goes
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Board preset: easy, medium or hard
    #[arg(short, long, default_value_t = Difficulty::Easy)]
    difficulty: Difficulty,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Give up after this many clicks
    #[arg(short, long, default_value_t = 10_000)]
    max_moves: u32,

    /// Only print the board once the game stops
    #[arg(long)]
    final_only: bool,
}

fn init_logging(verbose: &clap_verbosity_flag::Verbosity) -> anyhow::Result<()> {
    let level = match verbose.log_level_filter() {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    };

    // also forwards records from the `log` facade used by sapper-core
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("{err}"))
        .context("Error initializing logger")
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(&args.verbose)?;

    let seed = args.seed.unwrap_or_else(time_seed);
    log::info!("Playing {} board with seed {}", args.difficulty, seed);

    let mut board = Board::initialize_with_seed(args.difficulty, seed);
    let mut rng = SmallRng::seed_from_u64(seed.rotate_left(32));
    let dimension = board.dimension();
    let mut moves = 0;

    while board.continue_playing() && moves < args.max_moves {
        let coords = (
            rng.random_range(0..dimension),
            rng.random_range(0..dimension),
        );
        let outcome = board
            .reveal(coords)
            .with_context(|| format!("Could not reveal {coords:?}"))?;
        moves += 1;

        if outcome.has_update() {
            log::debug!("Move {} at {:?}: {:?}", moves, coords, outcome);
            if !args.final_only {
                println!("{board}");
            }
        }
        if outcome == RevealOutcome::HitMine {
            log::info!("Hit a mine at {:?}", coords);
        }
    }

    if args.final_only {
        println!("{board}");
    }

    let verdict = if board.is_won() {
        "won"
    } else if board.is_over() {
        "lost"
    } else {
        "gave up"
    };
    println!(
        "{} after {} clicks, {} of {} safe cells revealed",
        verdict,
        moves,
        board.revealed_count(),
        board.config().safe_cells()
    );

    Ok(())
}
