//! Flappy Pipes entry point
//!
//! Parses settings, loads sprites and runs the game in the terminal.

use anyhow::{Context, Result};

use flappy_pipes::platform::{BitmapFont, SleepPacer, TerminalDisplay, TerminalInput};
use flappy_pipes::settings::USAGE;
use flappy_pipes::sim::GameState;
use flappy_pipes::{Assets, Game, Settings};

fn main() -> Result<()> {
    env_logger::init();
    log::info!("Flappy Pipes starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        println!("{}", USAGE);
        return Ok(());
    }
    let settings = Settings::from_args(args).context(USAGE)?;

    let assets = match &settings.assets_dir {
        Some(dir) => Assets::load_dir(dir)?,
        None => {
            log::info!("Using built-in sprites");
            Assets::builtin()
        }
    };

    let seed = settings.seed.unwrap_or_else(rand::random);
    log::info!("Seed: {}", seed);
    let mut game = Game::new(GameState::new(seed, &assets), &assets);

    let mut display = TerminalDisplay::new();
    display.enter()?;
    let result = game.run(
        &mut display,
        &mut TerminalInput::new(),
        &mut BitmapFont::default(),
        &mut SleepPacer::new(),
    );
    // Restore the terminal before anything is reported
    let restored = display.exit();
    let summary = result?;
    restored?;

    log::info!(
        "Run finished: score {} after {} frames ({:?})",
        summary.score,
        summary.frames,
        summary.cause
    );
    println!("Game over! Score: {}", summary.score);
    if settings.print_summary_json {
        println!("{}", serde_json::to_string(&summary)?);
    }
    Ok(())
}
