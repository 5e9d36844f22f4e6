use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::Parser;
use env_logger::Env;
use log::info;
use terminal_game::app::{self, Ending};
use terminal_game::config::Config;
use terminal_game::input::prompt_dimension;
use terminal_game::session::{Session, SessionOptions};
use terminal_game::terminal::{RawModeGuard, TerminalKeys};

#[derive(Parser, Debug)]
#[command(author, version, about = "Slide and merge numbered tiles in the terminal")]
struct Args {
    /// Path to a TOML configuration file
    #[arg(long, value_name = "FILE", value_parser = clap::value_parser!(PathBuf))]
    config: Option<PathBuf>,

    /// Grid width (asked on stdin when not set here or in the config)
    #[arg(long, value_name = "N")]
    width: Option<usize>,

    /// Grid height (asked on stdin when not set here or in the config)
    #[arg(long, value_name = "N")]
    height: Option<usize>,

    /// Seed for tile spawning, for reproducible games
    #[arg(long, value_name = "N")]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let cfg = match &args.config {
        Some(path) => Config::from_toml(path)
            .map_err(|e| anyhow!("failed to load config {}: {e}", path.display()))?,
        None => Config::default(),
    }
    .with_overrides(args.width, args.height, args.seed);
    cfg.validate()?;

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut stdout = io::stdout();
    writeln!(stdout, "Welcome to 2048 :P")?;
    let width = match cfg.width {
        Some(w) => w,
        None => prompt_dimension(
            &mut input,
            &mut stdout,
            "What X dimension do you want your map to be: ",
        )?,
    };
    let height = match cfg.height {
        Some(h) => h,
        None => prompt_dimension(&mut input, &mut stdout, "Y Dimension: ")?,
    };
    drop(input);

    let seed = cfg.seed.unwrap_or_else(rand::random);
    info!("starting {width}x{height} session with seed {seed}");
    let mut session = Session::new(SessionOptions {
        width,
        height,
        seed,
        pool: cfg.spawn.spawn_pool()?,
        spawn_on_noop: cfg.spawn.on_noop,
    });

    let ending = {
        let _raw = RawModeGuard::enable()?;
        let mut out = stdout.lock();
        app::run(&mut session, &cfg.keys, &mut TerminalKeys, &mut out)?
    };
    if ending == Ending::InputClosed {
        println!();
    }
    Ok(())
}
