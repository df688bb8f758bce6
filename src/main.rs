mod ui;

use anyhow::Context;
use clap::Parser;
use std::io;
use std::path::PathBuf;
use textcraft::build_info;
use textcraft::core::{GameConfig, Session, SessionEnd};
use ui::TerminalFrontend;

/// A turn-based text survival adventure
#[derive(Parser, Debug)]
#[command(name = "textcraft")]
#[command(author, version, long_version = build_info::LONG_VERSION, about, long_about = None)]
struct Cli {
    /// Seed for a reproducible session
    #[arg(long)]
    seed: Option<u64>,

    /// Directory with mobs.json, recipes.json and foods.json overrides
    #[arg(long = "data-dir")]
    data_dir: Option<PathBuf>,

    /// Disable colored output
    #[arg(long = "no-color")]
    no_color: bool,

    /// Log filter (overrides RUST_LOG), e.g. "debug" or "textcraft=trace"
    #[arg(long = "log-level")]
    log_level: Option<String>,
}

fn init_logging(level: Option<&str>) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Some(filter) = level {
        builder.parse_filters(filter);
    }
    builder.init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    let config = GameConfig {
        seed: cli.seed,
        data_dir: cli.data_dir,
        color: !cli.no_color,
    };
    log::debug!("config: {:?}", config);

    let data = config.load_data().context("failed to load game data")?;
    let mut session = Session::new(&data, config.rng());

    let stdin = io::stdin();
    let mut frontend = TerminalFrontend::new(stdin.lock(), io::stdout(), config.color);
    let end = session.run(&mut frontend).context("session aborted")?;

    if let SessionEnd::Quit { score } = end {
        println!("Thanks for playing! Score: {}", score);
    }
    Ok(())
}
