use anyhow::{Context, Result};
use clap::Parser;
use cli::{config::DEFAULT_DATA_FILE, logging, DbConfig, Engine, Menu};
use index::KeyMode;
use std::io;
use std::path::PathBuf;

/// Interactive employee database.
#[derive(Debug, Parser)]
#[command(name = "empdb", version, about)]
struct Args {
    /// Data file holding the employee slots
    #[arg(long, env = "EMPDB_DATA", default_value = DEFAULT_DATA_FILE)]
    data: PathBuf,

    /// fsync after every write
    #[arg(long)]
    sync: bool,

    /// Compare salary and age by value when indexing instead of as text
    #[arg(long)]
    numeric_keys: bool,

    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let key_mode = if args.numeric_keys {
        KeyMode::Numeric
    } else {
        KeyMode::Text
    };
    let config = DbConfig::new(&args.data)
        .with_sync(args.sync)
        .with_key_mode(key_mode);

    let mut engine = Engine::open(&config)
        .with_context(|| format!("opening {}", config.path.display()))?;

    let stdin = io::stdin();
    Menu::new(&mut engine, stdin.lock(), io::stdout()).run()
}
