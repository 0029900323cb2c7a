use std::time::Duration;

use clap::Parser;
use threshold_rs::identify::{Identifier, IdentifierConfig};
use threshold_rs::microlp_backend::MicroLpSolver;
use threshold_rs::truth_table::TruthTable;

/// Identify threshold functions given as hexadecimal truth tables.
#[derive(Debug, Parser)]
struct Cli {
    /// Number of variables.
    #[arg(short = 'n', long)]
    vars: usize,

    /// Truth tables in hexadecimal, most significant row first.
    #[arg(required = true)]
    tables: Vec<String>,

    /// Time limit per table, in seconds.
    #[arg(long)]
    time_limit: Option<u64>,

    /// Show debug logs.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    simplelog::TermLogger::init(
        if cli.verbose {
            simplelog::LevelFilter::Debug
        } else {
            simplelog::LevelFilter::Info
        },
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let mut config = IdentifierConfig::default();
    if let Some(secs) = cli.time_limit {
        config = config.with_time_limit(Duration::from_secs(secs));
    }
    let identifier = Identifier::with_config(MicroLpSolver, config);

    let time_total = std::time::Instant::now();
    for text in &cli.tables {
        let tt = TruthTable::from_hex(cli.vars, text)?;
        match identifier.classify(&tt) {
            Ok(form) => println!("{}: TF {}", tt, form),
            Err(rejection) => println!("{}: non-TF ({})", tt, rejection),
        }
    }
    log::info!("Identified {} tables in {:.3}s", cli.tables.len(), time_total.elapsed().as_secs_f64());

    Ok(())
}
