use std::error::Error;
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use log::info;

use float_gen::generator::{ValueGenerator, DEFAULT_COUNT};
use float_gen::writer::{write_values_to_path, DEFAULT_OUTPUT_FILE};

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// How many values to generate
    #[clap(short = 'n', long, default_value_t = DEFAULT_COUNT)]
    pub(crate) count: u64,
    /// The file the values are written to, truncated if it exists
    #[clap(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    pub(crate) output: PathBuf,
    /// Seed for a reproducible sequence. Unseeded runs differ every time
    #[clap(short, long)]
    pub(crate) seed: Option<u64>,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let cli = Cli::parse();

    let start = Instant::now();
    let written = match cli.seed {
        Some(seed) => write_values_to_path(&cli.output, ValueGenerator::seeded(cli.count, seed))?,
        None => write_values_to_path(&cli.output, ValueGenerator::new(cli.count))?,
    };
    info!("Wrote {} values in {:.2?}", written, start.elapsed());

    println!("Random floats written to {}", cli.output.display());

    Ok(())
}
