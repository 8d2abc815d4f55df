//! Reads a generated file back and prints its histogram, serially and on the rayon pool.
//! can be run with `cargo run --release --example histogram -- data100000000.txt`

use std::error::Error;
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use log::warn;

use float_gen::histogram::Histogram;
use float_gen::reader::ValueReader;
use float_gen::value::Value;
use float_gen::writer::DEFAULT_OUTPUT_FILE;

#[derive(Parser)]
struct Args {
    /// A file written by float-gen-cli
    #[clap(default_value = DEFAULT_OUTPUT_FILE)]
    input_file: PathBuf,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args = Args::parse();

    let total_start = Instant::now();
    let mut reader = ValueReader::from_path(&args.input_file)?;
    let values: Vec<Value> = reader
        .values()
        .flat_map(|res| res.map_err(|e| warn!("Malformed value: {:?}", e)))
        .collect();
    warn!("Reading {} values took: {:.2?}", values.len(), total_start.elapsed());

    let serial_start = Instant::now();
    let serial = Histogram::from_values(values.iter().copied())?;
    let serial_time = serial_start.elapsed();
    print!("{}", serial);
    println!("Execution Time: {:.6} seconds", serial_time.as_secs_f64());

    let parallel_start = Instant::now();
    let parallel = Histogram::from_slice_parallel(&values)?;
    let parallel_time = parallel_start.elapsed();
    println!("Histogram (Parallel):");
    for bin in parallel.bins() {
        println!("{} - {}: {}", bin.start, bin.end, bin.count);
    }

    let threads = rayon::current_num_threads();
    let speedup = serial_time.as_secs_f64() / parallel_time.as_secs_f64();
    println!("Parallel Execution Time: {:.6} seconds", parallel_time.as_secs_f64());
    println!("Speed-up: {:.6}", speedup);
    println!("Efficiency: {:.6}%", speedup / threads as f64 * 100.0);

    warn!("Total took: {:.2?}", total_start.elapsed());

    Ok(())
}
