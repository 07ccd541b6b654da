use std::process;

use anyhow::Context;
use clap::Parser;

use fmsort::common::reset_sigpipe;
use fmsort::dataset::{Dataset, write_results, write_timing};
use fmsort::msort::SortRun;

#[derive(Parser)]
#[command(
    name = "fmsort",
    about = "Multi-threaded merge sort for unsigned integer datasets",
    version
)]
struct Cli {
    /// Input file: worker count, element count, then the values
    #[arg(default_value = "input.txt")]
    input: String,

    /// Write the sorted dataset to FILE
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        default_value = "output.txt"
    )]
    output: String,

    /// Write the elapsed sort time in milliseconds to FILE
    #[arg(long = "time-file", value_name = "FILE", default_value = "time.txt")]
    time_file: String,
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let mut dataset = Dataset::load(&cli.input)?;

    println!("Threads number = {}", dataset.workers);
    println!("Numbers = {}", dataset.values.len());

    let sort = SortRun::new(dataset.workers)?;
    let elapsed = sort.execute(&mut dataset.values)?;

    println!("Time spent: {}", elapsed.as_secs_f64() * 1_000.0);

    write_results(&cli.output, dataset.workers, &dataset.values)
        .with_context(|| format!("writing {}", cli.output))?;
    write_timing(&cli.time_file, elapsed).with_context(|| format!("writing {}", cli.time_file))?;

    Ok(())
}

fn main() {
    reset_sigpipe();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("fmsort: {e:#}");
        process::exit(1);
    }
}
