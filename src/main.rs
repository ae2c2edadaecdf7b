//! Generates a year of CDR files and mirrors each into the CALLS table.
//!
//! For help:
//! ```bash
//! cargo run --bin cdr-generator -- -h
//! ```

use std::process;

use simple_logger::SimpleLogger;

use cdr_generator::config::{self, Config};
use cdr_generator::{pipeline, sampler, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let arg_matches = config::generate_app().get_matches();
    let config = Config::from_matches(&arg_matches)?;

    // bootstrap logger
    if let Err(e) = SimpleLogger::new().with_level(config.verbosity).init() {
        eprintln!("logger unavailable: {}", e);
    }

    let mut rng = config.rng();
    let mut conn = config.open_database()?;

    if config.seed_msisdns {
        sampler::provision(&conn, &mut rng)?;
    }

    let report = pipeline::run(&mut conn, &mut rng, &config.output_dir, config.periods)?;
    for period in &report.periods {
        println!("{}\t{}\t{:?}", period.path.display(), period.written, period.outcome);
    }

    Ok(())
}
