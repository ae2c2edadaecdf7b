//! Provisions the MSISDNS reference table the generator samples from.

use std::process;

use simple_logger::SimpleLogger;

use cdr_generator::config::{self, Config};
use cdr_generator::{sampler, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let arg_matches = config::app("seed-msisdns").get_matches();
    let config = Config::from_matches(&arg_matches)?;

    if let Err(e) = SimpleLogger::new().with_level(config.verbosity).init() {
        eprintln!("logger unavailable: {}", e);
    }

    let mut rng = config.rng();
    let conn = config.open_database()?;
    let added = sampler::provision(&conn, &mut rng)?;
    println!("{} subscribers added to {}", added, config.database.display());

    Ok(())
}
