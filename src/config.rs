use std::path::PathBuf;

use clap::{App, Arg, ArgMatches};
use log::LevelFilter;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rusqlite::Connection;

use crate::error::{CdrError, Result};

pub const DEFAULT_DATABASE: &str = "cdr.db";
pub const DEFAULT_OUTPUT_DIR: &str = "resources";
pub const DEFAULT_PERIODS: &str = "12";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database: PathBuf,
    pub output_dir: PathBuf,
    pub periods: u32,
    pub seed: Option<u64>,
    pub seed_msisdns: bool,
    pub verbosity: LevelFilter,
}

/// Arguments shared by both binaries.
pub fn app<'a, 'b>(name: &str) -> App<'a, 'b> {
    App::new(name)
        .version("0.1.0")
        .arg(Arg::with_name("database")
            .short("d")
            .long("database")
            .value_name("path")
            .env("CDR_DATABASE")
            .default_value(DEFAULT_DATABASE)
            .help("SQLite database holding MSISDNS and CALLS")
            .takes_value(true))
        .arg(Arg::with_name("seed")
            .short("s")
            .long("seed")
            .value_name("seed")
            .env("CDR_SEED")
            .help("Seed for the random source, entropy when absent")
            .takes_value(true))
        .arg(Arg::with_name("v")
            .short("v")
            .multiple(true)
            .help("Sets the level of verbosity"))
}

/// `app` plus the generation options.
pub fn generate_app<'a, 'b>() -> App<'a, 'b> {
    app("cdr-generator")
        .arg(Arg::with_name("output-dir")
            .short("o")
            .long("output-dir")
            .value_name("dir")
            .env("CDR_OUTPUT_DIR")
            .default_value(DEFAULT_OUTPUT_DIR)
            .help("Directory receiving CDRs/<NN>_CDR.txt")
            .takes_value(true))
        .arg(Arg::with_name("periods")
            .short("p")
            .long("periods")
            .value_name("periods")
            .env("CDR_PERIODS")
            .default_value(DEFAULT_PERIODS)
            .help("Number of monthly files to generate")
            .takes_value(true))
        .arg(Arg::with_name("seed-msisdns")
            .long("seed-msisdns")
            .help("Provision the MSISDNS reference table before generating"))
}

impl Config {
    pub fn from_matches(matches: &ArgMatches) -> Result<Config> {
        let database = PathBuf::from(matches.value_of("database").unwrap_or(DEFAULT_DATABASE));
        let output_dir =
            PathBuf::from(matches.value_of("output-dir").unwrap_or(DEFAULT_OUTPUT_DIR));

        let periods: u32 = matches
            .value_of("periods")
            .unwrap_or(DEFAULT_PERIODS)
            .parse()
            .map_err(|_| CdrError::Config("periods must be a positive integer".to_string()))?;
        if periods == 0 {
            return Err(CdrError::Config("periods must be at least 1".to_string()));
        }

        let seed = match matches.value_of("seed") {
            Some(seed) => Some(seed.parse().map_err(|_| {
                CdrError::Config(format!("seed \"{}\" is not an unsigned integer", seed))
            })?),
            None => None,
        };

        let verbosity = match matches.occurrences_of("v") {
            0 => LevelFilter::Off,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };

        Ok(Config {
            database,
            output_dir,
            periods,
            seed,
            seed_msisdns: matches.is_present("seed-msisdns"),
            verbosity,
        })
    }

    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    pub fn open_database(&self) -> Result<Connection> {
        log::debug!("opening {}", self.database.display());
        Ok(Connection::open(&self.database)?)
    }
}
