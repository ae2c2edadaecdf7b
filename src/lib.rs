//! Synthetic Call Data Record generator.
//!
//! Each period gets a text file of random call records under
//! `<output>/CDRs/<NN>_CDR.txt`, and the file is then mirrored into the
//! `CALLS` table of a SQLite database. Subscriber numbers come from the
//! `MSISDNS` reference table in the same database.

pub mod config;
pub mod error;
pub mod generator;
pub mod loader;
pub mod models;
pub mod paths;
pub mod pipeline;
pub mod sampler;
pub mod synth;

pub use error::{CdrError, Result};
