use std::ops::Range;
use std::path::{Path, PathBuf};

use rand::Rng;
use rusqlite::Connection;

use crate::error::Result;
use crate::generator;
use crate::loader;
use crate::models::Timestamp;

/// Window starts are drawn from this range (2014-01-01 up to 2024-03-17).
pub const TARIFFICATION: Range<Timestamp> = 1_388_520_000..1_710_622_800;

#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Committed(usize),
    /// Nothing from the period file was committed.
    RolledBack(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PeriodReport {
    pub period: u32,
    pub path: PathBuf,
    pub window_start: Timestamp,
    pub written: usize,
    pub outcome: LoadOutcome,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    pub periods: Vec<PeriodReport>,
}

impl RunReport {
    pub fn rolled_back(&self) -> usize {
        self.periods
            .iter()
            .filter(|p| matches!(p.outcome, LoadOutcome::RolledBack(_)))
            .count()
    }
}

/// Reset, generate and load one period.
pub fn run_period<R: Rng + ?Sized>(
    conn: &mut Connection,
    rng: &mut R,
    root: &Path,
    period: u32,
) -> Result<PeriodReport> {
    let window_start = rng.gen_range(TARIFFICATION);
    log::info!("generating period {} from {}", period, window_start);

    loader::reset(conn)?;
    let generated = generator::generate_file(&*conn, rng, root, window_start, period)?;

    let outcome = match loader::load(conn, &generated.path) {
        Ok(rows) => LoadOutcome::Committed(rows),
        Err(err) if err.is_load_failure() => {
            log::error!("period {} rolled back: {}", period, err);
            LoadOutcome::RolledBack(err.to_string())
        }
        Err(err) => return Err(err),
    };

    Ok(PeriodReport {
        period,
        path: generated.path,
        window_start,
        written: generated.written,
        outcome,
    })
}

/// Runs periods `1..=periods` in order, stopping at the first fatal error.
pub fn run<R: Rng + ?Sized>(
    conn: &mut Connection,
    rng: &mut R,
    root: &Path,
    periods: u32,
) -> Result<RunReport> {
    let mut report = RunReport::default();
    for period in 1..=periods {
        report.periods.push(run_period(conn, rng, root, period)?);
    }
    log::info!(
        "generated {} period files under {}, {} rolled back",
        report.periods.len(),
        root.display(),
        report.rolled_back()
    );
    Ok(report)
}
