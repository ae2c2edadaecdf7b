use std::ops::Range;
use std::path::{Path, PathBuf};

use csv::{Terminator, WriterBuilder};
use rand::Rng;

use crate::error::{CdrError, Result};
use crate::models::Timestamp;
use crate::paths;
use crate::sampler::{self, SubscriberSource};
use crate::synth;

/// Length of one synthetic month in seconds.
pub const MONTH_SECONDS: i64 = 30 * 24 * 60 * 60;

/// Records per period file, end exclusive.
pub const RECORDS_PER_FILE: Range<usize> = 50..100;

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub written: usize,
}

/// Writes a fresh period file of random call records starting within
/// `[window_start, window_start + MONTH_SECONDS)`.
///
/// The file is truncated first. A failed write leaves whatever was written so far.
/// Fails with `InvalidWindow` when calls in the window could end past `i64::MAX`.
pub fn generate_file<S, R>(
    source: &S,
    rng: &mut R,
    root: &Path,
    window_start: Timestamp,
    period: u32,
) -> Result<GeneratedFile>
where
    S: SubscriberSource + ?Sized,
    R: Rng + ?Sized,
{
    window_start
        .checked_add(MONTH_SECONDS + synth::CALL_DURATION.end)
        .ok_or(CdrError::InvalidWindow(window_start))?;
    let window_end = window_start + MONTH_SECONDS;

    let amount = rng.gen_range(RECORDS_PER_FILE);
    let numbers = sampler::sample(source, rng, amount)?;
    let path = paths::provision(root, period)?;

    log::debug!("writing {} records to {}", amount, path.display());

    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::Any(b'\n'))
        .from_path(&path)?;
    for msisdn in &numbers {
        writer.serialize(synth::synthesize(rng, window_start, window_end, msisdn))?;
    }
    writer.flush()?;

    Ok(GeneratedFile {
        path,
        written: numbers.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use csv::ReaderBuilder;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::models::{CallRecord, Msisdn};
    use crate::synth::CALL_DURATION;

    fn reference() -> Vec<Msisdn> {
        (1..=20).map(|i| format!("7916123{:04}", i)).collect()
    }

    #[test]
    fn period_file_holds_valid_records() {
        let dir = tempfile::tempdir().unwrap();
        let numbers = reference();
        let mut rng = StdRng::seed_from_u64(11);
        let window_start = 1_700_000_000;

        let generated =
            generate_file(numbers.as_slice(), &mut rng, dir.path(), window_start, 1).unwrap();
        assert_eq!(generated.path, dir.path().join("CDRs").join("01_CDR.txt"));
        assert!(RECORDS_PER_FILE.contains(&generated.written));

        let contents = fs::read_to_string(&generated.path).unwrap();
        assert_eq!(contents.lines().count(), generated.written);
        assert!(contents.ends_with('\n'));

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .from_reader(contents.as_bytes());
        for (line, row) in contents.lines().zip(reader.records()) {
            let record = CallRecord::parse(&row.unwrap()).unwrap();
            assert_eq!(record.to_line().trim_end(), line);
            assert!(record.start >= window_start && record.start < window_start + MONTH_SECONDS);
            assert!(CALL_DURATION.contains(&record.duration()));
            assert!(numbers.contains(&record.msisdn));
        }
    }

    #[test]
    fn regenerating_overwrites_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let numbers = reference();
        let mut rng = StdRng::seed_from_u64(2);

        let path = paths::provision(dir.path(), 4).unwrap();
        fs::write(&path, "x\n".repeat(500)).unwrap();

        let generated = generate_file(numbers.as_slice(), &mut rng, dir.path(), 0, 4).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), generated.written);
        assert!(!contents.contains('x'));
    }

    #[test]
    fn same_seed_same_file() {
        let numbers = reference();
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();

        let generate = |root: &Path| {
            let mut rng = StdRng::seed_from_u64(8);
            generate_file(numbers.as_slice(), &mut rng, root, 1_400_000_000, 2).unwrap()
        };
        let a = generate(first.path());
        let b = generate(second.path());
        assert_eq!(fs::read(a.path).unwrap(), fs::read(b.path).unwrap());
    }

    #[test]
    fn window_near_timestamp_limit_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let numbers = reference();
        let mut rng = StdRng::seed_from_u64(2);

        let start = i64::MAX - MONTH_SECONDS;
        match generate_file(numbers.as_slice(), &mut rng, dir.path(), start, 1) {
            Err(CdrError::InvalidWindow(rejected)) => assert_eq!(rejected, start),
            other => panic!("unexpected {:?}", other),
        }
        assert!(!paths::period_path(dir.path(), 1).exists());
    }

    #[test]
    fn sampling_failure_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let empty: Vec<Msisdn> = Vec::new();
        let mut rng = StdRng::seed_from_u64(2);

        let result = generate_file(empty.as_slice(), &mut rng, dir.path(), 0, 1);
        assert!(matches!(result, Err(CdrError::MissingSubscriber(_))));
        assert!(!paths::period_path(dir.path(), 1).exists());
    }
}
