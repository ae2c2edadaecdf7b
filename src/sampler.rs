//! Random subscriber numbers drawn from the `MSISDNS` reference table.

use rand::Rng;
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{CdrError, Result};
use crate::models::Msisdn;

/// Keys of the reference table are `1..=SUBSCRIBERS`.
pub const SUBSCRIBERS: u32 = 20;

/// Lookup of a subscriber number by reference key.
pub trait SubscriberSource {
    fn lookup(&self, key: u32) -> Result<Option<Msisdn>>;
}

impl SubscriberSource for Connection {
    fn lookup(&self, key: u32) -> Result<Option<Msisdn>> {
        let mut statement = self.prepare_cached("SELECT MSISDN FROM MSISDNS WHERE ID = ?1")?;
        let msisdn = statement
            .query_row(params![key], |row| row.get(0))
            .optional()?;
        Ok(msisdn)
    }
}

/// In-memory reference table, key `n` maps to element `n - 1`.
#[cfg(test)]
impl SubscriberSource for [Msisdn] {
    fn lookup(&self, key: u32) -> Result<Option<Msisdn>> {
        Ok(key
            .checked_sub(1)
            .and_then(|index| self.get(index as usize))
            .cloned())
    }
}

/// Draws `count` subscriber numbers, duplicates allowed.
///
/// Either every draw succeeds or the whole call fails; the result always
/// holds exactly `count` numbers.
pub fn sample<S, R>(source: &S, rng: &mut R, count: usize) -> Result<Vec<Msisdn>>
where
    S: SubscriberSource + ?Sized,
    R: Rng + ?Sized,
{
    let mut numbers = Vec::with_capacity(count);
    for _ in 0..count {
        let key = rng.gen_range(1..=SUBSCRIBERS);
        match source.lookup(key)? {
            Some(msisdn) => numbers.push(msisdn),
            None => return Err(CdrError::MissingSubscriber(key)),
        }
    }
    log::trace!("sampled {} subscribers", numbers.len());
    Ok(numbers)
}

/// Creates `MSISDNS` if needed and fills in any missing keys with random numbers.
///
/// Returns how many rows were added; rows already present are kept.
pub fn provision<R: Rng + ?Sized>(conn: &Connection, rng: &mut R) -> Result<usize> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS MSISDNS(ID INTEGER PRIMARY KEY, MSISDN VARCHAR(11));",
    )?;

    let mut statement = conn.prepare("INSERT OR IGNORE INTO MSISDNS(ID, MSISDN) VALUES (?1, ?2)")?;
    let mut added = 0;
    for key in 1..=SUBSCRIBERS {
        let msisdn = format!("79{:09}", rng.gen_range(0..1_000_000_000u32));
        added += statement.execute(params![key, msisdn])?;
    }
    log::info!("MSISDNS provisioned, {} new subscribers", added);
    Ok(added)
}
