//! Mirrors period files into the `CALLS` table.
//!
//! The table is dropped and recreated before every load so row ids, which are
//! the 1-based record numbers of the loaded file, never collide. Timestamps are
//! kept as text columns.

use std::fs::File;
use std::path::Path;

use csv::{ErrorKind, ReaderBuilder};
use rusqlite::{params, Connection};
use simple_error::SimpleError;

use crate::error::{CdrError, Result};
use crate::models::CallRecord;

const RESET_CALLS: &str = "DROP TABLE IF EXISTS CALLS;
CREATE TABLE CALLS(ID INTEGER PRIMARY KEY, TYPE VARCHAR(2), MSISDN VARCHAR(11),
    STARTCALLIN VARCHAR(255), ENDCALLIN VARCHAR(255));";

const INSERT_CALL: &str =
    "INSERT INTO CALLS(ID, TYPE, MSISDN, STARTCALLIN, ENDCALLIN) VALUES (?1, ?2, ?3, ?4, ?5)";

/// Drops `CALLS` if present and recreates it empty.
pub fn reset(conn: &Connection) -> Result<()> {
    conn.execute_batch(RESET_CALLS)?;
    log::trace!("CALLS reset");
    Ok(())
}

/// Inserts every record of the file at `path` in a single transaction.
///
/// Each physical line is split on commas only, quotes carry no meaning.
/// Blank lines are skipped. Any malformed line or failed insert rolls the
/// whole file back; nothing from it is committed. Returns the committed row count.
pub fn load(conn: &mut Connection, path: &Path) -> Result<usize> {
    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(file);

    let tx = conn.transaction()?;
    let mut staged: i64 = 0;
    {
        let mut insert = tx.prepare_cached(INSERT_CALL)?;
        for row in reader.records() {
            let row = row.map_err(unreadable_row)?;
            let line = row.position().map(|p| p.line()).unwrap_or(0);
            let record = CallRecord::parse(&row)
                .map_err(|source| CdrError::Malformed { line, source })?;

            staged += 1;
            insert.execute(params![
                staged,
                record.call_type.code(),
                record.msisdn,
                record.start.to_string(),
                record.end.to_string(),
            ])?;
        }
    }
    tx.commit()?;

    log::debug!("committed {} rows from {}", staged, path.display());
    Ok(staged as usize)
}

/// Rows that cannot be decoded are malformed; anything else stays a csv error.
fn unreadable_row(err: csv::Error) -> CdrError {
    let malformed = match err.kind() {
        ErrorKind::Utf8 { pos, err } => {
            Some((pos.as_ref().map(|p| p.line()), format!("invalid UTF-8: {}", err)))
        }
        ErrorKind::UnequalLengths { pos, expected_len, len } => Some((
            pos.as_ref().map(|p| p.line()),
            format!("expected {} fields, found {}", expected_len, len),
        )),
        _ => None,
    };

    match malformed {
        Some((line, message)) => CdrError::Malformed {
            line: line.unwrap_or(0),
            source: SimpleError::new(message),
        },
        None => CdrError::from(err),
    }
}

pub fn count_rows(conn: &Connection) -> Result<usize> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM CALLS", [], |row| row.get(0))?;
    Ok(count as usize)
}

pub fn row_ids(conn: &Connection) -> Result<Vec<i64>> {
    let mut statement = conn.prepare("SELECT ID FROM CALLS ORDER BY ID")?;
    let ids = statement
        .query_map([], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<i64>>>()?;
    Ok(ids)
}
