use std::fmt;
use std::io;

use simple_error::SimpleError;

pub type Result<T> = std::result::Result<T, CdrError>;

#[derive(Debug)]
pub enum CdrError {
    Config(String),
    Io(io::Error),
    Csv(csv::Error),
    Database(rusqlite::Error),
    /// Line in a period file that does not hold a valid call record.
    Malformed { line: u64, source: SimpleError },
    /// Reference table has no subscriber under the drawn key.
    MissingSubscriber(u32),
    /// Generation window whose calls would not fit in a timestamp.
    InvalidWindow(i64),
}

impl CdrError {
    /// Failures that discard one period's load but leave the run intact.
    pub fn is_load_failure(&self) -> bool {
        matches!(self, CdrError::Malformed { .. } | CdrError::Database(_))
    }
}

impl fmt::Display for CdrError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CdrError::Config(msg) => write!(f, "invalid configuration: {}", msg),
            CdrError::Io(err) => write!(f, "I/O error: {}", err),
            CdrError::Csv(err) => write!(f, "CSV error: {}", err),
            CdrError::Database(err) => write!(f, "database error: {}", err),
            CdrError::Malformed { line, source } => {
                write!(f, "malformed record on line {}: {}", line, source)
            }
            CdrError::MissingSubscriber(key) => {
                write!(f, "no subscriber with id {} in MSISDNS", key)
            }
            CdrError::InvalidWindow(start) => {
                write!(f, "window starting at {} overflows the timestamp range", start)
            }
        }
    }
}

impl std::error::Error for CdrError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CdrError::Io(err) => Some(err),
            CdrError::Csv(err) => Some(err),
            CdrError::Database(err) => Some(err),
            CdrError::Malformed { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<io::Error> for CdrError {
    fn from(err: io::Error) -> Self {
        CdrError::Io(err)
    }
}

impl From<csv::Error> for CdrError {
    fn from(err: csv::Error) -> Self {
        CdrError::Csv(err)
    }
}

impl From<rusqlite::Error> for CdrError {
    fn from(err: rusqlite::Error) -> Self {
        CdrError::Database(err)
    }
}
