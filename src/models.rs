use std::fmt;
use std::str::FromStr;

use simple_error::*;
use serde::Serialize;
use csv::StringRecord;

pub type Msisdn = String;
pub type Timestamp = i64;

/// Number of comma separated fields in a CDR line.
pub const FIELDS: usize = 4;

/// Width of the `MSISDN` column.
pub const MSISDN_MAX_LEN: usize = 11;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum CallType {
    #[serde(rename = "01")]
    Outgoing,
    #[serde(rename = "02")]
    Incoming,
}

impl CallType {
    pub const ALL: [CallType; 2] = [CallType::Outgoing, CallType::Incoming];

    pub fn code(&self) -> &'static str {
        match self {
            CallType::Outgoing => "01",
            CallType::Incoming => "02",
        }
    }
}

impl fmt::Display for CallType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for CallType {
    type Err = SimpleError;

    fn from_str(code: &str) -> Result<Self, Self::Err> {
        match code {
            "01" => Ok(CallType::Outgoing),
            "02" => Ok(CallType::Incoming),
            _ => Err(SimpleError::new(format!("unknown call type \"{}\"", code))),
        }
    }
}

/// One call data record as written to a period file.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CallRecord {
    #[serde(rename = "type")]
    pub call_type: CallType,
    pub msisdn: Msisdn,
    pub start: Timestamp,
    pub end: Timestamp,
}

impl CallRecord {
    pub fn duration(&self) -> i64 {
        self.end - self.start
    }

    /// Line form including the terminator, e.g. `01,79161234567,1400000000,1400000900\n`.
    pub fn to_line(&self) -> String {
        format!("{}\n", self)
    }

    pub fn parse(record: &StringRecord) -> Result<CallRecord, SimpleError> {
        if record.len() != FIELDS {
            bail!("expected {} fields, found {}", FIELDS, record.len());
        }

        let call_type: CallType = record[0].parse()?;
        let msisdn = record[1].trim();
        if msisdn.is_empty() {
            bail!("empty msisdn");
        }
        if msisdn.len() > MSISDN_MAX_LEN || !msisdn.bytes().all(|b| b.is_ascii_digit()) {
            bail!("msisdn \"{}\" is not a number of up to {} digits", msisdn, MSISDN_MAX_LEN);
        }
        let start: Timestamp = record[2]
            .parse()
            .map_err(|_| SimpleError::new(format!("start \"{}\" is not a timestamp", &record[2])))?;
        let end: Timestamp = record[3]
            .parse()
            .map_err(|_| SimpleError::new(format!("end \"{}\" is not a timestamp", &record[3])))?;
        if end <= start {
            bail!("call ends ({}) before it starts ({})", end, start);
        }

        Ok(CallRecord {
            call_type,
            msisdn: msisdn.to_string(),
            start,
            end,
        })
    }
}

impl fmt::Display for CallRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{},{},{},{}", self.call_type, self.msisdn, self.start, self.end)
    }
}
