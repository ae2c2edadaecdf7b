use std::ops::Range;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{CallRecord, CallType, Timestamp};

/// Call durations in seconds, end exclusive.
pub const CALL_DURATION: Range<i64> = 60..1800;

/// Builds one call record starting somewhere in `[window_start, window_end)`.
///
/// Panics if the window is empty. `window_end + CALL_DURATION.end` must fit in
/// a timestamp.
pub fn synthesize<R: Rng + ?Sized>(
    rng: &mut R,
    window_start: Timestamp,
    window_end: Timestamp,
    msisdn: &str,
) -> CallRecord {
    let call_type = *CallType::ALL.choose(rng).unwrap_or(&CallType::Outgoing);
    let start = rng.gen_range(window_start..window_end);
    let end = start + rng.gen_range(CALL_DURATION);

    CallRecord {
        call_type,
        msisdn: msisdn.to_string(),
        start,
        end,
    }
}
