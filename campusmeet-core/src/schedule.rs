use crate::types::CallRecord;
use chrono::{DateTime, Utc};

/// Picks the call that starts soonest after `now`, or `None` if nothing is
/// still ahead.
///
/// The evaluation instant is an explicit parameter: one `now` per invocation,
/// every record compared against the same reference point. Callers that poll
/// on a refresh interval re-invoke this with a fresh instant rather than
/// caching the result over time.
///
/// Records without a scheduled start are dropped before any comparison, and a
/// record starting exactly at `now` does not qualify. Ties on `starts_at`
/// resolve to the first record in input order.
pub fn nearest_upcoming_call(calls: &[CallRecord], now: DateTime<Utc>) -> Option<&CallRecord> {
    calls
        .iter()
        .filter_map(|call| call.starts_at.map(|starts_at| (starts_at, call)))
        .filter(|(starts_at, _)| *starts_at > now)
        .min_by_key(|(starts_at, _)| *starts_at)
        .map(|(_, call)| call)
}
