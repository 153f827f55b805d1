//! Epoch-millisecond timestamps.
//!
//! Signed envelopes carry their signing time as a signed 64-bit count of
//! milliseconds since the Unix epoch, so that is the one unit this module
//! deals in.

use chrono::Utc;

/// Current wall-clock time as milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
