//! Wall clock used to stamp ledger entries and to check birth dates.

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};

/// Offset of America/Sao_Paulo standard time, in seconds west of UTC.
const DISPLAY_OFFSET_WEST: i32 = 3 * 3600;

pub fn display_offset() -> FixedOffset {
    FixedOffset::west_opt(DISPLAY_OFFSET_WEST).unwrap_or_else(|| Utc.fix())
}

pub fn now() -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&display_offset())
}

pub fn today() -> NaiveDate {
    now().date_naive()
}
