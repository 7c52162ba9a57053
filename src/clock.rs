//! Wall-clock access for the business-hours check.
//!
//! Location queries take a `Clock` instead of reading the system time
//! directly so callers can pin "now" in tests and from the CLI.

use anyhow::{Context, Result};
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime, UtcOffset};

/// Source of the current local date and time.
pub trait Clock: Send + Sync {
    fn now(&self) -> PrimitiveDateTime;
}

/// Clock reading the system time in the process's local offset.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    offset: UtcOffset,
}

impl SystemClock {
    /// Capture the local UTC offset.
    ///
    /// The offset can only be read soundly while the process is
    /// single-threaded, so this must run before the async runtime
    /// starts. Falls back to UTC when the offset cannot be determined.
    pub fn new() -> Self {
        let offset = match UtcOffset::current_local_offset() {
            Ok(offset) => offset,
            Err(err) => {
                tracing::warn!("could not determine local UTC offset, using UTC: {err}");
                UtcOffset::UTC
            }
        };
        Self { offset }
    }

    pub fn with_offset(offset: UtcOffset) -> Self {
        Self { offset }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> PrimitiveDateTime {
        let now = OffsetDateTime::now_utc().to_offset(self.offset);
        PrimitiveDateTime::new(now.date(), now.time())
    }
}

/// Clock that always reports the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub PrimitiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> PrimitiveDateTime {
        self.0
    }
}

/// Parse a local timestamp of the form `YYYY-MM-DDTHH:MM`.
pub fn parse_local_datetime(input: &str) -> Result<PrimitiveDateTime> {
    let format = format_description!("[year]-[month]-[day]T[hour]:[minute]");
    PrimitiveDateTime::parse(input.trim(), &format)
        .with_context(|| format!("invalid timestamp {input:?}; expected YYYY-MM-DDTHH:MM"))
}
