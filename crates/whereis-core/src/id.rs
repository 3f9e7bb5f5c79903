//! Record id generation
//!
//! Ids are UTC timestamps in RFC 3339 form with millisecond precision, e.g.
//! `2024-12-24T18:30:00.250Z`. Within one generator ids are strictly
//! increasing: when the clock has not moved past the last issued id, the
//! next id is pushed forward by one millisecond.

use std::sync::Mutex;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::models::RecordId;

type Clock = Box<dyn Fn() -> DateTime<Utc> + Send + Sync>;

pub struct IdGenerator {
    clock: Clock,
    last_millis: Mutex<Option<i64>>,
}

impl IdGenerator {
    /// Generator driven by the system clock
    pub fn new() -> Self {
        Self::with_clock(Utc::now)
    }

    /// Generator driven by a custom clock
    pub fn with_clock<F>(clock: F) -> Self
    where
        F: Fn() -> DateTime<Utc> + Send + Sync + 'static,
    {
        Self {
            clock: Box::new(clock),
            last_millis: Mutex::new(None),
        }
    }

    /// Issue the next id
    pub fn next_id(&self) -> RecordId {
        let now = (self.clock)().timestamp_millis();
        // Poisoning still leaves a valid millisecond count behind
        let mut last = self
            .last_millis
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let millis = match *last {
            Some(prev) if now <= prev => prev + 1,
            _ => now,
        };
        *last = Some(millis);

        RecordId::new(format_millis(millis))
    }

    /// Issue the next id that is not already in `taken`
    pub fn next_unique<'a, I>(&self, taken: I) -> RecordId
    where
        I: IntoIterator<Item = &'a RecordId>,
    {
        let taken: Vec<&RecordId> = taken.into_iter().collect();
        loop {
            let id = self.next_id();
            if !taken.contains(&&id) {
                return id;
            }
        }
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for IdGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdGenerator")
            .field("last_millis", &self.last_millis)
            .finish_non_exhaustive()
    }
}

fn format_millis(millis: i64) -> String {
    match DateTime::<Utc>::from_timestamp_millis(millis) {
        Some(dt) => dt.to_rfc3339_opts(SecondsFormat::Millis, true),
        None => millis.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn frozen() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 12, 24, 18, 30, 0).unwrap()
    }

    #[test]
    fn test_format() {
        let ids = IdGenerator::with_clock(frozen);
        assert_eq!(ids.next_id().as_str(), "2024-12-24T18:30:00.000Z");
    }

    #[test]
    fn test_frozen_clock_stays_unique() {
        let ids = IdGenerator::with_clock(frozen);
        let a = ids.next_id();
        let b = ids.next_id();
        let c = ids.next_id();

        assert_eq!(b.as_str(), "2024-12-24T18:30:00.001Z");
        assert_eq!(c.as_str(), "2024-12-24T18:30:00.002Z");
        assert!(a < b && b < c);
    }

    #[test]
    fn test_next_unique_skips_taken() {
        let ids = IdGenerator::with_clock(frozen);
        let taken = vec![
            RecordId::new("2024-12-24T18:30:00.000Z"),
            RecordId::new("2024-12-24T18:30:00.001Z"),
        ];

        let id = ids.next_unique(&taken);
        assert_eq!(id.as_str(), "2024-12-24T18:30:00.002Z");
    }

    #[test]
    fn test_ids_parse_back_to_time() {
        let ids = IdGenerator::new();
        let id = ids.next_id();
        assert!(id.created_at().is_some());
    }
}
