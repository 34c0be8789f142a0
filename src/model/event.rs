// File: ./src/model/event.rs
use crate::error::{FuseError, Result};
use chrono::{Duration, NaiveDateTime};
use std::cmp::Ordering;
use std::fmt;

// --- TIME TYPES ---

/// Zone marker carried by a timestamp. Never used for conversion, only
/// preserved so the output reads the same way the input did.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Zone {
    Floating,
    Utc,
    Named(String),
}

/// A wall-clock timestamp as written in the calendar file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EventTime {
    pub local: NaiveDateTime,
    pub zone: Zone,
}

impl EventTime {
    pub fn new(local: NaiveDateTime, zone: Zone) -> Self {
        Self { local, zone }
    }

    pub fn floating(local: NaiveDateTime) -> Self {
        Self::new(local, Zone::Floating)
    }

    /// Moves the wall-clock time, keeping the zone marker. `None` when the
    /// result falls outside the representable range.
    pub fn checked_shift(&self, by: Duration) -> Option<Self> {
        Some(Self {
            local: self.local.checked_add_signed(by)?,
            zone: self.zone.clone(),
        })
    }

    /// `DD/MM/YY (HH:MM)`, used by the verbose dump.
    pub fn format_short(&self) -> String {
        self.local.format("%d/%m/%y (%H:%M)").to_string()
    }
}

impl Ord for EventTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.local
            .cmp(&other.local)
            .then_with(|| self.zone.cmp(&other.zone))
    }
}

impl PartialOrd for EventTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for EventTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.zone {
            Zone::Floating => write!(f, "{}", self.local.format("%Y-%m-%d %H:%M")),
            Zone::Utc => write!(f, "{}Z", self.local.format("%Y-%m-%d %H:%M")),
            Zone::Named(tz) => write!(f, "{} ({})", self.local.format("%Y-%m-%d %H:%M"), tz),
        }
    }
}

/// An exact `[begin, end)` interval.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slot {
    pub begin: EventTime,
    pub end: EventTime,
}

// --- EVENT ---

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EventRecord {
    pub title: String,
    pub begin: EventTime,
    pub end: EventTime,
    pub description: String,
    pub location: String,
}

impl EventRecord {
    /// Builds a record, rejecting intervals where `begin >= end`.
    pub fn new(title: impl Into<String>, begin: EventTime, end: EventTime) -> Result<Self> {
        let title = title.into();
        if begin >= end {
            return Err(FuseError::InvalidInterval {
                title,
                begin: begin.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self {
            title,
            begin,
            end,
            description: String::new(),
            location: String::new(),
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn slot(&self) -> Slot {
        Slot {
            begin: self.begin.clone(),
            end: self.end.clone(),
        }
    }

    pub fn description_lines(&self) -> impl Iterator<Item = &str> {
        self.description.split('\n')
    }

    pub fn location_lines(&self) -> impl Iterator<Item = &str> {
        self.location.split('\n')
    }
}

// --- SORTING ---
// Canonical order: time first, then the text fields so ties are stable.
impl Ord for EventRecord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.begin
            .cmp(&other.begin)
            .then_with(|| self.end.cmp(&other.end))
            .then_with(|| self.title.cmp(&other.title))
            .then_with(|| self.location.cmp(&other.location))
            .then_with(|| self.description.cmp(&other.description))
    }
}

impl PartialOrd for EventRecord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> EventTime {
        EventTime::floating(
            NaiveDate::from_ymd_opt(2024, 4, 22)
                .unwrap()
                .and_hms_opt(h, m, 0)
                .unwrap(),
        )
    }

    #[test]
    fn test_rejects_empty_and_inverted_intervals() {
        assert!(matches!(
            EventRecord::new("IT1114 LEC LT1", at(9, 0), at(9, 0)),
            Err(FuseError::InvalidInterval { .. })
        ));
        assert!(EventRecord::new("IT1114 LEC LT1", at(10, 0), at(9, 0)).is_err());
        assert!(EventRecord::new("IT1114 LEC LT1", at(9, 0), at(9, 1)).is_ok());
    }

    #[test]
    fn test_shift_keeps_zone() {
        let t = EventTime::new(at(9, 0).local, Zone::Named("Asia/Singapore".into()));
        let shifted = t.checked_shift(Duration::minutes(10)).unwrap();
        assert_eq!(shifted.local, at(9, 10).local);
        assert_eq!(shifted.zone, Zone::Named("Asia/Singapore".into()));
        assert!(t.checked_shift(Duration::MAX).is_none());
    }

    #[test]
    fn test_short_format() {
        assert_eq!(at(14, 5).format_short(), "22/04/24 (14:05)");
    }

    #[test]
    fn test_canonical_order_uses_time_before_title() {
        let a = EventRecord::new("Z", at(8, 0), at(9, 0)).unwrap();
        let b = EventRecord::new("A", at(9, 0), at(10, 0)).unwrap();
        let c = EventRecord::new("B", at(9, 0), at(10, 0)).unwrap();
        let mut events = vec![c.clone(), b.clone(), a.clone()];
        events.sort();
        assert_eq!(events, vec![a, b, c]);
    }
}
