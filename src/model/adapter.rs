// File: src/model/adapter.rs
use crate::error::{FuseError, Result};
use crate::model::event::{EventRecord, EventTime, Zone};
use chrono::{Duration, NaiveDateTime, Utc};
use icalendar::{Calendar, CalendarComponent, Component, Event, EventLike, Property};
use uuid::Uuid;

const STAMP_FORMAT: &str = "%Y%m%dT%H%M%S";

/// Events of a calendar file plus the raw VTIMEZONE blocks they may refer to.
#[derive(Debug, Clone, Default)]
pub struct ParsedCalendar {
    pub events: Vec<EventRecord>,
    pub timezones: Vec<String>,
}

fn parse_stamp(property: &'static str, prop: &Property) -> Result<EventTime> {
    let invalid = || FuseError::InvalidTimestamp {
        property,
        value: prop.value().to_string(),
    };
    let val = prop.value().trim();

    // Sessions are always timed; a bare DATE has no slot to merge on.
    if val.len() == 8 {
        return Err(invalid());
    }

    if let Some(utc) = val.strip_suffix('Z') {
        let local = NaiveDateTime::parse_from_str(utc, STAMP_FORMAT).map_err(|_| invalid())?;
        return Ok(EventTime::new(local, Zone::Utc));
    }

    let local = NaiveDateTime::parse_from_str(val, STAMP_FORMAT).map_err(|_| invalid())?;
    let zone = match prop.params().get("TZID") {
        Some(tz) => Zone::Named(tz.value().to_string()),
        None => Zone::Floating,
    };
    Ok(EventTime::new(local, zone))
}

/// Parses an ISO 8601 duration (`PT1H30M`, `P1D`, `P1W`) into minutes.
/// Negative, empty and overflowing durations yield `None`.
fn parse_duration_mins(val: &str) -> Option<i64> {
    let val = val.trim();
    if val.starts_with('-') {
        return None;
    }
    let mut minutes: i64 = 0;
    let mut num_buf = String::new();
    let mut in_time = false;
    for c in val.chars() {
        if c == 'T' {
            in_time = true;
        } else if c.is_ascii_digit() {
            num_buf.push(c);
        } else if !num_buf.is_empty() {
            let n = num_buf.parse::<i64>().ok()?;
            let unit = match c {
                'W' => 7 * 24 * 60,
                'D' => 24 * 60,
                'H' if in_time => 60,
                'M' if in_time => 1,
                _ => 0,
            };
            minutes = minutes.checked_add(n.checked_mul(unit)?)?;
            num_buf.clear();
        }
    }
    if minutes > 0 { Some(minutes) } else { None }
}

fn format_stamp(key: &str, time: &EventTime) -> Property {
    let mut value = time.local.format(STAMP_FORMAT).to_string();
    match &time.zone {
        Zone::Utc => {
            value.push('Z');
            Property::new(key, &value)
        }
        Zone::Floating => Property::new(key, &value),
        Zone::Named(tz) => {
            let mut prop = Property::new(key, &value);
            prop.add_parameter("TZID", tz);
            prop
        }
    }
}

impl EventRecord {
    pub fn from_vevent(event: &Event) -> Result<Self> {
        let props = event.properties();

        let title = event
            .get_summary()
            .ok_or_else(|| FuseError::MissingProperty {
                property: "SUMMARY",
                summary: event.get_uid().unwrap_or("<no uid>").to_string(),
            })?
            .to_string();
        let missing = |property: &'static str| FuseError::MissingProperty {
            property,
            summary: title.clone(),
        };

        let begin = parse_stamp(
            "DTSTART",
            props.get("DTSTART").ok_or_else(|| missing("DTSTART"))?,
        )?;
        let end = match props.get("DTEND") {
            Some(prop) => parse_stamp("DTEND", prop)?,
            None => {
                let prop = props.get("DURATION").ok_or_else(|| missing("DTEND"))?;
                parse_duration_mins(prop.value())
                    .and_then(Duration::try_minutes)
                    .and_then(|by| begin.checked_shift(by))
                    .ok_or_else(|| FuseError::InvalidTimestamp {
                        property: "DURATION",
                        value: prop.value().to_string(),
                    })?
            }
        };

        Ok(EventRecord::new(title.clone(), begin, end)?
            .with_description(event.get_description().unwrap_or_default())
            .with_location(event.get_location().unwrap_or_default()))
    }

    pub fn to_vevent(&self) -> Event {
        let mut event = Event::new();
        event.uid(&Uuid::new_v4().to_string());
        event.timestamp(Utc::now());
        event.summary(&self.title);
        event.append_property(format_stamp("DTSTART", &self.begin));
        event.append_property(format_stamp("DTEND", &self.end));
        if !self.description.is_empty() {
            event.description(&self.description);
        }
        if !self.location.is_empty() {
            event.location(&self.location);
        }
        event
    }
}

/// Collects raw VTIMEZONE blocks so TZID references stay resolvable.
fn extract_timezones(raw_ics: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current = String::new();
    let mut in_tz = false;

    for line in raw_ics.lines() {
        let trim = line.trim();
        if trim == "BEGIN:VTIMEZONE" {
            in_tz = true;
            current.clear();
        }
        if in_tz {
            current.push_str(line.trim_end_matches('\r'));
            current.push_str("\r\n");
        }
        if trim == "END:VTIMEZONE" && in_tz {
            blocks.push(current.clone());
            in_tz = false;
        }
    }
    blocks
}

/// Parses every VEVENT of a VCALENDAR document, in file order.
pub fn parse_calendar(raw_ics: &str) -> Result<ParsedCalendar> {
    let calendar: Calendar = raw_ics
        .parse()
        .map_err(|e| FuseError::Parse(format!("{}", e)))?;

    let mut events = Vec::with_capacity(calendar.components.len());
    for component in &calendar.components {
        if let CalendarComponent::Event(e) = component {
            events.push(EventRecord::from_vevent(e)?);
        }
    }

    Ok(ParsedCalendar {
        events,
        timezones: extract_timezones(raw_ics),
    })
}
