// Reads the input calendar and writes the consolidated one.
use crate::model::EventRecord;
use crate::model::ParsedCalendar;
use crate::model::adapter::parse_calendar;
use anyhow::{Context, Result};
use fs2::FileExt;
use icalendar::Component;
use std::fs;
use std::path::{Path, PathBuf};

pub const PRODID: &str = "-//calfuse//calfuse//EN";

pub struct CalendarStorage;

impl CalendarStorage {
    /// Reads and parses a calendar file. Errors name the offending path.
    pub fn read(path: &Path) -> Result<ParsedCalendar> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read calendar '{}'", path.display()))?;
        let parsed = parse_calendar(&raw)
            .with_context(|| format!("Invalid calendar '{}'", path.display()))?;
        log::debug!(
            "Read {} events from '{}'",
            parsed.events.len(),
            path.display()
        );
        Ok(parsed)
    }

    /// Generates a single VCALENDAR string containing all events as VEVENT
    /// components, preceded by any VTIMEZONE blocks carried over from input.
    pub fn to_ics_string(events: &[EventRecord], timezones: &[String]) -> String {
        let mut output = format!(
            "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:{}\r\nCALSCALE:GREGORIAN\r\n",
            PRODID
        );

        for tz in timezones {
            output.push_str(tz);
            if !tz.ends_with("\r\n") {
                output.push_str("\r\n");
            }
        }

        for event in events {
            let vevent = event.to_vevent().to_string();
            output.push_str(&vevent);
            if !vevent.ends_with("\r\n") {
                output.push_str("\r\n");
            }
        }

        output.push_str("END:VCALENDAR\r\n");
        output
    }

    /// Serializes and writes `events` to `path`, replacing any existing file.
    pub fn write(path: &Path, events: &[EventRecord], timezones: &[String]) -> Result<()> {
        let ics = Self::to_ics_string(events, timezones);
        Self::with_lock(path, || Self::atomic_write(path, &ics))
            .with_context(|| format!("Failed to write calendar '{}'", path.display()))?;
        log::debug!("Wrote {} events to '{}'", events.len(), path.display());
        Ok(())
    }

    /// Helper to get a sidecar lock file path
    fn get_lock_path(file_path: &Path) -> PathBuf {
        let mut lock_path = file_path.to_path_buf();
        if let Some(ext) = lock_path.extension() {
            let mut new_ext = ext.to_os_string();
            new_ext.push(".lock");
            lock_path.set_extension(new_ext);
        } else {
            lock_path.set_extension("lock");
        }
        lock_path
    }

    pub fn with_lock<F, T>(file_path: &Path, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        let lock_path = Self::get_lock_path(file_path);
        let file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        file.lock_exclusive()?;
        let result = f();
        file.unlock()?;
        drop(file);
        let _ = fs::remove_file(&lock_path);
        result
    }

    /// Atomic write: Write to .tmp file then rename
    pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> Result<()> {
        let path = path.as_ref();
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(tmp_path, path)?;
        Ok(())
    }
}
