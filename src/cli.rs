// File: ./src/cli.rs
//! Command-line surface: arguments, the overwrite prompt and the verbose dump.
use crate::model::EventRecord;
use crate::reconcile::StageCounts;
use clap::Parser;
use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "calfuse",
    version,
    about = "Reformat a timetable .ics file so that it is easier to read in a calendar."
)]
pub struct Args {
    /// The input .ics file
    #[arg(value_name = "INPUT_FILE")]
    pub input_file: PathBuf,

    /// The output formatted .ics file
    #[arg(value_name = "OUTPUT_FILE")]
    pub output_file: PathBuf,

    /// Force overwrite output file if it already exists
    #[arg(short = 'o', long = "overwrite-if-exists")]
    pub overwrite_if_exists: bool,

    /// Enable verbose printing
    #[arg(short, long)]
    pub verbose: bool,

    /// Use this configuration file instead of the default location
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Asks whether `path` may be overwritten. Keeps asking until the answer is
/// recognised; end of input counts as "no".
pub fn confirm_overwrite<R: BufRead, W: Write>(
    path: &Path,
    input: &mut R,
    output: &mut W,
) -> io::Result<bool> {
    loop {
        write!(
            output,
            "Output file '{}' already exists.\n  Would you like to overwrite it? (y/n): ",
            path.display()
        )?;
        output.flush()?;

        let mut answer = String::new();
        if input.read_line(&mut answer)? == 0 {
            return Ok(false);
        }
        match answer.trim().to_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" | "maybe" => return Ok(false),
            _ => continue,
        }
    }
}

pub fn print_course_table<W: Write>(
    courses: &BTreeMap<String, String>,
    out: &mut W,
) -> io::Result<()> {
    writeln!(out, "Known course names:")?;
    for (code, name) in courses {
        writeln!(out, "  {}: {}", code, name)?;
    }
    Ok(())
}

pub fn print_counts<W: Write>(counts: &StageCounts, out: &mut W) -> io::Result<()> {
    writeln!(out, "Original no. of events: {}", counts.original)?;
    writeln!(
        out,
        "No. of events after merging similar classes next to each other: {}",
        counts.after_adjacency
    )?;
    writeln!(
        out,
        "No. of events after merging classes in the same slot: {}",
        counts.after_slots
    )
}

/// Per event: title, time range, then description and location lines.
pub fn print_events<W: Write>(events: &[EventRecord], out: &mut W) -> io::Result<()> {
    for event in events {
        writeln!(out, "{}: ", event.title)?;
        writeln!(
            out,
            "  {} - {}",
            event.begin.format_short(),
            event.end.format_short()
        )?;
        for line in event.description_lines() {
            writeln!(out, "  {}", line)?;
        }
        for line in event.location_lines() {
            writeln!(out, "  {}", line)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EventTime;
    use chrono::NaiveDate;
    use std::io::Cursor;

    fn prompt(answers: &str) -> (bool, String) {
        let mut input = Cursor::new(answers.as_bytes().to_vec());
        let mut output = Vec::new();
        let ok = confirm_overwrite(Path::new("out.ics"), &mut input, &mut output).unwrap();
        (ok, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_prompt_accepts_yes() {
        assert!(prompt("y\n").0);
        assert!(prompt("YES\n").0);
    }

    #[test]
    fn test_prompt_declines() {
        assert!(!prompt("n\n").0);
        assert!(!prompt("No\n").0);
        assert!(!prompt("maybe\n").0);
        assert!(!prompt("").0);
    }

    #[test]
    fn test_prompt_repeats_until_recognised() {
        let (ok, shown) = prompt("what\n\nyes\n");
        assert!(ok);
        assert_eq!(shown.matches("Would you like to overwrite it?").count(), 3);
    }

    #[test]
    fn test_args_parse_flags() {
        let args = Args::parse_from(["calfuse", "in.ics", "out.ics", "-o", "-v"]);
        assert_eq!(args.input_file, PathBuf::from("in.ics"));
        assert_eq!(args.output_file, PathBuf::from("out.ics"));
        assert!(args.overwrite_if_exists);
        assert!(args.verbose);
        assert!(args.config.is_none());

        let args = Args::parse_from([
            "calfuse",
            "in.ics",
            "out.ics",
            "--overwrite-if-exists",
            "--config",
            "my.toml",
        ]);
        assert!(args.overwrite_if_exists);
        assert!(!args.verbose);
        assert_eq!(args.config, Some(PathBuf::from("my.toml")));
    }

    #[test]
    fn test_args_require_both_files() {
        assert!(Args::try_parse_from(["calfuse", "in.ics"]).is_err());
    }

    #[test]
    fn test_event_dump_format() {
        let day = NaiveDate::from_ymd_opt(2024, 4, 22).unwrap();
        let event = EventRecord::new(
            "(LEC) PROGRAMMING [LT1/LT2]",
            EventTime::floating(day.and_hms_opt(9, 0, 0).unwrap()),
            EventTime::floating(day.and_hms_opt(11, 0, 0).unwrap()),
        )
        .unwrap()
        .with_description("Lecturer: A\nLecturer: B")
        .with_location("IT1114 LEC (LT1/LT2)");

        let mut out = Vec::new();
        print_events(&[event], &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "(LEC) PROGRAMMING [LT1/LT2]: \n  22/04/24 (09:00) - 22/04/24 (11:00)\n  Lecturer: A\n  Lecturer: B\n  IT1114 LEC (LT1/LT2)\n\n"
        );
    }

    #[test]
    fn test_course_table_dump() {
        let mut courses = BTreeMap::new();
        courses.insert("IT1114".to_string(), "PROGRAMMING".to_string());
        let mut out = Vec::new();
        print_course_table(&courses, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Known course names:\n  IT1114: PROGRAMMING\n"
        );
    }
}
