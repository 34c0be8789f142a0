// Exit codes and overwrite handling of the calfuse binary.
use calfuse::context::TestContext;
use std::fs;
use std::io::Write;
use std::process::{Command, Output, Stdio};

const EXPORT: &str = "BEGIN:VCALENDAR\r
VERSION:2.0\r
PRODID:-//Portal//Timetable//EN\r
BEGIN:VEVENT\r
UID:ev-1\r
SUMMARY:IT1114 LEC LT1\r
DTSTART:20240422T090000\r
DTEND:20240422T100000\r
DESCRIPTION:Lecturer: TAN\r
LOCATION:IT1114 LEC (LT1)\r
END:VEVENT\r
BEGIN:VEVENT\r
UID:ev-2\r
SUMMARY:IT1114 LEC LT1\r
DTSTART:20240422T101000\r
DTEND:20240422T110000\r
DESCRIPTION:Lecturer: TAN\r
LOCATION:IT1114 LEC (LT1)\r
END:VEVENT\r
END:VCALENDAR\r
";

struct Fixture {
    ctx: TestContext,
}

impl Fixture {
    fn new() -> Self {
        let ctx = TestContext::new();
        fs::write(ctx.file("in.ics"), EXPORT).unwrap();
        fs::write(ctx.file("calfuse.toml"), "adjacency_tolerance_mins = 10\n").unwrap();
        Self { ctx }
    }

    fn run(&self, extra: &[&str], stdin: &str) -> Output {
        let mut child = Command::new(env!("CARGO_BIN_EXE_calfuse"))
            .arg(self.ctx.file("in.ics"))
            .arg(self.ctx.file("out.ics"))
            .arg("--config")
            .arg(self.ctx.file("calfuse.toml"))
            .args(extra)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .unwrap();
        // The child may exit before reading; a broken pipe is fine here.
        let _ = child.stdin.take().unwrap().write_all(stdin.as_bytes());
        child.wait_with_output().unwrap()
    }

    fn output(&self) -> Option<String> {
        fs::read_to_string(self.ctx.file("out.ics")).ok()
    }
}

#[test]
fn test_writes_consolidated_calendar() {
    let fx = Fixture::new();
    let out = fx.run(&[], "");
    assert!(out.status.success());

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Original no. of events: 2"));
    assert!(stdout.contains("next to each other: 1"));

    let written = fx.output().unwrap();
    assert_eq!(written.matches("BEGIN:VEVENT").count(), 1);
    assert!(written.contains("SUMMARY:(LEC) PROGRAMMING [LT1]"));
    assert!(written.contains("DTSTART:20240422T090000"));
    assert!(written.contains("DTEND:20240422T110000"));
}

#[test]
fn test_missing_input_fails() {
    let fx = Fixture::new();
    fs::remove_file(fx.ctx.file("in.ics")).unwrap();
    let out = fx.run(&[], "");
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("not found"));
    assert!(fx.output().is_none());
}

#[test]
fn test_declined_overwrite_keeps_file() {
    let fx = Fixture::new();
    fs::write(fx.ctx.file("out.ics"), "keep me").unwrap();

    let out = fx.run(&[], "n\n");
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("User canceled operation"));
    assert_eq!(fx.output().unwrap(), "keep me");
}

#[test]
fn test_confirmed_overwrite_replaces_file() {
    let fx = Fixture::new();
    fs::write(fx.ctx.file("out.ics"), "old").unwrap();

    let out = fx.run(&[], "maybe?\ny\n");
    assert!(out.status.success());
    assert!(fx.output().unwrap().contains("BEGIN:VCALENDAR"));
}

#[test]
fn test_forced_overwrite_skips_prompt() {
    let fx = Fixture::new();
    fs::write(fx.ctx.file("out.ics"), "old").unwrap();

    let out = fx.run(&["-o"], "");
    assert!(out.status.success());
    assert!(!String::from_utf8_lossy(&out.stdout).contains("overwrite it?"));
    assert!(fx.output().unwrap().contains("BEGIN:VCALENDAR"));
}

#[test]
fn test_verbose_dump() {
    let fx = Fixture::new();
    let out = fx.run(&["-v"], "");
    assert!(out.status.success());

    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Known course names:"));
    assert!(stdout.contains("  IT1114: PROGRAMMING"));
    assert!(stdout.contains("(LEC) PROGRAMMING [LT1]: "));
    assert!(stdout.contains("  22/04/24 (09:00) - 22/04/24 (11:00)"));
    assert!(stdout.contains("  Lecturer: TAN"));
}

#[test]
fn test_malformed_title_fails_without_output() {
    let fx = Fixture::new();
    fs::write(
        fx.ctx.file("in.ics"),
        EXPORT.replace("SUMMARY:IT1114 LEC LT1", "SUMMARY:Orientation"),
    )
    .unwrap();

    let out = fx.run(&[], "");
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Invalid event title"));
    assert!(fx.output().is_none());
}
