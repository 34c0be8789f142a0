use anyhow::Result;
use calfuse::cli::{self, Args};
use calfuse::config::Config;
use calfuse::context::StandardContext;
use calfuse::reconcile::Pipeline;
use calfuse::storage::CalendarStorage;
use clap::Parser;
use simplelog::{ColorChoice, ConfigBuilder, LevelFilter, TermLogger, TerminalMode};
use std::io;
use std::process::ExitCode;

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let config = ConfigBuilder::new()
        .set_time_level(LevelFilter::Off)
        .set_target_level(LevelFilter::Off)
        .build();
    // A second logger (e.g. in tests) is not an error worth aborting for.
    let _ = TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto);
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_logging(args.verbose);

    if !args.input_file.is_file() {
        println!(
            "Input file '{}' not found! Exiting...",
            args.input_file.display()
        );
        return Ok(ExitCode::FAILURE);
    }

    if args.output_file.is_file() && !args.overwrite_if_exists {
        let stdin = io::stdin();
        let confirmed =
            cli::confirm_overwrite(&args.output_file, &mut stdin.lock(), &mut io::stdout())?;
        if !confirmed {
            println!("User canceled operation. Exiting...");
            return Ok(ExitCode::SUCCESS);
        }
    }

    let config = match &args.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load_or_default(&StandardContext::new(None))?,
    };
    let pipeline = Pipeline::new(&config);

    let mut stdout = io::stdout().lock();
    if args.verbose {
        cli::print_course_table(pipeline.codec().courses(), &mut stdout)?;
    }

    let calendar = CalendarStorage::read(&args.input_file)?;
    let reconciled = pipeline.run(calendar.events)?;
    cli::print_counts(&reconciled.counts, &mut stdout)?;

    if args.verbose {
        cli::print_events(&reconciled.events, &mut stdout)?;
    }

    CalendarStorage::write(&args.output_file, &reconciled.events, &calendar.timezones)?;
    log::info!(
        "Wrote {} events to '{}'",
        reconciled.events.len(),
        args.output_file.display()
    );
    Ok(ExitCode::SUCCESS)
}
