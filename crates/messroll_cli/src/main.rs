//! Interactive dining-hall attendance CLI.
//!
//! # Responsibility
//! - Wire operator input to the core attendance session.
//! - Render outcome and summary lines; the core never touches the terminal.

use clap::Parser;
use log::error;
use messroll_core::{
    AttendanceService, CsvSnapshotRepository, DayKey, MarkOutcome, ServiceError, Summary,
};
use std::error::Error;
use std::fs::File;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// Single-session dining-hall attendance tracker.
#[derive(Debug, Parser)]
#[command(name = "messroll", version)]
struct Args {
    /// Directory holding per-day snapshot files
    #[arg(long, default_value = "messroll-data")]
    data_dir: PathBuf,

    /// Day to open, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    day: Option<String>,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long)]
    log_level: Option<String>,

    /// Directory for rolling log files; stderr when omitted
    #[arg(long)]
    log_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=session module=cli status=error error={err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let level = args
        .log_level
        .unwrap_or_else(|| messroll_core::default_log_level().to_string());
    match &args.log_dir {
        Some(dir) => messroll_core::init_logging(&level, dir)?,
        None => messroll_core::init_stderr_logging(&level)?,
    }

    let day = match &args.day {
        Some(raw) => DayKey::parse(raw)?,
        None => DayKey::today(),
    };

    let repo = CsvSnapshotRepository::new(&args.data_dir);
    let mut session = AttendanceService::open(repo, day)?;

    println!(
        "messroll {} — day {} ({} records loaded)",
        messroll_core::core_version(),
        session.day(),
        session.roster().len()
    );
    println!("enter a boarder number to mark, or: summary | reset | days | load <csv> | show <day> | quit");

    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let (command, rest) = match input.split_once(' ') {
            Some((command, rest)) => (command, rest.trim()),
            None => (input, ""),
        };

        match command {
            "quit" | "exit" => break,
            "summary" if rest.is_empty() => print_summary(&session.summary()),
            "reset" if rest.is_empty() => match session.reset() {
                Ok(()) => println!("all entries cleared"),
                Err(err) => print_persistence_warning(&err),
            },
            "days" if rest.is_empty() => match session.list_days() {
                Ok(days) if days.is_empty() => println!("no saved reports"),
                Ok(days) => {
                    for day in days {
                        println!("{day}");
                    }
                }
                Err(err) => eprintln!("error: {err}"),
            },
            "load" if !rest.is_empty() => load_upload(&mut session, rest),
            "show" if !rest.is_empty() => show_day(&session, rest),
            _ => mark(&mut session, input),
        }
    }

    Ok(())
}

fn mark(session: &mut AttendanceService<CsvSnapshotRepository>, token: &str) {
    match session.mark(token) {
        Ok(MarkOutcome::Marked { id, .. }) => println!("boarder {id} marked as eaten"),
        Ok(MarkOutcome::AlreadyMarked) => {
            println!("all entries for boarder {token} are already marked as eaten")
        }
        Ok(MarkOutcome::NotFound) => println!("no boarder {token} on this day's roster"),
        Ok(MarkOutcome::InvalidInput) => println!("please enter a valid boarder number"),
        Err(err) => print_persistence_warning(&err),
    }
}

fn load_upload(session: &mut AttendanceService<CsvSnapshotRepository>, path: &str) {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("error: cannot open {path}: {err}");
            return;
        }
    };
    match session.replace_from_upload(file) {
        Ok(roster) => println!("roster replaced: {} records", roster.len()),
        Err(ServiceError::Repo(err)) => eprintln!("upload rejected, roster unchanged: {err}"),
        Err(err) => print_persistence_warning(&err),
    }
}

fn show_day(session: &AttendanceService<CsvSnapshotRepository>, raw_day: &str) {
    let day = match DayKey::parse(raw_day) {
        Ok(day) => day,
        Err(err) => {
            eprintln!("error: {err}");
            return;
        }
    };
    match session.load_day(&day) {
        Ok(Some(roster)) => {
            for record in roster.records() {
                println!(
                    "{}  {}",
                    record.id,
                    if record.eaten { "eaten" } else { "-" }
                );
            }
            print_summary(&roster.summary());
        }
        Ok(None) => println!("no report saved for {day}"),
        Err(err) => eprintln!("error: {err}"),
    }
}

fn print_summary(summary: &Summary) {
    println!(
        "total {}  eaten {}  remaining {}",
        summary.total, summary.eaten, summary.not_eaten
    );
}

fn print_persistence_warning(err: &ServiceError) {
    // The in-memory roster already moved; make the divergence visible.
    eprintln!("warning: {err}");
    eprintln!("the change is active in this session but is not saved to disk");
}
