use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use clap::{Parser, Subcommand};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::{Path, PathBuf};

use shusseki::{open_sheet, safe_print};

mod init;
mod model;

use model::AttendanceRecord;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Attendance sheet CSV path
    #[arg(short, long, default_value = "attendance.csv")]
    file: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a new sheet with the attendance header row
    Init,
    /// Append an attendance row for a student
    Record {
        /// Student id, e.g. 1A001
        student: String,
        #[arg(short, long, default_value = "出席")]
        status: String,
        /// Timestamp override, e.g. "2025-04-01 08:35" (defaults to now)
        #[arg(long)]
        at: Option<String>,
    },
    /// Set a single cell (1-based row and column)
    Set { row: u32, col: u32, value: String },
    /// Print the sheet as an aligned grid
    Show,
    /// Count recorded statuses for one student
    Tally { student: String },
}

fn main() -> Result<()> {
    let args = Args::parse();

    match args.command {
        Command::Init => {
            init::init_sheet(&args.file)?;
        }
        Command::Record {
            student,
            status,
            at,
        } => record(&args.file, student, status, at)?,
        Command::Set { row, col, value } => {
            let mut sheet = open_sheet(&args.file)?;
            sheet.set_cell(row, col, value)?;
        }
        Command::Show => {
            let sheet = open_sheet(&args.file)?;
            sheet.display();
        }
        Command::Tally { student } => tally(&args.file, &student)?,
    }

    Ok(())
}

fn record(file: &Path, student: String, status: String, at: Option<String>) -> Result<()> {
    let timestamp = match at {
        Some(s) => NaiveDateTime::parse_from_str(&s, "%Y-%m-%d %H:%M")
            .with_context(|| format!("invalid timestamp: {s} (expected YYYY-MM-DD HH:MM)"))?,
        None => Local::now().naive_local(),
    };
    let entry = AttendanceRecord {
        date: timestamp.format("%Y-%m-%d").to_string(),
        time: timestamp.format("%H:%M").to_string(),
        student,
        status,
    };

    let mut sheet = open_sheet(file)?;
    let row = entry.into_row();
    sheet.append_row(row.clone())?;
    safe_print(&row);
    Ok(())
}

fn tally(file: &Path, student: &str) -> Result<()> {
    let reader = File::open(file).with_context(|| format!("unable to open {}", file.display()))?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut counts: HashMap<String, usize> = HashMap::new();
    for result in reader.deserialize() {
        let entry: AttendanceRecord = result?;
        if entry.student == student {
            *counts.entry(entry.status).or_default() += 1;
        }
    }

    if counts.is_empty() {
        safe_print([format!("no records for {student}")]);
        return Ok(());
    }

    let mut counts: Vec<(String, usize)> = counts.into_iter().collect();
    counts.sort();
    for (status, count) in counts {
        safe_print([format!("{student} {status}: {count}")]);
    }
    Ok(())
}
