//! Emit a synthetic revision CSV for exercising policies

use anyhow::{bail, Context, Result};
use chrono::{Duration, NaiveDateTime, Utc};
use clap::Args;
use indicatif::ProgressBar;
use std::io::Write;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Revisions to generate per parent
    #[arg(default_value_t = 15)]
    pub count: usize,

    /// Number of parent items
    #[arg(long, default_value_t = 1)]
    pub parents: usize,

    /// Oldest revision date (default: five years before now)
    #[arg(long)]
    pub oldest_date: Option<String>,

    /// Write the CSV here instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: GenerateArgs) -> Result<()> {
    if args.count == 0 {
        bail!("count must be positive");
    }
    if args.parents == 0 {
        bail!("--parents must be positive");
    }

    // 1. Work out the time range and spacing
    let now = Utc::now().naive_utc();
    let oldest = match &args.oldest_date {
        Some(value) => history::parse_timestamp(value)
            .with_context(|| format!("invalid --oldest-date {value:?}"))?,
        None => now - Duration::days(5 * 365),
    };
    if oldest >= now {
        bail!("--oldest-date must lie in the past");
    }
    let interval = (now - oldest) / args.count as i32;

    // 2. Write rows, one batch of evenly spaced revisions per parent
    let writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(
            std::fs::File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?,
        ),
        None => Box::new(std::io::stdout()),
    };
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(["ID", "post_name", "post_date_gmt"])?;

    let bar = ProgressBar::new(args.parents as u64);
    let mut next_id = args.parents as u64 + 1;
    for parent in 1..=args.parents as u64 {
        write_parent(&mut csv_writer, parent, &mut next_id, oldest, interval, args.count)?;
        bar.inc(1);
    }
    csv_writer.flush()?;
    bar.finish_and_clear();

    Ok(())
}

fn write_parent<W: Write>(
    writer: &mut csv::Writer<W>,
    parent: u64,
    next_id: &mut u64,
    oldest: NaiveDateTime,
    interval: Duration,
    count: usize,
) -> Result<()> {
    for step in 0..count {
        let ts = oldest + interval * step as i32;
        writer.write_record([
            next_id.to_string(),
            format!("{parent}-revision-v1"),
            ts.format("%Y-%m-%d %H:%M:%S").to_string(),
        ])?;
        *next_id += 1;
    }
    Ok(())
}
