//! Classify revisions under a retention policy

use crate::config::{self, PolicyDefaults};
use crate::input;
use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use clap::{Args, ValueEnum};
use history::RevisionHistory;
use owo_colors::OwoColorize;
use retention::{Pruner, RetentionPolicy};
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::{debug, warn};

#[derive(Args, Debug)]
pub struct PruneArgs {
    /// Read revision rows from this CSV file (stdin otherwise, or if the
    /// file is unreadable)
    #[arg(long)]
    pub file: Option<PathBuf>,

    /// Keep at least this many of the most recent revisions per parent
    #[arg(long)]
    pub last: Option<usize>,

    /// Number of hourly revisions to keep
    #[arg(long)]
    pub keep_hourly: Option<usize>,

    /// Number of daily revisions to keep
    #[arg(long)]
    pub keep_daily: Option<usize>,

    /// Number of weekly revisions to keep
    #[arg(long)]
    pub keep_weekly: Option<usize>,

    /// Number of monthly revisions to keep
    #[arg(long)]
    pub keep_monthly: Option<usize>,

    /// Number of yearly revisions to keep
    #[arg(long)]
    pub keep_yearly: Option<usize>,

    /// Leave parents with no more than this many revisions untouched
    #[arg(long)]
    pub keep_less_than_n_rev: Option<usize>,

    /// Keep revisions dated on or before this date (yyyy-mm-dd, optionally
    /// with HH:MM:SS)
    #[arg(long)]
    pub keep_before: Option<String>,

    /// Keep revisions dated on or after this date, and everything newer
    #[arg(long)]
    pub keep_after: Option<String>,

    /// Echo every row with a [remove] marker; --list=removed prints only
    /// the removed ids
    #[arg(long, value_enum, num_args = 0..=1, require_equals = true, default_missing_value = "verbose")]
    pub list: Option<ListMode>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListMode {
    Verbose,
    Removed,
}

pub fn run(args: PruneArgs) -> Result<()> {
    // 1. Resolve the policy: file defaults, flags override
    let defaults = config::load()?;
    let policy = build_policy(&args, &defaults.policy)?;
    if policy.is_noop() {
        warn!("no retention rules configured; nothing will be marked for removal");
    }

    // 2. Read input rows
    let mut rows = input::read_rows(args.file.as_deref())?;
    if rows.is_empty() {
        return Ok(());
    }
    input::strip_header(&mut rows);
    let considered = rows.len();

    // 3. Group revisions by parent item
    let history = history::group(rows).context("failed to parse revision rows")?;

    // 4. Evaluate the policy
    let removed = Pruner::new(policy).evaluate(&history);

    // 5. Render
    match args.list {
        Some(ListMode::Removed) => {
            for id in &removed {
                println!("{id}");
            }
            return Ok(());
        }
        Some(ListMode::Verbose) => show_list(&history, &removed),
        None => {}
    }

    println!(
        "{} Prune {} revisions out of {} among {} parent items",
        "Success:".green().bold(),
        removed.len(),
        considered,
        history.parent_count()
    );

    Ok(())
}

/// Merge CLI flags over file defaults into a validated policy
fn build_policy(args: &PruneArgs, defaults: &PolicyDefaults) -> Result<RetentionPolicy> {
    let keep_before = args
        .keep_before
        .as_deref()
        .or(defaults.keep_before.as_deref())
        .map(parse_fence)
        .transpose()
        .context("invalid --keep-before")?;
    let keep_after = args
        .keep_after
        .as_deref()
        .or(defaults.keep_after.as_deref())
        .map(parse_fence)
        .transpose()
        .context("invalid --keep-after")?;

    Ok(RetentionPolicy {
        keep_last: args.last.or(defaults.last),
        min_revisions: args.keep_less_than_n_rev.or(defaults.keep_less_than_n_rev),
        keep_before,
        keep_after,
        hourly: args.keep_hourly.or(defaults.keep_hourly),
        daily: args.keep_daily.or(defaults.keep_daily),
        weekly: args.keep_weekly.or(defaults.keep_weekly),
        monthly: args.keep_monthly.or(defaults.keep_monthly),
        yearly: args.keep_yearly.or(defaults.keep_yearly),
    })
}

/// Parse a fence date; bare dates mean midnight
fn parse_fence(value: &str) -> Result<NaiveDateTime> {
    history::parse_timestamp(value)
        .with_context(|| format!("unparseable date {value:?} (expected yyyy-mm-dd or yyyy-mm-dd HH:MM:SS)"))
}

/// Echo every row tab-joined, marking the ones selected for removal
fn show_list(history: &RevisionHistory, removed: &[u64]) {
    let removed: HashSet<u64> = removed.iter().copied().collect();

    for (parent_id, revisions) in history.iter() {
        let mut removed_count = 0;
        for revision in revisions {
            if removed.contains(&revision.id) {
                println!("{}\t[remove]", revision.fields.join("\t"));
                removed_count += 1;
            } else {
                println!("{}", revision.fields.join("\t"));
            }
        }
        if removed_count > 0 {
            debug!(
                "parent {parent_id}: remove {removed_count} out of {} revisions",
                revisions.len()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        args: PruneArgs,
    }

    fn parse(argv: &[&str]) -> PruneArgs {
        let mut full = vec!["revkeep"];
        full.extend(argv);
        TestCli::parse_from(full).args
    }

    #[test]
    fn test_flag_parsing() {
        let args = parse(&["--keep-daily=2", "--last", "5", "--keep-before", "2015-11-01"]);
        assert_eq!(args.keep_daily, Some(2));
        assert_eq!(args.last, Some(5));
        assert_eq!(args.keep_before.as_deref(), Some("2015-11-01"));
        assert_eq!(args.list, None);
    }

    #[test]
    fn test_list_flag_modes() {
        assert_eq!(parse(&["--list"]).list, Some(ListMode::Verbose));
        assert_eq!(parse(&["--list=removed"]).list, Some(ListMode::Removed));
    }

    #[test]
    fn test_build_policy_flags_override_file() {
        let args = parse(&["--keep-daily=2"]);
        let defaults = PolicyDefaults {
            keep_daily: Some(9),
            keep_weekly: Some(3),
            ..Default::default()
        };
        let policy = build_policy(&args, &defaults).unwrap();
        assert_eq!(policy.daily, Some(2));
        assert_eq!(policy.weekly, Some(3));
        assert_eq!(policy.keep_last, None);
    }

    #[test]
    fn test_build_policy_parses_fences() {
        let args = parse(&["--keep-after", "2015-11-01 12:30:00"]);
        let policy = build_policy(&args, &PolicyDefaults::default()).unwrap();
        assert_eq!(
            policy.keep_after,
            Some(history::parse_timestamp("2015-11-01 12:30:00").unwrap())
        );
    }

    #[test]
    fn test_build_policy_rejects_bad_fence() {
        let args = parse(&["--keep-before", "soonish"]);
        let err = build_policy(&args, &PolicyDefaults::default()).unwrap_err();
        assert!(format!("{err:#}").contains("keep-before"));
    }

    #[test]
    fn test_noop_policy_detected() {
        let args = parse(&[]);
        let policy = build_policy(&args, &PolicyDefaults::default()).unwrap();
        assert!(policy.is_noop());
    }
}
