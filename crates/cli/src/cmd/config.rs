//! Show configuration defaults and the config file location

use crate::config;
use anyhow::Result;
use owo_colors::OwoColorize;

pub fn run() -> Result<()> {
    let file = config::load()?;
    let location = config::config_file_path();

    println!("{}", "Revkeep Configuration".bold());
    match &location {
        Some(path) if path.exists() => {
            println!("{}: {}\n", "Location".dimmed(), path.display())
        }
        Some(path) => println!(
            "{}: {} {}\n",
            "Location".dimmed(),
            path.display(),
            "(not present, using defaults)".dimmed()
        ),
        None => println!("{}\n", "No config directory on this system".dimmed()),
    }

    println!("{}", "[policy]".yellow());
    print_knob("last", file.policy.last);
    print_knob("keep_hourly", file.policy.keep_hourly);
    print_knob("keep_daily", file.policy.keep_daily);
    print_knob("keep_weekly", file.policy.keep_weekly);
    print_knob("keep_monthly", file.policy.keep_monthly);
    print_knob("keep_yearly", file.policy.keep_yearly);
    print_knob("keep_less_than_n_rev", file.policy.keep_less_than_n_rev);
    print_fence("keep_before", file.policy.keep_before.as_deref());
    print_fence("keep_after", file.policy.keep_after.as_deref());

    Ok(())
}

fn print_knob(name: &str, value: Option<usize>) {
    match value {
        Some(value) => println!("  {} = {}", name.cyan(), value),
        None => println!("  {} = {}", name.cyan(), "off".dimmed()),
    }
}

fn print_fence(name: &str, value: Option<&str>) {
    match value {
        Some(value) => println!("  {} = {}", name.cyan(), value),
        None => println!("  {} = {}", name.cyan(), "off".dimmed()),
    }
}
