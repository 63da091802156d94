//! Terminal output for easyblock runs
//!
//! Lifecycle banners go to stdout, warnings and errors to stderr. A spinner
//! stands in for command output unless the run is verbose.

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use std::time::Duration;

/// Banner opening a package run, e.g. "==> Installing ipp 9.0.1 (ipp)"
pub fn package(message: &str) {
    println!("{} {}", "==>".blue().bold(), message.bold());
}

/// Lifecycle step name, e.g. "  -> sanity check"
pub fn step(name: &str) {
    println!("  {} {}", "->".cyan(), name);
}

/// Indented note under the current step (echoed commands, dry-run writes)
pub fn note(message: &str) {
    println!("     {}", message.dimmed());
}

pub fn success(message: &str) {
    println!("{} {}", "==>".green().bold(), message.green());
}

pub fn info(message: &str) {
    println!("{} {}", "::".cyan(), message);
}

/// Non-fatal problem, such as a tolerated command failure
pub fn warning(message: &str) {
    eprintln!("{} {}", "warning:".yellow().bold(), message.yellow());
}

pub fn error(message: &str) {
    eprintln!("{} {}", "error:".red().bold(), message.red());
}

/// Step left out of this run
pub fn skip(message: &str) {
    println!("{} {}", "==>".dimmed(), message.dimmed());
}

/// `name  detail` row for the layout, guess and list subcommands
pub fn list_item(name: &str, detail: &str) {
    println!("  {} {}", name.green(), detail.dimmed());
}

/// Spinner labelled with the shell command being waited on
pub fn command_spinner(cmd: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("  {spinner:.cyan} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb.set_message(cmd.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

pub fn finish_spinner(pb: ProgressBar) {
    pb.finish_and_clear();
}
