use anyhow::Result;
use colored::Colorize;
use std::time::Instant;

use crate::step::{cargo, done, OnFailure};
use crate::TARGET;

pub fn run() -> Result<()> {
    println!();
    println!("{}", "🔍 Checking Echo Loop builds...".cyan().bold());
    println!();

    let start = Instant::now();

    cargo(
        "Hardware target (RP2040)",
        &["check", "-p", "firmware", "--target", TARGET, "--features", "hardware"],
        OnFailure::Abort,
    )?;
    cargo(
        "Host simulator",
        &["check", "-p", "firmware", "--features", "simulator", "--examples"],
        OnFailure::Abort,
    )?;
    // The core crates must build without std for the Cortex-M0+.
    for krate in ["platform", "loopback"] {
        cargo(
            &format!("{krate} (no_std)"),
            &["check", "-p", krate, "--target", TARGET, "--no-default-features"],
            OnFailure::Abort,
        )?;
    }
    cargo(
        "Clippy",
        &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
        OnFailure::Warn,
    )?;
    let fmt = cargo("Formatting", &["fmt", "--all", "--check"], OnFailure::Warn)?;
    if !fmt.status.success() {
        eprintln!("     Run 'cargo fmt --all' to fix");
        println!();
    }

    done("All checks completed", start);
    Ok(())
}
