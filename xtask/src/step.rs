use anyhow::{Context, Result};
use colored::Colorize;
use std::process::{Command, Output};
use std::time::Instant;

/// What a failing step does to the overall task.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum OnFailure {
    /// Print stderr and abort.
    Abort,
    /// Print a warning and carry on.
    Warn,
}

/// Run `cargo <args>` as a named step, printing timing and outcome.
///
/// Returns the captured output; with [`OnFailure::Abort`] a non-zero exit
/// becomes an error.
pub fn cargo(label: &str, args: &[&str], on_failure: OnFailure) -> Result<Output> {
    println!("{}", format!("  {label}...").cyan());
    let start = Instant::now();

    let output = Command::new("cargo")
        .args(args)
        .output()
        .with_context(|| format!("Failed to run cargo {}", args.join(" ")))?;

    if output.status.success() {
        println!(
            "{}",
            format!("  ✓ {label} passed in {:.2}s", start.elapsed().as_secs_f64()).green()
        );
    } else if on_failure == OnFailure::Abort {
        eprintln!("{}", format!("  ✗ {label} failed").red().bold());
        eprintln!();
        eprintln!("{}", String::from_utf8_lossy(&output.stderr));
        anyhow::bail!("{label} failed");
    } else {
        eprintln!("{}", format!("  ⚠ {label} reported problems").yellow().bold());
    }
    println!();
    Ok(output)
}

/// Print the closing line of a task.
pub fn done(what: &str, start: Instant) {
    println!(
        "{}",
        format!("✓ {what} in {:.2}s", start.elapsed().as_secs_f64())
            .green()
            .bold()
    );
    println!();
}
