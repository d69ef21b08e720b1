use anyhow::{Context, Result};
use colored::Colorize;
use std::process::Command;

use platform::clock_config::{PLAYBACK_SAMPLE_RATE_HZ, SAMPLE_RATE_HZ};
use platform::config::APP_NAME;

pub fn run(log: &str) -> Result<()> {
    println!();
    println!("{}", format!("🎙  {APP_NAME} simulator").cyan().bold());
    println!(
        "   {}",
        format!("capture {SAMPLE_RATE_HZ} Hz, replay {PLAYBACK_SAMPLE_RATE_HZ} Hz").dimmed()
    );
    println!();

    let status = Command::new("cargo")
        .args(["run", "-p", "firmware", "--example", "loopback_sim", "--features", "simulator"])
        .env("RUST_LOG", log)
        .status()
        .context("Failed to run the simulator")?;

    if !status.success() {
        anyhow::bail!("Simulator exited with {status}");
    }
    Ok(())
}
