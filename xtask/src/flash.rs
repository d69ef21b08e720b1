use anyhow::{Context, Result};
use colored::Colorize;
use std::process::{Command, Stdio};
use std::time::Instant;

use crate::step::{cargo, OnFailure};
use crate::{CHIP, TARGET};

fn binary_path(release: bool) -> String {
    let profile = if release { "release" } else { "debug" };
    format!("target/{TARGET}/{profile}/firmware")
}

pub fn run(release: bool) -> Result<()> {
    let mode = if release { "release" } else { "debug" };

    println!();
    println!(
        "{}",
        format!("🔨 Building firmware ({mode} mode)...").cyan().bold()
    );
    println!();

    let mut args = vec!["build", "-p", "firmware", "--target", TARGET, "--features", "hardware"];
    if release {
        args.push("--release");
    }
    cargo("Build", &args, OnFailure::Abort)?;

    show_binary_size(release);

    println!("{}", format!("📡 Flashing to {CHIP}...").cyan().bold());
    println!("   {}", "Connecting to probe... (Ctrl-C to detach)".dimmed());

    let start = Instant::now();
    // probe-rs run stays attached and streams defmt logs, so inherit stdio.
    let status = Command::new("probe-rs")
        .args(["run", "--chip", CHIP, &binary_path(release)])
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .context("Failed to run probe-rs. Is probe-rs installed? (cargo install probe-rs-tools)")?;

    if !status.success() {
        anyhow::bail!(
            "probe-rs exited after {:.2}s - check that the probe is connected and the Pico is powered",
            start.elapsed().as_secs_f64()
        );
    }
    Ok(())
}

/// Print section sizes if `rust-size` (cargo-binutils) is installed.
fn show_binary_size(release: bool) {
    let Ok(out) = Command::new("rust-size").arg(binary_path(release)).arg("-A").output() else {
        return;
    };
    if !out.status.success() {
        return;
    }
    println!("{}", "📊 Binary size:".cyan());
    for line in String::from_utf8_lossy(&out.stdout).lines() {
        println!("   {}", line.dimmed());
    }
    println!();
}
