// Desktop/tooling crate — unwrap/expect/panic acceptable in non-embedded code.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(missing_docs)]

mod check;
mod flash;
mod sim;
mod step;
mod test;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// Firmware target triple (RP2040, Cortex-M0+).
pub const TARGET: &str = "thumbv6m-none-eabi";

/// probe-rs chip name.
pub const CHIP: &str = "RP2040";

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Echo Loop development tasks", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the firmware and flash it to a Pico via probe-rs
    Flash {
        /// Build and flash release version
        #[arg(short, long)]
        release: bool,
    },
    /// Check the firmware, the simulator and the no_std crates
    Check,
    /// Run all host tests (unit, integration, doc)
    Test {
        /// Run only unit tests
        #[arg(long)]
        unit: bool,
        /// Run only integration tests
        #[arg(long)]
        integration: bool,
    },
    /// Run the host simulator
    Sim {
        /// tracing filter, e.g. "debug" or "firmware=trace"
        #[arg(long, default_value = "info")]
        log: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Flash { release } => flash::run(release),
        Commands::Check => check::run(),
        Commands::Test { unit, integration } => test::run(unit, integration),
        Commands::Sim { log } => sim::run(&log),
    }
}
