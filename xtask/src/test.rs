use anyhow::Result;
use colored::Colorize;
use std::time::Instant;

use crate::step::{cargo, done, OnFailure};

pub fn run(unit_only: bool, integration_only: bool) -> Result<()> {
    println!();
    println!("{}", "🧪 Running tests...".cyan().bold());
    println!();

    let start = Instant::now();

    if !integration_only {
        let out = cargo("Unit tests", &["test", "--lib", "--workspace"], OnFailure::Abort)?;
        print_summary(&out.stdout);
    }

    if !unit_only {
        // `--tests` builds every tests/*.rs target of every member.
        let out = cargo(
            "Integration tests",
            &["test", "--workspace", "--tests", "--exclude", "xtask"],
            OnFailure::Abort,
        )?;
        print_summary(&out.stdout);
    }

    let out = cargo("Doc tests", &["test", "--doc", "--workspace"], OnFailure::Warn)?;
    if out.status.success() {
        print_summary(&out.stdout);
    }

    done("All tests completed", start);
    Ok(())
}

fn print_summary(stdout: &[u8]) {
    let summary = extract_test_summary(&String::from_utf8_lossy(stdout));
    println!("   {}", summary.dimmed());
    println!();
}

/// Add up every "test result:" line cargo prints (one per test binary).
fn extract_test_summary(output: &str) -> String {
    let mut passed = 0u64;
    let mut failed = 0u64;
    let mut binaries = 0u64;
    for line in output.lines().filter(|l| l.contains("test result:")) {
        binaries += 1;
        passed += count_before(line, " passed");
        failed += count_before(line, " failed");
    }
    if binaries == 0 {
        return "(summary not available)".to_string();
    }
    format!("{passed} passed; {failed} failed across {binaries} test binaries")
}

/// Parse the number right before `label`, e.g. `5` in "ok. 5 passed;".
fn count_before(line: &str, label: &str) -> u64 {
    line.find(label)
        .and_then(|end| line.get(..end))
        .and_then(|head| head.rsplit(' ').next())
        .and_then(|n| n.parse().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_sums_all_binaries() {
        let out = "\
running 3 tests
test result: ok. 3 passed; 0 failed; 0 ignored; 0 measured; 0 filtered out
running 2 tests
test result: FAILED. 1 passed; 1 failed; 0 ignored; 0 measured; 0 filtered out
";
        assert_eq!(
            extract_test_summary(out),
            "4 passed; 1 failed across 2 test binaries"
        );
    }

    #[test]
    fn summary_without_results() {
        assert_eq!(extract_test_summary("error: no tests"), "(summary not available)");
    }
}
