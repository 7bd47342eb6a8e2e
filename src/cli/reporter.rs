// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI output reporter with colored formatting

use crate::extract::ExtractionReport;
use colored::*;
use std::time::Duration;

/// CLI reporter for formatted output
pub struct Reporter;

impl Reporter {
    /// Summarize an extraction run
    pub fn report_extraction(file: &str, report: &ExtractionReport, duration: Duration) {
        println!("\n{}", "━".repeat(80).bright_black());
        println!("{} {}", "Scene:".bold(), file.cyan());
        println!("{}", "━".repeat(80).bright_black());

        if report.failures.is_empty() {
            println!("{} {}", "✅".green(), "All wall objects processed".green().bold());
        } else {
            println!(
                "{} {}",
                "❌".red(),
                format!("{} object(s) failed", report.failures.len()).red().bold()
            );
        }

        println!("\n{}", "Walls:".bold());
        for wall in &report.walls {
            println!(
                "  {} {} {} {}",
                wall.name.cyan(),
                format!("{} segments", wall.segments.len()).bright_black(),
                format!("{} front", wall.front_facing_count()).green(),
                format!("{:.1}px", wall.width).yellow()
            );
        }
        if report.walls.is_empty() {
            println!("  {}", "none".bright_black());
        }

        if !report.skipped.is_empty() {
            println!("\n{}", "Skipped:".bold());
            for skipped in &report.skipped {
                println!("  {} {}", skipped.object.yellow(), skipped.reason.to_string().bright_black());
            }
        }

        if !report.failures.is_empty() {
            println!("\n{}", "Failures:".bold());
            for failure in &report.failures {
                println!("  {} {}", failure.object.red(), failure.message.bright_black());
            }
        }

        if report.dropped_segments > 0 {
            println!(
                "\n{}",
                format!("{} segment(s) dropped: unprojectable endpoint", report.dropped_segments).yellow()
            );
        }

        println!(
            "\n  {} {}",
            "Time:".bright_black(),
            Self::format_duration(duration).yellow()
        );
        println!("{}", "━".repeat(80).bright_black());
    }

    /// Report error
    pub fn report_error(message: &str) {
        eprintln!("\n{} {}", "❌ Error:".red().bold(), message);
    }

    /// Report warning
    pub fn report_warning(message: &str) {
        println!("\n{} {}", "⚠️  Warning:".yellow().bold(), message);
    }

    /// Report info
    pub fn report_info(message: &str) {
        println!("{} {}", "ℹ️".bright_blue(), message);
    }

    /// Format duration for display
    fn format_duration(duration: Duration) -> String {
        let micros = duration.as_micros();

        if micros < 1_000 {
            format!("{}µs", micros)
        } else if micros < 1_000_000 {
            format!("{:.2}ms", micros as f64 / 1_000.0)
        } else {
            format!("{:.2}s", micros as f64 / 1_000_000.0)
        }
    }

    /// Print success message
    pub fn success(message: &str) {
        println!("{} {}", "✅".green(), message.green());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(Reporter::format_duration(Duration::from_micros(500)), "500µs");
        assert_eq!(Reporter::format_duration(Duration::from_millis(5)), "5.00ms");
        assert_eq!(Reporter::format_duration(Duration::from_secs(2)), "2.00s");
    }
}
