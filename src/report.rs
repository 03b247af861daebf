/*!
 * Reporting functionality for LLM Globber
 *
 * Renders the post-run summary with the tabled library for clean,
 * consistent table output.
 */

use std::time::Duration;

use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::types::RunSummary;

/// Format of the report output
pub enum ReportFormat {
    /// Console table output
    ConsoleTable,
}

/// Report generator for run results
pub struct Reporter {
    format: ReportFormat,
}

impl Reporter {
    /// Create a new reporter
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// Generate a report string for a finished run
    pub fn generate_report(&self, summary: &RunSummary) -> String {
        match self.format {
            ReportFormat::ConsoleTable => self.generate_console_report(summary),
        }
    }

    /// Print the report to stdout
    pub fn print_report(&self, summary: &RunSummary) {
        println!("\n{}", self.generate_report(summary));
    }

    fn format_duration(&self, duration: Duration) -> String {
        let secs = duration.as_secs_f64();
        if secs >= 1.0 {
            format!("{:.2} s", secs)
        } else {
            format!("{} ms", duration.as_millis())
        }
    }

    fn generate_console_report(&self, summary: &RunSummary) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: String,

            #[tabled(rename = "Value")]
            value: String,
        }

        let stats = &summary.stats;
        let rate = if stats.elapsed.as_secs_f64() > 0.0 {
            stats.processed as f64 / stats.elapsed.as_secs_f64()
        } else {
            0.0
        };

        let mut rows = vec![
            SummaryRow {
                key: "📂 Output File".to_string(),
                value: summary.artifact.display().to_string(),
            },
            SummaryRow {
                key: "⏱️ Process Time".to_string(),
                value: self.format_duration(stats.elapsed),
            },
            SummaryRow {
                key: "📄 Files Processed".to_string(),
                value: format!("{} ({:.1} files/sec)", stats.processed, rate),
            },
        ];

        if stats.failed > 0 {
            rows.push(SummaryRow {
                key: "⚠️ Failed Files".to_string(),
                value: stats.failed.to_string(),
            });
        }

        let mut table = Table::new(rows);
        table
            .with(Style::rounded())
            .with(Padding::new(1, 1, 0, 0))
            .with(Modify::new(Columns::new(..)).with(Alignment::left()));

        format!("✅  PROCESSING COMPLETE\n{}", table)
    }
}
