//! Run report and end-of-run summary
//!
//! This module collects what a scrape produced and formats the summary
//! printed after the data: success and failure counts, failures by kind,
//! and the name of every failed target.

use crate::model::{Record, TargetFailure};
use std::collections::BTreeMap;

/// Everything a scrape run produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Deputy records, in target enumeration order
    pub records: Vec<Record>,

    /// Failed targets (regions, listing rows or deputies), in enumeration order
    pub failures: Vec<TargetFailure>,

    /// Targets abandoned by a shutdown signal
    pub cancelled: Vec<String>,

    /// Regions whose listing section was parsed
    pub regions_succeeded: usize,
}

impl RunReport {
    /// Records a failed target
    pub fn record_failure(&mut self, failure: TargetFailure) {
        self.failures.push(failure);
    }

    /// Number of targets that produced a record
    pub fn succeeded(&self) -> usize {
        self.records.len()
    }

    /// Number of targets that failed
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Number of targets that reached any terminal state
    pub fn total_targets(&self) -> usize {
        self.succeeded() + self.failed() + self.cancelled.len()
    }

    /// Failure counts keyed by kind (`fetch`, `parse`)
    pub fn failures_by_kind(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for failure in &self.failures {
            *counts.entry(failure.kind.as_str()).or_insert(0) += 1;
        }
        counts
    }

    /// True when nothing failed or was cancelled
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty() && self.cancelled.is_empty()
    }

    /// Returns the success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        let total = self.total_targets();
        if total == 0 {
            return 0.0;
        }
        (self.succeeded() as f64 / total as f64) * 100.0
    }
}

/// Formats the end-of-run summary
pub fn format_summary(report: &RunReport) -> String {
    let mut out = String::new();

    out.push_str("=== Scrape Summary ===\n");
    out.push_str(&format!(
        "Targets: {} succeeded, {} failed, {} cancelled\n",
        report.succeeded(),
        report.failed(),
        report.cancelled.len()
    ));
    out.push_str(&format!(
        "Success Rate: {:.1}% ({} / {} targets)\n",
        report.success_rate(),
        report.succeeded(),
        report.total_targets()
    ));

    if !report.failures.is_empty() {
        out.push_str("\nFailures by kind:\n");
        for (kind, count) in report.failures_by_kind() {
            out.push_str(&format!("  {}: {}\n", kind, count));
        }

        out.push_str(&format!("\nFailed targets ({}):\n", report.failed()));
        for failure in &report.failures {
            out.push_str(&format!("  - {}\n", failure));
        }
    }

    if !report.cancelled.is_empty() {
        out.push_str(&format!(
            "\nCancelled targets ({}):\n",
            report.cancelled.len()
        ));
        for target in &report.cancelled {
            out.push_str(&format!("  - {}\n", target));
        }
    }

    out
}

/// Prints the summary to stderr so stdout only carries data
pub fn print_summary(report: &RunReport) {
    eprint!("{}", format_summary(report));
}
