//! Availability report rendering.

use std::str::FromStr;

use serde::Serialize;

use crate::availability::DomainAvailability;

/// Output format for per-cycle reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    /// One human-readable line per domain.
    #[default]
    Text,
    /// One JSON object per cycle.
    Json,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(ReportFormat::Text),
            "json" => Ok(ReportFormat::Json),
            other => Err(format!("unknown report format '{other}' (expected text or json)")),
        }
    }
}

/// Availability after one completed sweep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CycleReport {
    /// 1-based cycle counter.
    pub cycle: u64,
    pub domains: Vec<DomainAvailability>,
}

impl CycleReport {
    pub fn render(&self, format: ReportFormat) -> String {
        match format {
            ReportFormat::Text => self
                .domains
                .iter()
                .map(|d| format!("{} has {}% availability percentage\n", d.domain, d.percentage))
                .collect(),
            ReportFormat::Json => {
                // Serializing plain strings and integers cannot fail.
                let mut line = serde_json::to_string(self).unwrap_or_default();
                line.push('\n');
                line
            }
        }
    }
}
