//! Per-domain availability accounting.
//!
//! Counters are cumulative from process start and never reset. The
//! map is bounded by the number of distinct domains in the endpoint
//! list, so nothing is evicted.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;

use crate::checker::HealthStatus;

/// Check counts for one domain. Always `up <= total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AvailabilityRecord {
    pub up: u64,
    pub total: u64,
}

impl AvailabilityRecord {
    /// `round(100 * up / total)` with ties rounded to even.
    ///
    /// Computed in integer arithmetic. A record with no checks reports 0.
    pub fn percentage(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        let scaled = 100 * self.up;
        let quotient = scaled / self.total;
        let remainder = scaled % self.total;

        let round_up = match (2 * remainder).cmp(&self.total) {
            Ordering::Greater => true,
            Ordering::Equal => quotient % 2 == 1,
            Ordering::Less => false,
        };

        (quotient + u64::from(round_up)) as u8
    }
}

/// One line of an availability report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DomainAvailability {
    pub domain: String,
    pub percentage: u8,
    pub up: u64,
    pub total: u64,
}

/// Running availability counters keyed by domain.
#[derive(Debug, Default)]
pub struct Availability {
    records: BTreeMap<String, AvailabilityRecord>,
}

impl Availability {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one check result against `domain`.
    pub fn record(&mut self, domain: &str, status: HealthStatus) {
        let record = self.records.entry(domain.to_string()).or_default();
        record.total += 1;
        if status.is_up() {
            record.up += 1;
        }
    }

    pub fn get(&self, domain: &str) -> Option<AvailabilityRecord> {
        self.records.get(domain).copied()
    }

    /// Point-in-time percentages for every domain, sorted by domain.
    pub fn snapshot(&self) -> Vec<DomainAvailability> {
        self.records
            .iter()
            .filter(|(_, r)| r.total > 0)
            .map(|(domain, r)| DomainAvailability {
                domain: domain.clone(),
                percentage: r.percentage(),
                up: r.up,
                total: r.total,
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
