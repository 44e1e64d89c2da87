//! beacon-health — periodic HTTP health checking and availability reporting.
//!
//! Probes a fixed list of endpoints one after another, classifies each
//! as UP or DOWN, and keeps cumulative per-domain counters that are
//! reported after every sweep.
//!
//! # Architecture
//!
//! ```text
//! Monitor
//!   ├── for each Endpoint, in declared order
//!   │   ├── Probe::probe() → HealthStatus   (HttpProber retries transport errors)
//!   │   └── Availability::record(domain, status)
//!   ├── Availability::snapshot() → report lines
//!   └── wait `interval` (cancellable via the shutdown channel)
//! ```
//!
//! # Classification
//!
//! A response is UP when its status is 2xx and it arrived within the
//! latency threshold. Any other completed response is DOWN immediately.
//! Only transport failures (connect, DNS, timeout) are retried, up to
//! `max_attempts` requests with `retry_delay` between them.

pub mod availability;
pub mod checker;
pub mod error;
pub mod monitor;
pub mod report;

pub use availability::{Availability, AvailabilityRecord, DomainAvailability};
pub use checker::{HealthStatus, HttpProber, Probe, ProbeConfig, ProbeOutcome};
pub use error::ProbeError;
pub use monitor::{Monitor, MonitorSettings};
pub use report::{CycleReport, ReportFormat};
