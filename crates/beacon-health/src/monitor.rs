//! Monitor loop — sweeps every endpoint, reports, then waits.
//!
//! Probing is strictly sequential, in declared order. The report
//! after each sweep reflects that sweep plus all earlier ones. The
//! shutdown channel is observed between endpoints and during the
//! inter-cycle wait; an in-flight request is never aborted.

use std::io::{self, Write};
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info};

use beacon_core::Endpoint;

use crate::availability::Availability;
use crate::checker::Probe;
use crate::report::{CycleReport, ReportFormat};

/// Loop-level settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorSettings {
    /// Pause after each report.
    pub interval: Duration,
    pub format: ReportFormat,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(15),
            format: ReportFormat::Text,
        }
    }
}

/// Drives repeated probe cycles over a fixed endpoint list.
pub struct Monitor<P> {
    endpoints: Vec<Endpoint>,
    prober: P,
    availability: Availability,
    settings: MonitorSettings,
    cycles: u64,
}

impl<P: Probe> Monitor<P> {
    pub fn new(endpoints: Vec<Endpoint>, prober: P, settings: MonitorSettings) -> Self {
        Self {
            endpoints,
            prober,
            availability: Availability::new(),
            settings,
            cycles: 0,
        }
    }

    pub fn availability(&self) -> &Availability {
        &self.availability
    }

    /// Number of completed cycles.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Sweep all endpoints once and write the report to `out`.
    ///
    /// Returns `None` without reporting if shutdown was requested
    /// part-way through the sweep.
    pub async fn run_cycle<W: Write>(
        &mut self,
        out: &mut W,
        shutdown: &watch::Receiver<bool>,
    ) -> io::Result<Option<CycleReport>> {
        for endpoint in &self.endpoints {
            if *shutdown.borrow() {
                debug!(cycle = self.cycles + 1, "sweep interrupted by shutdown");
                return Ok(None);
            }

            let status = self.prober.probe(endpoint).await;
            let domain = endpoint.domain();
            debug!(endpoint = %endpoint.name, %domain, %status, "endpoint checked");
            self.availability.record(domain, status);
        }

        self.cycles += 1;
        let report = CycleReport {
            cycle: self.cycles,
            domains: self.availability.snapshot(),
        };

        out.write_all(report.render(self.settings.format).as_bytes())?;
        out.flush()?;

        Ok(Some(report))
    }

    /// Run cycles until the shutdown channel flips to `true` or its
    /// sender is dropped.
    ///
    /// Only a failure to write the report ends the loop with an error.
    pub async fn run<W: Write>(&mut self, out: &mut W, mut shutdown: watch::Receiver<bool>) -> io::Result<()> {
        info!(
            endpoints = self.endpoints.len(),
            interval_secs = self.settings.interval.as_secs(),
            "monitor started"
        );

        loop {
            if self.run_cycle(out, &shutdown).await?.is_none() {
                break;
            }

            info!(cycle = self.cycles, "waiting for the next cycle, press CTRL+C to stop");

            tokio::select! {
                _ = tokio::time::sleep(self.settings.interval) => {}
                _ = shutdown.changed() => {
                    debug!("shutdown during inter-cycle wait");
                    break;
                }
            }
        }

        info!(cycles = self.cycles, "monitor stopped");
        Ok(())
    }
}
