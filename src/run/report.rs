//! Run summary.

use std::fmt;

use crate::models::Strategy;

/// Results of a lookup run.
///
/// Counts how each target's hostname was obtained.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    /// Number of targets processed (comments and blank lines excluded)
    pub total_targets: usize,
    /// Hostnames taken from a certificate
    pub from_certificate: usize,
    /// Hostnames taken from a PTR record
    pub from_ptr: usize,
    /// Hostnames taken from the reverse zone's SOA
    pub from_soa: usize,
    /// Targets reported with the sentinel hostname
    pub unresolved: usize,
    /// Number of records handed to the output
    pub records_written: usize,
    /// Elapsed time in seconds
    pub elapsed_seconds: f64,
}

impl RunReport {
    pub(crate) fn record(&mut self, strategy: Strategy) {
        self.total_targets += 1;
        match strategy {
            Strategy::Certificate => self.from_certificate += 1,
            Strategy::Ptr => self.from_ptr += 1,
            Strategy::Soa => self.from_soa += 1,
            Strategy::None => self.unresolved += 1,
        }
    }

    /// Targets for which some strategy produced a name.
    pub fn resolved(&self) -> usize {
        self.total_targets - self.unresolved
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Processed {} target(s) in {:.1}s: {} certificate, {} ptr, {} soa, {} unresolved",
            self.total_targets,
            self.elapsed_seconds,
            self.from_certificate,
            self.from_ptr,
            self.from_soa,
            self.unresolved
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_counts_per_strategy() {
        let mut report = RunReport::default();
        report.record(Strategy::Certificate);
        report.record(Strategy::Certificate);
        report.record(Strategy::Soa);
        report.record(Strategy::None);

        assert_eq!(report.total_targets, 4);
        assert_eq!(report.from_certificate, 2);
        assert_eq!(report.from_ptr, 0);
        assert_eq!(report.from_soa, 1);
        assert_eq!(report.unresolved, 1);
        assert_eq!(report.resolved(), 3);
    }

    #[test]
    fn test_display_summary() {
        let mut report = RunReport::default();
        report.record(Strategy::Ptr);
        report.elapsed_seconds = 1.5;
        assert_eq!(
            report.to_string(),
            "Processed 1 target(s) in 1.5s: 0 certificate, 1 ptr, 0 soa, 0 unresolved"
        );
    }
}
