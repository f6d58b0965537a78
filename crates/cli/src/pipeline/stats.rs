//! Relay run statistics.

use std::time::Duration;

/// Totals for one relay run
#[derive(Debug, Clone, Default)]
pub struct RelayStats {
    /// Events read from the stream (including malformed ones)
    pub events_read: u64,

    /// Events successfully parsed and dispatched
    pub events_dispatched: u64,

    /// Outcomes that completed a transport exchange
    pub outcomes_ok: u64,

    /// Outcomes tagged with an error
    pub outcomes_err: u64,

    /// Wall-clock duration of the run
    pub duration: Duration,
}

impl RelayStats {
    /// Total outcomes observed on the result channel
    pub fn outcomes_total(&self) -> u64 {
        self.outcomes_ok + self.outcomes_err
    }

    /// Events per second over the whole run
    pub fn events_per_sec(&self) -> f64 {
        let secs = self.duration.as_secs_f64();
        if secs > 0.0 {
            self.events_dispatched as f64 / secs
        } else {
            0.0
        }
    }

    /// Print a human-readable summary
    pub fn print_summary(&self) {
        println!("\n=== Relay Summary ===\n");
        println!("  Events read:        {}", self.events_read);
        println!("  Events dispatched:  {}", self.events_dispatched);
        println!("  Outcomes ok:        {}", self.outcomes_ok);
        println!("  Outcomes failed:    {}", self.outcomes_err);
        println!("  Duration:           {:.2}s", self.duration.as_secs_f64());
        println!("  Throughput:         {:.2} events/s", self.events_per_sec());
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_totals_and_throughput() {
        let stats = RelayStats {
            events_read: 12,
            events_dispatched: 10,
            outcomes_ok: 18,
            outcomes_err: 2,
            duration: Duration::from_secs(5),
        };
        assert_eq!(stats.outcomes_total(), 20);
        assert!((stats.events_per_sec() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zero_duration_throughput() {
        let stats = RelayStats::default();
        assert_eq!(stats.events_per_sec(), 0.0);
    }
}
