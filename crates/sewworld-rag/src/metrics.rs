//! Per-operation timing for the query pipeline.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Running totals for one operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OperationStats {
    pub count: u64,
    pub total: Duration,
}

impl OperationStats {
    pub fn average(&self) -> Duration {
        if self.count == 0 {
            return Duration::ZERO;
        }
        let nanos = self.total.as_nanos() / u128::from(self.count);
        Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
    }
}

/// Collects per-operation timing totals. Disabled monitors hand out timers
/// that record nothing.
#[derive(Debug, Default)]
pub struct PerformanceMonitor {
    enabled: bool,
    stats: Mutex<HashMap<String, OperationStats>>,
}

/// Records the elapsed time into its monitor when dropped.
pub struct Timer<'a> {
    monitor: &'a PerformanceMonitor,
    operation: &'static str,
    started: Instant,
}

impl Drop for Timer<'_> {
    fn drop(&mut self) {
        if self.monitor.enabled {
            self.monitor.record(self.operation, self.started.elapsed());
        }
    }
}

impl PerformanceMonitor {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            stats: Mutex::new(HashMap::new()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn start_timer(&self, operation: &'static str) -> Timer<'_> {
        Timer {
            monitor: self,
            operation,
            started: Instant::now(),
        }
    }

    pub fn record(&self, operation: &str, duration: Duration) {
        let mut stats = self.stats.lock();
        let entry = stats.entry(operation.to_string()).or_default();
        entry.count += 1;
        entry.total = entry.total.saturating_add(duration);
    }

    /// Mean duration for `operation`; zero when nothing was recorded.
    pub fn average(&self, operation: &str) -> Duration {
        self.stats
            .lock()
            .get(operation)
            .map(OperationStats::average)
            .unwrap_or(Duration::ZERO)
    }

    pub fn count(&self, operation: &str) -> u64 {
        self.stats.lock().get(operation).map(|s| s.count).unwrap_or(0)
    }

    pub fn stats(&self, operation: &str) -> Option<OperationStats> {
        self.stats.lock().get(operation).copied()
    }

    /// Average duration per recorded operation.
    pub fn snapshot(&self) -> HashMap<String, Duration> {
        self.stats
            .lock()
            .iter()
            .map(|(op, stats)| (op.clone(), stats.average()))
            .collect()
    }

    pub fn reset(&self) {
        self.stats.lock().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_and_snapshot() {
        let monitor = PerformanceMonitor::new(true);
        monitor.record("retrieve", Duration::from_millis(10));
        monitor.record("retrieve", Duration::from_millis(30));
        assert_eq!(monitor.average("retrieve"), Duration::from_millis(20));
        assert_eq!(monitor.count("retrieve"), 2);
        assert_eq!(monitor.average("missing"), Duration::ZERO);

        let snapshot = monitor.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot["retrieve"], Duration::from_millis(20));

        monitor.reset();
        assert!(monitor.snapshot().is_empty());
    }

    #[test]
    fn test_totals_stay_constant_size() {
        let monitor = PerformanceMonitor::new(true);
        for _ in 0..10_000 {
            monitor.record("generate", Duration::from_micros(3));
        }
        let stats = monitor.stats("generate").unwrap();
        assert_eq!(stats.count, 10_000);
        assert_eq!(stats.total, Duration::from_millis(30));
        assert_eq!(monitor.average("generate"), Duration::from_micros(3));
        assert_eq!(OperationStats::default().average(), Duration::ZERO);
    }

    #[test]
    fn test_timer_records_on_drop() {
        let monitor = PerformanceMonitor::new(true);
        {
            let _timer = monitor.start_timer("classify");
        }
        assert_eq!(monitor.count("classify"), 1);
    }

    #[test]
    fn test_disabled_monitor_records_nothing() {
        let monitor = PerformanceMonitor::new(false);
        drop(monitor.start_timer("classify"));
        assert_eq!(monitor.count("classify"), 0);
    }
}
