use hdrhistogram::Histogram;

use crate::error::MetricsError;

/// Latency histogram at microsecond resolution, used for tail percentiles.
#[derive(Debug)]
pub struct LatencyHistogram {
    hist: Histogram<u64>,
}

impl LatencyHistogram {
    /// Create a new latency histogram.
    ///
    /// # Errors
    ///
    /// Returns an error if the histogram cannot be created.
    pub fn new() -> Result<Self, MetricsError> {
        let hist = Histogram::<u64>::new(3)
            .map_err(|err| MetricsError::HistogramCreate { source: err })?;
        Ok(Self { hist })
    }

    /// Record a latency value in microseconds.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be recorded.
    pub fn record(&mut self, latency_us: u64) -> Result<(), MetricsError> {
        let value = latency_us.max(1);
        self.hist
            .record(value)
            .map_err(|err| MetricsError::HistogramRecord {
                value_us: value,
                source: err,
            })
    }

    /// Value in microseconds at `quantile` (0.0..=1.0), or `None` when empty.
    #[must_use]
    pub fn value_at_quantile(&self, quantile: f64) -> Option<u64> {
        if self.count() == 0 {
            return None;
        }
        Some(self.hist.value_at_quantile(quantile))
    }

    #[must_use]
    pub fn count(&self) -> u64 {
        self.hist.len()
    }
}
