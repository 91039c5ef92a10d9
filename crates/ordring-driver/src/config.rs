//! Configuration for a driver run.

use std::time::Duration;

/// Settings for the producer/consumer loops.
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Channel capacity.
    ///
    /// Default: 1024
    pub capacity: usize,

    /// Upper bound (inclusive) of the random pause before every insert and get.
    ///
    /// Default: 100ms
    pub max_delay: Duration,

    /// Produced values are drawn uniformly from `1..=max_value`.
    ///
    /// Default: 100
    pub max_value: i32,

    /// How long a consumer waits for data before re-checking the stop flag.
    ///
    /// Default: 100ms
    pub poll_interval: Duration,

    /// Stop on its own after this long. `None` runs until stopped externally.
    ///
    /// Default: None
    pub duration: Option<Duration>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            capacity: 1024,
            max_delay: Duration::from_millis(100),
            max_value: 100,
            poll_interval: Duration::from_millis(100),
            duration: None,
        }
    }
}

impl DriverConfig {
    /// A configuration with no pauses, for tests and benchmarks.
    pub fn no_delay() -> Self {
        Self {
            max_delay: Duration::ZERO,
            poll_interval: Duration::from_millis(10),
            ..Self::default()
        }
    }

    /// Sets the channel capacity.
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets the maximum random pause.
    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    /// Sets the largest produced value.
    pub fn with_max_value(mut self, max_value: i32) -> Self {
        self.max_value = max_value;
        self
    }

    /// Sets the consumer poll interval.
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Sets the run duration.
    pub fn with_duration(mut self, duration: Option<Duration>) -> Self {
        self.duration = duration;
        self
    }
}
