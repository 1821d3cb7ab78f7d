use std::collections::VecDeque;

/// Samples kept per series unless configured otherwise.
pub const DEFAULT_CAPACITY: usize = 60;

/// Rolling window of samples for one metric.
///
/// Holds at most `capacity` values in arrival order; pushing into a full
/// window evicts the oldest one.  Values are stored as given, including
/// NaN and infinities.
#[derive(Debug, Clone, PartialEq)]
pub struct RollingSeries {
    samples:  VecDeque<f64>,
    capacity: usize,
}

impl RollingSeries {
    pub fn new(capacity: usize) -> Self {
        Self {
            samples: VecDeque::with_capacity(capacity.saturating_add(1)),
            capacity,
        }
    }

    /// Push a new sample, evicting the oldest if over capacity.
    pub fn push(&mut self, value: f64) {
        self.samples.push_back(value);
        if self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    /// Replace the contents with the last `capacity` values of `values`.
    pub fn set_all<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = f64>,
    {
        self.samples.clear();
        for value in values {
            self.push(value);
        }
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Owned copy of the window, oldest first.
    pub fn snapshot(&self) -> Vec<f64> {
        self.samples.iter().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Most recent sample.
    pub fn latest(&self) -> Option<f64> {
        self.samples.back().copied()
    }
}

impl Default for RollingSeries {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
