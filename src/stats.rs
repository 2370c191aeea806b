//! Running statistics over shot counts.

/// Accumulates shot counts one game at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ShotStats {
    count: usize,
    min: usize,
    max: usize,
    sum: f64,
    sum_sq: f64,
}

/// Snapshot of a [`ShotStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "std", derive(serde::Serialize))]
pub struct ShotSummary {
    pub count: usize,
    pub min: usize,
    pub max: usize,
    pub mean: f64,
    pub std_dev: f64,
}

impl ShotStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, shots: usize) {
        if self.count == 0 {
            self.min = shots;
            self.max = shots;
        } else {
            self.min = self.min.min(shots);
            self.max = self.max.max(shots);
        }
        self.count += 1;
        let s = shots as f64;
        self.sum += s;
        self.sum_sq += s * s;
    }

    /// Fold another accumulator into this one.
    pub fn merge(&mut self, other: &ShotStats) {
        if other.count == 0 {
            return;
        }
        if self.count == 0 {
            *self = *other;
            return;
        }
        self.count += other.count;
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
        self.sum += other.sum;
        self.sum_sq += other.sum_sq;
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn mean(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum / self.count as f64
        }
    }

    /// Population standard deviation.
    pub fn std_dev(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        let mean = self.mean();
        let var = self.sum_sq / self.count as f64 - mean * mean;
        libm::sqrt(var.max(0.0))
    }

    pub fn summary(&self) -> ShotSummary {
        ShotSummary {
            count: self.count,
            min: self.min,
            max: self.max,
            mean: self.mean(),
            std_dev: self.std_dev(),
        }
    }
}
