//! Moving average over a fixed ring of samples
//!
//! Every slot starts at 0.0, so the first `N - 1` averages are biased low
//! until the ring has been filled once.

use crate::config::AVERAGE_SAMPLES;

/// Fixed-capacity sample ring returning the mean of all slots
#[derive(Debug, Clone)]
pub struct SampleRing<const N: usize = AVERAGE_SAMPLES> {
    samples: [f32; N],
    cursor: usize,
}

impl<const N: usize> Default for SampleRing<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> SampleRing<N> {
    /// Create a ring with every slot at 0.0
    pub const fn new() -> Self {
        Self {
            samples: [0.0; N],
            cursor: 0,
        }
    }

    /// Store a sample at the cursor and return the mean of all slots
    pub fn sample(&mut self, value: f32) -> f32 {
        if N == 0 {
            return value;
        }
        self.samples[self.cursor] = value;
        self.cursor = (self.cursor + 1) % N;
        self.average()
    }

    /// Mean of all slots
    pub fn average(&self) -> f32 {
        if N == 0 {
            return 0.0;
        }
        let sum: f32 = self.samples.iter().sum();
        sum / N as f32
    }

    /// Index of the slot the next sample will overwrite
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of slots
    pub const fn capacity(&self) -> usize {
        N
    }
}
