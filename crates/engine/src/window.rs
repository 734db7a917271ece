//! Rolling sample window
//!
//! A fixed-capacity, insertion-ordered buffer of classified samples with
//! FIFO eviction. Control limits may be recalculated from a larger dataset
//! after samples were provisionally classified against stale or absent
//! limits, so replacing the boundaries re-classifies every retained sample
//! in place; stored values are never touched.

use caliper_core::{Result, SpcError, WindowSample, ZoneBoundaries};
use caliper_stats::{Classification, classify_value};
use std::collections::VecDeque;

/// Bounded history of classified samples for one characteristic.
#[derive(Debug, Clone)]
pub struct RollingWindow {
    max_size: usize,
    boundaries: Option<ZoneBoundaries>,
    samples: VecDeque<WindowSample>,
}

impl RollingWindow {
    /// Create an empty window. The window is not ready until boundaries
    /// are set.
    pub fn new(max_size: usize) -> Self {
        Self {
            max_size,
            boundaries: None,
            samples: VecDeque::with_capacity(max_size),
        }
    }

    /// Create a window that is immediately ready to classify.
    pub fn with_boundaries(max_size: usize, boundaries: ZoneBoundaries) -> Self {
        Self {
            max_size,
            boundaries: Some(boundaries),
            samples: VecDeque::with_capacity(max_size),
        }
    }

    /// True iff boundaries are set.
    pub fn is_ready(&self) -> bool {
        self.boundaries.is_some()
    }

    pub fn boundaries(&self) -> Option<&ZoneBoundaries> {
        self.boundaries.as_ref()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Replace the boundaries and re-classify every retained sample
    /// against them. Zone, side and sigma distance are recomputed; values
    /// are untouched. Cost is linear in the window size.
    pub fn set_boundaries(&mut self, boundaries: ZoneBoundaries) -> Result<()> {
        for sample in &mut self.samples {
            let c = classify_value(&boundaries, sample.value)?;
            sample.zone = c.zone;
            sample.is_above_center = c.is_above_center;
            sample.sigma_distance = c.sigma_distance;
        }
        self.boundaries = Some(boundaries);
        Ok(())
    }

    /// Classify a value against the current boundaries.
    pub fn classify_value(&self, value: f64) -> Result<Classification> {
        let boundaries = self.boundaries.as_ref().ok_or(SpcError::NotReady)?;
        classify_value(boundaries, value)
    }

    /// Insert a sample at the newest end. If the window was at capacity,
    /// the oldest sample is evicted and returned.
    pub fn append(&mut self, sample: WindowSample) -> Option<WindowSample> {
        self.samples.push_back(sample);
        if self.samples.len() > self.max_size {
            self.samples.pop_front()
        } else {
            None
        }
    }

    /// Full contents, oldest to newest.
    pub fn samples(&self) -> Vec<WindowSample> {
        self.samples.iter().cloned().collect()
    }

    /// The last `k` samples, newest first. Returns fewer than `k` when the
    /// window holds fewer.
    pub fn recent(&self, k: usize) -> Vec<WindowSample> {
        self.samples.iter().rev().take(k).cloned().collect()
    }

    /// Empty the window. Boundaries are retained, so the window stays
    /// ready to accept samples.
    pub fn clear(&mut self) {
        self.samples.clear();
    }
}
