use std::cmp::Ordering;
use crate::drivers::range::{RangeModel, ZoomWindow};
/// One synthetic point of the sweep.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub magnitude: f32,
    pub frequency: f32,
}
impl Sample {
    pub fn new(magnitude: f32, frequency: f32) -> Self {
        Self {
            magnitude,
            frequency,
        }
    }
    /// Total order by frequency; magnitude does not take part.
    pub fn cmp_frequency(&self, other: &Self) -> Ordering {
        self.frequency.total_cmp(&other.frequency)
    }
}
/// Raw samples of one tick, indexed by sweep position.
#[derive(Clone, Debug, Default)]
pub struct SampleSet {
    samples: Vec<Sample>,
}
impl SampleSet {
    pub fn from_samples(samples: Vec<Sample>) -> Self {
        Self { samples }
    }
    pub fn len(&self) -> usize {
        self.samples.len()
    }
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
    pub fn as_slice(&self) -> &[Sample] {
        &self.samples
    }
    pub fn sort_by_frequency(&mut self) {
        self.samples.sort_by(Sample::cmp_frequency);
    }
    /// Shifts every sample so the current minimum magnitude and frequency sit at zero.
    /// Consumes the raw set so the shift can only ever happen once.
    pub fn normalize(self, range: &RangeModel) -> NormalizedSamples {
        let magnitude_min = range.magnitude_min();
        let frequency_min = range.frequency_min();
        let samples = self
            .samples
            .into_iter()
            .map(|s| Sample::new(s.magnitude - magnitude_min, s.frequency - frequency_min))
            .collect();
        NormalizedSamples { samples }
    }
}
/// Samples with the range minimums already subtracted, shared by both renderers.
#[derive(Clone, Debug, Default)]
pub struct NormalizedSamples {
    samples: Vec<Sample>,
}
impl NormalizedSamples {
    pub fn len(&self) -> usize {
        self.samples.len()
    }
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
    pub fn as_slice(&self) -> &[Sample] {
        &self.samples
    }
    /// Samples inside the zoom window, clamped to the set length.
    pub fn window(&self, window: &ZoomWindow) -> &[Sample] {
        let end = window.end_index.min(self.samples.len());
        let start = window.start_index.min(end);
        &self.samples[start..end]
    }
    /// Index (into the full set) of the loudest sample inside the window.
    pub fn peak_in(&self, window: &ZoomWindow) -> Option<usize> {
        let visible = self.window(window);
        visible
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.magnitude.total_cmp(&b.magnitude))
            .map(|(offset, _)| window.start_index.min(self.samples.len()) + offset)
    }
}
