use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use crate::drivers::range::RangeModel;
use crate::drivers::sample::{Sample, SampleSet};
/// Sweep positions (as a fraction of the sweep) bounding the signal bands.
const FLOOR_BELOW: f32 = 0.399;
const FLOOR_ABOVE: f32 = 0.6;
const PEAK_FROM: f32 = 0.45;
const PEAK_TO: f32 = 0.55;
/// Multipliers applied to the (negative) magnitude floor in each band.
const SHOULDER_SCALE: f32 = 0.75;
const PEAK_SCALE: f32 = 0.3;
/// Produces a flat noise floor with a raised shoulder and a peak around the
/// middle of the sweep, plus uniform noise.
pub struct SignalSynthesizer<R: Rng = StdRng> {
    rng: R,
    noise_level: f32,
}
impl SignalSynthesizer<StdRng> {
    /// Seeded from `seed` when given, otherwise from OS entropy.
    pub fn from_seed(seed: Option<u64>, noise_level: f32) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(rng, noise_level)
    }
}
impl<R: Rng> SignalSynthesizer<R> {
    pub fn with_rng(rng: R, noise_level: f32) -> Self {
        Self { rng, noise_level }
    }
    pub fn noise_level(&self) -> f32 {
        self.noise_level
    }
    /// Sample `i` of a sweep of `max` points. Frequency always spans the
    /// absolute sweep, whatever the current zoom.
    pub fn generate_at(&mut self, i: usize, max: usize, range: &RangeModel) -> Sample {
        let magnitude = self.simulate_magnitude(i, max, range);
        let frequency =
            range.frequency_min_abs() + i as f32 * range.frequency_range_abs() / max as f32;
        Sample::new(magnitude, frequency)
    }
    /// A point drawn uniformly over the current magnitude and zoomed frequency bounds.
    pub fn generate_random(&mut self, range: &RangeModel) -> Sample {
        let magnitude = self.uniform(range.magnitude_min(), range.magnitude_max());
        let frequency = self.uniform(range.frequency_min(), range.frequency_max());
        Sample::new(magnitude, frequency)
    }
    /// A fresh sweep of `count` samples.
    pub fn generate_set(&mut self, count: usize, range: &RangeModel) -> SampleSet {
        let samples = (0..count)
            .map(|i| self.generate_at(i, count, range))
            .collect();
        SampleSet::from_samples(samples)
    }
    fn simulate_magnitude(&mut self, i: usize, max: usize, range: &RangeModel) -> f32 {
        let t = i as f32 / max as f32;
        let floor = range.magnitude_min();
        // The floor is negative, so scaling it down moves the level up.
        let base = if t < FLOOR_BELOW || t > FLOOR_ABOVE {
            floor
        } else if t < PEAK_FROM || t > PEAK_TO {
            floor * SHOULDER_SCALE
        } else {
            floor * PEAK_SCALE
        };
        base + self.uniform(0.0, range.magnitude_range()) * self.noise_level
    }
    fn uniform(&mut self, min: f32, max: f32) -> f32 {
        self.rng.gen::<f32>() * (max - min) + min
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScopeConfig;
    fn setup() -> (SignalSynthesizer, RangeModel) {
        let config = ScopeConfig::default();
        (
            SignalSynthesizer::from_seed(Some(42), config.signal.noise_level),
            RangeModel::from_config(&config),
        )
    }
    #[test]
    fn frequency_is_monotonic_and_spans_the_absolute_sweep() {
        let (mut synth, mut range) = setup();
        range.set_zoom(3).unwrap();
        let set = synth.generate_set(1024, &range);
        let freqs: Vec<f32> = set.as_slice().iter().map(|s| s.frequency).collect();
        assert!(freqs.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(freqs[0], 90.0);
        let step = 20.0 / 1024.0;
        assert!((freqs[1023] - (110.0 - step)).abs() < 1e-3);
    }
    #[test]
    fn magnitudes_stay_between_floor_and_peak_ceiling() {
        let (mut synth, range) = setup();
        let ceiling = -120.0 * 0.3 + 0.1 * 100.0;
        for _ in 0..5 {
            for s in synth.generate_set(1024, &range).as_slice() {
                assert!(s.magnitude >= -120.0, "{} below floor", s.magnitude);
                assert!(s.magnitude <= ceiling + 1e-4, "{} above ceiling", s.magnitude);
            }
        }
    }
    #[test]
    fn centre_of_sweep_uses_peak_band() {
        let (mut synth, range) = setup();
        for _ in 0..200 {
            let sample = synth.generate_at(512, 1024, &range);
            assert!(sample.magnitude >= -36.0 - 1e-4);
            assert!(sample.magnitude <= -26.0 + 1e-4);
        }
    }
    #[test]
    fn shoulder_sits_above_the_floor() {
        let (mut synth, range) = setup();
        // t = 0.42 and t = 0.58 fall in the shoulder band: base is -90.
        for i in [430, 594] {
            let sample = synth.generate_at(i, 1024, &range);
            assert!(sample.magnitude >= -90.0 - 1e-4);
            assert!(sample.magnitude <= -80.0 + 1e-4);
        }
        // t = 0.1 is on the floor.
        let sample = synth.generate_at(102, 1024, &range);
        assert!(sample.magnitude <= -110.0 + 1e-4);
    }
    #[test]
    fn same_seed_gives_same_sweep() {
        let (mut a, range) = setup();
        let (mut b, _) = setup();
        assert_eq!(
            a.generate_set(64, &range).as_slice(),
            b.generate_set(64, &range).as_slice()
        );
    }
    #[test]
    fn random_sample_stays_in_current_bounds() {
        let (mut synth, mut range) = setup();
        range.set_zoom(2).unwrap();
        for _ in 0..100 {
            let s = synth.generate_random(&range);
            assert!(s.magnitude >= -120.0 && s.magnitude <= -20.0);
            assert!(s.frequency >= range.frequency_min() - 1e-4);
            assert!(s.frequency <= range.frequency_max() + 1e-4);
        }
    }
}
