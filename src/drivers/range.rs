use log::debug;
use crate::config::ScopeConfig;
use crate::drivers::ScopeError;
/// Index bounds of the visible part of a sample set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ZoomWindow {
    pub level: u32,
    pub start_index: usize,
    /// Exclusive.
    pub end_index: usize,
}
impl ZoomWindow {
    pub fn full(data_size: usize) -> Self {
        Self {
            level: 0,
            start_index: 0,
            end_index: data_size,
        }
    }
    pub fn len(&self) -> usize {
        self.end_index.saturating_sub(self.start_index)
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    pub fn is_identity(&self) -> bool {
        self.level == 0
    }
}
/// Absolute and zoomed magnitude/frequency bounds. Only `set_zoom` mutates it.
#[derive(Clone, Debug)]
pub struct RangeModel {
    magnitude_min: f32,
    magnitude_max: f32,
    frequency_min_abs: f32,
    frequency_max_abs: f32,
    frequency_min: f32,
    frequency_max: f32,
    data_size: usize,
    zoom_step: f32,
    window: ZoomWindow,
}
impl RangeModel {
    pub fn from_config(config: &ScopeConfig) -> Self {
        let signal = &config.signal;
        Self {
            magnitude_min: signal.magnitude_min,
            magnitude_max: signal.magnitude_max,
            frequency_min_abs: signal.frequency_min,
            frequency_max_abs: signal.frequency_max,
            frequency_min: signal.frequency_min,
            frequency_max: signal.frequency_max,
            data_size: signal.data_size,
            zoom_step: config.zoom_step,
            window: ZoomWindow::full(signal.data_size),
        }
    }
    pub fn magnitude_min(&self) -> f32 {
        self.magnitude_min
    }
    pub fn magnitude_max(&self) -> f32 {
        self.magnitude_max
    }
    pub fn magnitude_range(&self) -> f32 {
        (self.magnitude_max - self.magnitude_min).abs()
    }
    pub fn frequency_min_abs(&self) -> f32 {
        self.frequency_min_abs
    }
    pub fn frequency_max_abs(&self) -> f32 {
        self.frequency_max_abs
    }
    pub fn frequency_range_abs(&self) -> f32 {
        (self.frequency_max_abs - self.frequency_min_abs).abs()
    }
    pub fn frequency_min(&self) -> f32 {
        self.frequency_min
    }
    pub fn frequency_max(&self) -> f32 {
        self.frequency_max
    }
    pub fn frequency_range(&self) -> f32 {
        (self.frequency_max - self.frequency_min).abs()
    }
    pub fn data_size(&self) -> usize {
        self.data_size
    }
    pub fn window(&self) -> ZoomWindow {
        self.window
    }
    pub fn zoom_level(&self) -> u32 {
        self.window.level
    }
    /// Crops `zoom_step * level` of the absolute sweep from both edges.
    ///
    /// A level that would leave an empty or inverted window is rejected and the
    /// previous window stays in effect.
    pub fn set_zoom(&mut self, level: u32) -> Result<ZoomWindow, ScopeError> {
        if !self.is_valid_level(level) {
            return Err(ScopeError::ZoomOutOfRange {
                level,
                max_level: self.max_zoom_level(),
            });
        }
        let crop = self.frequency_range_abs() * self.zoom_step * level as f32;
        self.frequency_min = self.frequency_min_abs + crop;
        self.frequency_max = self.frequency_max_abs - crop;
        self.window = self.window_for(level);
        debug!(
            "zoom {level}: frequency {:.3}..{:.3}, indices {}..{}",
            self.frequency_min, self.frequency_max, self.window.start_index, self.window.end_index
        );
        Ok(self.window)
    }
    /// Largest level whose window still holds at least one sample.
    pub fn max_zoom_level(&self) -> u32 {
        let mut level = (0.5 / self.zoom_step as f64).ceil() as u32;
        while level > 0 && !self.is_valid_level(level) {
            level -= 1;
        }
        level
    }
    fn window_for(&self, level: u32) -> ZoomWindow {
        let crop = (self.data_size as f64 * self.zoom_step as f64 * level as f64).floor() as usize;
        ZoomWindow {
            level,
            start_index: crop,
            end_index: self.data_size.saturating_sub(crop),
        }
    }
    fn is_valid_level(&self, level: u32) -> bool {
        if level == 0 {
            return true;
        }
        let fraction = self.zoom_step as f64 * level as f64;
        let window = self.window_for(level);
        fraction < 0.5 && window.start_index < window.end_index
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    fn model() -> RangeModel {
        RangeModel::from_config(&ScopeConfig::default())
    }
    #[test]
    fn level_zero_is_identity() {
        let mut range = model();
        let window = range.set_zoom(0).unwrap();
        assert_eq!(window, ZoomWindow::full(1024));
        assert!(window.is_identity());
        assert_eq!(range.frequency_min(), 90.0);
        assert_eq!(range.frequency_max(), 110.0);
        assert_eq!(range.magnitude_range(), 100.0);
    }
    #[test]
    fn level_three_crops_thirty_percent_each_side() {
        let mut range = model();
        let window = range.set_zoom(3).unwrap();
        assert_eq!(window.start_index, 307);
        assert_eq!(window.end_index, 717);
        assert!((range.frequency_min() - 96.0).abs() < 1e-4);
        assert!((range.frequency_max() - 104.0).abs() < 1e-4);
        assert!((range.frequency_range() - 8.0).abs() < 1e-4);
        assert_eq!(range.frequency_range_abs(), 20.0);
    }
    #[test]
    fn windows_stay_ordered_up_to_max_level() {
        let mut range = model();
        let max = range.max_zoom_level();
        assert_eq!(max, 4);
        for level in 0..=max {
            let window = range.set_zoom(level).unwrap();
            assert!(window.start_index < window.end_index);
            assert!(window.end_index <= 1024);
            assert!(range.frequency_min_abs() <= range.frequency_min());
            assert!(range.frequency_min() <= range.frequency_max());
            assert!(range.frequency_max() <= range.frequency_max_abs());
        }
    }
    #[test]
    fn collapsing_level_is_rejected_without_mutation() {
        let mut range = model();
        range.set_zoom(2).unwrap();
        let before = range.window();
        let err = range.set_zoom(5).unwrap_err();
        assert!(matches!(
            err,
            ScopeError::ZoomOutOfRange {
                level: 5,
                max_level: 4
            }
        ));
        assert_eq!(range.window(), before);
        assert!(range.set_zoom(u32::MAX).is_err());
        assert_eq!(range.zoom_level(), 2);
    }
    #[test]
    fn max_level_follows_zoom_step() {
        let mut config = ScopeConfig::default();
        config.zoom_step = 0.25;
        assert_eq!(RangeModel::from_config(&config).max_zoom_level(), 1);
        config.zoom_step = 0.5;
        assert_eq!(RangeModel::from_config(&config).max_zoom_level(), 0);
    }
}
