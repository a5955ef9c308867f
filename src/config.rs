use std::fs;
use std::path::Path;
use std::time::Duration;
use anyhow::{Context, Result};
use serde::Deserialize;
use crate::drivers::ScopeError;
/// Sweep bounds and noise shape of the synthetic signal.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SignalConfig {
    /// Samples per sweep. The waterfall maps one column to one sample.
    pub data_size: usize,
    pub magnitude_min: f32,
    pub magnitude_max: f32,
    pub frequency_min: f32,
    pub frequency_max: f32,
    /// Fraction of the magnitude range used as uniform noise amplitude.
    pub noise_level: f32,
    /// Fixed seed for a reproducible random stream; entropy-seeded when absent.
    pub seed: Option<u64>,
}
impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            data_size: 1024,
            magnitude_min: -120.0,
            magnitude_max: -20.0,
            frequency_min: 90.0,
            frequency_max: 110.0,
            noise_level: 0.1,
            seed: None,
        }
    }
}
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub spectrum_width: u32,
    pub spectrum_height: u32,
    pub waterfall_width: u32,
    /// One row per tick: 500 rows is ten seconds of history at 20 Hz.
    pub waterfall_height: u32,
    pub x_axis_height: u32,
    pub y_axis_width: u32,
    pub horizontal_lines: u32,
    pub vertical_lines: u32,
    pub label_font_size: u32,
}
impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            spectrum_width: 1024,
            spectrum_height: 200,
            waterfall_width: 1024,
            waterfall_height: 500,
            x_axis_height: 24,
            y_axis_width: 48,
            horizontal_lines: 5,
            vertical_lines: 14,
            label_font_size: 12,
        }
    }
}
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct ScopeConfig {
    pub signal: SignalConfig,
    pub display: DisplayConfig,
    /// Fraction of the absolute sweep cropped from each edge per zoom level.
    pub zoom_step: f32,
    pub initial_zoom: u32,
    pub tick_interval_ms: u64,
}
impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            signal: SignalConfig::default(),
            display: DisplayConfig::default(),
            zoom_step: 0.1,
            initial_zoom: 0,
            // 1000 ms / 20 fps
            tick_interval_ms: 50,
        }
    }
}
impl ScopeConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: ScopeConfig =
            serde_json::from_str(text).context("failed to parse scope configuration")?;
        config.validate()?;
        Ok(config)
    }
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_json_str(&text).with_context(|| format!("in {}", path.display()))
    }
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
    pub fn validate(&self) -> Result<(), ScopeError> {
        let signal = &self.signal;
        let display = &self.display;
        if signal.data_size == 0 {
            return Err(invalid("data_size must be greater than zero"));
        }
        if !(signal.magnitude_max > signal.magnitude_min) {
            return Err(invalid("magnitude_max must exceed magnitude_min"));
        }
        if !(signal.frequency_max > signal.frequency_min) {
            return Err(invalid("frequency_max must exceed frequency_min"));
        }
        if !(signal.noise_level >= 0.0) {
            return Err(invalid("noise_level must be non-negative"));
        }
        if !(self.zoom_step > 0.0 && self.zoom_step <= 0.5) {
            return Err(invalid("zoom_step must lie in (0, 0.5]"));
        }
        if self.tick_interval_ms == 0 {
            return Err(invalid("tick_interval_ms must be greater than zero"));
        }
        let surfaces = [
            display.spectrum_width,
            display.spectrum_height,
            display.waterfall_width,
            display.waterfall_height,
            display.x_axis_height,
            display.y_axis_width,
        ];
        if surfaces.contains(&0) {
            return Err(invalid("surface dimensions must be non-zero"));
        }
        if display.horizontal_lines == 0 || display.vertical_lines == 0 {
            return Err(invalid("grid line counts must be non-zero"));
        }
        if display.waterfall_width as usize != signal.data_size {
            return Err(ScopeError::InvalidConfig(format!(
                "waterfall_width ({}) must equal data_size ({})",
                display.waterfall_width, signal.data_size
            )));
        }
        Ok(())
    }
}
fn invalid(reason: &str) -> ScopeError {
    ScopeError::InvalidConfig(reason.to_owned())
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn defaults_are_valid() {
        let config = ScopeConfig::default();
        config.validate().unwrap();
        assert_eq!(config.tick_interval(), Duration::from_millis(50));
        assert_eq!(config.signal.data_size, 1024);
        assert_eq!(config.display.waterfall_height, 500);
    }
    #[test]
    fn partial_json_keeps_defaults() {
        let config = ScopeConfig::from_json_str(
            r#"{ "zoom_step": 0.05, "signal": { "seed": 7 }, "display": { "waterfall_height": 64 } }"#,
        )
        .unwrap();
        assert_eq!(config.zoom_step, 0.05);
        assert_eq!(config.signal.seed, Some(7));
        assert_eq!(config.signal.magnitude_min, -120.0);
        assert_eq!(config.display.waterfall_height, 64);
        assert_eq!(config.display.vertical_lines, 14);
    }
    #[test]
    fn rejects_mismatched_waterfall_width() {
        let mut config = ScopeConfig::default();
        config.display.waterfall_width = 512;
        assert!(matches!(
            config.validate(),
            Err(ScopeError::InvalidConfig(_))
        ));
    }
    #[test]
    fn rejects_inverted_ranges_and_bad_zoom_step() {
        let mut config = ScopeConfig::default();
        config.signal.magnitude_max = -200.0;
        assert!(config.validate().is_err());
        let mut config = ScopeConfig::default();
        config.zoom_step = 0.0;
        assert!(config.validate().is_err());
        assert!(ScopeConfig::from_json_str(r#"{ "zoom_step": 0.9 }"#).is_err());
    }
}
