use log::trace;
use crate::drivers::gradient::ColorGradient;
use crate::drivers::range::{RangeModel, ZoomWindow};
use crate::drivers::resample::nearest_neighbor;
use crate::drivers::sample::NormalizedSamples;
use crate::drivers::surface::{draw_on_surface, DrawContext, Frame, PixelView};
use crate::drivers::ScopeError;
/// Scrolling history of packed colour rows. Row 0 is the newest tick, the
/// last row the oldest still on screen.
pub struct WaterfallHistory {
    width: usize,
    height: usize,
    pixels: Vec<u32>, // rows x width, row-major
}
impl WaterfallHistory {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }
    pub fn width(&self) -> usize {
        self.width
    }
    pub fn height(&self) -> usize {
        self.height
    }
    /// Moves every row down by one; the old bottom row falls off and row 0
    /// keeps its previous content until overwritten.
    pub fn scroll(&mut self) {
        if self.height < 2 {
            return;
        }
        let keep = (self.height - 1) * self.width;
        self.pixels.copy_within(0..keep, self.width);
    }
    pub fn write_top_row(&mut self, row: &[u32]) -> Result<(), ScopeError> {
        self.check_width(row)?;
        if self.height == 0 {
            return Ok(());
        }
        self.pixels[..self.width].copy_from_slice(row);
        Ok(())
    }
    /// Scrolls and inserts `row` as the newest line.
    pub fn push_row(&mut self, row: &[u32]) -> Result<(), ScopeError> {
        self.check_width(row)?;
        self.scroll();
        self.write_top_row(row)
    }
    pub fn row(&self, k: usize) -> Option<&[u32]> {
        if k >= self.height {
            return None;
        }
        Some(&self.pixels[k * self.width..(k + 1) * self.width])
    }
    /// Flat row-major view for blitting.
    pub fn as_flat(&self) -> &[u32] {
        &self.pixels
    }
    pub fn view(&self) -> PixelView<'_> {
        PixelView {
            width: self.width as u32,
            height: self.height as u32,
            pixels: &self.pixels,
        }
    }
    pub fn reset(&mut self) {
        self.pixels.fill(0);
    }
    fn check_width(&self, row: &[u32]) -> Result<(), ScopeError> {
        if row.len() != self.width {
            return Err(ScopeError::DegenerateInput(format!(
                "waterfall row has {} pixels, expected {}",
                row.len(),
                self.width
            )));
        }
        Ok(())
    }
}
/// Which path produced the newest waterfall row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowUpdate {
    /// No zoom: column i coloured straight from sample i.
    Direct,
    /// Zoomed: the visible samples were stretched back to full width.
    Resampled { source_len: usize },
}
/// Owns the history and turns each tick's samples into a new top row.
pub struct WaterfallRenderer {
    history: WaterfallHistory,
    gradient: ColorGradient,
}
impl WaterfallRenderer {
    pub fn new(width: usize, height: usize, gradient: ColorGradient) -> Self {
        Self {
            history: WaterfallHistory::new(width, height),
            gradient,
        }
    }
    pub fn history(&self) -> &WaterfallHistory {
        &self.history
    }
    pub fn reset(&mut self) {
        self.history.reset();
    }
    /// Scrolls the history and writes the row for `samples`.
    pub fn update(
        &mut self,
        samples: &NormalizedSamples,
        range: &RangeModel,
        window: &ZoomWindow,
    ) -> Result<RowUpdate, ScopeError> {
        let width = self.history.width();
        let magnitude_range = range.magnitude_range();
        let color_of = |magnitude: f32| {
            let offset = magnitude as f64 / magnitude_range as f64;
            self.gradient.packed_at(offset)
        };
        let (row, update) = if window.is_identity() && samples.len() == width {
            let row: Vec<u32> = samples
                .as_slice()
                .iter()
                .map(|s| color_of(s.magnitude))
                .collect();
            (row, RowUpdate::Direct)
        } else {
            let cropped: Vec<u32> = samples
                .window(window)
                .iter()
                .map(|s| color_of(s.magnitude))
                .collect();
            let source_len = cropped.len();
            let row = nearest_neighbor(&cropped, width)?;
            (row, RowUpdate::Resampled { source_len })
        };
        self.history.scroll();
        self.history.write_top_row(&row)?;
        trace!("waterfall row written via {update:?}");
        Ok(update)
    }
    pub fn render(&self) -> Result<Frame, ScopeError> {
        let width = self.history.width() as u32;
        let height = self.history.height() as u32;
        draw_on_surface(width, height, |canvas| self.draw(canvas))
    }
    /// Blits the whole history with row 0 at the top.
    pub fn draw<C: DrawContext + ?Sized>(&self, ctx: &mut C) -> Result<(), ScopeError> {
        ctx.draw_pixels(self.history.view())
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScopeConfig;
    use crate::drivers::gradient::pack_rgb;
    use crate::drivers::sample::{Sample, SampleSet};
    use crate::drivers::surface::recording::{DrawOp, RecordingContext};
    use plotters::style::RGBColor;
    fn flat_samples(range: &RangeModel, magnitude: f32) -> NormalizedSamples {
        let samples = (0..1024)
            .map(|i| Sample::new(magnitude, 90.0 + i as f32 * 20.0 / 1024.0))
            .collect();
        SampleSet::from_samples(samples).normalize(range)
    }
    #[test]
    fn history_keeps_rows_in_order_newest_first() {
        let mut history = WaterfallHistory::new(3, 4);
        for v in 1..=6u32 {
            history.push_row(&[v, v, v]).unwrap();
        }
        // Six pushes into four rows: 6 newest at the top, 3 oldest survivor.
        assert_eq!(history.row(0).unwrap(), &[6, 6, 6]);
        assert_eq!(history.row(1).unwrap(), &[5, 5, 5]);
        assert_eq!(history.row(2).unwrap(), &[4, 4, 4]);
        assert_eq!(history.row(3).unwrap(), &[3, 3, 3]);
        assert!(history.row(4).is_none());
        assert_eq!(history.as_flat().len(), 12);
    }
    #[test]
    fn partial_history_leaves_older_rows_blank() {
        let mut history = WaterfallHistory::new(2, 5);
        history.push_row(&[7, 7]).unwrap();
        history.push_row(&[8, 8]).unwrap();
        assert_eq!(history.row(0).unwrap(), &[8, 8]);
        assert_eq!(history.row(1).unwrap(), &[7, 7]);
        assert_eq!(history.row(2).unwrap(), &[0, 0]);
        history.reset();
        assert!(history.as_flat().iter().all(|&p| p == 0));
    }
    #[test]
    fn wrong_row_width_is_rejected() {
        let mut history = WaterfallHistory::new(4, 2);
        history.push_row(&[1, 1, 1, 1]).unwrap();
        assert!(history.push_row(&[1, 2]).is_err());
        // A rejected row must not scroll the history.
        assert_eq!(history.row(0).unwrap(), &[1, 1, 1, 1]);
        assert_eq!(history.row(1).unwrap(), &[0, 0, 0, 0]);
    }
    #[test]
    fn unzoomed_update_takes_direct_branch() {
        let range = RangeModel::from_config(&ScopeConfig::default());
        let mut renderer = WaterfallRenderer::new(1024, 8, ColorGradient::heat());
        let samples = flat_samples(&range, -70.0);
        let update = renderer.update(&samples, &range, &range.window()).unwrap();
        assert_eq!(update, RowUpdate::Direct);
        // (-70 - -120) / 100 = 0.5 -> green
        let green = pack_rgb(RGBColor(0, 255, 0));
        assert!(renderer.history().row(0).unwrap().iter().all(|&p| p == green));
    }
    #[test]
    fn zoomed_update_resamples_the_visible_window() {
        let mut range = RangeModel::from_config(&ScopeConfig::default());
        let window = range.set_zoom(3).unwrap();
        let mut renderer = WaterfallRenderer::new(1024, 8, ColorGradient::heat());
        let mut raw: Vec<Sample> = (0..1024)
            .map(|i| Sample::new(-120.0, 90.0 + i as f32 * 20.0 / 1024.0))
            .collect();
        // Loud first visible sample, floor everywhere else.
        raw[307].magnitude = -20.0;
        let samples = SampleSet::from_samples(raw).normalize(&range);
        let update = renderer.update(&samples, &range, &window).unwrap();
        assert_eq!(update, RowUpdate::Resampled { source_len: 410 });
        let row = renderer.history().row(0).unwrap();
        let red = pack_rgb(RGBColor(255, 0, 0));
        let blue = pack_rgb(RGBColor(0, 0, 255));
        // 1024 / 410 columns per source sample: the first two or three are red.
        assert_eq!(row[0], red);
        assert_eq!(row[1], red);
        assert_eq!(row[3], blue);
        assert_eq!(row[1023], blue);
    }
    #[test]
    fn noise_beyond_the_range_clamps_to_end_colours() {
        let range = RangeModel::from_config(&ScopeConfig::default());
        let mut renderer = WaterfallRenderer::new(1024, 2, ColorGradient::heat());
        renderer
            .update(&flat_samples(&range, -5.0), &range, &range.window())
            .unwrap();
        let red = pack_rgb(RGBColor(255, 0, 0));
        assert!(renderer.history().row(0).unwrap().iter().all(|&p| p == red));
    }
    #[test]
    fn draw_blits_the_full_history() {
        let renderer = WaterfallRenderer::new(1024, 16, ColorGradient::heat());
        let mut ctx = RecordingContext::new(1024, 16);
        renderer.draw(&mut ctx).unwrap();
        assert_eq!(
            ctx.ops,
            vec![DrawOp::Pixels {
                width: 1024,
                height: 16
            }]
        );
    }
}
