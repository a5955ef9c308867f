use plotters::style::RGBColor;
use crate::config::DisplayConfig;
use crate::drivers::range::{RangeModel, ZoomWindow};
use crate::drivers::sample::{NormalizedSamples, Sample};
use crate::drivers::surface::{draw_on_surface, DrawContext, Frame, Point, Stroke};
use crate::drivers::ScopeError;
#[derive(Clone, Debug)]
pub struct SpectrumStyle {
    pub background: RGBColor,
    pub grid: Stroke,
    pub trace: Stroke,
    /// Circle around the loudest visible sample; `None` disables it.
    pub peak_marker: Option<Stroke>,
    pub peak_radius: f32,
}
impl Default for SpectrumStyle {
    fn default() -> Self {
        Self {
            background: RGBColor(0, 0, 0),
            // blanched almond
            grid: Stroke::new(RGBColor(255, 235, 205), 1),
            // coral
            trace: Stroke::new(RGBColor(255, 127, 80), 1),
            peak_marker: Some(Stroke::new(RGBColor(255, 255, 255), 1)),
            peak_radius: 4.0,
        }
    }
}
/// Line plot of magnitude against frequency over a background grid.
pub struct SpectrumRenderer {
    width: u32,
    height: u32,
    horizontal_lines: u32,
    vertical_lines: u32,
    style: SpectrumStyle,
}
impl SpectrumRenderer {
    pub fn new(display: &DisplayConfig, style: SpectrumStyle) -> Self {
        Self {
            width: display.spectrum_width,
            height: display.spectrum_height,
            horizontal_lines: display.horizontal_lines,
            vertical_lines: display.vertical_lines,
            style,
        }
    }
    pub fn render(
        &self,
        samples: &NormalizedSamples,
        range: &RangeModel,
        window: &ZoomWindow,
    ) -> Result<Frame, ScopeError> {
        draw_on_surface(self.width, self.height, |canvas| {
            self.draw(canvas, samples, range, window)
        })
    }
    /// Paints grid and trace with the origin moved to the bottom-left corner,
    /// so louder samples sit at more negative y.
    pub fn draw<C: DrawContext + ?Sized>(
        &self,
        ctx: &mut C,
        samples: &NormalizedSamples,
        range: &RangeModel,
        window: &ZoomWindow,
    ) -> Result<(), ScopeError> {
        let width = self.width as f32;
        let height = self.height as f32;
        ctx.clear(self.style.background)?;
        ctx.translate(0.0, height);
        let step = height / self.horizontal_lines as f32;
        for i in 0..self.horizontal_lines {
            let y = -(i as f32 * step);
            ctx.draw_line((0.0, y), (width, y), self.style.grid)?;
        }
        let step = width / self.vertical_lines as f32;
        for i in 0..self.vertical_lines {
            let x = i as f32 * step;
            ctx.draw_line((x, 0.0), (x, -height), self.style.grid)?;
        }
        let points: Vec<Point> = samples
            .window(window)
            .iter()
            .map(|s| self.project(s, range))
            .collect();
        ctx.draw_path(&points, self.style.trace)?;
        if let (Some(marker), Some(peak)) = (self.style.peak_marker, samples.peak_in(window)) {
            let center = self.project(&samples.as_slice()[peak], range);
            ctx.draw_circle(center, self.style.peak_radius, marker)?;
        }
        Ok(())
    }
    fn project(&self, sample: &Sample, range: &RangeModel) -> Point {
        let x = sample.frequency * self.width as f32 / range.frequency_range();
        let y = sample.magnitude * self.height as f32 / range.magnitude_range();
        (x, -y)
    }
}
