use plotters::style::RGBColor;
use crate::config::DisplayConfig;
use crate::drivers::range::RangeModel;
use crate::drivers::surface::{draw_on_surface, DrawContext, Frame, LabelStyle, Stroke};
use crate::drivers::ScopeError;
const TICK_LENGTH: f32 = 4.0;
const LABEL_GAP: f32 = 2.0;
/// Rough advance of one glyph relative to the font size, used to keep labels
/// inside the strip.
const GLYPH_ASPECT: f32 = 0.6;
/// One labelled tick; `position` is in pixels along the axis.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisTick {
    pub position: f32,
    pub value: f32,
    pub label: String,
}
/// Formats with at most two decimals and no trailing zeros.
pub fn format_label(value: f32) -> String {
    let text = format!("{value:.2}");
    let text = if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text.as_str()
    };
    if text == "-0" {
        "0".to_owned()
    } else {
        text.to_owned()
    }
}
/// Tick marks and value labels for the frequency (x) and magnitude (y) strips.
pub struct AxisLabelRenderer {
    plot_width: u32,
    plot_height: u32,
    x_axis_height: u32,
    y_axis_width: u32,
    horizontal_lines: u32,
    vertical_lines: u32,
    background: RGBColor,
    tick: Stroke,
    label: LabelStyle,
}
impl AxisLabelRenderer {
    pub fn new(display: &DisplayConfig) -> Self {
        Self {
            plot_width: display.spectrum_width,
            plot_height: display.spectrum_height,
            x_axis_height: display.x_axis_height,
            y_axis_width: display.y_axis_width,
            horizontal_lines: display.horizontal_lines,
            vertical_lines: display.vertical_lines,
            background: RGBColor(0, 0, 0),
            tick: Stroke::new(RGBColor(255, 235, 205), 1),
            label: LabelStyle {
                family: "sans-serif",
                size: display.label_font_size,
                color: RGBColor(230, 230, 230),
            },
        }
    }
    /// One tick per vertical grid line plus a closing tick at `frequency_max`.
    pub fn x_ticks(&self, range: &RangeModel) -> Vec<AxisTick> {
        ticks(
            self.plot_width as f32,
            self.vertical_lines,
            range.frequency_min(),
            range.frequency_range(),
            range.frequency_max(),
        )
    }
    /// One tick per horizontal grid line plus a closing tick at `magnitude_max`.
    /// Positions count upward from the bottom of the strip.
    pub fn y_ticks(&self, range: &RangeModel) -> Vec<AxisTick> {
        ticks(
            self.plot_height as f32,
            self.horizontal_lines,
            range.magnitude_min(),
            range.magnitude_range(),
            range.magnitude_max(),
        )
    }
    pub fn render_x_axis(&self, range: &RangeModel) -> Result<Frame, ScopeError> {
        draw_on_surface(self.plot_width, self.x_axis_height, |canvas| {
            self.draw_x_axis(canvas, range)
        })
    }
    pub fn render_y_axis(&self, range: &RangeModel) -> Result<Frame, ScopeError> {
        draw_on_surface(self.y_axis_width, self.plot_height, |canvas| {
            self.draw_y_axis(canvas, range)
        })
    }
    pub fn draw_x_axis<C: DrawContext + ?Sized>(
        &self,
        ctx: &mut C,
        range: &RangeModel,
    ) -> Result<(), ScopeError> {
        ctx.clear(self.background)?;
        let width = self.plot_width as f32;
        for tick in self.x_ticks(range) {
            let x = tick.position;
            ctx.draw_line((x, 0.0), (x, TICK_LENGTH), self.tick)?;
            let text_width = self.text_width(&tick.label);
            let left = (x + LABEL_GAP).min(width - text_width).max(0.0);
            ctx.draw_text(&tick.label, (left, TICK_LENGTH + LABEL_GAP), &self.label)?;
        }
        Ok(())
    }
    /// Draws upward from the bottom of the strip, ticks on the right edge
    /// facing the plot.
    pub fn draw_y_axis<C: DrawContext + ?Sized>(
        &self,
        ctx: &mut C,
        range: &RangeModel,
    ) -> Result<(), ScopeError> {
        ctx.clear(self.background)?;
        let width = self.y_axis_width as f32;
        let height = self.plot_height as f32;
        let font = self.label.size as f32;
        ctx.translate(0.0, height);
        for tick in self.y_ticks(range) {
            let y = -tick.position;
            ctx.draw_line((width - TICK_LENGTH, y), (width, y), self.tick)?;
            let top = (y - font / 2.0).max(-height).min(-font);
            ctx.draw_text(&tick.label, (LABEL_GAP, top), &self.label)?;
        }
        Ok(())
    }
    fn text_width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.label.size as f32 * GLYPH_ASPECT
    }
}
fn ticks(length: f32, lines: u32, min: f32, range: f32, max: f32) -> Vec<AxisTick> {
    let mut out: Vec<AxisTick> = (0..lines)
        .map(|i| {
            let value = min + i as f32 * range / lines as f32;
            AxisTick {
                position: i as f32 * length / lines as f32,
                value,
                label: format_label(value),
            }
        })
        .collect();
    out.push(AxisTick {
        position: length,
        value: max,
        label: format_label(max),
    });
    out
}
