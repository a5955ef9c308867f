use plotters::style::RGBColor;
/// Packs a colour as `0x00RRGGBB`.
pub fn pack_rgb(color: RGBColor) -> u32 {
    let RGBColor(r, g, b) = color;
    (r as u32) << 16 | (g as u32) << 8 | b as u32
}
pub fn unpack_rgb(pixel: u32) -> RGBColor {
    RGBColor((pixel >> 16) as u8, (pixel >> 8) as u8, pixel as u8)
}
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    pub position: f64,
    pub color: RGBColor,
}
/// Piecewise-linear colour ramp. Offsets outside the first/last stop clamp to
/// the end colours.
#[derive(Clone, Debug)]
pub struct ColorGradient {
    stops: Vec<GradientStop>,
}
impl ColorGradient {
    /// Stops are sorted by position; an empty list renders black.
    pub fn new(mut stops: Vec<GradientStop>) -> Self {
        stops.sort_by(|a, b| a.position.total_cmp(&b.position));
        Self { stops }
    }
    /// Blue at 0 through cyan, green and yellow to red at 1.
    pub fn heat() -> Self {
        Self::new(vec![
            GradientStop {
                position: 0.0,
                color: RGBColor(0, 0, 255),
            },
            GradientStop {
                position: 0.25,
                color: RGBColor(0, 255, 255),
            },
            GradientStop {
                position: 0.5,
                color: RGBColor(0, 255, 0),
            },
            GradientStop {
                position: 0.75,
                color: RGBColor(255, 255, 0),
            },
            GradientStop {
                position: 1.0,
                color: RGBColor(255, 0, 0),
            },
        ])
    }
    pub fn stops(&self) -> &[GradientStop] {
        &self.stops
    }
    pub fn color_at(&self, offset: f64) -> RGBColor {
        let (first, last) = match (self.stops.first(), self.stops.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return RGBColor(0, 0, 0),
        };
        // NaN falls through to the first stop.
        if !(offset > first.position) {
            return first.color;
        }
        if offset >= last.position {
            return last.color;
        }
        let upper = self
            .stops
            .iter()
            .position(|stop| stop.position >= offset)
            .unwrap_or(self.stops.len() - 1);
        let lo = &self.stops[upper.saturating_sub(1)];
        let hi = &self.stops[upper];
        let span = hi.position - lo.position;
        if span <= f64::EPSILON {
            return hi.color;
        }
        let t = (offset - lo.position) / span;
        RGBColor(
            lerp_channel(lo.color.0, hi.color.0, t),
            lerp_channel(lo.color.1, hi.color.1, t),
            lerp_channel(lo.color.2, hi.color.2, t),
        )
    }
    pub fn packed_at(&self, offset: f64) -> u32 {
        pack_rgb(self.color_at(offset))
    }
}
fn lerp_channel(from: u8, to: u8, t: f64) -> u8 {
    (from as f64 + (to as f64 - from as f64) * t).round() as u8
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn stops_map_exactly() {
        let gradient = ColorGradient::heat();
        assert_eq!(gradient.color_at(0.0), RGBColor(0, 0, 255));
        assert_eq!(gradient.color_at(0.25), RGBColor(0, 255, 255));
        assert_eq!(gradient.color_at(0.5), RGBColor(0, 255, 0));
        assert_eq!(gradient.color_at(0.75), RGBColor(255, 255, 0));
        assert_eq!(gradient.color_at(1.0), RGBColor(255, 0, 0));
    }
    #[test]
    fn interpolates_between_stops() {
        let gradient = ColorGradient::heat();
        assert_eq!(gradient.color_at(0.125), RGBColor(0, 128, 255));
        assert_eq!(gradient.color_at(0.875), RGBColor(255, 128, 0));
    }
    #[test]
    fn clamps_outside_unit_range() {
        let gradient = ColorGradient::heat();
        assert_eq!(gradient.color_at(-0.3), RGBColor(0, 0, 255));
        assert_eq!(gradient.color_at(1.7), RGBColor(255, 0, 0));
        assert_eq!(gradient.color_at(f64::NAN), RGBColor(0, 0, 255));
        assert_eq!(ColorGradient::new(Vec::new()).color_at(0.5), RGBColor(0, 0, 0));
    }
    #[test]
    fn packing_round_trips_channels() {
        let packed = pack_rgb(RGBColor(0x12, 0x34, 0x56));
        assert_eq!(packed, 0x0012_3456);
        assert_eq!(unpack_rgb(packed), RGBColor(0x12, 0x34, 0x56));
    }
}
