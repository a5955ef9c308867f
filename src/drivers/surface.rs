use image::RgbImage;
use plotters::coord::Shift;
use plotters::element::BitMapElement;
use plotters::prelude::*;
use crate::drivers::error::ScopeError;
use crate::drivers::gradient::unpack_rgb;
pub type Point = (f32, f32);
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub color: RGBColor,
    pub width: u32,
}
impl Stroke {
    pub fn new(color: RGBColor, width: u32) -> Self {
        Self { color, width }
    }
}
#[derive(Clone, Debug, PartialEq)]
pub struct LabelStyle {
    pub family: &'static str,
    pub size: u32,
    pub color: RGBColor,
}
/// Borrowed row-major raster of packed `0x00RRGGBB` pixels.
#[derive(Clone, Copy, Debug)]
pub struct PixelView<'a> {
    pub width: u32,
    pub height: u32,
    pub pixels: &'a [u32],
}
/// Drawing operations the renderers need from a pixel surface.
///
/// Coordinates are in pixels relative to the current origin, which starts at
/// the top-left corner and moves with `translate`.
pub trait DrawContext {
    fn size(&self) -> (u32, u32);
    fn clear(&mut self, color: RGBColor) -> Result<(), ScopeError>;
    fn translate(&mut self, dx: f32, dy: f32);
    fn draw_line(&mut self, from: Point, to: Point, stroke: Stroke) -> Result<(), ScopeError>;
    fn draw_path(&mut self, points: &[Point], stroke: Stroke) -> Result<(), ScopeError>;
    fn draw_circle(&mut self, center: Point, radius: f32, stroke: Stroke)
        -> Result<(), ScopeError>;
    /// `at` is the top-left corner of the text box.
    fn draw_text(&mut self, text: &str, at: Point, style: &LabelStyle) -> Result<(), ScopeError>;
    fn draw_pixels(&mut self, raster: PixelView<'_>) -> Result<(), ScopeError>;
}
/// Finished image of one render pass.
#[derive(Clone, Debug)]
pub struct Frame {
    image: RgbImage,
}
impl Frame {
    pub fn width(&self) -> u32 {
        self.image.width()
    }
    pub fn height(&self) -> u32 {
        self.image.height()
    }
    /// Row-major RGB8 bytes.
    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }
    pub fn pixel(&self, x: u32, y: u32) -> RGBColor {
        let [r, g, b] = self.image.get_pixel(x, y).0;
        RGBColor(r, g, b)
    }
    pub fn into_image(self) -> RgbImage {
        self.image
    }
}
/// `DrawContext` over a plotters bitmap backend.
pub struct PlotCanvas<'a> {
    area: DrawingArea<BitMapBackend<'a>, Shift>,
    size: (u32, u32),
    origin: Point,
}
impl<'a> PlotCanvas<'a> {
    fn new(area: DrawingArea<BitMapBackend<'a>, Shift>, size: (u32, u32)) -> Self {
        Self {
            area,
            size,
            origin: (0.0, 0.0),
        }
    }
    fn to_backend(&self, (x, y): Point) -> (i32, i32) {
        (
            (x + self.origin.0).round() as i32,
            (y + self.origin.1).round() as i32,
        )
    }
    fn present(&self) -> Result<(), ScopeError> {
        self.area.present()?;
        Ok(())
    }
}
impl DrawContext for PlotCanvas<'_> {
    fn size(&self) -> (u32, u32) {
        self.size
    }
    fn clear(&mut self, color: RGBColor) -> Result<(), ScopeError> {
        self.area.fill(&color)?;
        Ok(())
    }
    fn translate(&mut self, dx: f32, dy: f32) {
        self.origin = (self.origin.0 + dx, self.origin.1 + dy);
    }
    fn draw_line(&mut self, from: Point, to: Point, stroke: Stroke) -> Result<(), ScopeError> {
        let points = vec![self.to_backend(from), self.to_backend(to)];
        self.area.draw(&PathElement::new(
            points,
            stroke.color.stroke_width(stroke.width),
        ))?;
        Ok(())
    }
    fn draw_path(&mut self, points: &[Point], stroke: Stroke) -> Result<(), ScopeError> {
        if points.len() < 2 {
            return Ok(());
        }
        let points: Vec<(i32, i32)> = points.iter().map(|p| self.to_backend(*p)).collect();
        self.area.draw(&PathElement::new(
            points,
            stroke.color.stroke_width(stroke.width),
        ))?;
        Ok(())
    }
    fn draw_circle(
        &mut self,
        center: Point,
        radius: f32,
        stroke: Stroke,
    ) -> Result<(), ScopeError> {
        let radius = radius.max(0.0).round() as u32;
        self.area.draw(&Circle::new(
            self.to_backend(center),
            radius,
            stroke.color.stroke_width(stroke.width),
        ))?;
        Ok(())
    }
    fn draw_text(&mut self, text: &str, at: Point, style: &LabelStyle) -> Result<(), ScopeError> {
        let font = (style.family, style.size as f64)
            .into_font()
            .color(&style.color);
        self.area
            .draw(&Text::new(text.to_owned(), self.to_backend(at), font))?;
        Ok(())
    }
    fn draw_pixels(&mut self, raster: PixelView<'_>) -> Result<(), ScopeError> {
        let expected = raster.width as usize * raster.height as usize;
        if raster.pixels.len() < expected {
            return Err(ScopeError::DegenerateInput(format!(
                "raster of {}x{} needs {expected} pixels, got {}",
                raster.width,
                raster.height,
                raster.pixels.len()
            )));
        }
        let mut rgb = Vec::with_capacity(expected * 3);
        for &pixel in &raster.pixels[..expected] {
            let RGBColor(r, g, b) = unpack_rgb(pixel);
            rgb.extend_from_slice(&[r, g, b]);
        }
        let origin = self.to_backend((0.0, 0.0));
        let bitmap: BitMapElement<'_, _> =
            BitMapElement::with_owned_buffer(origin, (raster.width, raster.height), rgb)
                .ok_or_else(|| ScopeError::Surface("raster buffer size mismatch".to_owned()))?;
        // 整块拷贝，避免逐像素调用后端
        self.area.draw(&bitmap)?;
        Ok(())
    }
}
/// Allocates a `width` x `height` frame, lets `draw` paint it and hands the
/// finished image back. The backend borrow ends with the inner scope on every
/// path, including early returns from `draw`.
pub fn draw_on_surface<F>(width: u32, height: u32, draw: F) -> Result<Frame, ScopeError>
where
    F: FnOnce(&mut PlotCanvas<'_>) -> Result<(), ScopeError>,
{
    if width == 0 || height == 0 {
        return Err(ScopeError::Surface(format!(
            "cannot allocate a {width}x{height} surface"
        )));
    }
    let mut image = RgbImage::new(width, height);
    {
        let root = BitMapBackend::with_buffer(&mut image, (width, height)).into_drawing_area();
        let mut canvas = PlotCanvas::new(root, (width, height));
        draw(&mut canvas)?;
        canvas.present()?;
    }
    Ok(Frame { image })
}
#[cfg(test)]
pub(crate) mod recording {
    use super::*;
    #[derive(Clone, Debug, PartialEq)]
    pub enum DrawOp {
        Clear(RGBColor),
        Line(Point, Point, Stroke),
        Path(Vec<Point>, Stroke),
        Circle(Point, f32, Stroke),
        Text(String, Point),
        Pixels { width: u32, height: u32 },
    }
    /// Records operations in absolute (translated) coordinates.
    pub struct RecordingContext {
        pub size: (u32, u32),
        pub origin: Point,
        pub ops: Vec<DrawOp>,
    }
    impl RecordingContext {
        pub fn new(width: u32, height: u32) -> Self {
            Self {
                size: (width, height),
                origin: (0.0, 0.0),
                ops: Vec::new(),
            }
        }
        fn abs(&self, (x, y): Point) -> Point {
            (x + self.origin.0, y + self.origin.1)
        }
        pub fn lines(&self) -> Vec<(Point, Point)> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    DrawOp::Line(a, b, _) => Some((*a, *b)),
                    _ => None,
                })
                .collect()
        }
        pub fn texts(&self) -> Vec<(String, Point)> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    DrawOp::Text(text, at) => Some((text.clone(), *at)),
                    _ => None,
                })
                .collect()
        }
    }
    impl DrawContext for RecordingContext {
        fn size(&self) -> (u32, u32) {
            self.size
        }
        fn clear(&mut self, color: RGBColor) -> Result<(), ScopeError> {
            self.ops.push(DrawOp::Clear(color));
            Ok(())
        }
        fn translate(&mut self, dx: f32, dy: f32) {
            self.origin = (self.origin.0 + dx, self.origin.1 + dy);
        }
        fn draw_line(&mut self, from: Point, to: Point, stroke: Stroke) -> Result<(), ScopeError> {
            let op = DrawOp::Line(self.abs(from), self.abs(to), stroke);
            self.ops.push(op);
            Ok(())
        }
        fn draw_path(&mut self, points: &[Point], stroke: Stroke) -> Result<(), ScopeError> {
            let points = points.iter().map(|p| self.abs(*p)).collect();
            self.ops.push(DrawOp::Path(points, stroke));
            Ok(())
        }
        fn draw_circle(
            &mut self,
            center: Point,
            radius: f32,
            stroke: Stroke,
        ) -> Result<(), ScopeError> {
            let op = DrawOp::Circle(self.abs(center), radius, stroke);
            self.ops.push(op);
            Ok(())
        }
        fn draw_text(
            &mut self,
            text: &str,
            at: Point,
            _style: &LabelStyle,
        ) -> Result<(), ScopeError> {
            let op = DrawOp::Text(text.to_owned(), self.abs(at));
            self.ops.push(op);
            Ok(())
        }
        fn draw_pixels(&mut self, raster: PixelView<'_>) -> Result<(), ScopeError> {
            self.ops.push(DrawOp::Pixels {
                width: raster.width,
                height: raster.height,
            });
            Ok(())
        }
    }
}
