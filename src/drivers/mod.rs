// src/drivers/mod.rs
pub mod axis;
pub mod error;
pub mod gradient;
pub mod range;
pub mod resample;
pub mod sample;
pub mod session;
pub mod spectrum;
pub mod surface;
pub mod synth;
pub mod waterfall;
pub use axis::{format_label, AxisLabelRenderer, AxisTick};
pub use error::ScopeError;
pub use gradient::{ColorGradient, GradientStop};
pub use range::{RangeModel, ZoomWindow};
pub use resample::nearest_neighbor;
pub use sample::{NormalizedSamples, Sample, SampleSet};
pub use session::{FrameSink, OutputSlot, OutputSlots, ScopeSession, TickReport};
pub use spectrum::{SpectrumRenderer, SpectrumStyle};
pub use surface::{draw_on_surface, DrawContext, Frame, LabelStyle, PixelView, Point, Stroke};
pub use synth::SignalSynthesizer;
pub use waterfall::{RowUpdate, WaterfallHistory, WaterfallRenderer};
