use std::time::Instant;
use log::{debug, error, info, warn};
use crate::config::ScopeConfig;
use crate::drivers::axis::AxisLabelRenderer;
use crate::drivers::gradient::ColorGradient;
use crate::drivers::range::{RangeModel, ZoomWindow};
use crate::drivers::sample::NormalizedSamples;
use crate::drivers::spectrum::{SpectrumRenderer, SpectrumStyle};
use crate::drivers::surface::Frame;
use crate::drivers::synth::SignalSynthesizer;
use crate::drivers::waterfall::{RowUpdate, WaterfallHistory, WaterfallRenderer};
use crate::drivers::ScopeError;
/// The four images a session produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OutputSlot {
    Spectrum,
    Waterfall,
    XAxis,
    YAxis,
}
impl OutputSlot {
    pub const ALL: [OutputSlot; 4] = [
        OutputSlot::Spectrum,
        OutputSlot::Waterfall,
        OutputSlot::XAxis,
        OutputSlot::YAxis,
    ];
    fn index(self) -> usize {
        match self {
            OutputSlot::Spectrum => 0,
            OutputSlot::Waterfall => 1,
            OutputSlot::XAxis => 2,
            OutputSlot::YAxis => 3,
        }
    }
}
/// Receives every finished image, and every failed render pass.
pub trait FrameSink {
    fn publish(&mut self, slot: OutputSlot, frame: Frame);
    fn render_failed(&mut self, _slot: OutputSlot, _error: &ScopeError) {}
}
#[derive(Clone, Debug, Default)]
struct SlotState {
    frame: Option<Frame>,
    updates: u64,
    failures: u64,
    last_error: Option<String>,
}
/// Latest image per slot, for hosts that poll.
#[derive(Clone, Debug, Default)]
pub struct OutputSlots {
    slots: [SlotState; 4],
}
impl OutputSlots {
    pub fn frame(&self, slot: OutputSlot) -> Option<&Frame> {
        self.slots[slot.index()].frame.as_ref()
    }
    /// Number of images published to `slot` so far.
    pub fn updates(&self, slot: OutputSlot) -> u64 {
        self.slots[slot.index()].updates
    }
    pub fn failures(&self, slot: OutputSlot) -> u64 {
        self.slots[slot.index()].failures
    }
    pub fn last_error(&self, slot: OutputSlot) -> Option<&str> {
        self.slots[slot.index()].last_error.as_deref()
    }
}
impl FrameSink for OutputSlots {
    fn publish(&mut self, slot: OutputSlot, frame: Frame) {
        let state = &mut self.slots[slot.index()];
        state.frame = Some(frame);
        state.updates += 1;
    }
    fn render_failed(&mut self, slot: OutputSlot, error: &ScopeError) {
        let state = &mut self.slots[slot.index()];
        state.failures += 1;
        state.last_error = Some(error.to_string());
    }
}
/// What one synthesis + render pass produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickReport {
    /// `None` when the waterfall pass failed.
    pub row: Option<RowUpdate>,
    pub failed_passes: u32,
}
/// Single owner of the range model, the current samples and the waterfall
/// history. Every mutation goes through `start`, `stop`, `tick` or
/// `on_zoom_changed`, all called from one thread.
pub struct ScopeSession<S: FrameSink> {
    config: ScopeConfig,
    range: RangeModel,
    synth: SignalSynthesizer,
    samples: NormalizedSamples,
    spectrum: SpectrumRenderer,
    waterfall: WaterfallRenderer,
    axis: AxisLabelRenderer,
    ticking: bool,
    sink: S,
}
impl<S: FrameSink> ScopeSession<S> {
    /// Builds the session and draws both axis strips once.
    pub fn new(config: ScopeConfig, sink: S) -> Result<Self, ScopeError> {
        config.validate()?;
        let mut range = RangeModel::from_config(&config);
        if config.initial_zoom > 0 {
            range.set_zoom(config.initial_zoom)?;
        }
        let display = &config.display;
        let mut session = Self {
            synth: SignalSynthesizer::from_seed(config.signal.seed, config.signal.noise_level),
            samples: NormalizedSamples::default(),
            spectrum: SpectrumRenderer::new(display, SpectrumStyle::default()),
            waterfall: WaterfallRenderer::new(
                display.waterfall_width as usize,
                display.waterfall_height as usize,
                ColorGradient::heat(),
            ),
            axis: AxisLabelRenderer::new(display),
            ticking: false,
            range,
            config,
            sink,
        };
        session.render_axes();
        Ok(session)
    }
    pub fn config(&self) -> &ScopeConfig {
        &self.config
    }
    pub fn range(&self) -> &RangeModel {
        &self.range
    }
    pub fn window(&self) -> ZoomWindow {
        self.range.window()
    }
    pub fn samples(&self) -> &NormalizedSamples {
        &self.samples
    }
    pub fn history(&self) -> &WaterfallHistory {
        self.waterfall.history()
    }
    pub fn is_ticking(&self) -> bool {
        self.ticking
    }
    pub fn sink(&self) -> &S {
        &self.sink
    }
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
    /// Renders both graphs right away and arms ticking.
    pub fn start(&mut self) -> TickReport {
        info!("drawing started");
        self.ticking = true;
        self.refresh()
    }
    pub fn stop(&mut self) {
        if self.ticking {
            info!("drawing stopped");
        }
        self.ticking = false;
    }
    /// One timer period: fresh samples, spectrum, waterfall.
    pub fn tick(&mut self) -> TickReport {
        let started = Instant::now();
        let report = self.refresh();
        debug!("tick rendered in {:?}", started.elapsed());
        report
    }
    /// Applies a new zoom level and returns the window in effect afterwards.
    ///
    /// A level that would collapse the window is refused: nothing is redrawn
    /// and the previous window stays. Otherwise the axis strips are redrawn,
    /// and the graphs too while ticking.
    pub fn on_zoom_changed(&mut self, level: u32) -> ZoomWindow {
        match self.range.set_zoom(level) {
            Ok(window) => info!(
                "zoom level {level}: samples {}..{}",
                window.start_index, window.end_index
            ),
            Err(err) => {
                warn!("{err}; keeping level {}", self.range.zoom_level());
                return self.range.window();
            }
        }
        self.render_axes();
        if self.ticking {
            self.refresh();
        }
        self.range.window()
    }
    /// Clears the waterfall history, as when the display is re-created.
    pub fn reset_display(&mut self) {
        self.waterfall.reset();
    }
    fn refresh(&mut self) -> TickReport {
        let raw = self
            .synth
            .generate_set(self.config.signal.data_size, &self.range);
        self.samples = raw.normalize(&self.range);
        let window = self.range.window();
        let mut failed_passes = 0;
        let spectrum = self.spectrum.render(&self.samples, &self.range, &window);
        if !self.deliver(OutputSlot::Spectrum, spectrum) {
            failed_passes += 1;
        }
        let row = match self.waterfall.update(&self.samples, &self.range, &window) {
            Ok(update) => {
                let frame = self.waterfall.render();
                if !self.deliver(OutputSlot::Waterfall, frame) {
                    failed_passes += 1;
                }
                Some(update)
            }
            Err(err) => {
                self.report_failure(OutputSlot::Waterfall, &err);
                failed_passes += 1;
                None
            }
        };
        TickReport { row, failed_passes }
    }
    fn render_axes(&mut self) {
        let x_axis = self.axis.render_x_axis(&self.range);
        self.deliver(OutputSlot::XAxis, x_axis);
        let y_axis = self.axis.render_y_axis(&self.range);
        self.deliver(OutputSlot::YAxis, y_axis);
    }
    fn deliver(&mut self, slot: OutputSlot, result: Result<Frame, ScopeError>) -> bool {
        match result {
            Ok(frame) => {
                self.sink.publish(slot, frame);
                true
            }
            Err(err) => {
                self.report_failure(slot, &err);
                false
            }
        }
    }
    fn report_failure(&mut self, slot: OutputSlot, err: &ScopeError) {
        error!("{slot:?} render failed: {err}");
        self.sink.render_failed(slot, err);
    }
}
