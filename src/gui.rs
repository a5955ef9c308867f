// src/gui.rs
use std::collections::HashMap;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::time::Duration;
use eframe::egui;
use egui::load::SizedTexture;
use egui::{Color32, ColorImage, TextureHandle, TextureOptions};
use spectrum_scope::drivers::{Frame, OutputSlot, RangeModel};
use spectrum_scope::ScopeConfig;
use crate::engine;
use crate::types::*;

pub struct ScopeApp {
    // 状态
    is_ticking: bool,
    zoom_level: u32,
    max_zoom: u32,
    tick_interval: Duration,
    y_axis_width: f32,

    // 四张输出图像
    textures: HashMap<OutputSlot, TextureHandle>,

    // 界面日志
    log_messages: Vec<String>,

    // 通讯管道
    rx: Receiver<DisplayMessage>,
    tx_cmd: Sender<GuiCommand>,
}

impl ScopeApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: ScopeConfig) -> Self {
        let mut visuals = egui::Visuals::dark();
        visuals.widgets.noninteractive.bg_fill = Color32::from_rgb(10, 10, 15);
        cc.egui_ctx.set_visuals(visuals);

        let max_zoom = RangeModel::from_config(&config).max_zoom_level();
        let zoom_level = config.initial_zoom;
        let tick_interval = config.tick_interval();
        let y_axis_width = config.display.y_axis_width as f32;

        let (tx, rx) = channel();
        let (tx_cmd, rx_cmd) = channel();
        // 启动后台引擎
        engine::spawn_thread(tx, rx_cmd, config);

        Self {
            is_ticking: false,
            zoom_level,
            max_zoom,
            tick_interval,
            y_axis_width,
            textures: HashMap::new(),
            log_messages: vec!["Spectrum Scope ready.".to_owned()],
            rx,
            tx_cmd,
        }
    }

    fn log(&mut self, msg: &str) {
        self.log_messages.push(format!("> {}", msg));
        if self.log_messages.len() > 8 {
            self.log_messages.remove(0);
        }
    }

    fn upload(&mut self, ctx: &egui::Context, slot: OutputSlot, frame: &Frame) {
        let size = [frame.width() as usize, frame.height() as usize];
        let image = ColorImage::from_rgb(size, frame.as_raw());
        match self.textures.get_mut(&slot) {
            Some(texture) => texture.set(image, TextureOptions::NEAREST),
            None => {
                let texture = ctx.load_texture(format!("{slot:?}"), image, TextureOptions::NEAREST);
                self.textures.insert(slot, texture);
            }
        }
    }

    fn show_slot(&self, ui: &mut egui::Ui, slot: OutputSlot) {
        if let Some(texture) = self.textures.get(&slot) {
            ui.image(SizedTexture::new(texture.id(), texture.size_vec2()));
        }
    }
}

impl eframe::App for ScopeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // 1. 消息处理
        while let Ok(msg) = self.rx.try_recv() {
            match msg {
                DisplayMessage::Log(s) => self.log(&s),
                DisplayMessage::Ticking(b) => self.is_ticking = b,
                DisplayMessage::Frame(slot, frame) => self.upload(ctx, slot, &frame),
                DisplayMessage::ZoomApplied(level) => self.zoom_level = level,
                DisplayMessage::RenderFailed(slot, err) => {
                    self.log(&format!("{slot:?} render failed: {err}"))
                }
            }
        }
        // 后台以固定周期出图，界面按同一周期轮询
        ctx.request_repaint_after(self.tick_interval);

        // 2. 控制面板
        egui::SidePanel::left("controls").min_width(220.0).show(ctx, |ui| {
            ui.add_space(10.0);
            ui.heading("Spectrum Scope");
            ui.label("Synthetic RF sweep");
            ui.separator();

            let btn_txt = if self.is_ticking { "STOP" } else { "START" };
            if ui.button(btn_txt).clicked() {
                let cmd = if self.is_ticking {
                    GuiCommand::StopDrawing
                } else {
                    GuiCommand::StartDrawing
                };
                self.tx_cmd.send(cmd).ok();
            }

            ui.add_space(10.0);
            let slider = egui::Slider::new(&mut self.zoom_level, 0..=self.max_zoom).text("Zoom");
            if ui.add(slider).changed() {
                self.tx_cmd.send(GuiCommand::SetZoom(self.zoom_level)).ok();
            }

            ui.add_space(20.0);
            ui.separator();
            egui::ScrollArea::vertical().max_height(160.0).show(ui, |ui| {
                for m in &self.log_messages {
                    ui.monospace(m);
                }
            });
        });

        // 3. 图像区域：y 轴 | 频谱，下方 x 轴，再下方瀑布图
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.spacing_mut().item_spacing = egui::vec2(0.0, 0.0);
            ui.horizontal(|ui| {
                self.show_slot(ui, OutputSlot::YAxis);
                self.show_slot(ui, OutputSlot::Spectrum);
            });
            ui.horizontal(|ui| {
                ui.add_space(self.y_axis_width);
                self.show_slot(ui, OutputSlot::XAxis);
            });
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.add_space(self.y_axis_width);
                self.show_slot(ui, OutputSlot::Waterfall);
            });
        });
    }
}

impl Drop for ScopeApp {
    fn drop(&mut self) {
        self.tx_cmd.send(GuiCommand::Shutdown).ok();
    }
}
