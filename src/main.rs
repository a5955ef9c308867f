// src/main.rs
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
mod engine;
mod gui;
mod types;
use anyhow::{anyhow, Context};
use eframe::egui;
use log::info;
use spectrum_scope::ScopeConfig;
// 配置文件路径通过环境变量指定，未设置时使用默认配置
const CONFIG_ENV: &str = "SCOPE_CONFIG";
fn load_config() -> anyhow::Result<ScopeConfig> {
    match std::env::var_os(CONFIG_ENV) {
        Some(path) => {
            info!("loading config from {:?}", path);
            ScopeConfig::load(&path).with_context(|| format!("{CONFIG_ENV}={path:?}"))
        }
        None => Ok(ScopeConfig::default()),
    }
}
// 入口函数
fn main() -> anyhow::Result<()> {
    env_logger::init();
    let config = load_config()?;
    config.validate()?;
    let width = (config.display.y_axis_width + config.display.spectrum_width) as f32 + 260.0;
    let height = (config.display.spectrum_height
        + config.display.x_axis_height
        + config.display.waterfall_height) as f32
        + 40.0;
    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([width, height])
        .with_title("Spectrum Scope");
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    eframe::run_native(
        "Spectrum Scope",
        options,
        Box::new(move |cc| Box::new(gui::ScopeApp::new(cc, config))),
    )
    .map_err(|e| anyhow!("eframe: {e}"))
}
