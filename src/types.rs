// src/types.rs
use spectrum_scope::drivers::{Frame, OutputSlot};

// 界面发给后台的命令
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuiCommand {
    StartDrawing,
    StopDrawing,
    SetZoom(u32),
    Shutdown,
}

// 后台发给界面的消息
#[derive(Clone, Debug)]
pub enum DisplayMessage {
    Log(String),
    Ticking(bool),           // 定时刷新状态
    Frame(OutputSlot, Frame), // 新图像
    ZoomApplied(u32),        // 实际生效的缩放级别
    RenderFailed(OutputSlot, String),
}
