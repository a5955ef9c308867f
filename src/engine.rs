// src/engine.rs
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use log::{error, info};
use spectrum_scope::drivers::{Frame, FrameSink, OutputSlot, ScopeError, ScopeSession};
use spectrum_scope::ScopeConfig;
use crate::types::*;

// 未启动定时器时，等待命令的最长时间
const IDLE_WAIT: Duration = Duration::from_millis(100);

/// Periodic deadline. `poll` reports a due tick and schedules the next one.
#[derive(Debug)]
pub struct TickTimer {
    interval: Duration,
    next_due: Option<Instant>,
}

impl TickTimer {
    pub fn new(interval: Duration) -> Self {
        Self { interval, next_due: None }
    }

    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.interval);
    }

    pub fn stop(&mut self) {
        self.next_due = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                // 落后超过一个周期时直接丢帧，不补画
                let mut next = due + self.interval;
                if next <= now {
                    next = now + self.interval;
                }
                self.next_due = Some(next);
                true
            }
            _ => false,
        }
    }

    pub fn until_due(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }
}

struct ChannelSink {
    tx: Sender<DisplayMessage>,
}

impl FrameSink for ChannelSink {
    fn publish(&mut self, slot: OutputSlot, frame: Frame) {
        self.tx.send(DisplayMessage::Frame(slot, frame)).ok();
    }

    fn render_failed(&mut self, slot: OutputSlot, error: &ScopeError) {
        self.tx.send(DisplayMessage::RenderFailed(slot, error.to_string())).ok();
    }
}

pub fn spawn_thread(
    tx: Sender<DisplayMessage>,
    rx_cmd: Receiver<GuiCommand>,
    config: ScopeConfig,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut timer = TickTimer::new(config.tick_interval());
        let sink = ChannelSink { tx: tx.clone() };
        let mut session = match ScopeSession::new(config, sink) {
            Ok(session) => session,
            Err(err) => {
                error!("failed to create scope session: {err}");
                tx.send(DisplayMessage::Log(format!("❌ {err}"))).ok();
                return;
            }
        };
        tx.send(DisplayMessage::Log("⚙️ Scope engine ready.".to_owned())).ok();

        loop {
            // ============================================================
            // 1. 命令处理：先应用缩放等命令，再执行到期的刷新
            // ============================================================
            let wait = timer.until_due(Instant::now()).unwrap_or(IDLE_WAIT);
            match rx_cmd.recv_timeout(wait) {
                Ok(cmd) => {
                    if !apply_command(cmd, &mut session, &mut timer, &tx) {
                        break;
                    }
                    while let Ok(cmd) = rx_cmd.try_recv() {
                        if !apply_command(cmd, &mut session, &mut timer, &tx) {
                            info!("scope engine shutting down");
                            return;
                        }
                    }
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }

            // ============================================================
            // 2. 定时刷新
            // ============================================================
            if timer.poll(Instant::now()) {
                session.tick();
            }
        }
        info!("scope engine shutting down");
    })
}

// 返回 false 表示线程应退出
fn apply_command<S: FrameSink>(
    cmd: GuiCommand,
    session: &mut ScopeSession<S>,
    timer: &mut TickTimer,
    tx: &Sender<DisplayMessage>,
) -> bool {
    match cmd {
        GuiCommand::StartDrawing => {
            if !timer.is_running() {
                session.start();
                timer.start(Instant::now());
                tx.send(DisplayMessage::Ticking(true)).ok();
                tx.send(DisplayMessage::Log("🌊 Drawing started".to_owned())).ok();
            }
        }
        GuiCommand::StopDrawing => {
            session.stop();
            timer.stop();
            tx.send(DisplayMessage::Ticking(false)).ok();
            tx.send(DisplayMessage::Log("🛑 Drawing stopped".to_owned())).ok();
        }
        GuiCommand::SetZoom(level) => {
            let window = session.on_zoom_changed(level);
            if window.level != level {
                tx.send(DisplayMessage::Log(format!(
                    "Zoom {level} refused, staying at {}",
                    window.level
                )))
                .ok();
            }
            tx.send(DisplayMessage::ZoomApplied(window.level)).ok();
        }
        GuiCommand::Shutdown => return false,
    }
    true
}
