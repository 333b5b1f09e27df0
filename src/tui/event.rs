//! 事件处理模块

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;
use anyhow::Result;

use crate::tui::App;

/// TUI 事件
#[derive(Debug)]
pub enum TuiEvent {
    Key(KeyEvent),
    Tick,
}

/// 轮询事件，超时当作一次 tick
pub fn poll_event(timeout: Duration) -> Result<TuiEvent> {
    if event::poll(timeout)? {
        if let Event::Key(key) = event::read()? {
            return Ok(TuiEvent::Key(key));
        }
    }
    Ok(TuiEvent::Tick)
}

/// 处理按键事件
pub fn handle_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),
        // 弹窗打开时 Esc/Enter 关闭它
        KeyCode::Esc | KeyCode::Enter => app.dismiss_ack(),
        _ => {}
    }
}
