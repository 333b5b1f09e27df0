//! TUI 仪表盘模块

mod app;
mod event;
mod ui;

pub use app::{init_terminal, restore_terminal, run, App, AppResult, Tui};
pub use event::{handle_key, poll_event, TuiEvent};
pub use ui::render;
