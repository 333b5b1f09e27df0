//! TUI 应用状态和主循环

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Local};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::sync::mpsc;

use crate::projection::StatusReader;
use crate::sink::Acknowledgment;
use crate::tui::event::{handle_key, poll_event, TuiEvent};
use crate::tui::ui;

pub type AppResult<T> = Result<T>;
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// TUI 应用状态
pub struct App {
    /// 是否退出
    pub should_quit: bool,
    /// 当前状态投影
    pub status: String,
    /// 待关闭的回执弹窗
    pub ack: Option<Acknowledgment>,
    /// 最近一次状态变更时间
    pub last_update: Option<DateTime<Local>>,
    reader: StatusReader,
    ack_rx: mpsc::UnboundedReceiver<Acknowledgment>,
}

impl App {
    pub fn new(reader: StatusReader, ack_rx: mpsc::UnboundedReceiver<Acknowledgment>) -> Self {
        let status = reader.current();
        Self {
            should_quit: false,
            status,
            ack: None,
            last_update: None,
            reader,
            ack_rx,
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// 关闭当前弹窗
    pub fn dismiss_ack(&mut self) {
        self.ack = None;
    }

    /// 每个 tick 同步一次显示数据
    ///
    /// 状态读取最新投影（中间值被覆盖属预期），回执排空队列只留最后一条。
    pub fn on_tick(&mut self) {
        let current = self.reader.current();
        if current != self.status {
            self.status = current;
            self.last_update = Some(Local::now());
        }

        while let Ok(ack) = self.ack_rx.try_recv() {
            self.ack = Some(ack);
        }
    }
}

/// 初始化终端（raw mode + 备用屏幕）
pub fn init_terminal() -> AppResult<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    Ok(terminal)
}

/// 恢复终端
pub fn restore_terminal(terminal: &mut Tui) -> AppResult<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// 运行 TUI 主循环直到退出
pub fn run(app: &mut App, tick: Duration) -> AppResult<()> {
    let mut terminal = init_terminal()?;
    let result = run_loop(&mut terminal, app, tick);
    restore_terminal(&mut terminal)?;
    result
}

fn run_loop(terminal: &mut Tui, app: &mut App, tick: Duration) -> AppResult<()> {
    while !app.should_quit {
        app.on_tick();
        terminal.draw(|frame| ui::render(app, frame))?;

        match poll_event(tick)? {
            TuiEvent::Key(key) => handle_key(app, key),
            TuiEvent::Tick => {}
        }
    }
    Ok(())
}
