//! TUI 渲染模块

use crate::tui::App;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

/// 弹窗占屏宽百分比
const POPUP_WIDTH_PERCENT: u16 = 60;
/// 弹窗占屏高百分比
const POPUP_HEIGHT_PERCENT: u16 = 25;

/// 渲染主界面
pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();

    // 垂直分割: 标题栏 | 状态区 | 底部栏
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // 标题栏
            Constraint::Min(3),    // 状态区
            Constraint::Length(1), // 快捷键栏
        ])
        .split(area);

    // 标题栏
    let updated = app
        .last_update
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "--:--:--".to_string());
    let title = format!(" PNM 通知监控 │ 最近更新: {}", updated);
    let title_bar = Paragraph::new(title).style(Style::default().bg(Color::Blue).fg(Color::White));
    frame.render_widget(title_bar, vertical[0]);

    // 状态区：唯一的投影文本
    let status = Paragraph::new(app.status.clone())
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(" 当前状态 "));
    frame.render_widget(status, vertical[1]);

    // 底部栏
    let help = if app.ack.is_some() {
        " [Esc/Enter] 关闭弹窗  [q] 退出 "
    } else {
        " [q] 退出 "
    };
    let help_bar = Paragraph::new(help).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(help_bar, vertical[2]);

    // 回执弹窗
    if let Some(ack) = &app.ack {
        render_ack_popup(frame, area, &ack.title, &ack.body);
    }
}

/// 渲染居中的回执弹窗
fn render_ack_popup(frame: &mut Frame, area: Rect, title: &str, body: &str) {
    let popup_area = centered_rect(POPUP_WIDTH_PERCENT, POPUP_HEIGHT_PERCENT, area);

    frame.render_widget(Clear, popup_area);
    let popup = Paragraph::new(body.to_string())
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", title))
                .border_style(Style::default().fg(Color::Yellow)),
        );
    frame.render_widget(popup, popup_area);
}

/// 按百分比取屏幕中央区域
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
