//! 显示接收端 trait 定义
//!
//! 路由器不关心投影最终显示在哪里：终端、TUI 仪表盘或测试桩
//! 都实现 [`DisplaySink`]。状态更新覆盖旧值，回执弹窗发射后即忘，
//! 两者都不会阻塞路由线程。

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::warn;

use crate::projection::StatusCell;

/// 一次性回执弹窗
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Acknowledgment {
    /// 弹窗标题
    pub title: String,
    /// 弹窗正文
    pub body: String,
}

impl Acknowledgment {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// 显示接收端 trait
pub trait DisplaySink: Send + Sync {
    /// 接收端名称（用于日志）
    fn name(&self) -> &str;

    /// 用新投影覆盖状态显示
    fn update_status(&self, projection: &str);

    /// 弹出一次性回执，发射后即忘
    fn show_ack(&self, ack: Acknowledgment);
}

/// 终端接收端（纯文本模式）
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl DisplaySink for ConsoleSink {
    fn name(&self) -> &str {
        "console"
    }

    fn update_status(&self, projection: &str) {
        println!("[状态] {}", projection);
    }

    fn show_ack(&self, ack: Acknowledgment) {
        println!("[弹窗] {}: {}", ack.title, ack.body);
    }
}

/// TUI 通道接收端
///
/// 状态写入 [`StatusCell`]，回执经无界通道送往界面。
/// 界面退出后通道关闭，后续回执丢弃并记一条警告。
pub struct ChannelSink {
    cell: StatusCell,
    ack_tx: mpsc::UnboundedSender<Acknowledgment>,
}

impl ChannelSink {
    pub fn new(cell: StatusCell, ack_tx: mpsc::UnboundedSender<Acknowledgment>) -> Self {
        Self { cell, ack_tx }
    }
}

impl DisplaySink for ChannelSink {
    fn name(&self) -> &str {
        "channel"
    }

    fn update_status(&self, projection: &str) {
        self.cell.update(projection);
    }

    fn show_ack(&self, ack: Acknowledgment) {
        if self.ack_tx.send(ack).is_err() {
            warn!(sink = "channel", "ack receiver closed, popup dropped");
        }
    }
}
