//! 状态文案格式化模块 - 将路由事件渲染为可读文本
//!
//! 主要功能：
//! - 按事件种类套用固定模板，生成单行状态投影
//! - 为需要回执的事件生成一次性弹窗内容
//!
//! 模板是对外契约的一部分：同一事件永远渲染出同一字符串，
//! 缺失字段渲染为空字符串，绝不出现 "undefined" 之类的占位。

use crate::router::event::{EventKind, RouteEvent};
use crate::sink::Acknowledgment;

/// Status line and popup message constants
pub mod msg {
    // 状态前缀（远程消息）
    pub const FCM_FOREGROUND: &str = "FCM Foreground";
    pub const FCM_OPENED_BACKGROUND: &str = "FCM Opened (background)";
    pub const FCM_OPENED_QUIT: &str = "FCM Opened (quit)";

    // 状态前缀（本地交互）
    pub const NOTIFEE_PRESSED: &str = "Notifee Pressed";
    pub const NOTIFEE_DISMISSED: &str = "Notifee Dismissed";
    pub const NOTIFEE_ACTION: &str = "Notifee Action";

    // 权限状态（整句固定）
    pub const PERMISSION_BLOCKED: &str = "Permission Blocked: notifications are disabled";

    // 空回复占位
    pub const NO_REPLY_PLACEHOLDER: &str = "(no reply)";

    // 弹窗标题
    pub const ACK_REPLY_TITLE: &str = "Reply Sent";
    pub const ACK_MARK_READ_TITLE: &str = "Marked as Read";
    pub const ACK_DEFAULT_TITLE: &str = "Default Action";
}

/// 状态投影格式化器
#[derive(Debug, Clone)]
pub struct ProjectionFormatter {
    /// 空回复的占位文本
    reply_placeholder: String,
}

impl ProjectionFormatter {
    /// 创建使用默认占位文本的格式化器
    pub fn new() -> Self {
        Self {
            reply_placeholder: msg::NO_REPLY_PLACEHOLDER.to_string(),
        }
    }

    /// 设置空回复占位文本
    pub fn with_reply_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.reply_placeholder = placeholder.into();
        self
    }

    /// 渲染回复内容：空输入用占位文本，非空输入加引号
    fn render_reply(&self, input: &str) -> String {
        if input.is_empty() {
            self.reply_placeholder.clone()
        } else {
            format!("\"{}\"", input)
        }
    }

    /// 渲染事件的状态投影
    ///
    /// 返回 `None` 表示该事件不更新状态（目前只有已送达回调）。
    pub fn projection(&self, event: &RouteEvent) -> Option<String> {
        let line = match event.kind {
            EventKind::ForegroundRemote => {
                format!("{}: {} - {}", msg::FCM_FOREGROUND, event.title, event.body)
            }
            EventKind::OpenedFromBackground => {
                format!("{}: {} - {}", msg::FCM_OPENED_BACKGROUND, event.title, event.body)
            }
            EventKind::OpenedFromQuit => {
                format!("{}: {} - {}", msg::FCM_OPENED_QUIT, event.title, event.body)
            }
            EventKind::LocalPressed => format!("{}: {}", msg::NOTIFEE_PRESSED, event.title),
            EventKind::LocalDismissed => format!("{}: {}", msg::NOTIFEE_DISMISSED, event.title),
            // 已送达只记日志，不触碰状态
            EventKind::LocalDelivered => return None,
            EventKind::LocalActionReply => {
                let input = event.input_text.as_deref().unwrap_or("");
                format!("{} [reply]: Reply -> {}", msg::NOTIFEE_ACTION, self.render_reply(input))
            }
            EventKind::LocalActionMarkRead => {
                format!("{} [mark-as-read]: {}", msg::NOTIFEE_ACTION, event.title)
            }
            EventKind::LocalActionDefault => {
                format!("{} [default]: {}", msg::NOTIFEE_ACTION, event.title)
            }
            EventKind::PermissionBlocked => msg::PERMISSION_BLOCKED.to_string(),
        };
        Some(line)
    }

    /// 生成事件的一次性回执弹窗
    ///
    /// 只有前台远程消息和三种动作按钮会触发弹窗，其余返回 `None`。
    pub fn acknowledgment(&self, event: &RouteEvent) -> Option<Acknowledgment> {
        let ack = match event.kind {
            // 前台收到消息时直接弹出消息本身
            EventKind::ForegroundRemote => {
                Acknowledgment::new(event.title.clone(), event.body.clone())
            }
            EventKind::LocalActionReply => {
                let input = event.input_text.as_deref().unwrap_or("");
                let body = if input.is_empty() {
                    format!("You replied: {}", self.reply_placeholder)
                } else {
                    format!("You replied: \"{}\"", input)
                };
                Acknowledgment::new(msg::ACK_REPLY_TITLE, body)
            }
            EventKind::LocalActionMarkRead => {
                Acknowledgment::new(msg::ACK_MARK_READ_TITLE, event.title.clone())
            }
            EventKind::LocalActionDefault => {
                Acknowledgment::new(msg::ACK_DEFAULT_TITLE, event.title.clone())
            }
            _ => return None,
        };
        Some(ack)
    }
}

impl Default for ProjectionFormatter {
    fn default() -> Self {
        Self::new()
    }
}
