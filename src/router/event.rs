//! 路由事件结构 - 分类后的通知事件
//!
//! 分类器把两个事件源的原始记录归一为 `RouteEvent`：固定的 `kind` 枚举
//! 加上模板所需的 title/body/action_id/input 字段。事件折叠进状态投影后
//! 即被丢弃，不做任何留存。

use serde::{Deserialize, Serialize};

/// 事件种类（分类表的输出列，固定枚举）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventKind {
    /// 前台收到远程消息
    ForegroundRemote,
    /// 后台点按远程通知打开
    OpenedFromBackground,
    /// 冷启动时由远程通知打开
    OpenedFromQuit,
    /// 本地通知主体被点按
    LocalPressed,
    /// 本地通知被滑动清除
    LocalDismissed,
    /// 本地通知已送达（不更新投影）
    LocalDelivered,
    /// 回复动作按钮
    LocalActionReply,
    /// 标记已读动作按钮
    LocalActionMarkRead,
    /// 默认动作按钮
    LocalActionDefault,
    /// 应用级通知权限被撤销
    PermissionBlocked,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::ForegroundRemote => "foreground-remote",
            EventKind::OpenedFromBackground => "opened-from-background",
            EventKind::OpenedFromQuit => "opened-from-quit",
            EventKind::LocalPressed => "local-pressed",
            EventKind::LocalDismissed => "local-dismissed",
            EventKind::LocalDelivered => "local-delivered",
            EventKind::LocalActionReply => "local-action-reply",
            EventKind::LocalActionMarkRead => "local-action-mark-read",
            EventKind::LocalActionDefault => "local-action-default",
            EventKind::PermissionBlocked => "permission-blocked",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 分类后的路由事件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteEvent {
    /// 事件种类
    pub kind: EventKind,
    /// 标题（缺省为空字符串）
    pub title: String,
    /// 正文（缺省为空字符串）
    pub body: String,
    /// 动作 ID（仅动作按钮事件携带）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_id: Option<String>,
    /// 用户输入文本（仅回复动作携带；空字符串表示按下发送但未输入）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_text: Option<String>,
}

impl RouteEvent {
    /// 创建指定种类的事件
    pub fn new(kind: EventKind, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            body: body.into(),
            action_id: None,
            input_text: None,
        }
    }

    /// 设置动作 ID（链式调用）
    pub fn with_action_id(mut self, id: impl Into<String>) -> Self {
        self.action_id = Some(id.into());
        self
    }

    /// 设置输入文本（链式调用）
    pub fn with_input_text(mut self, input: impl Into<String>) -> Self {
        self.input_text = Some(input.into());
        self
    }
}

/// 便捷构造函数
impl RouteEvent {
    /// 前台远程消息事件
    pub fn foreground_remote(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(EventKind::ForegroundRemote, title, body)
    }

    /// 后台点按打开事件
    pub fn opened_from_background(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(EventKind::OpenedFromBackground, title, body)
    }

    /// 冷启动打开事件
    pub fn opened_from_quit(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(EventKind::OpenedFromQuit, title, body)
    }

    /// 回复动作事件
    pub fn local_action_reply(title: impl Into<String>, input: impl Into<String>) -> Self {
        Self::new(EventKind::LocalActionReply, title, "")
            .with_action_id("reply")
            .with_input_text(input)
    }

    /// 权限被撤销事件
    pub fn permission_blocked() -> Self {
        Self::new(EventKind::PermissionBlocked, "", "")
    }
}
