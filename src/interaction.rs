//! 本地通知交互事件数据模型
//!
//! 本地通知源投递的原始事件：`{type, detail}`。
//! `detail` 携带已展示通知的 title/body、可选的 `press_action.id` 和可选的
//! `input` 输入文本。本模块只做形状规范化，分类逻辑在 `router::classify`。

use serde::{Deserialize, Serialize};

/// 本地交互事件类型（对应上游 SDK 的事件判别符）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionType {
    /// 通知主体被点按
    Press,
    /// 通知被滑动清除
    Dismissed,
    /// 通知已展示（送达）
    Delivered,
    /// 动作按钮被点按（配合 press_action.id 细分）
    ActionPress,
    /// 未识别的事件类型（防御性兜底，路由时丢弃）
    #[serde(other)]
    Unknown,
}

impl InteractionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionType::Press => "press",
            InteractionType::Dismissed => "dismissed",
            InteractionType::Delivered => "delivered",
            InteractionType::ActionPress => "action_press",
            InteractionType::Unknown => "unknown",
        }
    }
}

/// 动作按钮标识
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PressAction {
    /// 动作 ID，如 "reply" / "mark-as-read" / "default"
    #[serde(default)]
    pub id: String,
}

/// 交互事件的详情部分
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InteractionDetail {
    /// 已展示通知的标题
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// 已展示通知的正文
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// 被点按的动作按钮（仅 action_press 事件携带）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub press_action: Option<PressAction>,
    /// 用户输入的回复文本（仅 reply 动作携带）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
}

/// 本地通知交互事件（`{type, detail}` 原始形状）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalInteraction {
    /// 事件判别符
    #[serde(rename = "type")]
    pub event_type: InteractionType,
    /// 事件详情
    #[serde(default)]
    pub detail: InteractionDetail,
}

impl LocalInteraction {
    /// 创建指定类型的交互事件
    pub fn new(event_type: InteractionType) -> Self {
        Self {
            event_type,
            detail: InteractionDetail::default(),
        }
    }

    /// 设置标题（链式调用）
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.detail.title = Some(title.into());
        self
    }

    /// 设置正文（链式调用）
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.detail.body = Some(body.into());
        self
    }

    /// 设置动作 ID（链式调用）
    pub fn with_action(mut self, id: impl Into<String>) -> Self {
        self.detail.press_action = Some(PressAction { id: id.into() });
        self
    }

    /// 设置输入文本（链式调用）
    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.detail.input = Some(input.into());
        self
    }

    /// 标题；缺省渲染为空字符串
    pub fn title(&self) -> &str {
        self.detail.title.as_deref().unwrap_or("")
    }

    /// 正文；缺省渲染为空字符串
    pub fn body(&self) -> &str {
        self.detail.body.as_deref().unwrap_or("")
    }

    /// 动作 ID；没有动作时返回空字符串
    pub fn action_id(&self) -> &str {
        self.detail
            .press_action
            .as_ref()
            .map(|a| a.id.as_str())
            .unwrap_or("")
    }
}
