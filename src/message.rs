//! 远程消息数据模型
//!
//! 对应云端消息源投递的规范化 `RemoteMessage` 结构：
//! 可选的 `notification`（title/body）加上应用自定义的 `data` 字符串映射。
//! 消息到达后不可变，也不做持久化。

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 远程消息附带的通知内容（title/body 均可缺省）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemoteNotification {
    /// 通知标题
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// 通知正文
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

/// 远程推送消息（规范化后的形状）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemoteMessage {
    /// 可选的通知部分（纯数据消息没有该字段）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification: Option<RemoteNotification>,
    /// 应用自定义的字符串键值对
    #[serde(default)]
    pub data: HashMap<String, String>,
}

impl RemoteMessage {
    /// 创建带 title/body 的消息
    pub fn with_notification(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            notification: Some(RemoteNotification {
                title: Some(title.into()),
                body: Some(body.into()),
            }),
            data: HashMap::new(),
        }
    }

    /// 附加一条 data 键值（链式调用）
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// 标题；缺省字段渲染为空字符串，绝不渲染占位符
    pub fn title(&self) -> &str {
        self.notification
            .as_ref()
            .and_then(|n| n.title.as_deref())
            .unwrap_or("")
    }

    /// 正文；缺省字段渲染为空字符串
    pub fn body(&self) -> &str {
        self.notification
            .as_ref()
            .and_then(|n| n.body.as_deref())
            .unwrap_or("")
    }
}

/// 远程消息的到达场景（应用处于什么执行状态时观察到该消息）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteContext {
    /// 应用在前台时直接投递
    Foreground,
    /// 应用在后台，用户点按系统通知打开
    BackgroundTap,
    /// 冷启动：启动时查询到的最近一条消息
    Initial,
    /// 未识别的到达场景（防御性兜底，路由时丢弃）
    #[serde(other)]
    Unknown,
}

impl RemoteContext {
    pub fn as_str(&self) -> &'static str {
        match self {
            RemoteContext::Foreground => "foreground",
            RemoteContext::BackgroundTap => "background_tap",
            RemoteContext::Initial => "initial",
            RemoteContext::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for RemoteContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_body_accessors() {
        let msg = RemoteMessage::with_notification("Hi", "there");
        assert_eq!(msg.title(), "Hi");
        assert_eq!(msg.body(), "there");
    }

    #[test]
    fn test_missing_notification_renders_empty() {
        // 纯数据消息：title/body 必须是空字符串，而不是占位符
        let msg = RemoteMessage::default().with_data("k", "v");
        assert_eq!(msg.title(), "");
        assert_eq!(msg.body(), "");
        assert_eq!(msg.data.get("k").map(String::as_str), Some("v"));
    }

    #[test]
    fn test_partial_notification() {
        let msg = RemoteMessage {
            notification: Some(RemoteNotification {
                title: Some("only-title".to_string()),
                body: None,
            }),
            data: HashMap::new(),
        };
        assert_eq!(msg.title(), "only-title");
        assert_eq!(msg.body(), "");
    }

    #[test]
    fn test_context_deserialize() {
        let ctx: RemoteContext = serde_json::from_str(r#""foreground""#).unwrap();
        assert_eq!(ctx, RemoteContext::Foreground);
        let ctx: RemoteContext = serde_json::from_str(r#""background_tap""#).unwrap();
        assert_eq!(ctx, RemoteContext::BackgroundTap);

        // 未知场景落到 Unknown，而不是反序列化失败
        let ctx: RemoteContext = serde_json::from_str(r#""hovering""#).unwrap();
        assert_eq!(ctx, RemoteContext::Unknown);
    }

    #[test]
    fn test_message_deserialize_without_notification() {
        let msg: RemoteMessage = serde_json::from_str(r#"{"data":{"a":"1"}}"#).unwrap();
        assert!(msg.notification.is_none());
        assert_eq!(msg.data.get("a").map(String::as_str), Some("1"));
    }
}
