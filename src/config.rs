//! 监控器配置模块
//!
//! 配置来源优先级：
//! 1. 配置文件 `~/.config/push-notify-monitor/config.json`
//! 2. 环境变量 `PNM_REPLY_PLACEHOLDER` / `PNM_SHOW_ACKS` / `PNM_FEED`
//! 3. 内置默认值
//!
//! 加载永不硬失败：文件损坏时记一条警告并退回默认值。

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::router::format::msg;

fn default_reply_placeholder() -> String {
    msg::NO_REPLY_PLACEHOLDER.to_string()
}

fn default_show_acks() -> bool {
    true
}

/// 监控器配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// 空回复的占位文本
    #[serde(default = "default_reply_placeholder")]
    pub reply_placeholder: String,
    /// 是否弹出回执弹窗
    #[serde(default = "default_show_acks")]
    pub show_acks: bool,
    /// 默认事件源文件（缺省读 stdin）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feed_path: Option<PathBuf>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            reply_placeholder: default_reply_placeholder(),
            show_acks: default_show_acks(),
            feed_path: None,
        }
    }
}

impl MonitorConfig {
    /// 按优先级链加载配置
    pub fn load() -> Self {
        let mut config = Self::default();

        // 1. 配置文件
        if let Some(path) = Self::config_path() {
            if path.exists() {
                match Self::load_from(&path) {
                    Ok(loaded) => {
                        debug!(path = %path.display(), "config loaded from file");
                        config = loaded;
                    }
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "config file unreadable, using defaults");
                    }
                }
            }
        }

        // 2. 环境变量覆盖
        if let Ok(placeholder) = std::env::var("PNM_REPLY_PLACEHOLDER") {
            if !placeholder.is_empty() {
                debug!("reply placeholder overridden by PNM_REPLY_PLACEHOLDER");
                config.reply_placeholder = placeholder;
            }
        }
        if let Ok(flag) = std::env::var("PNM_SHOW_ACKS") {
            match parse_bool_flag(&flag) {
                Some(show_acks) => {
                    debug!("ack toggle overridden by PNM_SHOW_ACKS");
                    config.show_acks = show_acks;
                }
                None => warn!(value = %flag, "PNM_SHOW_ACKS not a boolean, ignored"),
            }
        }
        if let Ok(feed) = std::env::var("PNM_FEED") {
            if !feed.is_empty() {
                debug!("feed path overridden by PNM_FEED");
                config.feed_path = Some(PathBuf::from(feed));
            }
        }

        config
    }

    /// 从指定路径读取配置（严格：解析失败即报错）
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("无法读取配置文件: {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("配置文件格式错误: {}", path.display()))?;
        Ok(config)
    }

    /// 写入指定路径（自动创建父目录）
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("无法创建配置目录: {}", parent.display()))?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)
            .with_context(|| format!("无法写入配置文件: {}", path.display()))?;
        Ok(())
    }

    /// 写入默认配置路径
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path().context("无法确定用户主目录")?;
        self.save_to(&path)
    }

    /// 配置目录 `~/.config/push-notify-monitor`
    pub fn config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config").join("push-notify-monitor"))
    }

    /// 配置文件路径
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.json"))
    }
}

fn parse_bool_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
