//! 事件源 JSONL 解析模块 - 解析两个上游源的原始事件记录
//!
//! 监控器通过一条 JSONL 流模拟 SDK 回调面：每行一条记录，按 `source`
//! 字段区分来源（remote / local / permission）。未识别的记录解析为
//! `Unknown` 兜底变体而不是报错；格式损坏的行跳过并记 debug 日志。

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use tracing::{debug, warn};

use crate::interaction::LocalInteraction;
use crate::message::{RemoteContext, RemoteMessage};

/// 事件源原始记录（按 `source` 字段打标签）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum FeedRecord {
    /// 远程消息源：到达场景 + 规范化消息
    Remote {
        context: RemoteContext,
        message: RemoteMessage,
    },
    /// 本地通知源：`{type, detail}` 交互事件
    Local {
        #[serde(flatten)]
        interaction: LocalInteraction,
    },
    /// 应用级通知权限变化
    Permission { granted: bool },
    /// 未识别的来源（防御性兜底，路由时丢弃）
    #[serde(other)]
    Unknown,
}

/// 解析单行记录；空行返回 None，损坏的行记日志后返回 None
pub fn parse_line(line: &str) -> Option<FeedRecord> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    match serde_json::from_str::<FeedRecord>(trimmed) {
        Ok(record) => Some(record),
        Err(e) => {
            debug!(error = %e, line = %trimmed, "Skipping malformed feed line");
            None
        }
    }
}

/// 事件源读取器 - 逐行产出解析成功的记录
pub struct FeedReader {
    reader: BufReader<Box<dyn Read + Send>>,
}

impl FeedReader {
    /// 从文件打开事件源
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("无法打开事件源文件: {}", path.display()))?;
        Ok(Self {
            reader: BufReader::new(Box::new(file)),
        })
    }

    /// 从标准输入读取事件源
    pub fn stdin() -> Self {
        Self {
            reader: BufReader::new(Box::new(std::io::stdin())),
        }
    }

    /// 从任意字节流构造（测试用）
    pub fn from_reader(reader: impl Read + Send + 'static) -> Self {
        Self {
            reader: BufReader::new(Box::new(reader)),
        }
    }
}

impl Iterator for FeedReader {
    type Item = FeedRecord;

    fn next(&mut self) -> Option<FeedRecord> {
        loop {
            let mut line = String::new();
            match self.reader.read_line(&mut line) {
                Ok(0) => return None,
                Ok(_) => {
                    if let Some(record) = parse_line(&line) {
                        return Some(record);
                    }
                    // 空行或损坏的行：继续读下一行
                }
                Err(e) => {
                    warn!(error = %e, "Feed read failed, stopping");
                    return None;
                }
            }
        }
    }
}

/// 演示用事件源 - 覆盖分类表的每一行，外加一条未识别记录
pub fn sample_feed() -> String {
    [
        r#"{"source":"remote","context":"foreground","message":{"notification":{"title":"Hi","body":"there"},"data":{"channel":"demo"}}}"#,
        r#"{"source":"remote","context":"background_tap","message":{"notification":{"title":"Weekly digest","body":"3 new items"},"data":{}}}"#,
        r#"{"source":"remote","context":"initial","message":{"notification":{"title":"Welcome back","body":"Tap to resume"},"data":{}}}"#,
        r#"{"source":"local","type":"delivered","detail":{"title":"Build finished","body":"All targets green"}}"#,
        r#"{"source":"local","type":"press","detail":{"title":"Build finished","body":"All targets green"}}"#,
        r#"{"source":"local","type":"dismissed","detail":{"title":"Build finished"}}"#,
        r#"{"source":"local","type":"action_press","detail":{"title":"New comment","press_action":{"id":"reply"},"input":"ok"}}"#,
        r#"{"source":"local","type":"action_press","detail":{"title":"New comment","press_action":{"id":"reply"},"input":""}}"#,
        r#"{"source":"local","type":"action_press","detail":{"title":"New comment","press_action":{"id":"mark-as-read"}}}"#,
        r#"{"source":"local","type":"action_press","detail":{"title":"New comment","press_action":{"id":"default"}}}"#,
        r#"{"source":"permission","granted":false}"#,
        r#"{"source":"telemetry","payload":"not a notification event"}"#,
    ]
    .join("\n")
}
