// src/cli/route.rs
//! Route 命令 - 一次性路由标准输入的事件源记录
//!
//! 每条可识别记录打印它产生的投影行；`--pretty` 额外打印回执行。
//! 不进入 TUI，适合脚本和调试分类结果。

use anyhow::Result;
use clap::Args;

use crate::config::MonitorConfig;
use crate::feed::{FeedReader, FeedRecord};
use crate::router::{classify, ProjectionFormatter};

/// Route 命令参数
#[derive(Args)]
pub struct RouteArgs {
    /// 同时打印回执弹窗行
    #[arg(long)]
    pub pretty: bool,
}

/// 处理 route 命令
pub fn handle_route(args: RouteArgs) -> Result<()> {
    let config = MonitorConfig::load();
    let formatter =
        ProjectionFormatter::new().with_reply_placeholder(config.reply_placeholder.as_str());

    for record in FeedReader::stdin() {
        for line in render_record(&formatter, &record, args.pretty) {
            println!("{}", line);
        }
    }

    Ok(())
}

/// 渲染一条记录产生的输出行
///
/// 认不出的记录和不触碰状态的记录产出空列表。
fn render_record(
    formatter: &ProjectionFormatter,
    record: &FeedRecord,
    pretty: bool,
) -> Vec<String> {
    let mut lines = Vec::new();
    let Some(event) = classify(record) else {
        return lines;
    };

    if let Some(projection) = formatter.projection(&event) {
        lines.push(projection);
    }
    if pretty {
        if let Some(ack) = formatter.acknowledgment(&event) {
            lines.push(format!("  [弹窗] {}: {}", ack.title, ack.body));
        }
    }
    lines
}
