// src/cli/setup.rs
//! Setup 命令 - 交互式初始化配置文件
//!
//! 引导写出 ~/.config/push-notify-monitor/config.json，
//! `--auto` 跳过交互直接采用默认值。

use anyhow::{Context, Result};
use clap::Args;
use dialoguer::{Confirm, Input};
use std::path::PathBuf;

use crate::config::MonitorConfig;

/// Setup 命令参数
#[derive(Args)]
pub struct SetupArgs {
    /// 使用默认值，跳过交互式提示
    #[arg(long)]
    pub auto: bool,

    /// 覆盖现有配置，不再确认
    #[arg(long)]
    pub force: bool,
}

/// 处理 setup 命令
pub fn handle_setup(args: SetupArgs) -> Result<()> {
    println!("PNM Setup - 配置向导\n");

    // 检查已有配置
    if let Some(path) = MonitorConfig::config_path() {
        if path.exists() && !args.force {
            println!("检测到已有配置: {}", path.display());
            if args.auto {
                println!("已取消。使用 --force 覆盖。");
                return Ok(());
            }
            let overwrite = Confirm::new()
                .with_prompt("是否覆盖现有配置？")
                .default(false)
                .interact()
                .unwrap_or(false);
            if !overwrite {
                println!("已取消。");
                return Ok(());
            }
            println!();
        }
    }

    let config = if args.auto {
        println!("  [auto] 使用默认配置\n");
        MonitorConfig::default()
    } else {
        prompt_config()?
    };

    config.save()?;
    if let Some(path) = MonitorConfig::config_path() {
        println!("配置已写入: {}", path.display());
    }

    print_next_steps();
    Ok(())
}

/// 交互式收集配置项
fn prompt_config() -> Result<MonitorConfig> {
    let defaults = MonitorConfig::default();

    let reply_placeholder: String = Input::new()
        .with_prompt("空回复占位文案")
        .default(defaults.reply_placeholder)
        .interact_text()
        .context("读取占位文案失败")?;

    let show_acks = Confirm::new()
        .with_prompt("是否弹出回执弹窗？")
        .default(defaults.show_acks)
        .interact()
        .unwrap_or(defaults.show_acks);

    let feed: String = Input::new()
        .with_prompt("默认事件源文件（留空使用标准输入）")
        .default(String::new())
        .interact_text()
        .context("读取事件源路径失败")?;

    Ok(MonitorConfig {
        reply_placeholder,
        show_acks,
        feed_path: parse_feed_input(&feed),
    })
}

/// 空输入表示不设默认事件源
fn parse_feed_input(feed: &str) -> Option<PathBuf> {
    let trimmed = feed.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(PathBuf::from(trimmed))
    }
}

/// 输出下一步提示
fn print_next_steps() {
    println!("\n── 下一步 ──\n");
    println!("  1. 生成演示事件源:  pnm sample > feed.jsonl");
    println!("  2. 启动监控界面:    pnm monitor --feed feed.jsonl");
    println!("  3. 或一次性路由:    pnm sample | pnm route --pretty");
    println!();
    println!("  查看完整文档: pnm --help");
}
