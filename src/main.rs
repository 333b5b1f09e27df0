//! Push Notify Monitor CLI
//!
//! 路由远程推送与本地通知事件，折叠为单条状态投影

use anyhow::Result;
use clap::{Parser, Subcommand};
use push_notify_monitor::cli::{MonitorArgs, RouteArgs, SetupArgs};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "pnm")]
#[command(about = "Push Notify Monitor - 通知事件路由与状态投影")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 回放事件源并持续渲染状态投影（默认 TUI）
    Monitor(MonitorArgs),
    /// 一次性路由标准输入的记录并打印投影
    Route(RouteArgs),
    /// 打印覆盖分类表每一行的演示事件源
    Sample,
    /// 初始化配置文件
    Setup(SetupArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化 tracing 日志系统
    // 通过 RUST_LOG 环境变量控制日志级别，默认为 info
    // 例如: RUST_LOG=debug pnm monitor --plain
    // 日志写到 stderr，TUI 备用屏幕占用 stdout
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("push_notify_monitor=info,pnm=info"));

    fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Monitor(args) => {
            push_notify_monitor::cli::handle_monitor(args)?;
        }
        Commands::Route(args) => {
            push_notify_monitor::cli::handle_route(args)?;
        }
        Commands::Sample => {
            push_notify_monitor::cli::handle_sample()?;
        }
        Commands::Setup(args) => {
            push_notify_monitor::cli::handle_setup(args)?;
        }
    }

    Ok(())
}
