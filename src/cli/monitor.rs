// src/cli/monitor.rs
//! Monitor 命令 - 回放事件源并持续渲染状态投影
//!
//! 记录经事件源对象分发给路由器，路由器把投影折叠进显示端。
//! 默认进入 TUI 仪表盘，事件源在后台线程回放；`--plain` 退化为
//! 纯文本输出，在当前线程回放。

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Args;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::config::MonitorConfig;
use crate::feed::{FeedReader, FeedRecord};
use crate::message::RemoteContext;
use crate::projection::StatusCell;
use crate::router::{EventRouter, ProjectionFormatter};
use crate::sink::{ChannelSink, ConsoleSink, DisplaySink};
use crate::source::{LocalEventSource, RemoteMessageSource};
use crate::subscription::Subscription;
use crate::tui::{run, App};

/// TUI 启动时的占位状态
const IDLE_STATUS: &str = "尚未收到事件";

/// Monitor 命令参数
#[derive(Args)]
pub struct MonitorArgs {
    /// 事件源文件（默认取配置项 feed_path，其次标准输入）
    #[arg(long)]
    pub feed: Option<PathBuf>,

    /// 纯文本模式，不进入 TUI
    #[arg(long)]
    pub plain: bool,

    /// TUI 刷新间隔（毫秒）
    #[arg(long, default_value = "200")]
    pub interval_ms: u64,
}

/// 处理 monitor 命令
pub fn handle_monitor(args: MonitorArgs) -> Result<()> {
    let config = MonitorConfig::load();
    let formatter =
        ProjectionFormatter::new().with_reply_placeholder(config.reply_placeholder.as_str());

    let remote = Arc::new(RemoteMessageSource::new());
    let local = Arc::new(LocalEventSource::new());
    let feed_path = args.feed.clone().or_else(|| config.feed_path.clone());

    if args.plain {
        let sink: Arc<dyn DisplaySink> = Arc::new(ConsoleSink::new());
        let router = Arc::new(
            EventRouter::new(sink)
                .with_formatter(formatter)
                .with_show_acks(config.show_acks),
        );

        let (remote_sub, local_sub) = wire_router(&remote, &local, router.clone());
        route_initial(&remote, &router);

        let reader = open_feed(feed_path.as_deref())?;
        pump_feed(reader, remote, local, router);

        // 回放结束后拆除订阅，重复取消无害
        remote_sub.cancel();
        local_sub.cancel();
        return Ok(());
    }

    let (cell, status_reader) = StatusCell::new(IDLE_STATUS);
    let (ack_tx, ack_rx) = mpsc::unbounded_channel();
    let sink: Arc<dyn DisplaySink> = Arc::new(ChannelSink::new(cell, ack_tx));
    let router = Arc::new(
        EventRouter::new(sink)
            .with_formatter(formatter)
            .with_show_acks(config.show_acks),
    );

    let (remote_sub, local_sub) = wire_router(&remote, &local, router.clone());
    route_initial(&remote, &router);

    let reader = open_feed(feed_path.as_deref())?;

    // 事件源在后台线程回放，TUI 占用当前线程
    let pump = std::thread::spawn(move || {
        pump_feed(reader, remote, local, router);
    });

    let mut app = App::new(status_reader, ack_rx);
    run(&mut app, Duration::from_millis(args.interval_ms))?;

    remote_sub.cancel();
    local_sub.cancel();
    reap_pump(pump);

    Ok(())
}

/// 回收回放线程：panic 记一条告警，线程仍阻塞时不等待
fn reap_pump(pump: std::thread::JoinHandle<()>) {
    // 标准输入事件源可能仍阻塞在读取上，进程退出时一并结束
    if !pump.is_finished() {
        return;
    }
    if pump.join().is_err() {
        warn!("Feed pump thread panicked");
    }
}

/// 打开事件源：文件优先，否则标准输入
fn open_feed(path: Option<&Path>) -> Result<FeedReader> {
    match path {
        Some(path) => {
            info!(path = %path.display(), "Reading feed from file");
            FeedReader::from_path(path)
        }
        None => {
            info!("Reading feed from stdin");
            Ok(FeedReader::stdin())
        }
    }
}

/// 把两个事件源接到路由器上，返回订阅句柄
fn wire_router(
    remote: &RemoteMessageSource,
    local: &LocalEventSource,
    router: Arc<EventRouter>,
) -> (Subscription, Subscription) {
    let remote_router = router.clone();
    let remote_sub = remote.on_message(move |context, message| {
        remote_router.handle_remote(context, message);
    });

    let local_sub = local.on_interaction(move |interaction| {
        router.handle_interaction(interaction);
    });

    (remote_sub, local_sub)
}

/// 冷启动查询：若进程由点按通知启动，先于实时记录投影那条消息
fn route_initial(remote: &RemoteMessageSource, router: &EventRouter) {
    if let Some(message) = remote.initial_message() {
        router.handle_remote(RemoteContext::Initial, &message);
    }
}

/// 逐条回放记录：远程和本地记录走事件源分发，权限记录直接进路由器
fn pump_feed(
    reader: FeedReader,
    remote: Arc<RemoteMessageSource>,
    local: Arc<LocalEventSource>,
    router: Arc<EventRouter>,
) {
    for record in reader {
        match &record {
            FeedRecord::Remote { context, message } => remote.emit(*context, message),
            FeedRecord::Local { interaction } => local.emit(interaction),
            FeedRecord::Permission { granted } => {
                router.handle_permission(*granted);
            }
            FeedRecord::Unknown => {
                // 认不出的记录也走路由器，留下丢弃日志
                router.handle(&record);
            }
        }
    }
    info!("Feed exhausted");
}
