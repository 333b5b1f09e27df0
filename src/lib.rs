//! Push Notify Monitor - 通知事件路由与状态投影
//!
//! 把远程推送和本地通知的交互事件分类成固定的事件种类，
//! 每个事件折叠为一条人类可读的状态投影（last-write-wins），
//! 部分种类额外弹出一次性回执。

pub mod cli;
pub mod config;
pub mod feed;
pub mod interaction;
pub mod message;
pub mod projection;
pub mod router;
pub mod sink;
pub mod source;
pub mod subscription;
pub mod tui;

pub use config::MonitorConfig;
pub use feed::{parse_line, sample_feed, FeedReader, FeedRecord};
pub use interaction::{InteractionDetail, InteractionType, LocalInteraction, PressAction};
pub use message::{RemoteContext, RemoteMessage, RemoteNotification};
pub use projection::{StatusCell, StatusReader};
pub use router::{
    classify, classify_interaction, classify_permission, classify_remote, EventKind, EventRouter,
    ProjectionFormatter, RouteEvent,
};
pub use sink::{Acknowledgment, ChannelSink, ConsoleSink, DisplaySink};
pub use source::{LocalEventSource, RemoteMessageSource};
pub use subscription::Subscription;
