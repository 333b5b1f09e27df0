//! 通知事件路由器 - 分类、折叠、回执
//!
//! # 设计目标
//! 1. 单一入口：两个事件源的记录都走 [`EventRouter::handle`]
//! 2. 纯分类：分类是同步纯函数，同一记录永远得到同一事件
//! 3. 无历史：投影覆盖写入显示端，路由器自身不保存状态
//! 4. 安静降级：认不出的记录只记日志，绝不中断事件循环
//!
//! # 使用示例
//! ```ignore
//! use std::sync::Arc;
//! use push_notify_monitor::router::EventRouter;
//! use push_notify_monitor::sink::ConsoleSink;
//!
//! let router = EventRouter::new(Arc::new(ConsoleSink::new()));
//! for record in feed {
//!     router.handle(&record);
//! }
//! ```

pub mod classify;
pub mod event;
pub mod format;

pub use classify::{classify, classify_interaction, classify_permission, classify_remote};
pub use event::{EventKind, RouteEvent};
pub use format::{msg, ProjectionFormatter};

use std::sync::Arc;

use tracing::debug;

use crate::feed::FeedRecord;
use crate::interaction::LocalInteraction;
use crate::message::{RemoteContext, RemoteMessage};
use crate::sink::DisplaySink;

/// 通知事件路由器
pub struct EventRouter {
    /// 投影与回执的显示端
    sink: Arc<dyn DisplaySink>,
    /// 状态文案格式化器
    formatter: ProjectionFormatter,
    /// 是否弹出回执弹窗
    show_acks: bool,
}

impl EventRouter {
    /// 创建路由器，默认开启回执弹窗
    pub fn new(sink: Arc<dyn DisplaySink>) -> Self {
        Self {
            sink,
            formatter: ProjectionFormatter::new(),
            show_acks: true,
        }
    }

    /// 替换格式化器
    pub fn with_formatter(mut self, formatter: ProjectionFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// 设置是否弹出回执弹窗
    pub fn with_show_acks(mut self, show_acks: bool) -> Self {
        self.show_acks = show_acks;
        self
    }

    /// 处理一条事件源记录
    ///
    /// 返回命中的事件种类；`None` 表示记录未被识别，已丢弃。
    pub fn handle(&self, record: &FeedRecord) -> Option<EventKind> {
        match classify(record) {
            Some(event) => {
                self.dispatch(&event);
                Some(event.kind)
            }
            None => {
                debug!(?record, "unrecognized record dropped");
                None
            }
        }
    }

    /// 处理一条远程消息（事件源回调入口）
    pub fn handle_remote(&self, context: RemoteContext, message: &RemoteMessage) -> Option<EventKind> {
        match classify_remote(context, message) {
            Some(event) => {
                self.dispatch(&event);
                Some(event.kind)
            }
            None => {
                debug!(context = %context, "remote message dropped");
                None
            }
        }
    }

    /// 处理一条本地交互（事件源回调入口）
    pub fn handle_interaction(&self, interaction: &LocalInteraction) -> Option<EventKind> {
        match classify_interaction(interaction) {
            Some(event) => {
                self.dispatch(&event);
                Some(event.kind)
            }
            None => {
                debug!(
                    event_type = interaction.event_type.as_str(),
                    action_id = interaction.action_id(),
                    "local interaction dropped"
                );
                None
            }
        }
    }

    /// 处理一次权限变更（事件源回调入口）
    pub fn handle_permission(&self, granted: bool) -> Option<EventKind> {
        match classify_permission(granted) {
            Some(event) => {
                self.dispatch(&event);
                Some(event.kind)
            }
            None => {
                debug!("permission granted, no status change");
                None
            }
        }
    }

    /// 把事件折叠进显示端：先覆盖状态，再按需弹回执
    fn dispatch(&self, event: &RouteEvent) {
        match self.formatter.projection(event) {
            Some(projection) => {
                debug!(kind = %event.kind, sink = self.sink.name(), "status updated");
                self.sink.update_status(&projection);
            }
            None => {
                // 已送达回调只留日志
                debug!(kind = %event.kind, "event observed, status unchanged");
            }
        }

        if self.show_acks {
            if let Some(ack) = self.formatter.acknowledgment(event) {
                self.sink.show_ack(ack);
            }
        }
    }
}
