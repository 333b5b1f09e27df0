//! 事件源模块 - 模拟上游 SDK 的两个事件入口
//!
//! [`RemoteMessageSource`] 对应远程推送（按投递上下文区分前台、后台点按、
//! 冷启动），[`LocalEventSource`] 对应本地通知交互。事件源把回放的记录
//! 分发给已注册的监听器，注册返回 [`Subscription`] 句柄。
//!
//! 分发时不持有注册表锁，监听器可以在回调里安全地取消自己；
//! 正在分发中的事件仍可能送达刚取消的监听器。

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tracing::debug;

use crate::interaction::LocalInteraction;
use crate::message::{RemoteContext, RemoteMessage};
use crate::subscription::Subscription;

type RemoteListener = Arc<dyn Fn(RemoteContext, &RemoteMessage) + Send + Sync>;
type LocalListener = Arc<dyn Fn(&LocalInteraction) + Send + Sync>;

/// 远程消息源
///
/// 三个投递入口：前台消息、后台点按打开、冷启动查询
/// （[`initial_message`](Self::initial_message)）。
pub struct RemoteMessageSource {
    listeners: Arc<Mutex<HashMap<u64, RemoteListener>>>,
    next_id: AtomicU64,
    /// 冷启动消息，查询入口返回它的副本
    initial: Mutex<Option<RemoteMessage>>,
}

impl RemoteMessageSource {
    pub fn new() -> Self {
        Self {
            listeners: Arc::new(Mutex::new(HashMap::new())),
            next_id: AtomicU64::new(0),
            initial: Mutex::new(None),
        }
    }

    /// 预置冷启动消息（测试与回放起点）
    pub fn with_initial(self, message: RemoteMessage) -> Self {
        *self.initial.lock().unwrap() = Some(message);
        self
    }

    /// 订阅所有投递上下文的远程消息
    pub fn on_message(
        &self,
        listener: impl Fn(RemoteContext, &RemoteMessage) + Send + Sync + 'static,
    ) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.listeners.lock().unwrap().insert(id, Arc::new(listener));

        let listeners = Arc::clone(&self.listeners);
        Subscription::new(move || {
            listeners.lock().unwrap().remove(&id);
        })
    }

    /// 订阅前台投递的消息
    pub fn on_foreground_message(
        &self,
        listener: impl Fn(&RemoteMessage) + Send + Sync + 'static,
    ) -> Subscription {
        self.on_message(move |context, message| {
            if context == RemoteContext::Foreground {
                listener(message);
            }
        })
    }

    /// 订阅后台点按打开的消息
    pub fn on_opened_from_background(
        &self,
        listener: impl Fn(&RemoteMessage) + Send + Sync + 'static,
    ) -> Subscription {
        self.on_message(move |context, message| {
            if context == RemoteContext::BackgroundTap {
                listener(message);
            }
        })
    }

    /// 冷启动查询：返回启动本进程的那条消息（若有）
    pub fn initial_message(&self) -> Option<RemoteMessage> {
        self.initial.lock().unwrap().clone()
    }

    /// 投递一条消息到所有监听器
    ///
    /// 冷启动上下文的消息同时存入查询槽，之后的
    /// [`initial_message`](Self::initial_message) 能看到它。
    pub fn emit(&self, context: RemoteContext, message: &RemoteMessage) {
        if context == RemoteContext::Initial {
            *self.initial.lock().unwrap() = Some(message.clone());
        }

        let listeners: Vec<RemoteListener> =
            self.listeners.lock().unwrap().values().cloned().collect();
        debug!(context = %context, listeners = listeners.len(), "remote message emitted");
        for listener in listeners {
            listener(context, message);
        }
    }

    /// 当前监听器数量
    pub fn listener_count(&self) -> usize {
        self.listeners.lock().unwrap().len()
    }
}

impl Default for RemoteMessageSource {
    fn default() -> Self {
        Self::new()
    }
}

/// 本地交互源
pub struct LocalEventSource {
    listeners: Arc<Mutex<HashMap<u64, LocalListener>>>,
    next_id: AtomicU64,
}

impl LocalEventSource {
    pub fn new() -> Self {
        Self {
            listeners: Arc::new(Mutex::new(HashMap::new())),
            next_id: AtomicU64::new(0),
        }
    }

    /// 订阅本地通知交互
    pub fn on_interaction(
        &self,
        listener: impl Fn(&LocalInteraction) + Send + Sync + 'static,
    ) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.listeners.lock().unwrap().insert(id, Arc::new(listener));

        let listeners = Arc::clone(&self.listeners);
        Subscription::new(move || {
            listeners.lock().unwrap().remove(&id);
        })
    }

    /// 投递一次交互到所有监听器
    pub fn emit(&self, interaction: &LocalInteraction) {
        let listeners: Vec<LocalListener> =
            self.listeners.lock().unwrap().values().cloned().collect();
        debug!(
            event_type = interaction.event_type.as_str(),
            listeners = listeners.len(),
            "local interaction emitted"
        );
        for listener in listeners {
            listener(interaction);
        }
    }

    /// 当前监听器数量
    pub fn listener_count(&self) -> usize {
        self.listeners.lock().unwrap().len()
    }
}

impl Default for LocalEventSource {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::InteractionType;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_emit_reaches_listener() {
        let source = RemoteMessageSource::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let seen_clone = seen.clone();
        let _sub = source.on_message(move |context, message| {
            seen_clone.lock().unwrap().push((context, message.title().to_string()));
        });

        source.emit(
            RemoteContext::Foreground,
            &RemoteMessage::with_notification("Hi", "there"),
        );

        let seen = seen.lock().unwrap();
        assert_eq!(seen.as_slice(), &[(RemoteContext::Foreground, "Hi".to_string())]);
    }

    #[test]
    fn test_context_filtered_listeners() {
        let source = RemoteMessageSource::new();
        let foreground_hits = Arc::new(AtomicUsize::new(0));
        let opened_hits = Arc::new(AtomicUsize::new(0));

        let fg = foreground_hits.clone();
        let _sub_fg = source.on_foreground_message(move |_| {
            fg.fetch_add(1, Ordering::SeqCst);
        });
        let op = opened_hits.clone();
        let _sub_op = source.on_opened_from_background(move |_| {
            op.fetch_add(1, Ordering::SeqCst);
        });

        let message = RemoteMessage::with_notification("x", "y");
        source.emit(RemoteContext::Foreground, &message);
        source.emit(RemoteContext::BackgroundTap, &message);
        source.emit(RemoteContext::BackgroundTap, &message);

        // 过滤订阅只收到自己上下文的投递
        assert_eq!(foreground_hits.load(Ordering::SeqCst), 1);
        assert_eq!(opened_hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_cancel_stops_delivery() {
        let source = RemoteMessageSource::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let hits_clone = hits.clone();
        let sub = source.on_message(move |_, _| {
            hits_clone.fetch_add(1, Ordering::SeqCst);
        });

        let message = RemoteMessage::with_notification("a", "b");
        source.emit(RemoteContext::Foreground, &message);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert_eq!(source.listener_count(), 1);

        sub.cancel();
        assert_eq!(source.listener_count(), 0);

        // 取消后不再投递，重复取消无害
        source.emit(RemoteContext::Foreground, &message);
        sub.cancel();
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let source = RemoteMessageSource::new();
        {
            let _sub = source.on_message(|_, _| {});
            assert_eq!(source.listener_count(), 1);
        }
        assert_eq!(source.listener_count(), 0);
    }

    #[test]
    fn test_initial_message_stored_on_emit() {
        let source = RemoteMessageSource::new();
        assert!(source.initial_message().is_none());

        source.emit(
            RemoteContext::Initial,
            &RemoteMessage::with_notification("Welcome back", "Tap to resume"),
        );

        let initial = source.initial_message().unwrap();
        assert_eq!(initial.title(), "Welcome back");
        // 查询不消费，可重复读取
        assert!(source.initial_message().is_some());
    }

    #[test]
    fn test_with_initial_preseeds_query() {
        let source = RemoteMessageSource::new()
            .with_initial(RemoteMessage::with_notification("Launch", "from push"));
        assert_eq!(source.initial_message().unwrap().title(), "Launch");
    }

    #[test]
    fn test_local_source_emit_and_cancel() {
        let source = LocalEventSource::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let seen_clone = seen.clone();
        let sub = source.on_interaction(move |interaction| {
            seen_clone.lock().unwrap().push(interaction.title().to_string());
        });

        source.emit(&LocalInteraction::new(InteractionType::Press).with_title("Build finished"));
        sub.cancel();
        source.emit(&LocalInteraction::new(InteractionType::Press).with_title("ignored"));

        assert_eq!(seen.lock().unwrap().as_slice(), &["Build finished".to_string()]);
    }

    #[test]
    fn test_listener_can_cancel_itself_during_dispatch() {
        let source = LocalEventSource::new();
        let slot: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));

        let slot_clone = slot.clone();
        let sub = source.on_interaction(move |_| {
            // 回调内取消自身不得死锁
            if let Some(sub) = slot_clone.lock().unwrap().take() {
                sub.cancel();
            }
        });
        *slot.lock().unwrap() = Some(sub);

        source.emit(&LocalInteraction::new(InteractionType::Press).with_title("x"));
        assert_eq!(source.listener_count(), 0);
    }
}
