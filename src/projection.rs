//! 状态投影单元 - 基于 `tokio::sync::watch` 的单值状态
//!
//! 投影没有历史：每个事件渲染出的新文本直接覆盖旧文本（last-write-wins）。
//! [`StatusCell`] 是唯一写入端，[`StatusReader`] 供显示层读取或等待变更，
//! 两者通过 `Arc` 自由共享。

use tokio::sync::watch;

/// 状态投影的写入端
///
/// 内部持有 watch 发送端。即使所有读取端都已关闭，
/// `update` 仍会记录最新投影，后续订阅者能看到它。
#[derive(Debug)]
pub struct StatusCell {
    sender: watch::Sender<String>,
}

impl StatusCell {
    /// 创建投影单元，返回写入端和第一个读取端
    pub fn new(initial: impl Into<String>) -> (Self, StatusReader) {
        let (sender, receiver) = watch::channel(initial.into());
        (Self { sender }, StatusReader { receiver })
    }

    /// 用新投影覆盖当前值
    pub fn update(&self, projection: impl Into<String>) {
        // send_replace 在零读取端时也会写入
        self.sender.send_replace(projection.into());
    }

    /// 读取当前投影
    pub fn read(&self) -> String {
        self.sender.borrow().clone()
    }

    /// 追加一个读取端
    pub fn subscribe(&self) -> StatusReader {
        StatusReader {
            receiver: self.sender.subscribe(),
        }
    }
}

/// 状态投影的读取端
#[derive(Debug, Clone)]
pub struct StatusReader {
    receiver: watch::Receiver<String>,
}

impl StatusReader {
    /// 读取当前投影
    pub fn current(&self) -> String {
        self.receiver.borrow().clone()
    }

    /// 等待投影变更
    ///
    /// 返回 `false` 表示写入端已关闭，不会再有新值。
    pub async fn changed(&mut self) -> bool {
        self.receiver.changed().await.is_ok()
    }
}
