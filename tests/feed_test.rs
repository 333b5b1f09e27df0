use std::io::Write;
use std::sync::{Arc, Mutex};

use push_notify_monitor::{
    parse_line, sample_feed, Acknowledgment, DisplaySink, EventRouter, FeedReader, FeedRecord,
};

/// 只保留最后一次投影的显示端
struct LastStatusSink {
    status: Mutex<Option<String>>,
    ack_count: Mutex<usize>,
}

impl LastStatusSink {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            status: Mutex::new(None),
            ack_count: Mutex::new(0),
        })
    }

    fn status(&self) -> Option<String> {
        self.status.lock().unwrap().clone()
    }

    fn ack_count(&self) -> usize {
        *self.ack_count.lock().unwrap()
    }
}

impl DisplaySink for LastStatusSink {
    fn name(&self) -> &str {
        "last-status"
    }

    fn update_status(&self, projection: &str) {
        *self.status.lock().unwrap() = Some(projection.to_string());
    }

    fn show_ack(&self, _ack: Acknowledgment) {
        *self.ack_count.lock().unwrap() += 1;
    }
}

#[test]
fn test_sample_feed_end_to_end() {
    // 1. 解析演示事件源
    let records: Vec<FeedRecord> = sample_feed().lines().filter_map(parse_line).collect();
    assert_eq!(records.len(), 12);

    // 2. 全部路由
    let sink = LastStatusSink::new();
    let router = EventRouter::new(sink.clone());
    let recognized = records
        .iter()
        .filter(|record| router.handle(record).is_some())
        .count();

    // 3. 未识别来源那一行被丢弃，其余全部命中分类表
    assert_eq!(recognized, 11);

    // 4. 最后一条产生投影的记录胜出
    assert_eq!(
        sink.status().as_deref(),
        Some("Permission Blocked: notifications are disabled")
    );

    // 5. 回执：前台消息、两次回复、已读、默认动作
    assert_eq!(sink.ack_count(), 5);
}

#[test]
fn test_malformed_lines_never_crash() {
    let input = [
        "not json",
        r#"{"source":"remote""#,
        "",
        r#"{"source":"local","type":"press","detail":{"title":"Survivor"}}"#,
        "{}",
        r#"{"source":42}"#,
    ]
    .join("\n");

    let sink = LastStatusSink::new();
    let router = EventRouter::new(sink.clone());

    for record in FeedReader::from_reader(std::io::Cursor::new(input)) {
        router.handle(&record);
    }

    // 只有合法的那一行留下投影
    assert_eq!(sink.status().as_deref(), Some("Notifee Pressed: Survivor"));
}

#[test]
fn test_feed_file_replay() {
    // 事件源文件回放：写临时文件再经 from_path 读回
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"{{"source":"remote","context":"foreground","message":{{"notification":{{"title":"Hi","body":"there"}},"data":{{}}}}}}"#
    )
    .unwrap();
    writeln!(file, r#"{{"source":"permission","granted":false}}"#).unwrap();
    file.flush().unwrap();

    let sink = LastStatusSink::new();
    let router = EventRouter::new(sink.clone());

    let reader = FeedReader::from_path(file.path()).unwrap();
    let routed: Vec<_> = reader.map(|record| router.handle(&record)).collect();

    assert_eq!(routed.len(), 2);
    assert!(routed.iter().all(|kind| kind.is_some()));
    assert_eq!(
        sink.status().as_deref(),
        Some("Permission Blocked: notifications are disabled")
    );
}

#[test]
fn test_missing_feed_file_is_an_error() {
    let result = FeedReader::from_path(std::path::Path::new("/nonexistent/feed.jsonl"));
    assert!(result.is_err());
    let message = format!("{:#}", result.err().unwrap());
    assert!(message.contains("无法打开事件源文件"), "Got: {}", message);
}

#[test]
fn test_data_only_message_routes_with_empty_fields() {
    // 纯数据消息没有 notification 部分
    let record = parse_line(
        r#"{"source":"remote","context":"foreground","message":{"data":{"k":"v"}}}"#,
    )
    .unwrap();

    let sink = LastStatusSink::new();
    let router = EventRouter::new(sink.clone());
    assert!(router.handle(&record).is_some());
    assert_eq!(sink.status().as_deref(), Some("FCM Foreground:  - "));
}
