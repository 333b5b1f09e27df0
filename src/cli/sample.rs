// src/cli/sample.rs
//! Sample 命令 - 打印演示用事件源
//!
//! 输出覆盖分类表每一行的 JSONL 流，外加一条未识别记录，
//! 可直接管给 `pnm route` 或存成文件供 `pnm monitor --feed` 回放。

use anyhow::Result;

use crate::feed::sample_feed;

/// 处理 sample 命令
pub fn handle_sample() -> Result<()> {
    println!("{}", sample_feed());
    Ok(())
}
