//! # 批量处理模块
//!
//! 提供文件发现与并行转码调度。
//!
//! ## 功能
//! - 递归收集匹配扩展名的文件
//! - 固定大小线程池并行处理
//! - 结果按输入顺序返回
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `walkdir` 遍历目录
//! - 使用 `rayon` 进行并行处理
//! - 使用 `indicatif` 显示进度

pub mod collector;
pub mod runner;

pub use collector::FileCollector;
pub use runner::{BatchRunner, BatchSummary, Job};
