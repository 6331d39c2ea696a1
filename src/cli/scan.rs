//! # scan 子命令 CLI 定义
//!
//! 只扫描输入目录，列出将被压缩的文件
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/scan.rs`

use super::compress::DEFAULT_INPUT;
use crate::batch::collector::DEFAULT_EXTENSION;

use clap::Args;
use std::path::PathBuf;

/// scan 子命令参数
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ScanArgs {
    /// Root directory to scan
    #[arg(short, long, default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// File extensions to pick up (comma-separated, case-sensitive)
    #[arg(short, long, default_value = DEFAULT_EXTENSION)]
    pub ext: String,
}
