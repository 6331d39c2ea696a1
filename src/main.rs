//! # oggpress - 批量音频压缩工具
//!
//! 递归扫描音频目录，用外部编码器 (ffmpeg) 并行重新编码，
//! 在输出目录中镜像原有结构，并报告压缩前后的总大小。
//!
//! ## 子命令
//! - `compress` - 批量压缩（默认）
//! - `scan`     - 只列出将被压缩的文件
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── batch/     (文件发现与并行调度)
//!   │     ├── encoder.rs (外部编码器调用)
//!   │     ├── mirror.rs  (输出路径镜像)
//!   │     └── report.rs  (体积统计与清单)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod encoder;
mod error;
mod mirror;
mod report;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let command = Cli::parse().into_command().unwrap_or_else(|e| e.exit());

    if let Err(e) = commands::run(command) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
