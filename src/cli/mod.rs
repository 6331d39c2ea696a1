//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `compress`: 批量压缩（省略子命令时按默认参数执行）
//! - `scan`: 只列出将被压缩的文件
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: compress, scan

pub mod compress;
pub mod scan;

use clap::{Args, Command, FromArgMatches, Parser, Subcommand};

/// oggpress - 批量音频压缩工具
#[derive(Parser, Debug)]
#[command(name = "oggpress")]
#[command(version)]
#[command(about = "Batch-compress an audio tree with ffmpeg and report the size savings", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// 要执行的命令，缺省为 compress
    ///
    /// 缺省时同样经过 clap 解析，环境变量与默认值和显式 `compress` 一致。
    pub fn into_command(self) -> Result<Commands, clap::Error> {
        match self.command {
            Some(command) => Ok(command),
            None => {
                let matches = compress::CompressArgs::augment_args(Command::new("compress"))
                    .try_get_matches_from(["compress"])?;
                let args = compress::CompressArgs::from_arg_matches(&matches)?;
                Ok(Commands::Compress(args))
            }
        }
    }
}

/// 可用的子命令
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Compress every matching file into a mirrored output tree
    Compress(compress::CompressArgs),

    /// List the files that would be compressed, grouped by directory
    Scan(scan::ScanArgs),
}
