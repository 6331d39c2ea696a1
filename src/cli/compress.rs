//! # compress 子命令 CLI 定义
//!
//! 批量压缩输入目录中的音频文件到镜像输出目录
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/compress.rs`

use crate::batch::collector::DEFAULT_EXTENSION;
use crate::batch::runner::DEFAULT_JOBS;
use crate::encoder::{
    EncoderSettings, DEFAULT_BITRATE, DEFAULT_ENCODER, DEFAULT_HIGHPASS, DEFAULT_LOWPASS,
};

use clap::Args;
use std::path::PathBuf;

/// 默认输入根目录
pub const DEFAULT_INPUT: &str = "./sounds";
/// 默认输出根目录
pub const DEFAULT_OUTPUT: &str = "./compressed_sounds";

/// compress 子命令参数
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct CompressArgs {
    /// Root directory containing the audio files to compress
    #[arg(short, long, default_value = DEFAULT_INPUT)]
    pub input: PathBuf,

    /// Root directory for the compressed tree (created if missing)
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// File extensions to pick up (comma-separated, case-sensitive)
    #[arg(short, long, default_value = DEFAULT_EXTENSION)]
    pub ext: String,

    /// Number of parallel encoder processes (0 = one per CPU)
    #[arg(short, long, default_value_t = DEFAULT_JOBS)]
    pub jobs: usize,

    // ─────────────────────────────────────────────────────────────
    // Encoder options
    // ─────────────────────────────────────────────────────────────
    /// Target audio bitrate passed to the encoder (e.g. 96k)
    #[arg(short, long, default_value = DEFAULT_BITRATE)]
    pub bitrate: String,

    /// High-pass filter cutoff in Hz
    #[arg(long, default_value_t = DEFAULT_HIGHPASS)]
    pub highpass: u32,

    /// Low-pass filter cutoff in Hz
    #[arg(long, default_value_t = DEFAULT_LOWPASS)]
    pub lowpass: u32,

    /// Encoder executable, looked up on PATH
    #[arg(long, env = "OGGPRESS_ENCODER", default_value = DEFAULT_ENCODER)]
    pub encoder: String,

    // ─────────────────────────────────────────────────────────────
    // Execution control
    // ─────────────────────────────────────────────────────────────
    /// Abort before size aggregation if any encode failed
    #[arg(long, default_value_t = false)]
    pub strict: bool,

    /// Write a per-file CSV report to this path
    #[arg(long)]
    pub manifest: Option<PathBuf>,
}

// 不经过 clap，不读取 OGGPRESS_ENCODER
#[cfg(test)]
impl Default for CompressArgs {
    fn default() -> Self {
        CompressArgs {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            ext: DEFAULT_EXTENSION.to_string(),
            jobs: DEFAULT_JOBS,
            bitrate: DEFAULT_BITRATE.to_string(),
            highpass: DEFAULT_HIGHPASS,
            lowpass: DEFAULT_LOWPASS,
            encoder: DEFAULT_ENCODER.to_string(),
            strict: false,
            manifest: None,
        }
    }
}

impl CompressArgs {
    /// 提取编码参数
    pub fn encoder_settings(&self) -> EncoderSettings {
        EncoderSettings {
            program: self.encoder.clone(),
            bitrate: self.bitrate.clone(),
            highpass: self.highpass,
            lowpass: self.lowpass,
        }
    }
}
