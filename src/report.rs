//! # 体积统计与报告
//!
//! 所有转码任务完成后，统计原始文件与输出文件的总字节数，
//! 以 MiB 为单位输出；可选导出逐文件 CSV 清单。
//!
//! ## 输出格式
//! ```text
//! Original Total Size: 3.00 MB
//! Compressed Total Size: 1.25 MB
//! ```
//!
//! ## 依赖关系
//! - 被 `commands/compress.rs`, `commands/scan.rs` 调用
//! - 使用 `batch/runner.rs` 的 Job 结构
//! - 使用 `csv` + `serde` 写入清单

use crate::batch::Job;
use crate::error::{OggpressError, Result};

use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// 1 MiB 的字节数
pub const BYTES_PER_MIB: f64 = 1_048_576.0;

/// 字节数转换为 MiB
pub fn to_mib(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_MIB
}

/// 两位小数的 MiB 字符串
pub fn format_mib(bytes: u64) -> String {
    format!("{:.2}", to_mib(bytes))
}

/// 读取单个文件大小，文件不存在时返回 FileNotFound
pub fn file_size(path: &Path) -> Result<u64> {
    match fs::metadata(path) {
        Ok(meta) => Ok(meta.len()),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(OggpressError::FileNotFound {
            path: path.display().to_string(),
        }),
        Err(e) => Err(OggpressError::FileReadError {
            path: path.display().to_string(),
            source: e,
        }),
    }
}

/// 按顺序累加文件大小，遇到第一个缺失文件即失败
pub fn total_size<'a, I>(paths: I) -> Result<u64>
where
    I: IntoIterator<Item = &'a Path>,
{
    paths
        .into_iter()
        .try_fold(0u64, |acc, path| -> Result<u64> { Ok(acc + file_size(path)?) })
}

/// 压缩前后的总大小
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SizeTotals {
    pub original_bytes: u64,
    pub compressed_bytes: u64,
}

impl SizeTotals {
    /// 统计所有任务的输入与输出大小
    ///
    /// 不论编码是否成功都会读取输出文件大小，缺失的输出文件是错误。
    pub fn from_jobs(jobs: &[Job]) -> Result<Self> {
        let original_bytes = total_size(jobs.iter().map(|j| j.input.as_path()))?;
        let compressed_bytes = total_size(jobs.iter().map(|j| j.output.as_path()))?;
        Ok(SizeTotals {
            original_bytes,
            compressed_bytes,
        })
    }

    /// 节省的百分比，原始大小为 0 时无意义
    pub fn saved_percent(&self) -> Option<f64> {
        if self.original_bytes == 0 {
            return None;
        }
        let saved = self.original_bytes as f64 - self.compressed_bytes as f64;
        Some(saved / self.original_bytes as f64 * 100.0)
    }

    /// 报告文本（两行）
    pub fn report_lines(&self) -> [String; 2] {
        [
            format!("Original Total Size: {} MB", format_mib(self.original_bytes)),
            format!(
                "Compressed Total Size: {} MB",
                format_mib(self.compressed_bytes)
            ),
        ]
    }
}

/// CSV 清单行
#[derive(Debug, Serialize)]
struct ManifestRow {
    input: String,
    output: String,
    status: &'static str,
    original_bytes: Option<u64>,
    compressed_bytes: Option<u64>,
}

/// 写入逐文件清单
///
/// 缺失的文件大小留空，因此可以在统计失败前写出用于排查。
pub fn write_manifest(jobs: &[Job], output_path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(output_path)?;

    for job in jobs {
        wtr.serialize(ManifestRow {
            input: job.input.display().to_string(),
            output: job.output.display().to_string(),
            status: job.status.label(),
            original_bytes: fs::metadata(&job.input).ok().map(|m| m.len()),
            compressed_bytes: fs::metadata(&job.output).ok().map(|m| m.len()),
        })?;
    }

    wtr.flush().map_err(|e| OggpressError::FileWriteError {
        path: output_path.display().to_string(),
        source: e,
    })?;

    Ok(())
}
