//! # compress 命令实现
//!
//! 发现 → 并行转码 → 体积统计 的完整流程。
//!
//! ## 功能
//! - 递归收集输入目录中的音频文件
//! - 在固定大小的线程池中调用外部编码器
//! - 输出目录镜像输入目录结构
//! - 统计并打印压缩前后的总大小
//!
//! ## 失败策略
//! 编码失败不会中断流程，只在统计前给出警告；之后读取缺失的
//! 输出文件时报 FileNotFound。`--strict` 时在统计前直接失败。
//!
//! ## 依赖关系
//! - 使用 `cli/compress.rs` 定义的参数
//! - 使用 `batch/`, `encoder.rs`, `mirror.rs`, `report.rs`
//! - 使用 `utils/output.rs`

use crate::batch::{BatchRunner, BatchSummary, FileCollector, Job};
use crate::cli::compress::CompressArgs;
use crate::encoder::{EncodeStatus, ExternalEncoder, Transcoder};
use crate::error::{OggpressError, Result};
use crate::mirror::{mirror_path, prepare_output};
use crate::report::{self, SizeTotals};
use crate::utils::output;

use colored::Colorize;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// 最多列出的失败文件数
const MAX_LISTED_FAILURES: usize = 10;

/// 执行 compress 命令
pub fn execute(args: CompressArgs) -> Result<()> {
    output::print_header("Batch Audio Compression");

    let settings = args.encoder_settings();
    settings.validate()?;

    let files = FileCollector::new(args.input.clone())
        .with_extensions(&args.ext)
        .collect();

    if files.is_empty() {
        output::print_warning(&format!(
            "No '{}' files found under '{}'",
            args.ext,
            args.input.display()
        ));
    } else {
        output::print_info(&format!(
            "Found {} files under '{}'",
            files.len(),
            args.input.display()
        ));
    }

    output::print_info(&format!(
        "Encoder: {} -b:a {} -af \"{}\"",
        settings.program,
        settings.bitrate,
        settings.filter_chain()
    ));

    let encoder = ExternalEncoder::new(settings);
    let runner = BatchRunner::new(args.jobs);
    output::print_info(&format!("Running {} parallel jobs", runner.jobs()));

    let jobs = compress_tree(&files, &args.input, &args.output, &encoder, &runner)?;

    let summary = BatchSummary::from_jobs(&jobs);
    report_failures(&summary);

    if let Some(ref manifest) = args.manifest {
        report::write_manifest(&jobs, manifest)?;
        output::print_info(&format!("Manifest written to '{}'", manifest.display()));
    }

    if args.strict && summary.failed > 0 {
        return Err(OggpressError::EncodeFailed {
            failed: summary.failed,
            total: summary.total(),
        });
    }

    let totals = SizeTotals::from_jobs(&jobs)?;

    output::print_separator();
    write_totals(&mut io::stdout().lock(), &totals, &args.output).map_err(|e| {
        OggpressError::FileWriteError {
            path: "<stdout>".to_string(),
            source: e,
        }
    })?;

    Ok(())
}

/// 写出统计结果，两行总大小总是最后输出
fn write_totals<W: Write>(
    out: &mut W,
    totals: &SizeTotals,
    output_root: &Path,
) -> io::Result<()> {
    if let Some(saved) = totals.saved_percent() {
        writeln!(
            out,
            "{} Saved {:.2}% into '{}'",
            "[DONE]".green().bold(),
            saved,
            output_root.display()
        )?;
    }

    for line in totals.report_lines() {
        writeln!(out, "{}", line)?;
    }

    Ok(())
}

/// 压缩单个文件到镜像路径
///
/// 输入不在输入根目录下时返回 PathOutsideRoot；
/// 目录创建失败记录为该任务的失败状态。
pub fn compress_file<T: Transcoder>(
    input: &Path,
    input_root: &Path,
    output_root: &Path,
    encoder: &T,
) -> Result<Job> {
    let output = mirror_path(input, input_root, output_root)?;

    let status = match prepare_output(&output) {
        Ok(()) => encoder.transcode(input, &output),
        Err(e) => EncodeStatus::Failed(e.to_string()),
    };

    Ok(Job {
        input: input.to_path_buf(),
        output,
        status,
    })
}

/// 并行压缩文件列表，返回与输入顺序一致的任务列表
///
/// 所有任务返回后，按输入顺序报告第一个路径映射错误。
pub fn compress_tree<T: Transcoder>(
    files: &[PathBuf],
    input_root: &Path,
    output_root: &Path,
    encoder: &T,
    runner: &BatchRunner,
) -> Result<Vec<Job>> {
    fs::create_dir_all(output_root).map_err(|e| OggpressError::DirectoryCreateError {
        path: output_root.display().to_string(),
        source: e,
    })?;

    runner
        .run(files, |file| {
            compress_file(file, input_root, output_root, encoder)
        })?
        .into_iter()
        .collect()
}

/// 打印失败统计
fn report_failures(summary: &BatchSummary) {
    if summary.failed == 0 {
        if summary.total() > 0 {
            output::print_success(&format!("Encoded {} files", summary.encoded));
        }
        return;
    }

    output::print_warning(&format!(
        "{} of {} encodes failed:",
        summary.failed,
        summary.total()
    ));
    for (path, err) in summary.failures.iter().take(MAX_LISTED_FAILURES) {
        output::print_error(&format!("  {}: {}", path, err));
    }
    if summary.failures.len() > MAX_LISTED_FAILURES {
        output::print_warning(&format!(
            "  ... and {} more",
            summary.failures.len() - MAX_LISTED_FAILURES
        ));
    }
}
