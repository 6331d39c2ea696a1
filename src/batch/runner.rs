//! # 批量执行器
//!
//! 在固定大小的线程池中并行执行转码任务。
//!
//! ## 功能
//! - 基于 rayon 的并行迭代，结果顺序与输入顺序一致
//! - 总体进度条
//! - 失败统计与汇总
//!
//! ## 依赖关系
//! - 被 `commands/compress.rs` 调用
//! - 使用 `utils/progress.rs` 创建进度条
//! - 使用 `rayon` 进行并行处理

use crate::encoder::EncodeStatus;
use crate::error::Result;
use crate::utils::progress;

use rayon::prelude::*;
use std::path::PathBuf;

/// 默认并行作业数
pub const DEFAULT_JOBS: usize = 8;

/// 单个文件的转码任务结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    /// 输入文件
    pub input: PathBuf,
    /// 镜像后的输出文件
    pub output: PathBuf,
    /// 编码状态
    pub status: EncodeStatus,
}

/// 批量处理结果统计
#[derive(Debug, Default)]
pub struct BatchSummary {
    /// 成功数量
    pub encoded: usize,
    /// 失败数量
    pub failed: usize,
    /// 失败详情
    pub failures: Vec<(String, String)>, // (文件路径, 错误信息)
}

impl BatchSummary {
    /// 从任务列表汇总
    pub fn from_jobs(jobs: &[Job]) -> Self {
        let mut summary = BatchSummary::default();
        for job in jobs {
            match &job.status {
                EncodeStatus::Encoded => summary.encoded += 1,
                EncodeStatus::Failed(reason) => {
                    summary.failed += 1;
                    summary
                        .failures
                        .push((job.input.display().to_string(), reason.clone()));
                }
            }
        }
        summary
    }

    /// 总处理数量
    pub fn total(&self) -> usize {
        self.encoded + self.failed
    }
}

/// 批量执行器
pub struct BatchRunner {
    /// 并行作业数
    jobs: usize,
}

impl BatchRunner {
    /// 创建新的批量执行器（0 表示按 CPU 数自动决定）
    pub fn new(jobs: usize) -> Self {
        let jobs = if jobs == 0 { num_cpus::get() } else { jobs };
        Self { jobs }
    }

    pub fn jobs(&self) -> usize {
        self.jobs
    }

    /// 并行处理任务列表
    ///
    /// 阻塞直到所有任务返回；返回的第 i 个结果对应第 i 个输入项。
    pub fn run<T, R, F>(&self, items: &[T], processor: F) -> Result<Vec<R>>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Sync + Send,
    {
        let pb = progress::create_progress_bar(items.len() as u64, "Encoding");

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .build()?;

        let results: Vec<R> = pool.install(|| {
            items
                .par_iter()
                .map(|item| {
                    let result = processor(item);
                    pb.inc(1);
                    result
                })
                .collect()
        });

        pb.finish_and_clear();

        Ok(results)
    }
}
