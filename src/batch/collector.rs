//! # 文件收集器
//!
//! 递归扫描输入根目录，按扩展名收集待压缩的音频文件。
//!
//! ## 功能
//! - 支持单文件和目录输入
//! - 多扩展名匹配（逗号分隔，区分大小写）
//! - 递归目录搜索，顺序由文件系统决定
//!
//! ## 依赖关系
//! - 被 `commands/compress.rs`, `commands/scan.rs` 调用
//! - 使用 `walkdir` 遍历目录

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 默认扩展名
pub const DEFAULT_EXTENSION: &str = "ogg";

/// 文件收集器
pub struct FileCollector {
    /// 输入根路径
    root: PathBuf,
    /// 文件名后缀列表（含前导点，如 ".ogg"）
    suffixes: Vec<String>,
}

impl FileCollector {
    /// 创建新的文件收集器，默认只收集 `.ogg`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            suffixes: vec![format!(".{}", DEFAULT_EXTENSION)],
        }
    }

    /// 设置扩展名（逗号分隔的多扩展名，前导点可省略）
    pub fn with_extensions(mut self, extensions: &str) -> Self {
        let suffixes: Vec<String> = extensions
            .split(',')
            .map(|s| s.trim().trim_start_matches('.'))
            .filter(|s| !s.is_empty())
            .map(|s| format!(".{}", s))
            .collect();
        if !suffixes.is_empty() {
            self.suffixes = suffixes;
        }
        self
    }

    /// 输入根路径
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// 收集所有匹配的文件
    ///
    /// 根目录不存在或不可读时返回空列表。
    pub fn collect(&self) -> Vec<PathBuf> {
        if self.root.is_file() {
            return if self.matches(&self.root) {
                vec![self.root.clone()]
            } else {
                vec![]
            };
        }

        if !self.root.is_dir() {
            return vec![];
        }

        // 符号链接指向的文件也算作文件
        WalkDir::new(&self.root)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_file())
            .filter(|e| self.matches(e.path()))
            .map(|e| e.into_path())
            .collect()
    }

    /// 检查文件名是否以任一后缀结尾
    fn matches(&self, path: &Path) -> bool {
        let filename = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name,
            None => return false,
        };

        self.suffixes.iter().any(|suffix| filename.ends_with(suffix.as_str()))
    }
}
