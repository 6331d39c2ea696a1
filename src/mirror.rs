//! # 路径镜像
//!
//! 将输入文件相对于输入根目录的位置映射到输出根目录下，
//! 保留所有中间目录名和文件名（包括原扩展名）。
//!
//! ## 依赖关系
//! - 被 `commands/compress.rs` 调用

use crate::error::{OggpressError, Result};

use std::fs;
use std::path::{Path, PathBuf};

/// 计算输出路径
///
/// `/a/x/y/z.ogg` 在输入根 `/a`、输出根 `/b` 下映射为 `/b/x/y/z.ogg`。
pub fn mirror_path(input: &Path, input_root: &Path, output_root: &Path) -> Result<PathBuf> {
    let relative = input
        .strip_prefix(input_root)
        .map_err(|_| OggpressError::PathOutsideRoot {
            path: input.display().to_string(),
            root: input_root.display().to_string(),
        })?;

    if relative.as_os_str().is_empty() {
        // 输入根本身就是单个文件
        return match input.file_name() {
            Some(name) => Ok(output_root.join(name)),
            None => Err(OggpressError::PathOutsideRoot {
                path: input.display().to_string(),
                root: input_root.display().to_string(),
            }),
        };
    }

    Ok(output_root.join(relative))
}

/// 确保输出文件的上级目录存在（幂等）
pub fn prepare_output(output: &Path) -> Result<()> {
    let parent = match output.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => return Ok(()),
    };

    fs::create_dir_all(parent).map_err(|e| OggpressError::DirectoryCreateError {
        path: parent.display().to_string(),
        source: e,
    })
}
