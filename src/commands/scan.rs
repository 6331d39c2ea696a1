//! # scan 命令实现
//!
//! 只执行文件发现，按子目录汇总文件数与大小，不调用编码器。
//!
//! ## 依赖关系
//! - 使用 `cli/scan.rs` 定义的参数
//! - 使用 `batch/collector.rs`, `report.rs`
//! - 使用 `tabled` 打印终端表格

use crate::batch::FileCollector;
use crate::cli::scan::ScanArgs;
use crate::error::Result;
use crate::report;
use crate::utils::output;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tabled::{Table, Tabled};

/// 目录汇总行
#[derive(Debug, Clone, PartialEq, Eq, Tabled)]
struct DirectoryRow {
    #[tabled(rename = "Directory")]
    directory: String,
    #[tabled(rename = "Files")]
    files: usize,
    #[tabled(rename = "Size (MB)")]
    size: String,
}

/// 执行 scan 命令
pub fn execute(args: ScanArgs) -> Result<()> {
    output::print_header("Scanning Audio Files");

    let collector = FileCollector::new(args.input.clone()).with_extensions(&args.ext);
    let files = collector.collect();

    if files.is_empty() {
        output::print_warning(&format!(
            "No '{}' files found under '{}'",
            args.ext,
            args.input.display()
        ));
        return Ok(());
    }

    let (rows, total_bytes) = summarize(&files, collector.root())?;

    println!("{}", Table::new(&rows));
    output::print_done(&format!(
        "{} files, {} MB in total",
        files.len(),
        report::format_mib(total_bytes)
    ));

    Ok(())
}

/// 按相对父目录分组统计
fn summarize(files: &[PathBuf], root: &Path) -> Result<(Vec<DirectoryRow>, u64)> {
    let mut groups: BTreeMap<String, (usize, u64)> = BTreeMap::new();
    let mut total_bytes = 0u64;

    for file in files {
        let size = report::file_size(file)?;
        total_bytes += size;

        let relative = file.strip_prefix(root).unwrap_or(file.as_path());
        let directory = match relative.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.display().to_string(),
            _ => ".".to_string(),
        };

        let entry = groups.entry(directory).or_insert((0, 0));
        entry.0 += 1;
        entry.1 += size;
    }

    let rows = groups
        .into_iter()
        .map(|(directory, (files, bytes))| DirectoryRow {
            directory,
            files,
            size: report::format_mib(bytes),
        })
        .collect();

    Ok((rows, total_bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_bytes(path: &Path, len: usize) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, vec![1u8; len]).unwrap();
    }

    #[test]
    fn test_summarize_groups_by_directory() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        write_bytes(&root.join("a.ogg"), 524_288);
        write_bytes(&root.join("ui/b.ogg"), 1_048_576);
        write_bytes(&root.join("ui/c.ogg"), 1_048_576);

        let files = FileCollector::new(root).collect();
        let (rows, total) = summarize(&files, root).unwrap();

        assert_eq!(total, 2_621_440);
        assert_eq!(
            rows,
            vec![
                DirectoryRow {
                    directory: ".".to_string(),
                    files: 1,
                    size: "0.50".to_string(),
                },
                DirectoryRow {
                    directory: "ui".to_string(),
                    files: 2,
                    size: "2.00".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_execute_on_empty_tree() {
        let dir = tempdir().unwrap();
        let args = ScanArgs {
            input: dir.path().to_path_buf(),
            ext: "ogg".to_string(),
        };
        assert!(execute(args).is_ok());
    }
}
