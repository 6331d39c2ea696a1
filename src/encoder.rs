//! # 外部编码器调用
//!
//! 构造 ffmpeg 命令行并执行单个文件的转码。
//!
//! ## 命令格式
//! ```text
//! ffmpeg -i <input> -b:a 96k -af "highpass=f=100, lowpass=f=15000" -y <output>
//! ```
//!
//! 编码器的退出状态不会作为错误返回：调用总是正常结束，
//! 结果以 [`EncodeStatus`] 描述，由调用方决定如何处理失败。
//!
//! ## 依赖关系
//! - 被 `commands/compress.rs` 调用
//! - 使用 `regex` 校验码率格式

use crate::error::{OggpressError, Result};

use regex::Regex;
use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, Stdio};

/// 默认编码器程序
pub const DEFAULT_ENCODER: &str = "ffmpeg";
/// 默认目标码率
pub const DEFAULT_BITRATE: &str = "96k";
/// 默认高通滤波频率 (Hz)
pub const DEFAULT_HIGHPASS: u32 = 100;
/// 默认低通滤波频率 (Hz)
pub const DEFAULT_LOWPASS: u32 = 15_000;

/// 单次转码结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodeStatus {
    /// 编码器正常退出
    Encoded,
    /// 编码器无法启动或以非零状态退出
    Failed(String),
}

impl EncodeStatus {
    /// 用于报告的简短标签
    pub fn label(&self) -> &'static str {
        match self {
            EncodeStatus::Encoded => "encoded",
            EncodeStatus::Failed(_) => "failed",
        }
    }
}

/// 转码器：把一个输入文件编码到指定输出路径
pub trait Transcoder: Sync {
    fn transcode(&self, input: &Path, output: &Path) -> EncodeStatus;
}

/// 编码参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncoderSettings {
    /// 编码器程序名或路径（通过 PATH 查找）
    pub program: String,
    /// 目标码率，如 "96k"
    pub bitrate: String,
    /// 高通滤波频率 (Hz)
    pub highpass: u32,
    /// 低通滤波频率 (Hz)
    pub lowpass: u32,
}

impl Default for EncoderSettings {
    fn default() -> Self {
        EncoderSettings {
            program: DEFAULT_ENCODER.to_string(),
            bitrate: DEFAULT_BITRATE.to_string(),
            highpass: DEFAULT_HIGHPASS,
            lowpass: DEFAULT_LOWPASS,
        }
    }
}

impl EncoderSettings {
    /// 校验参数
    pub fn validate(&self) -> Result<()> {
        if self.program.trim().is_empty() {
            return Err(OggpressError::InvalidArgument(
                "encoder program must not be empty".to_string(),
            ));
        }

        let bitrate_pattern = Regex::new(r"^[1-9][0-9]*[kKM]?$")
            .map_err(|e| OggpressError::InvalidArgument(e.to_string()))?;
        if !bitrate_pattern.is_match(&self.bitrate) {
            return Err(OggpressError::InvalidArgument(format!(
                "bitrate '{}' (expected e.g. '96k' or '128000')",
                self.bitrate
            )));
        }

        if self.highpass >= self.lowpass {
            return Err(OggpressError::InvalidArgument(format!(
                "high-pass ({} Hz) must be below low-pass ({} Hz)",
                self.highpass, self.lowpass
            )));
        }

        Ok(())
    }

    /// 滤波链字符串
    pub fn filter_chain(&self) -> String {
        format!("highpass=f={}, lowpass=f={}", self.highpass, self.lowpass)
    }

    /// 编码器参数列表（不含程序名）
    pub fn args(&self, input: &Path, output: &Path) -> Vec<OsString> {
        vec![
            "-i".into(),
            input.as_os_str().to_owned(),
            "-b:a".into(),
            self.bitrate.clone().into(),
            "-af".into(),
            self.filter_chain().into(),
            "-y".into(),
            output.as_os_str().to_owned(),
        ]
    }
}

/// 基于外部进程的编码器
pub struct ExternalEncoder {
    settings: EncoderSettings,
}

impl ExternalEncoder {
    pub fn new(settings: EncoderSettings) -> Self {
        Self { settings }
    }
}

impl Transcoder for ExternalEncoder {
    fn transcode(&self, input: &Path, output: &Path) -> EncodeStatus {
        let result = Command::new(&self.settings.program)
            .args(self.settings.args(input, output))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output();

        match result {
            Ok(out) if out.status.success() => EncodeStatus::Encoded,
            Ok(out) => {
                let stderr = String::from_utf8_lossy(&out.stderr);
                let last_line = stderr.lines().rev().find(|l| !l.trim().is_empty());
                match last_line {
                    Some(line) => EncodeStatus::Failed(format!("{}: {}", out.status, line.trim())),
                    None => EncodeStatus::Failed(out.status.to_string()),
                }
            }
            Err(e) => EncodeStatus::Failed(format!(
                "failed to launch '{}': {}",
                self.settings.program, e
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_default_command_line() {
        let settings = EncoderSettings::default();
        let args = settings.args(Path::new("sounds/a b.ogg"), Path::new("out/a b.ogg"));
        let args: Vec<String> = args
            .into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();

        assert_eq!(
            args,
            vec![
                "-i",
                "sounds/a b.ogg",
                "-b:a",
                "96k",
                "-af",
                "highpass=f=100, lowpass=f=15000",
                "-y",
                "out/a b.ogg",
            ]
        );
        assert_eq!(settings.program, "ffmpeg");
    }

    #[test]
    fn test_overridden_filters() {
        let settings = EncoderSettings {
            bitrate: "64k".to_string(),
            highpass: 80,
            lowpass: 12_000,
            ..Default::default()
        };
        assert_eq!(settings.filter_chain(), "highpass=f=80, lowpass=f=12000");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        for bitrate in ["", "0k", "96 k", "fast", "96kb"] {
            let settings = EncoderSettings {
                bitrate: bitrate.to_string(),
                ..Default::default()
            };
            assert!(settings.validate().is_err(), "accepted bitrate {:?}", bitrate);
        }

        let inverted = EncoderSettings {
            highpass: 15_000,
            lowpass: 100,
            ..Default::default()
        };
        assert!(inverted.validate().is_err());

        let unnamed = EncoderSettings {
            program: " ".to_string(),
            ..Default::default()
        };
        assert!(unnamed.validate().is_err());
    }

    #[test]
    fn test_missing_program_is_reported_not_raised() {
        let encoder = ExternalEncoder::new(EncoderSettings {
            program: "oggpress-no-such-encoder".to_string(),
            ..Default::default()
        });
        let status = encoder.transcode(&PathBuf::from("in.ogg"), &PathBuf::from("out.ogg"));
        match status {
            EncodeStatus::Failed(reason) => assert!(reason.contains("failed to launch")),
            other => panic!("unexpected status: {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_status_and_stderr_are_captured() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();

        // 复制输入到输出（参数位置与 ffmpeg 调用一致）
        let ok_script = dir.path().join("copy.sh");
        std::fs::write(&ok_script, "#!/bin/sh\necho noise\necho more >&2\ncp \"$2\" \"$8\"\n")
            .unwrap();
        let bad_script = dir.path().join("fail.sh");
        std::fs::write(&bad_script, "#!/bin/sh\necho 'Invalid data found' >&2\nexit 3\n").unwrap();
        for script in [&ok_script, &bad_script] {
            std::fs::set_permissions(script, std::fs::Permissions::from_mode(0o755)).unwrap();
        }

        let input = dir.path().join("in.ogg");
        let output = dir.path().join("out.ogg");
        std::fs::write(&input, b"abc").unwrap();

        let ok = ExternalEncoder::new(EncoderSettings {
            program: ok_script.display().to_string(),
            ..Default::default()
        });
        assert_eq!(ok.transcode(&input, &output), EncodeStatus::Encoded);
        assert_eq!(std::fs::read(&output).unwrap(), b"abc");

        let bad = ExternalEncoder::new(EncoderSettings {
            program: bad_script.display().to_string(),
            ..Default::default()
        });
        match bad.transcode(&input, &output) {
            EncodeStatus::Failed(reason) => assert!(reason.contains("Invalid data found")),
            other => panic!("unexpected status: {:?}", other),
        }
    }
}
