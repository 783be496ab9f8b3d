//! シェルコマンド実行
//!
//! `com` コマンドから呼ばれる。終了するまでエディタは応答しない。

use crate::error::{FileError, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// シェル実行の差し替え口
pub trait ShellRunner {
    /// コマンドを実行し、標準出力と標準エラーをまとめて返す
    ///
    /// 非ゼロ終了でも出力はそのまま返す。起動できなかった場合のみエラー。
    fn run(&mut self, command: &str, cwd: &Path) -> Result<String>;
}

/// OS のシェルで実行する
#[derive(Debug, Clone)]
pub struct SystemShell {
    program: PathBuf,
    flag: &'static str,
}

impl SystemShell {
    pub fn new() -> Self {
        if cfg!(windows) {
            Self {
                program: PathBuf::from("cmd"),
                flag: "/C",
            }
        } else {
            Self {
                program: PathBuf::from("sh"),
                flag: "-c",
            }
        }
    }
}

impl Default for SystemShell {
    fn default() -> Self {
        Self::new()
    }
}

impl ShellRunner for SystemShell {
    fn run(&mut self, command: &str, cwd: &Path) -> Result<String> {
        log::debug!("running shell command: {}", command);
        let output = Command::new(&self.program)
            .arg(self.flag)
            .arg(command)
            .current_dir(cwd)
            .output()
            .map_err(|e| FileError::from_io(&self.program, e))?;

        if !output.status.success() {
            log::info!("shell command exited with {}", output.status);
        }

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));
        Ok(text)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_captures_stdout() {
        let mut shell = SystemShell::new();
        let output = shell.run("echo hello", Path::new(".")).unwrap();
        assert_eq!(output, "hello\n");
    }

    #[test]
    fn test_failure_output_is_returned() {
        let mut shell = SystemShell::new();
        let output = shell.run("echo oops 1>&2; exit 3", Path::new(".")).unwrap();
        assert_eq!(output, "oops\n");
    }
}
