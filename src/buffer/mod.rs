//! バッファ管理モジュール
//!
//! 行指向のテキストデータ、カーソル位置とスクロール位置の管理を提供

pub mod cursor;
pub mod lines;

// 公開API
pub use cursor::CursorViewport;
pub use lines::{strip_terminator, trim_line, LineBuffer, LINE_TERMINATOR};

use std::path::{Path, PathBuf};

/// 開いているファイル
///
/// ファイルパス・内容・カーソルをまとめて保持する。閉じると破棄される。
#[derive(Debug, Clone)]
pub struct Document {
    /// 関連ファイルパス
    pub path: PathBuf,
    /// バッファ内容
    pub buffer: LineBuffer,
    /// カーソルとスクロール位置
    pub cursor: CursorViewport,
}

impl Document {
    /// 内容付きでドキュメントを作成
    pub fn new(path: PathBuf, buffer: LineBuffer) -> Self {
        Self {
            path,
            buffer,
            cursor: CursorViewport::new(),
        }
    }

    /// 表示用のファイル名
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
