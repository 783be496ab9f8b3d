//! エラーハンドリングシステム
//!
//! tindit 全体で使用される統一されたエラー型とユーティリティを定義。
//! 起動時の設定読み込みエラーは致命的、編集中のエラーはステータス表示で回復する。

use thiserror::Error;

/// アプリケーション全体のエラー型
#[derive(Error, Debug)]
pub enum TinditError {
    /// ファイル操作エラー
    #[error("File operation failed: {0}")]
    File(#[from] FileError),

    /// 設定エラー
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// スニペット展開エラー
    #[error("Snippet error: {0}")]
    Snippet(#[from] SnippetError),

    /// UI操作エラー
    #[error("UI operation failed: {0}")]
    Ui(#[from] UiError),
}

/// ファイル操作固有のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FileError {
    #[error("File not found: {path}")]
    NotFound { path: String },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("Invalid path: {path}")]
    InvalidPath { path: String },

    #[error("Only ASCII text can be edited: {path}")]
    NonAscii { path: String },

    #[error("{path}: {message}")]
    Io { path: String, message: String },
}

impl FileError {
    /// `std::io::Error` をパス付きで変換
    pub fn from_io(path: &std::path::Path, error: std::io::Error) -> Self {
        let path = path.display().to_string();
        match error.kind() {
            std::io::ErrorKind::NotFound => FileError::NotFound { path },
            std::io::ErrorKind::PermissionDenied => FileError::PermissionDenied { path },
            _ => FileError::Io {
                path,
                message: error.to_string(),
            },
        }
    }
}

/// 設定ファイル固有のエラー（起動時は致命的）
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not determine configuration directory")]
    NoConfigDir,

    #[error("Invalid configuration file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not encode {path}: {source}")]
    Encode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// スニペット展開固有のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SnippetError {
    #[error("Unknown snippet: {trigger}")]
    UnknownTrigger { trigger: String },

    #[error("Snippet '{trigger}' does not match line {row}")]
    TriggerNotFound { trigger: String, row: usize },
}

/// UI操作固有のエラー
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UiError {
    #[error("Terminal operation failed: {component}")]
    Terminal { component: String },
}

/// ステータスメッセージのレベル
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Error,
}

/// 一時的なステータス表示
///
/// 次の入力イベントを処理するまで表示される。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub level: MessageLevel,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: MessageLevel::Info,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: MessageLevel::Error,
        }
    }

    /// エラーから表示用メッセージを生成
    pub fn from_error(error: &TinditError) -> Self {
        Self::error(format!("Error: {}", error))
    }

    pub fn is_error(&self) -> bool {
        self.level == MessageLevel::Error
    }
}

/// パニックハンドラの設定
///
/// 端末を通常モードへ戻してからパニック情報を出力する。
pub fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        crate::app::restore_terminal();

        let (file, line) = panic_info
            .location()
            .map(|location| (location.file(), location.line()))
            .unwrap_or(("unknown", 0));

        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s
        } else {
            "Unknown panic payload"
        };

        log::error!("PANIC at {}:{}: {}", file, line, message);
        default_hook(panic_info);
    }));
}

/// プロジェクト標準のResult型
pub type Result<T> = std::result::Result<T, TinditError>;

impl From<std::io::Error> for TinditError {
    fn from(error: std::io::Error) -> Self {
        TinditError::File(FileError::Io {
            path: String::new(),
            message: error.to_string(),
        })
    }
}
