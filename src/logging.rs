//! ロギングシステム
//!
//! `log` ファサードの出力先。端末はUIが占有するため、ログはファイルへ書き出す。

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::{Level, LevelFilter, Log, Metadata, Record};

/// デバッグログを有効にする環境変数
pub const DEBUG_ENV: &str = "TINDIT_DEBUG";

/// ファイルロガー
#[derive(Debug)]
pub struct Logger {
    level: LevelFilter,
    output_file: Mutex<Option<std::fs::File>>,
    path: PathBuf,
}

impl Logger {
    /// 指定パスへ追記するロガーを作成
    pub fn new(path: impl Into<PathBuf>, level: LevelFilter) -> std::io::Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            level,
            output_file: Mutex::new(Some(file)),
            path,
        })
    }

    /// ログレベルを取得
    pub fn level(&self) -> LevelFilter {
        self.level
    }

    /// 出力先パス
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tag(level: Level) -> &'static str {
        match level {
            Level::Error => "ERROR",
            Level::Warn => "WARNING",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Trace => "TRACE",
        }
    }

    fn format_record(record: &Record<'_>) -> String {
        match (record.file(), record.line()) {
            (Some(file), Some(line)) if record.level() >= Level::Debug => format!(
                "{}: {} at {}:{}",
                Self::tag(record.level()),
                record.args(),
                file,
                line
            ),
            _ => format!("{}: {} in {}", Self::tag(record.level()), record.args(), record.target()),
        }
    }
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = Self::format_record(record);
        if let Ok(mut guard) = self.output_file.lock() {
            if let Some(file) = guard.as_mut() {
                let _ = writeln!(file, "{}", line);
            }
        }
    }

    fn flush(&self) {
        if let Ok(mut guard) = self.output_file.lock() {
            if let Some(file) = guard.as_mut() {
                let _ = file.flush();
            }
        }
    }
}

/// 既定のログ出力先（`~/.tindit-log/debug.log`）
pub fn default_log_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".tindit-log").join("debug.log"))
}

/// グローバルロガーを初期化
///
/// 明示的なパスも環境変数もない場合はロガーを登録しない（`log` マクロは無出力）。
pub fn init(explicit_path: Option<PathBuf>) -> std::io::Result<Option<PathBuf>> {
    let path = match explicit_path {
        Some(path) => path,
        None if std::env::var_os(DEBUG_ENV).is_some() => match default_log_path() {
            Some(path) => path,
            None => return Ok(None),
        },
        None => return Ok(None),
    };

    let logger = Logger::new(&path, LevelFilter::Debug)?;
    let level = logger.level();
    if log::set_logger(Box::leak(Box::new(logger))).is_ok() {
        log::set_max_level(level);
    }
    Ok(Some(path))
}
