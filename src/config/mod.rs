//! 設定管理
//!
//! `init.json`（表示・入力設定）と `snippets.json`（スニペット表）の読み込みと保存。
//! ファイルが無ければ既定値で作成し、壊れたJSONは起動時の致命的エラーとする。

pub mod snippets;

pub use snippets::SnippetTable;

use crate::error::ConfigError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 設定ディレクトリ名
const APP_DIR: &str = "tindit";
/// 表示・入力設定のファイル名
const CONFIG_FILE: &str = "init.json";
/// スニペット表のファイル名
const SNIPPETS_FILE: &str = "snippets.json";

/// タブキーで挿入する内容
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TabStyle {
    /// `tab_space_len` 個の空白
    #[serde(rename = "SPC")]
    Spaces,
    /// タブ文字1つ
    #[serde(rename = "TAB")]
    Tab,
}

/// エディタ設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// 行番号を表示
    pub number: bool,
    /// カーソル行からの相対行番号を表示（`number` 有効時のみ）
    pub relative_number: bool,
    pub tab_is: TabStyle,
    pub tab_space_len: usize,
    /// 入力時のスニペット候補計算
    pub snippets_enabled: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            number: false,
            relative_number: false,
            tab_is: TabStyle::Spaces,
            tab_space_len: 4,
            snippets_enabled: true,
        }
    }
}

impl EditorConfig {
    /// タブキー1回で挿入する文字列
    pub fn tab_text(&self) -> String {
        match self.tab_is {
            TabStyle::Spaces => " ".repeat(self.tab_space_len),
            TabStyle::Tab => "\t".to_string(),
        }
    }
}

/// 設定ファイルの配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
    pub dir: PathBuf,
}

impl ConfigPaths {
    /// 任意のディレクトリを使う（テスト向け）
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// プラットフォーム既定の設定ディレクトリ
    ///
    /// Windows は `%APPDATA%\tindit`、それ以外は `~/.config/tindit`。
    pub fn platform_default() -> Result<Self, ConfigError> {
        let base = if cfg!(windows) {
            dirs::config_dir()
        } else {
            dirs::home_dir().map(|home| home.join(".config"))
        };
        base.map(|base| Self::in_dir(base.join(APP_DIR)))
            .ok_or(ConfigError::NoConfigDir)
    }

    pub fn config_file(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE)
    }

    pub fn snippets_file(&self) -> PathBuf {
        self.dir.join(SNIPPETS_FILE)
    }
}

/// 永続化された設定
///
/// 保存先パスを持ち、トグル後にそのまま書き戻せる。
#[derive(Debug, Clone)]
pub struct Settings {
    pub config: EditorConfig,
    path: Option<PathBuf>,
}

impl Settings {
    /// ファイルに紐づかない設定（テスト向け）
    pub fn in_memory(config: EditorConfig) -> Self {
        Self { config, path: None }
    }

    /// 読み込み、無ければ既定値で作成
    pub fn load_or_create(paths: &ConfigPaths) -> Result<Self, ConfigError> {
        let path = paths.config_file();
        let config = load_or_create(&path, EditorConfig::default)?;
        Ok(Self {
            config,
            path: Some(path),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// 現在の設定を書き戻す
    pub fn save(&self) -> Result<(), ConfigError> {
        match &self.path {
            Some(path) => save_json(path, &self.config),
            None => Ok(()),
        }
    }
}

/// JSONファイルを読み込む。存在しなければ既定値を書き出して返す。
pub fn load_or_create<T, F>(path: &Path, default: F) -> Result<T, ConfigError>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> T,
{
    if !path.exists() {
        let value = default();
        save_json(path, &value)?;
        log::info!("created default {}", path.display());
        return Ok(value);
    }

    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })
}

/// JSONとして保存（親ディレクトリも作成）
pub fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<(), ConfigError> {
    let io_error = |source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_error)?;
    }
    let text = serde_json::to_string(value).map_err(|source| ConfigError::Encode {
        path: path.display().to_string(),
        source,
    })?;
    std::fs::write(path, text).map_err(io_error)
}
