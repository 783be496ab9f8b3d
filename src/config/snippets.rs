//! スニペット表の永続化

use super::{load_or_create, ConfigPaths};
use crate::error::ConfigError;
use indexmap::IndexMap;

/// トリガー名 → 展開本文（挿入順を保持）
pub type SnippetTable = IndexMap<String, String>;

/// 初回起動時に書き出すスニペット表
pub fn default_snippets() -> SnippetTable {
    let mut table = SnippetTable::new();
    table.insert("hello".to_string(), "print(\"Hello, world!\")\n".to_string());
    table
}

/// `snippets.json` を読み込み、無ければ既定の表で作成
///
/// 空のトリガー名はすべての行に一致してしまうため読み込み時に除外する。
pub fn load_snippets(paths: &ConfigPaths) -> Result<SnippetTable, ConfigError> {
    let mut table: SnippetTable = load_or_create(&paths.snippets_file(), default_snippets)?;
    if table.shift_remove("").is_some() {
        log::warn!("ignoring snippet with empty trigger name");
    }
    Ok(table)
}
