//! スニペット候補計算と展開
//!
//! 現在行の内容からトリガー候補を求め、選ばれた本文をバッファへ複数行で挿入する。

use crate::buffer::{trim_line, LineBuffer, LINE_TERMINATOR};
use crate::config::SnippetTable;
use crate::error::SnippetError;

/// スニペットエンジン
///
/// 表はセッション開始時に一度だけ読み込まれ、編集中は変更されない。
#[derive(Debug, Clone, Default)]
pub struct SnippetEngine {
    snippets: SnippetTable,
}

impl SnippetEngine {
    pub fn new(snippets: SnippetTable) -> Self {
        Self { snippets }
    }

    /// `(トリガー, 本文)` の列から作成
    pub fn with_snippets<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::new(
            entries
                .into_iter()
                .map(|(trigger, body)| (trigger.into(), body.into()))
                .filter(|(trigger, _)| !trigger.is_empty())
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.snippets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }

    /// トリガーの展開本文
    pub fn body(&self, trigger: &str) -> Option<&str> {
        self.snippets.get(trigger).map(String::as_str)
    }

    /// 現在行に対する候補（表の挿入順）
    ///
    /// 行末がトリガーと一致するもの（入力済み）と、行がトリガーの先頭部分である
    /// もの（入力途中）の両方を返す。空行はすべてのトリガーの先頭部分に一致する。
    pub fn suggest(&self, current_line: &str) -> Vec<String> {
        let typed = trim_line(current_line);
        self.snippets
            .keys()
            .filter(|trigger| trigger_start(typed, trigger).is_some())
            .cloned()
            .collect()
    }

    /// `row` 行のトリガーを本文で置き換える
    ///
    /// トリガーの位置は `suggest` と同じ規則で行全体（末尾空白を除く）から求める。
    /// 戻り値は展開後のカーソル位置（最後に挿入した本文行の末尾）。
    pub fn expand(
        &self,
        buffer: &mut LineBuffer,
        row: usize,
        trigger: &str,
    ) -> Result<(usize, usize), SnippetError> {
        let body = self
            .body(trigger)
            .ok_or_else(|| SnippetError::UnknownTrigger {
                trigger: trigger.to_string(),
            })?;

        let line = buffer.line(row);
        let typed = trim_line(line);
        let start = trigger_start(typed, trigger).ok_or_else(|| SnippetError::TriggerNotFound {
            trigger: trigger.to_string(),
            row,
        })?;
        let had_terminator = line.ends_with(LINE_TERMINATOR);

        let mut text = String::with_capacity(start + body.len() + 1);
        text.push_str(&typed[..start]);
        text.push_str(body);
        let inserted = text
            .strip_suffix(LINE_TERMINATOR)
            .unwrap_or(text.as_str())
            .to_string();
        if had_terminator && !body.ends_with(LINE_TERMINATOR) {
            text.push(LINE_TERMINATOR);
        }

        let replacement: Vec<String> = text
            .split_inclusive(LINE_TERMINATOR)
            .map(str::to_string)
            .collect();
        buffer.replace_line(row, replacement);

        let cursor_row = row + inserted.matches(LINE_TERMINATOR).count();
        let last_segment = inserted
            .rsplit(LINE_TERMINATOR)
            .next()
            .unwrap_or_default();
        let cursor_col = last_segment.len().min(buffer.content_len(cursor_row));

        log::debug!("expanded snippet '{}' at line {}", trigger, row + 1);
        Ok((cursor_row, cursor_col))
    }
}

/// 入力済みの行に対するトリガーの置き換え開始位置
///
/// 行末がトリガーならその位置、行がトリガーの先頭部分なら行頭。どちらでもなければ None。
fn trigger_start(typed: &str, trigger: &str) -> Option<usize> {
    if typed.ends_with(trigger) {
        Some(typed.len() - trigger.len())
    } else if trigger.starts_with(typed) {
        Some(0)
    } else {
        None
    }
}

/// 候補選択の移動（両方向に循環）
///
/// 候補が空なら現在値をそのまま返す。
pub fn wrap_selection(selected: usize, delta: isize, count: usize) -> usize {
    if count == 0 {
        return selected;
    }
    let count = count as isize;
    (selected as isize + delta).rem_euclid(count) as usize
}
