//! 行指向テキストバッファ
//!
//! ドキュメントを行の列として保持する。各行は末尾の改行を含む（最終行を除く）。

/// 行終端文字
pub const LINE_TERMINATOR: char = '\n';

/// 行の末尾空白・改行を除いた部分
pub fn trim_line(line: &str) -> &str {
    line.trim_end()
}

/// 行から改行のみを除いた部分
pub fn strip_terminator(line: &str) -> &str {
    line.strip_suffix(LINE_TERMINATOR).unwrap_or(line)
}

/// 行単位のテキストバッファ
///
/// `lines` は常に1行以上を保持する。範囲外のインデックスは呼び出し側の
/// プログラミングエラーとしてパニックする。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineBuffer {
    lines: Vec<String>,
}

impl LineBuffer {
    /// 空の1行だけを持つバッファを作成
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
        }
    }

    /// テキストを改行を保持したまま行に分割して読み込む
    pub fn load(text: &str) -> Self {
        let mut lines: Vec<String> = text
            .split_inclusive(LINE_TERMINATOR)
            .map(str::to_string)
            .collect();
        if lines.is_empty() {
            lines.push(String::new());
        }
        Self { lines }
    }

    /// 既存の行列からバッファを作成（空なら空行1つ）
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut lines: Vec<String> = lines.into_iter().map(Into::into).collect();
        if lines.is_empty() {
            lines.push(String::new());
        }
        Self { lines }
    }

    /// 行をそのまま連結して返す
    pub fn serialize(&self) -> String {
        self.lines.concat()
    }

    /// 行数
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// 行が存在しないことはないため常に false
    pub fn is_empty(&self) -> bool {
        false
    }

    /// 1行への読み取りアクセス
    pub fn line(&self, row: usize) -> &str {
        &self.lines[row]
    }

    /// 全行のイテレータ
    pub fn lines(&self) -> impl Iterator<Item = &str> + '_ {
        self.lines.iter().map(String::as_str)
    }

    /// 末尾空白を除いた行の長さ（カーソル移動の上限）
    pub fn trimmed_len(&self, row: usize) -> usize {
        trim_line(&self.lines[row]).len()
    }

    /// 改行を除いた行の長さ（編集位置の上限）
    pub fn content_len(&self, row: usize) -> usize {
        strip_terminator(&self.lines[row]).len()
    }

    /// 文字を挿入し、新しいカーソル位置を返す
    ///
    /// 改行の場合は `col` で行を分割する。
    pub fn insert_char(&mut self, row: usize, col: usize, ch: char) -> (usize, usize) {
        assert!(
            col <= self.content_len(row),
            "insert column {} beyond line {} length {}",
            col,
            row,
            self.content_len(row)
        );

        if ch == LINE_TERMINATOR {
            let tail = self.lines[row].split_off(col);
            self.lines[row].push(LINE_TERMINATOR);
            self.lines.insert(row + 1, tail);
            (row + 1, 0)
        } else {
            self.lines[row].insert(col, ch);
            (row, col + 1)
        }
    }

    /// カーソル直前の文字を削除し、新しいカーソル位置を返す
    ///
    /// 行頭では前の行（末尾空白を除去）と結合する。
    pub fn delete_before(&mut self, row: usize, col: usize) -> (usize, usize) {
        assert!(
            col <= self.content_len(row),
            "delete column {} beyond line {} length {}",
            col,
            row,
            self.content_len(row)
        );

        if col > 0 {
            self.lines[row].remove(col - 1);
            (row, col - 1)
        } else if row > 0 {
            let current = self.lines.remove(row);
            let previous = &mut self.lines[row - 1];
            let joined_at = trim_line(previous).len();
            previous.truncate(joined_at);
            previous.push_str(&current);
            (row - 1, joined_at)
        } else {
            (0, 0)
        }
    }

    /// 1行を複数行で置き換える（空なら空行1つ）
    pub fn replace_line(&mut self, row: usize, replacement: Vec<String>) {
        assert!(row < self.lines.len(), "replace row {} out of range", row);
        let replacement = if replacement.is_empty() {
            vec![String::new()]
        } else {
            replacement
        };
        self.lines.splice(row..=row, replacement);
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}
