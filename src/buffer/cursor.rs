//! カーソル位置とスクロール管理
//!
//! カーソル（行・列）と表示開始行を保持し、バッファの状態に合わせて補正する。

use super::LineBuffer;

/// カーソルとビューポート
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorViewport {
    /// 行番号（0ベース）
    row: usize,
    /// 列番号（0ベース、末尾空白を除いた行内）
    col: usize,
    /// 表示の開始行
    top_line: usize,
}

impl CursorViewport {
    /// 原点に配置したカーソルを作成
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn top_line(&self) -> usize {
        self.top_line
    }

    /// (0, 0, 0) に戻す
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// 相対移動
    ///
    /// 行はバッファ範囲に、列は移動先の行の末尾空白を除いた長さに丸める。
    pub fn move_by(&mut self, buffer: &LineBuffer, dy: isize, dx: isize) {
        let last_row = buffer.len() - 1;
        let row = self.row.saturating_add_signed(dy).min(last_row);
        let max_col = buffer.trimmed_len(row);
        let col = self.col.saturating_add_signed(dx).min(max_col);
        self.row = row;
        self.col = col;
    }

    /// 行頭に移動
    pub fn move_to_home(&mut self) {
        self.col = 0;
    }

    /// 行末（末尾空白の手前）に移動
    pub fn move_to_end(&mut self, buffer: &LineBuffer) {
        self.col = buffer.trimmed_len(self.row);
    }

    /// ページ単位の移動
    pub fn page(&mut self, buffer: &LineBuffer, viewport_height: usize, forward: bool) {
        let step = viewport_height.saturating_sub(1) as isize;
        let dy = if forward { step } else { -step };
        self.move_by(buffer, dy, 0);
    }

    /// 編集後のカーソル位置を設定
    pub fn set_position(&mut self, row: usize, col: usize) {
        self.row = row;
        self.col = col;
    }

    /// カーソル行が画面内に収まるようスクロールする
    ///
    /// 戻り値はスクロールが発生したかどうか
    pub fn scroll_to_keep_visible(&mut self, viewport_height: usize) -> bool {
        let height = viewport_height.max(1);
        if self.row >= self.top_line + height {
            self.top_line = self.row + 1 - height;
            true
        } else if self.row < self.top_line {
            self.top_line = self.row;
            true
        } else {
            false
        }
    }

    /// テキスト領域内でのカーソル座標（x, y）
    pub fn screen_position(&self, gutter_width: usize) -> (usize, usize) {
        (self.col + gutter_width, self.row - self.top_line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer() -> LineBuffer {
        LineBuffer::load("First line\nab\n\nFourth line   \nlast")
    }

    #[test]
    fn test_cursor_creation() {
        let cursor = CursorViewport::new();
        assert_eq!((cursor.row(), cursor.col(), cursor.top_line()), (0, 0, 0));
    }

    #[test]
    fn test_vertical_move_snaps_to_shorter_line() {
        let buffer = buffer();
        let mut cursor = CursorViewport::new();
        cursor.move_by(&buffer, 0, 8);
        assert_eq!(cursor.col(), 8);

        cursor.move_by(&buffer, 1, 0);
        assert_eq!((cursor.row(), cursor.col()), (1, 2));

        cursor.move_by(&buffer, 1, 0);
        assert_eq!((cursor.row(), cursor.col()), (2, 0));
    }

    #[test]
    fn test_move_clamps_large_deltas() {
        let buffer = buffer();
        let mut cursor = CursorViewport::new();
        cursor.move_by(&buffer, isize::MAX, isize::MAX);
        assert_eq!((cursor.row(), cursor.col()), (4, 4));

        cursor.move_by(&buffer, isize::MIN, isize::MIN);
        assert_eq!((cursor.row(), cursor.col()), (0, 0));
    }

    #[test]
    fn test_end_excludes_trailing_whitespace() {
        let buffer = buffer();
        let mut cursor = CursorViewport::new();
        cursor.move_by(&buffer, 3, 0);
        cursor.move_to_end(&buffer);
        assert_eq!(cursor.col(), "Fourth line".len());

        cursor.move_to_home();
        assert_eq!(cursor.col(), 0);
    }

    #[test]
    fn test_scroll_down_and_up() {
        let mut cursor = CursorViewport::new();
        cursor.set_position(10, 0);
        assert!(cursor.scroll_to_keep_visible(4));
        assert_eq!(cursor.top_line(), 7);

        cursor.set_position(8, 0);
        assert!(!cursor.scroll_to_keep_visible(4));

        cursor.set_position(2, 0);
        assert!(cursor.scroll_to_keep_visible(4));
        assert_eq!(cursor.top_line(), 2);
    }

    #[test]
    fn test_page_moves_by_viewport_minus_one() {
        let buffer = LineBuffer::load(&"x\n".repeat(50));
        let mut cursor = CursorViewport::new();
        cursor.page(&buffer, 10, true);
        assert_eq!(cursor.row(), 9);
        cursor.page(&buffer, 10, false);
        assert_eq!(cursor.row(), 0);
    }

    #[test]
    fn test_screen_position_includes_gutter() {
        let mut cursor = CursorViewport::new();
        cursor.set_position(12, 3);
        cursor.scroll_to_keep_visible(5);
        assert_eq!(cursor.screen_position(5), (8, 4));
    }
}
