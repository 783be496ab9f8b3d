//! イベントハンドリング
//!
//! crossterm のキーイベントをエディタの入力イベントへ変換する

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// エディタが扱う入力イベント
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorEvent {
    /// 印字可能文字
    Char(char),
    Enter,
    Tab,
    Backspace,
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    Home,
    End,
    Escape,
    /// 保存（C-s）
    Save,
    /// コマンドモードへ（F1）
    CommandMode,
    /// 無条件終了（C-q / C-c）
    Terminate,
}

impl EditorEvent {
    /// キーイベントを変換（未対応のキーは `None`）
    pub fn from_key(key_event: KeyEvent) -> Option<Self> {
        if key_event.kind == KeyEventKind::Release {
            return None;
        }

        if key_event.modifiers.contains(KeyModifiers::CONTROL) {
            return match key_event.code {
                KeyCode::Char('s') => Some(EditorEvent::Save),
                KeyCode::Char('q') | KeyCode::Char('c') => Some(EditorEvent::Terminate),
                _ => None,
            };
        }

        let event = match key_event.code {
            KeyCode::Char(ch) if is_printable(ch) => EditorEvent::Char(ch),
            KeyCode::Enter => EditorEvent::Enter,
            KeyCode::Tab => EditorEvent::Tab,
            KeyCode::Backspace => EditorEvent::Backspace,
            KeyCode::Up => EditorEvent::Up,
            KeyCode::Down => EditorEvent::Down,
            KeyCode::Left => EditorEvent::Left,
            KeyCode::Right => EditorEvent::Right,
            KeyCode::PageUp => EditorEvent::PageUp,
            KeyCode::PageDown => EditorEvent::PageDown,
            KeyCode::Home => EditorEvent::Home,
            KeyCode::End => EditorEvent::End,
            KeyCode::Esc => EditorEvent::Escape,
            KeyCode::F(1) => EditorEvent::CommandMode,
            _ => return None,
        };
        Some(event)
    }
}

/// 印字可能なASCII文字か
pub fn is_printable(ch: char) -> bool {
    ch.is_ascii() && !ch.is_ascii_control()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_printable_characters() {
        assert_eq!(
            EditorEvent::from_key(key(KeyCode::Char('a'), KeyModifiers::NONE)),
            Some(EditorEvent::Char('a'))
        );
        assert_eq!(
            EditorEvent::from_key(key(KeyCode::Char('A'), KeyModifiers::SHIFT)),
            Some(EditorEvent::Char('A'))
        );
        assert_eq!(
            EditorEvent::from_key(key(KeyCode::Char('é'), KeyModifiers::NONE)),
            None
        );
    }

    #[test]
    fn test_control_keys() {
        assert_eq!(
            EditorEvent::from_key(key(KeyCode::Char('s'), KeyModifiers::CONTROL)),
            Some(EditorEvent::Save)
        );
        assert_eq!(
            EditorEvent::from_key(key(KeyCode::Char('q'), KeyModifiers::CONTROL)),
            Some(EditorEvent::Terminate)
        );
        assert_eq!(
            EditorEvent::from_key(key(KeyCode::Char('x'), KeyModifiers::CONTROL)),
            None
        );
    }

    #[test]
    fn test_special_keys() {
        assert_eq!(
            EditorEvent::from_key(key(KeyCode::F(1), KeyModifiers::NONE)),
            Some(EditorEvent::CommandMode)
        );
        assert_eq!(
            EditorEvent::from_key(key(KeyCode::Esc, KeyModifiers::NONE)),
            Some(EditorEvent::Escape)
        );
        assert_eq!(
            EditorEvent::from_key(key(KeyCode::F(5), KeyModifiers::NONE)),
            None
        );
    }

    #[test]
    fn test_release_events_are_ignored() {
        let mut event = key(KeyCode::Char('a'), KeyModifiers::NONE);
        event.kind = KeyEventKind::Release;
        assert_eq!(EditorEvent::from_key(event), None);
    }
}
