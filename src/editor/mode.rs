//! 編集モード

/// 現在のモード
///
/// コマンド入力とスニペット選択は開いているドキュメントの上に重なる一時状態で、
/// 同時には存在しない。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mode {
    /// ファイルブラウザ
    #[default]
    Browsing,
    /// ファイル編集
    Editing,
    /// コマンド入力中
    CommandEntry { input: String },
    /// スニペット候補の選択中
    SnippetSelect {
        suggestions: Vec<String>,
        selected: usize,
    },
}

impl Mode {
    /// ステータスライン表示用の名前
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Browsing => "BROWSE",
            Mode::Editing => "EDIT",
            Mode::CommandEntry { .. } => "COMMAND",
            Mode::SnippetSelect { .. } => "SNIPPET",
        }
    }

    /// 入力中のコマンド文字列
    pub fn command_input(&self) -> Option<&str> {
        match self {
            Mode::CommandEntry { input } => Some(input),
            _ => None,
        }
    }

    /// 選択中のスニペット候補
    pub fn selected_suggestion(&self) -> Option<&str> {
        match self {
            Mode::SnippetSelect {
                suggestions,
                selected,
            } => suggestions.get(*selected).map(String::as_str),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_browsing() {
        assert_eq!(Mode::default(), Mode::Browsing);
        assert_eq!(Mode::default().label(), "BROWSE");
    }

    #[test]
    fn test_accessors() {
        let command = Mode::CommandEntry {
            input: "save".to_string(),
        };
        assert_eq!(command.command_input(), Some("save"));
        assert_eq!(command.selected_suggestion(), None);

        let select = Mode::SnippetSelect {
            suggestions: vec!["fn".to_string(), "for".to_string()],
            selected: 1,
        };
        assert_eq!(select.selected_suggestion(), Some("for"));
    }
}
