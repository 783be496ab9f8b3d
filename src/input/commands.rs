//! コマンドシステム
//!
//! コマンドモードで入力された文字列を動詞へ変換する。

/// コマンドモードの動詞
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verb {
    /// 開いているファイルを保存
    Save,
    /// 空ファイルを作成
    Create(String),
    /// ディレクトリを作成
    Mkdir(String),
    /// ファイルを削除
    RemoveFile(String),
    /// ディレクトリを再帰的に削除
    RemoveDir(String),
    /// 行番号表示の切り替え
    ToggleNumber,
    /// 相対行番号表示の切り替え
    ToggleRelativeNumber,
    /// エディタを終了
    Exit,
    /// シェルコマンドを実行
    Shell(String),
}

impl Verb {
    /// 空白区切りのコマンド文字列を解析
    ///
    /// 未知の動詞や引数不足は `None`（何もしない）。
    pub fn parse(input: &str) -> Option<Self> {
        let mut tokens = input.split_whitespace();
        let verb = tokens.next()?;
        let first_arg = tokens.next().map(str::to_string);

        match verb {
            "save" => Some(Verb::Save),
            "create" => first_arg.map(Verb::Create),
            "mkdir" => first_arg.map(Verb::Mkdir),
            "rmfile" => first_arg.map(Verb::RemoveFile),
            "rmdir" => first_arg.map(Verb::RemoveDir),
            "number" => Some(Verb::ToggleNumber),
            "relativenumber" => Some(Verb::ToggleRelativeNumber),
            "exit" => Some(Verb::Exit),
            "com" => {
                let rest = input.trim_start()[verb.len()..].trim();
                if rest.is_empty() {
                    None
                } else {
                    Some(Verb::Shell(rest.to_string()))
                }
            }
            _ => None,
        }
    }

    /// 動詞の説明を取得
    pub fn description(&self) -> &'static str {
        match self {
            Verb::Save => "ファイルを保存",
            Verb::Create(_) => "空ファイルを作成",
            Verb::Mkdir(_) => "ディレクトリを作成",
            Verb::RemoveFile(_) => "ファイルを削除",
            Verb::RemoveDir(_) => "ディレクトリを削除",
            Verb::ToggleNumber => "行番号表示を切り替え",
            Verb::ToggleRelativeNumber => "相対行番号表示を切り替え",
            Verb::Exit => "終了",
            Verb::Shell(_) => "シェルコマンドを実行",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_verbs() {
        assert_eq!(Verb::parse("save"), Some(Verb::Save));
        assert_eq!(Verb::parse("  number  "), Some(Verb::ToggleNumber));
        assert_eq!(Verb::parse("relativenumber"), Some(Verb::ToggleRelativeNumber));
        assert_eq!(Verb::parse("exit"), Some(Verb::Exit));
    }

    #[test]
    fn test_parse_verbs_with_argument() {
        assert_eq!(Verb::parse("create notes.txt"), Some(Verb::Create("notes.txt".into())));
        assert_eq!(Verb::parse("mkdir src"), Some(Verb::Mkdir("src".into())));
        assert_eq!(Verb::parse("rmfile a b"), Some(Verb::RemoveFile("a".into())));
        assert_eq!(Verb::parse("rmdir build"), Some(Verb::RemoveDir("build".into())));
    }

    #[test]
    fn test_missing_argument_is_ignored() {
        assert_eq!(Verb::parse("create"), None);
        assert_eq!(Verb::parse("rmdir   "), None);
        assert_eq!(Verb::parse("com"), None);
    }

    #[test]
    fn test_unknown_and_empty_input() {
        assert_eq!(Verb::parse(""), None);
        assert_eq!(Verb::parse("   "), None);
        assert_eq!(Verb::parse("explosion"), None);
        assert_eq!(Verb::parse("Save"), None);
    }

    #[test]
    fn test_shell_keeps_rest_of_line() {
        assert_eq!(
            Verb::parse("  com ls -la  | head"),
            Some(Verb::Shell("ls -la  | head".into()))
        );
    }

    #[test]
    fn test_description() {
        assert_eq!(Verb::Save.description(), "ファイルを保存");
    }
}
