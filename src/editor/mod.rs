//! エディタモジュール
//!
//! 入力イベントを現在のモードに応じてバッファ・カーソル・コマンド入力・
//! スニペット選択へ振り分けるセッション状態。

mod dispatch;
pub mod mode;

pub use mode::Mode;

use crate::buffer::Document;
use crate::config::{EditorConfig, Settings};
use crate::error::{Result, StatusMessage, TinditError};
use crate::file::{read_document, write_document, FileBrowser, OpenTarget};
use crate::input::{EditorEvent, Verb};
use crate::shell::{ShellRunner, SystemShell};
use crate::snippet::{wrap_selection, SnippetEngine};
use std::path::PathBuf;

/// 端末サイズが分かるまでの表示行数
const DEFAULT_VIEWPORT_HEIGHT: usize = 20;

/// イベント処理の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// 次のイベントへ
    Continue,
    /// セッション終了
    Quit,
    /// シェルコマンドの出力をページャで表示
    ShowOutput(String),
}

/// エディタのセッション状態
///
/// バッファ・カーソル・モード・スニペットエンジンをまとめて所有する。
pub struct Session {
    mode: Mode,
    document: Option<Document>,
    browser: FileBrowser,
    settings: Settings,
    snippets: SnippetEngine,
    shell: Box<dyn ShellRunner>,
    status: Option<StatusMessage>,
    viewport_height: usize,
}

impl Session {
    /// 新しいセッションを作成（ブラウザ表示から開始）
    pub fn new(browser: FileBrowser, settings: Settings, snippets: SnippetEngine) -> Self {
        Self {
            mode: Mode::Browsing,
            document: None,
            browser,
            settings,
            snippets,
            shell: Box::new(SystemShell::new()),
            status: None,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
        }
    }

    /// シェル実行を差し替える
    pub fn with_shell(mut self, shell: Box<dyn ShellRunner>) -> Self {
        self.shell = shell;
        self
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn document(&self) -> Option<&Document> {
        self.document.as_ref()
    }

    pub fn browser(&self) -> &FileBrowser {
        &self.browser
    }

    pub fn config(&self) -> &EditorConfig {
        &self.settings.config
    }

    pub fn snippets(&self) -> &SnippetEngine {
        &self.snippets
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn viewport_height(&self) -> usize {
        self.viewport_height
    }

    /// 描画領域の高さを設定
    pub fn set_viewport_height(&mut self, height: usize) {
        self.viewport_height = height.max(1);
        self.keep_cursor_visible();
    }

    /// ファイルを開いて編集モードへ
    pub fn open_file(&mut self, path: PathBuf) -> Result<()> {
        let buffer = read_document(&path)?;
        log::info!("opened {} ({} lines)", path.display(), buffer.len());
        self.document = Some(Document::new(path, buffer));
        self.mode = Mode::Editing;
        Ok(())
    }

    /// ドキュメントを破棄してブラウザへ戻る（保存しない）
    pub fn close_file(&mut self) {
        if let Some(document) = self.document.take() {
            log::info!("closed {}", document.path().display());
        }
        self.mode = Mode::Browsing;
    }

    /// 入力イベントを1つ処理
    pub fn handle_event(&mut self, event: EditorEvent) -> Outcome {
        self.status = None;

        if event == EditorEvent::Terminate {
            log::info!("terminate requested in {} mode", self.mode.label());
            return Outcome::Quit;
        }

        let outcome = match self.mode {
            Mode::Browsing => self.handle_browsing(event),
            Mode::Editing => self.handle_editing(event),
            Mode::CommandEntry { .. } => self.handle_command_entry(event),
            Mode::SnippetSelect { .. } => self.handle_snippet_select(event),
        };

        self.keep_cursor_visible();
        outcome
    }

    fn handle_browsing(&mut self, event: EditorEvent) -> Outcome {
        match event {
            EditorEvent::Up => self.browser.move_selection(-1),
            EditorEvent::Down => self.browser.move_selection(1),
            EditorEvent::Enter => match self.browser.open_selected() {
                Ok(OpenTarget::File(path)) => {
                    if let Err(error) = self.open_file(path) {
                        self.report(error);
                    }
                }
                Ok(OpenTarget::Directory(dir)) => log::debug!("browsing {}", dir.display()),
                Ok(OpenTarget::Nothing) => {}
                Err(error) => self.report(error),
            },
            EditorEvent::CommandMode => self.enter_command_mode(),
            EditorEvent::Escape => return Outcome::Quit,
            _ => {}
        }
        Outcome::Continue
    }

    fn handle_editing(&mut self, event: EditorEvent) -> Outcome {
        match event {
            EditorEvent::Escape => self.close_file(),
            EditorEvent::Enter => self.insert_char('\n'),
            _ => self.handle_document_event(event),
        }
        Outcome::Continue
    }

    fn handle_snippet_select(&mut self, event: EditorEvent) -> Outcome {
        match event {
            EditorEvent::Up => self.move_snippet_selection(-1),
            EditorEvent::Down => self.move_snippet_selection(1),
            EditorEvent::Enter => self.expand_selected_snippet(),
            EditorEvent::Escape => self.mode = Mode::Editing,
            _ => self.handle_document_event(event),
        }
        Outcome::Continue
    }

    /// 編集モードとスニペット選択で共通のイベント
    fn handle_document_event(&mut self, event: EditorEvent) {
        match event {
            EditorEvent::Char(ch) => {
                self.insert_char(ch);
                self.refresh_suggestions(true);
            }
            EditorEvent::Tab => {
                let text = self.settings.config.tab_text();
                for ch in text.chars() {
                    self.insert_char(ch);
                }
                self.refresh_suggestions(false);
            }
            EditorEvent::Backspace => {
                self.delete_char();
                self.refresh_suggestions(false);
            }
            EditorEvent::Up => self.move_cursor(-1, 0),
            EditorEvent::Down => self.move_cursor(1, 0),
            EditorEvent::Left => self.move_cursor(0, -1),
            EditorEvent::Right => self.move_cursor(0, 1),
            EditorEvent::PageUp => self.page(false),
            EditorEvent::PageDown => self.page(true),
            EditorEvent::Home => {
                if let Some(document) = self.document.as_mut() {
                    document.cursor.move_to_home();
                }
            }
            EditorEvent::End => {
                if let Some(document) = self.document.as_mut() {
                    document.cursor.move_to_end(&document.buffer);
                }
            }
            EditorEvent::Save => self.save_file(),
            EditorEvent::CommandMode => self.enter_command_mode(),
            EditorEvent::Enter | EditorEvent::Escape | EditorEvent::Terminate => {}
        }
    }

    fn handle_command_entry(&mut self, event: EditorEvent) -> Outcome {
        let Mode::CommandEntry { input } = &mut self.mode else {
            return Outcome::Continue;
        };

        match event {
            EditorEvent::Char(ch) => input.push(ch),
            EditorEvent::Backspace => {
                input.pop();
            }
            EditorEvent::Escape => self.leave_overlay(),
            EditorEvent::Enter => {
                let text = std::mem::take(input);
                self.leave_overlay();
                return match Verb::parse(&text) {
                    Some(verb) => {
                        log::debug!("executing command '{}' ({})", text.trim(), verb.description());
                        self.execute(verb)
                    }
                    None => {
                        log::debug!("ignoring command '{}'", text.trim());
                        Outcome::Continue
                    }
                };
            }
            _ => {}
        }
        Outcome::Continue
    }

    fn enter_command_mode(&mut self) {
        self.mode = Mode::CommandEntry {
            input: String::new(),
        };
    }

    /// 一時状態を抜けて下のモードへ戻る
    fn leave_overlay(&mut self) {
        self.mode = if self.document.is_some() {
            Mode::Editing
        } else {
            Mode::Browsing
        };
    }

    fn insert_char(&mut self, ch: char) {
        if let Some(document) = self.document.as_mut() {
            let cursor = &mut document.cursor;
            let (row, col) = document.buffer.insert_char(cursor.row(), cursor.col(), ch);
            cursor.set_position(row, col);
        }
    }

    fn delete_char(&mut self) {
        if let Some(document) = self.document.as_mut() {
            let cursor = &mut document.cursor;
            let (row, col) = document.buffer.delete_before(cursor.row(), cursor.col());
            cursor.set_position(row, col);
        }
    }

    fn move_cursor(&mut self, dy: isize, dx: isize) {
        if let Some(document) = self.document.as_mut() {
            document.cursor.move_by(&document.buffer, dy, dx);
        }
    }

    fn page(&mut self, forward: bool) {
        let height = self.viewport_height;
        if let Some(document) = self.document.as_mut() {
            document.cursor.page(&document.buffer, height, forward);
        }
    }

    fn keep_cursor_visible(&mut self) {
        let height = self.viewport_height;
        if let Some(document) = self.document.as_mut() {
            document.cursor.scroll_to_keep_visible(height);
        }
    }

    /// 編集後に候補を計算し直す
    ///
    /// 文字入力（`printable`）なら候補があればスニペット選択へ入る。その他の編集は
    /// 選択中の候補を更新するだけで、候補が無くなれば編集モードへ戻る。
    fn refresh_suggestions(&mut self, printable: bool) {
        let selecting = matches!(self.mode, Mode::SnippetSelect { .. });
        if !printable && !selecting {
            return;
        }

        let suggestions = match (&self.document, self.settings.config.snippets_enabled) {
            (Some(document), true) => {
                let row = document.cursor.row();
                self.snippets.suggest(document.buffer.line(row))
            }
            _ => Vec::new(),
        };

        self.mode = if suggestions.is_empty() {
            Mode::Editing
        } else {
            Mode::SnippetSelect {
                suggestions,
                selected: 0,
            }
        };
    }

    fn move_snippet_selection(&mut self, delta: isize) {
        if let Mode::SnippetSelect {
            suggestions,
            selected,
        } = &mut self.mode
        {
            *selected = wrap_selection(*selected, delta, suggestions.len());
        }
    }

    fn expand_selected_snippet(&mut self) {
        let trigger = self.mode.selected_suggestion().map(str::to_string);
        self.mode = Mode::Editing;

        let (Some(trigger), Some(document)) = (trigger, self.document.as_mut()) else {
            return;
        };
        let row = document.cursor.row();
        match self.snippets.expand(&mut document.buffer, row, &trigger) {
            Ok((row, col)) => document.cursor.set_position(row, col),
            Err(error) => self.report(error.into()),
        }
    }

    fn save_file(&mut self) {
        let Some(document) = self.document.as_ref() else {
            return;
        };
        let message = match write_document(document.path(), &document.buffer) {
            Ok(()) => StatusMessage::info(format!("Saved {}", document.name())),
            Err(error) => StatusMessage::from_error(&error),
        };
        self.status = Some(message);
    }

    /// 回復可能なエラーをステータスへ表示
    fn report(&mut self, error: TinditError) {
        log::warn!("{}", error);
        self.status = Some(StatusMessage::from_error(&error));
    }
}
