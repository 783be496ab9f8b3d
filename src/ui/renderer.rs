//! 画面描画
//!
//! セッション状態を読み取り、ブラウザ・テキスト・候補一覧・ステータスを描画する。

use crate::buffer::{trim_line, Document};
use crate::config::EditorConfig;
use crate::editor::{Mode, Session};
use crate::error::{MessageLevel, StatusMessage};
use crate::file::FileBrowser;
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame, Terminal,
};
use std::io;

/// 行番号欄の幅（`{:4} `）
pub const GUTTER_WIDTH: usize = 5;
/// テキスト領域以外に使う行数（メッセージ行とステータスライン）
pub const CHROME_HEIGHT: u16 = 2;

/// 画面の領域割り当て
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub text: Rect,
    pub message: Rect,
    pub status: Rect,
}

impl ScreenLayout {
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(area);
        Self {
            text: chunks[0],
            message: chunks[1],
            status: chunks[2],
        }
    }
}

/// 端末の高さからテキスト領域の行数を求める
pub fn text_height(terminal_height: u16) -> usize {
    terminal_height.saturating_sub(CHROME_HEIGHT).max(1) as usize
}

/// 行番号欄の表示
///
/// 相対表示ではカーソル行だけ絶対行番号を出す。
pub fn gutter_label(row: usize, cursor_row: usize, config: &EditorConfig) -> Option<(String, bool)> {
    if !config.number {
        return None;
    }
    let is_current = row == cursor_row;
    let number = if config.relative_number && !is_current {
        row.abs_diff(cursor_row)
    } else {
        row + 1
    };
    Some((format!("{:4} ", number), is_current && config.relative_number))
}

/// 表示用に行を整える（末尾空白を除き、タブは1桁の空白にする）
pub fn display_text(line: &str) -> String {
    trim_line(line).replace('\t', " ")
}

/// 画面描画器
#[derive(Debug, Default)]
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// セッションを描画
    pub fn render<B: Backend>(&mut self, terminal: &mut Terminal<B>, session: &Session) -> io::Result<()> {
        terminal.draw(|frame| Self::draw_session(frame, session))?;
        Ok(())
    }

    /// シェルコマンドの出力を描画
    pub fn render_output<B: Backend>(&mut self, terminal: &mut Terminal<B>, output: &str) -> io::Result<()> {
        terminal.draw(|frame| Self::draw_output(frame, output))?;
        Ok(())
    }

    fn draw_session(frame: &mut Frame<'_>, session: &Session) {
        let layout = ScreenLayout::new(frame.area());

        match session.document() {
            Some(document) => Self::draw_document(frame, layout.text, document, session.config()),
            None => Self::draw_browser(frame, layout.text, session.browser()),
        }

        if let Mode::SnippetSelect {
            suggestions,
            selected,
        } = session.mode()
        {
            if let Some(document) = session.document() {
                Self::draw_suggestions(frame, layout.text, document, session.config(), suggestions, *selected);
            }
        }

        Self::draw_message(frame, layout.message, session.mode(), session.status());
        Self::draw_status(frame, layout.status, session);

        match session.mode() {
            Mode::CommandEntry { input } => {
                let x = layout.message.x + 1 + input.len() as u16;
                frame.set_cursor_position(Position::new(
                    x.min(layout.message.right().saturating_sub(1)),
                    layout.message.y,
                ));
            }
            _ => {
                if let Some(document) = session.document() {
                    let gutter = if session.config().number { GUTTER_WIDTH } else { 0 };
                    let (x, y) = document.cursor.screen_position(gutter);
                    if x < layout.text.width as usize && y < layout.text.height as usize {
                        frame.set_cursor_position(Position::new(
                            layout.text.x + x as u16,
                            layout.text.y + y as u16,
                        ));
                    }
                }
            }
        }
    }

    fn draw_browser(frame: &mut Frame<'_>, area: Rect, browser: &FileBrowser) {
        let height = area.height as usize;
        let offset = (browser.selected() + 1).saturating_sub(height);
        let lines: Vec<Line<'_>> = browser
            .entries()
            .iter()
            .enumerate()
            .skip(offset)
            .take(height)
            .map(|(index, entry)| {
                let suffix = if entry.is_dir && entry.name != crate::file::PARENT_ENTRY {
                    "/"
                } else {
                    ""
                };
                if index == browser.selected() {
                    Line::from(Span::styled(
                        format!("> {}{}", entry.name, suffix),
                        Style::default().add_modifier(Modifier::REVERSED),
                    ))
                } else {
                    Line::from(format!("  {}{}", entry.name, suffix))
                }
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn draw_document(frame: &mut Frame<'_>, area: Rect, document: &Document, config: &EditorConfig) {
        let top = document.cursor.top_line();
        let cursor_row = document.cursor.row();
        let lines: Vec<Line<'_>> = document
            .buffer
            .lines()
            .enumerate()
            .skip(top)
            .take(area.height as usize)
            .map(|(row, text)| {
                let mut spans = Vec::with_capacity(2);
                if let Some((label, emphasized)) = gutter_label(row, cursor_row, config) {
                    let style = if emphasized {
                        Style::default().add_modifier(Modifier::BOLD)
                    } else {
                        Style::default().add_modifier(Modifier::DIM)
                    };
                    spans.push(Span::styled(label, style));
                }
                spans.push(Span::raw(display_text(text)));
                Line::from(spans)
            })
            .collect();
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn draw_suggestions(
        frame: &mut Frame<'_>,
        area: Rect,
        document: &Document,
        config: &EditorConfig,
        suggestions: &[String],
        selected: usize,
    ) {
        let popup = suggestion_area(area, document, config, suggestions);
        if popup.height == 0 || popup.width == 0 {
            return;
        }

        let offset = (selected + 1).saturating_sub(popup.height as usize);
        let lines: Vec<Line<'_>> = suggestions
            .iter()
            .enumerate()
            .skip(offset)
            .take(popup.height as usize)
            .map(|(index, name)| {
                if index == selected {
                    Line::from(Span::styled(
                        format!("> {}", name),
                        Style::default().add_modifier(Modifier::REVERSED),
                    ))
                } else {
                    Line::from(format!("  {}", name))
                }
            })
            .collect();

        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(lines).style(Style::default().bg(Color::DarkGray)),
            popup,
        );
    }

    fn draw_message(frame: &mut Frame<'_>, area: Rect, mode: &Mode, status: Option<&StatusMessage>) {
        let line = match (mode.command_input(), status) {
            (Some(input), _) => Line::from(format!(":{}", input)),
            (None, Some(message)) => {
                let style = match message.level {
                    MessageLevel::Error => Style::default().fg(Color::Red),
                    MessageLevel::Info => Style::default(),
                };
                Line::from(Span::styled(message.text.clone(), style))
            }
            (None, None) => Line::default(),
        };
        frame.render_widget(Paragraph::new(line), area);
    }

    fn draw_status(frame: &mut Frame<'_>, area: Rect, session: &Session) {
        let text = status_text(session);
        let width = area.width as usize;
        let padded = format!("{:<width$}", text, width = width);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                padded,
                Style::default().add_modifier(Modifier::REVERSED),
            ))),
            area,
        );
    }

    fn draw_output(frame: &mut Frame<'_>, output: &str) {
        let area = frame.area();
        let body_height = area.height.saturating_sub(2) as usize;
        let mut lines = vec![Line::from("Command output:")];
        lines.extend(
            output
                .split('\n')
                .take(body_height)
                .map(|line| Line::from(line.replace('\t', " "))),
        );

        let footer_y = area.bottom().saturating_sub(1);
        frame.render_widget(Clear, area);
        frame.render_widget(Paragraph::new(lines), area);
        frame.render_widget(
            Paragraph::new("Press any key to continue..."),
            Rect::new(area.x, footer_y, area.width, 1.min(area.height)),
        );
    }
}

/// ステータスラインの文字列
pub fn status_text(session: &Session) -> String {
    match session.document() {
        Some(document) => format!(
            " {} - Line {}/{} [{}] ",
            document.name(),
            document.cursor.row() + 1,
            document.buffer.len(),
            session.mode().label()
        ),
        None => format!(
            " {} [{}] ",
            session.browser().dir().display(),
            session.mode().label()
        ),
    }
}

/// 候補一覧の表示位置（カーソル行の直下、収まらなければ上）
pub fn suggestion_area(area: Rect, document: &Document, config: &EditorConfig, suggestions: &[String]) -> Rect {
    let gutter = if config.number { GUTTER_WIDTH } else { 0 };
    let (_, cursor_y) = document.cursor.screen_position(gutter);
    let cursor_y = cursor_y as u16;

    let longest = suggestions.iter().map(String::len).max().unwrap_or(0);
    let width = ((longest + 2) as u16).min(area.width);
    let wanted = suggestions.len() as u16;

    let below = area.height.saturating_sub(cursor_y + 1);
    let above = cursor_y;
    let (y, height) = if below >= wanted.min(area.height) || below >= above {
        (area.y + cursor_y + 1, wanted.min(below))
    } else {
        let height = wanted.min(above);
        (area.y + cursor_y - height, height)
    };

    Rect::new(area.x + gutter as u16, y, width.min(area.width.saturating_sub(gutter as u16)), height)
}
