//! 端末アプリケーション
//!
//! 端末の初期化と後片付け、キー入力を待ってセッションへ渡すイベントループ。

use crate::editor::{Outcome, Session};
use crate::error::{Result, TinditError, UiError};
use crate::input::EditorEvent;
use crate::ui::{text_height, Renderer};
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::stdout;

pub struct App {
    session: Session,
    renderer: Renderer,
}

impl App {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            renderer: Renderer::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// 終了するまでイベントループを回す
    pub fn run(&mut self) -> Result<()> {
        enter_terminal()?;

        let backend = CrosstermBackend::new(stdout());
        let mut terminal = Terminal::new(backend).map_err(|err| terminal_error("terminal init", err))?;

        let loop_result = self.event_loop(&mut terminal);
        let show_cursor_result = terminal.show_cursor().map_err(|err| terminal_error("show cursor", err));
        drop(terminal);
        let cleanup_result = leave_terminal();

        loop_result.and(show_cursor_result).and(cleanup_result)
    }

    fn event_loop<B: ratatui::backend::Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        loop {
            let size = terminal.size().map_err(|err| terminal_error("terminal size", err))?;
            self.session.set_viewport_height(text_height(size.height));
            self.renderer
                .render(terminal, &self.session)
                .map_err(|err| terminal_error("render", err))?;

            let Some(editor_event) = next_event()? else {
                continue;
            };

            match self.session.handle_event(editor_event) {
                Outcome::Continue => {}
                Outcome::Quit => break,
                Outcome::ShowOutput(output) => {
                    self.renderer
                        .render_output(terminal, &output)
                        .map_err(|err| terminal_error("render output", err))?;
                    wait_for_key()?;
                }
            }
        }

        log::info!("event loop finished");
        Ok(())
    }
}

/// 次のキー入力を待つ（対応するイベントが無ければ None）
fn next_event() -> Result<Option<EditorEvent>> {
    match event::read().map_err(|err| terminal_error("event read", err))? {
        Event::Key(key_event) => Ok(EditorEvent::from_key(key_event)),
        Event::Resize(_, _) => Ok(None),
        Event::Mouse(_) | Event::FocusGained | Event::FocusLost | Event::Paste(_) => Ok(None),
    }
}

fn wait_for_key() -> Result<()> {
    loop {
        if let Event::Key(key_event) = event::read().map_err(|err| terminal_error("event read", err))? {
            if key_event.kind != KeyEventKind::Release {
                return Ok(());
            }
        }
    }
}

fn enter_terminal() -> Result<()> {
    enable_raw_mode().map_err(|err| terminal_error("enable raw mode", err))?;
    let mut out = stdout();
    execute!(out, EnterAlternateScreen).map_err(|err| terminal_error("enter alternate screen", err))?;
    Ok(())
}

fn leave_terminal() -> Result<()> {
    let mut out = stdout();
    execute!(out, LeaveAlternateScreen).map_err(|err| terminal_error("leave alternate screen", err))?;
    disable_raw_mode().map_err(|err| terminal_error("disable raw mode", err))?;
    Ok(())
}

/// パニック時に端末を元に戻す（失敗は無視）
pub fn restore_terminal() {
    let mut out = stdout();
    let _ = execute!(out, LeaveAlternateScreen, crossterm::cursor::Show);
    let _ = disable_raw_mode();
}

fn terminal_error(context: &str, err: impl std::fmt::Display) -> TinditError {
    TinditError::Ui(UiError::Terminal {
        component: format!("{}: {}", context, err),
    })
}
