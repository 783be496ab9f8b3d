//! コマンドモードの動詞の実行
//!
//! 回復可能なエラーはここでステータスメッセージに変換し、呼び出し元へは伝えない。

use super::{Outcome, Session};
use crate::error::{Result, StatusMessage};
use crate::input::Verb;
use std::path::PathBuf;

impl Session {
    /// 解析済みの動詞を実行
    pub(super) fn execute(&mut self, verb: Verb) -> Outcome {
        match verb {
            Verb::Save => self.save_file(),
            Verb::Create(name) => {
                let result = self.browser.create_file(&name);
                self.report_fs(result, "File", "created");
            }
            Verb::Mkdir(name) => {
                let result = self.browser.create_dir(&name);
                self.report_fs(result, "Directory", "created");
            }
            Verb::RemoveFile(name) => {
                let result = self.browser.remove_file(&name);
                self.report_fs(result, "File", "removed");
            }
            Verb::RemoveDir(name) => {
                let result = self.browser.remove_dir(&name);
                self.report_fs(result, "Directory", "removed");
            }
            Verb::ToggleNumber => {
                self.settings.config.number = !self.settings.config.number;
                self.persist_settings();
            }
            Verb::ToggleRelativeNumber => {
                if self.settings.config.number {
                    self.settings.config.relative_number = !self.settings.config.relative_number;
                    self.persist_settings();
                } else {
                    self.status = Some(StatusMessage::error(
                        "Error: 'number' must be enabled for 'relativenumber'",
                    ));
                }
            }
            Verb::Exit => return Outcome::Quit,
            Verb::Shell(command) => {
                let cwd = self.browser.dir().to_path_buf();
                match self.shell.run(&command, &cwd) {
                    Ok(output) => return Outcome::ShowOutput(output),
                    Err(error) => self.report(error),
                }
            }
        }
        Outcome::Continue
    }

    fn report_fs(&mut self, result: Result<PathBuf>, kind: &str, action: &str) {
        match result {
            Ok(path) => {
                let name = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                log::info!("{} {} {}", kind, path.display(), action);
                self.status = Some(StatusMessage::info(format!(
                    "{} '{}' {} successfully",
                    kind, name, action
                )));
            }
            Err(error) => self.report(error),
        }
    }

    fn persist_settings(&mut self) {
        if let Err(error) = self.settings.save() {
            self.report(error.into());
        }
    }
}
