//! tindit - 端末で動く小さなテキストエディタ
//!
//! ファイルブラウザ、行単位の編集、スニペット展開、コマンドモードを持つ。

// コアモジュール
pub mod app;
pub mod error;
pub mod logging;

// データ層
pub mod buffer;
pub mod config;
pub mod file;

// 編集層
pub mod editor;
pub mod snippet;

// ロジック層
pub mod input;
pub mod shell;

// 表示層
pub mod ui;

// 公開API
pub use app::App;
pub use editor::{Mode, Outcome, Session};
pub use error::{Result, TinditError};
