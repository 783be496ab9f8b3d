//! 入力処理モジュール
//!
//! キー入力の変換とコマンドモードの動詞を提供

pub mod commands;
pub mod event_handler;

// 公開API
pub use commands::Verb;
pub use event_handler::{is_printable, EditorEvent};
