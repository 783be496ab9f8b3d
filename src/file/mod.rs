//! ファイル操作モジュール
//!
//! ディレクトリ一覧とファイルの読み書き

pub mod browser;
pub mod io;

pub use browser::{BrowserEntry, FileBrowser, OpenTarget, PARENT_ENTRY};
pub use io::{read_document, write_document};
