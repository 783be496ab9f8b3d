//! ユーザーインターフェースモジュール
//!
//! ratatui による画面描画。

pub mod renderer;

pub use renderer::{text_height, Renderer, ScreenLayout, GUTTER_WIDTH};
