//! ファイルブラウザ
//!
//! 現在ディレクトリの一覧と選択位置、ファイル・ディレクトリの作成と削除。
//! プロセスのカレントディレクトリは変更せず、自身のディレクトリを基準にする。

use crate::error::{FileError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// 親ディレクトリを表すエントリ名
pub const PARENT_ENTRY: &str = "..";

/// 一覧の1エントリ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserEntry {
    pub name: String,
    pub is_dir: bool,
}

/// 選択エントリを開いた結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenTarget {
    /// ディレクトリへ移動した
    Directory(PathBuf),
    /// 通常ファイル
    File(PathBuf),
    /// 一覧が空
    Nothing,
}

/// ディレクトリ一覧
#[derive(Debug, Clone)]
pub struct FileBrowser {
    dir: PathBuf,
    entries: Vec<BrowserEntry>,
    selected: usize,
}

impl FileBrowser {
    /// 指定ディレクトリで一覧を作成
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        let dir = dir.canonicalize().map_err(|e| FileError::from_io(&dir, e))?;
        let mut browser = Self {
            dir,
            entries: Vec::new(),
            selected: 0,
        };
        browser.refresh()?;
        Ok(browser)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn entries(&self) -> &[BrowserEntry] {
        &self.entries
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_entry(&self) -> Option<&BrowserEntry> {
        self.entries.get(self.selected)
    }

    /// 一覧を読み直す（選択は先頭へ）
    ///
    /// 親ディレクトリがあれば先頭に `..` を置く。
    pub fn refresh(&mut self) -> Result<()> {
        let read_dir = fs::read_dir(&self.dir).map_err(|e| FileError::from_io(&self.dir, e))?;
        let mut entries: Vec<BrowserEntry> = read_dir
            .filter_map(|entry| entry.ok())
            .map(|entry| BrowserEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                is_dir: entry.path().is_dir(),
            })
            .collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        if self.dir.parent().is_some() {
            entries.insert(
                0,
                BrowserEntry {
                    name: PARENT_ENTRY.to_string(),
                    is_dir: true,
                },
            );
        }

        self.entries = entries;
        self.selected = 0;
        Ok(())
    }

    /// 選択を移動（循環）
    pub fn move_selection(&mut self, delta: isize) {
        self.selected = crate::snippet::wrap_selection(self.selected, delta, self.entries.len());
    }

    /// 選択エントリを開く
    ///
    /// ディレクトリなら移動して一覧を読み直し、ファイルならそのパスを返す。
    pub fn open_selected(&mut self) -> Result<OpenTarget> {
        let Some(entry) = self.selected_entry().cloned() else {
            return Ok(OpenTarget::Nothing);
        };

        if entry.name == PARENT_ENTRY {
            if let Some(parent) = self.dir.parent() {
                self.dir = parent.to_path_buf();
            }
            self.refresh()?;
            return Ok(OpenTarget::Directory(self.dir.clone()));
        }

        let path = self.dir.join(&entry.name);
        if path.is_dir() {
            self.dir = path;
            self.refresh()?;
            Ok(OpenTarget::Directory(self.dir.clone()))
        } else {
            Ok(OpenTarget::File(path))
        }
    }

    /// 名前を一覧ディレクトリ基準のパスへ解決（`~` と環境変数を展開）
    pub fn resolve(&self, name: &str) -> PathBuf {
        let expanded = shellexpand::full(name)
            .map(|expanded| expanded.into_owned())
            .unwrap_or_else(|_| name.to_string());
        self.dir.join(expanded)
    }

    /// 空ファイルを作成（既存なら何もしない）
    pub fn create_file(&mut self, name: &str) -> Result<PathBuf> {
        let path = self.resolve(name);
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| FileError::from_io(&path, e))?;
        self.refresh()?;
        Ok(path)
    }

    /// ディレクトリを作成
    pub fn create_dir(&mut self, name: &str) -> Result<PathBuf> {
        let path = self.resolve(name);
        fs::create_dir_all(&path).map_err(|e| FileError::from_io(&path, e))?;
        self.refresh()?;
        Ok(path)
    }

    /// ファイルを削除
    pub fn remove_file(&mut self, name: &str) -> Result<PathBuf> {
        let path = self.resolve(name);
        fs::remove_file(&path).map_err(|e| FileError::from_io(&path, e))?;
        self.refresh()?;
        Ok(path)
    }

    /// ディレクトリを中身ごと削除
    pub fn remove_dir(&mut self, name: &str) -> Result<PathBuf> {
        let path = self.resolve(name);
        fs::remove_dir_all(&path).map_err(|e| FileError::from_io(&path, e))?;
        self.refresh()?;
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fixture() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.txt"), "b").unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        dir
    }

    fn names(browser: &FileBrowser) -> Vec<&str> {
        browser.entries().iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_listing_is_sorted_with_parent_first() {
        let dir = fixture();
        let browser = FileBrowser::open(dir.path()).unwrap();
        assert_eq!(names(&browser), vec!["..", "a.txt", "b.txt", "sub"]);
        assert_eq!(browser.selected(), 0);
    }

    #[test]
    fn test_selection_wraps() {
        let dir = fixture();
        let mut browser = FileBrowser::open(dir.path()).unwrap();
        browser.move_selection(-1);
        assert_eq!(browser.selected_entry().unwrap().name, "sub");
        browser.move_selection(1);
        assert_eq!(browser.selected(), 0);
    }

    #[test]
    fn test_open_directory_and_parent() {
        let dir = fixture();
        let mut browser = FileBrowser::open(dir.path()).unwrap();
        browser.move_selection(3);

        let target = browser.open_selected().unwrap();
        assert!(matches!(target, OpenTarget::Directory(_)));
        assert!(browser.dir().ends_with("sub"));
        assert_eq!(names(&browser), vec![".."]);

        browser.open_selected().unwrap();
        assert_eq!(browser.dir(), dir.path().canonicalize().unwrap());
    }

    #[test]
    fn test_open_file_returns_path() {
        let dir = fixture();
        let mut browser = FileBrowser::open(dir.path()).unwrap();
        browser.move_selection(1);

        match browser.open_selected().unwrap() {
            OpenTarget::File(path) => assert!(path.ends_with("a.txt")),
            other => panic!("Expected file, got {:?}", other),
        }
    }

    #[test]
    fn test_create_and_remove() {
        let dir = fixture();
        let mut browser = FileBrowser::open(dir.path()).unwrap();

        browser.create_file("new.txt").unwrap();
        browser.create_dir("nested/deeper").unwrap();
        assert!(names(&browser).contains(&"new.txt"));
        assert!(names(&browser).contains(&"nested"));

        browser.remove_file("new.txt").unwrap();
        browser.remove_dir("nested").unwrap();
        assert!(!names(&browser).contains(&"new.txt"));
        assert!(!dir.path().join("nested").exists());
    }

    #[test]
    fn test_remove_missing_file_fails() {
        let dir = fixture();
        let mut browser = FileBrowser::open(dir.path()).unwrap();
        assert!(browser.remove_file("ghost.txt").is_err());
    }
}
