//! ファイルI/O操作
//!
//! 編集対象ファイルの読み込みと保存。内容は改行コードも含めてそのまま扱う。

use crate::buffer::LineBuffer;
use crate::error::{FileError, Result};
use std::fs;
use std::path::Path;

/// ファイルを行バッファとして読み込む
///
/// 存在しないファイルは新規ファイルとして空行1つで開く。
/// 列位置はバイト単位のため、ASCII 以外を含むファイルは開かない。
pub fn read_document(path: &Path) -> Result<LineBuffer> {
    if !path.exists() {
        log::debug!("opening new file {}", path.display());
        return Ok(LineBuffer::new());
    }

    if path.is_dir() {
        return Err(FileError::InvalidPath {
            path: path.display().to_string(),
        }
        .into());
    }

    let content = fs::read_to_string(path).map_err(|e| FileError::from_io(path, e))?;
    if !content.is_ascii() {
        return Err(FileError::NonAscii {
            path: path.display().to_string(),
        }
        .into());
    }
    Ok(LineBuffer::load(&content))
}

/// 行バッファをそのまま書き出す
pub fn write_document(path: &Path, buffer: &LineBuffer) -> Result<()> {
    let content = buffer.serialize();
    fs::write(path, content.as_bytes()).map_err(|e| FileError::from_io(path, e))?;
    log::info!("saved {} ({} bytes)", path.display(), content.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_opens_empty() {
        let dir = TempDir::new().unwrap();
        let buffer = read_document(&dir.path().join("new.txt")).unwrap();
        assert_eq!(buffer, LineBuffer::new());
    }

    #[test]
    fn test_save_is_verbatim() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("crlf.txt");
        fs::write(&path, "a\r\nb\r\nno newline").unwrap();

        let buffer = read_document(&path).unwrap();
        assert_eq!(buffer.len(), 3);
        write_document(&path, &buffer).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "a\r\nb\r\nno newline");
    }

    #[test]
    fn test_non_ascii_file_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("utf8.txt");
        fs::write(&path, "caf\u{e9}\n").unwrap();

        match read_document(&path) {
            Err(crate::error::TinditError::File(FileError::NonAscii { path: reported })) => {
                assert!(reported.ends_with("utf8.txt"))
            }
            other => panic!("Expected NonAscii, got {:?}", other),
        }
    }

    #[test]
    fn test_directory_is_rejected() {
        let dir = TempDir::new().unwrap();
        assert!(read_document(dir.path()).is_err());
    }
}
