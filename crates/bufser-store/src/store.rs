use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, StoreError};
use crate::mode::Mode;

/// An open file with a fixed access mode.
///
/// Reads on a write-mode store and writes on a read-mode store fail with
/// [`ErrorKind::Unsupported`] instead of reaching the operating system.
/// The file is closed when the store is dropped or [`closed`](Self::close).
pub struct ByteStore {
    file: File,
    path: PathBuf,
    mode: Mode,
}

impl ByteStore {
    /// Open `path` in the given mode.
    ///
    /// [`Mode::Write`] creates the file or truncates an existing one.
    /// [`Mode::Read`] requires the file to exist.
    pub fn open(path: impl AsRef<Path>, mode: Mode) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let mut options = OpenOptions::new();
        match mode {
            Mode::Write => options.write(true).create(true).truncate(true),
            Mode::Read => options.read(true),
        };

        let file = options.open(&path).map_err(|e| StoreError::Open {
            path: path.clone(),
            mode,
            source: e,
        })?;

        debug!(?path, %mode, "opened byte store");

        Ok(Self { file, path, mode })
    }

    /// Create or truncate `path` for writing.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        Self::open(path, Mode::Write)
    }

    /// Open an existing `path` for reading.
    pub fn open_read(path: impl AsRef<Path>) -> Result<Self> {
        Self::open(path, Mode::Read)
    }

    /// The path this store was opened on.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The access mode fixed at open.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Current size of the underlying file in bytes.
    pub fn len(&self) -> Result<u64> {
        Ok(self.file.metadata()?.len())
    }

    /// Returns true if the underlying file is empty.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Close the store, flushing it first in write mode.
    pub fn close(mut self) -> Result<()> {
        if self.mode.is_write() {
            self.file.flush()?;
        }
        debug!(path = ?self.path, mode = %self.mode, "closed byte store");
        Ok(())
    }

    fn check_mode(&self, expected: Mode) -> std::io::Result<()> {
        if self.mode == expected {
            Ok(())
        } else {
            Err(std::io::Error::new(
                ErrorKind::Unsupported,
                format!("store {} is opened for {}", self.path.display(), self.mode),
            ))
        }
    }
}

impl Read for ByteStore {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.check_mode(Mode::Read)?;
        self.file.read(buf)
    }
}

impl Write for ByteStore {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.check_mode(Mode::Write)?;
        self.file.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.file.flush()
    }
}

impl std::fmt::Debug for ByteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ByteStore")
            .field("path", &self.path)
            .field("mode", &self.mode)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("bufser-store-{tag}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_write_then_read() {
        let dir = temp_dir("roundtrip");
        let path = dir.join("data.bin");

        let mut store = ByteStore::create(&path).unwrap();
        assert_eq!(store.mode(), Mode::Write);
        store.write_all(b"hello").unwrap();
        store.close().unwrap();

        let mut store = ByteStore::open_read(&path).unwrap();
        assert_eq!(store.len().unwrap(), 5);
        let mut buf = Vec::new();
        store.read_to_end(&mut buf).unwrap();
        assert_eq!(buf, b"hello");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_create_truncates_existing_file() {
        let dir = temp_dir("truncate");
        let path = dir.join("data.bin");
        std::fs::write(&path, b"previous contents").unwrap();

        let store = ByteStore::create(&path).unwrap();
        assert!(store.is_empty().unwrap());
        store.close().unwrap();
        assert_eq!(std::fs::metadata(&path).unwrap().len(), 0);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_open_missing_file_reports_path() {
        let dir = temp_dir("missing");
        let path = dir.join("does-not-exist.bin");

        let err = ByteStore::open_read(&path).unwrap_err();
        match err {
            StoreError::Open {
                path: reported,
                mode,
                source,
            } => {
                assert_eq!(reported, path);
                assert_eq!(mode, Mode::Read);
                assert_eq!(source.kind(), ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(err_message_names_path(&path));

        let _ = std::fs::remove_dir_all(&dir);
    }

    fn err_message_names_path(path: &Path) -> bool {
        ByteStore::open_read(path)
            .unwrap_err()
            .to_string()
            .contains(&path.display().to_string())
    }

    #[test]
    fn test_open_in_missing_directory_fails_for_write() {
        let dir = temp_dir("nodir");
        let path = dir.join("missing").join("data.bin");

        let result = ByteStore::create(&path);
        assert!(matches!(
            result,
            Err(StoreError::Open {
                mode: Mode::Write,
                ..
            })
        ));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_mode_is_enforced() {
        let dir = temp_dir("mode");
        let path = dir.join("data.bin");

        let mut writer = ByteStore::create(&path).unwrap();
        let mut buf = [0u8; 4];
        let err = writer.read(&mut buf).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unsupported);
        writer.close().unwrap();

        let mut reader = ByteStore::open_read(&path).unwrap();
        let err = reader.write(b"x").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unsupported);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_reopen_after_close() {
        let dir = temp_dir("reopen");
        let path = dir.join("data.bin");

        for round in 0..16u8 {
            let mut store = ByteStore::create(&path).unwrap();
            store.write_all(&[round]).unwrap();
            store.close().unwrap();

            let mut store = ByteStore::open_read(&path).unwrap();
            let mut byte = [0u8; 1];
            store.read_exact(&mut byte).unwrap();
            assert_eq!(byte[0], round);
            store.close().unwrap();
        }

        let _ = std::fs::remove_dir_all(&dir);
    }
}
