use crate::core::error::{IoContext, Result};
use std::path::{Path, PathBuf};
use tokio::fs::{File, OpenOptions};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};

/// Sequential writer for a merge output or a split part.
pub struct Assembler {
    path: PathBuf,
    file: File,
    written: u64,
}

impl Assembler {
    /// Creates `path`, truncating anything already there.
    pub async fn create(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .io_context(|| format!("create_dir_all {}", parent.display()))?;
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)
            .await
            .io_context(|| format!("open {}", path.display()))?;

        Ok(Self { path: path.to_path_buf(), file, written: 0 })
    }

    /// Opens an existing output for appending at its end.
    pub async fn append_to(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .append(true)
            .open(path)
            .await
            .io_context(|| format!("open {} for append", path.display()))?;

        Ok(Self { path: path.to_path_buf(), file, written: 0 })
    }

    pub async fn write(&mut self, data: &[u8]) -> Result<()> {
        self.file
            .write_all(data)
            .await
            .io_context(|| format!("write {}", self.path.display()))?;
        self.written += data.len() as u64;
        Ok(())
    }

    /// Copies `reader` to the end of the output through `buf`, never holding
    /// more than `buf.len()` bytes at a time. Returns the bytes copied.
    pub async fn copy_from<R>(&mut self, reader: &mut R, buf: &mut [u8], source: &Path) -> Result<u64>
    where
        R: AsyncRead + Unpin,
    {
        let mut copied = 0u64;
        loop {
            let n = reader
                .read(buf)
                .await
                .io_context(|| format!("read {}", source.display()))?;
            if n == 0 {
                break;
            }
            self.write(&buf[..n]).await?;
            copied += n as u64;
        }
        Ok(copied)
    }

    pub fn written(&self) -> u64 {
        self.written
    }

    /// Flushes and closes the file.
    pub async fn finish(mut self) -> Result<PathBuf> {
        self.file
            .flush()
            .await
            .io_context(|| format!("flush {}", self.path.display()))?;
        Ok(self.path)
    }
}
