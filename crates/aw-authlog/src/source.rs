//! Log file access: existence/size probes and efficient tail reads.

use async_trait::async_trait;
use std::io::SeekFrom;
use tokio::io::{AsyncReadExt, AsyncSeekExt};

use crate::error::{LogError, LogResult};

/// Block size for backward tail reads.
const BLOCK_SIZE: u64 = 8192;

/// Outcome of probing a log file path.
///
/// Kept distinct so callers can tell "not there" apart from "there but
/// we can't look at it"; both count as unavailable.
#[derive(Debug)]
pub enum FileProbe {
    Missing,
    Unreadable(LogError),
    Present { size: u64 },
}

impl FileProbe {
    pub fn exists(&self) -> bool {
        matches!(self, Self::Present { .. })
    }

    /// Size in bytes; 0 unless present.
    pub fn size(&self) -> u64 {
        match self {
            Self::Present { size } => *size,
            _ => 0,
        }
    }

    /// Present and non-empty.
    pub fn has_content(&self) -> bool {
        self.size() > 0
    }
}

/// Abstraction over the filesystem for log reads.
///
/// Enables mocking in tests; the real implementation is [`FileLogSource`].
#[async_trait]
pub trait LogSource: Send + Sync {
    /// Check existence and size of a path. Never fails; errors are folded
    /// into [`FileProbe::Unreadable`].
    async fn probe(&self, path: &str) -> FileProbe;

    /// Read the last `count` lines of a file, oldest first.
    ///
    /// A missing file yields an empty vector rather than an error.
    async fn tail_lines(&self, path: &str, count: usize) -> LogResult<Vec<String>>;
}

/// Reads logs from the local filesystem.
pub struct FileLogSource;

#[async_trait]
impl LogSource for FileLogSource {
    async fn probe(&self, path: &str) -> FileProbe {
        match tokio::fs::metadata(path).await {
            Ok(meta) if meta.is_file() => FileProbe::Present { size: meta.len() },
            Ok(_) => FileProbe::Unreadable(LogError::Io(format!("{path}: not a regular file"))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => FileProbe::Missing,
            Err(e) => FileProbe::Unreadable(LogError::from_io(path, e)),
        }
    }

    async fn tail_lines(&self, path: &str, count: usize) -> LogResult<Vec<String>> {
        let mut file = match tokio::fs::File::open(path).await {
            Ok(f) => f,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(LogError::from_io(path, e)),
        };
        if count == 0 {
            return Ok(Vec::new());
        }

        let mut pos = file
            .seek(SeekFrom::End(0))
            .await
            .map_err(|e| LogError::from_io(path, e))?;

        // Grow the window backward until it holds more than `count` line
        // breaks, counted as `split_lines` splits, so the possibly-partial
        // first line can be dropped, or until the start of the file.
        let mut buf: Vec<u8> = Vec::new();
        let mut newlines = 0usize;
        while pos > 0 && newlines <= count {
            let step = BLOCK_SIZE.min(pos);
            pos -= step;
            file.seek(SeekFrom::Start(pos))
                .await
                .map_err(|e| LogError::from_io(path, e))?;
            let mut block = vec![0u8; step as usize];
            file.read_exact(&mut block)
                .await
                .map_err(|e| LogError::from_io(path, e))?;
            newlines += count_line_breaks(&block, buf.first().copied());
            block.extend_from_slice(&buf);
            buf = block;
        }

        let text = String::from_utf8_lossy(&buf);
        let lines = split_lines(&text);
        let start = lines.len().saturating_sub(count);
        Ok(lines[start..].iter().map(|l| (*l).to_string()).collect())
    }
}

/// Line breaks in `block` under the [`split_lines`] rule: `\n`, or a `\r`
/// not followed by `\n`. `next` is the byte after the block, if any.
fn count_line_breaks(block: &[u8], next: Option<u8>) -> usize {
    block
        .iter()
        .enumerate()
        .filter(|&(i, &b)| match b {
            b'\n' => true,
            b'\r' => block.get(i + 1).copied().or(next) != Some(b'\n'),
            _ => false,
        })
        .count()
}

/// Split text on `\n`, `\r\n` or a lone `\r`.
///
/// A trailing terminator does not produce an empty final line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(&text[start..i]);
                start = i + 1;
            }
            b'\r' => {
                lines.push(&text[start..i]);
                if bytes.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    if start < bytes.len() {
        lines.push(&text[start..]);
    }
    lines
}
