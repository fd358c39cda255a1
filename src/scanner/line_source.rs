//! Bounded line reader
//!
//! Reads a file one line at a time through a buffer of fixed capacity. A line
//! whose bytes before `\n` fill the whole buffer is rejected with
//! [`FintError::LineTooLong`] rather than read in pieces.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use crate::error::{FintError, Result};

/// How a line ended in the source file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminator {
    Lf,
    CrLf,
    /// Last line of a file without a trailing newline
    None,
}

impl Terminator {
    pub fn as_bytes(self) -> &'static [u8] {
        match self {
            Self::Lf => b"\n",
            Self::CrLf => b"\r\n",
            Self::None => b"",
        }
    }
}

/// One line as read from disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// 1-based
    pub number: usize,
    /// Content without terminator, lossily decoded
    pub text: String,
    /// Content without terminator, exactly as on disk
    pub raw: Vec<u8>,
    pub terminator: Terminator,
}

impl SourceLine {
    /// Whether `text` holds the line exactly, with no replaced bytes
    pub fn is_utf8(&self) -> bool {
        std::str::from_utf8(&self.raw).is_ok()
    }
}

#[derive(Debug)]
pub struct LineSource<R> {
    reader: R,
    path: PathBuf,
    capacity: usize,
    number: usize,
    buf: Vec<u8>,
}

impl LineSource<BufReader<File>> {
    /// Open `path` for reading with a line buffer of `capacity` bytes
    pub fn open(path: &Path, capacity: usize) -> Result<Self> {
        let file = File::open(path).map_err(|source| FintError::CannotOpenFile {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(BufReader::new(file), path, capacity))
    }
}

impl<R: BufRead> LineSource<R> {
    pub fn new(reader: R, path: &Path, capacity: usize) -> Self {
        Self {
            reader,
            path: path.to_path_buf(),
            capacity: capacity.max(1),
            number: 0,
            buf: Vec::with_capacity(capacity.max(1)),
        }
    }

    /// Read the next line, or `None` at end of file
    pub fn next_line(&mut self) -> Result<Option<SourceLine>> {
        self.buf.clear();

        // One byte past the buffer is enough to tell a full buffer from a
        // line that fits
        let limit = self.capacity as u64 + 1;
        let read = (&mut self.reader)
            .take(limit)
            .read_until(b'\n', &mut self.buf)
            .map_err(|source| FintError::ReadFailed {
                path: self.path.clone(),
                source,
            })?;
        if read == 0 {
            return Ok(None);
        }
        self.number += 1;

        let has_newline = self.buf.last() == Some(&b'\n');
        let content_len = if has_newline {
            self.buf.len() - 1
        } else {
            self.buf.len()
        };
        if content_len >= self.capacity {
            return Err(FintError::LineTooLong {
                path: self.path.clone(),
                line: self.number,
            });
        }

        let mut raw = self.buf[..content_len].to_vec();
        let terminator = if !has_newline {
            Terminator::None
        } else if raw.last() == Some(&b'\r') {
            raw.pop();
            Terminator::CrLf
        } else {
            Terminator::Lf
        };

        Ok(Some(SourceLine {
            number: self.number,
            text: String::from_utf8_lossy(&raw).into_owned(),
            raw,
            terminator,
        }))
    }
}

impl<R: BufRead> Iterator for LineSource<R> {
    type Item = Result<SourceLine>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_line().transpose()
    }
}
