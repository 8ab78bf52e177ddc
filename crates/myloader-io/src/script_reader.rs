//! Streams one dump file as a sequence of `;\n`-terminated statement chunks
//! (spec §4.1).

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use flate2::read::GzDecoder;

use crate::dump_file::is_compressed;
use crate::error::WalkError;

const CHUNK_SIZE: usize = 256;

/// Lazily reads statement-sized chunks out of a plain or gzip-compressed
/// dump file. Does not split statements itself -- it only recognizes when
/// the accumulated buffer ends in a complete statement.
pub struct ScriptReader {
    inner: Box<dyn Read + Send>,
    buffer: Vec<u8>,
}

impl ScriptReader {
    /// Opens `path`, transparently decompressing if it ends in `.gz`.
    pub fn open(path: &Path) -> Result<Self, WalkError> {
        let file = File::open(path).map_err(|source| WalkError::Open {
            path: path.display().to_string(),
            source,
        })?;
        let is_gz = path.file_name().is_some_and(|name| is_compressed(&name.to_string_lossy()));
        let inner: Box<dyn Read + Send> = if is_gz {
            Box::new(BufReader::new(GzDecoder::new(file)))
        } else {
            Box::new(BufReader::new(file))
        };
        Ok(Self { inner, buffer: Vec::new() })
    }

    /// Reads and returns the next complete statement, reading in
    /// [`CHUNK_SIZE`]-byte pieces until the buffer's tail shows a
    /// terminator. Returns `None` once the file is exhausted and no
    /// partial statement remains; a final statement with no trailing
    /// terminator is still returned, on the following call, as the last
    /// `Some`.
    pub fn next_statement(&mut self) -> Result<Option<String>, WalkError> {
        let mut chunk = [0u8; CHUNK_SIZE];
        loop {
            if has_terminator(&self.buffer) {
                return Ok(Some(self.take_buffer()));
            }
            let n = self.inner.read(&mut chunk).map_err(|e| WalkError::Read(e.to_string()))?;
            if n == 0 {
                return Ok(if self.buffer.is_empty() { None } else { Some(self.take_buffer()) });
            }
            self.buffer.extend_from_slice(&chunk[..n]);
        }
    }

    fn take_buffer(&mut self) -> String {
        let text = String::from_utf8_lossy(&self.buffer).into_owned();
        self.buffer.clear();
        text
    }
}

/// Whether `;\n` appears within the final five bytes of `buffer`.
fn has_terminator(buffer: &[u8]) -> bool {
    if buffer.len() < 2 {
        return false;
    }
    let window_start = buffer.len().saturating_sub(5);
    buffer[window_start..].windows(2).any(|w| w == b";\n")
}
