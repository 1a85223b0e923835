use serde::Serialize;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// The first lines of a file plus whether anything was left unread.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FilePreview {
    pub lines: Vec<String>,
    pub truncated: bool,
}

/// Reads at most `max_lines` lines from the start of `file`.
///
/// Line terminators (`\n`, `\r\n`) are stripped. Bytes that are not valid
/// UTF-8 decode lossily, so a binary file yields garbled lines instead of
/// an error. Reading stops at the cap; the tail of a large file is never
/// pulled into memory.
pub fn read_file_preview(file: &Path, max_lines: usize) -> io::Result<FilePreview> {
    let mut reader = BufReader::new(File::open(file)?);
    let mut lines = Vec::new();
    let mut buf = Vec::new();
    for _ in 0..max_lines {
        buf.clear();
        let read = reader.read_until(b'\n', &mut buf)?;
        if read == 0 {
            break;
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }
        lines.push(String::from_utf8_lossy(&buf).into_owned());
    }
    // Peek one byte past the cap instead of reading another line.
    let truncated = !reader.fill_buf()?.is_empty();
    Ok(FilePreview { lines, truncated })
}
