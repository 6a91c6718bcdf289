// src/listfile/transcode.rs

//! Line transcoder: listing output in, NUL-terminated records out.
//!
//! Bytes pass through untouched apart from two rules:
//! - `\r` is dropped wherever it appears;
//! - `\n` becomes a single `\0`.
//!
//! Each chunk is handled on its own with no state carried between calls.
//! Bytes after the last `\n` of a chunk are flushed without a terminator, so
//! a line split across two reads ends up written as two consecutive flushes.
//! Since the pieces land back to back in the list file, the stored record is
//! the same as if the line had arrived in one read.

/// Byte that terminates every record in the list file.
pub const RECORD_TERMINATOR: u8 = 0;

/// Append the transcoded form of `chunk` to `out`.
///
/// Returns the number of records terminated within this chunk.
pub fn transcode_chunk(chunk: &[u8], out: &mut Vec<u8>) -> usize {
    let mut terminated = 0;

    for segment in chunk.split_inclusive(|&b| b == b'\n') {
        let (line, has_sep) = match segment.split_last() {
            Some((b'\n', line)) => (line, true),
            _ => (segment, false),
        };

        out.extend(line.iter().copied().filter(|&b| b != b'\r'));

        if has_sep {
            out.push(RECORD_TERMINATOR);
            terminated += 1;
        }
    }

    terminated
}

/// Split list file contents back into records.
///
/// Trailing bytes without a terminator are returned as a final record.
pub fn split_records(contents: &[u8]) -> Vec<&[u8]> {
    let mut records: Vec<&[u8]> = contents.split(|&b| b == RECORD_TERMINATOR).collect();
    if contents.last() == Some(&RECORD_TERMINATOR) || contents.is_empty() {
        records.pop();
    }
    records
}
