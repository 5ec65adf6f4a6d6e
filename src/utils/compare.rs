/// Line-oriented output comparison
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Compare two files line by line, ignoring leading and trailing ASCII
/// whitespace on each line.
///
/// Whitespace inside a line is significant, and so is the number of lines:
/// if one file runs out before the other, they differ.
pub fn files_are_equal(file_a: &Path, file_b: &Path) -> io::Result<bool> {
    let reader_a = BufReader::new(File::open(file_a)?);
    let reader_b = BufReader::new(File::open(file_b)?);
    readers_are_equal(reader_a, reader_b)
}

/// Same policy as [`files_are_equal`], over arbitrary readers
pub fn readers_are_equal<A: BufRead, B: BufRead>(mut a: A, mut b: B) -> io::Result<bool> {
    let mut line_a = Vec::new();
    let mut line_b = Vec::new();

    loop {
        line_a.clear();
        line_b.clear();
        let read_a = a.read_until(b'\n', &mut line_a)?;
        let read_b = b.read_until(b'\n', &mut line_b)?;

        match (read_a, read_b) {
            (0, 0) => return Ok(true),
            (0, _) | (_, 0) => return Ok(false),
            _ => {}
        }

        // Raw bytes: outputs need not be valid UTF-8
        if line_a.trim_ascii() != line_b.trim_ascii() {
            return Ok(false);
        }
    }
}
