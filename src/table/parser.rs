//! Parser for the plain-text truth table format.
//!
//! One row per line, bits written as `0` or `1`, the last bit of a line being the output.
//! Bits may be separated by whitespace or not. `#` starts a comment, blank lines are skipped.
//!
//! ```text
//! # a b | a or b
//! 0 0 0
//! 1 0 1
//! 0 1 1
//! 11 1
//! ```

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
    str::FromStr,
};

use crate::{Result, SynthError, TruthTable, error::ParserError};

fn read_bit(c: char, line: usize) -> std::result::Result<u8, ParserError> {
    match c {
        '0' => Ok(0),
        '1' => Ok(1),
        _ => Err(ParserError::InvalidToken {
            line,
            token: c.to_string() + " expected 0 or 1",
        }),
    }
}

/// Reads the bits of one line, or `None` if the line holds no row.
fn read_row(text: &str, line: usize) -> std::result::Result<Option<Vec<u8>>, ParserError> {
    let content = text.split('#').next().unwrap_or_default();
    let row = content
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| read_bit(c, line))
        .collect::<std::result::Result<Vec<u8>, ParserError>>()?;
    Ok((!row.is_empty()).then_some(row))
}

impl TruthTable {
    /// Reads a truth table from an already open reader.
    pub fn from_reader(mut reader: impl BufRead) -> Result<Self> {
        let mut rows = Vec::new();
        let mut text = String::new();
        let mut line = 0;

        loop {
            text.clear();
            let read = reader
                .read_line(&mut text)
                .map_err(|e| ParserError::IoError(e.to_string()))?;
            if read == 0 {
                break;
            }
            line += 1;
            if let Some(row) = read_row(&text, line)? {
                rows.push(row);
            }
        }

        Ok(TruthTable::new(rows)?)
    }

    /// Reads a truth table from a `.tt` (or `.txt`) file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        match path.as_ref().extension().and_then(|ext| ext.to_str()) {
            Some("tt") | Some("txt") => {
                let f =
                    File::open(path.as_ref()).map_err(|z| ParserError::IoError(z.to_string()))?;
                TruthTable::from_reader(BufReader::new(f))
            }
            _ => Err(
                ParserError::IoError("invalid extension, expected .tt or .txt".to_string()).into(),
            ),
        }
    }
}

impl FromStr for TruthTable {
    type Err = SynthError;

    fn from_str(s: &str) -> Result<Self> {
        TruthTable::from_reader(s.as_bytes())
    }
}
