pub mod menu;
pub mod users;

use std::io::{BufRead, Write};

use crate::error::{Result, UserError};

/// Print `label` and read one trimmed line. `None` at end of input.
pub fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, label: &str) -> Result<Option<String>> {
    write!(out, "{label}")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

pub fn parse_id(raw: &str) -> Result<u64> {
    raw.trim()
        .parse()
        .map_err(|_| UserError::InvalidId(raw.to_string()))
}
