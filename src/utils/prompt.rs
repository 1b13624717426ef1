//! Line-based terminal prompts with injectable I/O so interactive flows can be
//! driven from tests.

use crate::utils::error::Result;
use std::io::{BufRead, Write};

/// Writes `question`, reads one line and returns it trimmed.
///
/// Returns `None` on end of input.
pub fn ask<R, W>(reader: &mut R, writer: &mut W, question: &str) -> Result<Option<String>>
where
    R: BufRead,
    W: Write,
{
    write!(writer, "{}", question)?;
    writer.flush()?;

    let mut input = String::new();
    if reader.read_line(&mut input)? == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim().to_string()))
}

/// Like [`ask`], but an empty answer or end of input yields `default`.
pub fn ask_with_default<R, W>(
    reader: &mut R,
    writer: &mut W,
    question: &str,
    default: &str,
) -> Result<String>
where
    R: BufRead,
    W: Write,
{
    match ask(reader, writer, question)? {
        Some(answer) if !answer.is_empty() => Ok(answer),
        _ => Ok(default.to_string()),
    }
}

/// y/n 問題，只有明確回答 y 才算同意
pub fn confirm<R, W>(reader: &mut R, writer: &mut W, question: &str) -> Result<bool>
where
    R: BufRead,
    W: Write,
{
    let answer = ask(reader, writer, question)?;
    Ok(matches!(answer.as_deref().map(str::to_lowercase).as_deref(), Some("y" | "yes")))
}
