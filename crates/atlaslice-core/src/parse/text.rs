//! Line-oriented text descriptor parser.
//!
//! Each record is a single line of six space-separated tokens:
//!
//! ```text
//! name <ignored> x y width height
//! ```
//!
//! Lines that do not have exactly six non-empty tokens are skipped.

use crate::descriptor::{Descriptor, DescriptorFormat, Region};
use crate::error::ParseError;

use super::{finish, parse_int};

/// Number of tokens in a record line.
pub const RECORD_TOKENS: usize = 6;

/// Parses a text descriptor.
///
/// An input without any qualifying line yields an empty descriptor, not an
/// error. A qualifying line with a non-numeric coordinate fails the whole parse.
pub fn parse_text(text: &str) -> Result<Descriptor, ParseError> {
    let mut regions = Vec::new();
    let mut skipped = 0usize;

    for (line_number, line) in lines(text) {
        let Some(tokens) = record_tokens(line) else {
            skipped += 1;
            continue;
        };

        let field = |name: &str, token: &str| {
            parse_int(token, name).map_err(|e| match e {
                ParseError::Malformed { message } => {
                    ParseError::malformed(format!("line {}: {}", line_number, message))
                }
                other => other,
            })
        };

        regions.push(Region {
            name: tokens[0].to_string(),
            x: field("x", tokens[2])?,
            y: field("y", tokens[3])?,
            width: field("width", tokens[4])?,
            height: field("height", tokens[5])?,
        });
    }

    if skipped > 0 {
        tracing::debug!(skipped, records = regions.len(), "skipped non-record lines");
    }

    Ok(finish(regions, DescriptorFormat::Text, Vec::new()))
}

/// Non-empty lines with their 1-based line numbers. `\r\n`, `\r` and `\n`
/// all terminate a line.
fn lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    let mut rest = text;
    let mut line_number = 0;
    std::iter::from_fn(move || loop {
        if rest.is_empty() {
            return None;
        }
        line_number += 1;
        let (line, remainder) = match rest.find(['\r', '\n']) {
            Some(pos) => {
                let terminator = if rest[pos..].starts_with("\r\n") { 2 } else { 1 };
                (&rest[..pos], &rest[pos + terminator..])
            }
            None => (rest, ""),
        };
        rest = remainder;
        if !line.is_empty() {
            return Some((line_number, line));
        }
    })
}

fn record_tokens(line: &str) -> Option<[&str; RECORD_TOKENS]> {
    let tokens: Vec<&str> = line.split(' ').collect();
    if tokens.len() != RECORD_TOKENS || tokens.iter().any(|t| t.is_empty()) {
        return None;
    }
    tokens.try_into().ok()
}
