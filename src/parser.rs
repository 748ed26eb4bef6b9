//! Recognition and parsing of function-like `#define` blocks
//!
//! A function-like macro definition starts on a line matching
//! `#define NAME(` (with optional whitespace around `#` and `define`, and
//! no whitespace between the name and the opening parenthesis) and spans
//! every following line joined by a trailing backslash. This module finds
//! those blocks and splits them into their structural pieces; it knows
//! nothing about layout.
//!
//! # Example
//!
//! ```rust
//! use definefmt::parser::{extract_block, match_start, parse_block};
//!
//! let lines = ["#define ADD(a, b) \\", "    ((a) + (b))"];
//! let start = match_start(lines[0]).unwrap();
//! let (next, block) = extract_block(&lines, 0);
//! let parsed = parse_block(&start, &block).unwrap();
//!
//! assert_eq!(next, 2);
//! assert_eq!(parsed.name, "ADD");
//! assert_eq!(parsed.params, ["a", "b"]);
//! assert_eq!(parsed.body, ["((a) + (b))"]);
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::FormatError;

/// Start-of-macro pattern. The name must be immediately followed by `(`;
/// `#define NAME (x)` is an object-like macro and is left alone.
static DEFINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\s*#\s*define\s+)([A-Za-z_]\w*)\(").expect("macro start pattern is valid")
});

/// The matched pieces of a macro's first line.
#[derive(Debug, Clone, Copy)]
pub struct MacroStart<'a> {
    /// Leading whitespace plus `#define` plus spacing, verbatim.
    pub prefix: &'a str,
    /// The macro identifier.
    pub name: &'a str,
    /// Byte offset of the opening `(` in the first line.
    pub open_paren: usize,
}

/// A macro block split into its structural pieces.
///
/// Reassembling `prefix + name + "(" + params + ")" + body` with the layout
/// engine yields the original definition modulo whitespace collapsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedMacro {
    pub prefix: String,
    pub name: String,
    /// Trimmed parameter tokens, in order. Taken verbatim, no identifier
    /// validation. Empty for `NAME()`.
    pub params: Vec<String>,
    /// Trimmed non-empty body text, one fragment per contributing source
    /// line. Empty for a pure declaration.
    pub body: Vec<String>,
}

/// Match a line against the function-like macro start pattern.
pub fn match_start(line: &str) -> Option<MacroStart<'_>> {
    let caps = DEFINE_RE.captures(line)?;
    let whole = caps.get(0)?;
    Some(MacroStart {
        prefix: caps.get(1)?.as_str(),
        name: caps.get(2)?.as_str(),
        open_paren: whole.end() - 1,
    })
}

/// Collect the backslash-continued block starting at `start`.
///
/// Returns the index of the first line after the block and the block's
/// lines. The block keeps growing while the most recently included line,
/// trailing whitespace ignored, ends in `\`. A buffer that runs out
/// mid-continuation simply ends the block; malformed input is caught by
/// [`parse_block`] instead.
pub fn extract_block<'a>(lines: &[&'a str], start: usize) -> (usize, Vec<&'a str>) {
    let mut block = vec![lines[start]];
    let mut i = start + 1;
    while block.last().is_some_and(|l| l.trim_end().ends_with('\\')) && i < lines.len() {
        block.push(lines[i]);
        i += 1;
    }
    (i, block)
}

/// Split an extracted block into a [`ParsedMacro`].
///
/// Fails with [`FormatError::MalformedMacro`] when no `)` balances the
/// parameter list's opening parenthesis within the block.
pub fn parse_block(start: &MacroStart<'_>, block: &[&str]) -> Result<ParsedMacro, FormatError> {
    let close = find_param_close(block, start.open_paren)
        .ok_or_else(|| FormatError::MalformedMacro(start.name.to_string()))?;

    Ok(ParsedMacro {
        prefix: start.prefix.to_string(),
        name: start.name.to_string(),
        params: param_list(block, start.open_paren, close),
        body: body_fragments(block, close),
    })
}

/// A block line with its continuation marker (and the whitespace before
/// it) removed.
fn logical_text(line: &str) -> &str {
    let trimmed = line.trim_end();
    match trimmed.strip_suffix('\\') {
        Some(rest) => rest,
        None => line,
    }
}

/// Locate the `)` closing the parameter list, as (line, byte column)
/// within the block. Nested parentheses are tracked with a depth counter;
/// the first `)` at depth 0 wins.
fn find_param_close(block: &[&str], open_paren: usize) -> Option<(usize, usize)> {
    let mut depth = 0usize;
    for (li, line) in block.iter().enumerate() {
        let s = logical_text(line);
        let from = if li == 0 { open_paren + 1 } else { 0 };
        if from > s.len() {
            continue;
        }
        for (ci, ch) in s[from..].char_indices() {
            match ch {
                '(' => depth += 1,
                ')' => {
                    if depth == 0 {
                        return Some((li, from + ci));
                    }
                    depth -= 1;
                }
                _ => {}
            }
        }
    }
    None
}

/// Everything strictly between the parens, joined with single spaces,
/// then split on commas. All-whitespace yields zero parameters.
fn param_list(block: &[&str], open_paren: usize, close: (usize, usize)) -> Vec<String> {
    let (close_li, close_ci) = close;
    let mut parts: Vec<&str> = Vec::new();
    for (li, line) in block.iter().enumerate().take(close_li + 1) {
        let s = logical_text(line);
        let lo = if li == 0 { open_paren + 1 } else { 0 };
        let hi = if li == close_li { close_ci } else { s.len() };
        if lo <= hi {
            parts.push(s[lo..hi].trim());
        }
    }
    let raw = parts
        .iter()
        .filter(|p| !p.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ");
    if raw.is_empty() {
        Vec::new()
    } else {
        raw.split(',').map(|p| p.trim().to_string()).collect()
    }
}

/// Everything strictly after the closing `)`, trimmed per source line.
/// Lines contributing only whitespace are omitted entirely.
fn body_fragments(block: &[&str], close: (usize, usize)) -> Vec<String> {
    let (close_li, close_ci) = close;
    let mut out = Vec::new();
    for (li, line) in block.iter().enumerate().skip(close_li) {
        let s = logical_text(line);
        let tail = if li == close_li { &s[close_ci + 1..] } else { s };
        let tail = tail.trim();
        if !tail.is_empty() {
            out.push(tail.to_string());
        }
    }
    out
}
