//! Layout engine for function-like `#define` blocks
//!
//! Takes the structural pieces produced by [`crate::parser`] and re-emits
//! the macro under a declarative [`FormatOptions`]: line width, parameter
//! wrapping and alignment, backslash column alignment, and body placement.
//! Every line of a multi-line macro except the last receives exactly one
//! continuation marker, with nothing after it.
//!
//! # Example
//!
//! ```rust
//! use definefmt::formatter::{FormatOptions, format_source};
//!
//! let src = "#define ADD(a,b) ((a)+(b))\n";
//! let opts = FormatOptions::default();
//!
//! let formatted = format_source(src, &opts).unwrap();
//! assert_eq!(formatted, "#define ADD(a, b) ((a)+(b))\n");
//! ```

use std::str::FromStr;

use crate::error::FormatError;
use crate::parser::{ParsedMacro, extract_block, match_start, parse_block};

/// Parameter alignment mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Align {
    /// Parameters are emitted as-is.
    None,
    /// Every parameter is right-justified to the widest one, keeping a
    /// visual column of commas across wrapped lines.
    #[default]
    Comma,
}

impl FromStr for Align {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Align::None),
            "comma" => Ok(Align::Comma),
            other => Err(format!(
                "unknown alignment mode `{other}` (expected `none` or `comma`)"
            )),
        }
    }
}

/// Configuration for a formatting run.
///
/// Constructed once from the invocation options and read-only for the
/// whole run.
#[derive(Clone, Debug)]
pub struct FormatOptions {
    /// Maximum output line width, continuation marker excluded.
    pub max_width: usize,
    /// Indent for continuation lines.
    pub indent: usize,
    /// Spaces after the opening `(` on the define line. Only applied when
    /// the parameter list actually wraps.
    pub paren_pad: usize,
    /// Fixed parameter count per output line; 0 means auto-wrap by width.
    pub params_per_line: usize,
    /// Parameter alignment mode.
    pub align: Align,
    /// 1-based target column for continuation markers; 0 disables column
    /// alignment in favor of minimal spacing.
    pub backslash_col: usize,
    /// Minimum spaces before a continuation marker.
    pub space_before_backslash: usize,
    /// Force the macro body onto its own line(s).
    pub body_on_newline: bool,
    /// Remove `//` comment lines immediately above a recognized macro.
    pub strip_doc_comments: bool,
    /// Put only `prefix + name + "("` on the define line and start the
    /// parameters on the next line.
    pub start_params_new_line: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            max_width: 100,
            indent: 4,
            paren_pad: 4,
            params_per_line: 0,
            align: Align::Comma,
            backslash_col: 0,
            space_before_backslash: 1,
            body_on_newline: false,
            strip_doc_comments: false,
            start_params_new_line: false,
        }
    }
}

/// Wrapping state for one in-progress output line.
#[derive(Debug)]
struct Line {
    buf: String,
    count: usize,
    first: bool,
}

impl Line {
    fn open(buf: String) -> Self {
        Line {
            buf,
            count: 0,
            first: true,
        }
    }

    /// Whether `tok` must go on a fresh line. With a fixed per-line count
    /// the current line breaks once full; in auto mode it breaks when
    /// appending `", " + tok` would exceed the width, unless the token
    /// would be first on the line (an oversize parameter gets its own
    /// line rather than an empty one).
    fn must_break(&self, tok: &str, opts: &FormatOptions) -> bool {
        if opts.params_per_line > 0 {
            self.count >= opts.params_per_line
        } else {
            !self.first && self.buf.len() + 2 + tok.len() > opts.max_width
        }
    }

    fn push_param(&mut self, tok: &str) {
        if !self.first {
            self.buf.push_str(", ");
        }
        self.buf.push_str(tok);
        self.first = false;
        self.count += 1;
    }

    /// Emit the current line and hand back the blank state for the next
    /// one. `trailing_comma` is the new-line-mode separator convention.
    fn flush(self, out: &mut Vec<String>, indent: usize, trailing_comma: bool) -> Line {
        let mut done = self.buf;
        if trailing_comma {
            done.push(',');
        }
        out.push(done);
        Line::open(" ".repeat(indent))
    }

    fn close(self) -> String {
        let mut done = self.buf;
        done.push(')');
        done
    }
}

/// Lay out a parsed macro as raw output lines, continuation markers not
/// yet applied.
pub fn format_define(m: &ParsedMacro, opts: &FormatOptions) -> Vec<String> {
    let params = aligned_params(&m.params, opts);
    let head = format!("{}{}(", m.prefix, m.name);

    let mut lines = if params.is_empty() {
        vec![format!("{head})")]
    } else if opts.start_params_new_line {
        layout_new_line(&head, &params, opts)
    } else {
        let lines = layout_same_line(&head, &params, opts, opts.paren_pad);
        if lines.len() == 1 && opts.paren_pad > 0 {
            // Nothing wrapped, so the paren padding has nothing to align.
            layout_same_line(&head, &params, opts, 0)
        } else {
            lines
        }
    };

    append_body(&mut lines, &m.body, opts);
    lines
}

fn aligned_params(params: &[String], opts: &FormatOptions) -> Vec<String> {
    match opts.align {
        Align::Comma if !params.is_empty() => {
            let widest = params.iter().map(|p| p.len()).max().unwrap_or(0);
            params.iter().map(|p| format!("{p:>widest$}")).collect()
        }
        _ => params.to_vec(),
    }
}

/// Default mode: parameters begin right after the opening parenthesis.
fn layout_same_line(head: &str, params: &[String], opts: &FormatOptions, pad: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = Line::open(format!("{head}{}", " ".repeat(pad)));
    for tok in params {
        if line.must_break(tok, opts) {
            line = line.flush(&mut lines, opts.indent, false);
        }
        line.push_param(tok);
    }
    lines.push(line.close());
    lines
}

/// `start_params_new_line` mode: the define line carries only the opening
/// parenthesis, every flushed line ends in a comma, and the final
/// parameter's line carries the `)`.
fn layout_new_line(head: &str, params: &[String], opts: &FormatOptions) -> Vec<String> {
    let mut lines = vec![head.to_string()];
    let mut line = Line::open(" ".repeat(opts.indent));
    for tok in params {
        if line.must_break(tok, opts) {
            line = line.flush(&mut lines, opts.indent, true);
        }
        line.push_param(tok);
    }
    lines.push(line.close());
    lines
}

fn append_body(lines: &mut Vec<String>, body: &[String], opts: &FormatOptions) {
    if body.is_empty() {
        return;
    }
    let fits_last_line = body.len() == 1
        && lines
            .last()
            .is_some_and(|l| l.len() + 1 + body[0].len() <= opts.max_width);
    if !opts.body_on_newline && fits_last_line {
        if let Some(last) = lines.last_mut() {
            last.push(' ');
            last.push_str(&body[0]);
        }
    } else {
        let indent = " ".repeat(opts.indent);
        lines.extend(body.iter().map(|b| format!("{indent}{b}")));
    }
}

/// Append continuation markers to the lines flagged in `needs`.
///
/// With a target column configured the marker is padded out to land
/// exactly there; a line already at or past the column falls back to
/// minimal spacing rather than corrupting alignment.
pub fn apply_continuations(lines: Vec<String>, needs: &[bool], opts: &FormatOptions) -> Vec<String> {
    lines
        .into_iter()
        .zip(needs)
        .map(|(line, &need)| {
            if !need {
                return line;
            }
            let pad = if opts.backslash_col > 0 {
                let before_marker = opts.backslash_col - 1;
                if line.len() >= before_marker {
                    opts.space_before_backslash
                } else {
                    (before_marker - line.len()).max(opts.space_before_backslash)
                }
            } else {
                opts.space_before_backslash
            };
            format!("{line}{}\\", " ".repeat(pad))
        })
        .collect()
}

/// Reformat every recognized function-like macro in `input`.
///
/// Non-macro lines pass through unchanged; line endings are normalized to
/// `\n`, and the presence of a final newline is preserved. With
/// `strip_doc_comments` set, `//` lines immediately above a recognized
/// macro are dropped from the already-emitted output (a blank line stops
/// the backward scan).
///
/// # Errors
///
/// Returns [`FormatError::MalformedMacro`] when a recognized macro's
/// parameter list never closes; no output is produced for the buffer in
/// that case.
pub fn format_source(input: &str, opts: &FormatOptions) -> Result<String, FormatError> {
    let had_final_newline = input.ends_with('\n');
    let lines: Vec<&str> = input.lines().collect();
    let mut out: Vec<String> = Vec::new();

    let mut i = 0;
    while i < lines.len() {
        let Some(start) = match_start(lines[i]) else {
            out.push(lines[i].to_string());
            i += 1;
            continue;
        };

        if opts.strip_doc_comments {
            while out
                .last()
                .is_some_and(|l| l.trim_start().starts_with("//"))
            {
                out.pop();
            }
        }

        let (next, block) = extract_block(&lines, i);
        let parsed = parse_block(&start, &block)?;
        let formatted = format_define(&parsed, opts);

        // Every line of a multi-line macro except the last continues.
        let needs: Vec<bool> = (0..formatted.len())
            .map(|k| k + 1 < formatted.len())
            .collect();
        out.extend(apply_continuations(formatted, &needs, opts));
        i = next;
    }

    let mut result = out.join("\n");
    if had_final_newline && !out.is_empty() {
        result.push('\n');
    }
    Ok(result)
}
