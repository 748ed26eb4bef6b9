//! Error types for the formatter and its command line

use thiserror::Error;

/// Fatal parse failures. Everything else (empty body, zero parameters, a
/// block cut short by end of buffer) is a valid edge case the parser
/// degrades through instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    /// No `)` balancing the parameter list's `(` was found before the
    /// macro block ended.
    #[error("no closing `)` found for the parameter list of macro `{0}`")]
    MalformedMacro(String),
}

/// Invalid command-line invocations, raised before any file content is
/// read.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvocationError {
    #[error("--out can only be used with a single input file")]
    OutWithMultipleInputs,
    #[error("specify either --in-place or --out")]
    NoOutputSelected,
}
