//! # definefmt - C preprocessor macro reformatter
//!
//! definefmt reformats multi-line function-like `#define` macros — the kind
//! spread across physical lines joined by trailing backslashes. It parses
//! each macro's name, parameter list, and body out of the raw source, then
//! re-emits the definition under a declarative configuration: maximum line
//! width, parameters per line, comma alignment, backslash column, and body
//! placement. Everything that is not a recognized function-like macro
//! passes through untouched.
//!
//! ## Usage
//!
//! ### As a Library
//!
//! ```rust
//! use definefmt::formatter::{FormatOptions, format_source};
//!
//! let src = "#define MAX2(a,b) ((a) > (b) ? (a) : (b))\n";
//! let opts = FormatOptions::default();
//!
//! let formatted = format_source(src, &opts).unwrap();
//! assert_eq!(formatted, "#define MAX2(a, b) ((a) > (b) ? (a) : (b))\n");
//! ```
//!
//! ### As a CLI Tool
//!
//! The `definefmt` binary exposes the formatter as the `fmt` subcommand,
//! plus two auxiliary header generators (`gen-inc`, `gen-features`). See
//! the `main` module for flag details.
//!
//! ## Modules
//!
//! - [`parser`] - Block extraction and macro parsing
//! - [`formatter`] - Layout engine, continuation emitter, and public API
//! - [`error`] - Typed error values
//! - [`inc_chain`] - Chained increment header generator
//! - [`features`] - C++ feature test macro header generator
//!
//! ## Limitations
//!
//! - No preprocessor semantics: macros are reformatted as text, never
//!   expanded or validated as C
//! - Object-like (parameterless) `#define`s are not touched
//! - Widths are byte counts; alignment assumes single-byte columns

/// Recognition and parsing of function-like macro blocks
pub mod parser;

/// Layout engine and public formatting API
pub mod formatter;

/// Typed errors for parsing and invocation
pub mod error;

/// Chained increment header generator
pub mod inc_chain;

/// C++ feature test macro header generator
pub mod features;
