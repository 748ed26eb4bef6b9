use definefmt::error::FormatError;
use definefmt::formatter::{Align, FormatOptions, format_source};

fn fmt(src: &str, opts: &FormatOptions) -> String {
    format_source(src, opts).unwrap()
}

fn defaults() -> FormatOptions {
    FormatOptions::default()
}

#[test]
fn short_macro_stays_on_one_line() {
    // Fits within the width, so no paren padding and no continuation.
    let out = fmt("#define ADD(a,b) ((a)+(b))\n", &defaults());
    assert_eq!(out, "#define ADD(a, b) ((a)+(b))\n");
}

#[test]
fn single_char_params_make_comma_alignment_a_noop() {
    let none = FormatOptions {
        align: Align::None,
        ..defaults()
    };
    let src = "#define ADD(a,b) ((a)+(b))\n";
    assert_eq!(fmt(src, &defaults()), fmt(src, &none));
}

#[test]
fn fixed_one_param_per_line() {
    let opts = FormatOptions {
        params_per_line: 1,
        ..defaults()
    };
    let out = fmt("#define CHK(x, long_parameter_name, y) (x)\n", &opts);
    // Comma alignment right-justifies to the widest parameter (19 wide);
    // the first line keeps the paren padding, wrapped lines sit at the
    // indent, and the last line carries the `)` and the body.
    let expected = format!(
        "#define CHK({sp22}x \\\n    long_parameter_name \\\n{sp22}y) (x)\n",
        sp22 = " ".repeat(22)
    );
    assert_eq!(out, expected);
}

#[test]
fn empty_parameter_list_keeps_body_on_same_line() {
    let out = fmt("#define NOOP() do {} while(0)\n", &defaults());
    assert_eq!(out, "#define NOOP() do {} while(0)\n");
}

#[test]
fn empty_parameter_list_ignores_new_line_mode() {
    let opts = FormatOptions {
        start_params_new_line: true,
        ..defaults()
    };
    let out = fmt("#define NOOP() do {} while(0)\n", &opts);
    assert_eq!(out, "#define NOOP() do {} while(0)\n");
}

#[test]
fn strips_doc_comments_directly_above_macro() {
    let opts = FormatOptions {
        strip_doc_comments: true,
        ..defaults()
    };
    let src = "// adds two values\n// returns the sum\n#define ADD(a,b) ((a)+(b))\nint x;\n";
    assert_eq!(fmt(src, &opts), "#define ADD(a, b) ((a)+(b))\nint x;\n");
}

#[test]
fn blank_line_stops_comment_stripping() {
    let opts = FormatOptions {
        strip_doc_comments: true,
        ..defaults()
    };
    let src = "// kept comment\n\n#define ADD(a,b) ((a)+(b))\n";
    assert_eq!(fmt(src, &opts), "// kept comment\n\n#define ADD(a, b) ((a)+(b))\n");
}

#[test]
fn backslash_column_alignment() {
    let opts = FormatOptions {
        backslash_col: 40,
        body_on_newline: true,
        ..defaults()
    };
    let out = fmt("#define A(x) y\n", &opts);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    // The marker lands exactly at column 40 (1-based).
    assert_eq!(lines[0].len(), 40);
    assert!(lines[0].ends_with('\\'));
    assert_eq!(lines[0].trim_end_matches([' ', '\\']), "#define A(x)");
    assert_eq!(lines[1], "    y");
}

#[test]
fn overlong_line_falls_back_to_minimal_spacing() {
    let opts = FormatOptions {
        backslash_col: 80,
        body_on_newline: true,
        ..defaults()
    };
    let param = "an_extremely_long_parameter_name_that_overflows_the_backslash_column_easily";
    let src = format!("#define X({param}) b\n");
    let out = fmt(&src, &opts);
    let lines: Vec<&str> = out.lines().collect();
    // No negative padding: a single space then the marker.
    assert_eq!(lines[0], format!("#define X({param}) \\"));
    assert_eq!(lines[1], "    b");
}

#[test]
fn continuation_markers_on_all_lines_but_the_last() {
    let opts = FormatOptions {
        body_on_newline: true,
        ..defaults()
    };
    let src = "#define INIT(a, b) \\\n    do { \\\n        (a) = 0; \\\n        (b) = 0; \\\n    } while (0)\n";
    let out = fmt(src, &opts);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 5);
    for line in &lines[..4] {
        assert!(line.ends_with('\\'), "expected continuation on {line:?}");
        assert_eq!(line.trim_end(), *line, "trailing whitespace after marker");
    }
    assert!(!lines[4].ends_with('\\'));
}

#[test]
fn body_fragments_each_get_their_own_line() {
    let opts = FormatOptions {
        body_on_newline: true,
        ..defaults()
    };
    let src = "#define INIT(a, b) \\\n    do { \\\n        (a) = 0; \\\n        (b) = 0; \\\n    } while (0)\n";
    let expected = "#define INIT(a, b) \\\n    do { \\\n    (a) = 0; \\\n    (b) = 0; \\\n    } while (0)\n";
    assert_eq!(fmt(src, &opts), expected);
}

#[test]
fn auto_wrap_respects_max_width() {
    let opts = FormatOptions {
        align: Align::None,
        max_width: 30,
        ..defaults()
    };
    let out = fmt(
        "#define LONGNAME(alpha, beta, gamma, delta, epsilon) v\n",
        &opts,
    );
    for line in out.lines() {
        let content = line.trim_end_matches('\\').trim_end();
        assert!(content.len() <= 30, "line too wide: {line:?}");
    }
    assert!(out.lines().count() > 1);
}

#[test]
fn oversize_single_parameter_occupies_its_own_line() {
    let opts = FormatOptions {
        align: Align::None,
        max_width: 10,
        ..defaults()
    };
    // Never breaks before a token that would be first on its line; the
    // body no longer fits, so it moves to its own indented line.
    let out = fmt("#define W(quite_long_parameter) v\n", &opts);
    assert_eq!(out, "#define W(quite_long_parameter) \\\n    v\n");
}

#[test]
fn new_line_mode_uses_trailing_commas() {
    let opts = FormatOptions {
        start_params_new_line: true,
        align: Align::None,
        params_per_line: 2,
        ..defaults()
    };
    let out = fmt("#define M(a, b, c, d, e) val\n", &opts);
    let expected = "#define M( \\\n    a, b, \\\n    c, d, \\\n    e) val\n";
    assert_eq!(out, expected);
}

#[test]
fn formatting_is_idempotent() {
    let cases: Vec<(&str, FormatOptions)> = vec![
        ("#define ADD(a,b) ((a)+(b))\n", defaults()),
        (
            "#define M(a, b, c, d, e) val\n",
            FormatOptions {
                start_params_new_line: true,
                align: Align::None,
                params_per_line: 2,
                ..defaults()
            },
        ),
        (
            "#define INIT(a, b) \\\n    do { \\\n        (a) = 0; \\\n    } while (0)\n",
            FormatOptions {
                body_on_newline: true,
                backslash_col: 48,
                ..defaults()
            },
        ),
    ];
    for (src, opts) in cases {
        let once = fmt(src, &opts);
        let twice = fmt(&once, &opts);
        assert_eq!(once, twice, "not idempotent for {src:?}");
    }
}

#[test]
fn non_macro_lines_pass_through_verbatim() {
    let src = "#include <stdio.h>\n\n#define LIMIT 42\nint main(void) {\n#define SQ(x) ((x)*(x))\n    return SQ(2);\n}\n";
    let out = fmt(src, &defaults());
    let expected = "#include <stdio.h>\n\n#define LIMIT 42\nint main(void) {\n#define SQ(x) ((x)*(x))\n    return SQ(2);\n}\n";
    assert_eq!(out, expected);
}

#[test]
fn object_like_and_spaced_defines_are_not_touched() {
    // `#define NAME (x)` is object-like: the paren is not attached.
    let src = "#define VALUE (1 + 2)\n#define COUNT 3\n";
    assert_eq!(fmt(src, &defaults()), src);
}

#[test]
fn block_cut_short_at_end_of_buffer_still_formats() {
    // Trailing continuation with nothing after it is a valid edge case.
    let out = fmt("#define X(a) \\", &defaults());
    assert_eq!(out, "#define X(a)");
}

#[test]
fn unbalanced_parameter_list_is_an_error() {
    let err = format_source("#define BAD(a, b\n", &defaults()).unwrap_err();
    assert_eq!(err, FormatError::MalformedMacro("BAD".to_string()));
}

#[test]
fn pure_declaration_keeps_empty_body() {
    let out = fmt("#define MARKER(name)\n", &defaults());
    assert_eq!(out, "#define MARKER(name)\n");
}

#[test]
fn final_newline_presence_is_preserved() {
    assert_eq!(fmt("#define A(x) y", &defaults()), "#define A(x) y");
    assert_eq!(fmt("#define A(x) y\n", &defaults()), "#define A(x) y\n");
}
