use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use definefmt::error::InvocationError;
use definefmt::formatter::{Align, FormatOptions, format_source};
use definefmt::{features, inc_chain};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Parser, Debug)]
#[command(
    name = "definefmt",
    version,
    about = "Reformatter for function-like C preprocessor macros"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Reformat multi-line `#define` blocks in the given files
    Fmt {
        /// Paths (files or directories) to format
        paths: Vec<PathBuf>,
        /// Rewrite the files in place
        #[arg(long)]
        in_place: bool,
        /// Output path (only valid with a single input file)
        #[arg(long)]
        out: Option<PathBuf>,
        /// Maximum output line width
        #[arg(long, default_value_t = 100)]
        max_width: usize,
        /// Indent for continuation lines
        #[arg(long, default_value_t = 4)]
        indent: usize,
        /// Spaces after `(` on the define line
        #[arg(long, default_value_t = 4)]
        paren_pad: usize,
        /// Fixed parameters per output line (0 = auto wrap by width)
        #[arg(long, default_value_t = 0)]
        params_per_line: usize,
        /// Parameter alignment: `none` or `comma`
        #[arg(long, default_value = "comma")]
        align: Align,
        /// 1-based column to align `\` to (0 = minimal spacing)
        #[arg(long, default_value_t = 0)]
        backslash_col: usize,
        /// Minimum spaces before a `\`
        #[arg(long, default_value_t = 1)]
        space_before_backslash: usize,
        /// Force the macro body onto its own line(s)
        #[arg(long)]
        body_on_newline: bool,
        /// Remove `//` comment blocks immediately above formatted defines
        #[arg(long)]
        strip_doc_comments: bool,
        /// If the macro wraps, put `(` on the define line and start the
        /// first parameter on the next line
        #[arg(long)]
        start_params_new_line: bool,
    },
    /// Generate the chained increment headers (inc128.h .. inc1024.h)
    GenInc {
        /// Directory holding inc64.h; generated headers land next to it
        out_dir: PathBuf,
    },
    /// Generate the C++ feature test macro header
    GenFeatures {
        /// Path of the header file to write
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Fmt {
            paths,
            in_place,
            out,
            max_width,
            indent,
            paren_pad,
            params_per_line,
            align,
            backslash_col,
            space_before_backslash,
            body_on_newline,
            strip_doc_comments,
            start_params_new_line,
        } => {
            if in_place && out.is_some() {
                bail!("--in-place and --out are mutually exclusive");
            }
            let opts = FormatOptions {
                max_width,
                indent,
                paren_pad,
                params_per_line,
                align,
                backslash_col,
                space_before_backslash,
                body_on_newline,
                strip_doc_comments,
                start_params_new_line,
            };

            let mut files = Vec::new();
            for p in &paths {
                collect_inputs(p, &mut files);
            }
            if out.is_some() && files.len() != 1 {
                return Err(InvocationError::OutWithMultipleInputs.into());
            }
            if !in_place && out.is_none() {
                return Err(InvocationError::NoOutputSelected.into());
            }

            if let Some(out_path) = out {
                let content = fs::read_to_string(&files[0])
                    .with_context(|| format!("reading {}", files[0].display()))?;
                let formatted = format_source(&content, &opts)
                    .with_context(|| format!("formatting {}", files[0].display()))?;
                fs::write(&out_path, formatted)
                    .with_context(|| format!("writing {}", out_path.display()))?;
            } else {
                let results: Vec<_> = files
                    .par_iter()
                    .map(|path| rewrite_file(path, &opts))
                    .collect();
                let mut failed = false;
                for r in results {
                    if let Err(e) = r {
                        eprintln!("{e:#}");
                        failed = true;
                    }
                }
                if failed {
                    std::process::exit(1);
                }
            }
        }
        Commands::GenInc { out_dir } => {
            fs::create_dir_all(&out_dir)
                .with_context(|| format!("creating {}", out_dir.display()))?;
            for path in inc_chain::write_inc_headers(&out_dir)? {
                println!("wrote {}", path.display());
            }
        }
        Commands::GenFeatures { out } => {
            fs::write(&out, features::render_features_header())
                .with_context(|| format!("writing {}", out.display()))?;
            println!("wrote {}", out.display());
        }
    }
    Ok(())
}

const C_EXTENSIONS: &[&str] = &["h", "c", "hh", "hpp", "cc", "cpp", "inl"];

fn is_c_source(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| C_EXTENSIONS.contains(&ext))
}

/// Explicit file arguments are taken as-is; directories are walked for
/// C/C++ sources and headers.
fn collect_inputs(path: &Path, out: &mut Vec<PathBuf>) {
    if path.is_file() {
        out.push(path.to_path_buf());
        return;
    }
    for entry in WalkDir::new(path).into_iter().filter_map(|e| e.ok()) {
        let p = entry.path();
        if p.is_file() && is_c_source(p) {
            out.push(p.to_path_buf());
        }
    }
}

/// Format one file and rewrite it when the content changed. The formatted
/// text is produced in full before anything is written, so a failing file
/// is left untouched.
fn rewrite_file(path: &Path, opts: &FormatOptions) -> Result<()> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let formatted =
        format_source(&content, opts).with_context(|| format!("formatting {}", path.display()))?;
    if formatted != content {
        fs::write(path, formatted).with_context(|| format!("writing {}", path.display()))?;
    }
    Ok(())
}
