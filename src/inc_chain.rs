//! Chained increment header generator
//!
//! Emits `inc128.h` through `inc1024.h`, each including its predecessor
//! and defining `D_INTERNAL_INC_N` as `N + 1` for the range the file adds
//! on top of the chain:
//!
//! - `inc128.h`  covers 64..=127   and includes `inc64.h`
//! - `inc256.h`  covers 128..=255  and includes `inc128.h`
//! - `inc512.h`  covers 256..=511  and includes `inc256.h`
//! - `inc1024.h` covers 512..=1023 and includes `inc512.h`
//!
//! `inc64.h` is the hand-written base of the chain and is never
//! regenerated; it must already exist in the output directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

/// (total, first value, last value, header included)
const TARGETS: &[(u32, u32, u32, &str)] = &[
    (128, 64, 127, "inc64.h"),
    (256, 128, 255, "inc128.h"),
    (512, 256, 511, "inc256.h"),
    (1024, 512, 1023, "inc512.h"),
];

/// Render one chained header: the include of its predecessor, a blank
/// line, then one define per value with the values aligned in a column
/// one space past the widest name.
pub fn render_inc_header(include_name: &str, start: u32, end: u32) -> String {
    let names: Vec<String> = (start..=end)
        .map(|i| format!("D_INTERNAL_INC_{i}"))
        .collect();
    let max_len = names.iter().map(|n| n.len()).max().unwrap_or(0);

    let mut lines = vec![format!("#include \"{include_name}\""), String::new()];
    for (i, name) in (start..=end).zip(&names) {
        let spaces = " ".repeat(max_len - name.len() + 1);
        lines.push(format!("#define {name}{spaces}{}", i + 1));
    }
    lines.join("\n") + "\n"
}

/// Write the whole chain into `out_dir`, returning the paths written.
pub fn write_inc_headers(out_dir: &Path) -> Result<Vec<PathBuf>> {
    let base = out_dir.join("inc64.h");
    if !base.exists() {
        bail!(
            "{} not found (the chain starts from an existing inc64.h)",
            base.display()
        );
    }

    let mut written = Vec::new();
    for &(total, start, end, include) in TARGETS {
        let out_path = out_dir.join(format!("inc{total}.h"));
        fs::write(&out_path, render_inc_header(include, start, end))
            .with_context(|| format!("writing {}", out_path.display()))?;
        written.push(out_path);
    }
    Ok(written)
}
