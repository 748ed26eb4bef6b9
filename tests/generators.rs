use std::fs;
use std::path::PathBuf;

use definefmt::features::render_features_header;
use definefmt::inc_chain::{render_inc_header, write_inc_headers};

#[test]
fn inc_header_chains_and_aligns_values() {
    let header = render_inc_header("inc64.h", 64, 127);
    let lines: Vec<&str> = header.lines().collect();

    assert_eq!(lines[0], "#include \"inc64.h\"");
    assert_eq!(lines[1], "");
    // Widest name in this range is D_INTERNAL_INC_127, so the two-digit
    // names get one extra space to keep the value column straight.
    assert_eq!(lines[2], "#define D_INTERNAL_INC_64  65");
    assert_eq!(lines[lines.len() - 1], "#define D_INTERNAL_INC_127 128");
    assert_eq!(lines.len(), 2 + 64);
    assert!(header.ends_with('\n'));
}

#[test]
fn inc_chain_requires_the_base_header() {
    let dir = scratch_dir("no-base");
    assert!(write_inc_headers(&dir).is_err());

    fs::write(dir.join("inc64.h"), "#define D_INTERNAL_INC_0 1\n").unwrap();
    let written = write_inc_headers(&dir).unwrap();
    let names: Vec<String> = written
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["inc128.h", "inc256.h", "inc512.h", "inc1024.h"]);
    for p in &written {
        assert!(p.exists());
    }
    // inc256.h pulls in inc128.h, continuing the chain.
    let inc256 = fs::read_to_string(dir.join("inc256.h")).unwrap();
    assert!(inc256.starts_with("#include \"inc128.h\"\n"));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn features_header_shape() {
    let header = render_features_header();

    assert!(header.starts_with("/*"));
    assert!(header.contains("#ifndef CPP_FEATURES_H_"));
    assert!(header.ends_with("#endif  // CPP_FEATURES_H_\n"));

    // Language feature: all five macros present.
    assert!(header.contains("// D_ENV_CPP_FEATURE_LANG_CONSTEXPR\n"));
    assert!(header.contains("    #define D_ENV_CPP_FEATURE_LANG_CONSTEXPR  1"));
    assert!(header.contains("#define D_ENV_CPP_FEATURE_LANG_CONSTEXPR_NAME  \"__cpp_constexpr\""));
    assert!(header.contains("#define D_ENV_CPP_FEATURE_LANG_CONSTEXPR_VERS  \"(C++11)\""));

    // Library feature keeps the STL prefix and drops __cpp_lib_.
    assert!(header.contains("#define D_ENV_CPP_FEATURE_STL_OPTIONAL_NAME  \"__cpp_lib_optional\""));

    // Aggregates are backslash-continued conjunctions.
    assert!(header.contains("#define D_ENV_CPP_FEATURE_HAS_ALL_LANG_CPP11  \\"));
    assert!(header.contains("#define D_ENV_CPP_FEATURE_HAS_ALL_CPP26  \\"));
    assert!(header.contains(" && \\\n      "));

    // C++11 has no library features, so no STL aggregate for it.
    assert!(!header.contains("D_ENV_CPP_FEATURE_HAS_ALL_STL_CPP11"));
}

fn scratch_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("definefmt-{tag}-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}
