//! C++ feature test macro header generator
//!
//! Emits `cpp_features.h` from two static tables: language features
//! (`__cpp_*`) and standard library features (`__cpp_lib_*`). Each
//! feature expands to five macros — an enabled flag, `_NAME`, `_DESC`,
//! `_VAL`, and `_VERS` — grouped by C++ version, followed by per-version
//! `HAS_ALL_*` aggregate checks rendered as backslash-continued
//! conjunctions. The library table is a representative sample of the
//! full feature test macro list.

use std::collections::BTreeMap;

/// One feature test macro entry.
#[derive(Debug, Clone, Copy)]
pub struct Feature {
    /// The standard feature test macro, e.g. `__cpp_constexpr`.
    pub name: &'static str,
    /// Human-readable description.
    pub desc: &'static str,
    /// The standard's value for the macro, e.g. `200704L`.
    pub value: &'static str,
    /// C++ standard version introducing the feature (11, 14, ...).
    pub version: u32,
}

const fn feat(name: &'static str, desc: &'static str, value: &'static str, version: u32) -> Feature {
    Feature {
        name,
        desc,
        value,
        version,
    }
}

/// Language features, C++11 through C++26.
pub const LANG_FEATURES: &[Feature] = &[
    // C++11
    feat("__cpp_alias_templates", "Alias templates", "200704L", 11),
    feat("__cpp_attributes", "Attributes", "200809L", 11),
    feat("__cpp_constexpr", "constexpr", "200704L", 11),
    feat("__cpp_decltype", "decltype", "200707L", 11),
    feat("__cpp_delegating_constructors", "Delegating constructors", "200604L", 11),
    feat("__cpp_inheriting_constructors", "Inheriting constructors", "200802L", 11),
    feat("__cpp_initializer_lists", "List-initialization and std::initializer_list", "200806L", 11),
    feat("__cpp_lambdas", "Lambda expressions", "200907L", 11),
    feat("__cpp_nsdmi", "Non-static data member initializers", "200809L", 11),
    feat("__cpp_range_based_for", "Range-based for loop", "200907L", 11),
    feat("__cpp_raw_strings", "Raw string literals", "200710L", 11),
    feat("__cpp_ref_qualifiers", "ref-qualifiers", "200710L", 11),
    feat("__cpp_rvalue_references", "Rvalue reference", "200610L", 11),
    feat("__cpp_static_assert", "static_assert", "200410L", 11),
    feat("__cpp_threadsafe_static_init", "Dynamic initialization and destruction with concurrency", "200806L", 11),
    feat("__cpp_unicode_characters", "New character types (char16_t and char32_t)", "200704L", 11),
    feat("__cpp_unicode_literals", "Unicode string literals", "200710L", 11),
    feat("__cpp_user_defined_literals", "User-defined literals", "200809L", 11),
    feat("__cpp_variadic_templates", "Variadic templates", "200704L", 11),
    // C++14
    feat("__cpp_aggregate_nsdmi", "Aggregate classes with default member initializers", "201304L", 14),
    feat("__cpp_binary_literals", "Binary literals", "201304L", 14),
    feat("__cpp_decltype_auto", "Return type deduction for normal functions", "201304L", 14),
    feat("__cpp_enumerator_attributes", "Attributes for enumerators", "201411L", 14),
    feat("__cpp_generic_lambdas", "Generic lambda expressions", "201304L", 14),
    feat("__cpp_init_captures", "Lambda init-capture", "201304L", 14),
    feat("__cpp_namespace_attributes", "Attributes for namespaces", "201411L", 14),
    feat("__cpp_nontype_template_args", "Allow constant evaluation for all constant template arguments", "201411L", 14),
    feat("__cpp_return_type_deduction", "Return type deduction for normal functions", "201304L", 14),
    feat("__cpp_sized_deallocation", "Sized deallocation", "201309L", 14),
    feat("__cpp_variable_templates", "Variable templates", "201304L", 14),
    // C++17
    feat("__cpp_aggregate_bases", "Aggregate classes with base classes", "201603L", 17),
    feat("__cpp_aligned_new", "Dynamic memory allocation for over-aligned data", "201606L", 17),
    feat("__cpp_capture_star_this", "Lambda capture of *this by value as [=,*this]", "201603L", 17),
    feat("__cpp_constexpr_in_decltype", "Generation of function and variable definitions when needed for constant evaluation", "201711L", 17),
    feat("__cpp_deduction_guides", "Template argument deduction for class templates (CTAD)", "201703L", 17),
    feat("__cpp_fold_expressions", "Fold expressions", "201603L", 17),
    feat("__cpp_guaranteed_copy_elision", "Guaranteed copy elision through simplified value categories", "201606L", 17),
    feat("__cpp_hex_float", "Hexadecimal floating literals", "201603L", 17),
    feat("__cpp_if_constexpr", "if constexpr", "201606L", 17),
    feat("__cpp_inline_variables", "Inline variables", "201606L", 17),
    feat("__cpp_noexcept_function_type", "Make exception specifications be part of the type system", "201510L", 17),
    feat("__cpp_nontype_template_parameter_auto", "Declaring constant template parameter with auto", "201606L", 17),
    feat("__cpp_structured_bindings", "Structured bindings", "201606L", 17),
    feat("__cpp_template_template_args", "Matching of template template arguments", "201611L", 17),
    feat("__cpp_variadic_using", "Pack expansions in using-declarations", "201611L", 17),
    // C++20
    feat("__cpp_aggregate_paren_init", "Aggregate initialization in the form of direct initialization", "201902L", 20),
    feat("__cpp_char8_t", "char8_t", "201811L", 20),
    feat("__cpp_concepts", "Concepts", "201907L", 20),
    feat("__cpp_conditional_explicit", "explicit(bool)", "201806L", 20),
    feat("__cpp_consteval", "Immediate functions", "201811L", 20),
    feat("__cpp_constexpr_dynamic_alloc", "Operations for dynamic storage duration in constexpr functions", "201907L", 20),
    feat("__cpp_constinit", "constinit", "201907L", 20),
    feat("__cpp_designated_initializers", "Designated initializers", "201707L", 20),
    feat("__cpp_impl_coroutine", "Coroutines (compiler support)", "201902L", 20),
    feat("__cpp_impl_destroying_delete", "Destroying operator delete (compiler support)", "201806L", 20),
    feat("__cpp_impl_three_way_comparison", "Three-way comparison (compiler support)", "201907L", 20),
    feat("__cpp_modules", "Modules", "201907L", 20),
    feat("__cpp_using_enum", "using enum", "201907L", 20),
    // C++23
    feat("__cpp_auto_cast", "auto(x) and auto{x}", "202110L", 23),
    feat("__cpp_explicit_this_parameter", "Explicit object parameter", "202110L", 23),
    feat("__cpp_if_consteval", "if consteval", "202106L", 23),
    feat("__cpp_implicit_move", "Simpler implicit move", "202207L", 23),
    feat("__cpp_multidimensional_subscript", "Multidimensional subscript operator", "202110L", 23),
    feat("__cpp_named_character_escapes", "Named universal character escapes", "202207L", 23),
    feat("__cpp_size_t_suffix", "Literal suffixes for std::size_t and its signed version", "202011L", 23),
    feat("__cpp_static_call_operator", "Static operator()", "202207L", 23),
    // C++26
    feat("__cpp_constexpr_exceptions", "constexpr exceptions", "202411L", 26),
    feat("__cpp_contracts", "Contracts", "202502L", 26),
    feat("__cpp_deleted_function", "Deleted function definitions with messages", "202403L", 26),
    feat("__cpp_pack_indexing", "Pack indexing", "202311L", 26),
    feat("__cpp_placeholder_variables", "A nice placeholder with no name", "202306L", 26),
    feat("__cpp_pp_embed", "#embed", "202502L", 26),
    feat("__cpp_template_parameters", "Concept and variable-template template-parameters", "202502L", 26),
    feat("__cpp_trivial_relocatability", "Trivial relocatability", "202502L", 26),
    feat("__cpp_trivial_union", "Trivial unions", "202502L", 26),
    feat("__cpp_variadic_friend", "Variadic friend declarations", "202403L", 26),
];

/// Standard library features, C++14 through C++26.
pub const LIB_FEATURES: &[Feature] = &[
    // C++14
    feat("__cpp_lib_chrono_udls", "User-defined literals for time types", "201304L", 14),
    feat("__cpp_lib_complex_udls", "User-defined Literals for std::complex", "201309L", 14),
    // C++17
    feat("__cpp_lib_addressof_constexpr", "Constexpr std::addressof", "201603L", 17),
    feat("__cpp_lib_any", "std::any", "201606L", 17),
    feat("__cpp_lib_apply", "std::apply", "201603L", 17),
    feat("__cpp_lib_array_constexpr", "Constexpr for std::reverse_iterator, std::move_iterator, std::array", "201603L", 17),
    feat("__cpp_lib_as_const", "std::as_const", "201510L", 17),
    feat("__cpp_lib_bool_constant", "std::bool_constant", "201505L", 17),
    feat("__cpp_lib_boyer_moore_searcher", "Searchers", "201603L", 17),
    feat("__cpp_lib_byte", "std::byte", "201603L", 17),
    feat("__cpp_lib_clamp", "std::clamp", "201603L", 17),
    feat("__cpp_lib_filesystem", "Filesystem library", "201703L", 17),
    feat("__cpp_lib_optional", "std::optional", "201606L", 17),
    feat("__cpp_lib_variant", "std::variant", "201606L", 17),
    // C++20
    feat("__cpp_lib_assume_aligned", "std::assume_aligned", "201811L", 20),
    feat("__cpp_lib_atomic_flag_test", "std::atomic_flag::test", "201907L", 20),
    feat("__cpp_lib_atomic_float", "Floating-point atomic", "201711L", 20),
    feat("__cpp_lib_atomic_ref", "std::atomic_ref", "201806L", 20),
    feat("__cpp_lib_atomic_wait", "Efficient std::atomic waiting", "201907L", 20),
    feat("__cpp_lib_barrier", "std::barrier", "201907L", 20),
    feat("__cpp_lib_bind_front", "std::bind_front", "201907L", 20),
    feat("__cpp_lib_bit_cast", "std::bit_cast", "201806L", 20),
    feat("__cpp_lib_bitops", "Bit operations", "201907L", 20),
    feat("__cpp_lib_bounded_array_traits", "std::is_bounded_array, std::is_unbounded_array", "201902L", 20),
    feat("__cpp_lib_char8_t", "Library support for char8_t", "201907L", 20),
    feat("__cpp_lib_concepts", "Standard library concepts", "202002L", 20),
    feat("__cpp_lib_constexpr_algorithms", "Constexpr for algorithms", "201806L", 20),
    feat("__cpp_lib_constexpr_complex", "Constexpr for std::complex", "201711L", 20),
    feat("__cpp_lib_constexpr_dynamic_alloc", "Constexpr for std::allocator and related utilities", "201907L", 20),
    feat("__cpp_lib_constexpr_string", "constexpr std::string", "201907L", 20),
    feat("__cpp_lib_constexpr_vector", "Constexpr for std::vector", "201907L", 20),
    feat("__cpp_lib_coroutine", "Coroutines (library support)", "201902L", 20),
    feat("__cpp_lib_endian", "std::endian", "201907L", 20),
    feat("__cpp_lib_format", "Text formatting", "201907L", 20),
    feat("__cpp_lib_jthread", "Stop token and joining thread", "201911L", 20),
    feat("__cpp_lib_latch", "std::latch", "201907L", 20),
    feat("__cpp_lib_math_constants", "Mathematical constants", "201907L", 20),
    feat("__cpp_lib_ranges", "Ranges library and constrained algorithms", "201911L", 20),
    feat("__cpp_lib_semaphore", "std::counting_semaphore, std::binary_semaphore", "201907L", 20),
    feat("__cpp_lib_source_location", "Source-code information capture", "201907L", 20),
    feat("__cpp_lib_span", "std::span", "202002L", 20),
    feat("__cpp_lib_three_way_comparison", "Three-way comparison (library support)", "201907L", 20),
    feat("__cpp_lib_to_array", "std::to_array", "201907L", 20),
    // C++23
    feat("__cpp_lib_adaptor_iterator_pair_constructor", "Iterator pair constructors for std::stack and std::queue", "202106L", 23),
    feat("__cpp_lib_associative_heterogeneous_erasure", "Heterogeneous erasure in associative containers", "202110L", 23),
    feat("__cpp_lib_bind_back", "std::bind_back", "202202L", 23),
    feat("__cpp_lib_byteswap", "std::byteswap", "202110L", 23),
    feat("__cpp_lib_constexpr_bitset", "A more constexpr std::bitset", "202207L", 23),
    feat("__cpp_lib_constexpr_charconv", "Constexpr for std::to_chars and std::from_chars", "202207L", 23),
    feat("__cpp_lib_constexpr_cmath", "Constexpr for mathematical functions in <cmath>", "202202L", 23),
    feat("__cpp_lib_expected", "class template std::expected", "202202L", 23),
    feat("__cpp_lib_flat_map", "std::flat_map and std::flat_multimap", "202207L", 23),
    feat("__cpp_lib_flat_set", "std::flat_set and std::flat_multiset", "202207L", 23),
    feat("__cpp_lib_generator", "std::generator: Synchronous coroutine generator for ranges", "202207L", 23),
    feat("__cpp_lib_mdspan", "std::mdspan", "202207L", 23),
    feat("__cpp_lib_move_only_function", "std::move_only_function", "202110L", 23),
    feat("__cpp_lib_print", "Formatted output", "202207L", 23),
    feat("__cpp_lib_ranges_to_container", "std::ranges::to", "202202L", 23),
    feat("__cpp_lib_spanstream", "std::spanbuf, std::spanstream", "202106L", 23),
    feat("__cpp_lib_stacktrace", "Stacktrace library", "202011L", 23),
    feat("__cpp_lib_stdatomic_h", "Compatibility header for C atomic operations", "202011L", 23),
    feat("__cpp_lib_string_contains", "contains() for std::basic_string and std::basic_string_view", "202011L", 23),
    feat("__cpp_lib_string_resize_and_overwrite", "std::basic_string::resize_and_overwrite", "202110L", 23),
    feat("__cpp_lib_unreachable", "std::unreachable", "202202L", 23),
    // C++26
    feat("__cpp_lib_algorithm_default_value_type", "Enabling list-initialization for algorithms", "202403L", 26),
    feat("__cpp_lib_associative_heterogeneous_insertion", "Heterogeneous overloads for associative containers", "202306L", 26),
    feat("__cpp_lib_atomic_min_max", "Atomic minimum/maximum", "202403L", 26),
    feat("__cpp_lib_constexpr_atomic", "constexpr std::atomic and std::atomic_ref", "202411L", 26),
    feat("__cpp_lib_constexpr_deque", "constexpr std::deque", "202502L", 26),
    feat("__cpp_lib_contracts", "<contracts>: Contracts support", "202502L", 26),
    feat("__cpp_lib_copyable_function", "std::copyable_function", "202306L", 26),
    feat("__cpp_lib_debugging", "<debugging>: Debugging support", "202311L", 26),
    feat("__cpp_lib_format_path", "Formatting of std::filesystem::path", "202403L", 26),
    feat("__cpp_lib_function_ref", "std::function_ref: A type-erased callable reference", "202306L", 26),
    feat("__cpp_lib_hazard_pointer", "<hazard_pointer>: Hazard pointers", "202306L", 26),
    feat("__cpp_lib_hive", "<hive>: a bucket-based container", "202502L", 26),
    feat("__cpp_lib_inplace_vector", "std::inplace_vector", "202406L", 26),
    feat("__cpp_lib_linalg", "A free function linear algebra interface based on the BLAS", "202311L", 26),
    feat("__cpp_lib_polymorphic", "std::polymorphic", "202502L", 26),
    feat("__cpp_lib_rcu", "<rcu>: Read-Copy Update (RCU)", "202306L", 26),
    feat("__cpp_lib_saturation_arithmetic", "Saturation arithmetic", "202311L", 26),
    feat("__cpp_lib_senders", "std::execution: Sender-receiver model", "202406L", 26),
    feat("__cpp_lib_simd", "<simd>: Data-parallel types", "202411L", 26),
    feat("__cpp_lib_text_encoding", "std::text_encoding", "202306L", 26),
];

/// `__cpp_lib_flat_map` -> `FLAT_MAP`, `__cpp_constexpr` -> `CONSTEXPR`.
fn macro_base(name: &str) -> String {
    let stripped = name
        .strip_prefix("__cpp_lib_")
        .or_else(|| name.strip_prefix("__cpp_"))
        .unwrap_or(name);
    stripped.to_uppercase()
}

fn by_version(features: &'static [Feature]) -> BTreeMap<u32, Vec<&'static Feature>> {
    let mut grouped: BTreeMap<u32, Vec<&Feature>> = BTreeMap::new();
    for f in features {
        grouped.entry(f.version).or_default().push(f);
    }
    for group in grouped.values_mut() {
        group.sort_by_key(|f| f.name);
    }
    grouped
}

/// The five macros for one feature. `prefix` is `LANG` or `STL`.
fn feature_macros(f: &Feature, prefix: &str) -> Vec<String> {
    let base = macro_base(f.name);
    let full = format!("D_ENV_CPP_FEATURE_{prefix}_{base}");
    vec![
        format!("// {full}"),
        "//   constant: feature enabled flag (1 = enabled, 0 = disabled)".to_string(),
        format!("#ifdef {}", f.name),
        format!("    #define {full}  1"),
        "#else".to_string(),
        format!("    #define {full}  0"),
        "#endif".to_string(),
        String::new(),
        format!("// {full}_NAME"),
        "//   constant: feature macro name".to_string(),
        format!("#define {full}_NAME  \"{}\"", f.name),
        String::new(),
        format!("// {full}_DESC"),
        "//   constant: feature description".to_string(),
        format!("#define {full}_DESC  \"{}\"", f.desc),
        String::new(),
        format!("// {full}_VAL"),
        "//   constant: feature test value".to_string(),
        format!("#ifdef {}", f.name),
        format!("    #define {full}_VAL  {}", f.name),
        "#else".to_string(),
        format!("    #define {full}_VAL  0L"),
        "#endif".to_string(),
        String::new(),
        format!("// {full}_VERS"),
        "//   constant: C++ standard version".to_string(),
        format!("#define {full}_VERS  \"(C++{})\"", f.version),
        String::new(),
        String::new(),
    ]
}

fn version_section(lines: &mut Vec<String>, version: u32, kind: &str) {
    lines.push(
        "// -----------------------------------------------------------------------------"
            .to_string(),
    );
    lines.push(format!("// C++{version} {kind} Features"));
    lines.push(
        "// -----------------------------------------------------------------------------"
            .to_string(),
    );
    lines.push(String::new());
}

/// A `HAS_ALL_*` macro: a backslash-continued conjunction of the given
/// macro names.
fn aggregate_macro(lines: &mut Vec<String>, name: &str, comment: &str, terms: &[String]) {
    lines.push(format!("// {name}"));
    lines.push(format!("//   constant: {comment}"));
    lines.push(format!("#define {name}  \\"));
    lines.push(format!("    ( {} )", terms.join(" && \\\n      ")));
    lines.push(String::new());
}

/// Render the complete `cpp_features.h` header.
pub fn render_features_header() -> String {
    let lang = by_version(LANG_FEATURES);
    let lib = by_version(LIB_FEATURES);

    let mut lines: Vec<String> = vec![
        "/******************************************************************************".to_string(),
        "* cpp_features.h".to_string(),
        "*".to_string(),
        "* Compile-time detection of C++ language and standard library features:".to_string(),
        "*   - Language features (C++11 through C++26)".to_string(),
        "*   - Standard library features (C++14 through C++26)".to_string(),
        "*   - Feature grouping by C++ version".to_string(),
        "*   - Aggregate feature availability checks".to_string(),
        "*".to_string(),
        "* NAMING CONVENTIONS:".to_string(),
        "*   D_ENV_CPP_FEATURE_LANG_*        - Language features (__cpp_*)".to_string(),
        "*   D_ENV_CPP_FEATURE_STL_*         - Library features (__cpp_lib_*)".to_string(),
        "*   D_ENV_CPP_FEATURE_HAS_ALL_*     - Aggregate availability checks".to_string(),
        "*".to_string(),
        "*   Each feature has five associated macros:".to_string(),
        "*     - [NAME]       : 1 if enabled, 0 if not".to_string(),
        "*     - [NAME]_NAME  : the feature test macro name (as string)".to_string(),
        "*     - [NAME]_DESC  : human-readable description".to_string(),
        "*     - [NAME]_VAL   : the macro value (or 0L if not defined)".to_string(),
        "*     - [NAME]_VERS  : C++ version string".to_string(),
        "******************************************************************************/".to_string(),
        String::new(),
        "#ifndef CPP_FEATURES_H_".to_string(),
        "#define CPP_FEATURES_H_".to_string(),
        String::new(),
        String::new(),
    ];

    lines.push(
        "// =============================================================================".to_string(),
    );
    lines.push("// I.   LANGUAGE FEATURES".to_string());
    lines.push(
        "// =============================================================================".to_string(),
    );
    lines.push(String::new());
    for (&version, features) in &lang {
        version_section(&mut lines, version, "Language");
        for f in features {
            lines.extend(feature_macros(f, "LANG"));
        }
    }

    lines.push(
        "// =============================================================================".to_string(),
    );
    lines.push("// II.  STANDARD LIBRARY FEATURES".to_string());
    lines.push(
        "// =============================================================================".to_string(),
    );
    lines.push(String::new());
    for (&version, features) in &lib {
        version_section(&mut lines, version, "Library");
        for f in features {
            lines.extend(feature_macros(f, "STL"));
        }
    }

    lines.push(
        "// =============================================================================".to_string(),
    );
    lines.push("// III. AGGREGATE FEATURE CHECKS".to_string());
    lines.push(
        "// =============================================================================".to_string(),
    );
    lines.push(String::new());

    let mut versions: Vec<u32> = lang.keys().chain(lib.keys()).copied().collect();
    versions.sort_unstable();
    versions.dedup();

    for version in versions {
        if let Some(features) = lang.get(&version) {
            let terms: Vec<String> = features
                .iter()
                .map(|f| format!("D_ENV_CPP_FEATURE_LANG_{}", macro_base(f.name)))
                .collect();
            aggregate_macro(
                &mut lines,
                &format!("D_ENV_CPP_FEATURE_HAS_ALL_LANG_CPP{version}"),
                &format!("1 if all C++{version} language features available"),
                &terms,
            );
        }
        if let Some(features) = lib.get(&version) {
            let terms: Vec<String> = features
                .iter()
                .map(|f| format!("D_ENV_CPP_FEATURE_STL_{}", macro_base(f.name)))
                .collect();
            aggregate_macro(
                &mut lines,
                &format!("D_ENV_CPP_FEATURE_HAS_ALL_STL_CPP{version}"),
                &format!("1 if all C++{version} library features available"),
                &terms,
            );
        }

        let mut terms = Vec::new();
        if lang.contains_key(&version) {
            terms.push(format!("D_ENV_CPP_FEATURE_HAS_ALL_LANG_CPP{version}"));
        }
        if lib.contains_key(&version) {
            terms.push(format!("D_ENV_CPP_FEATURE_HAS_ALL_STL_CPP{version}"));
        }
        if !terms.is_empty() {
            aggregate_macro(
                &mut lines,
                &format!("D_ENV_CPP_FEATURE_HAS_ALL_CPP{version}"),
                &format!("1 if all C++{version} features available"),
                &terms,
            );
            lines.push(String::new());
        }
    }

    lines.push("#endif  // CPP_FEATURES_H_".to_string());
    lines.push(String::new());

    lines.join("\n")
}
