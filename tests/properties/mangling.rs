//! Mangling properties: total, C-safe and reversible for simple names.

use bridgewright::domain::services::{header_file_name, jni_symbol, mangle, MangleMode};
use proptest::prelude::*;

fn is_c_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        ..ProptestConfig::default()
    })]

    #[test]
    fn mangle_never_panics(name in any::<String>()) {
        let _ = mangle(&name, MangleMode::Jni);
        let _ = mangle(&name, MangleMode::Class);
    }

    #[test]
    fn jni_output_is_ascii_word_chars(name in any::<String>()) {
        let mangled = mangle(&name, MangleMode::Jni);
        prop_assert!(mangled.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
    }

    #[test]
    fn symbols_are_c_identifiers(
        package in "[a-z][a-z0-9]{0,6}(\\.[a-z][a-z0-9]{0,6}){0,3}",
        class in "[A-Z][A-Za-z0-9_$]{0,10}",
        method in "[a-zA-Z_$\u{e0}-\u{ff}][a-zA-Z0-9_$\u{e0}-\u{ff}]{0,10}",
    ) {
        let owner = format!("{}.{}", package, class);
        let symbol = jni_symbol(&owner, &method, None);
        prop_assert!(symbol.starts_with("Java_"));
        prop_assert!(is_c_identifier(&symbol), "not a C identifier: {}", symbol);
        prop_assert!(header_file_name(&owner).ends_with(".h"));
    }

    #[test]
    fn jni_mangling_is_injective_on_simple_names(
        a in "[a-zA-Z_$0-9\u{100}-\u{17f}]{1,8}",
        b in "[a-zA-Z_$0-9\u{100}-\u{17f}]{1,8}",
    ) {
        prop_assume!(a != b);
        prop_assert_ne!(mangle(&a, MangleMode::Jni), mangle(&b, MangleMode::Jni));
    }

    #[test]
    fn overload_suffix_keeps_symbols_distinct(
        first in "(I|J|Z|\\[B|Ljava/lang/String;){0,4}",
        second in "(I|J|Z|\\[B|Ljava/lang/String;){0,4}",
    ) {
        prop_assume!(first != second);
        prop_assert_ne!(
            jni_symbol("net.swofty.Bridge", "call", Some(&first)),
            jni_symbol("net.swofty.Bridge", "call", Some(&second))
        );
    }
}
