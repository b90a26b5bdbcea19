//! JNI name mangling
//!
//! The native linker resolves `Java_*` symbols by exact string match, so these
//! rules must reproduce the JDK's encoder character for character.

use std::collections::HashMap;

use crate::domain::entities::NativeMethod;

/// Which encoder table to apply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MangleMode {
    /// Exported function symbols
    Jni,
    /// Header file names, include guards and the `Class:` comment
    Class,
}

/// Mangle `name` with the given encoder
pub fn mangle(name: &str, mode: MangleMode) -> String {
    let mut out = String::with_capacity(name.len() + 8);
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch);
            continue;
        }
        match (mode, ch) {
            (MangleMode::Jni, '.' | '/') => out.push('_'),
            (MangleMode::Jni, '_') => out.push_str("_1"),
            (MangleMode::Jni, ';') => out.push_str("_2"),
            (MangleMode::Jni, '[') => out.push_str("_3"),
            (MangleMode::Class, '.' | '_') => out.push('_'),
            (MangleMode::Class, '$') => out.push_str("__"),
            _ => encode_char(ch, &mut out),
        }
    }
    out
}

fn encode_char(ch: char, out: &mut String) {
    let mut units = [0u16; 2];
    for unit in ch.encode_utf16(&mut units) {
        out.push_str(&format!("_{:05x}", unit));
    }
}

/// Exported symbol for a native method
///
/// `overloaded` adds the `__<args>` suffix used when several native methods
/// of one class share a name.
pub fn jni_symbol(owning_class: &str, method: &str, arg_descriptor: Option<&str>) -> String {
    let mut symbol = format!(
        "Java_{}_{}",
        mangle(owning_class, MangleMode::Jni),
        mangle(method, MangleMode::Jni)
    );
    if let Some(args) = arg_descriptor {
        symbol.push_str("__");
        symbol.push_str(&mangle(args, MangleMode::Jni));
    }
    symbol
}

/// Class name as used for header files and guards (`net_swofty_Bridge`)
pub fn class_stub_name(owning_class: &str) -> String {
    mangle(owning_class, MangleMode::Class)
}

/// Header file name for a class
pub fn header_file_name(owning_class: &str) -> String {
    format!("{}.h", class_stub_name(owning_class))
}

/// Assign JNI symbols to the native methods of one source file.
///
/// Overload detection only considers native methods of the same class.
pub fn assign_symbols(methods: Vec<NativeMethod>) -> Vec<(NativeMethod, String)> {
    let mut counts: HashMap<(&str, &str), usize> = HashMap::new();
    for m in &methods {
        *counts
            .entry((m.owning_class.as_str(), m.name.as_str()))
            .or_default() += 1;
    }
    let overloaded: Vec<bool> = methods
        .iter()
        .map(|m| counts[&(m.owning_class.as_str(), m.name.as_str())] > 1)
        .collect();

    methods
        .into_iter()
        .zip(overloaded)
        .map(|(m, is_overloaded)| {
            let args = is_overloaded.then(|| argument_descriptor(&m));
            let symbol = jni_symbol(&m.owning_class, &m.name, args.as_deref());
            (m, symbol)
        })
        .collect()
}

fn argument_descriptor(method: &NativeMethod) -> String {
    method
        .parameter_types
        .iter()
        .map(|t| t.descriptor())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{JavaType, PrimitiveType};

    #[test]
    fn plain_symbol() {
        assert_eq!(
            jni_symbol("net.swofty.nativebridge.NativeBridge", "printFromNative", None),
            "Java_net_swofty_nativebridge_NativeBridge_printFromNative"
        );
    }

    #[test]
    fn underscores_and_nested_classes_are_escaped() {
        assert_eq!(
            jni_symbol("pkg.My_Class$Inner", "do_it", None),
            "Java_pkg_My_1Class_00024Inner_do_1it"
        );
    }

    #[test]
    fn overloaded_symbol_carries_argument_descriptor() {
        assert_eq!(
            jni_symbol("Bridge", "send", Some("Ljava/lang/String;[I")),
            "Java_Bridge_send__Ljava_lang_String_2_3I"
        );
    }

    #[test]
    fn non_ascii_uses_utf16_escapes() {
        assert_eq!(mangle("caf\u{e9}", MangleMode::Jni), "caf_000e9");
        // U+1F600 is a surrogate pair in UTF-16
        assert_eq!(mangle("\u{1F600}", MangleMode::Jni), "_0d83d_0de00");
    }

    #[test]
    fn class_mode_matches_header_naming() {
        assert_eq!(
            header_file_name("net.swofty.nativebridge.NativeParser"),
            "net_swofty_nativebridge_NativeParser.h"
        );
        assert_eq!(class_stub_name("pkg.Outer$Inner"), "pkg_Outer__Inner");
        assert_eq!(class_stub_name("pkg.snake_case"), "pkg_snake_case");
    }

    fn method(name: &str, params: Vec<JavaType>) -> NativeMethod {
        NativeMethod {
            owning_class: "Bridge".to_string(),
            name: name.to_string(),
            parameter_types: params,
            return_type: JavaType::Void,
            is_static: true,
            line: 1,
        }
    }

    #[test]
    fn assign_symbols_only_decorates_overloads() {
        let assigned = assign_symbols(vec![
            method("send", vec![JavaType::string()]),
            method("send", vec![JavaType::Primitive(PrimitiveType::Int)]),
            method("close", vec![]),
        ]);
        let symbols: Vec<&str> = assigned.iter().map(|(_, s)| s.as_str()).collect();
        assert_eq!(
            symbols,
            vec![
                "Java_Bridge_send__Ljava_lang_String_2",
                "Java_Bridge_send__I",
                "Java_Bridge_close",
            ]
        );
    }

    #[test]
    fn zero_arg_overload_gets_empty_suffix() {
        let assigned = assign_symbols(vec![
            method("reset", vec![]),
            method("reset", vec![JavaType::Primitive(PrimitiveType::Boolean)]),
        ]);
        assert_eq!(assigned[0].1, "Java_Bridge_reset__");
        assert_eq!(assigned[1].1, "Java_Bridge_reset__Z");
    }
}
