//! Header rendering properties: output depends on the declaration set only.

use bridgewright::domain::entities::{DeclarationSet, EntryPointDeclaration, NativeMethod};
use bridgewright::domain::services::{assign_symbols, render_headers};
use bridgewright::domain::value_objects::{JavaType, PrimitiveType};
use proptest::prelude::*;

fn java_type() -> impl Strategy<Value = JavaType> {
    prop_oneof![
        prop::sample::select(PrimitiveType::ALL.to_vec()).prop_map(JavaType::Primitive),
        Just(JavaType::string()),
        Just(JavaType::object("java.util.List")),
        prop::sample::select(PrimitiveType::ALL.to_vec())
            .prop_map(|p| JavaType::array_of(JavaType::Primitive(p))),
    ]
}

fn native_method() -> impl Strategy<Value = NativeMethod> {
    (
        prop::sample::select(vec!["net.swofty.A", "net.swofty.B", "net.swofty.A$Inner"]),
        "[a-z][a-zA-Z_]{0,6}",
        prop::collection::vec(java_type(), 0..4),
        prop_oneof![Just(JavaType::Void), java_type()],
        any::<bool>(),
    )
        .prop_map(|(class, name, params, ret, is_static)| NativeMethod {
            owning_class: class.to_string(),
            name,
            parameter_types: params,
            return_type: ret,
            is_static,
            line: 1,
        })
}

/// Methods with unique (class, name, params) so the set never conflicts
fn unique_methods() -> impl Strategy<Value = Vec<NativeMethod>> {
    prop::collection::vec(native_method(), 1..12).prop_map(|methods| {
        let mut seen = std::collections::HashSet::new();
        methods
            .into_iter()
            .filter(|m| seen.insert((m.owning_class.clone(), m.name.clone())))
            .collect()
    })
}

fn set_from(methods: Vec<NativeMethod>) -> DeclarationSet {
    DeclarationSet::from_declarations(
        assign_symbols(methods)
            .into_iter()
            .map(|(m, symbol)| EntryPointDeclaration::new(m, symbol, "Gen.java")),
    )
    .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        ..ProptestConfig::default()
    })]

    #[test]
    fn rendering_ignores_discovery_order(methods in unique_methods()) {
        let forward = render_headers(&set_from(methods.clone()));
        let mut reversed = methods;
        reversed.reverse();
        let backward = render_headers(&set_from(reversed));

        prop_assert_eq!(forward.len(), backward.len());
        for (a, b) in forward.iter().zip(backward.iter()) {
            prop_assert_eq!(a.target_path(), b.target_path());
            prop_assert_eq!(a.content(), b.content());
            prop_assert_eq!(a.content_hash(), b.content_hash());
        }
    }

    #[test]
    fn every_declaration_appears_once(methods in unique_methods()) {
        let set = set_from(methods);
        let headers = render_headers(&set);
        for decl in set.iter() {
            let line = format!("JNICALL {}\n", decl.native_symbol());
            let count: usize = headers
                .iter()
                .map(|h| h.content().matches(line.as_str()).count())
                .sum();
            prop_assert_eq!(count, 1, "{} rendered {} times", decl.native_symbol(), count);
        }
    }

    #[test]
    fn one_header_per_owning_class(methods in unique_methods()) {
        let classes: std::collections::BTreeSet<String> =
            methods.iter().map(|m| m.owning_class.clone()).collect();
        let headers = render_headers(&set_from(methods));
        prop_assert_eq!(headers.len(), classes.len());
    }
}
