//! JNI header rendering
//!
//! Produces the same layout `javac -h` writes. Output is a pure function of the
//! declaration set: methods are ordered by native symbol, not discovery order.

use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::path::PathBuf;

use crate::domain::entities::{DeclarationSet, EntryPointDeclaration, GeneratedHeader};

use super::mangler::{class_stub_name, header_file_name};

/// Render one header per owning class, sorted by class name.
///
/// Target paths are bare file names; the header generator places them.
pub fn render_headers(declarations: &DeclarationSet) -> Vec<GeneratedHeader> {
    declarations
        .by_class()
        .into_iter()
        .map(|(class, decls)| {
            let content = render_header(class, &decls, declarations.throwables());
            GeneratedHeader::new(
                PathBuf::from(header_file_name(class)),
                class,
                decls.into_iter().cloned().collect(),
                content,
            )
        })
        .collect()
}

/// Render the header text for one class
pub fn render_header(
    owning_class: &str,
    declarations: &[&EntryPointDeclaration],
    throwables: &BTreeSet<String>,
) -> String {
    let stub = class_stub_name(owning_class);
    let mut out = String::new();

    out.push_str("/* DO NOT EDIT THIS FILE - it is machine generated */\n");
    out.push_str("#include <jni.h>\n");
    let _ = writeln!(out, "/* Header for class {} */", stub);
    out.push('\n');
    let _ = writeln!(out, "#ifndef _Included_{}", stub);
    let _ = writeln!(out, "#define _Included_{}", stub);
    out.push_str("#ifdef __cplusplus\n");
    out.push_str("extern \"C\" {\n");
    out.push_str("#endif\n");

    let mut ordered: Vec<&EntryPointDeclaration> = declarations.to_vec();
    ordered.sort_by(|a, b| a.native_symbol().cmp(b.native_symbol()));

    for decl in ordered {
        render_method(&mut out, &stub, decl, throwables);
    }

    out.push_str("#ifdef __cplusplus\n");
    out.push_str("}\n");
    out.push_str("#endif\n");
    out.push_str("#endif\n");
    out
}

fn render_method(
    out: &mut String,
    stub: &str,
    decl: &EntryPointDeclaration,
    throwables: &BTreeSet<String>,
) {
    out.push_str("/*\n");
    let _ = writeln!(out, " * Class:     {}", stub);
    let _ = writeln!(out, " * Method:    {}", decl.method_name());
    let _ = writeln!(out, " * Signature: {}", decl.descriptor());
    out.push_str(" */\n");
    let _ = writeln!(
        out,
        "JNIEXPORT {} JNICALL {}",
        decl.return_type().jni_type_in(throwables),
        decl.native_symbol()
    );

    let receiver = if decl.is_static() { "jclass" } else { "jobject" };
    let mut params = vec!["JNIEnv *", receiver];
    params.extend(decl.parameter_types().iter().map(|t| t.jni_type_in(throwables)));
    let _ = writeln!(out, "  ({});", params.join(", "));
    out.push('\n');
}
