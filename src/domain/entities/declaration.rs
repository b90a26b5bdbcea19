//! Entry point declaration entity
//!
//! One `native` method found by the scanner. Identity is
//! `(owning_class, native_symbol)`.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::value_objects::{method_descriptor, JavaType};

/// A native-bound entry point declared in managed source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryPointDeclaration {
    qualified_name: String,
    native_symbol: String,
    parameter_types: Vec<JavaType>,
    return_type: JavaType,
    owning_class: String,
    is_static: bool,
    source: PathBuf,
    line: usize,
}

/// Raw method shape before a symbol has been assigned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeMethod {
    pub owning_class: String,
    pub name: String,
    pub parameter_types: Vec<JavaType>,
    pub return_type: JavaType,
    pub is_static: bool,
    pub line: usize,
}

impl NativeMethod {
    pub fn descriptor(&self) -> String {
        method_descriptor(&self.parameter_types, &self.return_type)
    }
}

impl EntryPointDeclaration {
    pub fn new(method: NativeMethod, native_symbol: String, source: impl Into<PathBuf>) -> Self {
        Self {
            qualified_name: format!("{}.{}", method.owning_class, method.name),
            native_symbol,
            parameter_types: method.parameter_types,
            return_type: method.return_type,
            owning_class: method.owning_class,
            is_static: method.is_static,
            source: source.into(),
            line: method.line,
        }
    }

    /// `owning_class.methodName`
    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    /// Simple method name (last segment of the qualified name)
    pub fn method_name(&self) -> &str {
        self.qualified_name
            .rsplit_once('.')
            .map(|(_, name)| name)
            .unwrap_or(&self.qualified_name)
    }

    /// Exported JNI symbol (`Java_pkg_Class_method`)
    pub fn native_symbol(&self) -> &str {
        &self.native_symbol
    }

    pub fn parameter_types(&self) -> &[JavaType] {
        &self.parameter_types
    }

    pub fn return_type(&self) -> &JavaType {
        &self.return_type
    }

    /// Binary name of the declaring class
    pub fn owning_class(&self) -> &str {
        &self.owning_class
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn line(&self) -> usize {
        self.line
    }

    /// JVM method descriptor, e.g. `(II)I`
    pub fn descriptor(&self) -> String {
        method_descriptor(&self.parameter_types, &self.return_type)
    }

    /// Identity key
    pub fn identity(&self) -> (&str, &str) {
        (&self.owning_class, &self.native_symbol)
    }

    /// True when both declarations describe the same calling signature
    pub fn same_signature(&self, other: &Self) -> bool {
        self.parameter_types == other.parameter_types
            && self.return_type == other.return_type
            && self.is_static == other.is_static
    }

    /// Human-readable signature for diagnostics (`static int computeScore(int, int)`)
    pub fn display_signature(&self) -> String {
        let params: Vec<String> = self.parameter_types.iter().map(|t| t.to_string()).collect();
        format!(
            "{}{} {}({})",
            if self.is_static { "static " } else { "" },
            self.return_type,
            self.method_name(),
            params.join(", ")
        )
    }
}
