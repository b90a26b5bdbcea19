//! Java type value object
//!
//! Erased Java types as they appear in native method signatures, with the two
//! projections the header generator needs: the JVM descriptor and the JNI C type.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Serialize, Serializer};

/// Java primitive types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrimitiveType {
    Boolean,
    Byte,
    Char,
    Short,
    Int,
    Long,
    Float,
    Double,
}

impl PrimitiveType {
    pub const ALL: [PrimitiveType; 8] = [
        PrimitiveType::Boolean,
        PrimitiveType::Byte,
        PrimitiveType::Char,
        PrimitiveType::Short,
        PrimitiveType::Int,
        PrimitiveType::Long,
        PrimitiveType::Float,
        PrimitiveType::Double,
    ];

    /// Parse a Java keyword (`int`, `boolean`, ...)
    pub fn from_keyword(word: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.keyword() == word)
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "boolean",
            PrimitiveType::Byte => "byte",
            PrimitiveType::Char => "char",
            PrimitiveType::Short => "short",
            PrimitiveType::Int => "int",
            PrimitiveType::Long => "long",
            PrimitiveType::Float => "float",
            PrimitiveType::Double => "double",
        }
    }

    pub fn descriptor(&self) -> char {
        match self {
            PrimitiveType::Boolean => 'Z',
            PrimitiveType::Byte => 'B',
            PrimitiveType::Char => 'C',
            PrimitiveType::Short => 'S',
            PrimitiveType::Int => 'I',
            PrimitiveType::Long => 'J',
            PrimitiveType::Float => 'F',
            PrimitiveType::Double => 'D',
        }
    }

    /// JNI scalar type (`jint`)
    pub fn jni_type(&self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "jboolean",
            PrimitiveType::Byte => "jbyte",
            PrimitiveType::Char => "jchar",
            PrimitiveType::Short => "jshort",
            PrimitiveType::Int => "jint",
            PrimitiveType::Long => "jlong",
            PrimitiveType::Float => "jfloat",
            PrimitiveType::Double => "jdouble",
        }
    }

    /// JNI array type for a one-dimensional array of this primitive (`jintArray`)
    pub fn jni_array_type(&self) -> &'static str {
        match self {
            PrimitiveType::Boolean => "jbooleanArray",
            PrimitiveType::Byte => "jbyteArray",
            PrimitiveType::Char => "jcharArray",
            PrimitiveType::Short => "jshortArray",
            PrimitiveType::Int => "jintArray",
            PrimitiveType::Long => "jlongArray",
            PrimitiveType::Float => "jfloatArray",
            PrimitiveType::Double => "jdoubleArray",
        }
    }
}

/// Library throwables that JNI passes as `jthrowable`
const THROWABLES: &[&str] = &[
    "java.lang.Throwable",
    "java.lang.Exception",
    "java.lang.Error",
    "java.lang.RuntimeException",
    "java.lang.IllegalArgumentException",
    "java.lang.IllegalStateException",
    "java.lang.NullPointerException",
    "java.lang.UnsupportedOperationException",
    "java.lang.IndexOutOfBoundsException",
    "java.lang.ArithmeticException",
    "java.lang.ClassCastException",
    "java.lang.NumberFormatException",
    "java.lang.SecurityException",
    "java.lang.InterruptedException",
    "java.lang.ReflectiveOperationException",
    "java.lang.ClassNotFoundException",
    "java.lang.CloneNotSupportedException",
    "java.lang.AssertionError",
    "java.lang.LinkageError",
    "java.lang.UnsatisfiedLinkError",
    "java.lang.OutOfMemoryError",
    "java.lang.StackOverflowError",
    "java.io.IOException",
    "java.io.UncheckedIOException",
    "java.io.FileNotFoundException",
    "java.util.NoSuchElementException",
    "java.util.ConcurrentModificationException",
];

/// Classes whose superclass chain reaches a library throwable.
///
/// `superclasses` maps binary names to the binary name of their direct
/// superclass, as declared by the scanned sources. Cycles end the walk.
pub fn throwable_classes(superclasses: &BTreeMap<String, String>) -> BTreeSet<String> {
    superclasses
        .keys()
        .filter(|class| {
            let mut seen = BTreeSet::new();
            let mut current = class.as_str();
            while seen.insert(current) {
                match superclasses.get(current) {
                    Some(parent) if THROWABLES.contains(&parent.as_str()) => return true,
                    Some(parent) => current = parent.as_str(),
                    None => return false,
                }
            }
            false
        })
        .cloned()
        .collect()
}

/// An erased Java type
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum JavaType {
    /// `void`, only valid as a return type
    Void,
    Primitive(PrimitiveType),
    /// Reference type by binary name (`java.lang.String`, `pkg.Outer$Inner`)
    Object(String),
    Array(Box<JavaType>),
}

impl JavaType {
    pub fn object(binary_name: impl Into<String>) -> Self {
        JavaType::Object(binary_name.into())
    }

    pub fn string() -> Self {
        JavaType::object("java.lang.String")
    }

    pub fn array_of(component: JavaType) -> Self {
        JavaType::Array(Box::new(component))
    }

    /// Wrap in `dims` array levels
    pub fn with_dimensions(self, dims: usize) -> Self {
        (0..dims).fold(self, |ty, _| JavaType::array_of(ty))
    }

    /// JVM field descriptor (`I`, `Ljava/lang/String;`, `[[D`)
    pub fn descriptor(&self) -> String {
        match self {
            JavaType::Void => "V".to_string(),
            JavaType::Primitive(p) => p.descriptor().to_string(),
            JavaType::Object(name) => format!("L{};", name.replace('.', "/")),
            JavaType::Array(component) => format!("[{}", component.descriptor()),
        }
    }

    /// C type used in the JNI prototype, knowing only library throwables
    pub fn jni_type(&self) -> &'static str {
        self.jni_type_in(&BTreeSet::new())
    }

    /// C type used in the JNI prototype; `throwables` names project classes
    /// that extend a throwable (see [`throwable_classes`])
    pub fn jni_type_in(&self, throwables: &BTreeSet<String>) -> &'static str {
        match self {
            JavaType::Void => "void",
            JavaType::Primitive(p) => p.jni_type(),
            JavaType::Object(name) => match name.as_str() {
                "java.lang.String" => "jstring",
                "java.lang.Class" => "jclass",
                n if THROWABLES.contains(&n) || throwables.contains(n) => "jthrowable",
                _ => "jobject",
            },
            JavaType::Array(component) => match component.as_ref() {
                JavaType::Primitive(p) => p.jni_array_type(),
                _ => "jobjectArray",
            },
        }
    }

    pub fn is_void(&self) -> bool {
        matches!(self, JavaType::Void)
    }
}

impl fmt::Display for JavaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JavaType::Void => f.write_str("void"),
            JavaType::Primitive(p) => f.write_str(p.keyword()),
            JavaType::Object(name) => f.write_str(name),
            JavaType::Array(component) => write!(f, "{}[]", component),
        }
    }
}

impl Serialize for JavaType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Method descriptor `(<params>)<return>`
pub fn method_descriptor(params: &[JavaType], ret: &JavaType) -> String {
    let args: String = params.iter().map(JavaType::descriptor).collect();
    format!("({}){}", args, ret.descriptor())
}
