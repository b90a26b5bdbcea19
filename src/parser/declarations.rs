//! Native declaration extraction
//!
//! Walks the token stream of one Java compilation unit, tracks the package,
//! imports and (nested) type declarations, and turns every member carrying the
//! `native` modifier into a `NativeMethod` with fully resolved parameter types.

use std::collections::{BTreeSet, HashMap};

use crate::domain::entities::NativeMethod;
use crate::domain::value_objects::{JavaType, PrimitiveType};

use super::lexer::{tokenize, Token, TokenKind};

/// `java.lang` types usable without an import
const JAVA_LANG: &[&str] = &[
    "Object",
    "String",
    "Class",
    "Integer",
    "Long",
    "Short",
    "Byte",
    "Character",
    "Boolean",
    "Float",
    "Double",
    "Number",
    "Void",
    "CharSequence",
    "StringBuilder",
    "Runnable",
    "Thread",
    "Iterable",
    "Enum",
    "Record",
    "Throwable",
    "Exception",
    "Error",
    "RuntimeException",
    "IllegalArgumentException",
    "IllegalStateException",
    "NullPointerException",
    "UnsupportedOperationException",
    "IndexOutOfBoundsException",
    "ArithmeticException",
    "ClassCastException",
    "NumberFormatException",
    "SecurityException",
    "InterruptedException",
    "ReflectiveOperationException",
    "ClassNotFoundException",
    "CloneNotSupportedException",
    "AssertionError",
    "LinkageError",
    "UnsatisfiedLinkError",
    "OutOfMemoryError",
    "StackOverflowError",
];

const MODIFIERS: &[&str] = &[
    "public",
    "protected",
    "private",
    "static",
    "final",
    "native",
    "synchronized",
    "abstract",
    "strictfp",
    "default",
    "transient",
    "volatile",
    "sealed",
];

/// Parse failure inside a native member
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub line: usize,
    pub message: String,
}

/// Declarations found in one compilation unit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedUnit {
    /// Declared package (empty for the default package)
    pub package: String,
    /// Binary names of every named type declared in the unit
    pub types: Vec<String>,
    pub methods: Vec<NativeMethod>,
    /// `(class, superclass)` binary names for classes with an `extends` clause
    pub supertypes: Vec<(String, String)>,
}

/// A type reference before resolution
#[derive(Debug, Clone, PartialEq, Eq)]
enum RawType {
    Void,
    Primitive(PrimitiveType),
    Named { segments: Vec<String>, dims: usize },
}

impl RawType {
    fn with_extra_dims(self, extra: usize) -> Self {
        match self {
            RawType::Primitive(p) if extra > 0 => RawType::Named {
                segments: vec![p.keyword().to_string()],
                dims: extra,
            },
            RawType::Named { segments, dims } => RawType::Named {
                segments,
                dims: dims + extra,
            },
            other => other,
        }
    }
}

#[derive(Debug, Clone)]
struct TypeScope {
    binary_name: String,
    depth: usize,
    type_vars: Vec<(String, Option<Vec<String>>)>,
}

#[derive(Debug, Clone)]
struct RawMethod {
    enclosing: Vec<String>,
    type_vars: Vec<(String, Option<Vec<String>>)>,
    name: String,
    params: Vec<RawType>,
    ret: RawType,
    is_static: bool,
    line: usize,
}

/// `extends` clause of a declared class
#[derive(Debug, Clone)]
struct RawSupertype {
    binary_name: String,
    enclosing: Vec<String>,
    type_vars: Vec<(String, Option<Vec<String>>)>,
    superclass: RawType,
}

/// A type declaration whose body has not been opened yet
#[derive(Debug)]
struct PendingType {
    name: String,
    type_vars: Vec<(String, Option<Vec<String>>)>,
    is_class: bool,
    header: Vec<Token>,
}

/// One compilation unit read but not yet resolved.
///
/// Simple names are resolved in [`UnitDeclarations::resolve`], once the types
/// declared by every other unit of the scan are known.
#[derive(Debug, Clone)]
pub struct UnitDeclarations {
    package: String,
    imports: HashMap<String, String>,
    types: Vec<String>,
    methods: Vec<RawMethod>,
    supertypes: Vec<RawSupertype>,
}

impl UnitDeclarations {
    /// Binary names of every named type declared in the unit
    pub fn types(&self) -> &[String] {
        &self.types
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    /// Resolve against the unit's own types first, then `project_types`
    /// (types declared by the other units of the same scan).
    pub fn resolve(self, project_types: &BTreeSet<String>) -> ParsedUnit {
        let local: BTreeSet<String> = self.types.iter().cloned().collect();
        let resolver = Resolver {
            package: &self.package,
            imports: &self.imports,
            local: &local,
            project: project_types,
        };

        let methods = self
            .methods
            .into_iter()
            .map(|raw| {
                let scope_vars: Vec<&(String, Option<Vec<String>>)> = raw.type_vars.iter().collect();
                let owning_class = raw.enclosing.last().cloned().unwrap_or_default();
                NativeMethod {
                    parameter_types: raw
                        .params
                        .iter()
                        .map(|p| resolver.resolve(p, &raw.enclosing, &scope_vars))
                        .collect(),
                    return_type: resolver.resolve(&raw.ret, &raw.enclosing, &scope_vars),
                    owning_class,
                    name: raw.name,
                    is_static: raw.is_static,
                    line: raw.line,
                }
            })
            .collect();

        let supertypes = self
            .supertypes
            .iter()
            .filter_map(|raw| {
                let scope_vars: Vec<&(String, Option<Vec<String>>)> = raw.type_vars.iter().collect();
                match resolver.resolve(&raw.superclass, &raw.enclosing, &scope_vars) {
                    JavaType::Object(name) => Some((raw.binary_name.clone(), name)),
                    _ => None,
                }
            })
            .collect();

        ParsedUnit {
            package: self.package,
            types: self.types,
            methods,
            supertypes,
        }
    }
}

/// Parse one Java source file on its own
pub fn parse_unit(source: &str) -> Result<ParsedUnit, ParseError> {
    Ok(read_unit(source)?.resolve(&BTreeSet::new()))
}

/// Read the declarations of one Java source file without resolving them
pub fn read_unit(source: &str) -> Result<UnitDeclarations, ParseError> {
    let tokens = tokenize(source);
    let mut package = String::new();
    let mut imports: HashMap<String, String> = HashMap::new();
    let mut types: Vec<String> = Vec::new();
    let mut methods: Vec<RawMethod> = Vec::new();
    let mut supertypes: Vec<RawSupertype> = Vec::new();

    let mut stack: Vec<TypeScope> = Vec::new();
    let mut depth = 0usize;
    let mut current: Vec<Token> = Vec::new();
    let mut pending: Option<PendingType> = None;

    let mut i = 0;
    while i < tokens.len() {
        let tok = &tokens[i];
        let at_member_level = stack.last().map(|s| s.depth == depth).unwrap_or(depth == 0);

        if at_member_level && pending.is_none() && starts_type_declaration(&tokens, i) {
            if let Some(name) = tokens.get(i + 1).and_then(Token::ident) {
                pending = Some(PendingType {
                    name: name.to_string(),
                    type_vars: parse_type_params(&tokens, i + 2),
                    is_class: tok.is_ident("class"),
                    header: Vec::new(),
                });
                current.clear();
                i += 2;
                continue;
            }
        }

        match tok.kind {
            // braces inside an open parenthesis (annotation arrays, lambdas) stay in the buffer
            TokenKind::Symbol('{') if pending.is_none() && paren_balance(&current) > 0 => {
                depth += 1;
                current.push(tok.clone());
            }
            TokenKind::Symbol('}') if paren_balance(&current) > 0 => {
                depth = depth.saturating_sub(1);
                current.push(tok.clone());
            }
            TokenKind::Symbol('{') => {
                depth += 1;
                if let Some(declared) = pending.take() {
                    let enclosing: Vec<String> = stack.iter().map(|s| s.binary_name.clone()).collect();
                    let binary_name = match stack.last() {
                        Some(outer) => format!("{}${}", outer.binary_name, declared.name),
                        None if package.is_empty() => declared.name,
                        None => format!("{}.{}", package, declared.name),
                    };
                    let mut type_vars = declared.type_vars.clone();
                    for scope in stack.iter().rev() {
                        type_vars.extend(scope.type_vars.iter().cloned());
                    }
                    let superclass = if declared.is_class {
                        superclass_of(&declared.header)
                    } else {
                        None
                    };
                    if let Some(superclass) = superclass {
                        supertypes.push(RawSupertype {
                            binary_name: binary_name.clone(),
                            enclosing,
                            type_vars,
                            superclass,
                        });
                    }
                    types.push(binary_name.clone());
                    stack.push(TypeScope {
                        binary_name,
                        depth,
                        type_vars: declared.type_vars,
                    });
                }
                current.clear();
            }
            TokenKind::Symbol('}') => {
                depth = depth.saturating_sub(1);
                while stack.last().map(|s| s.depth > depth).unwrap_or(false) {
                    stack.pop();
                }
                current.clear();
            }
            TokenKind::Symbol(';') => {
                if at_member_level && pending.is_none() {
                    match stack.last() {
                        None => read_header_statement(&current, &mut package, &mut imports),
                        Some(_) => {
                            if let Some(method) = read_native_member(&current, &stack)? {
                                methods.push(method);
                            }
                        }
                    }
                }
                current.clear();
            }
            _ => match pending.as_mut() {
                Some(declared) => declared.header.push(tok.clone()),
                None => current.push(tok.clone()),
            },
        }
        i += 1;
    }

    Ok(UnitDeclarations {
        package,
        imports,
        types,
        methods,
        supertypes,
    })
}

/// Superclass named by a class header (`<T> extends Base<T> implements I`)
fn superclass_of(header: &[Token]) -> Option<RawType> {
    let header = strip_annotations(header);
    let start = match header.first() {
        Some(t) if t.is_symbol('<') => matching_angle(&header, 0)? + 1,
        _ => 0,
    };
    let rest = &header[start..];
    if !rest.first()?.is_ident("extends") {
        return None;
    }
    let end = rest
        .iter()
        .position(|t| t.is_ident("implements") || t.is_ident("permits"))
        .unwrap_or(rest.len());
    parse_type(&rest[1..end])
}

fn paren_balance(tokens: &[Token]) -> i32 {
    tokens.iter().fold(0, |level, t| match t.kind {
        TokenKind::Symbol('(') => level + 1,
        TokenKind::Symbol(')') => level - 1,
        _ => level,
    })
}

fn starts_type_declaration(tokens: &[Token], i: usize) -> bool {
    let tok = &tokens[i];
    let prev_is_dot = i > 0 && tokens[i - 1].is_symbol('.');
    if prev_is_dot {
        return false;
    }
    let next_is_name = tokens.get(i + 1).and_then(Token::ident).is_some();
    if tok.is_ident("class") || tok.is_ident("interface") || tok.is_ident("enum") {
        return next_is_name;
    }
    // `record` is contextual: `record Name(` or `record Name<`
    if tok.is_ident("record") && next_is_name {
        return tokens
            .get(i + 2)
            .map(|t| t.is_symbol('(') || t.is_symbol('<'))
            .unwrap_or(false);
    }
    false
}

/// Type parameters directly following a declared name (`<T extends Number, U>`)
fn parse_type_params(tokens: &[Token], start: usize) -> Vec<(String, Option<Vec<String>>)> {
    match tokens.get(start) {
        Some(t) if t.is_symbol('<') => {}
        _ => return Vec::new(),
    }
    let Some(end) = matching_angle(tokens, start) else {
        return Vec::new();
    };
    split_top_level(&tokens[start + 1..end])
        .into_iter()
        .filter_map(|param| {
            let name = param.first()?.ident()?.to_string();
            let bound = param
                .iter()
                .position(|t| t.is_ident("extends"))
                .map(|pos| qualified_name(&param[pos + 1..]));
            Some((name, bound.filter(|b| !b.is_empty())))
        })
        .collect()
}

fn matching_angle(tokens: &[Token], open: usize) -> Option<usize> {
    let mut level = 0usize;
    for (idx, tok) in tokens.iter().enumerate().skip(open) {
        if tok.is_symbol('<') {
            level += 1;
        } else if tok.is_symbol('>') {
            level = level.saturating_sub(1);
            if level == 0 {
                return Some(idx);
            }
        }
    }
    None
}

/// Split on commas that are not nested inside `<>`/`()`
fn split_top_level(tokens: &[Token]) -> Vec<&[Token]> {
    let mut parts = Vec::new();
    let mut level = 0i32;
    let mut start = 0;
    for (idx, tok) in tokens.iter().enumerate() {
        match tok.kind {
            TokenKind::Symbol('<') | TokenKind::Symbol('(') => level += 1,
            TokenKind::Symbol('>') | TokenKind::Symbol(')') => level -= 1,
            TokenKind::Symbol(',') if level == 0 => {
                parts.push(&tokens[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    if start < tokens.len() {
        parts.push(&tokens[start..]);
    }
    parts
}

/// Dotted identifier prefix of a token slice (`java.util.List<...>` -> `java.util.List`)
fn qualified_name(tokens: &[Token]) -> Vec<String> {
    let mut segments = Vec::new();
    let mut expect_ident = true;
    for tok in tokens {
        match (&tok.kind, expect_ident) {
            (TokenKind::Ident(w), true) => {
                segments.push(w.clone());
                expect_ident = false;
            }
            (TokenKind::Symbol('.'), false) => expect_ident = true,
            _ => break,
        }
    }
    segments
}

fn read_header_statement(
    tokens: &[Token],
    package: &mut String,
    imports: &mut HashMap<String, String>,
) {
    let tokens = strip_annotations(tokens);
    match tokens.first() {
        Some(t) if t.is_ident("package") => {
            *package = qualified_name(&tokens[1..]).join(".");
        }
        Some(t) if t.is_ident("import") => {
            if tokens.get(1).map(|t| t.is_ident("static")).unwrap_or(false) {
                return;
            }
            let name = qualified_name(&tokens[1..]);
            let wildcard = tokens.last().map(|t| t.is_symbol('*')).unwrap_or(false);
            if !wildcard {
                if let Some(simple) = name.last() {
                    imports.insert(simple.clone(), binary_from_segments(&name));
                }
            }
        }
        _ => {}
    }
}

/// Drop `@Annotation` and `@Annotation(...)` occurrences
fn strip_annotations(tokens: &[Token]) -> Vec<Token> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut i = 0;
    while i < tokens.len() {
        if tokens[i].is_symbol('@') && !tokens.get(i + 1).map(|t| t.is_ident("interface")).unwrap_or(false) {
            i += 1;
            let name = qualified_name(&tokens[i..]);
            i += (name.len() * 2).saturating_sub(1);
            if tokens.get(i).map(|t| t.is_symbol('(')).unwrap_or(false) {
                let mut level = 0;
                while i < tokens.len() {
                    if tokens[i].is_symbol('(') {
                        level += 1;
                    } else if tokens[i].is_symbol(')') {
                        level -= 1;
                        if level == 0 {
                            i += 1;
                            break;
                        }
                    }
                    i += 1;
                }
            }
            continue;
        }
        out.push(tokens[i].clone());
        i += 1;
    }
    out
}

fn read_native_member(tokens: &[Token], stack: &[TypeScope]) -> Result<Option<RawMethod>, ParseError> {
    let tokens = strip_annotations(tokens);
    let Some(open) = tokens.iter().position(|t| t.is_symbol('(')) else {
        return Ok(None);
    };
    let head = &tokens[..open];
    if !head.iter().any(|t| t.is_ident("native")) {
        return Ok(None);
    }
    let line = head.last().map(|t| t.line).unwrap_or(0);
    let err = |message: &str| ParseError {
        line,
        message: message.to_string(),
    };

    let name = head
        .last()
        .and_then(Token::ident)
        .ok_or_else(|| err("expected method name before '('"))?
        .to_string();

    let mut idx = 0;
    let mut is_static = false;
    while let Some(word) = head.get(idx).and_then(Token::ident) {
        if !MODIFIERS.contains(&word) {
            break;
        }
        is_static |= word == "static";
        idx += 1;
    }

    let mut method_vars = Vec::new();
    if head.get(idx).map(|t| t.is_symbol('<')).unwrap_or(false) {
        method_vars = parse_type_params(head, idx);
        idx = matching_angle(head, idx).ok_or_else(|| err("unclosed type parameter list"))? + 1;
    }

    let name_idx = head.len() - 1;
    if idx >= name_idx {
        return Err(err(&format!("missing return type for native method '{}'", name)));
    }
    let ret_tokens = &head[idx..name_idx];
    let ret = parse_type(ret_tokens).ok_or_else(|| err("unrecognised return type"))?;

    let close = matching_paren(&tokens, open).ok_or_else(|| err("unclosed parameter list"))?;
    let mut params = Vec::new();
    for param in split_top_level(&tokens[open + 1..close]) {
        if param.is_empty() {
            continue;
        }
        if let Some(ty) = parse_param(param).map_err(|m| err(&m))? {
            params.push(ty);
        }
    }

    // legacy `int f()[]` return dimensions
    let trailing_dims = tokens[close + 1..]
        .iter()
        .take_while(|t| t.is_symbol('[') || t.is_symbol(']'))
        .filter(|t| t.is_symbol('['))
        .count();
    let ret = ret.with_extra_dims(trailing_dims);

    let mut type_vars: Vec<(String, Option<Vec<String>>)> = method_vars;
    for scope in stack.iter().rev() {
        type_vars.extend(scope.type_vars.iter().cloned());
    }

    Ok(Some(RawMethod {
        enclosing: stack.iter().map(|s| s.binary_name.clone()).collect(),
        type_vars,
        name,
        params,
        ret,
        is_static,
        line,
    }))
}

fn matching_paren(tokens: &[Token], open: usize) -> Option<usize> {
    let mut level = 0usize;
    for (idx, tok) in tokens.iter().enumerate().skip(open) {
        if tok.is_symbol('(') {
            level += 1;
        } else if tok.is_symbol(')') {
            level -= 1;
            if level == 0 {
                return Some(idx);
            }
        }
    }
    None
}

/// Parse `final Type<...>[] name[]` / `Type... name`; `None` for receiver parameters
fn parse_param(tokens: &[Token]) -> Result<Option<RawType>, String> {
    let tokens: Vec<&Token> = tokens.iter().filter(|t| !t.is_ident("final")).collect();
    let Some(last) = tokens.iter().rposition(|t| t.ident().is_some()) else {
        return Err("parameter without a name".to_string());
    };
    if tokens[last].is_ident("this") {
        return Ok(None);
    }
    let name_dims = tokens[last + 1..].iter().filter(|t| t.is_symbol('[')).count();
    let type_tokens: Vec<Token> = tokens[..last].iter().map(|t| (*t).clone()).collect();
    let varargs = type_tokens.iter().any(|t| t.kind == TokenKind::Ellipsis);
    let ty = parse_type(&type_tokens).ok_or_else(|| "unrecognised parameter type".to_string())?;
    Ok(Some(ty.with_extra_dims(name_dims + usize::from(varargs))))
}

/// Parse a type reference, erasing generic arguments
fn parse_type(tokens: &[Token]) -> Option<RawType> {
    let segments = qualified_name(tokens);
    let first = segments.first()?;
    // brackets inside type arguments belong to the arguments, not to this type
    let (dims, _) = tokens.iter().fold((0usize, 0usize), |(dims, angle), t| match t.kind {
        TokenKind::Symbol('<') => (dims, angle + 1),
        TokenKind::Symbol('>') => (dims, angle.saturating_sub(1)),
        TokenKind::Symbol('[') if angle == 0 => (dims + 1, angle),
        _ => (dims, angle),
    });
    if segments.len() == 1 && first == "void" {
        return (dims == 0).then_some(RawType::Void);
    }
    if segments.len() == 1 {
        if let Some(p) = PrimitiveType::from_keyword(first) {
            return Some(RawType::Primitive(p).with_extra_dims(dims));
        }
    }
    Some(RawType::Named { segments, dims })
}

fn binary_from_segments(segments: &[String]) -> String {
    match segments.iter().position(|s| starts_uppercase(s)) {
        Some(pos) => {
            let package = segments[..pos].join(".");
            let classes = segments[pos..].join("$");
            if package.is_empty() {
                classes
            } else {
                format!("{}.{}", package, classes)
            }
        }
        None => segments.join("."),
    }
}

fn starts_uppercase(s: &str) -> bool {
    s.chars().next().map(char::is_uppercase).unwrap_or(false)
}

struct Resolver<'a> {
    package: &'a str,
    imports: &'a HashMap<String, String>,
    /// Types declared in the unit being resolved
    local: &'a BTreeSet<String>,
    /// Types declared by the rest of the scan
    project: &'a BTreeSet<String>,
}

impl Resolver<'_> {
    fn resolve(
        &self,
        raw: &RawType,
        enclosing: &[String],
        type_vars: &[&(String, Option<Vec<String>>)],
    ) -> JavaType {
        match raw {
            RawType::Void => JavaType::Void,
            RawType::Primitive(p) => JavaType::Primitive(*p),
            RawType::Named { segments, dims } => {
                let base = match PrimitiveType::from_keyword(&segments[0]) {
                    Some(p) if segments.len() == 1 => JavaType::Primitive(p),
                    _ => JavaType::Object(self.resolve_name(segments, enclosing, type_vars)),
                };
                base.with_dimensions(*dims)
            }
        }
    }

    fn resolve_name(
        &self,
        segments: &[String],
        enclosing: &[String],
        type_vars: &[&(String, Option<Vec<String>>)],
    ) -> String {
        let first = &segments[0];
        let nested = |base: String| -> String {
            std::iter::once(base)
                .chain(segments[1..].iter().cloned())
                .collect::<Vec<_>>()
                .join("$")
        };

        if segments.len() == 1 {
            if let Some((_, bound)) = type_vars.iter().find(|(name, _)| name == first) {
                return match bound {
                    Some(bound) if !type_vars.iter().any(|(n, _)| Some(n) == bound.first()) => {
                        self.resolve_name(bound, enclosing, &[])
                    }
                    _ => "java.lang.Object".to_string(),
                };
            }
        }

        for outer in enclosing.iter().rev() {
            let candidate = format!("{}${}", outer, first);
            if self.local.contains(&candidate) || self.project.contains(&candidate) {
                return nested(candidate);
            }
            if outer.rsplit(['.', '$']).next() == Some(first.as_str()) {
                return nested(outer.clone());
            }
        }

        let same_package = if self.package.is_empty() {
            first.clone()
        } else {
            format!("{}.{}", self.package, first)
        };
        if self.local.contains(&same_package) {
            return nested(same_package);
        }
        if let Some(imported) = self.imports.get(first) {
            return nested(imported.clone());
        }
        // package members shadow the implicit java.lang import
        if self.project.contains(&same_package) {
            return nested(same_package);
        }
        if JAVA_LANG.contains(&first.as_str()) {
            return nested(format!("java.lang.{}", first));
        }
        if segments.len() > 1 && !starts_uppercase(first) {
            return binary_from_segments(segments);
        }
        nested(same_package)
    }
}
