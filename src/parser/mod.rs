//! Java source parser
//!
//! Extracts native method declarations from `.java` compilation units.
//! Only the declaration surface is understood; method bodies are skipped.

mod declarations;
mod lexer;

use std::fs;
use std::path::Path;

use crate::error::{BridgeError, BridgeResult};

pub use declarations::{ParseError, ParsedUnit, UnitDeclarations};

/// Parse Java source text as a standalone unit, attributing failures to `file`
pub fn parse_java_source(content: &str, file: &Path) -> BridgeResult<ParsedUnit> {
    declarations::parse_unit(content).map_err(|e| source_parse(file, e))
}

/// Read the declarations of one `.java` file, leaving name resolution to the caller
pub fn read_java_file(path: &Path) -> BridgeResult<UnitDeclarations> {
    let content = fs::read_to_string(path).map_err(|e| BridgeError::SourceParse {
        file: path.to_path_buf(),
        line: 0,
        message: e.to_string(),
    })?;
    declarations::read_unit(&content).map_err(|e| source_parse(path, e))
}

fn source_parse(file: &Path, e: ParseError) -> BridgeError {
    BridgeError::SourceParse {
        file: file.to_path_buf(),
        line: e.line,
        message: e.message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_parse_error_carries_file_and_line() {
        let err = parse_java_source("class A {\n\n  native ();\n}", Path::new("A.java")).unwrap_err();
        match err {
            BridgeError::SourceParse { file, line, .. } => {
                assert_eq!(file, PathBuf::from("A.java"));
                assert_eq!(line, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_read_java_file_missing_is_source_parse() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_java_file(&dir.path().join("Missing.java")).unwrap_err();
        assert!(matches!(err, BridgeError::SourceParse { line: 0, .. }));
    }

    #[test]
    fn test_read_java_file_error_names_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Bad.java");
        std::fs::write(&path, "class Bad {\n  native (int x);\n}").unwrap();
        match read_java_file(&path).unwrap_err() {
            BridgeError::SourceParse { file, line, .. } => {
                assert_eq!(file, path);
                assert_eq!(line, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_line_numbers_survive_text_block_line_continuations() {
        let src = "class T {\n  String s = \"\"\"\n    one \\\n    two\n    \"\"\";\n  native (int x);\n}";
        let err = parse_java_source(src, Path::new("T.java")).unwrap_err();
        assert!(matches!(err, BridgeError::SourceParse { line: 6, .. }));
    }

    #[test]
    fn test_default_package_unit() {
        let unit = parse_java_source("class Lone { static native long now(); }", Path::new("Lone.java")).unwrap();
        assert_eq!(unit.package, "");
        assert_eq!(unit.methods[0].owning_class, "Lone");
    }
}
