//! Package prefix value object
//!
//! Restricts the declaration scanner to one package subtree.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// A dotted Java package prefix (`net.swofty.nativebridge`); empty means "everything"
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct PackagePrefix {
    segments: Vec<String>,
}

impl PackagePrefix {
    /// The empty prefix (whole source root)
    pub fn root() -> Self {
        Self::default()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Directory of the subtree relative to the source root
    pub fn relative_dir(&self) -> PathBuf {
        self.segments.iter().collect()
    }

    /// True if `package` is this prefix or nested under it
    pub fn contains_package(&self, package: &str) -> bool {
        if self.is_root() {
            return true;
        }
        let parts: Vec<&str> = if package.is_empty() {
            Vec::new()
        } else {
            package.split('.').collect()
        };
        parts.len() >= self.segments.len()
            && self.segments.iter().zip(&parts).all(|(a, b)| a == b)
    }

    pub fn as_dotted(&self) -> String {
        self.segments.join(".")
    }
}

impl FromStr for PackagePrefix {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_end_matches(".*").trim_end_matches('.');
        if trimmed.is_empty() {
            return Ok(Self::root());
        }
        let segments = trimmed
            .split('.')
            .map(|seg| {
                if is_java_identifier(seg) {
                    Ok(seg.to_string())
                } else {
                    Err(format!("invalid package segment '{}' in '{}'", seg, s))
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { segments })
    }
}

impl fmt::Display for PackagePrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_dotted())
    }
}

fn is_java_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
}
