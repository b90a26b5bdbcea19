//! Platform tag value object - decides native library file naming

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Target platform for the native library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum PlatformTag {
    /// Windows (`Name.dll`)
    Windows,
    /// Linux and other ELF unixes (`libName.so`)
    Linux,
    /// macOS (`libName.dylib`)
    #[serde(alias = "darwin", alias = "mac")]
    Macos,
}

impl PlatformTag {
    /// All supported platforms
    pub const ALL: [PlatformTag; 3] = [PlatformTag::Windows, PlatformTag::Linux, PlatformTag::Macos];

    /// Platform of the running host
    pub fn current() -> Self {
        #[cfg(target_os = "windows")]
        {
            PlatformTag::Windows
        }
        #[cfg(target_os = "macos")]
        {
            PlatformTag::Macos
        }
        #[cfg(not(any(target_os = "windows", target_os = "macos")))]
        {
            PlatformTag::Linux
        }
    }

    /// Shared library extension without the dot
    pub fn shared_lib_extension(&self) -> &'static str {
        match self {
            PlatformTag::Windows => "dll",
            PlatformTag::Linux => "so",
            PlatformTag::Macos => "dylib",
        }
    }

    /// File name the toolchain produces for a library called `name`
    ///
    /// This is also the name the host loader looks up inside the resource bundle.
    pub fn library_file_name(&self, name: &str) -> String {
        match self {
            PlatformTag::Windows => format!("{}.dll", name),
            PlatformTag::Linux | PlatformTag::Macos => {
                format!("lib{}.{}", name, self.shared_lib_extension())
            }
        }
    }

    /// Stable lowercase tag
    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformTag::Windows => "windows",
            PlatformTag::Linux => "linux",
            PlatformTag::Macos => "macos",
        }
    }
}

impl Default for PlatformTag {
    fn default() -> Self {
        Self::current()
    }
}

impl fmt::Display for PlatformTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlatformTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "windows" | "win" => Ok(PlatformTag::Windows),
            "linux" => Ok(PlatformTag::Linux),
            "macos" | "darwin" | "mac" => Ok(PlatformTag::Macos),
            other => Err(format!("unknown platform '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn library_file_names_follow_platform_conventions() {
        assert_eq!(
            PlatformTag::Windows.library_file_name("SwoftLang"),
            "SwoftLang.dll"
        );
        assert_eq!(
            PlatformTag::Linux.library_file_name("SwoftLang"),
            "libSwoftLang.so"
        );
        assert_eq!(
            PlatformTag::Macos.library_file_name("SwoftLang"),
            "libSwoftLang.dylib"
        );
    }

    #[test]
    fn parse_accepts_aliases() {
        assert_eq!("Darwin".parse::<PlatformTag>(), Ok(PlatformTag::Macos));
        assert_eq!("win".parse::<PlatformTag>(), Ok(PlatformTag::Windows));
        assert!("plan9".parse::<PlatformTag>().is_err());
    }

    #[test]
    fn serde_uses_kebab_case() {
        #[derive(Deserialize)]
        struct Wrapper {
            platform: PlatformTag,
        }
        let w: Wrapper = toml::from_str("platform = \"macos\"").unwrap();
        assert_eq!(w.platform, PlatformTag::Macos);
        let w: Wrapper = toml::from_str("platform = \"darwin\"").unwrap();
        assert_eq!(w.platform, PlatformTag::Macos);
    }

    #[test]
    fn display_round_trips_through_from_str() {
        for tag in PlatformTag::ALL {
            assert_eq!(tag.to_string().parse::<PlatformTag>(), Ok(tag));
        }
    }
}
