//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::policies::PackagingConflictPolicy;
use crate::domain::value_objects::{PackagePrefix, PlatformTag};
use crate::error::{BridgeError, BridgeResult};

use super::loader::{self, ConfigWarning};

/// Where native declarations are discovered
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    #[serde(default = "default_source_root")]
    pub source_root: PathBuf,

    /// Dotted package prefix; empty scans the whole source root
    #[serde(default)]
    pub package_prefix: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            source_root: default_source_root(),
            package_prefix: String::new(),
        }
    }
}

fn default_source_root() -> PathBuf {
    PathBuf::from("java/src/main/java")
}

/// Header output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeadersConfig {
    #[serde(default = "default_header_dir")]
    pub output_dir: PathBuf,
}

impl Default for HeadersConfig {
    fn default() -> Self {
        Self {
            output_dir: default_header_dir(),
        }
    }
}

fn default_header_dir() -> PathBuf {
    PathBuf::from("native/include")
}

/// Native toolchain configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NativeConfig {
    #[serde(default = "default_native_dir")]
    pub source_dir: PathBuf,

    #[serde(default = "default_configure")]
    pub configure: Vec<String>,

    #[serde(default = "default_build")]
    pub build: Vec<String>,

    /// Library base name (`SwoftLang` -> `SwoftLang.dll` / `libSwoftLang.so`)
    #[serde(default = "default_library_name")]
    pub library_name: String,

    /// Where the build leaves the library, relative to `source_dir`
    #[serde(default = "default_artifact_dir")]
    pub artifact_dir: PathBuf,

    /// Defaults to the host platform
    #[serde(default)]
    pub platform: Option<PlatformTag>,

    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for NativeConfig {
    fn default() -> Self {
        Self {
            source_dir: default_native_dir(),
            configure: default_configure(),
            build: default_build(),
            library_name: default_library_name(),
            artifact_dir: default_artifact_dir(),
            platform: None,
            timeout_secs: None,
        }
    }
}

fn default_native_dir() -> PathBuf {
    PathBuf::from("native")
}

fn argv(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn default_configure() -> Vec<String> {
    argv(&["cmake", ".", "-B", "build"])
}

fn default_build() -> Vec<String> {
    argv(&["cmake", "--build", "build"])
}

fn default_library_name() -> String {
    "SwoftLang".to_string()
}

fn default_artifact_dir() -> PathBuf {
    PathBuf::from("build/Debug")
}

/// Extra bundle candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncludeEntry {
    /// File to copy
    pub source: PathBuf,
    /// Bundle-relative destination
    pub path: PathBuf,
}

/// Resource bundle configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageConfig {
    #[serde(default = "default_resources_dir")]
    pub resources_dir: PathBuf,

    /// Bundle subdirectory the host loader reads the library from
    #[serde(default = "default_resource_dir")]
    pub resource_dir: PathBuf,

    #[serde(default)]
    pub conflict_policy: PackagingConflictPolicy,

    #[serde(default)]
    pub include: Vec<IncludeEntry>,
}

impl Default for PackageConfig {
    fn default() -> Self {
        Self {
            resources_dir: default_resources_dir(),
            resource_dir: default_resource_dir(),
            conflict_policy: PackagingConflictPolicy::default(),
            include: Vec::new(),
        }
    }
}

fn default_resources_dir() -> PathBuf {
    PathBuf::from("java/src/main/resources")
}

fn default_resource_dir() -> PathBuf {
    PathBuf::from("Debug")
}

/// Managed compile configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ManagedConfig {
    /// Compile command; the stage is skipped when empty
    #[serde(default)]
    pub compile: Vec<String>,
}

/// Host application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HostConfig {
    #[serde(default)]
    pub main_class: String,

    /// Launch command; `{main_class}` and `{resources}` are substituted
    #[serde(default)]
    pub run: Vec<String>,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub verbosity: Verbosity,
}

/// Verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
    Debug,
}

impl Verbosity {
    /// Raise by `-v` occurrences
    pub fn raised_by(self, count: u8) -> Self {
        match (self as u8).saturating_add(count) {
            0 => Verbosity::Quiet,
            1 => Verbosity::Normal,
            2 => Verbosity::Verbose,
            _ => Verbosity::Debug,
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scan: ScanConfig,

    #[serde(default)]
    pub headers: HeadersConfig,

    #[serde(default)]
    pub native: NativeConfig,

    #[serde(default)]
    pub package: PackageConfig,

    #[serde(default)]
    pub managed: ManagedConfig,

    #[serde(default)]
    pub host: HostConfig,

    #[serde(default)]
    pub output: OutputConfig,

    /// Directory relative paths resolve against
    #[serde(skip, default = "default_project_root")]
    pub project_root: PathBuf,
}

fn default_project_root() -> PathBuf {
    PathBuf::from(".")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scan: ScanConfig::default(),
            headers: HeadersConfig::default(),
            native: NativeConfig::default(),
            package: PackageConfig::default(),
            managed: ManagedConfig::default(),
            host: HostConfig::default(),
            output: OutputConfig::default(),
            project_root: default_project_root(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> BridgeResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> BridgeResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Apply environment variable overrides (BRIDGEWRIGHT_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    /// Resolve a configured path against the project root
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_root.join(path)
        }
    }

    pub fn package_prefix(&self) -> BridgeResult<PackagePrefix> {
        self.scan
            .package_prefix
            .parse()
            .map_err(|message: String| BridgeError::Config {
                file: self.config_file(),
                message,
            })
    }

    /// Project config file that semantic errors are attributed to
    pub fn config_file(&self) -> PathBuf {
        self.project_root.join(loader::PROJECT_CONFIG_FILE)
    }

    pub fn platform(&self) -> PlatformTag {
        self.native.platform.unwrap_or_default()
    }

    pub fn source_root(&self) -> PathBuf {
        self.resolve(&self.scan.source_root)
    }

    pub fn header_dir(&self) -> PathBuf {
        self.resolve(&self.headers.output_dir)
    }

    pub fn native_source_dir(&self) -> PathBuf {
        self.resolve(&self.native.source_dir)
    }

    /// Conventional location of the built library
    pub fn artifact_path(&self) -> PathBuf {
        self.native_source_dir()
            .join(&self.native.artifact_dir)
            .join(self.platform().library_file_name(&self.native.library_name))
    }

    pub fn resources_dir(&self) -> PathBuf {
        self.resolve(&self.package.resources_dir)
    }
}
