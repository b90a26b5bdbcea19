//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{BridgeError, BridgeResult};

use super::types::{Config, Verbosity};

/// Project configuration file name
pub const PROJECT_CONFIG_FILE: &str = "bridgewright.toml";

/// Overrides the user configuration directory (tests, sandboxes)
pub const CONFIG_DIR_ENV: &str = "BRIDGEWRIGHT_CONFIG_DIR";

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
///
/// Relative paths in the file resolve against the file's directory.
pub fn load_with_warnings(path: &Path) -> BridgeResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path).map_err(|e| BridgeError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let mut config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| BridgeError::Config {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    config.project_root = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                key: key.clone(),
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Resolve configuration for a project.
///
/// Order: explicit path, `<project>/bridgewright.toml`, user config, defaults.
/// Environment overrides are applied last.
pub fn load_for_project(
    explicit: Option<&Path>,
    project_dir: &Path,
) -> BridgeResult<(Config, Vec<ConfigWarning>)> {
    let (config, warnings) = if let Some(path) = explicit {
        load_with_warnings(path)?
    } else if project_dir.join(PROJECT_CONFIG_FILE).is_file() {
        load_with_warnings(&project_dir.join(PROJECT_CONFIG_FILE))?
    } else if let Some(user) = user_config_path().filter(|p| p.is_file()) {
        debug!(config = %user.display(), "using user config");
        let (mut config, warnings) = load_with_warnings(&user)?;
        config.project_root = project_dir.to_path_buf();
        (config, warnings)
    } else {
        let config = Config {
            project_root: project_dir.to_path_buf(),
            ..Config::default()
        };
        (config, Vec::new())
    };

    Ok((with_env_overrides(config), warnings))
}

/// `<config dir>/bridgewright/config.toml`
pub fn user_config_path() -> Option<PathBuf> {
    std::env::var_os(CONFIG_DIR_ENV)
        .map(PathBuf::from)
        .or_else(|| dirs::config_dir().map(|d| d.join("bridgewright")))
        .map(|d| d.join("config.toml"))
}

/// Apply environment variable overrides (BRIDGEWRIGHT_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    apply_overrides(config, |key| std::env::var(key).ok())
}

pub(crate) fn apply_overrides(mut config: Config, var: impl Fn(&str) -> Option<String>) -> Config {
    // BRIDGEWRIGHT_PACKAGE_PREFIX
    if let Some(prefix) = var("BRIDGEWRIGHT_PACKAGE_PREFIX") {
        config.scan.package_prefix = prefix;
    }

    // BRIDGEWRIGHT_PLATFORM
    if let Some(platform) = var("BRIDGEWRIGHT_PLATFORM") {
        match platform.parse() {
            Ok(tag) => config.native.platform = Some(tag),
            Err(e) => warn!("ignoring BRIDGEWRIGHT_PLATFORM: {}", e),
        }
    }

    // BRIDGEWRIGHT_CONFLICT_POLICY
    if let Some(policy) = var("BRIDGEWRIGHT_CONFLICT_POLICY") {
        match policy.parse() {
            Ok(policy) => config.package.conflict_policy = policy,
            Err(e) => warn!("ignoring BRIDGEWRIGHT_CONFLICT_POLICY: {}", e),
        }
    }

    // BRIDGEWRIGHT_VERBOSITY
    if let Some(verbosity) = var("BRIDGEWRIGHT_VERBOSITY") {
        config.output.verbosity = match verbosity.to_lowercase().as_str() {
            "quiet" => Verbosity::Quiet,
            "verbose" => Verbosity::Verbose,
            "debug" => Verbosity::Debug,
            _ => Verbosity::Normal,
        };
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "scan",
        "source_root",
        "package_prefix",
        "headers",
        "output_dir",
        "native",
        "source_dir",
        "configure",
        "build",
        "library_name",
        "artifact_dir",
        "platform",
        "timeout_secs",
        "package",
        "resources_dir",
        "resource_dir",
        "conflict_policy",
        "include",
        "source",
        "path",
        "managed",
        "compile",
        "host",
        "main_class",
        "run",
        "output",
        "verbosity",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
