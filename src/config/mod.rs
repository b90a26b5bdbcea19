//! Configuration module for Bridgewright
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (BRIDGEWRIGHT_*)
//! 3. Project config (`bridgewright.toml`, or `--config`)
//! 4. User config (`<config dir>/bridgewright/config.toml`)
//! 5. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{
    load_for_project, user_config_path, ConfigWarning, CONFIG_DIR_ENV, PROJECT_CONFIG_FILE,
};
pub use types::{
    Config, HeadersConfig, HostConfig, IncludeEntry, ManagedConfig, NativeConfig, OutputConfig,
    PackageConfig, ScanConfig, Verbosity,
};
