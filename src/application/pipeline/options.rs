//! Pipeline Options
//!
//! Resolved, explicit directory handles and commands for one run.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::application::header_generator::HeaderDir;
use crate::application::packager::{stays_inside, ResourceBundle};
use crate::config::Config;
use crate::domain::policies::PackagingConflictPolicy;
use crate::domain::ports::NativeDirs;
use crate::domain::services::Stage;
use crate::domain::value_objects::PackagePrefix;
use crate::error::{BridgeError, BridgeResult};

/// What a run should achieve
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Goal {
    /// Scan and regenerate headers
    Headers,
    /// Everything up to a packaged library
    #[default]
    Build,
    /// Build, then launch the host
    Run,
}

impl Goal {
    /// Stages that must complete; prerequisites come from the stage graph
    pub fn targets(&self) -> &'static [Stage] {
        match self {
            Goal::Headers => &[Stage::GenerateHeaders],
            Goal::Build => &[Stage::Package, Stage::CompileManaged],
            Goal::Run => &[Stage::Run],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Goal::Headers => "headers",
            Goal::Build => "build",
            Goal::Run => "run",
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Goal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "headers" => Ok(Goal::Headers),
            "build" => Ok(Goal::Build),
            "run" => Ok(Goal::Run),
            other => Err(format!(
                "unknown goal '{}' (expected headers, build or run)",
                other
            )),
        }
    }
}

/// Extra bundle candidate with its source resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncludeCandidate {
    pub source: PathBuf,
    /// Bundle-relative destination
    pub path: PathBuf,
}

/// Options for the pipeline use case
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Project root (holds the run lock)
    pub project_root: PathBuf,
    /// Java source root
    pub source_root: PathBuf,
    pub prefix: PackagePrefix,
    pub header_dir: HeaderDir,
    pub native: NativeDirs,
    pub bundle: ResourceBundle,
    /// Bundle subdirectory the built library lands in
    pub resource_dir: PathBuf,
    pub policy: PackagingConflictPolicy,
    pub includes: Vec<IncludeCandidate>,
    /// Managed compile argv; empty skips the stage
    pub managed_compile: Vec<String>,
    /// Host launch argv
    pub host_run: Vec<String>,
    pub main_class: String,
    /// Per-command timeout for external commands
    pub timeout: Option<Duration>,
}

impl PipelineOptions {
    /// Resolve every configured path against the project root
    pub fn from_config(config: &Config) -> BridgeResult<Self> {
        let prefix = config.package_prefix()?;
        let native = NativeDirs {
            source_dir: config.native_source_dir(),
            header_dir: config.header_dir(),
            artifact_path: config.artifact_path(),
            platform: config.platform(),
        };
        let resource_dir = bundle_relative(
            config,
            "package.resource_dir",
            &config.package.resource_dir,
        )?;
        let includes = config
            .package
            .include
            .iter()
            .map(|entry| {
                Ok(IncludeCandidate {
                    source: config.resolve(&entry.source),
                    path: bundle_relative(config, "package.include.path", &entry.path)?,
                })
            })
            .collect::<BridgeResult<Vec<_>>>()?;

        Ok(Self {
            project_root: config.project_root.clone(),
            source_root: config.source_root(),
            prefix,
            header_dir: HeaderDir::new(config.header_dir()),
            native,
            bundle: ResourceBundle::new(config.resources_dir()),
            resource_dir,
            policy: config.package.conflict_policy,
            includes,
            managed_compile: config.managed.compile.clone(),
            host_run: config.host.run.clone(),
            main_class: config.host.main_class.clone(),
            timeout: config.native.timeout_secs.map(Duration::from_secs),
        })
    }
}

/// Bundle destinations must stay below the bundle root
fn bundle_relative(config: &Config, key: &str, path: &Path) -> BridgeResult<PathBuf> {
    if stays_inside(path) {
        return Ok(path.to_path_buf());
    }
    Err(BridgeError::Config {
        file: config.config_file(),
        message: format!(
            "{} '{}' must be a relative path inside the resource bundle",
            key,
            path.display()
        ),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IncludeEntry;
    use crate::domain::value_objects::PlatformTag;
    use std::path::Path;

    #[test]
    fn goal_targets() {
        assert_eq!(Goal::Headers.targets(), &[Stage::GenerateHeaders]);
        assert!(Goal::Build.targets().contains(&Stage::CompileManaged));
        assert_eq!(Goal::Run.targets(), &[Stage::Run]);
    }

    #[test]
    fn goal_from_str() {
        assert_eq!("RUN".parse::<Goal>().unwrap(), Goal::Run);
        assert!("deploy".parse::<Goal>().is_err());
    }

    #[test]
    fn options_resolve_against_project_root() {
        let mut config = Config {
            project_root: PathBuf::from("/proj"),
            ..Config::default()
        };
        config.native.platform = Some(PlatformTag::Linux);
        config.native.timeout_secs = Some(30);
        config.package.include.push(IncludeEntry {
            source: PathBuf::from("prebuilt/libSwoftLang.so"),
            path: PathBuf::from("Debug/libSwoftLang.so"),
        });

        let options = PipelineOptions::from_config(&config).unwrap();
        assert_eq!(options.header_dir.path(), Path::new("/proj/native/include"));
        assert_eq!(
            options.native.artifact_path,
            PathBuf::from("/proj/native/build/Debug/libSwoftLang.so")
        );
        assert_eq!(
            options.bundle.root(),
            Path::new("/proj/java/src/main/resources")
        );
        assert_eq!(
            options.includes[0].source,
            PathBuf::from("/proj/prebuilt/libSwoftLang.so")
        );
        assert_eq!(options.timeout, Some(Duration::from_secs(30)));
    }

    #[test]
    fn bundle_paths_outside_the_bundle_are_rejected() {
        let mut config = Config::default();
        config.package.include.push(IncludeEntry {
            source: PathBuf::from("prebuilt/evil.so"),
            path: PathBuf::from("../outside/evil.so"),
        });
        let err = PipelineOptions::from_config(&config).unwrap_err();
        assert!(err.to_string().contains("package.include.path '../outside/evil.so'"));

        let mut config = Config::default();
        config.package.resource_dir = PathBuf::from("/tmp/Debug");
        let err = PipelineOptions::from_config(&config).unwrap_err();
        assert!(matches!(err, BridgeError::Config { .. }));

        let mut config = Config::default();
        config.package.resource_dir = PathBuf::from("");
        assert!(PipelineOptions::from_config(&config).is_ok());
    }

    #[test]
    fn invalid_prefix_is_rejected() {
        let mut config = Config::default();
        config.scan.package_prefix = "net..swofty".to_string();
        assert!(PipelineOptions::from_config(&config).is_err());
    }
}
