//! Per-invocation context: project root, resolved config, logging

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use bridgewright::config::{load_for_project, Config, ConfigWarning, Verbosity};
use bridgewright::infrastructure::logging;
use bridgewright::presentation::output::OutputFormat;

use super::project_root::discover_project_root;

pub(crate) struct CommandContext {
    pub config: Config,
    pub format: OutputFormat,
    pub verbosity: Verbosity,
}

impl CommandContext {
    /// Resolve config for the current directory and install the subscriber
    pub fn load(explicit: Option<&Path>, json: bool, verbose: u8) -> Result<Self> {
        let cwd = std::env::current_dir().context("cannot determine current directory")?;
        Self::load_from(&cwd, explicit, json, verbose)
    }

    pub fn load_from(
        start: &Path,
        explicit: Option<&Path>,
        json: bool,
        verbose: u8,
    ) -> Result<Self> {
        let project_root: PathBuf = discover_project_root(start);
        let (config, warnings) = load_for_project(explicit, &project_root)?;
        let verbosity = config.output.verbosity.raised_by(verbose);
        logging::init(verbosity);

        for warning in &warnings {
            eprintln!("{}", format_warning(warning));
        }

        Ok(Self {
            config,
            format: OutputFormat::from_json_flag(json),
            verbosity,
        })
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    pub fn detailed(&self) -> bool {
        self.verbosity >= Verbosity::Verbose
    }
}

fn format_warning(warning: &ConfigWarning) -> String {
    let mut line = format!(
        "warning: unknown config key '{}' in {}",
        warning.key,
        warning.file.display()
    );
    if let Some(n) = warning.line {
        line.push_str(&format!(":{}", n));
    }
    if let Some(suggestion) = &warning.suggestion {
        line.push_str(&format!(" (did you mean '{}'?)", suggestion));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warning_mentions_suggestion_and_line() {
        let warning = ConfigWarning {
            key: "library_nme".to_string(),
            file: PathBuf::from("bridgewright.toml"),
            line: Some(4),
            suggestion: Some("library_name".to_string()),
        };
        assert_eq!(
            format_warning(&warning),
            "warning: unknown config key 'library_nme' in bridgewright.toml:4 \
             (did you mean 'library_name'?)"
        );
    }
}
