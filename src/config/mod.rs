pub mod discovery;
pub mod merge;

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// layered configuration from .fuzzypass.toml files
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    #[serde(default)]
    pub corpus: CorpusConfig,
    #[serde(default)]
    pub rules: RuleTableConfig,
    #[serde(default)]
    pub settings: SettingsConfig,
}

/// corpus section of the config file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CorpusConfig {
    /// password list, one entry per line. relative paths are resolved
    /// against the directory of the config file that set them.
    pub path: Option<PathBuf>,
}

/// rules section of the config file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleTableConfig {
    /// replacement rule table in the embedded rules.toml format
    pub path: Option<PathBuf>,
}

/// settings section of the config file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsConfig {
    /// passwords scoring below this strength are reported as weak
    pub min_strength: Option<f64>,
    /// longest password accepted for scoring
    pub max_length: Option<usize>,
}

/// parse a single config file. relative corpus and rule paths are anchored
/// to the file's directory so that merged configs keep pointing at the right files.
pub fn load_single_config(path: &Path) -> Result<ProjectConfig, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
    let mut config: ProjectConfig = toml::from_str(&content)
        .map_err(|e| format!("failed to parse {}: {}", path.display(), e))?;

    config.corpus.path = config.corpus.path.map(|p| anchor(path, p));
    config.rules.path = config.rules.path.map(|p| anchor(path, p));

    if let Some(min) = config.settings.min_strength {
        if !(0.0..=100.0).contains(&min) {
            return Err(format!(
                "{}: min_strength must be within 0..100, got {}",
                path.display(),
                min
            ));
        }
    }
    if config.settings.max_length == Some(0) {
        return Err(format!("{}: max_length must be at least 1", path.display()));
    }

    Ok(config)
}

fn anchor(config_file: &Path, target: PathBuf) -> PathBuf {
    match config_file.parent() {
        Some(dir) if target.is_relative() => dir.join(target),
        _ => target,
    }
}

/// discover and merge every config file between the system location and `start`
pub fn load_config(start: &Path, home: &Path) -> Result<ProjectConfig, String> {
    let paths = discovery::discover_configs(start, home);
    let mut configs = Vec::with_capacity(paths.len());
    for path in &paths {
        debug!(path = %path.display(), "loading config");
        configs.push(load_single_config(path)?);
    }
    Ok(merge::merge_all(configs))
}
