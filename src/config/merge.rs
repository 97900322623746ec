// config merging - combines layered ProjectConfig instances into one effective config

use super::{CorpusConfig, ProjectConfig, RuleTableConfig, SettingsConfig};

/// merge two configs: values present in the overlay win
pub fn merge_two(base: ProjectConfig, overlay: ProjectConfig) -> ProjectConfig {
    ProjectConfig {
        corpus: merge_corpus(base.corpus, overlay.corpus),
        rules: RuleTableConfig {
            path: overlay.rules.path.or(base.rules.path),
        },
        settings: merge_settings(base.settings, overlay.settings),
    }
}

/// merge a list of configs in order (first = lowest priority, last = highest).
pub fn merge_all(configs: Vec<ProjectConfig>) -> ProjectConfig {
    configs
        .into_iter()
        .fold(ProjectConfig::default(), merge_two)
}

fn merge_corpus(base: CorpusConfig, overlay: CorpusConfig) -> CorpusConfig {
    CorpusConfig {
        path: overlay.path.or(base.path),
    }
}

fn merge_settings(base: SettingsConfig, overlay: SettingsConfig) -> SettingsConfig {
    SettingsConfig {
        min_strength: overlay.min_strength.or(base.min_strength),
        max_length: overlay.max_length.or(base.max_length),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn settings(min_strength: Option<f64>, max_length: Option<usize>) -> ProjectConfig {
        ProjectConfig {
            settings: SettingsConfig {
                min_strength,
                max_length,
            },
            ..Default::default()
        }
    }

    #[test]
    fn scalar_override_min_strength() {
        let merged = merge_two(settings(Some(40.0), None), settings(Some(70.0), None));
        assert_eq!(merged.settings.min_strength, Some(70.0));
    }

    #[test]
    fn scalar_base_preserved_when_overlay_is_none() {
        let merged = merge_two(settings(Some(40.0), Some(32)), ProjectConfig::default());
        assert_eq!(merged.settings.min_strength, Some(40.0));
        assert_eq!(merged.settings.max_length, Some(32));
    }

    #[test]
    fn fields_merge_independently() {
        let merged = merge_two(settings(Some(40.0), None), settings(None, Some(20)));
        assert_eq!(merged.settings.min_strength, Some(40.0));
        assert_eq!(merged.settings.max_length, Some(20));
    }

    #[test]
    fn corpus_path_override() {
        let base = ProjectConfig {
            corpus: CorpusConfig {
                path: Some(PathBuf::from("/etc/lists/base.txt")),
            },
            ..Default::default()
        };
        let overlay = ProjectConfig {
            corpus: CorpusConfig {
                path: Some(PathBuf::from("/home/u/project/local.txt")),
            },
            ..Default::default()
        };
        let merged = merge_two(base.clone(), overlay);
        assert_eq!(
            merged.corpus.path,
            Some(PathBuf::from("/home/u/project/local.txt"))
        );

        let kept = merge_two(base, ProjectConfig::default());
        assert_eq!(kept.corpus.path, Some(PathBuf::from("/etc/lists/base.txt")));
    }

    #[test]
    fn merge_all_last_wins() {
        let merged = merge_all(vec![
            settings(Some(10.0), Some(50)),
            settings(Some(20.0), None),
            settings(Some(30.0), None),
        ]);
        assert_eq!(merged.settings.min_strength, Some(30.0));
        assert_eq!(merged.settings.max_length, Some(50));
    }

    #[test]
    fn merge_all_empty_is_default() {
        assert_eq!(merge_all(Vec::new()), ProjectConfig::default());
    }
}
