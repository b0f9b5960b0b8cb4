//! Config file and the components built from it

use anyhow::{Context, Result};
use estimate_classifier::{Classifier, ClassifierConfig, HeuristicConfig};
use estimate_normalizer::{load_document, Normalizer, RuleSet};
use estimate_render::{RenderTheme, Renderer};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything `--config` can set; missing tables keep their defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct CliConfig {
    pub(crate) rules: RuleSet,
    /// Overrides `classifier.heuristic` when present
    pub(crate) heuristic: Option<HeuristicConfig>,
    pub(crate) classifier: ClassifierConfig,
    pub(crate) render: RenderTheme,
}

impl CliConfig {
    pub(crate) fn load(path: &Path) -> Result<Self> {
        load_document(path).with_context(|| format!("failed to load config {}", path.display()))
    }

    fn classifier_config(&self) -> ClassifierConfig {
        let mut config = self.classifier.clone();
        if let Some(heuristic) = &self.heuristic {
            config.heuristic = heuristic.clone();
        }
        config
    }
}

/// Normalizer, classifier and renderer sharing one compiled rule set
#[derive(Debug)]
pub(crate) struct Toolkit {
    pub(crate) normalizer: Normalizer,
    pub(crate) classifier: Classifier,
    pub(crate) renderer: Renderer,
}

impl Toolkit {
    pub(crate) fn from_config(config: &CliConfig) -> Result<Self> {
        let rules = config.rules.compile().context("invalid normalization rules")?;
        tracing::debug!(
            rules_version = config.rules.version,
            strictness = ?config.classifier.strictness,
            "toolkit ready"
        );
        Ok(Self {
            normalizer: Normalizer::new(rules.clone()),
            classifier: Classifier::with_normalizer(
                config.classifier_config(),
                Normalizer::new(rules.clone()),
            ),
            renderer: Renderer::with_rules(config.render.clone(), rules),
        })
    }
}
