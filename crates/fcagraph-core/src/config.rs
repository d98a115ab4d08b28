use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::algo::order::{LowestId, SeededRandom, TieBreak};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub sort: SortConfig,
    #[serde(default)]
    pub random: RandomConfig,
}

/// Frontier selection rule for topological sorting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TieBreakKind {
    #[default]
    LowestId,
    SeededRandom,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortConfig {
    #[serde(default)]
    pub tie_break: TieBreakKind,
    #[serde(default)]
    pub seed: u64,
}

/// Parameters of the random graph generator.
///
/// Each ordered node pair draws an integer in `[0, max_draw]`; the edge is
/// kept iff the draw exceeds `threshold`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RandomConfig {
    #[serde(default = "default_max_draw")]
    pub max_draw: u32,
    #[serde(default = "default_threshold")]
    pub threshold: u32,
    #[serde(default)]
    pub seed: u64,
}

impl Default for RandomConfig {
    fn default() -> Self {
        Self {
            max_draw: default_max_draw(),
            threshold: default_threshold(),
            seed: 0,
        }
    }
}

impl EngineConfig {
    /// Build the configured topological-sort tie-break.
    #[must_use]
    pub fn tie_break(&self) -> Box<dyn TieBreak> {
        match self.sort.tie_break {
            TieBreakKind::LowestId => Box::new(LowestId),
            TieBreakKind::SeededRandom => Box::new(SeededRandom::new(self.sort.seed)),
        }
    }

    /// Parse a TOML document.
    ///
    /// # Errors
    ///
    /// Returns an error if `content` is not valid TOML for this schema.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str::<Self>(content).context("Failed to parse engine config")
    }
}

/// Load the engine configuration at `path`, falling back to defaults when
/// the file does not exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config(path: &Path) -> Result<EngineConfig> {
    if !path.exists() {
        return Ok(EngineConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<EngineConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

const fn default_max_draw() -> u32 {
    10
}

const fn default_threshold() -> u32 {
    5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = load_config(&dir.path().join("engine.toml")).expect("defaults");

        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.random.max_draw, 10);
        assert_eq!(config.random.threshold, 5);
        assert_eq!(config.sort.tie_break, TieBreakKind::LowestId);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("engine.toml");
        std::fs::write(&path, "[sort]\ntie_break = \"seeded-random\"\nseed = 9\n").expect("write");

        let config = load_config(&path).expect("parse");

        assert_eq!(config.sort.tie_break, TieBreakKind::SeededRandom);
        assert_eq!(config.sort.seed, 9);
        assert_eq!(config.random, RandomConfig::default());
    }

    #[test]
    fn invalid_file_reports_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("engine.toml");
        std::fs::write(&path, "[sort]\ntie_break = \"sideways\"\n").expect("write");

        let err = load_config(&path).expect_err("unknown tie-break must fail");

        assert!(format!("{err:#}").contains("engine.toml"));
    }

    #[test]
    fn random_section_parses_from_str() {
        let config =
            EngineConfig::from_toml_str("[random]\nmax_draw = 100\nthreshold = 90\nseed = 3\n")
                .expect("parse");

        assert_eq!(config.random.max_draw, 100);
        assert_eq!(config.random.threshold, 90);
        assert_eq!(config.random.seed, 3);
    }
}
