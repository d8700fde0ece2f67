use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDate;
use reelback_model::{QualityCode, QualitySet};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aggregate::{BacklogOptions, BacklogPeriod, BacklogStatusFilter};
use crate::error::{BacklogError, Result};
use crate::preset::{PresetRegistry, QualityPreset};

/// Backlog settings loaded from a TOML file.
///
/// All fields carry defaults so a partial file (or none at all) is valid.
///
/// ```toml
/// period = { last_days = 30 }
/// status = "wanted"
/// sort_articles = false
///
/// [presets.anime]
/// allowed = ["hdtv", "hdwebdl", "fullhdwebdl"]
/// preferred = ["fullhdwebdl"]
/// ```
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct BacklogConfig {
    /// Air-date window for the backlog listing.
    pub period: BacklogPeriod,
    /// Backlog categories kept in the listing.
    pub status: BacklogStatusFilter,
    /// Sort show names including leading articles.
    pub sort_articles: bool,
    /// Buffered events per subscriber before the oldest are dropped.
    pub event_channel_capacity: usize,
    /// Extra named presets, registered after the stock ones.
    pub presets: BTreeMap<String, PresetConfig>,
}

impl Default for BacklogConfig {
    fn default() -> Self {
        Self {
            period: BacklogPeriod::All,
            status: BacklogStatusFilter::All,
            sort_articles: false,
            event_channel_capacity: 256,
            presets: BTreeMap::new(),
        }
    }
}

/// A named preset as written in the config file.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PresetConfig {
    pub allowed: Vec<QualityCodeName>,
    #[serde(default)]
    pub preferred: Vec<QualityCodeName>,
}

/// Quality level written by its machine name, e.g. `"fullhdtv"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QualityCodeName(pub QualityCode);

impl Serialize for QualityCodeName {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.name())
    }
}

impl<'de> Deserialize<'de> for QualityCodeName {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        let code = raw.parse::<QualityCode>().map_err(serde::de::Error::custom)?;
        if !code.is_level() {
            return Err(serde::de::Error::custom(format!(
                "{raw} is not a selectable quality"
            )));
        }
        Ok(QualityCodeName(code))
    }
}

impl PresetConfig {
    pub fn to_preset(&self) -> Result<QualityPreset> {
        QualityPreset::new(to_set(&self.allowed), to_set(&self.preferred))
    }
}

fn to_set(names: &[QualityCodeName]) -> QualitySet {
    names.iter().map(|name| name.0).collect()
}

impl BacklogConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: BacklogConfig = toml::from_str(raw)
            .map_err(|err| BacklogError::Config(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading backlog config");
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|err| BacklogError::Config(err.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.event_channel_capacity == 0 {
            return Err(BacklogError::Config(
                "event_channel_capacity must be greater than zero".to_string(),
            ));
        }
        for (name, preset) in &self.presets {
            preset.to_preset().map_err(|err| {
                BacklogError::Config(format!("preset {name}: {err}"))
            })?;
        }
        Ok(())
    }

    /// Per-pass options anchored at `today`.
    pub fn options_for(&self, today: NaiveDate) -> BacklogOptions {
        BacklogOptions::new(today)
            .with_period(self.period)
            .with_status(self.status)
            .with_sort_articles(self.sort_articles)
    }

    /// Stock presets plus the configured ones.
    pub fn preset_registry(&self) -> Result<PresetRegistry> {
        let mut registry = PresetRegistry::standard();
        for (name, preset) in &self.presets {
            registry.register(name.clone(), preset.to_preset()?);
        }
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = BacklogConfig::from_toml_str("").expect("defaults");
        assert_eq!(config, BacklogConfig::default());
    }

    #[test]
    fn parses_period_status_and_presets() {
        let config = BacklogConfig::from_toml_str(
            r#"
            period = { last_days = 7 }
            status = "qual"

            [presets.anime]
            allowed = ["hdtv", "fullhdwebdl"]
            preferred = ["fullhdwebdl"]
            "#,
        )
        .expect("valid config");

        assert_eq!(config.period, BacklogPeriod::LastDays(7));
        assert_eq!(config.status, BacklogStatusFilter::Qual);

        let registry = config.preset_registry().expect("valid presets");
        let anime = registry.get("anime").expect("registered");
        assert!(anime.preferred().contains(QualityCode::FULLHDWEBDL));
        assert!(registry.get("hd1080p").is_some());
    }

    #[test]
    fn rejects_invalid_presets_and_capacity() {
        let err = BacklogConfig::from_toml_str(
            r#"
            [presets.broken]
            allowed = ["sdtv"]
            preferred = ["hdtv"]
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("preset broken"));

        assert!(
            BacklogConfig::from_toml_str("event_channel_capacity = 0").is_err()
        );
        assert!(BacklogConfig::from_toml_str("bogus = 1").is_err());
        assert!(
            BacklogConfig::from_toml_str(
                "[presets.x]\nallowed = [\"unknown\"]"
            )
            .is_err()
        );
    }

    #[test]
    fn round_trips_through_toml() {
        let mut config = BacklogConfig {
            period: BacklogPeriod::LastDays(30),
            ..BacklogConfig::default()
        };
        config.presets.insert(
            "mine".to_string(),
            PresetConfig {
                allowed: vec![QualityCodeName(QualityCode::SDTV)],
                preferred: vec![],
            },
        );
        let raw = config.to_toml_string().expect("serialize");
        assert_eq!(BacklogConfig::from_toml_str(&raw).expect("parse"), config);
    }
}
