//! Quality presets: which levels a show accepts and which it keeps
//! upgrading towards.

use reelback_model::{PackedQualities, QualityCode, QualitySet};

use crate::error::{BacklogError, Result};

/// Validated quality policy of a show.
///
/// `preferred` is always a subset of a non-empty `allowed`. Presets are
/// replaced wholesale on reconfiguration, never edited in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QualityPreset {
    allowed: QualitySet,
    preferred: QualitySet,
}

impl QualityPreset {
    pub fn new(allowed: QualitySet, preferred: QualitySet) -> Result<Self> {
        if allowed.is_empty() {
            return Err(BacklogError::InvalidPreset(
                "allowed qualities must not be empty".to_string(),
            ));
        }
        if !preferred.is_subset(allowed) {
            let stray: Vec<&str> = preferred
                .difference(allowed)
                .iter()
                .map(QualityCode::name)
                .collect();
            return Err(BacklogError::InvalidPreset(format!(
                "preferred qualities not allowed: {}",
                stray.join(", ")
            )));
        }
        Ok(Self { allowed, preferred })
    }

    /// Preset without preferred levels: any allowed quality is final.
    pub fn allowing(allowed: QualitySet) -> Result<Self> {
        Self::new(allowed, QualitySet::empty())
    }

    pub fn from_packed(packed: PackedQualities) -> Result<Self> {
        Self::new(packed.allowed(), packed.preferred())
    }

    pub fn allowed(&self) -> QualitySet {
        self.allowed
    }

    pub fn preferred(&self) -> QualitySet {
        self.preferred
    }

    pub fn packed(&self) -> PackedQualities {
        combine(self.allowed, self.preferred)
    }

    /// Level the show ultimately wants on disk.
    pub fn best_wanted(&self) -> QualityCode {
        if self.preferred.is_empty() {
            best_quality(self.allowed)
        } else {
            best_quality(self.preferred)
        }
    }
}

pub fn combine(allowed: QualitySet, preferred: QualitySet) -> PackedQualities {
    PackedQualities::new(allowed, preferred)
}

/// Allowed and preferred levels as ascending, duplicate-free lists.
pub fn split(packed: PackedQualities) -> (Vec<QualityCode>, Vec<QualityCode>) {
    (
        packed.allowed().iter().collect(),
        packed.preferred().iter().collect(),
    )
}

/// Highest-ranked level of the set, `NONE` when it is empty.
pub fn best_quality(set: QualitySet) -> QualityCode {
    set.highest().unwrap_or(QualityCode::NONE)
}

/// How a show's preset should be shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresetLabel<'a> {
    Named(&'a str),
    Custom {
        allowed: Vec<QualityCode>,
        preferred: Vec<QualityCode>,
    },
}

/// Ordered collection of named presets.
#[derive(Debug, Clone, Default)]
pub struct PresetRegistry {
    entries: Vec<(String, QualityPreset)>,
}

impl PresetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stock presets.
    pub fn standard() -> Self {
        use reelback_model::QualityCode as Q;

        let sd = QualitySet::from_levels(&[Q::SDTV, Q::SDDVD]);
        let hd720p = QualitySet::from_levels(&[Q::HDTV, Q::HDWEBDL, Q::HDBLURAY]);
        let hd1080p = QualitySet::from_levels(&[
            Q::FULLHDTV,
            Q::FULLHDWEBDL,
            Q::FULLHDBLURAY,
        ]);
        let uhd_4k = QualitySet::from_levels(&[
            Q::UHD_4K_TV,
            Q::UHD_4K_WEBDL,
            Q::UHD_4K_BLURAY,
        ]);
        let uhd_8k = QualitySet::from_levels(&[
            Q::UHD_8K_TV,
            Q::UHD_8K_WEBDL,
            Q::UHD_8K_BLURAY,
        ]);
        let hd = hd720p | hd1080p;
        let any = sd | hd;
        let uhd = uhd_4k | uhd_8k;

        let mut registry = Self::new();
        for (name, allowed) in [
            ("any", any),
            ("sd", sd),
            ("hd", hd),
            ("hd720p", hd720p),
            ("hd1080p", hd1080p),
            ("uhd", uhd),
            ("uhd_4k", uhd_4k),
            ("uhd_8k", uhd_8k),
        ] {
            registry.entries.push((
                name.to_string(),
                QualityPreset {
                    allowed,
                    preferred: QualitySet::empty(),
                },
            ));
        }
        registry
    }

    /// Adds or replaces a named preset, keeping registration order.
    pub fn register(&mut self, name: impl Into<String>, preset: QualityPreset) {
        let name = name.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = preset,
            None => self.entries.push((name, preset)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&QualityPreset> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, preset)| preset)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &QualityPreset)> {
        self.entries
            .iter()
            .map(|(name, preset)| (name.as_str(), preset))
    }

    /// True iff `candidate` is exactly the allowed set of a named preset.
    pub fn is_preset(&self, candidate: QualitySet) -> bool {
        self.entries
            .iter()
            .any(|(_, preset)| preset.allowed == candidate)
    }

    /// Named only when both allowed and preferred match a registered preset.
    pub fn describe(&self, preset: &QualityPreset) -> PresetLabel<'_> {
        if let Some((name, _)) =
            self.entries.iter().find(|(_, named)| named == preset)
        {
            return PresetLabel::Named(name);
        }

        let (allowed, preferred) = split(preset.packed());
        PresetLabel::Custom { allowed, preferred }
    }
}
