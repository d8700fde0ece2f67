//! Overview classification.
//!
//! Maps `(status, quality, preset)` onto an [`OverviewCategory`]. The
//! mapping is pure and total; whether an upgrade is wanted depends only on
//! set membership and rank, so equal inputs always classify the same way.

use reelback_model::{Episode, OverviewCategory, QualityCode, StatusCode};
use tracing::warn;

use crate::codec::decompose;
use crate::preset::{QualityPreset, best_quality};

/// Stateless classifier; a unit type so it can be shared across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct OverviewClassifier;

impl OverviewClassifier {
    pub fn classify(
        &self,
        status: StatusCode,
        quality: QualityCode,
        preset: &QualityPreset,
    ) -> OverviewCategory {
        classify(status, quality, preset)
    }

    pub fn classify_episode(
        &self,
        episode: &Episode,
        preset: &QualityPreset,
    ) -> OverviewCategory {
        classify_episode(episode, preset)
    }
}

pub fn classify(
    status: StatusCode,
    quality: QualityCode,
    preset: &QualityPreset,
) -> OverviewCategory {
    classify_with(status, quality, preset, false)
}

/// Classifies a stored episode, honouring its manual-search flag.
pub fn classify_episode(
    episode: &Episode,
    preset: &QualityPreset,
) -> OverviewCategory {
    let (status, quality) = decompose(episode.status);
    classify_with(status, quality, preset, episode.manually_searched)
}

fn classify_with(
    status: StatusCode,
    quality: QualityCode,
    preset: &QualityPreset,
    manually_searched: bool,
) -> OverviewCategory {
    match status {
        StatusCode::Unknown => {
            warn!(?quality, "Unknown episode status, treating as skipped");
            OverviewCategory::Skipped
        }
        StatusCode::Unaired => OverviewCategory::Unaired,
        StatusCode::Wanted => OverviewCategory::Wanted,
        StatusCode::Skipped | StatusCode::Ignored | StatusCode::Failed => {
            OverviewCategory::Skipped
        }
        StatusCode::Snatched
        | StatusCode::SnatchedProper
        | StatusCode::SnatchedBest => OverviewCategory::Snatched,
        StatusCode::Downloaded | StatusCode::Archived | StatusCode::Subtitled => {
            classify_on_disk(status, quality, preset, manually_searched)
        }
    }
}

fn classify_on_disk(
    status: StatusCode,
    quality: QualityCode,
    preset: &QualityPreset,
    manually_searched: bool,
) -> OverviewCategory {
    if !quality.is_level() {
        warn!(
            %status,
            ?quality,
            "Episode on disk without a readable quality, treating as skipped"
        );
        return OverviewCategory::Skipped;
    }

    if !preset.allowed().contains(quality) {
        return OverviewCategory::Wanted;
    }

    if !manually_searched && upgrade_wanted(quality, preset) {
        return OverviewCategory::Qual;
    }

    match status {
        StatusCode::Archived => OverviewCategory::GoodArchived,
        StatusCode::Subtitled => OverviewCategory::Subtitle,
        _ => OverviewCategory::Good,
    }
}

fn upgrade_wanted(quality: QualityCode, preset: &QualityPreset) -> bool {
    let preferred = preset.preferred();
    if preferred.is_empty() {
        return false;
    }
    !preferred.contains(quality) || quality < best_quality(preferred)
}
