#![allow(dead_code)]

use reelback_core::aggregate::LibraryBacklog;
use reelback_core::codec::compose;
use reelback_core::preset::QualityPreset;
use reelback_model::chrono::NaiveDate;
use reelback_model::prelude::*;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn today() -> NaiveDate {
    date(2024, 6, 30)
}

/// allowed = {720p HDTV, 1080p HDTV}, preferred = {1080p HDTV}
pub fn hd_upgrade_preset() -> QualityPreset {
    QualityPreset::new(
        QualitySet::from_levels(&[QualityCode::HDTV, QualityCode::FULLHDTV]),
        QualitySet::from_levels(&[QualityCode::FULLHDTV]),
    )
    .expect("valid preset")
}

pub fn episode(
    season: u16,
    number: u16,
    status: StatusCode,
    quality: QualityCode,
    air_date: Option<NaiveDate>,
) -> Episode {
    Episode::new(
        EpisodeKey::new(season, number),
        format!("Episode {season}x{number}"),
        air_date,
        compose(status, quality).expect("valid composite"),
    )
}

pub fn show(
    name: &str,
    preset: &QualityPreset,
    episodes: Vec<Episode>,
) -> Show {
    Show::new(ShowId::new(), name, preset.packed(), episodes)
        .expect("valid show")
}

pub fn show_names(backlog: &LibraryBacklog) -> Vec<&str> {
    backlog
        .shows
        .iter()
        .map(|show| show.show_name.as_str())
        .collect()
}

/// One wanted, one upgrade candidate, one good, one unaired.
pub fn mixed_show(name: &str) -> Show {
    show(
        name,
        &hd_upgrade_preset(),
        vec![
            episode(
                1,
                1,
                StatusCode::Downloaded,
                QualityCode::FULLHDTV,
                Some(date(2024, 1, 1)),
            ),
            episode(
                1,
                2,
                StatusCode::Downloaded,
                QualityCode::HDTV,
                Some(date(2024, 6, 25)),
            ),
            episode(
                1,
                3,
                StatusCode::Wanted,
                QualityCode::NONE,
                Some(date(2024, 6, 29)),
            ),
            episode(1, 4, StatusCode::Unaired, QualityCode::NONE, None),
        ],
    )
}
