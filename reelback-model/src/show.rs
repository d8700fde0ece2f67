use std::collections::HashSet;
use std::fmt;

use chrono::NaiveDate;

use crate::composite::CompositeStatus;
use crate::error::{ModelError, Result};
use crate::ids::ShowId;
use crate::numbers::{EpisodeNumber, SeasonNumber};
use crate::quality::PackedQualities;

/// Episode identity within a show
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EpisodeKey {
    pub season: SeasonNumber,
    pub episode: EpisodeNumber,
}

impl EpisodeKey {
    pub fn new(season: u16, episode: u16) -> Self {
        Self {
            season: SeasonNumber::new(season),
            episode: EpisodeNumber::new(episode),
        }
    }
}

impl fmt::Display for EpisodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{:02}", self.season, self.episode.value())
    }
}

/// Episode record as supplied by the storage layer.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Episode {
    pub season: SeasonNumber,
    pub episode: EpisodeNumber,
    /// Display only, passed through untouched.
    pub name: String,
    pub air_date: Option<NaiveDate>,
    pub status: CompositeStatus,
    /// The current release was picked by hand; automatic upgrades are off.
    #[cfg_attr(feature = "serde", serde(default))]
    pub manually_searched: bool,
}

impl Episode {
    pub fn new(
        key: EpisodeKey,
        name: impl Into<String>,
        air_date: Option<NaiveDate>,
        status: CompositeStatus,
    ) -> Self {
        Self {
            season: key.season,
            episode: key.episode,
            name: name.into(),
            air_date,
            status,
            manually_searched: false,
        }
    }

    pub fn key(&self) -> EpisodeKey {
        EpisodeKey {
            season: self.season,
            episode: self.episode,
        }
    }
}

/// Show snapshot: quality setting plus its ordered episodes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "ShowRecord"))]
pub struct Show {
    pub id: ShowId,
    pub name: String,
    /// Paused shows are left out of backlog listings and totals.
    pub paused: bool,
    pub quality: PackedQualities,
    episodes: Vec<Episode>,
}

impl Show {
    /// Builds a show, rejecting duplicate `(season, episode)` keys.
    pub fn new(
        id: ShowId,
        name: impl Into<String>,
        quality: PackedQualities,
        episodes: Vec<Episode>,
    ) -> Result<Self> {
        let mut seen = HashSet::with_capacity(episodes.len());
        for episode in &episodes {
            if !seen.insert(episode.key()) {
                return Err(ModelError::DuplicateEpisode(episode.key()));
            }
        }

        Ok(Self {
            id,
            name: name.into(),
            paused: false,
            quality,
            episodes,
        })
    }

    pub fn with_paused(mut self, paused: bool) -> Self {
        self.paused = paused;
        self
    }

    pub fn episodes(&self) -> &[Episode] {
        &self.episodes
    }

    pub fn episode(&self, key: EpisodeKey) -> Option<&Episode> {
        self.episodes.iter().find(|episode| episode.key() == key)
    }
}

/// Wire shape of [`Show`]; deserialised shows go through [`Show::new`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct ShowRecord {
    id: ShowId,
    name: String,
    paused: bool,
    quality: PackedQualities,
    episodes: Vec<Episode>,
}

#[cfg(feature = "serde")]
impl TryFrom<ShowRecord> for Show {
    type Error = ModelError;

    fn try_from(record: ShowRecord) -> Result<Self> {
        Ok(Show::new(record.id, record.name, record.quality, record.episodes)?
            .with_paused(record.paused))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn episode(season: u16, number: u16) -> Episode {
        Episode::new(
            EpisodeKey::new(season, number),
            format!("Episode {number}"),
            None,
            CompositeStatus::from_raw(3),
        )
    }

    #[test]
    fn rejects_duplicate_episode_keys() {
        let result = Show::new(
            ShowId::new(),
            "Arcane",
            PackedQualities::default(),
            vec![episode(1, 1), episode(1, 2), episode(1, 1)],
        );
        assert_eq!(
            result.unwrap_err(),
            ModelError::DuplicateEpisode(EpisodeKey::new(1, 1))
        );
    }

    #[test]
    fn keeps_episode_order() {
        let show = Show::new(
            ShowId::new(),
            "Arcane",
            PackedQualities::default(),
            vec![episode(2, 1), episode(1, 1)],
        )
        .expect("valid show");
        assert_eq!(show.episodes()[0].key(), EpisodeKey::new(2, 1));
        assert!(show.episode(EpisodeKey::new(1, 1)).is_some());
        assert!(!show.paused);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialising_rejects_duplicate_episode_keys() {
        let show = Show::new(
            ShowId::new(),
            "Arcane",
            PackedQualities::default(),
            vec![episode(1, 1)],
        )
        .expect("valid show")
        .with_paused(true);

        let mut value = serde_json::to_value(&show).expect("serialize");
        let restored: Show =
            serde_json::from_value(value.clone()).expect("deserialize");
        assert_eq!(restored, show);

        let episodes = value["episodes"].as_array_mut().expect("episode list");
        let copy = episodes[0].clone();
        episodes.push(copy);
        let err = serde_json::from_value::<Show>(value).unwrap_err();
        assert!(err.to_string().contains("duplicate episode 1x01"));
    }

    #[test]
    fn key_displays_like_season_by_episode() {
        assert_eq!(EpisodeKey::new(3, 7).to_string(), "3x07");
    }
}
