//! Backlog aggregation.
//!
//! Rolls per-episode classifications up into per-show counts and the
//! filtered listing of episodes that need a search, then into library-wide
//! totals. Filters are plain values on [`BacklogOptions`] so two passes with
//! different settings can run side by side.

use std::borrow::Borrow;
use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use rayon::prelude::*;
use reelback_model::{
    Episode, EpisodeKey, OverviewCategory, QualityCode, Show, ShowId,
    StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::classify::OverviewClassifier;
use crate::codec::decompose;
use crate::preset::QualityPreset;

/// How far back in air dates the backlog listing reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BacklogPeriod {
    #[default]
    All,
    /// Only episodes that aired within the last N days (inclusive).
    LastDays(u32),
}

impl BacklogPeriod {
    /// Undated episodes pass only when there is no window.
    pub fn admits(self, air_date: Option<NaiveDate>, today: NaiveDate) -> bool {
        match self {
            BacklogPeriod::All => true,
            BacklogPeriod::LastDays(days) => {
                let Some(air_date) = air_date else {
                    return false;
                };
                let earliest = today
                    .checked_sub_days(Days::new(u64::from(days)))
                    .unwrap_or(NaiveDate::MIN);
                air_date >= earliest
            }
        }
    }
}

/// Which backlog categories the listing keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BacklogStatusFilter {
    Wanted,
    Qual,
    #[default]
    All,
}

impl BacklogStatusFilter {
    pub fn admits(self, category: OverviewCategory) -> bool {
        match self {
            BacklogStatusFilter::Wanted => category == OverviewCategory::Wanted,
            BacklogStatusFilter::Qual => category == OverviewCategory::Qual,
            BacklogStatusFilter::All => category.is_backlog(),
        }
    }
}

/// Per-pass settings, threaded explicitly into the aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BacklogOptions {
    pub period: BacklogPeriod,
    pub status: BacklogStatusFilter,
    /// Reference day for the period window.
    pub today: NaiveDate,
    /// Sort show names with their leading article ("The Wire" under T).
    pub sort_articles: bool,
}

impl BacklogOptions {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            period: BacklogPeriod::All,
            status: BacklogStatusFilter::All,
            today,
            sort_articles: false,
        }
    }

    pub fn with_period(mut self, period: BacklogPeriod) -> Self {
        self.period = period;
        self
    }

    pub fn with_status(mut self, status: BacklogStatusFilter) -> Self {
        self.status = status;
        self
    }

    pub fn with_sort_articles(mut self, sort_articles: bool) -> Self {
        self.sort_articles = sort_articles;
        self
    }
}

/// Episode count per overview category.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OverviewCounts(BTreeMap<OverviewCategory, u32>);

impl OverviewCounts {
    pub fn record(&mut self, category: OverviewCategory) {
        *self.0.entry(category).or_default() += 1;
    }

    pub fn get(&self, category: OverviewCategory) -> u32 {
        self.0.get(&category).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (OverviewCategory, u32)> + '_ {
        self.0.iter().map(|(category, count)| (*category, *count))
    }

    pub fn as_map(&self) -> &BTreeMap<OverviewCategory, u32> {
        &self.0
    }
}

/// One row of the backlog listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BacklogEntry {
    pub key: EpisodeKey,
    pub name: String,
    pub air_date: Option<NaiveDate>,
    pub category: OverviewCategory,
    pub status: StatusCode,
    pub quality: QualityCode,
}

/// Result of aggregating one show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowBacklog {
    pub show_id: ShowId,
    pub show_name: String,
    /// Every episode, unfiltered.
    pub counts: OverviewCounts,
    /// Backlog episodes after the status and period filters, newest
    /// season and episode first.
    pub episodes: Vec<BacklogEntry>,
    /// Wanted episodes in `episodes`.
    pub wanted: u32,
    /// Upgrade candidates in `episodes`.
    pub qual: u32,
}

/// Result of aggregating a whole library.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct LibraryBacklog {
    pub shows: Vec<ShowBacklog>,
    pub total_wanted: u32,
    pub total_qual: u32,
}

impl LibraryBacklog {
    pub fn show(&self, show_id: ShowId) -> Option<&ShowBacklog> {
        self.shows.iter().find(|show| show.show_id == show_id)
    }
}

#[derive(Debug, Clone)]
pub struct BacklogAggregator {
    options: BacklogOptions,
    classifier: OverviewClassifier,
}

impl BacklogAggregator {
    pub fn new(options: BacklogOptions) -> Self {
        Self {
            options,
            classifier: OverviewClassifier,
        }
    }

    pub fn options(&self) -> &BacklogOptions {
        &self.options
    }

    /// Classifies every episode of `show` against `preset`.
    pub fn aggregate(&self, show: &Show, preset: &QualityPreset) -> ShowBacklog {
        let mut counts = OverviewCounts::default();
        let mut episodes = Vec::new();

        for episode in show.episodes() {
            let category = self.classifier.classify_episode(episode, preset);
            counts.record(category);

            if self.options.status.admits(category)
                && self.options.period.admits(episode.air_date, self.options.today)
            {
                episodes.push(entry(episode, category));
            }
        }

        episodes.sort_by(|a, b| b.key.cmp(&a.key));

        let wanted = count_in(&episodes, OverviewCategory::Wanted);
        let qual = count_in(&episodes, OverviewCategory::Qual);

        ShowBacklog {
            show_id: show.id,
            show_name: show.name.clone(),
            counts,
            episodes,
            wanted,
            qual,
        }
    }

    /// Aggregates every non-paused show in parallel.
    ///
    /// Each show is classified against the preset decoded from its stored
    /// quality setting; a show whose setting is invalid is skipped and
    /// logged without affecting the others.
    #[instrument(skip_all, fields(shows = shows.len()))]
    pub fn aggregate_library<S>(&self, shows: &[S]) -> LibraryBacklog
    where
        S: Borrow<Show> + Sync,
    {
        let mut results: Vec<ShowBacklog> = shows
            .par_iter()
            .map(|show| Borrow::<Show>::borrow(show))
            .filter(|show| !show.paused)
            .filter_map(|show| match QualityPreset::from_packed(show.quality) {
                Ok(preset) => Some(self.aggregate(show, &preset)),
                Err(err) => {
                    warn!(
                        show_id = %show.id,
                        error = %err,
                        "Skipping show with invalid quality setting"
                    );
                    None
                }
            })
            .collect();

        let sort_articles = self.options.sort_articles;
        results.sort_by_cached_key(|show| {
            sort_key(&show.show_name, sort_articles)
        });

        let total_wanted = results.iter().map(|show| show.wanted).sum();
        let total_qual = results.iter().map(|show| show.qual).sum();
        debug!(total_wanted, total_qual, "Backlog aggregated");

        LibraryBacklog {
            shows: results,
            total_wanted,
            total_qual,
        }
    }
}

fn entry(episode: &Episode, category: OverviewCategory) -> BacklogEntry {
    let (status, quality) = decompose(episode.status);
    BacklogEntry {
        key: episode.key(),
        name: episode.name.clone(),
        air_date: episode.air_date,
        category,
        status,
        quality,
    }
}

fn count_in(entries: &[BacklogEntry], category: OverviewCategory) -> u32 {
    entries
        .iter()
        .filter(|entry| entry.category == category)
        .count() as u32
}

fn sort_key(name: &str, sort_articles: bool) -> String {
    let lowered = name.trim().to_lowercase();
    if sort_articles {
        return lowered;
    }
    for article in ["the ", "a ", "an "] {
        if let Some(rest) = lowered.strip_prefix(article) {
            return rest.trim_start().to_string();
        }
    }
    lowered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn period_window_is_inclusive_and_drops_undated() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let week = BacklogPeriod::LastDays(7);
        assert!(week.admits(NaiveDate::from_ymd_opt(2024, 3, 3), today));
        assert!(!week.admits(NaiveDate::from_ymd_opt(2024, 3, 2), today));
        assert!(!week.admits(None, today));
        assert!(BacklogPeriod::All.admits(None, today));
    }

    #[test]
    fn status_filter_only_admits_backlog_categories() {
        assert!(BacklogStatusFilter::All.admits(OverviewCategory::Qual));
        assert!(!BacklogStatusFilter::All.admits(OverviewCategory::Good));
        assert!(!BacklogStatusFilter::Wanted.admits(OverviewCategory::Qual));
    }

    #[test]
    fn sort_key_strips_articles_unless_asked() {
        assert_eq!(sort_key("The Wire", false), "wire");
        assert_eq!(sort_key("The Wire", true), "the wire");
        assert_eq!(sort_key("Andor", false), "andor");
    }
}
