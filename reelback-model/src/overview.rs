use std::fmt;

/// Display/backlog category an episode falls into for its show's preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OverviewCategory {
    Unaired,
    Skipped,
    Wanted,
    /// Allowed quality on disk, a preferred upgrade is still sought.
    Qual,
    Good,
    GoodArchived,
    Snatched,
    Subtitle,
}

impl OverviewCategory {
    pub const ALL: [OverviewCategory; 8] = [
        OverviewCategory::Unaired,
        OverviewCategory::Skipped,
        OverviewCategory::Wanted,
        OverviewCategory::Qual,
        OverviewCategory::Good,
        OverviewCategory::GoodArchived,
        OverviewCategory::Snatched,
        OverviewCategory::Subtitle,
    ];

    /// Categories that call for a search.
    pub fn is_backlog(self) -> bool {
        matches!(self, OverviewCategory::Wanted | OverviewCategory::Qual)
    }

    pub fn name(self) -> &'static str {
        match self {
            OverviewCategory::Unaired => "unaired",
            OverviewCategory::Skipped => "skipped",
            OverviewCategory::Wanted => "wanted",
            OverviewCategory::Qual => "qual",
            OverviewCategory::Good => "good",
            OverviewCategory::GoodArchived => "good_archived",
            OverviewCategory::Snatched => "snatched",
            OverviewCategory::Subtitle => "subtitle",
        }
    }
}

impl fmt::Display for OverviewCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
