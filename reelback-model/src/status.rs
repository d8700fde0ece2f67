use std::fmt;

/// Lifecycle state of an episode.
///
/// The discriminants are persisted inside [`crate::CompositeStatus`] and
/// must never be renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[repr(u8)]
pub enum StatusCode {
    /// Decode-only sentinel for unreadable persisted data.
    Unknown = 0,
    Unaired = 1,
    Snatched = 2,
    Wanted = 3,
    Downloaded = 4,
    Skipped = 5,
    Archived = 6,
    Ignored = 7,
    /// Re-snatched because a proper/repack release appeared.
    SnatchedProper = 9,
    Subtitled = 10,
    Failed = 11,
    /// Snatched at the best preferred quality.
    SnatchedBest = 12,
}

impl StatusCode {
    /// Every status that can be composed, i.e. all but `Unknown`.
    pub const COMPOSABLE: [StatusCode; 11] = [
        StatusCode::Unaired,
        StatusCode::Snatched,
        StatusCode::Wanted,
        StatusCode::Downloaded,
        StatusCode::Skipped,
        StatusCode::Archived,
        StatusCode::Ignored,
        StatusCode::SnatchedProper,
        StatusCode::Subtitled,
        StatusCode::Failed,
        StatusCode::SnatchedBest,
    ];

    /// Unrecognized codes map to `Unknown` rather than failing.
    pub fn from_code(code: u8) -> Self {
        match code {
            1 => StatusCode::Unaired,
            2 => StatusCode::Snatched,
            3 => StatusCode::Wanted,
            4 => StatusCode::Downloaded,
            5 => StatusCode::Skipped,
            6 => StatusCode::Archived,
            7 => StatusCode::Ignored,
            9 => StatusCode::SnatchedProper,
            10 => StatusCode::Subtitled,
            11 => StatusCode::Failed,
            12 => StatusCode::SnatchedBest,
            _ => StatusCode::Unknown,
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn is_snatched(self) -> bool {
        matches!(
            self,
            StatusCode::Snatched
                | StatusCode::SnatchedProper
                | StatusCode::SnatchedBest
        )
    }

    /// A file for the episode is on disk.
    pub fn is_downloaded_like(self) -> bool {
        matches!(
            self,
            StatusCode::Downloaded | StatusCode::Archived | StatusCode::Subtitled
        )
    }

    /// Statuses that describe a concrete release and therefore carry a
    /// quality (possibly `UNKNOWN`, never `NONE`).
    pub fn requires_quality(self) -> bool {
        self.is_snatched()
            || self.is_downloaded_like()
            || self == StatusCode::Failed
    }

    pub fn allows_quality(self) -> bool {
        !matches!(self, StatusCode::Unaired | StatusCode::Unknown)
    }

    pub fn name(self) -> &'static str {
        match self {
            StatusCode::Unknown => "unknown",
            StatusCode::Unaired => "unaired",
            StatusCode::Snatched => "snatched",
            StatusCode::Wanted => "wanted",
            StatusCode::Downloaded => "downloaded",
            StatusCode::Skipped => "skipped",
            StatusCode::Archived => "archived",
            StatusCode::Ignored => "ignored",
            StatusCode::SnatchedProper => "snatched_proper",
            StatusCode::Subtitled => "subtitled",
            StatusCode::Failed => "failed",
            StatusCode::SnatchedBest => "snatched_best",
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip_and_gaps_are_unknown() {
        for status in StatusCode::COMPOSABLE {
            assert_eq!(StatusCode::from_code(status.code()), status);
        }
        assert_eq!(StatusCode::from_code(8), StatusCode::Unknown);
        assert_eq!(StatusCode::from_code(200), StatusCode::Unknown);
    }

    #[test]
    fn downloaded_ranks_below_archived() {
        assert!(StatusCode::Downloaded < StatusCode::Archived);
    }
}
