use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::ids::ShowId;
use crate::overview::OverviewCategory;

/// Logical notifications emitted after a backlog pass.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum BacklogEvent {
    BacklogUpdated {
        show_id: ShowId,
        counts: BTreeMap<OverviewCategory, u32>,
        emitted_at: DateTime<Utc>,
    },
    LibraryTotals {
        wanted: u32,
        qual: u32,
        emitted_at: DateTime<Utc>,
    },
}

impl BacklogEvent {
    pub fn show_id(&self) -> Option<ShowId> {
        match self {
            BacklogEvent::BacklogUpdated { show_id, .. } => Some(*show_id),
            BacklogEvent::LibraryTotals { .. } => None,
        }
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_kind_tag() {
        let event = BacklogEvent::LibraryTotals {
            wanted: 3,
            qual: 1,
            emitted_at: DateTime::<Utc>::UNIX_EPOCH,
        };
        let json = serde_json::to_value(&event).expect("serialize");
        assert_eq!(json["kind"], "library_totals");
        assert_eq!(json["wanted"], 3);
    }
}
