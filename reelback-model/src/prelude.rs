//! Snapshot of the model surface for rendering and storage adapters.
//! Prefer importing from this module instead of individual tree nodes.

pub use super::composite::CompositeStatus;
pub use super::events::BacklogEvent;
pub use super::ids::ShowId;
pub use super::numbers::{EpisodeNumber, SeasonNumber};
pub use super::overview::OverviewCategory;
pub use super::quality::{PackedQualities, QualityCode, QualitySet};
pub use super::show::{Episode, EpisodeKey, Show};
pub use super::status::StatusCode;
