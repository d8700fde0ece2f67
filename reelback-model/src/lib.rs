//! Core data model definitions shared across reelback crates.
#![allow(missing_docs)]

pub use ::chrono;

pub mod composite;
pub mod error;
pub mod events;
pub mod ids;
pub mod numbers;
pub mod overview;
pub mod prelude;
pub mod quality;
pub mod show;
pub mod status;

pub use composite::CompositeStatus;
pub use error::{ModelError, Result as ModelResult};
pub use events::BacklogEvent;
pub use ids::ShowId;
pub use numbers::{EpisodeNumber, SeasonNumber};
pub use overview::OverviewCategory;
pub use quality::{PackedQualities, QualityCode, QualitySet};
pub use show::{Episode, EpisodeKey, Show};
pub use status::StatusCode;
