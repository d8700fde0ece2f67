//! # reelback core
//!
//! Episode status bookkeeping for a library of shows: the composite
//! status/quality codec, quality presets, the overview classifier and the
//! backlog aggregator that turns per-episode state into "wanted" and
//! "upgrade available" listings.
//!
//! ## Architecture
//!
//! - [`codec`]: packs `(status, quality)` into the persisted
//!   [`CompositeStatus`](reelback_model::CompositeStatus) and back
//! - [`preset`]: allowed/preferred quality policies and the named registry
//! - [`classify`]: maps an episode onto an
//!   [`OverviewCategory`](reelback_model::OverviewCategory)
//! - [`aggregate`]: per-show and library-wide backlog roll-ups
//! - [`config`]: TOML-backed settings for backlog passes
//! - [`store`], [`events`], [`service`]: collaborator seams and the
//!   service gluing them together
//!
//! ## Example
//!
//! ```no_run
//! use reelback_core::aggregate::{BacklogAggregator, BacklogOptions};
//! use reelback_core::codec::compose;
//! use reelback_core::preset::QualityPreset;
//! use reelback_model::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let allowed =
//!     QualitySet::from_levels(&[QualityCode::HDTV, QualityCode::FULLHDTV]);
//! let preferred = QualitySet::from_levels(&[QualityCode::FULLHDTV]);
//! let preset = QualityPreset::new(allowed, preferred)?;
//!
//! let episode = Episode::new(
//!     EpisodeKey::new(1, 1),
//!     "Pilot",
//!     None,
//!     compose(StatusCode::Downloaded, QualityCode::HDTV)?,
//! );
//! let show =
//!     Show::new(ShowId::new(), "Example", preset.packed(), vec![episode])?;
//!
//! let today = reelback_model::chrono::Utc::now().date_naive();
//! let backlog = BacklogAggregator::new(BacklogOptions::new(today))
//!     .aggregate(&show, &preset);
//! assert_eq!(backlog.qual, 1);
//! # Ok(())
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

/// Overview and backlog roll-ups
pub mod aggregate;

/// Episode classification into overview categories
pub mod classify;

/// Composite status codec and legacy migration
pub mod codec;

/// Backlog settings
pub mod config;

/// Error types
pub mod error;

/// Notification seam and in-process event bus
pub mod events;

/// Quality presets and registry
pub mod preset;

/// Backlog service combining store, aggregator and events
pub mod service;

/// Storage seam and in-memory store
pub mod store;

pub use error::{BacklogError, Result};
