//! Composite status codec.
//!
//! Packs a [`StatusCode`] and a single [`QualityCode`] into the persisted
//! [`CompositeStatus`] layout and unpacks it again. Decoding never fails:
//! unreadable data degrades to [`StatusCode::Unknown`] /
//! [`QualityCode::UNKNOWN`] so one bad row cannot stop a backlog pass.

use reelback_model::{CompositeStatus, QualityCode, StatusCode};
use tracing::warn;

use crate::error::{BacklogError, Result};

/// Packs `(status, quality)` into a composite value.
pub fn compose(
    status: StatusCode,
    quality: QualityCode,
) -> Result<CompositeStatus> {
    let invalid = |reason| BacklogError::InvalidCombination {
        status,
        quality,
        reason,
    };

    if status == StatusCode::Unknown {
        return Err(invalid("unknown status cannot be stored"));
    }
    if QualityCode::from_bits(quality.bits()).is_none() {
        return Err(invalid("quality must be a single level"));
    }
    if !status.allows_quality() && quality != QualityCode::NONE {
        return Err(invalid("status carries no quality"));
    }
    if status.requires_quality() && quality == QualityCode::NONE {
        return Err(invalid("status requires a quality"));
    }

    Ok(CompositeStatus::from_fields(status.code(), quality.bits()))
}

/// Why a persisted value did not decode cleanly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeAnomaly {
    UnknownStatus(u8),
    UnknownQuality(u32),
    Both { status: u8, quality: u32 },
}

/// Result of [`decompose_checked`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoded {
    pub status: StatusCode,
    pub quality: QualityCode,
    pub anomaly: Option<DecodeAnomaly>,
}

/// Unpacks a composite value, reporting anything that had to be degraded.
pub fn decompose_checked(composite: CompositeStatus) -> Decoded {
    let status_bits = composite.status_bits();
    let quality_bits = composite.quality_bits();

    let status = StatusCode::from_code(status_bits);
    let quality = QualityCode::from_bits(quality_bits);

    let anomaly = match (status == StatusCode::Unknown, quality.is_none()) {
        (false, false) => None,
        (true, false) => Some(DecodeAnomaly::UnknownStatus(status_bits)),
        (false, true) => Some(DecodeAnomaly::UnknownQuality(quality_bits)),
        (true, true) => Some(DecodeAnomaly::Both {
            status: status_bits,
            quality: quality_bits,
        }),
    };

    Decoded {
        status,
        quality: quality.unwrap_or(QualityCode::UNKNOWN),
        anomaly,
    }
}

/// Unpacks a composite value. Total: anomalies are logged and degraded.
pub fn decompose(composite: CompositeStatus) -> (StatusCode, QualityCode) {
    let decoded = decompose_checked(composite);
    if let Some(anomaly) = decoded.anomaly {
        warn!(
            composite = composite.raw(),
            ?anomaly,
            "Unreadable composite status, degrading to unknown"
        );
    }
    (decoded.status, decoded.quality)
}

/// Layout written by earlier releases: `status + 100 * quality`, with the
/// unknown quality at bit 15 instead of the top of the quality field.
#[derive(Debug, Clone, Copy)]
pub struct LegacyLayout;

impl LegacyLayout {
    pub const MULTIPLIER: i64 = 100;
    pub const UNKNOWN_QUALITY: u32 = 1 << 15;

    /// Split a legacy value into raw status and quality numbers.
    pub fn split(raw: i64) -> Option<(u8, u32)> {
        if raw < 0 {
            return None;
        }
        let status = u8::try_from(raw % Self::MULTIPLIER).ok()?;
        let quality = u32::try_from(raw / Self::MULTIPLIER).ok()?;
        Some((status, quality))
    }

    fn quality(bits: u32) -> QualityCode {
        if bits == Self::UNKNOWN_QUALITY {
            return QualityCode::UNKNOWN;
        }
        // Levels kept their bit positions across the layout change.
        match QualityCode::from_bits(bits) {
            Some(code) if code != QualityCode::UNKNOWN => code,
            _ => QualityCode::UNKNOWN,
        }
    }
}

/// Re-encodes a value persisted under [`LegacyLayout`].
///
/// Combinations the current codec forbids are normalised: a quality-bearing
/// status without quality gets `UNKNOWN`, and an unaired episode loses its
/// quality. Values that cannot be read at all become `(Unknown, UNKNOWN)`.
pub fn migrate_legacy(raw: i64) -> CompositeStatus {
    let unreadable = CompositeStatus::from_fields(
        StatusCode::Unknown.code(),
        QualityCode::UNKNOWN.bits(),
    );

    let Some((status_bits, quality_bits)) = LegacyLayout::split(raw) else {
        warn!(raw, "Unreadable legacy composite status");
        return unreadable;
    };

    let status = StatusCode::from_code(status_bits);
    if status == StatusCode::Unknown {
        warn!(raw, status_bits, "Unknown status in legacy composite status");
        return unreadable;
    }

    let mut quality = if quality_bits == 0 {
        QualityCode::NONE
    } else {
        LegacyLayout::quality(quality_bits)
    };
    if !status.allows_quality() {
        quality = QualityCode::NONE;
    } else if status.requires_quality() && quality == QualityCode::NONE {
        quality = QualityCode::UNKNOWN;
    }

    match compose(status, quality) {
        Ok(composite) => composite,
        Err(err) => {
            warn!(raw, error = %err, "Legacy composite status not migratable");
            unreadable
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_pairs() -> Vec<(StatusCode, QualityCode)> {
        let qualities: Vec<QualityCode> = QualityCode::ALL_LEVELS
            .into_iter()
            .chain([QualityCode::NONE, QualityCode::UNKNOWN])
            .collect();
        StatusCode::COMPOSABLE
            .into_iter()
            .flat_map(|status| {
                qualities.iter().map(move |quality| (status, *quality))
            })
            .filter(|(status, quality)| compose(*status, *quality).is_ok())
            .collect()
    }

    #[test]
    fn round_trips_every_valid_pair() {
        let pairs = valid_pairs();
        assert!(!pairs.is_empty());
        for (status, quality) in pairs {
            let composite = compose(status, quality).expect("valid pair");
            assert_eq!(decompose(composite), (status, quality));
            assert_eq!(decompose_checked(composite).anomaly, None);
        }
    }

    #[test]
    fn distinct_pairs_never_collide() {
        let pairs = valid_pairs();
        let mut seen = std::collections::HashMap::new();
        for (status, quality) in pairs {
            let composite = compose(status, quality).expect("valid pair");
            if let Some(previous) = seen.insert(composite, (status, quality)) {
                panic!("{previous:?} and {:?} collide", (status, quality));
            }
        }
    }

    #[test]
    fn rejects_quality_on_unaired() {
        let err = compose(StatusCode::Unaired, QualityCode::HDTV).unwrap_err();
        assert!(matches!(
            err,
            BacklogError::InvalidCombination {
                status: StatusCode::Unaired,
                ..
            }
        ));
        assert!(compose(StatusCode::Unaired, QualityCode::NONE).is_ok());
    }

    #[test]
    fn rejects_quality_sets() {
        let set = QualityCode::from_bits(
            QualityCode::HDTV.bits() | QualityCode::FULLHDTV.bits(),
        );
        assert!(set.is_none());

        let mut bits = QualityCode::HDTV.bits() | QualityCode::FULLHDTV.bits();
        let composite = CompositeStatus::from_fields(4, bits);
        assert_eq!(decompose(composite).1, QualityCode::UNKNOWN);

        bits = 1 << 16;
        let reserved = CompositeStatus::from_fields(4, bits);
        assert_eq!(decompose(reserved).1, QualityCode::UNKNOWN);
    }

    #[test]
    fn rejects_missing_quality_on_downloaded_and_unknown_status() {
        assert!(compose(StatusCode::Downloaded, QualityCode::NONE).is_err());
        assert!(compose(StatusCode::Downloaded, QualityCode::UNKNOWN).is_ok());
        assert!(compose(StatusCode::Unknown, QualityCode::NONE).is_err());
    }

    #[test]
    fn unknown_status_byte_degrades() {
        let composite = CompositeStatus::from_fields(42, QualityCode::HDTV.bits());
        let decoded = decompose_checked(composite);
        assert_eq!(decoded.status, StatusCode::Unknown);
        assert_eq!(decoded.quality, QualityCode::HDTV);
        assert_eq!(decoded.anomaly, Some(DecodeAnomaly::UnknownStatus(42)));
    }

    #[test]
    fn layout_is_stable() {
        let composite =
            compose(StatusCode::Downloaded, QualityCode::FULLHDTV).unwrap();
        assert_eq!(composite.raw(), (16 << 8) | 4);
        let unknown =
            compose(StatusCode::Snatched, QualityCode::UNKNOWN).unwrap();
        assert_eq!(unknown.raw(), (1 << 31) | 2);
    }

    #[test]
    fn migrates_legacy_values() {
        // downloaded at 1080p WEB-DL
        let migrated = migrate_legacy(4 + 100 * 64);
        assert_eq!(
            decompose(migrated),
            (StatusCode::Downloaded, QualityCode::FULLHDWEBDL)
        );

        // legacy unknown quality bit
        let migrated = migrate_legacy(2 + 100 * (1 << 15));
        assert_eq!(
            decompose(migrated),
            (StatusCode::Snatched, QualityCode::UNKNOWN)
        );

        // downloaded without quality gets the unknown sentinel
        let migrated = migrate_legacy(4);
        assert_eq!(
            decompose(migrated),
            (StatusCode::Downloaded, QualityCode::UNKNOWN)
        );

        // plain wanted
        assert_eq!(
            decompose(migrate_legacy(3)),
            (StatusCode::Wanted, QualityCode::NONE)
        );
    }

    #[test]
    fn unreadable_legacy_values_degrade() {
        for raw in [-1, 8, 99] {
            assert_eq!(
                decompose(migrate_legacy(raw)),
                (StatusCode::Unknown, QualityCode::UNKNOWN)
            );
        }
    }
}
