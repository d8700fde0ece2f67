use crate::quality::QUALITY_FIELD_BITS;

/// Bits reserved for the status code.
pub const STATUS_BITS: u32 = 8;

/// Packed `(status, quality)` value persisted for every episode.
///
/// Layout, stable across releases:
///
/// ```text
///  31                         8 7        0
/// +----------------------------+----------+
/// |   quality field (24 bits)  |  status  |
/// +----------------------------+----------+
/// ```
///
/// The quality field holds a single level mask (or `NONE` = 0, or the
/// `UNKNOWN` top bit). New quality levels take reserved bits inside the
/// field and never overlap the status byte.
///
/// Values are built by `reelback_core::codec::compose`; this type only
/// carries persisted integers around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct CompositeStatus(u32);

impl CompositeStatus {
    pub const STATUS_MASK: u32 = (1 << STATUS_BITS) - 1;
    pub const QUALITY_SHIFT: u32 = STATUS_BITS;
    pub const QUALITY_MASK: u32 = ((1 << QUALITY_FIELD_BITS) - 1) << STATUS_BITS;

    pub const fn from_raw(raw: u32) -> Self {
        CompositeStatus(raw)
    }

    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Raw status byte, not yet validated.
    pub const fn status_bits(self) -> u8 {
        (self.0 & Self::STATUS_MASK) as u8
    }

    /// Raw quality field, not yet validated.
    pub const fn quality_bits(self) -> u32 {
        (self.0 & Self::QUALITY_MASK) >> Self::QUALITY_SHIFT
    }

    pub const fn from_fields(status_bits: u8, quality_bits: u32) -> Self {
        CompositeStatus(
            ((quality_bits << Self::QUALITY_SHIFT) & Self::QUALITY_MASK)
                | status_bits as u32,
        )
    }
}

impl std::fmt::Display for CompositeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_occupy_disjoint_bits() {
        assert_eq!(
            CompositeStatus::STATUS_MASK & CompositeStatus::QUALITY_MASK,
            0
        );
        assert_eq!(
            CompositeStatus::STATUS_MASK | CompositeStatus::QUALITY_MASK,
            u32::MAX
        );
    }

    #[test]
    fn from_fields_splits_back() {
        let composite = CompositeStatus::from_fields(4, 1 << 5);
        assert_eq!(composite.status_bits(), 4);
        assert_eq!(composite.quality_bits(), 1 << 5);
        assert_eq!(composite.raw(), (1 << 13) | 4);
    }
}
