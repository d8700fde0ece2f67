//! Quality levels and quality sets.
//!
//! A [`QualityCode`] is one bit of a 24-bit quality field. Defined levels
//! occupy the low bits and rank by ascending bit value, so a plain integer
//! comparison orders them from worst to best. Bits above the last defined
//! level are reserved headroom; the top bit of the field is pinned to
//! [`QualityCode::UNKNOWN`] so that new levels never move the sentinel.

use std::fmt;
use std::ops::BitOr;
use std::str::FromStr;

/// Width of the quality field in bits.
pub const QUALITY_FIELD_BITS: u32 = 24;

/// Mask of every bit assigned to a defined quality level.
const LEVEL_MASK: u32 = (1 << 15) - 1;

/// A single quality level, or one of the two sentinels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct QualityCode(u32);

impl QualityCode {
    /// Quality not set (nothing released or grabbed yet).
    pub const NONE: QualityCode = QualityCode(0);
    pub const SDTV: QualityCode = QualityCode(1 << 0);
    pub const SDDVD: QualityCode = QualityCode(1 << 1);
    /// 720p HDTV
    pub const HDTV: QualityCode = QualityCode(1 << 2);
    /// 1080i HDTV
    pub const RAWHDTV: QualityCode = QualityCode(1 << 3);
    /// 1080p HDTV
    pub const FULLHDTV: QualityCode = QualityCode(1 << 4);
    pub const HDWEBDL: QualityCode = QualityCode(1 << 5);
    pub const FULLHDWEBDL: QualityCode = QualityCode(1 << 6);
    pub const HDBLURAY: QualityCode = QualityCode(1 << 7);
    pub const FULLHDBLURAY: QualityCode = QualityCode(1 << 8);
    pub const UHD_4K_TV: QualityCode = QualityCode(1 << 9);
    pub const UHD_4K_WEBDL: QualityCode = QualityCode(1 << 10);
    pub const UHD_4K_BLURAY: QualityCode = QualityCode(1 << 11);
    pub const UHD_8K_TV: QualityCode = QualityCode(1 << 12);
    pub const UHD_8K_WEBDL: QualityCode = QualityCode(1 << 13);
    pub const UHD_8K_BLURAY: QualityCode = QualityCode(1 << 14);
    /// Unrecognized or unmapped quality. Always the top bit of the field.
    pub const UNKNOWN: QualityCode =
        QualityCode(1 << (QUALITY_FIELD_BITS - 1));

    /// Every defined level, lowest rank first.
    pub const ALL_LEVELS: [QualityCode; 15] = [
        Self::SDTV,
        Self::SDDVD,
        Self::HDTV,
        Self::RAWHDTV,
        Self::FULLHDTV,
        Self::HDWEBDL,
        Self::FULLHDWEBDL,
        Self::HDBLURAY,
        Self::FULLHDBLURAY,
        Self::UHD_4K_TV,
        Self::UHD_4K_WEBDL,
        Self::UHD_4K_BLURAY,
        Self::UHD_8K_TV,
        Self::UHD_8K_WEBDL,
        Self::UHD_8K_BLURAY,
    ];

    /// Interpret raw quality-field bits. Anything that is not `NONE`,
    /// `UNKNOWN` or exactly one defined level yields `None`.
    pub fn from_bits(bits: u32) -> Option<Self> {
        let code = QualityCode(bits);
        if code == Self::NONE || code == Self::UNKNOWN || code.is_level() {
            Some(code)
        } else {
            None
        }
    }

    pub fn bits(self) -> u32 {
        self.0
    }

    /// True for exactly one defined level bit.
    pub fn is_level(self) -> bool {
        self.0.count_ones() == 1 && self.0 & LEVEL_MASK != 0
    }

    pub fn is_sentinel(self) -> bool {
        self == Self::NONE || self == Self::UNKNOWN
    }

    /// Position of the level in ascending order, `None` for sentinels.
    pub fn rank(self) -> Option<u32> {
        self.is_level().then(|| self.0.trailing_zeros())
    }

    /// Stable machine key, used in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            Self::NONE => "none",
            Self::SDTV => "sdtv",
            Self::SDDVD => "sddvd",
            Self::HDTV => "hdtv",
            Self::RAWHDTV => "rawhdtv",
            Self::FULLHDTV => "fullhdtv",
            Self::HDWEBDL => "hdwebdl",
            Self::FULLHDWEBDL => "fullhdwebdl",
            Self::HDBLURAY => "hdbluray",
            Self::FULLHDBLURAY => "fullhdbluray",
            Self::UHD_4K_TV => "uhd_4k_tv",
            Self::UHD_4K_WEBDL => "uhd_4k_webdl",
            Self::UHD_4K_BLURAY => "uhd_4k_bluray",
            Self::UHD_8K_TV => "uhd_8k_tv",
            Self::UHD_8K_WEBDL => "uhd_8k_webdl",
            Self::UHD_8K_BLURAY => "uhd_8k_bluray",
            _ => "unknown",
        }
    }

    /// Display text for quality badges.
    pub fn label(self) -> &'static str {
        match self {
            Self::NONE => "N/A",
            Self::SDTV => "SDTV",
            Self::SDDVD => "SD DVD",
            Self::HDTV => "720p HDTV",
            Self::RAWHDTV => "1080i HDTV",
            Self::FULLHDTV => "1080p HDTV",
            Self::HDWEBDL => "720p WEB-DL",
            Self::FULLHDWEBDL => "1080p WEB-DL",
            Self::HDBLURAY => "720p BluRay",
            Self::FULLHDBLURAY => "1080p BluRay",
            Self::UHD_4K_TV => "4K UHD TV",
            Self::UHD_4K_WEBDL => "4K UHD WEB-DL",
            Self::UHD_4K_BLURAY => "4K UHD BluRay",
            Self::UHD_8K_TV => "8K UHD TV",
            Self::UHD_8K_WEBDL => "8K UHD WEB-DL",
            Self::UHD_8K_BLURAY => "8K UHD BluRay",
            _ => "Unknown",
        }
    }
}

impl fmt::Display for QualityCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Error returned when a quality name does not match any level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownQualityName(pub String);

impl fmt::Display for UnknownQualityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown quality name: {}", self.0)
    }
}

impl std::error::Error for UnknownQualityName {}

impl FromStr for QualityCode {
    type Err = UnknownQualityName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL_LEVELS
            .iter()
            .chain([&Self::NONE, &Self::UNKNOWN])
            .copied()
            .find(|code| code.name() == wanted)
            .ok_or_else(|| UnknownQualityName(s.to_string()))
    }
}

/// Union of zero or more defined quality levels.
///
/// Sentinels are never members: building a set from raw bits masks them
/// off along with any reserved bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct QualitySet(u32);

impl QualitySet {
    pub const fn empty() -> Self {
        QualitySet(0)
    }

    pub fn from_bits(bits: u32) -> Self {
        QualitySet(bits & LEVEL_MASK)
    }

    pub fn from_levels(levels: &[QualityCode]) -> Self {
        levels.iter().copied().collect()
    }

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn contains(self, quality: QualityCode) -> bool {
        quality.is_level() && self.0 & quality.bits() != 0
    }

    /// Adds a level; sentinels are ignored.
    pub fn insert(&mut self, quality: QualityCode) {
        if quality.is_level() {
            self.0 |= quality.bits();
        }
    }

    pub fn union(self, other: QualitySet) -> QualitySet {
        QualitySet(self.0 | other.0)
    }

    pub fn difference(self, other: QualitySet) -> QualitySet {
        QualitySet(self.0 & !other.0)
    }

    pub fn is_subset(self, other: QualitySet) -> bool {
        self.0 & !other.0 == 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Levels in ascending rank order.
    pub fn iter(self) -> impl Iterator<Item = QualityCode> {
        QualityCode::ALL_LEVELS
            .into_iter()
            .filter(move |level| self.contains(*level))
    }

    pub fn highest(self) -> Option<QualityCode> {
        (!self.is_empty())
            .then(|| QualityCode(1 << (31 - self.0.leading_zeros())))
    }

    pub fn lowest(self) -> Option<QualityCode> {
        (!self.is_empty()).then(|| QualityCode(1 << self.0.trailing_zeros()))
    }
}

impl FromIterator<QualityCode> for QualitySet {
    fn from_iter<I: IntoIterator<Item = QualityCode>>(iter: I) -> Self {
        let mut set = QualitySet::empty();
        for quality in iter {
            set.insert(quality);
        }
        set
    }
}

impl BitOr for QualitySet {
    type Output = QualitySet;

    fn bitor(self, rhs: QualitySet) -> QualitySet {
        self.union(rhs)
    }
}

impl BitOr<QualityCode> for QualitySet {
    type Output = QualitySet;

    fn bitor(mut self, rhs: QualityCode) -> QualitySet {
        self.insert(rhs);
        self
    }
}

/// Stored form of a show's quality setting: allowed levels in the low
/// 32 bits, preferred levels in the high 32 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PackedQualities(pub u64);

impl PackedQualities {
    pub fn new(allowed: QualitySet, preferred: QualitySet) -> Self {
        PackedQualities(
            u64::from(allowed.bits()) | (u64::from(preferred.bits()) << 32),
        )
    }

    pub fn allowed(self) -> QualitySet {
        QualitySet::from_bits(self.0 as u32)
    }

    pub fn preferred(self) -> QualitySet {
        QualitySet::from_bits((self.0 >> 32) as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_sits_on_top_of_the_quality_field() {
        assert_eq!(QualityCode::UNKNOWN.bits(), 1 << 23);
        assert!(QualityCode::UNKNOWN.is_sentinel());
        assert!(!QualityCode::UNKNOWN.is_level());
        assert!(
            QualityCode::ALL_LEVELS
                .iter()
                .all(|level| level.bits() < QualityCode::UNKNOWN.bits())
        );
    }

    #[test]
    fn from_bits_rejects_sets_and_reserved_bits() {
        assert_eq!(QualityCode::from_bits(0), Some(QualityCode::NONE));
        assert_eq!(QualityCode::from_bits(1 << 4), Some(QualityCode::FULLHDTV));
        assert_eq!(QualityCode::from_bits(0b101), None);
        assert_eq!(QualityCode::from_bits(1 << 16), None);
    }

    #[test]
    fn set_iterates_lowest_first_and_ignores_sentinels() {
        let set = QualitySet::from_levels(&[
            QualityCode::FULLHDBLURAY,
            QualityCode::SDTV,
            QualityCode::UNKNOWN,
            QualityCode::HDTV,
        ]);
        let levels: Vec<_> = set.iter().collect();
        assert_eq!(
            levels,
            vec![
                QualityCode::SDTV,
                QualityCode::HDTV,
                QualityCode::FULLHDBLURAY
            ]
        );
        assert_eq!(set.highest(), Some(QualityCode::FULLHDBLURAY));
        assert_eq!(set.lowest(), Some(QualityCode::SDTV));
        assert!(!set.contains(QualityCode::UNKNOWN));
    }

    #[test]
    fn packed_qualities_keep_both_halves() {
        let allowed =
            QualitySet::from_levels(&[QualityCode::HDTV, QualityCode::FULLHDTV]);
        let preferred = QualitySet::from_levels(&[QualityCode::FULLHDTV]);
        let packed = PackedQualities::new(allowed, preferred);
        assert_eq!(packed.allowed(), allowed);
        assert_eq!(packed.preferred(), preferred);
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("HDWebDL".parse::<QualityCode>(), Ok(QualityCode::HDWEBDL));
        assert!("720p".parse::<QualityCode>().is_err());
    }
}
