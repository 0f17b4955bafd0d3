//! TFM segment types.
//!
//! A TFM code is written `+{building}={system}-{component}%{typecode}`.
//! Every segment is optional in free text; this module provides the
//! container for whatever segments were recognized.

use std::fmt;

/// One of the four segments of a TFM code.
///
/// # Examples
///
/// ```
/// use tfm_types::Segment;
///
/// assert_eq!(Segment::System.marker(), '=');
/// assert_eq!(Segment::Typecode.marker(), '%');
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Segment {
    /// Building number, written after `+`.
    Building,
    /// System code, written after `=`.
    System,
    /// Component code, written after `-`.
    Component,
    /// Type code, written after `%`.
    Typecode,
}

impl Segment {
    /// All segments in written order.
    pub const ALL: [Segment; 4] = [
        Segment::Building,
        Segment::System,
        Segment::Component,
        Segment::Typecode,
    ];

    /// Returns the marker character that precedes this segment in a full code.
    pub fn marker(self) -> char {
        match self {
            Self::Building => '+',
            Self::System => '=',
            Self::Component => '-',
            Self::Typecode => '%',
        }
    }

    /// Returns the lowercase name of the segment.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Building => "building",
            Self::System => "system",
            Self::Component => "component",
            Self::Typecode => "typecode",
        }
    }

    /// Parses a segment from its name (case-insensitive).
    ///
    /// Accepts `type` as an alias for `typecode`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "building" => Some(Self::Building),
            "system" => Some(Self::System),
            "component" => Some(Self::Component),
            "typecode" | "type" => Some(Self::Typecode),
            _ => None,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The recognized segments of a single TFM code.
///
/// # Examples
///
/// ```
/// use tfm_types::SegmentSet;
///
/// let set = SegmentSet {
///     building: Some("1234".to_string()),
///     system: Some("360.001".to_string()),
///     component: Some("RTA001".to_string()),
///     typecode: None,
/// };
///
/// assert_eq!(set.to_string(), "+1234=360.001-RTA001");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SegmentSet {
    /// Building number (digits only, no `+`).
    pub building: Option<String>,
    /// System code such as `360.0001` or `360.0001:02`.
    pub system: Option<String>,
    /// Component code such as `RTA4001`.
    pub component: Option<String>,
    /// Type code such as `AB`.
    pub typecode: Option<String>,
}

impl SegmentSet {
    /// Returns the value of the given segment, if present.
    pub fn get(&self, segment: Segment) -> Option<&str> {
        match segment {
            Segment::Building => self.building.as_deref(),
            Segment::System => self.system.as_deref(),
            Segment::Component => self.component.as_deref(),
            Segment::Typecode => self.typecode.as_deref(),
        }
    }

    /// Returns true if no segment is present.
    pub fn is_empty(&self) -> bool {
        Segment::ALL.iter().all(|s| self.get(*s).is_none())
    }
}

impl fmt::Display for SegmentSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in Segment::ALL {
            if let Some(value) = self.get(segment) {
                write!(f, "{}{}", segment.marker(), value)?;
            }
        }
        Ok(())
    }
}
