//! Segment selection for the configurable extractor.

use crate::{Segment, SegmentSet};

/// Which segments a configurable extraction should produce.
///
/// The composed output key contains only the selected segments, each
/// prefixed by its marker character.
///
/// # Examples
///
/// ```
/// use tfm_types::{SegmentMask, SegmentSet};
///
/// let mask = SegmentMask::system_component();
/// let set = SegmentSet {
///     building: Some("1".to_string()),
///     system: Some("360.001".to_string()),
///     component: Some("RTA001".to_string()),
///     typecode: Some("AB".to_string()),
/// };
///
/// assert_eq!(mask.compose(&set), "=360.001-RTA001");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SegmentMask {
    /// Include the building segment.
    pub building: bool,
    /// Include the system segment.
    pub system: bool,
    /// Include the component segment.
    pub component: bool,
    /// Include the type code segment.
    pub typecode: bool,
    /// Discard structured matches that carry no component.
    pub require_component: bool,
}

impl SegmentMask {
    /// Only bare component codes.
    pub fn component_only() -> Self {
        Self {
            component: true,
            ..Default::default()
        }
    }

    /// Only system codes.
    pub fn system_only() -> Self {
        Self {
            system: true,
            ..Default::default()
        }
    }

    /// System and component, with the component required.
    pub fn system_component() -> Self {
        Self {
            system: true,
            component: true,
            require_component: true,
            ..Default::default()
        }
    }

    /// All four segments, with the component required.
    pub fn full() -> Self {
        Self {
            building: true,
            system: true,
            component: true,
            typecode: true,
            require_component: true,
        }
    }

    /// Builds a mask from a list of segments.
    ///
    /// The component is required whenever it is selected together with the system.
    pub fn from_segments(segments: &[Segment]) -> Self {
        let mut mask = Self::default();
        for segment in segments {
            match segment {
                Segment::Building => mask.building = true,
                Segment::System => mask.system = true,
                Segment::Component => mask.component = true,
                Segment::Typecode => mask.typecode = true,
            }
        }
        mask.require_component = mask.system && mask.component;
        mask
    }

    /// Returns true if the given segment is selected.
    pub fn includes(&self, segment: Segment) -> bool {
        match segment {
            Segment::Building => self.building,
            Segment::System => self.system,
            Segment::Component => self.component,
            Segment::Typecode => self.typecode,
        }
    }

    /// Returns true if the component is the only selected segment.
    pub fn is_component_only(&self) -> bool {
        self.component && !self.system && !self.building && !self.typecode
    }

    /// Composes the output key from the selected, present segments.
    pub fn compose(&self, segments: &SegmentSet) -> String {
        let mut key = String::new();
        for segment in Segment::ALL {
            if !self.includes(segment) {
                continue;
            }
            if let Some(value) = segments.get(segment) {
                key.push(segment.marker());
                key.push_str(value);
            }
        }
        key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_segments_requires_component_with_system() {
        let mask = SegmentMask::from_segments(&[Segment::System, Segment::Component]);
        assert!(mask.require_component);
        assert!(!mask.is_component_only());

        let mask = SegmentMask::from_segments(&[Segment::Component]);
        assert!(!mask.require_component);
        assert!(mask.is_component_only());
    }

    #[test]
    fn test_compose_skips_missing_segments() {
        let set = SegmentSet {
            building: None,
            system: Some("360.001".to_string()),
            component: None,
            typecode: None,
        };
        assert_eq!(SegmentMask::full().compose(&set), "=360.001");
    }
}
