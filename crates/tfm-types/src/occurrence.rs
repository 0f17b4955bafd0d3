//! Parsed component occurrences.
//!
//! An occurrence is one component mention found while scanning a document,
//! together with the system/building context it was resolved to and how
//! directly that context was observed.

use crate::SegmentSet;

/// How the system context of an occurrence was resolved.
///
/// Variants are listed from most to least specific. Each carries a fixed
/// confidence, see [`MatchKind::confidence`].
///
/// # Examples
///
/// ```
/// use tfm_types::MatchKind;
///
/// assert_eq!(MatchKind::Inline.confidence(), 0.95);
/// assert_eq!(MatchKind::Context.as_str(), "context");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MatchKind {
    /// Full code written in one span (`+B=S-C%T`).
    Inline,
    /// System code found shortly before the component on the same line.
    SameLine,
    /// System carried over from a recent line.
    Context,
    /// Caller-supplied default system, or no system at all.
    Default,
}

impl MatchKind {
    /// Confidence for an inline full code.
    pub const INLINE_CONFIDENCE: f64 = 0.95;
    /// Confidence for a same-line system.
    pub const SAME_LINE_CONFIDENCE: f64 = 0.9;
    /// Confidence for a carried-over system.
    pub const CONTEXT_CONFIDENCE: f64 = 0.7;
    /// Confidence for the caller's default system.
    pub const DEFAULT_CONFIDENCE: f64 = 0.5;
    /// Confidence for a component with no system at all.
    pub const UNRESOLVED_CONFIDENCE: f64 = 0.3;

    /// Returns the confidence associated with this kind.
    pub fn confidence(self) -> f64 {
        match self {
            Self::Inline => Self::INLINE_CONFIDENCE,
            Self::SameLine => Self::SAME_LINE_CONFIDENCE,
            Self::Context => Self::CONTEXT_CONFIDENCE,
            Self::Default => Self::DEFAULT_CONFIDENCE,
        }
    }

    /// Returns the lowercase tag used in reports.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Inline => "inline",
            Self::SameLine => "sameline",
            Self::Context => "context",
            Self::Default => "default",
        }
    }
}

/// A component mention resolved during a document scan.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Occurrence {
    /// The component code text. Never empty.
    pub code: String,
    /// Resolved system context.
    pub system: Option<String>,
    /// Resolved building context.
    pub building: Option<String>,
    /// Type code attached to the component.
    pub typecode: Option<String>,
    /// Confidence in `[0, 1]`.
    pub confidence: f64,
    /// How the system context was resolved.
    pub match_kind: MatchKind,
}

impl Occurrence {
    /// Creates an occurrence whose confidence is the one associated with `match_kind`.
    pub fn new(code: impl Into<String>, match_kind: MatchKind) -> Self {
        Self {
            code: code.into(),
            system: None,
            building: None,
            typecode: None,
            confidence: match_kind.confidence(),
            match_kind,
        }
    }

    /// Creates a default-kind occurrence that carries no system.
    pub fn unresolved(code: impl Into<String>) -> Self {
        Self {
            confidence: MatchKind::UNRESOLVED_CONFIDENCE,
            ..Self::new(code, MatchKind::Default)
        }
    }

    /// Sets the system context.
    pub fn with_system(mut self, system: Option<String>) -> Self {
        self.system = system;
        self
    }

    /// Sets the building context.
    pub fn with_building(mut self, building: Option<String>) -> Self {
        self.building = building;
        self
    }

    /// Sets the type code.
    pub fn with_typecode(mut self, typecode: Option<String>) -> Self {
        self.typecode = typecode;
        self
    }

    /// Returns true if a system context was resolved.
    pub fn is_resolved(&self) -> bool {
        self.system.is_some()
    }

    /// Returns the occurrence as a segment set.
    pub fn segments(&self) -> SegmentSet {
        SegmentSet {
            building: self.building.clone(),
            system: self.system.clone(),
            component: Some(self.code.clone()),
            typecode: self.typecode.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidences_are_ordered() {
        let kinds = [
            MatchKind::Inline,
            MatchKind::SameLine,
            MatchKind::Context,
            MatchKind::Default,
        ];
        for pair in kinds.windows(2) {
            assert!(pair[0].confidence() > pair[1].confidence());
        }
        assert!(MatchKind::UNRESOLVED_CONFIDENCE < MatchKind::DEFAULT_CONFIDENCE);
    }

    #[test]
    fn test_occurrence_builders() {
        let occ = Occurrence::new("RTA001", MatchKind::Context)
            .with_system(Some("360.001".to_string()))
            .with_typecode(Some("AB".to_string()));

        assert!(occ.is_resolved());
        assert_eq!(occ.confidence, 0.7);
        assert_eq!(occ.segments().to_string(), "=360.001-RTA001%AB");
    }

    #[test]
    fn test_unresolved_occurrence() {
        let occ = Occurrence::unresolved("KA001");
        assert!(!occ.is_resolved());
        assert_eq!(occ.match_kind, MatchKind::Default);
        assert_eq!(occ.confidence, MatchKind::UNRESOLVED_CONFIDENCE);
    }
}
