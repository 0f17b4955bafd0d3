//! Mass-list (component registry) item type.

/// One expected component from a project's mass list.
///
/// Mass-list items are read-only input to verification.
///
/// # Examples
///
/// ```
/// use tfm_types::MassListItem;
///
/// let item = MassListItem::new("42", "+1=360.001-RTA001", "360.001", "RTA001");
/// assert!(item.has_system());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MassListItem {
    /// Registry identifier.
    pub id: String,
    /// Full TFM code string.
    pub tfm: String,
    /// System code.
    pub system: String,
    /// Component code.
    pub component: String,
    /// Free-text description, when the source provides one.
    pub description: Option<String>,
}

impl MassListItem {
    /// Creates an item without a description.
    pub fn new(
        id: impl Into<String>,
        tfm: impl Into<String>,
        system: impl Into<String>,
        component: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            tfm: tfm.into(),
            system: system.into(),
            component: component.into(),
            description: None,
        }
    }

    /// Returns true if the item carries a non-empty system code.
    pub fn has_system(&self) -> bool {
        !self.system.trim().is_empty()
    }
}
