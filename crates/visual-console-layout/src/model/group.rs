//! Layout state of a group opener.

use super::ElementId;

/// Index of a group in the engine's group list. Only valid until the next
/// `clear`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupIndex(pub usize);

/// A placed group-open entry plus its layout state.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub id: String,
    /// The group's own button
    pub element: ElementId,
    /// Enclosing group, if the button sits on another group's children row
    pub parent: Option<GroupIndex>,
    pub row_index: usize,
    /// Always `row_index + 1`
    pub child_row_index: usize,
    /// Direct children in arrival order
    pub children: Vec<ElementId>,
    pub is_active: bool,
    pub is_folded: bool,
    /// Children are hidden, either by this group's fold or by an ancestor's
    pub children_concealed: bool,
    pub rendered_width: u32,
    /// Spacer covering the children while they are concealed
    pub placeholder: Option<ElementId>,
}

impl Group {
    pub fn new(id: impl Into<String>, element: ElementId, row_index: usize) -> Self {
        Self {
            id: id.into(),
            element,
            parent: None,
            row_index,
            child_row_index: row_index + 1,
            children: Vec::new(),
            is_active: true,
            is_folded: false,
            children_concealed: false,
            rendered_width: 0,
            placeholder: None,
        }
    }

    pub fn first_child(&self) -> Option<ElementId> {
        self.children.first().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_row_is_below() {
        let group = Group::new("g1", ElementId(3), 2);
        assert_eq!(group.child_row_index, 3);
        assert!(group.is_active);
        assert!(!group.is_folded);
        assert_eq!(group.first_child(), None);
    }
}
