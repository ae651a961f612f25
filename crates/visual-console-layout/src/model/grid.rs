//! Rows and columns of placed elements.
//!
//! Positions are kept in two coordinate systems:
//!
//! - the *layout* position, where every entry and gap counts with its width
//!   whether it is visible or not and fold placeholders count nothing,
//! - the *flow* position a row-based host sees, where only visible elements
//!   count.
//!
//! A fold placeholder always spans exactly the elements it hides, so for every
//! visible element both positions agree.

use super::{Element, ElementId, ElementKind, GroupIndex};

/// The console grid: ordered rows of element handles plus the element arena.
#[derive(Debug, Clone, Default)]
pub struct Grid {
    rows: Vec<Vec<ElementId>>,
    elements: Vec<Element>,
}

impl Grid {
    /// A grid holding only the empty row 0.
    pub fn new() -> Self {
        Self {
            rows: vec![Vec::new()],
            elements: Vec::new(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Element handles of a row, left to right
    pub fn row(&self, index: usize) -> &[ElementId] {
        self.rows.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0)
    }

    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id.0)
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Make sure rows up to `index` exist. Returns the indices of the rows
    /// that had to be created.
    pub fn ensure_row(&mut self, index: usize) -> Vec<usize> {
        let created: Vec<usize> = (self.rows.len()..=index).collect();
        while self.rows.len() <= index {
            self.rows.push(Vec::new());
        }
        created
    }

    /// Append an unmeasured element to the end of a row
    pub fn push(
        &mut self,
        row: usize,
        kind: ElementKind,
        parent: Option<GroupIndex>,
        visible: bool,
    ) -> ElementId {
        self.ensure_row(row);
        let id = self.allocate(row, kind, parent, visible);
        self.rows[row].push(id);
        id
    }

    /// Insert an element directly in front of `before` (or at the end of the
    /// row when `before` is not on it)
    pub fn insert_before(
        &mut self,
        row: usize,
        before: ElementId,
        kind: ElementKind,
        visible: bool,
    ) -> ElementId {
        self.ensure_row(row);
        let id = self.allocate(row, kind, None, visible);
        let row_elements = &mut self.rows[row];
        match row_elements.iter().position(|e| *e == before) {
            Some(pos) => row_elements.insert(pos, id),
            None => row_elements.push(id),
        }
        id
    }

    fn allocate(
        &mut self,
        row: usize,
        kind: ElementKind,
        parent: Option<GroupIndex>,
        visible: bool,
    ) -> ElementId {
        let id = ElementId(self.elements.len());
        self.elements.push(Element {
            id,
            row,
            kind,
            parent,
            width: 0,
            natural_width: 0,
            measured: false,
            visible,
        });
        id
    }

    /// Layout x of an element's left edge
    pub fn x_of(&self, id: ElementId) -> u32 {
        self.sum_before(id, Element::layout_width)
    }

    /// Layout x of an element's right edge
    pub fn right_edge(&self, id: ElementId) -> u32 {
        let width = self.element(id).map(Element::layout_width).unwrap_or(0);
        self.x_of(id) + width
    }

    /// Layout right edge of a whole row
    pub fn row_end(&self, row: usize) -> u32 {
        self.row(row)
            .iter()
            .filter_map(|id| self.element(*id))
            .map(Element::layout_width)
            .sum()
    }

    /// Farthest layout right edge across all rows
    pub fn farthest_right_edge(&self) -> u32 {
        (0..self.rows.len())
            .map(|row| self.row_end(row))
            .max()
            .unwrap_or(0)
    }

    fn sum_before(&self, id: ElementId, width: impl Fn(&Element) -> u32) -> u32 {
        let Some(element) = self.element(id) else {
            return 0;
        };
        self.row(element.row)
            .iter()
            .take_while(|e| **e != id)
            .filter_map(|e| self.element(*e))
            .map(width)
            .sum()
    }
}
