//! Identifiers for layouts, sub-elements and row kinds.

use std::fmt;

/// Identifies a row layout the inflater knows how to build.
///
/// This stands in for a layout resource id. The numeric value is opaque to
/// the adapter; it is only compared and handed back to the inflater.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayoutId(pub u32);

impl LayoutId {
    /// The single-line list item layout used when no selector is given.
    pub const SIMPLE_LIST_ITEM: LayoutId = LayoutId(1);

    /// Returns the raw value.
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for LayoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LayoutId({})", self.0)
    }
}

/// Identifies a named sub-element inside a row (a label, an icon, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ViewId(pub u32);

impl ViewId {
    /// Returns the raw value.
    pub fn get(self) -> u32 {
        self.0
    }
}

/// The kind of row that occupies a position.
///
/// Hosts use this to pick a layout when creating a row and to decide whether
/// a recycled row can be reused for a position: rows are only interchangeable
/// when their kinds compare equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RowKind {
    /// A row backed by an item, with the layout chosen by the selector.
    Content(LayoutId),
    /// The placeholder shown in place of everything when the list is empty.
    Empty,
    /// The header row at position 0.
    Header,
    /// The footer row after the last item.
    Footer,
}

impl RowKind {
    /// Returns `true` for empty, header and footer rows.
    pub fn is_synthetic(self) -> bool {
        !matches!(self, Self::Content(_))
    }

    /// Returns the selector's layout for content rows.
    pub fn content_layout(self) -> Option<LayoutId> {
        match self {
            Self::Content(layout) => Some(layout),
            _ => None,
        }
    }
}
