//! Error types for autobind.

use crate::model::{LayoutId, RowKind};

/// Result type alias for adapter operations.
pub type Result<T> = std::result::Result<T, AdapterError>;

/// Errors raised by the observable collection and the adapter.
///
/// Every variant describes a programming error on the caller's or the host's
/// side. Absent items, callbacks and sub-elements during a bind are not
/// errors and never show up here.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdapterError {
    /// Indexed access into the collection outside `[0, len)`.
    #[error("index {index} is out of range for a collection of length {len}")]
    OutOfRange { index: usize, len: usize },

    /// The host asked about a position past the end of the row space.
    #[error("row position {position} is out of range for {row_count} rows")]
    PositionOutOfRange { position: usize, row_count: usize },

    /// The inflater could not build a row for this layout.
    #[error("no row can be inflated for {0:?}")]
    UnknownLayout(LayoutId),

    /// A row of a synthetic kind was requested but that kind is not configured.
    #[error("row kind {0:?} is not configured on this adapter")]
    Misconfigured(RowKind),

    /// A single-instance header or footer has already been handed to the host.
    #[error("the {0:?} instance has already been handed out")]
    InstanceInUse(RowKind),
}

impl AdapterError {
    /// Create an out-of-range error.
    pub fn out_of_range(index: usize, len: usize) -> Self {
        Self::OutOfRange { index, len }
    }
}
