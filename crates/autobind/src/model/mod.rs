//! Data side of the adapter.
//!
//! - `ObservableList`: ordered items that announce every change
//! - `ItemSelector`: picks the layout of an item's row
//! - `RowKind`, `LayoutId`, `ViewId`: the tokens rows are identified by
//!
//! ```text
//! ┌────────────────┐  collection_changed  ┌─────────────┐  data_set_changed  ┌──────┐
//! │ ObservableList │─────────────────────>│ AutoAdapter │───────────────────>│ Host │
//! └────────────────┘                      └─────────────┘                    └──────┘
//!                                           │  ItemSelector -> RowKind
//! ```

mod observable;
mod row;
mod selector;

pub use observable::{ChangeKind, CollectionChange, CollectionChangedSignal, ObservableList};
pub use row::{LayoutId, RowKind, ViewId};
pub use selector::{selector_fn, FixedLayout, ItemSelector, SelectorFn, SharedSelector};
