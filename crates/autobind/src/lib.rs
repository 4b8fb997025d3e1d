//! Autobind - list virtualization and declarative data binding.
//!
//! An [`AutoAdapter`] turns an [`ObservableList`] into the row space a
//! recycling list host renders: optional header and footer rows, an
//! empty-state row, per-item layouts, and binding rules that fill row
//! elements from items.
//!
//! The host side is abstract. Rows are anything implementing
//! [`RowView`](adapter::RowView), and rows are created through an
//! [`Inflater`](adapter::Inflater).
//!
//! # Example
//!
//! ```
//! use autobind::AutoAdapter;
//! use autobind::model::{LayoutId, RowKind, ViewId};
//!
//! const TITLE: ViewId = ViewId(1);
//!
//! let adapter = AutoAdapter::<String>::with_layout(LayoutId(10));
//! adapter.when_empty(LayoutId(11));
//! adapter.bind_text(TITLE, |title| title.clone());
//!
//! assert_eq!(adapter.row_kind(0), Ok(RowKind::Empty));
//!
//! adapter.items().push("Inbox".to_string());
//! assert_eq!(adapter.row_count(), 1);
//! assert_eq!(adapter.row_kind(0), Ok(RowKind::Content(LayoutId(10))));
//! ```

pub mod adapter;
mod error;
pub mod model;

pub use adapter::{AutoAdapter, AutoAdapterBuilder, BindingRule, ItemClickEvent};
pub use autobind_core::{ConnectionGuard, ConnectionId, Handled, Signal};
pub use error::{AdapterError, Result};
pub use model::{ChangeKind, CollectionChange, LayoutId, ObservableList, RowKind, ViewId};
