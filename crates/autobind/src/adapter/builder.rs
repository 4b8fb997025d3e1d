//! Builder for [`AutoAdapter`].

use std::fmt;
use std::sync::Arc;

use super::view::RowView;
use super::{AutoAdapter, RowBinder};
use crate::model::{FixedLayout, ItemSelector, LayoutId, SharedSelector};

enum Synthetic {
    Layout(LayoutId),
    Instance(Box<dyn RowView>),
}

/// Builder for creating an [`AutoAdapter`] with its rows configured up front.
///
/// # Example
///
/// ```
/// use autobind::adapter::AutoAdapter;
/// use autobind::model::{LayoutId, RowKind};
///
/// let adapter = AutoAdapter::builder()
///     .layout(LayoutId(10))
///     .header_layout(LayoutId(20))
///     .footer_layout(LayoutId(30))
///     .items(vec!["a", "b"])
///     .build();
///
/// assert_eq!(adapter.row_count(), 4);
/// assert_eq!(adapter.row_kind(0), Ok(RowKind::Header));
/// assert_eq!(adapter.row_kind(1), Ok(RowKind::Content(LayoutId(10))));
/// assert_eq!(adapter.row_kind(3), Ok(RowKind::Footer));
/// ```
pub struct AutoAdapterBuilder<T> {
    selector: Option<SharedSelector<T>>,
    items: Vec<T>,
    empty: Option<LayoutId>,
    header: Option<Synthetic>,
    footer: Option<Synthetic>,
    header_enabled: bool,
    footer_enabled: bool,
    bind_header: Option<RowBinder>,
    bind_footer: Option<RowBinder>,
}

impl<T> fmt::Debug for AutoAdapterBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AutoAdapterBuilder")
            .field("items", &self.items.len())
            .field("empty", &self.empty)
            .field("header", &self.header.is_some())
            .field("footer", &self.footer.is_some())
            .finish_non_exhaustive()
    }
}

impl<T: Clone + Send + Sync + 'static> Default for AutoAdapterBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + Sync + 'static> AutoAdapterBuilder<T> {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            selector: None,
            items: Vec::new(),
            empty: None,
            header: None,
            footer: None,
            header_enabled: true,
            footer_enabled: true,
            bind_header: None,
            bind_footer: None,
        }
    }

    /// Give every content row the same layout.
    pub fn layout(self, layout: LayoutId) -> Self {
        self.selector(FixedLayout(layout))
    }

    /// Pick each content row's layout with `selector`.
    pub fn selector<S>(mut self, selector: S) -> Self
    where
        S: ItemSelector<T> + 'static,
    {
        self.selector = Some(Arc::new(selector));
        self
    }

    /// Initial items. No change notification is emitted for them.
    pub fn items(mut self, items: Vec<T>) -> Self {
        self.items = items;
        self
    }

    /// Show a row with `layout` while the list is empty.
    pub fn when_empty(mut self, layout: LayoutId) -> Self {
        self.empty = Some(layout);
        self
    }

    /// Add a header inflated from `layout`.
    pub fn header_layout(mut self, layout: LayoutId) -> Self {
        self.header = Some(Synthetic::Layout(layout));
        self
    }

    /// Add a header backed by a single instance.
    pub fn header(mut self, row: Box<dyn RowView>) -> Self {
        self.header = Some(Synthetic::Instance(row));
        self
    }

    /// Add a footer inflated from `layout`.
    pub fn footer_layout(mut self, layout: LayoutId) -> Self {
        self.footer = Some(Synthetic::Layout(layout));
        self
    }

    /// Add a footer backed by a single instance.
    pub fn footer(mut self, row: Box<dyn RowView>) -> Self {
        self.footer = Some(Synthetic::Instance(row));
        self
    }

    /// Start with the header enabled or disabled.
    pub fn header_enabled(mut self, enabled: bool) -> Self {
        self.header_enabled = enabled;
        self
    }

    /// Start with the footer enabled or disabled.
    pub fn footer_enabled(mut self, enabled: bool) -> Self {
        self.footer_enabled = enabled;
        self
    }

    /// Callback run when the header row is bound.
    pub fn bind_header<F>(mut self, binder: F) -> Self
    where
        F: Fn(&mut dyn RowView) + Send + Sync + 'static,
    {
        self.bind_header = Some(Arc::new(binder));
        self
    }

    /// Callback run when the footer row is bound.
    pub fn bind_footer<F>(mut self, binder: F) -> Self
    where
        F: Fn(&mut dyn RowView) + Send + Sync + 'static,
    {
        self.bind_footer = Some(Arc::new(binder));
        self
    }

    /// Builds the adapter.
    pub fn build(self) -> AutoAdapter<T> {
        let selector: SharedSelector<T> = match self.selector {
            Some(selector) => selector,
            None => Arc::new(FixedLayout::default()),
        };
        let adapter = AutoAdapter::from_parts(selector, self.items);

        if let Some(layout) = self.empty {
            adapter.rows.lock().empty = Some(layout);
        }
        match self.header {
            Some(Synthetic::Layout(layout)) => adapter.with_header_layout(layout),
            Some(Synthetic::Instance(row)) => adapter.with_header(row),
            None => {}
        }
        match self.footer {
            Some(Synthetic::Layout(layout)) => adapter.with_footer_layout(layout),
            Some(Synthetic::Instance(row)) => adapter.with_footer(row),
            None => {}
        }
        adapter.set_header_enabled(self.header_enabled);
        adapter.set_footer_enabled(self.footer_enabled);
        *adapter.on_bind_header.write() = self.bind_header;
        *adapter.on_bind_footer.write() = self.bind_footer;
        adapter
    }
}
