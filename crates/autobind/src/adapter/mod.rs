//! The virtualization and binding engine.
//!
//! [`AutoAdapter<T>`] sits between an [`ObservableList<T>`] and a rendering
//! host that only materializes visible rows. The host asks it three things:
//!
//! - [`row_count`](AutoAdapter::row_count): how many rows exist
//! - [`row_kind`](AutoAdapter::row_kind): what kind of row a position is
//! - [`bind`](AutoAdapter::bind): fill a (possibly recycled) row for a position
//!
//! and, when it needs a new row, [`create_row`](AutoAdapter::create_row).
//!
//! # Position Space
//!
//! Rows are laid out on one linear index space:
//!
//! ```text
//! empty list + empty layout   [ Empty ]
//! otherwise                   [ Header? ][ item 0 ] ... [ item n-1 ][ Footer? ]
//! ```
//!
//! The empty-state row replaces everything, header and footer included. The
//! header, when shown, always takes position 0.
//!
//! # Invalidation
//!
//! The adapter listens to its list and emits
//! [`data_set_changed`](AutoAdapter::data_set_changed) once for every change,
//! synchronously, before the mutating call returns. There is no positional
//! diffing: the host re-queries count and kinds and rebinds the visible rows.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//!
//! use autobind::adapter::AutoAdapter;
//! use autobind::model::{LayoutId, RowKind, ViewId};
//!
//! const TITLE: ViewId = ViewId(1);
//!
//! let adapter = AutoAdapter::<String>::with_layout(LayoutId(10));
//! adapter.with_header_layout(LayoutId(20));
//! adapter.bind_text(TITLE, |title| title.clone());
//!
//! let refreshes = Arc::new(AtomicUsize::new(0));
//! let counter = refreshes.clone();
//! adapter.data_set_changed().connect(move |_, _| {
//!     counter.fetch_add(1, Ordering::SeqCst);
//! });
//! adapter.item_clicked().connect(|_, event| println!("clicked {}", event.item));
//!
//! adapter.items().push("Inbox".to_string());
//!
//! assert_eq!(refreshes.load(Ordering::SeqCst), 1);
//! assert_eq!(adapter.row_count(), 2);
//! assert_eq!(adapter.row_kind(0), Ok(RowKind::Header));
//! assert_eq!(adapter.row_kind(1), Ok(RowKind::Content(LayoutId(10))));
//! ```

mod binding;
mod builder;
pub mod view;

use std::fmt;
use std::sync::Arc;

use autobind_core::logging::{span_names, targets};
use autobind_core::{PerfSpan, Signal};
use parking_lot::{Mutex, RwLock};

use crate::error::{AdapterError, Result};
use crate::model::{FixedLayout, ItemSelector, LayoutId, ObservableList, RowKind, SharedSelector, ViewId};

pub use binding::{BindAction, BindingRule};
pub use builder::AutoAdapterBuilder;
pub use view::{
    ClickHandler, ImageView, Inflater, LongPressHandler, RowSender, RowView, TextView, View,
    ViewClickHandler,
};

/// Payload of the click and long-press signals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemClickEvent<T> {
    /// The item the row was bound to.
    pub item: T,
    /// The item's position in the list (not the row position).
    pub position: usize,
}

/// Signal carrying item clicks; the sender is the clicked row.
pub type ItemClickSignal<T> = Signal<RowSender, ItemClickEvent<T>>;

/// Signal telling the host to re-query and rebind everything.
pub type InvalidationSignal = Signal<(), ()>;

/// Callback run when the header or footer row is bound.
pub type RowBinder = Arc<dyn Fn(&mut dyn RowView) + Send + Sync>;

/// Where a header or footer row comes from.
enum SyntheticSource {
    /// Inflated from a layout on demand.
    Layout(LayoutId),
    /// A caller-supplied instance, handed to the host at most once.
    Instance(Option<Box<dyn RowView>>),
}

impl fmt::Debug for SyntheticSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Layout(layout) => f.debug_tuple("Layout").field(layout).finish(),
            Self::Instance(slot) => f
                .debug_struct("Instance")
                .field("available", &slot.is_some())
                .finish(),
        }
    }
}

#[derive(Debug)]
struct SyntheticRows {
    empty: Option<LayoutId>,
    header: Option<SyntheticSource>,
    footer: Option<SyntheticSource>,
    header_enabled: bool,
    footer_enabled: bool,
}

impl Default for SyntheticRows {
    fn default() -> Self {
        Self {
            empty: None,
            header: None,
            footer: None,
            header_enabled: true,
            footer_enabled: true,
        }
    }
}

/// Position-space layout computed from one consistent read of the state.
///
/// `header` and `footer` mean configured and enabled. The row space ignores
/// them while `empty_state` is set; binding does not.
#[derive(Debug, Clone, Copy)]
struct Geometry {
    len: usize,
    empty_state: bool,
    header: bool,
    footer: bool,
}

impl Geometry {
    fn row_count(self) -> usize {
        if self.empty_state {
            1
        } else {
            self.len + usize::from(self.header) + usize::from(self.footer)
        }
    }

    fn footer_position(self) -> usize {
        self.len + usize::from(self.header)
    }
}

/// Maps an observable list plus optional empty, header and footer rows onto
/// a row space, and binds rows with declarative rules.
///
/// All methods take `&self`; configuration changes are visible to the very
/// next query. No lock is held while user callbacks (binding rules, header
/// and footer binders, signal slots) run, so they may call back into the
/// adapter or mutate its list.
pub struct AutoAdapter<T> {
    items: ObservableList<T>,
    selector: SharedSelector<T>,
    rows: Mutex<SyntheticRows>,
    bindings: RwLock<Vec<BindingRule<T>>>,
    on_bind_header: RwLock<Option<RowBinder>>,
    on_bind_footer: RwLock<Option<RowBinder>>,
    item_clicked: Arc<ItemClickSignal<T>>,
    item_long_pressed: Arc<ItemClickSignal<T>>,
    data_set_changed: Arc<InvalidationSignal>,
}

impl<T: Clone + Send + Sync + 'static> Default for AutoAdapter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for AutoAdapter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AutoAdapter")
            .field("len", &self.items.len())
            .field("rows", &*self.rows.lock())
            .field("bindings", &self.bindings.read().len())
            .finish_non_exhaustive()
    }
}

impl<T: Clone + Send + Sync + 'static> AutoAdapter<T> {
    /// Creates an adapter whose rows all use [`LayoutId::SIMPLE_LIST_ITEM`].
    pub fn new() -> Self {
        Self::with_selector(FixedLayout::default())
    }

    /// Creates an adapter whose rows all use `layout`.
    pub fn with_layout(layout: LayoutId) -> Self {
        Self::with_selector(FixedLayout(layout))
    }

    /// Creates an adapter that picks each row's layout with `selector`.
    pub fn with_selector<S>(selector: S) -> Self
    where
        S: ItemSelector<T> + 'static,
    {
        Self::from_parts(Arc::new(selector), Vec::new())
    }

    /// Creates a builder for an adapter.
    pub fn builder() -> AutoAdapterBuilder<T> {
        AutoAdapterBuilder::new()
    }

    pub(crate) fn from_parts(selector: SharedSelector<T>, items: Vec<T>) -> Self {
        let items = ObservableList::from_items(items);
        let data_set_changed = Arc::new(InvalidationSignal::new());

        let invalidate = Arc::clone(&data_set_changed);
        items.collection_changed().connect(move |_, change| {
            tracing::debug!(
                target: "autobind::adapter",
                kind = ?change.kind,
                range = ?change.range,
                "items changed, invalidating"
            );
            invalidate.notify(&());
        });

        Self {
            items,
            selector,
            rows: Mutex::new(SyntheticRows::default()),
            bindings: RwLock::new(Vec::new()),
            on_bind_header: RwLock::new(None),
            on_bind_footer: RwLock::new(None),
            item_clicked: Arc::new(Signal::new()),
            item_long_pressed: Arc::new(Signal::new()),
            data_set_changed,
        }
    }

    // -------------------------------------------------------------------------
    // Items and signals
    // -------------------------------------------------------------------------

    /// The list backing the content rows. Mutate it to change the rows.
    pub fn items(&self) -> &ObservableList<T> {
        &self.items
    }

    /// Replaces the list's contents: clears it, then appends `new_items`.
    ///
    /// This emits two changes (a reset, then an insert unless `new_items` is
    /// empty or `None`).
    pub fn update_items(&self, new_items: Option<Vec<T>>) {
        let _span = PerfSpan::new("update_items");
        self.items.clear();
        if let Some(new_items) = new_items {
            self.items.extend(new_items);
        }
    }

    /// The selector that picks content row layouts.
    pub fn selector(&self) -> &SharedSelector<T> {
        &self.selector
    }

    /// Emitted with the clicked row and its item when a bound row is clicked.
    pub fn item_clicked(&self) -> &Arc<ItemClickSignal<T>> {
        &self.item_clicked
    }

    /// Emitted with the pressed row and its item on a long press.
    ///
    /// The row's long-press handler returns whatever this signal's emission
    /// reports, so without a connected slot the press is left unhandled.
    pub fn item_long_pressed(&self) -> &Arc<ItemClickSignal<T>> {
        &self.item_long_pressed
    }

    /// Emitted whenever count, kinds or contents may have changed.
    pub fn data_set_changed(&self) -> &Arc<InvalidationSignal> {
        &self.data_set_changed
    }

    /// Emits [`data_set_changed`](Self::data_set_changed) explicitly.
    ///
    /// Use after configuration changes that do not invalidate on their own
    /// (header, footer and their enabled flags).
    pub fn notify_data_set_changed(&self) {
        tracing::debug!(target: "autobind::adapter", "invalidating");
        self.data_set_changed.notify(&());
    }

    // -------------------------------------------------------------------------
    // Host queries
    // -------------------------------------------------------------------------

    fn geometry(&self) -> Geometry {
        let rows = self.rows.lock();
        let len = self.items.len();
        let empty_state = len == 0 && rows.empty.is_some();
        Geometry {
            len,
            empty_state,
            header: rows.header.is_some() && rows.header_enabled,
            footer: rows.footer.is_some() && rows.footer_enabled,
        }
    }

    /// Returns `true` if a header is configured and enabled.
    pub fn has_header(&self) -> bool {
        let rows = self.rows.lock();
        rows.header.is_some() && rows.header_enabled
    }

    /// Returns `true` if a footer is configured and enabled.
    pub fn has_footer(&self) -> bool {
        let rows = self.rows.lock();
        rows.footer.is_some() && rows.footer_enabled
    }

    /// Returns `true` if the empty-state row is currently the only row.
    pub fn is_showing_empty(&self) -> bool {
        self.geometry().empty_state
    }

    /// Total number of rows the host should lay out.
    pub fn row_count(&self) -> usize {
        self.geometry().row_count()
    }

    /// The kind of row at `position`.
    ///
    /// Evaluated in this order: empty-state, header at 0, footer after the
    /// last item, then the selector's layout for the item. A position with
    /// none of these fails with [`AdapterError::PositionOutOfRange`].
    pub fn row_kind(&self, position: usize) -> Result<RowKind> {
        let geometry = self.geometry();

        if geometry.empty_state {
            return Ok(RowKind::Empty);
        }
        if geometry.header && position == 0 {
            return Ok(RowKind::Header);
        }
        if geometry.footer && position == geometry.footer_position() {
            return Ok(RowKind::Footer);
        }

        let actual = position - usize::from(geometry.header);
        self.items
            .with_item(actual, |item| RowKind::Content(self.selector.select_layout(item)))
            .ok_or_else(|| {
                let err = AdapterError::PositionOutOfRange {
                    position,
                    row_count: geometry.row_count(),
                };
                tracing::warn!(target: "autobind::adapter", %err, "row kind requested past the row space");
                err
            })
    }

    /// Builds a new row for `kind`.
    ///
    /// Content and empty rows, and header or footer rows configured with a
    /// layout, are inflated through `inflater`. A header or footer configured
    /// with an instance hands that instance out once; later requests fail with
    /// [`AdapterError::InstanceInUse`] until a new instance is set.
    pub fn create_row(&self, kind: RowKind, inflater: &dyn Inflater) -> Result<Box<dyn RowView>> {
        let result = self.try_create_row(kind, inflater);
        if let Err(err) = &result {
            tracing::warn!(target: "autobind::adapter", ?kind, %err, "cannot create row");
        }
        result
    }

    fn try_create_row(&self, kind: RowKind, inflater: &dyn Inflater) -> Result<Box<dyn RowView>> {
        let layout = match kind {
            RowKind::Content(layout) => layout,
            RowKind::Empty => self.rows.lock().empty.ok_or(AdapterError::Misconfigured(kind))?,
            RowKind::Header | RowKind::Footer => {
                let mut rows = self.rows.lock();
                let source = if kind == RowKind::Header {
                    &mut rows.header
                } else {
                    &mut rows.footer
                };
                match source {
                    None => return Err(AdapterError::Misconfigured(kind)),
                    Some(SyntheticSource::Layout(layout)) => *layout,
                    Some(SyntheticSource::Instance(slot)) => {
                        return slot.take().ok_or(AdapterError::InstanceInUse(kind));
                    }
                }
            }
        };

        tracing::trace!(target: "autobind::adapter", ?kind, ?layout, "inflating row");
        inflater
            .inflate(layout)
            .ok_or(AdapterError::UnknownLayout(layout))
    }

    /// Fills `row` for `position`.
    ///
    /// Header and footer rows go to their binder, if one is set. Content rows
    /// get click and long-press handlers for their item, then every binding
    /// rule whose element exists in the row, in registration order. Positions
    /// without an item are left untouched.
    ///
    /// The header and footer checks use their configuration, not the row
    /// space. On an empty list the empty-state row at position 0 therefore
    /// goes to the header binder when a header is configured, or else to the
    /// footer binder when a footer is.
    pub fn bind(&self, row: &mut dyn RowView, position: usize) {
        let geometry = self.geometry();
        let _span = tracing::trace_span!(target: targets::ADAPTER, span_names::BIND, position).entered();

        if geometry.header && position == 0 {
            let binder = self.on_bind_header.read().clone();
            if let Some(binder) = binder {
                binder(row);
            }
            return;
        }

        let actual = position - usize::from(geometry.header);
        if geometry.footer && actual == geometry.len {
            let binder = self.on_bind_footer.read().clone();
            if let Some(binder) = binder {
                binder(row);
            }
            return;
        }

        let Some(item) = self.items.get_or_none(actual) else {
            tracing::trace!(target: "autobind::adapter", actual, empty_state = geometry.empty_state, "no item at position");
            return;
        };

        self.attach_click_handlers(row, &item, actual);

        let rules = self.bindings.read().clone();
        for rule in &rules {
            match row.find_view(rule.target()) {
                Some(view) => rule.apply(view, &item, actual, self),
                None => {
                    tracing::trace!(target: "autobind::adapter", target_id = rule.target().get(), "element not in row, skipping rule");
                }
            }
        }
    }

    fn attach_click_handlers(&self, row: &mut dyn RowView, item: &T, position: usize) {
        let event = ItemClickEvent {
            item: item.clone(),
            position,
        };

        let clicked = Arc::clone(&self.item_clicked);
        let click_event = event.clone();
        row.set_on_click(Arc::new(move |sender: &RowSender| {
            clicked.emit(sender, &click_event);
        }));

        let long_pressed = Arc::clone(&self.item_long_pressed);
        row.set_on_long_press(Arc::new(move |sender: &RowSender| {
            long_pressed.emit(sender, &event)
        }));
    }

    // -------------------------------------------------------------------------
    // Synthetic rows
    // -------------------------------------------------------------------------

    /// Shows a row with `layout` instead of everything else while the list is
    /// empty. Emits [`data_set_changed`](Self::data_set_changed).
    pub fn when_empty(&self, layout: LayoutId) {
        self.rows.lock().empty = Some(layout);
        tracing::debug!(target: "autobind::adapter", ?layout, "empty-state row set");
        self.notify_data_set_changed();
    }

    /// Removes the empty-state row. Emits [`data_set_changed`](Self::data_set_changed).
    pub fn clear_empty(&self) {
        self.rows.lock().empty = None;
        self.notify_data_set_changed();
    }

    /// Adds a header row inflated from `layout`.
    pub fn with_header_layout(&self, layout: LayoutId) {
        self.rows.lock().header = Some(SyntheticSource::Layout(layout));
        tracing::debug!(target: "autobind::adapter", ?layout, "header layout set");
    }

    /// Adds a header row backed by a single caller-supplied instance.
    pub fn with_header(&self, row: Box<dyn RowView>) {
        self.rows.lock().header = Some(SyntheticSource::Instance(Some(row)));
        tracing::debug!(target: "autobind::adapter", "header instance set");
    }

    /// Removes the header configuration.
    pub fn remove_header(&self) {
        self.rows.lock().header = None;
    }

    /// Adds a footer row inflated from `layout`.
    pub fn with_footer_layout(&self, layout: LayoutId) {
        self.rows.lock().footer = Some(SyntheticSource::Layout(layout));
        tracing::debug!(target: "autobind::adapter", ?layout, "footer layout set");
    }

    /// Adds a footer row backed by a single caller-supplied instance.
    pub fn with_footer(&self, row: Box<dyn RowView>) {
        self.rows.lock().footer = Some(SyntheticSource::Instance(Some(row)));
        tracing::debug!(target: "autobind::adapter", "footer instance set");
    }

    /// Removes the footer configuration.
    pub fn remove_footer(&self) {
        self.rows.lock().footer = None;
    }

    /// Shows or hides the header without discarding its configuration.
    pub fn set_header_enabled(&self, enabled: bool) {
        self.rows.lock().header_enabled = enabled;
    }

    /// Whether the header is enabled (it may still be unconfigured).
    pub fn header_enabled(&self) -> bool {
        self.rows.lock().header_enabled
    }

    /// Shows or hides the footer without discarding its configuration.
    pub fn set_footer_enabled(&self, enabled: bool) {
        self.rows.lock().footer_enabled = enabled;
    }

    /// Whether the footer is enabled (it may still be unconfigured).
    pub fn footer_enabled(&self) -> bool {
        self.rows.lock().footer_enabled
    }

    /// Sets the callback run when the header row is bound.
    pub fn bind_header<F>(&self, binder: F)
    where
        F: Fn(&mut dyn RowView) + Send + Sync + 'static,
    {
        *self.on_bind_header.write() = Some(Arc::new(binder));
    }

    /// Sets the callback run when the footer row is bound.
    pub fn bind_footer<F>(&self, binder: F)
    where
        F: Fn(&mut dyn RowView) + Send + Sync + 'static,
    {
        *self.on_bind_footer.write() = Some(Arc::new(binder));
    }

    // -------------------------------------------------------------------------
    // Binding rules
    // -------------------------------------------------------------------------

    /// Registers a binding rule. Rules run in registration order.
    pub fn add_binding(&self, rule: BindingRule<T>) {
        tracing::debug!(target: "autobind::adapter", target_id = rule.target().get(), "binding registered");
        self.bindings.write().push(rule);
    }

    /// Registers an action on the element `id`, whatever its type.
    pub fn bind_view<F>(&self, id: ViewId, action: F)
    where
        F: Fn(&mut dyn View, &T, usize, &AutoAdapter<T>) + Send + Sync + 'static,
    {
        self.add_binding(BindingRule::new(id, action));
    }

    /// Registers an action on the element `id` that only runs when it is a `K`.
    pub fn bind_custom<K, F>(&self, id: ViewId, action: F)
    where
        K: View,
        F: Fn(&mut K, &T, usize, &AutoAdapter<T>) + Send + Sync + 'static,
    {
        self.add_binding(BindingRule::custom(id, action));
    }

    /// Sets the text of the element `id` to `value(item)`.
    pub fn bind_text<F>(&self, id: ViewId, value: F)
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        self.add_binding(BindingRule::text(id, value));
    }

    /// Loads the image at `source(item)` into the element `id`.
    pub fn bind_image<F>(&self, id: ViewId, source: F)
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        self.add_binding(BindingRule::image(id, source));
    }

    /// Installs a click handler on the element `id` receiving the item and
    /// its position.
    pub fn bind_click<F>(&self, id: ViewId, on_click: F)
    where
        F: Fn(&T, usize) + Send + Sync + 'static,
    {
        self.add_binding(BindingRule::click(id, on_click));
    }

    /// Number of registered binding rules.
    pub fn binding_count(&self) -> usize {
        self.bindings.read().len()
    }

    /// Removes every binding rule.
    pub fn clear_bindings(&self) {
        self.bindings.write().clear();
    }
}

#[cfg(test)]
mod tests;
