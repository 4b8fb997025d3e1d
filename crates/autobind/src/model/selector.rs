//! Row layout selection.
//!
//! An [`ItemSelector`] maps one item to the layout its row should use. The
//! adapter calls it on every kind query, potentially once per visible row per
//! refresh, so implementations must be pure and cheap.

use std::fmt;
use std::sync::Arc;

use super::row::LayoutId;

/// Chooses the layout for an item's row.
///
/// Any `Fn(&T) -> LayoutId + Send + Sync` closure is a selector.
///
/// # Example
///
/// ```
/// use autobind::model::{ItemSelector, LayoutId};
///
/// enum Message {
///     Text(String),
///     Image(String),
/// }
///
/// const TEXT_ROW: LayoutId = LayoutId(10);
/// const IMAGE_ROW: LayoutId = LayoutId(11);
///
/// let selector = |message: &Message| match message {
///     Message::Text(_) => TEXT_ROW,
///     Message::Image(_) => IMAGE_ROW,
/// };
///
/// assert_eq!(selector.select_layout(&Message::Image("cat.png".into())), IMAGE_ROW);
/// ```
pub trait ItemSelector<T>: Send + Sync {
    /// Returns the layout for `item`. Must be deterministic.
    fn select_layout(&self, item: &T) -> LayoutId;
}

impl<T, F> ItemSelector<T> for F
where
    F: Fn(&T) -> LayoutId + Send + Sync,
{
    fn select_layout(&self, item: &T) -> LayoutId {
        self(item)
    }
}

/// A selector that gives every row the same layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FixedLayout(pub LayoutId);

impl Default for FixedLayout {
    fn default() -> Self {
        Self(LayoutId::SIMPLE_LIST_ITEM)
    }
}

impl<T> ItemSelector<T> for FixedLayout {
    fn select_layout(&self, _item: &T) -> LayoutId {
        self.0
    }
}

/// Shared, type-erased selector as stored by the adapter.
pub type SharedSelector<T> = Arc<dyn ItemSelector<T>>;

/// Wraps a closure so it can be named as a concrete selector type.
pub struct SelectorFn<T> {
    select: Arc<dyn Fn(&T) -> LayoutId + Send + Sync>,
}

impl<T> SelectorFn<T> {
    /// Creates a selector from a closure.
    pub fn new<F>(select: F) -> Self
    where
        F: Fn(&T) -> LayoutId + Send + Sync + 'static,
    {
        Self {
            select: Arc::new(select),
        }
    }
}

impl<T> Clone for SelectorFn<T> {
    fn clone(&self) -> Self {
        Self {
            select: Arc::clone(&self.select),
        }
    }
}

impl<T> fmt::Debug for SelectorFn<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectorFn").finish_non_exhaustive()
    }
}

impl<T> ItemSelector<T> for SelectorFn<T> {
    fn select_layout(&self, item: &T) -> LayoutId {
        (self.select)(item)
    }
}

/// Creates a [`SelectorFn`] from a closure.
pub fn selector_fn<T, F>(select: F) -> SelectorFn<T>
where
    F: Fn(&T) -> LayoutId + Send + Sync + 'static,
{
    SelectorFn::new(select)
}
