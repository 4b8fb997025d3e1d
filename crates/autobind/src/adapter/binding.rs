//! Declarative binding rules.
//!
//! A [`BindingRule`] pairs a sub-element id with an action. On every bind the
//! adapter looks the element up in the row and, if the row's layout has it,
//! runs the action with the element, the item, the item's position in the
//! list and the adapter itself. Rules are written once and shared across row
//! kinds, so a missing element is skipped rather than reported.

use std::fmt;
use std::sync::Arc;

use super::view::View;
use super::AutoAdapter;
use crate::model::ViewId;

/// The action half of a binding rule.
pub type BindAction<T> = Arc<dyn Fn(&mut dyn View, &T, usize, &AutoAdapter<T>) + Send + Sync>;

/// A `(target, action)` pair applied while binding rows.
pub struct BindingRule<T> {
    target: ViewId,
    action: BindAction<T>,
}

impl<T> Clone for BindingRule<T> {
    fn clone(&self) -> Self {
        Self {
            target: self.target,
            action: Arc::clone(&self.action),
        }
    }
}

impl<T> fmt::Debug for BindingRule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingRule")
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

impl<T: 'static> BindingRule<T> {
    /// Creates a rule that runs `action` on the element `target`.
    pub fn new<F>(target: ViewId, action: F) -> Self
    where
        F: Fn(&mut dyn View, &T, usize, &AutoAdapter<T>) + Send + Sync + 'static,
    {
        Self {
            target,
            action: Arc::new(action),
        }
    }

    /// Creates a rule that only runs when the element is a `K`.
    pub fn custom<K, F>(target: ViewId, action: F) -> Self
    where
        K: View,
        F: Fn(&mut K, &T, usize, &AutoAdapter<T>) + Send + Sync + 'static,
    {
        Self::new(target, move |view, item, position, adapter| {
            if let Some(view) = view.as_any_mut().downcast_mut::<K>() {
                action(view, item, position, adapter);
            }
        })
    }

    /// Creates a rule that sets the element's text, if it shows text.
    pub fn text<F>(target: ViewId, value: F) -> Self
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        Self::new(target, move |view, item, _, _| {
            if let Some(text) = view.as_text() {
                text.set_text(&value(item));
            }
        })
    }

    /// Creates a rule that loads an image into the element, if it shows images.
    pub fn image<F>(target: ViewId, source: F) -> Self
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        Self::new(target, move |view, item, _, _| {
            if let Some(image) = view.as_image() {
                image.load(&source(item));
            }
        })
    }

    /// The element this rule targets.
    pub fn target(&self) -> ViewId {
        self.target
    }

    pub(crate) fn apply(&self, view: &mut dyn View, item: &T, position: usize, adapter: &AutoAdapter<T>) {
        (self.action)(view, item, position, adapter);
    }
}

impl<T: Clone + Send + Sync + 'static> BindingRule<T> {
    /// Creates a rule that installs a click handler on the element.
    ///
    /// The handler receives the item and position the row was bound to.
    pub fn click<F>(target: ViewId, on_click: F) -> Self
    where
        F: Fn(&T, usize) + Send + Sync + 'static,
    {
        let on_click = Arc::new(on_click);
        Self::new(target, move |view, item, position, _| {
            let on_click = Arc::clone(&on_click);
            let item = item.clone();
            view.set_on_click(Arc::new(move || on_click(&item, position)));
        })
    }
}
