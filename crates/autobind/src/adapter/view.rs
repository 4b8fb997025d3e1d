//! Seams between the adapter and the rendering host.
//!
//! The host owns concrete rows. The adapter only sees them through these
//! traits while a bind call is running:
//!
//! - [`RowView`]: one row instance, able to look up its sub-elements by
//!   [`ViewId`] and to hold click and long-press handlers
//! - [`View`]: one sub-element, optionally exposing a text or image sink
//! - [`Inflater`]: builds a fresh row for a [`LayoutId`]

use std::any::Any;
use std::sync::Arc;

use crate::model::{LayoutId, ViewId};

/// A sub-element that can show text.
pub trait TextView {
    /// Replaces the shown text.
    fn set_text(&mut self, text: &str);
}

/// A sub-element that can show an image.
pub trait ImageView {
    /// Starts showing the image found at `source` (a path, URL or resource key).
    fn load(&mut self, source: &str);
}

/// Handler installed on a sub-element by a click binding.
pub type ViewClickHandler = Arc<dyn Fn() + Send + Sync>;

/// A named sub-element inside a row.
///
/// The capability accessors default to `None`; a label overrides
/// [`as_text`](View::as_text), an icon overrides [`as_image`](View::as_image).
pub trait View: Any + Send {
    /// Upcast for downcasting to the concrete element type.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// The text sink of this element, if it has one.
    fn as_text(&mut self) -> Option<&mut dyn TextView> {
        None
    }

    /// The image sink of this element, if it has one.
    fn as_image(&mut self) -> Option<&mut dyn ImageView> {
        None
    }

    /// Installs a click handler on this element.
    ///
    /// Elements that cannot be clicked ignore it.
    fn set_on_click(&mut self, _handler: ViewClickHandler) {}
}

/// The sender type of row click events: the row that was clicked.
pub type RowSender = dyn RowView;

/// Handler installed on a row's root for clicks.
///
/// The host calls it with the clicked row.
pub type ClickHandler = Arc<dyn Fn(&RowSender) + Send + Sync>;

/// Handler installed on a row's root for long presses.
///
/// Returns `true` if the press was handled, in which case the host should
/// suppress its default long-press affordance.
pub type LongPressHandler = Arc<dyn Fn(&RowSender) -> bool + Send + Sync>;

/// One row instance owned by the rendering host.
pub trait RowView: Any + Send {
    /// Looks up a sub-element. Returns `None` if this row's layout has no
    /// element with that id.
    fn find_view(&mut self, id: ViewId) -> Option<&mut dyn View>;

    /// Replaces the click handler of the row's root.
    fn set_on_click(&mut self, handler: ClickHandler);

    /// Replaces the long-press handler of the row's root.
    fn set_on_long_press(&mut self, handler: LongPressHandler);

    /// Upcast for downcasting to the concrete row type.
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for downcasting to the concrete row type.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Builds row instances for layouts.
///
/// Any `Fn(LayoutId) -> Option<Box<dyn RowView>>` closure is an inflater.
pub trait Inflater {
    /// Builds a new row for `layout`, or `None` if the layout is unknown.
    fn inflate(&self, layout: LayoutId) -> Option<Box<dyn RowView>>;
}

impl<F> Inflater for F
where
    F: Fn(LayoutId) -> Option<Box<dyn RowView>>,
{
    fn inflate(&self, layout: LayoutId) -> Option<Box<dyn RowView>> {
        self(layout)
    }
}
