//! Multicast notification channels.
//!
//! A [`Signal<S, A>`] keeps an ordered list of connected slots. Emitting the
//! signal calls every slot synchronously, in the order they were connected,
//! with the same `(sender, args)` pair. Each slot reports whether it handled
//! the event and [`Signal::emit`] folds those answers into a single `bool`.
//!
//! # Key Types
//!
//! - [`Signal<S, A>`] - The channel itself
//! - [`ConnectionId`] - Returned when connecting a slot, used to disconnect it
//! - [`Handled`] - What a slot reports back to the emitter
//! - [`ConnectionGuard`] - RAII guard that disconnects when dropped
//!
//! # Re-entrancy
//!
//! The slot list is snapshotted before any slot runs and the internal lock is
//! released while slots execute. A slot may therefore connect, disconnect or
//! emit on the same signal. Connections made during an emission only see the
//! next emission.
//!
//! # Example
//!
//! ```
//! use autobind_core::{Handled, Signal};
//!
//! let pressed = Signal::<(), u32>::new();
//!
//! // Plain observers always count as having handled the event.
//! let id = pressed.connect(|_, key| println!("pressed {key}"));
//!
//! // A handler may decline.
//! pressed.connect_handler(|_, key| Handled::from(*key == 13));
//!
//! assert!(pressed.notify(&42));
//! pressed.disconnect(id);
//! assert!(!pressed.notify(&42));
//! ```

use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// A unique identifier for a signal-slot connection.
    ///
    /// Connecting the same closure twice yields two distinct ids, and
    /// [`Signal::disconnect`] removes exactly the registration it names.
    pub struct ConnectionId;
}

/// Whether a slot consumed the event it was given.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Handled {
    /// The slot acted on the event.
    Yes,
    /// The slot saw the event but left it alone.
    #[default]
    No,
}

impl Handled {
    /// Returns `true` for [`Handled::Yes`].
    pub fn is_handled(self) -> bool {
        matches!(self, Self::Yes)
    }
}

impl From<bool> for Handled {
    fn from(handled: bool) -> Self {
        if handled { Self::Yes } else { Self::No }
    }
}

type Slot<S, A> = Arc<dyn Fn(&S, &A) -> Handled + Send + Sync>;

struct Connection<S: ?Sized, A> {
    slot: Slot<S, A>,
    /// Connection order; slot map iteration order is not stable.
    sequence: u64,
}

/// A type-safe multicast channel.
///
/// # Type Parameters
///
/// - `S`: The sender passed by reference to every slot. Use `()` when there
///   is no meaningful sender, or a trait object such as `dyn RowView`.
/// - `A`: The argument passed by reference to every slot.
pub struct Signal<S: ?Sized, A> {
    connections: Mutex<SlotMap<ConnectionId, Connection<S, A>>>,
    /// Whether emission is temporarily blocked.
    blocked: AtomicBool,
    next_sequence: AtomicU64,
}

impl<S: ?Sized, A> Default for Signal<S, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ?Sized, A> fmt::Debug for Signal<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("connections", &self.connection_count())
            .field("blocked", &self.is_blocked())
            .finish()
    }
}

impl<S: ?Sized, A> Signal<S, A> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(SlotMap::with_key()),
            blocked: AtomicBool::new(false),
            next_sequence: AtomicU64::new(0),
        }
    }

    /// Connect an observer.
    ///
    /// Observers cannot decline an event: for the purpose of [`emit`](Self::emit)'s
    /// return value they always count as having handled it.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&S, &A) + Send + Sync + 'static,
    {
        self.connect_handler(move |sender, args| {
            slot(sender, args);
            Handled::Yes
        })
    }

    /// Connect a handler that reports whether it consumed the event.
    pub fn connect_handler<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&S, &A) -> Handled + Send + Sync + 'static,
    {
        let connection = Connection {
            slot: Arc::new(slot),
            sequence: self.next_sequence.fetch_add(1, Ordering::Relaxed),
        };
        self.connections.lock().insert(connection)
    }

    /// Disconnect a specific slot by its connection ID.
    ///
    /// Returns `true` if the connection was found and removed, `false` otherwise.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.lock().remove(id).is_some()
    }

    /// Disconnect all slots from this signal.
    pub fn disconnect_all(&self) {
        self.connections.lock().clear();
    }

    /// Get the number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    /// Returns `true` if at least one slot is connected.
    pub fn has_connections(&self) -> bool {
        !self.connections.lock().is_empty()
    }

    /// Block signal emission temporarily.
    ///
    /// While blocked, calls to `emit()` invoke nothing and return `false`.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Check if signal emission is currently blocked.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Emit the signal, invoking all connected slots in connection order.
    ///
    /// Returns `true` if at least one slot reported [`Handled::Yes`]. Every
    /// slot runs even after one has handled the event.
    #[tracing::instrument(skip_all, target = "autobind_core::signal", level = "trace")]
    pub fn emit(&self, sender: &S, args: &A) -> bool {
        if self.is_blocked() {
            tracing::trace!(target: "autobind_core::signal", "signal blocked, skipping emit");
            return false;
        }

        let slots = self.snapshot();
        tracing::trace!(target: "autobind_core::signal", connection_count = slots.len(), "emitting signal");

        let mut handled = false;
        for slot in &slots {
            if slot(sender, args).is_handled() {
                handled = true;
            }
        }
        handled
    }

    /// Clone the current slots in connection order and release the lock.
    fn snapshot(&self) -> Vec<Slot<S, A>> {
        let connections = self.connections.lock();
        let mut ordered: Vec<(u64, Slot<S, A>)> = connections
            .values()
            .map(|conn| (conn.sequence, Arc::clone(&conn.slot)))
            .collect();
        drop(connections);

        ordered.sort_unstable_by_key(|(sequence, _)| *sequence);
        ordered.into_iter().map(|(_, slot)| slot).collect()
    }

    /// Connect an observer that is disconnected when the returned guard drops.
    ///
    /// The guard only holds a weak reference, so it never keeps the signal
    /// alive and dropping it after the signal is gone is a no-op.
    pub fn connect_scoped<F>(self: &Arc<Self>, slot: F) -> ConnectionGuard<S, A>
    where
        F: Fn(&S, &A) + Send + Sync + 'static,
    {
        let id = self.connect(slot);
        ConnectionGuard {
            signal: Arc::downgrade(self),
            id,
        }
    }
}

impl<A> Signal<(), A> {
    /// Emit a signal that has no sender.
    pub fn notify(&self, args: &A) -> bool {
        self.emit(&(), args)
    }
}

/// A connection guard that automatically disconnects when dropped.
///
/// Created via [`Signal::connect_scoped`].
///
/// # Example
///
/// ```
/// use autobind_core::Signal;
/// use std::sync::atomic::{AtomicI32, Ordering};
/// use std::sync::Arc;
///
/// let signal = Arc::new(Signal::<(), i32>::new());
/// let counter = Arc::new(AtomicI32::new(0));
/// {
///     let counter_clone = counter.clone();
///     let _guard = signal.connect_scoped(move |_, &n| {
///         counter_clone.fetch_add(n, Ordering::SeqCst);
///     });
///     signal.notify(&42);
/// }
/// signal.notify(&43);
/// assert_eq!(counter.load(Ordering::SeqCst), 42);
/// ```
pub struct ConnectionGuard<S: ?Sized, A> {
    signal: Weak<Signal<S, A>>,
    id: ConnectionId,
}

impl<S: ?Sized, A> ConnectionGuard<S, A> {
    /// The id of the guarded connection.
    pub fn id(&self) -> ConnectionId {
        self.id
    }
}

impl<S: ?Sized, A> fmt::Debug for ConnectionGuard<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionGuard").field("id", &self.id).finish()
    }
}

impl<S: ?Sized, A> Drop for ConnectionGuard<S, A> {
    fn drop(&mut self) {
        if let Some(signal) = self.signal.upgrade() {
            signal.disconnect(self.id);
        }
    }
}
