//! Core systems for autobind.
//!
//! This crate provides the foundational pieces the adapter layer is built on:
//!
//! - **Signals**: Ordered multicast channels whose slots can report whether
//!   they handled an event
//! - **Logging**: `tracing` targets and performance spans
//!
//! # Signal Example
//!
//! ```
//! use autobind_core::{Handled, Signal};
//!
//! // A channel carrying a row index, with no sender.
//! let clicked = Signal::<(), usize>::new();
//!
//! let conn_id = clicked.connect(|_, row| {
//!     println!("Row {row} clicked");
//! });
//!
//! // `notify` reports whether any slot handled the event.
//! assert!(clicked.notify(&3));
//!
//! clicked.disconnect(conn_id);
//! assert!(!clicked.notify(&3));
//! ```

pub mod logging;
pub mod signal;

pub use logging::PerfSpan;
pub use signal::{ConnectionGuard, ConnectionId, Handled, Signal};
