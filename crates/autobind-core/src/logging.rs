//! Logging facilities for autobind.
//!
//! autobind uses the `tracing` crate for instrumentation and never installs a
//! subscriber itself. To see logs, install one in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("autobind=debug,autobind_core=trace")
//!     .init();
//! ```
//!
//! Every event is emitted under one of the fixed [`targets`], so filters can
//! single out the signal layer, the observable collection, or the adapter.

/// Span names used throughout autobind for tracing.
pub mod span_names {
    /// Performance span wrapping a measured operation.
    pub const PERF: &str = "autobind::perf";
    /// Binding a row.
    pub const BIND: &str = "autobind::bind";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "autobind_core";
    /// Signal emission target.
    pub const SIGNAL: &str = "autobind_core::signal";
    /// Observable collection target.
    pub const MODEL: &str = "autobind::model";
    /// Adapter (row mapping and binding) target.
    pub const ADAPTER: &str = "autobind::adapter";
}

/// RAII guard for a performance span.
///
/// The span is entered on creation and exited when the guard drops, so the
/// duration of the enclosing scope shows up in span-aware subscribers.
///
/// ```
/// use autobind_core::PerfSpan;
///
/// {
///     let _span = PerfSpan::new("rebind_visible_rows");
///     // measured work
/// }
/// ```
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create a new performance span.
    ///
    /// The span will be active until the guard is dropped.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: span_names::PERF, "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}
