//! Tracing targets used by the engine.
//!
//! The crate emits events through the `tracing` crate and never installs a
//! subscriber. Applications choose how to collect them:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("classwind::resolve=debug")
//!     .init();
//! ```

/// Target names for log filtering.
pub mod targets {
    /// Value resolution against token scales.
    pub const RESOLVE: &str = "classwind::resolve";
    /// Per-rule class assembly.
    pub const ASSEMBLE: &str = "classwind::assemble";
    /// Coverage and warning aggregation.
    pub const REPORT: &str = "classwind::report";
}
