//! Tracing setup shared by both binaries.
//!
//! The crate itself only emits [`tracing`] events (`debug!`/`trace!` in the
//! driver's raster loop); it never initializes a subscriber, so library
//! consumers keep full control. Both `src/bin` entry points call
//! [`init`] once at startup.

use tracing_subscriber::{fmt, EnvFilter};

/// Installs a `fmt` subscriber reading its filter from `RUST_LOG`, falling
/// back to `info` when unset.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_target(false).init();
}
