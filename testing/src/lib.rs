//! # Todo Client Testing
//!
//! Test doubles and helpers shared across the workspace:
//!
//! - **[`StubBackend`]**: a scripted, call-counting
//!   [`TodoBackend`](todo_client_core::backend::TodoBackend) double
//! - **[`RecordingRenderer`]**: a [`Renderer`](todo_client_view::Renderer)
//!   that records drawing calls in order
//! - **[`EventProbe`]**: a bus subscriber that records what it sees and
//!   releases itself on drop
//!
//! All doubles are deterministic and synchronous; the stub's futures are
//! immediately ready, so tests never wait on real I/O.

/// Bus subscriber that records what it sees.
pub mod event_probe;
/// Renderer double that records every drawing call.
pub mod recording_renderer;
/// Scripted in-memory backend.
pub mod stub_backend;

pub use event_probe::EventProbe;
pub use recording_renderer::{RecordingRenderer, RenderCall};
pub use stub_backend::{BackendCall, StubBackend};

/// Initializes a tracing subscriber honoring `RUST_LOG`, once per process.
///
/// Safe to call from every test; repeated initialization is ignored.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
