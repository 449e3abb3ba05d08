mod collaborators;
pub mod server;
pub mod trace_capture;

pub use collaborators::{CapturingSink, StubResolver};
pub use server::{TestOptions, TestServer};
pub use trace_capture::{CapturedEvent, init_test_tracing};
