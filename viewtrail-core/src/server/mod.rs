pub mod setup;

pub use setup::{build_pipeline, build_server, run};
