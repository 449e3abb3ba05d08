mod error;
mod loader;
mod types;


pub use error::ConfigError;
pub use loader::{load_config, load_config_from};
pub use types::*;
