mod body;
mod exchange_ctx;
mod request_id;
mod summary;

#[cfg(test)]
mod tests;

pub use body::*;
pub use exchange_ctx::*;
pub use request_id::*;
pub use summary::*;
