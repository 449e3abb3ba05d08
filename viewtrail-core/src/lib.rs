pub mod cli;
pub mod conf;
pub mod ctx;
pub mod enrichment;
mod gateway;
pub mod interceptor;
pub mod logging;
pub mod net;
pub mod pipeline;
pub mod respond;
pub mod server;
pub mod sink;
pub mod view;
