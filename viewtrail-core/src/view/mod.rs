mod event;
mod extract;


pub use event::*;
