//! Frame-driven terminal runtime.
//!
//! [`Runtime::run`] drives an [`App`]: ticks at the configured rate advance
//! state, terminal input is forwarded as it arrives, and a redraw follows
//! whenever either has happened.

pub use self::{
    event_loop::RenderMode,
    runtime::{App, Runtime},
};

mod event_loop;
mod runtime;
