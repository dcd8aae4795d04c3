//! Terminal rendering module
//!
//! Game state is drawn into a plain character grid, then written to the
//! terminal as ANSI text.

pub mod frame;
pub mod terminal;

pub use frame::{Frame, compose};
pub use terminal::Renderer;
