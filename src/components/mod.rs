//! Reusable UI components.

mod canvas;
pub mod rotating_text;
pub mod thread_button;
pub mod thread_grid;
