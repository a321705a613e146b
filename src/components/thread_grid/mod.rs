//! Pointer-reactive thread grid: a dot lattice with spring-animated curved
//! threads that bend away from the pointer.

mod component;
pub mod config;
pub mod connectors;
pub mod grid;
pub mod physics;
pub mod pointer;
mod render;
pub mod scheduler;
pub mod state;
pub mod types;

pub use component::ThreadGridCanvas;
pub use config::ThreadGridConfig;
