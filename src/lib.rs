//! A terminal invaders game: a fixed-timestep simulation core (`compute`),
//! the session driver around it, and a thin console layer for drawing and
//! key input.

pub mod compute;
pub mod console;
pub mod display;
pub mod entities;
pub mod error;
pub mod session;
pub mod snapshot;
pub mod terminal;
