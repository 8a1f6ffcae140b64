//! Engine systems.
//!
//! Functions that drive a frame outside of entity hooks.
//!
//! Submodules overview
//! - [`animation`] – advance sprite-sheet animations after drawing
//! - [`input`] – read hardware input and update [`crate::resources::input::InputState`]
//! - [`render`] – record draw commands, sort, cull and replay them with raylib

pub mod animation;
pub mod input;
pub mod render;
