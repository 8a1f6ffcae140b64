//! Long-lived engine data.
//!
//! Overview
//! - `camera2d` – scrolling camera with a follow dead-zone
//! - `gameconfig` – INI-backed window and engine settings
//! - `input` – per-frame keyboard, cursor and gamepad state
//! - `rendertarget` – offscreen canvas blitted scaled to the window
//! - `texturestore` – loaded textures keyed by string IDs
//! - `tilemap` – Tiled JSON map format
//! - `worldtime` – frame delta and fixed-step clock
pub mod camera2d;
pub mod gameconfig;
pub mod input;
pub mod rendertarget;
pub mod texturestore;
pub mod tilemap;
pub mod worldtime;
