//! Building blocks carried by entities.
//!
//! These are plain data types composed into [`crate::entity::Entity`]; there
//! is no component storage or system scheduling behind them.
//!
//! Submodules overview:
//! - [`animation`] – sprite-sheet strip playback state
//! - [`hitbox`] – axis-aligned rectangle, overlap test and push-out resolution
//! - [`sprite`] – texture key plus source rectangle, and the sheet slicer
//! - [`tags`] – string labels for queries and collision filters

pub mod animation;
pub mod hitbox;
pub mod sprite;
pub mod tags;
