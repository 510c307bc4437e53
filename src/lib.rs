// src/lib.rs
//! Haggis Deform
//!
//! Composable mesh deformation and scene-graph extents for the Haggis 3D engine.
//! Deformers are chained in a stack that re-derives a mesh's vertices from its
//! rest pose every frame; visitors walk the scene graph to compute world-space
//! bounds of the (deformed) geometry.

pub mod animation;
pub mod deform;
pub mod error;
pub mod gfx;
pub mod prelude;
pub mod ui;

pub use error::{DeformError, SplineError};
