//! # Graphics Module
//!
//! Geometry and scene-graph functionality shared by the deformation pipeline.
//!
//! ## Architecture Overview
//!
//! - **Geometry** ([`geometry`]) - Procedural primitives producing [`geometry::GeometryData`]
//! - **Scene Management** ([`scene`]) - Transform hierarchy, meshes, bounding boxes and visitors
//!
//! Rendering itself stays outside this crate: meshes expose their vertex data
//! and an optional wgpu upload path, and the caller owns the device, queue
//! and render passes.

pub mod geometry;
pub mod scene;
