//! # User Interface Module
//!
//! Dear ImGui panels for inspecting and editing deformers. The crate does not
//! own an ImGui context; callers hand in the frame's [`imgui::Ui`] from
//! whatever platform and renderer integration they use.
//!
//! ## Key Components
//!
//! - [`render_deformer_properties`] - Property-driven inspector for a single deformer
//! - [`deformer_stack_panel`] - Window listing every deformer in a stack
//!
//! ## Usage
//!
//! ```no_run
//! use haggis_deform::deform::DeformableMeshNode;
//! use haggis_deform::ui::deformer_stack_panel;
//!
//! fn frame(ui: &imgui::Ui, node: &mut DeformableMeshNode) {
//!     if deformer_stack_panel(ui, "Deformers", node.deformer_stack_mut()) {
//!         if let Err(err) = node.apply_deformers() {
//!             log::warn!("{err}");
//!         }
//!     }
//! }
//! ```

pub mod panel;

pub use panel::{deformer_stack_panel, render_deformer_properties};
