//! # Deformable Mesh Nodes
//!
//! A scene node that owns meshes together with a [`DeformerStack`]. The first
//! mesh's vertex positions are captured as the rest pose when it is added.
//! Every [`apply_deformers`](DeformableMeshNode::apply_deformers) call runs the
//! stack on that rest pose and writes the result back into the live mesh, so
//! deformations never accumulate across frames.
//!
//! Only the first mesh is deformed; additional meshes are carried along and
//! drawn unchanged, but still count towards the node's extent.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use super::stack::{DeformerRef, DeformerStack};
use super::Deformer;
use crate::error::DeformError;
use crate::gfx::geometry::GeometryData;
use crate::gfx::scene::{BoundingBox, Mesh, MeshBuffers, TransformNode, Vertices};

/// Scene node whose first mesh is driven by a deformer stack
#[derive(Debug)]
pub struct DeformableMeshNode<M: MeshBuffers = Mesh> {
    transform: TransformNode,
    meshes: Vec<M>,
    stack: DeformerStack,
    original_vertices: Option<Arc<Vertices>>,
    auto_update: bool,
}

impl<M: MeshBuffers> DeformableMeshNode<M> {
    pub fn new(transform: TransformNode) -> Self {
        Self {
            transform,
            meshes: Vec::new(),
            stack: DeformerStack::new(),
            original_vertices: None,
            auto_update: false,
        }
    }

    pub fn transform(&self) -> &TransformNode {
        &self.transform
    }

    pub fn transform_mut(&mut self) -> &mut TransformNode {
        &mut self.transform
    }

    pub fn name(&self) -> &str {
        self.transform.name()
    }

    /// Adds a mesh; the first one becomes the deformed mesh and its current
    /// positions become the rest pose
    pub fn add_mesh(&mut self, mesh: M) -> usize {
        self.meshes.push(mesh);
        if self.meshes.len() == 1 {
            self.capture_original_vertices();
        }
        self.meshes.len() - 1
    }

    pub fn mesh(&self, index: usize) -> Option<&M> {
        self.meshes.get(index)
    }

    pub fn mesh_mut(&mut self, index: usize) -> Option<&mut M> {
        self.meshes.get_mut(index)
    }

    pub fn meshes(&self) -> &[M] {
        &self.meshes
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    /// Snapshots the first mesh's live positions as the new rest pose
    ///
    /// Call this after editing the undeformed geometry directly.
    pub fn capture_original_vertices(&mut self) {
        match self.meshes.first() {
            Some(mesh) => {
                let vertices = mesh.vertices().clone();
                log::debug!(
                    "captured {} rest vertices for deformable node '{}'",
                    vertices.len(),
                    self.transform.name()
                );
                self.original_vertices = Some(Arc::new(vertices));
            }
            None => self.original_vertices = None,
        }
    }

    pub fn original_vertices(&self) -> Option<&Arc<Vertices>> {
        self.original_vertices.as_ref()
    }

    /// Runs the stack on the rest pose and writes the result into the first mesh
    ///
    /// Does nothing without a mesh. Fails with
    /// [`DeformError::SizeMismatch`] when the live vertex count no longer
    /// matches the rest pose; recapture the rest pose after changing topology.
    pub fn apply_deformers(&mut self) -> Result<(), DeformError> {
        let (Some(mesh), Some(original)) = (self.meshes.first_mut(), &self.original_vertices) else {
            return Ok(());
        };

        let live = mesh.vertices().len();
        if live != original.len() {
            log::warn!(
                "deformable node '{}' changed vertex count ({} -> {}); recapture the rest pose",
                self.transform.name(),
                original.len(),
                live
            );
            return Err(DeformError::SizeMismatch {
                expected: original.len(),
                actual: live,
            });
        }

        self.stack.set_input(original.clone());
        self.stack.apply()?;

        if let Some(output) = self.stack.output() {
            mesh.vertices_mut().copy_from(output)?;
        }
        mesh.update_vertices();
        mesh.update_normals();
        Ok(())
    }

    /// Resets every deformer and restores the rest pose into the first mesh
    pub fn reset_deformers(&mut self) {
        self.stack.reset();

        let (Some(mesh), Some(original)) = (self.meshes.first_mut(), &self.original_vertices) else {
            return;
        };
        if let Err(err) = mesh.vertices_mut().copy_from(original) {
            log::warn!("could not restore rest pose of '{}': {err}", self.transform.name());
            return;
        }
        mesh.update_vertices();
        mesh.update_normals();
    }

    pub fn add_deformer(&mut self, deformer: DeformerRef) {
        self.stack.add_deformer(deformer);
    }

    /// Removes a deformer by identity; `false` if it was not attached
    pub fn remove_deformer<D: Deformer + ?Sized>(&mut self, deformer: &Rc<RefCell<D>>) -> bool {
        self.stack.remove_deformer(deformer)
    }

    pub fn clear_deformers(&mut self) {
        self.stack.clear();
    }

    pub fn deformer_stack(&self) -> &DeformerStack {
        &self.stack
    }

    pub fn deformer_stack_mut(&mut self) -> &mut DeformerStack {
        &mut self.stack
    }

    /// Forwards the animation time to every attached deformer
    pub fn set_time(&mut self, time: f32) {
        self.stack.set_time(time);
    }

    pub fn set_auto_update(&mut self, auto_update: bool) {
        self.auto_update = auto_update;
    }

    pub fn auto_update(&self) -> bool {
        self.auto_update
    }

    /// Per-frame hook; re-applies the stack when auto update is on
    pub fn draw(&mut self) {
        if !self.auto_update {
            return;
        }
        if let Err(err) = self.apply_deformers() {
            log::warn!("skipping deformation of '{}': {err}", self.transform.name());
        }
    }

    /// Object-space extents of every mesh's live positions
    ///
    /// The first mesh contributes its deformed positions.
    pub fn local_bounding_box(&self) -> BoundingBox {
        self.meshes
            .iter()
            .fold(BoundingBox::new(), |bbox, mesh| bbox.union(&mesh.vertices().bounding_box()))
    }
}

impl DeformableMeshNode<Mesh> {
    /// Builds a node holding one mesh generated from `geometry`
    pub fn from_geometry(name: impl Into<String>, geometry: &GeometryData) -> Self {
        let mut transform = TransformNode::new();
        transform.set_name(name);
        let mut node = Self::new(transform);
        node.add_mesh(Mesh::from_geometry(geometry));
        node
    }

    /// Streams changed vertex data of every mesh to the GPU
    pub fn sync_gpu(&mut self, queue: &wgpu::Queue) {
        for mesh in &mut self.meshes {
            mesh.sync_gpu(queue);
        }
    }
}
