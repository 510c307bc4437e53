//! # Matrix Stack
//!
//! Push/pop helper used by scene visitors to accumulate hierarchical transforms.
//! The stack always holds at least one matrix; the base entry can be reset but
//! never popped.

use cgmath::{Deg, InnerSpace, Matrix4, SquareMatrix, Vector3};

/// Stack of accumulated model matrices
#[derive(Debug, Clone)]
pub struct MatrixStack {
    stack: Vec<Matrix4<f32>>,
}

impl MatrixStack {
    /// Creates a stack holding a single identity matrix
    pub fn new() -> Self {
        Self {
            stack: vec![Matrix4::identity()],
        }
    }

    /// Duplicates the top matrix
    pub fn push(&mut self) {
        let top = self.top();
        self.stack.push(top);
    }

    /// Removes the top matrix and returns it
    ///
    /// Returns `None` when only the base entry is left; the base is kept.
    pub fn pop(&mut self) -> Option<Matrix4<f32>> {
        if self.stack.len() > 1 {
            self.stack.pop()
        } else {
            None
        }
    }

    /// Post-multiplies the top matrix: `top = top * matrix`
    pub fn multiply(&mut self, matrix: Matrix4<f32>) {
        let top = self.top_mut();
        *top = *top * matrix;
    }

    pub fn translate(&mut self, offset: Vector3<f32>) {
        self.multiply(Matrix4::from_translation(offset));
    }

    /// Rotates the top matrix by `angle` degrees around `axis`
    ///
    /// A zero-length axis leaves the matrix unchanged.
    pub fn rotate(&mut self, angle: f32, axis: Vector3<f32>) {
        if axis.magnitude2() > 0.0 {
            self.multiply(Matrix4::from_axis_angle(axis.normalize(), Deg(angle)));
        }
    }

    pub fn scale(&mut self, factors: Vector3<f32>) {
        self.multiply(Matrix4::from_nonuniform_scale(factors.x, factors.y, factors.z));
    }

    /// Replaces the top matrix with identity
    pub fn load_identity(&mut self) {
        *self.top_mut() = Matrix4::identity();
    }

    /// Drops every pushed frame and resets the base to identity
    pub fn clear(&mut self) {
        self.stack.clear();
        self.stack.push(Matrix4::identity());
    }

    /// Number of matrices on the stack (1 when balanced)
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn top(&self) -> Matrix4<f32> {
        self.stack[self.stack.len() - 1]
    }

    fn top_mut(&mut self) -> &mut Matrix4<f32> {
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }
}

impl Default for MatrixStack {
    fn default() -> Self {
        Self::new()
    }
}
