//! # Deformer Stack
//!
//! An ordered pipeline of shared deformers. Each enabled deformer reads the
//! previous enabled deformer's output (the first reads the stack input) and
//! the last output is copied into the stack's own output buffer.
//!
//! Deformers are held as [`DeformerRef`] handles so an editor or animator can
//! keep tweaking a deformer after it has been added:
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use cgmath::Vector3;
//! use haggis_deform::deform::{shared, Deformer, DeformerStack, ScaleDeformer};
//! use haggis_deform::gfx::scene::Vertices;
//!
//! let scale = shared(ScaleDeformer::new(Vector3::new(0.0, 0.0, 0.0), Vector3::new(2.0, 2.0, 2.0)));
//! scale.borrow_mut().set_falloff(0.0);
//!
//! let mut stack = DeformerStack::new();
//! stack.add_deformer(scale.clone());
//! stack.set_input(Arc::new(Vertices::from_arrays(&[[1.0, 0.0, 0.0]])));
//! stack.apply().unwrap();
//! assert_eq!(stack.output().unwrap().vertex(0), Some(Vector3::new(2.0, 0.0, 0.0)));
//! ```

use std::cell::{RefCell, RefMut};
use std::rc::Rc;
use std::sync::Arc;

use super::deformer::Deformer;
use crate::error::DeformError;
use crate::gfx::scene::Vertices;

/// Shared, mutable handle to a deformer in a stack
pub type DeformerRef = Rc<RefCell<dyn Deformer>>;

/// Wraps a deformer in a shareable handle
///
/// The returned handle coerces to [`DeformerRef`] when added to a stack while
/// keeping the concrete type for the caller.
pub fn shared<D: Deformer + 'static>(deformer: D) -> Rc<RefCell<D>> {
    Rc::new(RefCell::new(deformer))
}

/// Ordered chain of deformers applied to one vertex buffer
#[derive(Default)]
pub struct DeformerStack {
    deformers: Vec<DeformerRef>,
    input: Option<Arc<Vertices>>,
    output: Option<Vertices>,
}

impl std::fmt::Debug for DeformerStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&'static str> = self
            .deformers
            .iter()
            .map(|deformer| deformer.try_borrow().map(|d| d.name()).unwrap_or("<borrowed>"))
            .collect();
        f.debug_struct("DeformerStack")
            .field("deformers", &names)
            .field("input_len", &self.input.as_ref().map(|input| input.len()))
            .finish()
    }
}

impl DeformerStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Links the stack input
    ///
    /// The output buffer is only reallocated when the vertex count changes.
    pub fn set_input(&mut self, input: Arc<Vertices>) {
        let reuse = matches!(&self.output, Some(output) if output.len() == input.len());
        if !reuse {
            self.output = Some(input.as_ref().clone());
        }
        self.input = Some(input);
    }

    pub fn input(&self) -> Option<&Arc<Vertices>> {
        self.input.as_ref()
    }

    /// Result of the last [`apply`](Self::apply)
    pub fn output(&self) -> Option<&Vertices> {
        self.output.as_ref()
    }

    /// Appends a deformer to the end of the chain
    pub fn add_deformer(&mut self, deformer: DeformerRef) {
        log::debug!("added {} deformer at position {}", deformer_name(&deformer), self.deformers.len());
        self.deformers.push(deformer);
    }

    /// Removes the first entry that is the same object as `deformer`
    ///
    /// Returns `false` when the deformer is not in the stack.
    pub fn remove_deformer<D: Deformer + ?Sized>(&mut self, deformer: &Rc<RefCell<D>>) -> bool {
        let target = Rc::as_ptr(deformer);
        match self
            .deformers
            .iter()
            .position(|entry| std::ptr::addr_eq(Rc::as_ptr(entry), target))
        {
            Some(index) => {
                self.deformers.remove(index);
                true
            }
            None => false,
        }
    }

    /// Removes and returns the deformer at `index`
    pub fn remove_at(&mut self, index: usize) -> Result<DeformerRef, DeformError> {
        if index >= self.deformers.len() {
            return Err(DeformError::IndexOutOfRange {
                index,
                len: self.deformers.len(),
            });
        }
        Ok(self.deformers.remove(index))
    }

    pub fn clear(&mut self) {
        self.deformers.clear();
    }

    pub fn count(&self) -> usize {
        self.deformers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deformers.is_empty()
    }

    pub fn deformer(&self, index: usize) -> Option<&DeformerRef> {
        self.deformers.get(index)
    }

    pub fn deformers(&self) -> &[DeformerRef] {
        &self.deformers
    }

    /// Runs every enabled deformer in order
    ///
    /// Does nothing without an input. Fails if a deformer is already borrowed
    /// elsewhere, or if a deformer changes the vertex count.
    pub fn apply(&mut self) -> Result<(), DeformError> {
        let Some(input) = self.input.clone() else {
            return Ok(());
        };

        // Drop last frame's input links so each output is uniquely owned and
        // gets rewritten in place.
        for deformer in &self.deformers {
            borrow_mut(deformer)?.base_mut().detach_input();
        }

        let mut current = input.clone();
        let mut applied = 0;
        for deformer in &self.deformers {
            let mut deformer = borrow_mut(deformer)?;
            if !deformer.is_enabled() {
                continue;
            }

            deformer.set_input(current);
            deformer.apply();
            current = match deformer.output() {
                Some(output) => output,
                None => input.clone(),
            };
            applied += 1;
        }

        let output = self.output.get_or_insert_with(|| Vertices::new(input.len()));
        output.copy_from(&current)?;

        log::trace!("deformer stack applied {applied} of {} deformers", self.deformers.len());
        Ok(())
    }

    /// Enables or disables every deformer
    ///
    /// The batch setters skip a deformer that is borrowed elsewhere and log a
    /// warning instead.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.for_each_deformer("set_enabled", |deformer| deformer.set_enabled(enabled));
    }

    /// Sets the weight of every deformer
    pub fn set_weight(&mut self, weight: f32) {
        self.for_each_deformer("set_weight", |deformer| deformer.set_weight(weight));
    }

    /// Forwards the animation time to every deformer
    pub fn set_time(&mut self, time: f32) {
        self.for_each_deformer("set_time", |deformer| deformer.set_time(time));
    }

    /// Resets every deformer and copies the input into the output
    pub fn reset(&mut self) {
        self.for_each_deformer("reset", |deformer| deformer.reset());
        if let (Some(input), Some(output)) = (&self.input, &mut self.output) {
            if let Err(err) = output.copy_from(input) {
                log::warn!("deformer stack reset skipped: {err}");
            }
        }
    }

    fn for_each_deformer(&self, operation: &str, mut f: impl FnMut(&mut dyn Deformer)) {
        for deformer in &self.deformers {
            match borrow_mut(deformer) {
                Ok(mut deformer) => f(&mut *deformer),
                Err(err) => log::warn!("deformer stack {operation} skipped: {err}"),
            }
        }
    }
}

fn borrow_mut(deformer: &DeformerRef) -> Result<RefMut<'_, dyn Deformer + 'static>, DeformError> {
    deformer
        .try_borrow_mut()
        .map_err(|_| DeformError::DeformerBorrowed(deformer_name(deformer)))
}

fn deformer_name(deformer: &DeformerRef) -> String {
    deformer
        .try_borrow()
        .map(|d| d.name().to_string())
        .unwrap_or_else(|_| "<unknown>".to_string())
}
