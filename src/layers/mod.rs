pub mod dense_layer;

pub use dense_layer::{DenseBuilder, DenseLayer};

use crate::storage::{Allocator, GradStorage, WeightStorage};

/// Number of floats a layer consumes or produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Shape {
    len: usize,
}

impl Shape {
    pub fn new(len: usize) -> Self {
        Self { len }
    }

    pub fn size(&self) -> usize {
        self.len
    }
}

pub trait Layer {
    /// Evaluate the layer's output.
    fn eval(&mut self, input: &[f32], weights: &WeightStorage) -> &[f32];

    /// Calculates derivatives of the layer's weights. `in_grads` are the partial derivatives at the output of the layer
    /// and `out_grads` are the derivatives at the layer's input, which will be accumulated into.
    /// Uses the state left behind by the last call to `eval`, which must have received `input`.
    fn calc_gradients(
        &mut self,
        input: &[f32],
        weights: &WeightStorage,
        gradients: &mut GradStorage,
        in_grads: &[f32],
        out_grads: &mut [f32],
    );

    /// Get layer's output
    fn activations(&self) -> &[f32];
    /// Get the shape of the input
    fn input(&self) -> Shape;
    /// Get the shape of the output
    fn output(&self) -> Shape;
}

/// Trait all layer builders must implement in order to be added to a LinearBuilder.
pub trait LayerBuilder {
    type Output: Layer;
    /// Connect a layer to the previous one. `input` is the output shape of the previous layer.
    fn connect(self, input: Shape, alloc: &mut Allocator) -> Self::Output;
}
