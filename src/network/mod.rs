pub mod construction;
pub mod feed_forward;

pub use self::construction::{ConsError, LinearBuilder, LinearConstruction};
pub use self::feed_forward::FeedForward;

use crate::layers::Shape;
use crate::storage::{GradStorage, Storage};

/// Trait all neural network architectures must implement
pub trait Network {
    /// Predict the value corresponding to `input`.
    fn predict(&mut self, input: &[f32]) -> &[f32];

    /// Backpropagates `output_gradients` through the state left by the last prediction.
    /// Weight gradients are accumulated into `gradients`; the gradients with respect to
    /// the network's input are returned.
    fn calc_gradients(&mut self, gradients: &mut GradStorage, output_gradients: &[f32]) -> &[f32];

    /// Get network weights.
    fn weights(&self) -> &[f32];

    /// Get mutable weights.
    fn weights_mut(&mut self) -> &mut [f32];

    /// Returns the input shape of the network
    fn input(&self) -> Shape;

    /// Returns the output shape of the network
    fn output(&self) -> Shape;

    /// Copies the weights of another instance.
    /// Panics if the instance has a diffferent number of weights.
    fn copy_weights(&mut self, other: &Self)
    where
        Self: Sized,
    {
        self.weights_mut().copy_from_slice(other.weights());
    }

    /// Copies the provided weights.
    /// Panics if the number of weights provided isn't the same as the instance's weights.
    fn set_weights(&mut self, weights: &[f32]) {
        self.weights_mut().copy_from_slice(weights);
    }

    /// Zeroed gradient storage laid out like this network's weights.
    fn gradient_storage(&self) -> GradStorage {
        Storage::zeroed(self.weights().len())
    }
}
