use crate::{
    layers::{DenseLayer, Layer, LayerBuilder, Shape},
    storage::{Allocator, WeightStorage},
};

use std::error;
use std::fmt;

/// This trait allows network architectures to be build using the LinearBuilder
pub trait LinearConstruction<L>: Sized {
    fn construct(weights: WeightStorage, layers: Vec<L>, input: Shape) -> Result<Self, ConsError>;
}

/// Builder for networks where all layers have only a single input and output.
pub struct LinearBuilder<L = DenseLayer> {
    allocator: Allocator,
    layers: Vec<L>,
    in_shape: Shape,
}

impl<L> LinearBuilder<L>
where
    L: Layer,
{
    pub fn new(in_size: usize) -> Self {
        LinearBuilder {
            allocator: Allocator::new(),
            layers: Vec::new(),
            in_shape: Shape::new(in_size),
        }
    }

    fn last_out_shape(&self) -> Shape {
        self.layers.last().map_or(self.in_shape, |l| l.output())
    }

    /// Adds a single layer to the network.
    pub fn layer<T>(mut self, layer: T) -> Self
    where
        T: LayerBuilder,
        T::Output: Into<L>,
    {
        let in_shape = self.last_out_shape();
        let layer = layer.connect(in_shape, &mut self.allocator).into();
        self.layers.push(layer);
        self
    }

    /// Adds all of the layers provided by the `builders` argument.
    pub fn layers<T>(mut self, builders: T) -> Self
    where
        T: IntoIterator,
        T::Item: LayerBuilder,
        <T::Item as LayerBuilder>::Output: Into<L>,
    {
        for builder in builders {
            self = self.layer(builder);
        }
        self
    }

    /// Builds the network. Returns Err if no layers had been provided.
    pub fn build<T>(self) -> Result<T, ConsError>
    where
        T: LinearConstruction<L>,
    {
        T::construct(self.allocator.finish(), self.layers, self.in_shape)
    }
}

/// An Error during the construction of a network.
#[derive(Debug, Clone, PartialEq)]
pub enum ConsError {
    /// A layer is incompatible with the previous one
    Incompatible {
        index: usize,
        received_input: usize,
        expected_input: usize,
    },
    Empty,
}

impl error::Error for ConsError {}

impl fmt::Display for ConsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsError::Incompatible {
                index,
                received_input,
                expected_input,
            } => write!(
                f,
                "Layer {} is incompatible with the layer before it:\n\tExpected input length of {} but received {}.",
                index, expected_input, received_input,
            ),
            ConsError::Empty => {
                f.write_str("The network must have at least a single layer, but it was empty.")
            }
        }
    }
}
