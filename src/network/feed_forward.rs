use super::{
    construction::{ConsError, LinearConstruction},
    Network,
};
use crate::layers::{DenseLayer, Layer, Shape};
use crate::storage::{GradStorage, WeightStorage};

/// This struct represents a neural network where every layer feeds the next one.
/// It remembers the activations of the last prediction so gradients can be calculated for it.
#[derive(Debug, Clone)]
pub struct FeedForward<L = DenseLayer> {
    weights: WeightStorage,
    layers: Vec<L>,
    in_shape: Shape,

    input: Vec<f32>,
    // backprop scratch space, swapped between layers
    in_grads: Vec<f32>,
    out_grads: Vec<f32>,
}

impl<L: Layer> Network for FeedForward<L> {
    fn predict(&mut self, input: &[f32]) -> &[f32] {
        assert_eq!(
            input.len(),
            self.in_shape.size(),
            "Input size mismatch. Network expects {}, received {}",
            self.in_shape.size(),
            input.len()
        );
        self.input.clear();
        self.input.extend_from_slice(input);

        let (first, rest) = self
            .layers
            .split_first_mut()
            .expect("FeedForward networks always have a layer");
        let mut output = first.eval(&self.input, &self.weights);
        for l in rest {
            output = l.eval(output, &self.weights);
        }
        output
    }

    fn calc_gradients(&mut self, gradients: &mut GradStorage, output_gradients: &[f32]) -> &[f32] {
        assert_eq!(output_gradients.len(), self.output().size());
        assert_eq!(gradients.len(), self.weights.len());

        self.in_grads.clear();
        self.in_grads.extend_from_slice(output_gradients);

        for i in (0..self.layers.len()).rev() {
            let (before, rest) = self.layers.split_at_mut(i);
            let layer = &mut rest[0];
            let input = before.last().map_or(&self.input[..], |l| l.activations());

            self.out_grads.clear();
            self.out_grads.resize(layer.input().size(), 0.);

            layer.calc_gradients(
                input,
                &self.weights,
                gradients,
                &self.in_grads,
                &mut self.out_grads,
            );
            std::mem::swap(&mut self.in_grads, &mut self.out_grads);
        }
        &self.in_grads
    }

    fn weights(&self) -> &[f32] {
        self.weights.raw()
    }

    fn weights_mut(&mut self) -> &mut [f32] {
        self.weights.raw_mut()
    }

    fn input(&self) -> Shape {
        self.in_shape
    }

    fn output(&self) -> Shape {
        self.layers
            .last()
            .map_or(self.in_shape, |l| l.output())
    }
}

impl<L> FeedForward<L> {
    pub fn layers(&self) -> &[L] {
        &self.layers
    }
}

impl<L: Layer> LinearConstruction<L> for FeedForward<L> {
    fn construct(weights: WeightStorage, layers: Vec<L>, input: Shape) -> Result<Self, ConsError> {
        if layers.is_empty() {
            return Err(ConsError::Empty);
        }

        let mut expected = input;
        for (index, l) in layers.iter().enumerate() {
            if l.input() != expected {
                return Err(ConsError::Incompatible {
                    index,
                    received_input: expected.size(),
                    expected_input: l.input().size(),
                });
            }
            expected = l.output();
        }

        Ok(Self {
            weights,
            layers,
            in_shape: input,
            input: Vec::with_capacity(input.size()),
            in_grads: Vec::new(),
            out_grads: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        a_funcs::{Activation, Identity, LeakyReLU, TanH},
        initializer::{Kaiming, WeightInit, Xavier},
        layers::{tests::check, DenseBuilder},
        network::LinearBuilder,
    };

    fn small_net() -> FeedForward {
        LinearBuilder::new(3)
            .layer(DenseBuilder::new(
                Activation::from(TanH),
                Xavier::seeded(1),
                4,
                true,
                true,
            ))
            .layer(DenseBuilder::new(
                Activation::from(LeakyReLU::new(0.1)),
                Kaiming::seeded(2),
                3,
                true,
                true,
            ))
            .layer(DenseBuilder::new(
                Activation::from(Identity),
                Xavier::seeded(3),
                2,
                true,
                true,
            ))
            .build()
            .unwrap()
    }

    // loss = sum(output * coef), so d loss / d output = coef
    const COEF: [f32; 2] = [0.7, -1.3];
    const INPUT: [f32; 3] = [0.3, -0.8, 0.5];

    fn loss(net: &mut FeedForward, input: &[f32]) -> f32 {
        net.predict(input)
            .iter()
            .zip(&COEF)
            .map(|(o, c)| o * c)
            .sum()
    }

    #[test]
    fn empty_network_is_rejected() {
        let res = LinearBuilder::<DenseLayer>::new(3).build::<FeedForward>();
        assert_eq!(res.unwrap_err(), ConsError::Empty);
    }

    #[test]
    fn predict_single_layer() {
        let mut net: FeedForward = LinearBuilder::new(2)
            .layer(DenseBuilder::new(
                Activation::from(Identity),
                WeightInit::new(vec![1., 2., 3., 4.]),
                2,
                true,
                true,
            ))
            .build()
            .unwrap();
        check(&[5., 11.], net.predict(&[1., 2.]), 1e-6, "output");
        assert_eq!(net.weights().len(), 6);
    }

    #[test]
    fn weight_gradients_match_finite_differences() {
        let mut net = small_net();
        let mut grads = net.gradient_storage();
        net.predict(&INPUT);
        net.calc_gradients(&mut grads, &COEF);

        let eps = 1e-2;
        let numeric: Vec<f32> = (0..net.weights().len())
            .map(|i| {
                let w = net.weights()[i];
                net.weights_mut()[i] = w + eps;
                let plus = loss(&mut net, &INPUT);
                net.weights_mut()[i] = w - eps;
                let minus = loss(&mut net, &INPUT);
                net.weights_mut()[i] = w;
                (plus - minus) / (2. * eps)
            })
            .collect();

        check(&numeric, grads.raw(), 1e-2, "weight gradients");
    }

    #[test]
    fn input_gradients_match_finite_differences() {
        let mut net = small_net();
        let mut grads = net.gradient_storage();
        net.predict(&INPUT);
        let analytic = net.calc_gradients(&mut grads, &COEF).to_vec();

        let eps = 1e-2;
        let numeric: Vec<f32> = (0..INPUT.len())
            .map(|i| {
                let mut plus = INPUT;
                plus[i] += eps;
                let mut minus = INPUT;
                minus[i] -= eps;
                (loss(&mut net, &plus) - loss(&mut net, &minus)) / (2. * eps)
            })
            .collect();

        check(&numeric, &analytic, 1e-2, "input gradients");
    }

    #[test]
    fn gradients_accumulate() {
        let mut net = small_net();
        let mut once = net.gradient_storage();
        let mut twice = net.gradient_storage();

        net.predict(&INPUT);
        net.calc_gradients(&mut once, &COEF);
        net.calc_gradients(&mut twice, &COEF);
        net.predict(&INPUT);
        net.calc_gradients(&mut twice, &COEF);

        let doubled: Vec<f32> = once.raw().iter().map(|g| 2. * g).collect();
        check(&doubled, twice.raw(), 1e-5, "accumulated gradients");
    }
}
