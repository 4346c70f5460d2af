use super::*;

/// Steps the weights against their gradients, optionally keeping a running velocity.
#[derive(Clone, Debug)]
pub struct GradientDescent {
    l_rate: f32,
    momentum: f32,
    velocity: Vec<f32>,
}

impl OptimizerAlg for GradientDescent {
    fn update_weights(&mut self, weights: &mut [f32], gradients: &[f32]) {
        assert_eq!(weights.len(), gradients.len());

        if self.momentum == 0. {
            for (w, g) in weights.iter_mut().zip(gradients) {
                *w -= self.l_rate * g;
            }
            return;
        }

        assert_eq!(weights.len(), self.velocity.len());
        for ((w, g), v) in weights.iter_mut().zip(gradients).zip(&mut self.velocity) {
            *v = self.momentum * *v + g;
            *w -= self.l_rate * *v;
        }
    }
}

impl GradientDescent {
    pub fn builder() -> GradDescBuilder {
        Default::default()
    }

    /// Plain gradient descent, usable on weights of any length.
    pub fn new(l_rate: f32) -> Self {
        Self {
            l_rate,
            momentum: 0.,
            velocity: Vec::new(),
        }
    }
}

/// Constructor for [GradientDescent](self::GradientDescent)
#[derive(Clone, Copy, Debug)]
pub struct GradDescBuilder {
    l_rate: f32,
    momentum: f32,
}

impl Default for GradDescBuilder {
    fn default() -> Self {
        Self {
            l_rate: 0.01,
            momentum: 0.,
        }
    }
}

impl GradDescBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn l_rate(mut self, l_rate: f32) -> Self {
        self.l_rate = l_rate;
        self
    }

    pub fn momentum(mut self, momentum: f32) -> Self {
        self.momentum = momentum;
        self
    }

    pub fn build(self) -> GradDescConstructor {
        GradDescConstructor { builder: self }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GradDescConstructor {
    builder: GradDescBuilder,
}

impl AlgBuilder for GradDescConstructor {
    type Output = GradientDescent;

    fn build(self, len: usize) -> Self::Output {
        GradientDescent {
            l_rate: self.builder.l_rate,
            momentum: self.builder.momentum,
            velocity: vec![0.; len],
        }
    }
}
