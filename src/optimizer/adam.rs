use super::*;

/// The adam optimizer algorithm as shown in the research paper <https://arxiv.org/abs/1412.6980>
#[derive(Clone, Debug)]
pub struct Adam {
    first_moment: Vec<f32>,
    second_moment: Vec<f32>,
    config: AdamBuilder,
    steps: i32,
}

impl OptimizerAlg for Adam {
    fn update_weights(&mut self, weights: &mut [f32], gradients: &[f32]) {
        assert_eq!(gradients.len(), weights.len());
        assert_eq!(gradients.len(), self.first_moment.len());

        let AdamBuilder {
            beta1,
            beta2,
            epsilon,
            l_rate,
        } = self.config;
        self.steps += 1;

        // bias correction folded into the step size
        let step = l_rate * (1. - beta2.powi(self.steps)).sqrt() / (1. - beta1.powi(self.steps));

        for (((w, g), m), v) in weights
            .iter_mut()
            .zip(gradients)
            .zip(&mut self.first_moment)
            .zip(&mut self.second_moment)
        {
            *m = beta1 * *m + (1. - beta1) * g;
            *v = beta2 * *v + (1. - beta2) * g * g;
            *w -= step * *m / (v.sqrt() + epsilon);
        }
    }
}

impl Adam {
    pub fn builder() -> AdamBuilder {
        Default::default()
    }

    pub fn new(config: AdamBuilder, len: usize) -> Self {
        Self {
            first_moment: vec![0.; len],
            second_moment: vec![0.; len],
            config,
            steps: 0,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct AdamBuilder {
    beta1: f32,
    beta2: f32,
    epsilon: f32,
    l_rate: f32,
}

impl Default for AdamBuilder {
    fn default() -> Self {
        Self {
            beta1: 0.9,
            beta2: 0.999,
            epsilon: 1e-8,
            l_rate: 1e-3,
        }
    }
}

impl AdamBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    /// Settings commonly used for adversarial training: a lower first moment decay
    /// keeps the two players from overshooting each other.
    pub fn adversarial() -> Self {
        Self {
            beta1: 0.5,
            l_rate: 2e-4,
            ..Default::default()
        }
    }

    pub fn beta1(mut self, beta1: f32) -> Self {
        self.beta1 = beta1;
        self
    }

    pub fn beta2(mut self, beta2: f32) -> Self {
        self.beta2 = beta2;
        self
    }

    pub fn epsilon(mut self, epsilon: f32) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn l_rate(mut self, l_rate: f32) -> Self {
        self.l_rate = l_rate;
        self
    }

    pub fn build(self) -> AdamConstructor {
        AdamConstructor { builder: self }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AdamConstructor {
    builder: AdamBuilder,
}

impl AlgBuilder for AdamConstructor {
    type Output = Adam;

    fn build(self, len: usize) -> Self::Output {
        Adam::new(self.builder, len)
    }
}
