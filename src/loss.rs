/// A loss value together with its gradients with respect to every evaluated value.
#[derive(Clone, Debug, PartialEq)]
pub struct Loss {
    pub loss: f32,
    pub grads: Vec<f32>,
}

pub trait LossFunc {
    fn eval(&self, val: &[f32], target: &[f32]) -> Loss;
}

/// Logistic function, evaluated without overflowing for large inputs.
pub fn sigmoid(x: f32) -> f32 {
    if x >= 0. {
        1. / (1. + (-x).exp())
    } else {
        let e = x.exp();
        e / (1. + e)
    }
}

/// `ln(1 + e^x)` in a form that stays finite for any finite `x`.
pub fn softplus(x: f32) -> f32 {
    x.max(0.) + (-x.abs()).exp().ln_1p()
}

/// `ln(sigmoid(x))`, which is `-softplus(-x)`.
pub fn log_sigmoid(x: f32) -> f32 {
    -softplus(-x)
}

/// Binary cross-entropy on logits, averaged over all values.
/// Targets are probabilities of the positive class, usually exactly 0 or 1.
#[derive(Clone, Copy, Debug, Default)]
pub struct BceWithLogits;

impl BceWithLogits {
    /// Loss of every logit against the same target.
    pub fn against(&self, logits: &[f32], target: f32) -> Loss {
        let targets = vec![target; logits.len()];
        self.eval(logits, &targets)
    }
}

impl LossFunc for BceWithLogits {
    fn eval(&self, val: &[f32], target: &[f32]) -> Loss {
        assert_eq!(
            val.len(),
            target.len(),
            "Value vector must be the same length as target vector. val: {}, target: {}",
            val.len(),
            target.len()
        );

        let recip = 1. / val.len() as f32;
        let mut grads = Vec::with_capacity(val.len());
        let mut loss = 0.;
        for (x, y) in val.iter().copied().zip(target.iter().copied()) {
            // not softplus(x) - x * y, which cancels to zero for large x
            loss += y * softplus(-x) + (1. - y) * softplus(x);
            grads.push((sigmoid(x) - y) * recip);
        }

        Loss {
            loss: loss * recip,
            grads,
        }
    }
}
