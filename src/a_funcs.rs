use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};

#[enum_dispatch]
pub trait ActivFunc {
    fn evaluate(&self, x: f32) -> f32;
    /// Derivative of the function given both its input and its output.
    fn derivative(&self, inp: f32, out: f32) -> f32;
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq)]
pub struct Sigmoid;
impl ActivFunc for Sigmoid {
    fn evaluate(&self, x: f32) -> f32 {
        crate::loss::sigmoid(x)
    }
    fn derivative(&self, _: f32, out: f32) -> f32 {
        out * (1. - out)
    }
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq)]
pub struct Identity;
impl ActivFunc for Identity {
    fn evaluate(&self, x: f32) -> f32 {
        x
    }
    fn derivative(&self, _: f32, _: f32) -> f32 {
        1.
    }
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq)]
pub struct TanH;
impl ActivFunc for TanH {
    fn evaluate(&self, x: f32) -> f32 {
        x.tanh()
    }
    fn derivative(&self, _inp: f32, out: f32) -> f32 {
        1. - out * out
    }
}

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq)]
pub struct ReLU;
impl ActivFunc for ReLU {
    fn evaluate(&self, x: f32) -> f32 {
        f32::max(x, 0.)
    }
    fn derivative(&self, inp: f32, _out: f32) -> f32 {
        if inp > 0. {
            1.
        } else {
            0.
        }
    }
}

/// ReLU which lets a small fraction of negative inputs through.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq)]
pub struct LeakyReLU {
    pub slope: f32,
}

impl LeakyReLU {
    pub fn new(slope: f32) -> Self {
        Self { slope }
    }
}

impl Default for LeakyReLU {
    fn default() -> Self {
        Self { slope: 0.2 }
    }
}

impl ActivFunc for LeakyReLU {
    fn evaluate(&self, x: f32) -> f32 {
        if x > 0. {
            x
        } else {
            self.slope * x
        }
    }
    fn derivative(&self, inp: f32, _out: f32) -> f32 {
        if inp > 0. {
            1.
        } else {
            self.slope
        }
    }
}

/// Any of the activation functions above, chosen at runtime but dispatched without vtables.
#[enum_dispatch(ActivFunc)]
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq)]
pub enum Activation {
    Sigmoid,
    Identity,
    TanH,
    ReLU,
    LeakyReLU,
}

#[cfg(test)]
#[derive(Clone, Copy, Serialize, Deserialize, Debug)]
/// This activation function is used for testing as it transforms its output in a straightforward way
/// which makes it easy to check the validity of the outputs
pub struct Test;
#[cfg(test)]
impl ActivFunc for Test {
    fn evaluate(&self, x: f32) -> f32 {
        2. * x
    }
    fn derivative(&self, _inp: f32, _out: f32) -> f32 {
        2.
    }
}
