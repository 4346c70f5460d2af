use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Normal as NormalDist, StandardNormal};

//I used this blog post as reference to the initialization methods ->
//https://towardsdatascience.com/weight-initialization-in-neural-networks-a-journey-from-the-basics-to-kaiming-954fb9b47c79

/// An initializer turns into a stream of weights once it knows the shape of the layer.
pub trait Initializer {
    type Iter: Iterator<Item = f32>;
    fn construct(self, in_size: usize, size: usize) -> Self::Iter;
}

/// Iterator producing `scale` times a standard normal sample, forever.
pub struct ScaledNormal {
    rng: SmallRng,
    scale: f32,
}

impl Iterator for ScaledNormal {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.rng.sample::<f32, _>(StandardNormal) * self.scale)
    }
}

///Xavier initialization should be used for layers with symetric activation functions such as sigmoid or tanH
#[derive(Clone, Debug)]
pub struct Xavier {
    seed: u64,
}

impl Xavier {
    pub fn new() -> Self {
        Self::seeded(0)
    }

    pub fn seeded(seed: u64) -> Self {
        Self { seed }
    }
}

impl Initializer for Xavier {
    type Iter = ScaledNormal;

    fn construct(self, in_size: usize, _size: usize) -> Self::Iter {
        ScaledNormal {
            rng: SmallRng::seed_from_u64(self.seed),
            scale: 1. / (in_size as f32).sqrt(),
        }
    }
}

///Kaiming initialization should be used for layers with asymetric activation functions such as RELU
#[derive(Clone, Debug)]
pub struct Kaiming {
    seed: u64,
}

impl Kaiming {
    pub fn new() -> Self {
        Self::seeded(0)
    }

    pub fn seeded(seed: u64) -> Self {
        Self { seed }
    }
}

impl Initializer for Kaiming {
    type Iter = ScaledNormal;

    fn construct(self, in_size: usize, _size: usize) -> Self::Iter {
        ScaledNormal {
            rng: SmallRng::seed_from_u64(self.seed),
            scale: (2. / in_size as f32).sqrt(),
        }
    }
}

/// Draws weights from a normal distribution with zero mean and the given deviation.
#[derive(Clone, Debug)]
pub struct Normal {
    std: f32,
    seed: u64,
}

impl Normal {
    /// Panics if `std` is negative or not finite.
    pub fn new(std: f32, seed: u64) -> Self {
        assert!(
            std.is_finite() && std >= 0.,
            "Invalid standard deviation for Normal initialization: {}",
            std
        );
        Self { std, seed }
    }
}

pub struct NormalIter {
    rng: SmallRng,
    dist: NormalDist<f32>,
}

impl Iterator for NormalIter {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.rng.sample(&self.dist))
    }
}

impl Initializer for Normal {
    type Iter = NormalIter;

    fn construct(self, _in_size: usize, _size: usize) -> Self::Iter {
        let dist = NormalDist::new(0., self.std).unwrap_or_else(|e| {
            panic!(
                "Invalid standard deviation for Normal initialization: {} ({:?})",
                self.std, e
            )
        });
        NormalIter {
            rng: SmallRng::seed_from_u64(self.seed),
            dist,
        }
    }
}

///Always initializes weights to one
#[derive(Clone, Copy, Debug, Default)]
pub struct Ones;
impl Initializer for Ones {
    type Iter = std::iter::Repeat<f32>;

    fn construct(self, _: usize, _: usize) -> Self::Iter {
        std::iter::repeat(1.)
    }
}

///Always initializes weights to zero
#[derive(Clone, Copy, Debug, Default)]
pub struct Zeros;
impl Initializer for Zeros {
    type Iter = std::iter::Repeat<f32>;

    fn construct(self, _: usize, _: usize) -> Self::Iter {
        std::iter::repeat(0.)
    }
}

/// This initializer accepts an iterator over f32 values and uses them to initialize the weights.
/// Layer construction panics if the iterator runs out before every weight is set.
pub struct WeightInit<T> {
    iter: T,
}

impl<I: Iterator<Item = f32>> WeightInit<I> {
    pub fn new<T: IntoIterator<Item = f32, IntoIter = I>>(weights: T) -> Self {
        Self {
            iter: weights.into_iter(),
        }
    }
}

impl<I: Iterator<Item = f32>> Initializer for WeightInit<I> {
    type Iter = I;

    fn construct(self, _in_size: usize, _size: usize) -> Self::Iter {
        self.iter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mean_var(values: &[f32]) -> (f32, f32) {
        let n = values.len() as f32;
        let mean = values.iter().sum::<f32>() / n;
        let var = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f32>() / n;
        (mean, var)
    }

    #[test]
    fn seeded_initializers_are_reproducible() {
        let a: Vec<f32> = Kaiming::seeded(7).construct(10, 10).take(20).collect();
        let b: Vec<f32> = Kaiming::seeded(7).construct(10, 10).take(20).collect();
        let c: Vec<f32> = Kaiming::seeded(8).construct(10, 10).take(20).collect();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn xavier_scales_with_fan_in() {
        let values: Vec<f32> = Xavier::new().construct(100, 1).take(20_000).collect();
        let (mean, var) = mean_var(&values);
        assert!(mean.abs() < 0.01, "mean was {}", mean);
        assert!((var - 0.01).abs() < 0.001, "variance was {}", var);
    }

    #[test]
    fn normal_uses_given_deviation() {
        let values: Vec<f32> = Normal::new(0.5, 3).construct(1, 1).take(20_000).collect();
        let (_, var) = mean_var(&values);
        assert!((var - 0.25).abs() < 0.02, "variance was {}", var);
    }

    #[test]
    #[should_panic(expected = "Invalid standard deviation")]
    fn normal_rejects_negative_deviation() {
        Normal::new(-1., 0);
    }

    #[test]
    #[should_panic(expected = "Invalid standard deviation")]
    fn normal_rejects_nan_deviation() {
        Normal::new(f32::NAN, 0);
    }

    #[test]
    fn weight_init_yields_given_values() {
        let values: Vec<f32> = WeightInit::new(vec![1., 2., 3.]).construct(3, 1).collect();
        assert_eq!(values, [1., 2., 3.]);
    }
}
