#![allow(dead_code)]

use rusty_gan::{
    a_funcs::{Activation, Identity},
    initializer::Zeros,
    layers::DenseBuilder,
    network::{FeedForward, LinearBuilder, Network},
    Batch, Gan, GanConfig, SampleShape,
};

pub const SHAPE: SampleShape = SampleShape {
    channels: 1,
    height: 2,
    width: 2,
};

/// Single dense layer with every weight set to `weight` and every bias set to `bias`.
pub fn affine(in_size: usize, size: usize, weight: f32, bias: f32) -> FeedForward {
    let mut net: FeedForward = LinearBuilder::new(in_size)
        .layer(DenseBuilder::new(
            Activation::from(Identity),
            Zeros,
            size,
            true,
            true,
        ))
        .build()
        .unwrap();
    let params: Vec<f32> = std::iter::repeat(weight)
        .take(in_size * size)
        .chain(std::iter::repeat(bias).take(size))
        .collect();
    net.set_weights(&params);
    net
}

/// A generator that always produces zeros, judged by a discriminator computing
/// `weight * sum(x) + bias`.
pub fn fixed_gan(weight: f32, bias: f32) -> Gan {
    Gan::new(
        "fixed",
        2,
        SHAPE,
        affine(2, SHAPE.size(), 0., 0.),
        affine(SHAPE.size(), 1, weight, bias),
    )
    .unwrap()
}

pub fn ones(n: usize) -> Batch {
    Batch::from_fn(n, SHAPE, |_, _| 1.)
}

/// A config small enough for finite differences and repeated evaluation.
pub fn small_config(seed: u64) -> GanConfig {
    GanConfig {
        name: "small".to_owned(),
        z_dim: 3,
        sample_shape: SHAPE,
        generator_hidden: vec![6],
        discriminator_hidden: vec![5],
        seed,
        ..GanConfig::default()
    }
}

/// Values in [0, 1] forming a fixed pattern.
pub fn pattern(n: usize) -> Batch {
    Batch::from_fn(n, SHAPE, |s, i| ((s * 3 + i) % 5) as f32 / 4.)
}
