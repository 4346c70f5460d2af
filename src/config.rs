use crate::{
    a_funcs::{Activation, Identity, LeakyReLU, Sigmoid},
    batch::SampleShape,
    initializer::{Kaiming, Xavier},
    layers::DenseBuilder,
    network::{ConsError, FeedForward, LinearBuilder},
};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Describes a [Gan](crate::gan::Gan) made of two multilayer perceptrons.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GanConfig {
    pub name: String,
    /// Length of the noise vector fed to the generator.
    pub z_dim: usize,
    pub sample_shape: SampleShape,
    pub generator_hidden: Vec<usize>,
    pub discriminator_hidden: Vec<usize>,
    /// Slope of the LeakyReLU used by the hidden layers.
    pub leak: f32,
    pub seed: u64,
}

impl Default for GanConfig {
    fn default() -> Self {
        Self {
            name: "gan".to_owned(),
            z_dim: 2,
            sample_shape: SampleShape::new(1, 28, 28),
            generator_hidden: vec![128, 256],
            discriminator_hidden: vec![256, 128],
            leak: 0.2,
            seed: 0,
        }
    }
}

#[derive(Clone, Copy)]
enum Role {
    Generator = 1,
    Discriminator = 2,
}

impl GanConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let s = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config = serde_json::from_str(&s)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        let s = serde_json::to_string_pretty(self)?;
        fs::write(path, s).with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    // every layer of both networks gets its own stream of initial weights
    fn layer_seed(&self, role: Role, index: usize) -> u64 {
        self.seed
            .wrapping_mul(1_000_003)
            .wrapping_add((role as u64) << 32)
            .wrapping_add(index as u64)
    }

    fn hidden_layers<'a>(
        &'a self,
        sizes: &'a [usize],
        role: Role,
    ) -> impl Iterator<Item = DenseBuilder<Activation, Kaiming>> + 'a {
        sizes.iter().enumerate().map(move |(i, size)| {
            DenseBuilder::new(
                Activation::from(LeakyReLU::new(self.leak)),
                Kaiming::seeded(self.layer_seed(role, i)),
                *size,
                true,
                true,
            )
        })
    }

    /// `z_dim -> hidden (LeakyReLU) -> sample (Sigmoid)`
    pub fn generator(&self) -> Result<FeedForward, ConsError> {
        let hidden = &self.generator_hidden;
        LinearBuilder::new(self.z_dim)
            .layers(self.hidden_layers(hidden, Role::Generator))
            .layer(DenseBuilder::new(
                Activation::from(Sigmoid),
                Xavier::seeded(self.layer_seed(Role::Generator, hidden.len())),
                self.sample_shape.size(),
                true,
                true,
            ))
            .build()
    }

    /// `sample -> hidden (LeakyReLU) -> 1 (Identity)`
    pub fn discriminator(&self) -> Result<FeedForward, ConsError> {
        let hidden = &self.discriminator_hidden;
        LinearBuilder::new(self.sample_shape.size())
            .layers(self.hidden_layers(hidden, Role::Discriminator))
            .layer(DenseBuilder::new(
                Activation::from(Identity),
                Xavier::seeded(self.layer_seed(Role::Discriminator, hidden.len())),
                1,
                true,
                true,
            ))
            .build()
    }
}
