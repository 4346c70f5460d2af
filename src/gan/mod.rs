pub mod objective;

pub use objective::{GanLoss, GeneratorObjective};

use crate::{
    batch::{Batch, SampleShape},
    config::GanConfig,
    device::Device,
    error::GanError,
    logger::{Logger, MockLogger},
    loss::BceWithLogits,
    network::{FeedForward, Network},
    optimizer::OptimizerAlg,
    storage::GradStorage,
};

use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

/// A generator and a discriminator playing against each other.
///
/// The generator maps `z_dim` noise values to a sample, the discriminator maps a sample to a
/// single realness logit. Both are plain [Network]s; the model owns a gradient storage for each.
pub struct Gan<G = FeedForward, D = FeedForward> {
    name: String,
    z_dim: usize,
    sample_shape: SampleShape,

    generator: G,
    discriminator: D,

    g_grads: GradStorage,
    d_grads: GradStorage,
    // receives discriminator weight gradients while backpropagating into the generator
    scratch: GradStorage,

    logger: Box<dyn Logger>,
    step: u64,
}

impl Gan {
    /// Builds the generator and discriminator described by `config`.
    pub fn from_config(config: &GanConfig) -> Result<Self, GanError> {
        Gan::new(
            config.name.clone(),
            config.z_dim,
            config.sample_shape,
            config.generator()?,
            config.discriminator()?,
        )
    }
}

impl<G, D> Gan<G, D>
where
    G: Network,
    D: Network,
{
    pub fn new<S: Into<String>>(
        name: S,
        z_dim: usize,
        sample_shape: SampleShape,
        generator: G,
        discriminator: D,
    ) -> Result<Self, GanError> {
        let check = |what, expected: usize, received: usize| {
            if expected == received {
                Ok(())
            } else {
                Err(GanError::Incompatible {
                    what,
                    expected,
                    received,
                })
            }
        };
        check("generator input", z_dim, generator.input().size())?;
        check("generator output", sample_shape.size(), generator.output().size())?;
        check("discriminator input", sample_shape.size(), discriminator.input().size())?;
        check("discriminator output", 1, discriminator.output().size())?;

        Ok(Self {
            name: name.into(),
            z_dim,
            sample_shape,
            g_grads: generator.gradient_storage(),
            d_grads: discriminator.gradient_storage(),
            scratch: discriminator.gradient_storage(),
            generator,
            discriminator,
            logger: Box::new(MockLogger),
            step: 0,
        })
    }

    pub fn with_logger<L: Logger + 'static>(mut self, logger: L) -> Self {
        self.set_logger(logger);
        self
    }

    pub fn set_logger<L: Logger + 'static>(&mut self, logger: L) {
        self.logger = Box::new(logger);
    }

    /// Computes the discriminator loss and the non-saturating generator loss on `x_real`
    /// and a batch of fakes generated from noise drawn with `rng`.
    ///
    /// `d_loss = mean(-log σ(D(x_real))) + mean(-log(1 - σ(D(G(z)))))`
    /// `g_loss = mean(-log σ(D(G(z))))`
    pub fn loss_nonsaturating<'a, R>(
        &mut self,
        x_real: &'a Batch,
        device: Device,
        rng: &mut R,
    ) -> Result<GanLoss<'a>, GanError>
    where
        R: Rng + ?Sized,
    {
        self.losses(x_real, device, rng, GeneratorObjective::NonSaturating)
    }

    /// Same as [loss_nonsaturating](Self::loss_nonsaturating), but the generator loss is the
    /// minimax `g_loss = mean(log(1 - σ(D(G(z)))))`.
    pub fn loss_saturating<'a, R>(
        &mut self,
        x_real: &'a Batch,
        device: Device,
        rng: &mut R,
    ) -> Result<GanLoss<'a>, GanError>
    where
        R: Rng + ?Sized,
    {
        self.losses(x_real, device, rng, GeneratorObjective::Minimax)
    }

    pub fn losses<'a, R>(
        &mut self,
        x_real: &'a Batch,
        device: Device,
        rng: &mut R,
        objective: GeneratorObjective,
    ) -> Result<GanLoss<'a>, GanError>
    where
        R: Rng + ?Sized,
    {
        device.ensure_available()?;
        self.check_batch(x_real)?;

        let n = x_real.len();
        let z: Vec<f32> = StandardNormal
            .sample_iter(&mut *rng)
            .take(n * self.z_dim)
            .collect();
        let x_fake = self.generate(&z, n);

        let d_real = self.discriminate(x_real)?;
        let d_fake = self.discriminate(&x_fake)?;

        let real = BceWithLogits.against(&d_real, 1.);
        let fake = BceWithLogits.against(&d_fake, 0.);
        let gen = objective.eval(&d_fake);

        let d_loss = real.loss + fake.loss;
        self.logger.losses(self.step, d_loss, gen.loss);
        self.step += 1;

        Ok(GanLoss {
            d_loss,
            g_loss: gen.loss,
            real_term: real.loss,
            fake_term: fake.loss,
            objective,
            x_real,
            z,
            x_fake,
            d_real,
            d_fake,
            d_real_grads: real.grads,
            d_fake_grads: fake.grads,
            g_fake_grads: gen.grads,
        })
    }

    /// Discriminator logit for every sample in `batch`.
    pub fn discriminate(&mut self, batch: &Batch) -> Result<Vec<f32>, GanError> {
        self.check_shape(batch)?;
        Ok(batch
            .samples()
            .map(|x| self.discriminator.predict(x)[0])
            .collect())
    }

    /// Generates `n` samples from fresh standard normal noise.
    pub fn sample<R>(&mut self, n: usize, rng: &mut R) -> Batch
    where
        R: Rng + ?Sized,
    {
        let z: Vec<f32> = StandardNormal
            .sample_iter(&mut *rng)
            .take(n * self.z_dim)
            .collect();
        self.generate(&z, n)
    }

    fn generate(&mut self, z: &[f32], n: usize) -> Batch {
        let mut batch = Batch::zeros(n, self.sample_shape);
        if self.z_dim == 0 {
            for i in 0..n {
                batch.sample_mut(i).copy_from_slice(self.generator.predict(&[]));
            }
        } else {
            for (i, z) in z.chunks_exact(self.z_dim).enumerate() {
                batch.sample_mut(i).copy_from_slice(self.generator.predict(z));
            }
        }
        batch
    }

    fn check_shape(&self, batch: &Batch) -> Result<(), GanError> {
        if batch.sample_shape() != self.sample_shape {
            return Err(GanError::ShapeMismatch {
                expected: self.sample_shape,
                received: batch.sample_shape(),
            });
        }
        Ok(())
    }

    fn check_batch(&self, batch: &Batch) -> Result<(), GanError> {
        if batch.is_empty() {
            return Err(GanError::EmptyBatch);
        }
        self.check_shape(batch)
    }

    /// Accumulates the gradients of `d_loss` with respect to the discriminator's weights.
    /// `loss` has to come from this model, with its networks unchanged since.
    pub fn backward_discriminator(&mut self, loss: &GanLoss<'_>) {
        let real = loss.x_real.samples().zip(&loss.d_real_grads);
        let fake = loss.x_fake.samples().zip(&loss.d_fake_grads);
        for (x, grad) in real.chain(fake) {
            self.discriminator.predict(x);
            self.discriminator.calc_gradients(&mut self.d_grads, &[*grad]);
        }
    }

    /// Accumulates the gradients of `g_loss` with respect to the generator's weights.
    /// The logit gradients are carried back through the discriminator to each fake sample
    /// and from there through the generator. The discriminator's own weights get no gradients.
    pub fn backward_generator(&mut self, loss: &GanLoss<'_>) {
        for (i, grad) in loss.g_fake_grads.iter().enumerate() {
            self.discriminator.predict(loss.x_fake.sample(i));
            let sample_grads = self
                .discriminator
                .calc_gradients(&mut self.scratch, &[*grad]);

            let z = &loss.z[i * self.z_dim..(i + 1) * self.z_dim];
            self.generator.predict(z);
            self.generator.calc_gradients(&mut self.g_grads, sample_grads);
        }
        self.scratch.zero();
    }

    /// Steps the discriminator's weights with the accumulated gradients, then clears them.
    pub fn update_discriminator<O: OptimizerAlg + ?Sized>(&mut self, alg: &mut O) {
        alg.update_weights(self.discriminator.weights_mut(), self.d_grads.raw());
        self.d_grads.zero();
    }

    /// Steps the generator's weights with the accumulated gradients, then clears them.
    pub fn update_generator<O: OptimizerAlg + ?Sized>(&mut self, alg: &mut O) {
        alg.update_weights(self.generator.weights_mut(), self.g_grads.raw());
        self.g_grads.zero();
    }

    pub fn zero_gradients(&mut self) {
        self.g_grads.zero();
        self.d_grads.zero();
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn z_dim(&self) -> usize {
        self.z_dim
    }

    pub fn sample_shape(&self) -> SampleShape {
        self.sample_shape
    }

    /// Number of loss evaluations so far.
    pub fn step(&self) -> u64 {
        self.step
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn generator_mut(&mut self) -> &mut G {
        &mut self.generator
    }

    pub fn discriminator(&self) -> &D {
        &self.discriminator
    }

    pub fn discriminator_mut(&mut self) -> &mut D {
        &mut self.discriminator
    }

    pub fn generator_gradients(&self) -> &[f32] {
        self.g_grads.raw()
    }

    pub fn discriminator_gradients(&self) -> &[f32] {
        self.d_grads.raw()
    }
}
