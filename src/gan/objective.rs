use crate::batch::Batch;
use crate::loss::{BceWithLogits, Loss};

/// What the generator is trained to do with the discriminator's opinion of its samples.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeneratorObjective {
    /// Maximize `log D(G(z))`. Keeps a useful gradient while the discriminator is winning.
    NonSaturating,
    /// Minimize `log(1 - D(G(z)))`, the minimax game as first posed. Its gradient vanishes
    /// once the discriminator confidently rejects the fakes.
    Minimax,
}

impl GeneratorObjective {
    /// Generator loss and its gradients with respect to the fake logits.
    pub(crate) fn eval(&self, d_fake: &[f32]) -> Loss {
        match self {
            GeneratorObjective::NonSaturating => BceWithLogits.against(d_fake, 1.),
            GeneratorObjective::Minimax => {
                let Loss { loss, grads } = BceWithLogits.against(d_fake, 0.);
                Loss {
                    loss: -loss,
                    grads: grads.into_iter().map(|g| -g).collect(),
                }
            }
        }
    }
}

/// Losses of one evaluation of a [Gan](super::Gan), along with everything needed to backpropagate them.
///
/// `d_loss` and `g_loss` are plain scalars. The gradients with respect to every logit are kept next to
/// them, so [backward_discriminator](super::Gan::backward_discriminator) and
/// [backward_generator](super::Gan::backward_generator) can carry them into the networks.
#[derive(Clone, Debug)]
pub struct GanLoss<'a> {
    pub d_loss: f32,
    pub g_loss: f32,

    pub(super) real_term: f32,
    pub(super) fake_term: f32,
    pub(super) objective: GeneratorObjective,

    pub(super) x_real: &'a Batch,
    pub(super) z: Vec<f32>,
    pub(super) x_fake: Batch,

    pub(super) d_real: Vec<f32>,
    pub(super) d_fake: Vec<f32>,

    pub(super) d_real_grads: Vec<f32>,
    pub(super) d_fake_grads: Vec<f32>,
    pub(super) g_fake_grads: Vec<f32>,
}

impl<'a> GanLoss<'a> {
    /// The pair `(d_loss, g_loss)`.
    pub fn pair(&self) -> (f32, f32) {
        (self.d_loss, self.g_loss)
    }

    /// Part of `d_loss` coming from the real samples, `mean(-log σ(d_real))`.
    pub fn real_term(&self) -> f32 {
        self.real_term
    }

    /// Part of `d_loss` coming from the generated samples, `mean(-log(1 - σ(d_fake)))`.
    pub fn fake_term(&self) -> f32 {
        self.fake_term
    }

    pub fn objective(&self) -> GeneratorObjective {
        self.objective
    }

    pub fn x_real(&self) -> &Batch {
        self.x_real
    }

    /// Noise the fakes were generated from, one row of `z_dim` values per sample.
    pub fn z(&self) -> &[f32] {
        &self.z
    }

    pub fn x_fake(&self) -> &Batch {
        &self.x_fake
    }

    pub fn d_real(&self) -> &[f32] {
        &self.d_real
    }

    pub fn d_fake(&self) -> &[f32] {
        &self.d_fake
    }

    /// `∂d_loss/∂d_real`
    pub fn d_real_grads(&self) -> &[f32] {
        &self.d_real_grads
    }

    /// `∂d_loss/∂d_fake`
    pub fn d_fake_grads(&self) -> &[f32] {
        &self.d_fake_grads
    }

    /// `∂g_loss/∂d_fake`
    pub fn g_fake_grads(&self) -> &[f32] {
        &self.g_fake_grads
    }
}
