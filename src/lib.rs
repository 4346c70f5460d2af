//! Non-saturating GAN losses on top of a small feed-forward network library.

pub mod a_funcs;
pub mod batch;
pub mod config;
pub mod device;
pub mod error;
pub mod gan;
pub mod initializer;
pub mod layers;
pub mod logger;
pub mod loss;
pub mod network;
pub mod optimizer;
pub mod storage;

pub use batch::{Batch, SampleShape};
pub use config::GanConfig;
pub use device::Device;
pub use error::GanError;
pub use gan::{Gan, GanLoss, GeneratorObjective};
