use crate::error::GanError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shape of a single sample: channels × height × width.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleShape {
    pub channels: usize,
    pub height: usize,
    pub width: usize,
}

impl SampleShape {
    pub fn new(channels: usize, height: usize, width: usize) -> Self {
        Self {
            channels,
            height,
            width,
        }
    }

    /// Number of floats in one sample.
    pub fn size(&self) -> usize {
        self.channels * self.height * self.width
    }
}

impl fmt::Display for SampleShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.channels, self.height, self.width)
    }
}

/// A batch of samples laid out as (batch, channel, height, width) in row-major order.
#[derive(Clone, Debug, PartialEq)]
pub struct Batch {
    len: usize,
    shape: SampleShape,
    data: Vec<f32>,
}

impl Batch {
    /// Wraps `data` as a batch of `len` samples. Fails if the data doesn't hold exactly that many.
    pub fn new(len: usize, shape: SampleShape, data: Vec<f32>) -> Result<Self, GanError> {
        let expected = len * shape.size();
        if data.len() != expected {
            return Err(GanError::InvalidBatch {
                expected,
                received: data.len(),
            });
        }
        Ok(Self { len, shape, data })
    }

    pub fn zeros(len: usize, shape: SampleShape) -> Self {
        Self {
            len,
            shape,
            data: vec![0.; len * shape.size()],
        }
    }

    /// Builds a batch where every float is `f(sample, index within sample)`.
    pub fn from_fn<F>(len: usize, shape: SampleShape, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> f32,
    {
        let size = shape.size();
        let data = (0..len * size).map(|i| f(i / size, i % size)).collect();
        Self { len, shape, data }
    }

    /// Number of samples in the batch.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn sample_shape(&self) -> SampleShape {
        self.shape
    }

    /// Full shape as `[batch, channels, height, width]`.
    pub fn dims(&self) -> [usize; 4] {
        [self.len, self.shape.channels, self.shape.height, self.shape.width]
    }

    pub fn sample(&self, idx: usize) -> &[f32] {
        let size = self.shape.size();
        &self.data[idx * size..(idx + 1) * size]
    }

    pub fn sample_mut(&mut self, idx: usize) -> &mut [f32] {
        let size = self.shape.size();
        &mut self.data[idx * size..(idx + 1) * size]
    }

    pub fn samples(&self) -> impl Iterator<Item = &[f32]> + '_ {
        let size = self.shape.size();
        (0..self.len).map(move |i| &self.data[i * size..(i + 1) * size])
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }

    /// Smallest and largest value in the batch, None if it's empty.
    pub fn range(&self) -> Option<(f32, f32)> {
        let mut iter = self.data.iter().copied();
        let first = iter.next()?;
        Some(iter.fold((first, first), |(lo, hi), x| (lo.min(x), hi.max(x))))
    }
}
