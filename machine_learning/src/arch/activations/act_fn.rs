use ndarray::Array2;

use super::{ReLU, Softmax};

/// The activation a `Dense` layer applies after its affine transform.
#[derive(Clone, Copy, Debug)]
pub enum ActFn {
    ReLU(ReLU),
    Softmax(Softmax),
}

impl ActFn {
    pub fn relu() -> Self {
        Self::ReLU(ReLU::new())
    }

    pub fn softmax() -> Self {
        Self::Softmax(Softmax::new())
    }

    pub fn forward(&self, z: Array2<f32>) -> Array2<f32> {
        match self {
            Self::ReLU(a) => a.forward(z),
            Self::Softmax(a) => a.forward(z),
        }
    }
}
