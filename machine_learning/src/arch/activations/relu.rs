use ndarray::Array2;

/// The rectified linear unit, `max(0, z)`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ReLU;

impl ReLU {
    pub fn new() -> Self {
        Self
    }

    /// NaN passes through untouched so it can still be detected downstream.
    pub fn f(&self, z: f32) -> f32 {
        if z < 0. { 0. } else { z }
    }

    pub fn df(&self, z: f32) -> f32 {
        if z > 0. { 1. } else { 0. }
    }

    /// Applies `f` to every element of `z`, reusing its buffer.
    pub fn forward(&self, z: Array2<f32>) -> Array2<f32> {
        z.mapv_into(|z| self.f(z))
    }
}
