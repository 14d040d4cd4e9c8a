use ndarray::{Array2, Axis};

/// Row-wise softmax.
///
/// Each row is shifted by its maximum before exponentiating, so the largest exponent
/// is always `exp(0) = 1` and no magnitude of `z` can overflow. The normalizing sum is
/// accumulated in `f64`. Rows never interact.
#[derive(Clone, Copy, Debug, Default)]
pub struct Softmax;

impl Softmax {
    pub fn new() -> Self {
        Self
    }

    pub fn forward(&self, mut z: Array2<f32>) -> Array2<f32> {
        for mut row in z.axis_iter_mut(Axis(0)) {
            let max = row.fold(f32::NEG_INFINITY, |acc, &z| acc.max(z));
            row.mapv_inplace(|z| (z - max).exp());

            let sum: f64 = row.iter().map(|&e| e as f64).sum();
            row.mapv_inplace(|e| (e as f64 / sum) as f32);
        }

        z
    }
}
