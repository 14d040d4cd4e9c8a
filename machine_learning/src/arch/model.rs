use ndarray::{Array2, ArrayView1, ArrayView2};

use crate::{MlErr, Result};

/// Everything a forward pass computes, kept for callers that want more than the labels.
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardPass {
    /// Hidden pre-activation.
    pub z1: Array2<f32>,
    /// Hidden activation.
    pub a1: Array2<f32>,
    /// Output logits.
    pub z2: Array2<f32>,
    /// Output class probabilities, one distribution per row.
    pub a2: Array2<f32>,
}

pub trait Model {
    /// Makes a forward pass through the network.
    ///
    /// # Arguments
    /// * `x` - The input batch, one sample per row.
    ///
    /// # Returns
    /// Every intermediate activation or a `ShapeMismatch` if `x` can't be fed to the
    /// network.
    fn forward(&self, x: ArrayView2<f32>) -> Result<ForwardPass>;

    /// Classifies every row of `x`.
    ///
    /// # Arguments
    /// * `x` - The input batch, one sample per row.
    ///
    /// # Returns
    /// The index of the most likely class for each row, in order. Ties go to the lowest
    /// index. Fails with `NumericAnomaly` if any output probability isn't finite.
    fn predict(&self, x: ArrayView2<f32>) -> Result<Vec<usize>> {
        let ForwardPass { a2, .. } = self.forward(x)?;

        if !a2.iter().all(|p| p.is_finite()) {
            return Err(MlErr::NumericAnomaly {
                what: "output probabilities",
            });
        }

        Ok(a2.rows().into_iter().map(argmax).collect())
    }
}

/// Returns the position of the first maximum in `row`.
pub fn argmax(row: ArrayView1<f32>) -> usize {
    row.iter()
        .enumerate()
        .fold((0, f32::NEG_INFINITY), |(best, max), (i, &p)| {
            if p > max { (i, p) } else { (best, max) }
        })
        .0
}
