use ndarray::{linalg, prelude::*};

use crate::{MlErr, Result, arch::activations::ActFn};

/// A fully connected layer over borrowed parameters.
///
/// The layer owns no weights, it only views the ones held by a `ParameterStore`, so
/// building one per request is free.
#[derive(Clone, Debug)]
pub struct Dense<'p> {
    w: ArrayView2<'p, f32>,
    b: ArrayView1<'p, f32>,
    act_fn: ActFn,
}

impl<'p> Dense<'p> {
    /// Creates a new `Dense` layer.
    ///
    /// # Arguments
    /// * `w` - The weights, shape `(inputs, outputs)`.
    /// * `b` - The biases, shape `(outputs)`.
    /// * `act_fn` - The activation applied after the affine transform.
    ///
    /// # Returns
    /// A new `Dense` instance.
    pub fn new(w: ArrayView2<'p, f32>, b: ArrayView1<'p, f32>, act_fn: ActFn) -> Self {
        Self { w, b, act_fn }
    }

    /// Returns the `(inputs, outputs)` dimension of this layer.
    pub fn dim(&self) -> (usize, usize) {
        self.w.dim()
    }

    /// Computes `z = x · w + b`, broadcasting `b` over the rows of `x`, and its activation.
    ///
    /// # Arguments
    /// * `x` - A batch with one sample per row.
    ///
    /// # Returns
    /// The pre-activation `z` and the activation `a`, or a `ShapeMismatch` if `x` doesn't
    /// have as many columns as this layer has inputs.
    pub fn forward(&self, x: ArrayView2<f32>) -> Result<(Array2<f32>, Array2<f32>)> {
        let (inputs, outputs) = self.dim();

        if x.ncols() != inputs {
            return Err(MlErr::ShapeMismatch {
                what: "input columns",
                got: x.ncols(),
                expected: inputs,
            });
        }

        let mut z = Array2::zeros((x.nrows(), outputs));
        linalg::general_mat_mul(1.0, &x, &self.w, 0.0, &mut z);
        z += &self.b;

        let a = self.act_fn.forward(z.clone());
        Ok((z, a))
    }
}
