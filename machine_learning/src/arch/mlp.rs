use ndarray::ArrayView2;

use super::{ForwardPass, Model, activations::ActFn, layers::Dense};
use crate::{INPUT_SIZE, MlErr, Result, parameters::ParameterStore};

/// The digit classifier: `INPUT_SIZE -> hidden (ReLU) -> NUM_CLASSES (softmax)`.
///
/// It borrows its parameters, so any number of `Mlp`s can run concurrently over the
/// same `ParameterStore`.
#[derive(Clone, Debug)]
pub struct Mlp<'p> {
    hidden: Dense<'p>,
    output: Dense<'p>,
}

impl<'p> Mlp<'p> {
    /// Creates a new `Mlp` over the given parameters.
    pub fn new(params: &'p ParameterStore) -> Self {
        Self {
            hidden: Dense::new(params.w1(), params.b1(), ActFn::relu()),
            output: Dense::new(params.w2(), params.b2(), ActFn::softmax()),
        }
    }

    /// Classifies a single flattened image.
    ///
    /// # Arguments
    /// * `pixels` - A row-major 28x28 image, `INPUT_SIZE` values long.
    ///
    /// # Returns
    /// The predicted digit or an error if `pixels` has the wrong length.
    pub fn predict_one(&self, pixels: &[f32]) -> Result<usize> {
        let x = ArrayView2::from_shape((1, pixels.len()), pixels).map_err(|_| {
            MlErr::ShapeMismatch {
                what: "input columns",
                got: pixels.len(),
                expected: INPUT_SIZE,
            }
        })?;

        self.predict(x)?.pop().ok_or(MlErr::ShapeMismatch {
            what: "batch rows",
            got: 0,
            expected: 1,
        })
    }
}

impl Model for Mlp<'_> {
    fn forward(&self, x: ArrayView2<f32>) -> Result<ForwardPass> {
        if x.nrows() == 0 {
            return Err(MlErr::ShapeMismatch {
                what: "batch rows",
                got: 0,
                expected: 1,
            });
        }

        let (z1, a1) = self.hidden.forward(x)?;
        let (z2, a2) = self.output.forward(a1.view())?;

        Ok(ForwardPass { z1, a1, z2, a2 })
    }
}

/// Makes a forward pass of `x` through the network defined by `params`.
pub fn forward(x: ArrayView2<f32>, params: &ParameterStore) -> Result<ForwardPass> {
    Mlp::new(params).forward(x)
}

/// Classifies every row of `x` with the network defined by `params`.
pub fn predict(x: ArrayView2<f32>, params: &ParameterStore) -> Result<Vec<usize>> {
    Mlp::new(params).predict(x)
}
