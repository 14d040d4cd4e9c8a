use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use super::{LoadErr, Result};
use crate::{INPUT_SIZE, NUM_CLASSES};

/// The trained weights and biases of the network.
///
/// Built once, read-only afterwards. Every constructor validates that the four arrays
/// chain into a `INPUT_SIZE -> hidden -> NUM_CLASSES` network, so the engine never has
/// to re-check the parameters themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterStore {
    w1: Array2<f32>,
    b1: Array1<f32>,
    w2: Array2<f32>,
    b2: Array1<f32>,
}

impl ParameterStore {
    /// Creates a new `ParameterStore`.
    ///
    /// # Arguments
    /// * `w1` - Input to hidden weights, shape `(INPUT_SIZE, hidden)`.
    /// * `b1` - Hidden bias, shape `(hidden)`.
    /// * `w2` - Hidden to output weights, shape `(hidden, NUM_CLASSES)`.
    /// * `b2` - Output bias, shape `(NUM_CLASSES)`.
    ///
    /// # Returns
    /// A new `ParameterStore` or a `LoadErr` if the shapes are inconsistent or any
    /// value isn't finite.
    pub fn new(w1: Array2<f32>, b1: Array1<f32>, w2: Array2<f32>, b2: Array1<f32>) -> Result<Self> {
        let hidden = w1.ncols();

        check_size("W1 rows", "input size", w1.nrows(), INPUT_SIZE)?;
        if hidden == 0 {
            return Err(LoadErr::SizeMismatch {
                a: "W1 columns",
                b: "hidden width",
                got: 0,
                expected: 1,
            });
        }
        check_size("B1", "W1 columns", b1.len(), hidden)?;
        check_size("W2 rows", "W1 columns", w2.nrows(), hidden)?;
        check_size("W2 columns", "number of classes", w2.ncols(), NUM_CLASSES)?;
        check_size("B2", "number of classes", b2.len(), NUM_CLASSES)?;

        check_finite("W1", w1.iter())?;
        check_finite("B1", b1.iter())?;
        check_finite("W2", w2.iter())?;
        check_finite("B2", b2.iter())?;

        Ok(Self { w1, b1, w2, b2 })
    }

    /// Returns the width of the hidden layer.
    pub fn hidden(&self) -> usize {
        self.w1.ncols()
    }

    /// Returns the amount of scalar parameters in the store.
    pub fn len(&self) -> usize {
        self.w1.len() + self.b1.len() + self.w2.len() + self.b2.len()
    }

    pub fn w1(&self) -> ArrayView2<'_, f32> {
        self.w1.view()
    }

    pub fn b1(&self) -> ArrayView1<'_, f32> {
        self.b1.view()
    }

    pub fn w2(&self) -> ArrayView2<'_, f32> {
        self.w2.view()
    }

    pub fn b2(&self) -> ArrayView1<'_, f32> {
        self.b2.view()
    }
}

fn check_size(a: &'static str, b: &'static str, got: usize, expected: usize) -> Result<()> {
    if got != expected {
        return Err(LoadErr::SizeMismatch {
            a,
            b,
            got,
            expected,
        });
    }

    Ok(())
}

fn check_finite<'a, I>(name: &'static str, mut values: I) -> Result<()>
where
    I: Iterator<Item = &'a f32>,
{
    if values.all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(LoadErr::NonFinite(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HIDDEN: usize = 4;

    fn arrays() -> (Array2<f32>, Array1<f32>, Array2<f32>, Array1<f32>) {
        (
            Array2::zeros((INPUT_SIZE, HIDDEN)),
            Array1::zeros(HIDDEN),
            Array2::zeros((HIDDEN, NUM_CLASSES)),
            Array1::zeros(NUM_CLASSES),
        )
    }

    #[test]
    fn accepts_consistent_shapes() {
        let (w1, b1, w2, b2) = arrays();
        let store = ParameterStore::new(w1, b1, w2, b2).unwrap();

        assert_eq!(store.hidden(), HIDDEN);
        assert_eq!(
            store.len(),
            INPUT_SIZE * HIDDEN + HIDDEN + HIDDEN * NUM_CLASSES + NUM_CLASSES
        );
    }

    #[test]
    fn rejects_wrong_input_size() {
        let (_, b1, w2, b2) = arrays();
        let w1 = Array2::zeros((INPUT_SIZE - 1, HIDDEN));

        let err = ParameterStore::new(w1, b1, w2, b2).unwrap_err();
        assert!(matches!(
            err,
            LoadErr::SizeMismatch {
                a: "W1 rows",
                got: 783,
                expected: INPUT_SIZE,
                ..
            }
        ));
    }

    #[test]
    fn rejects_hidden_bias_mismatch() {
        let (w1, _, w2, b2) = arrays();
        let b1 = Array1::zeros(HIDDEN + 1);

        let err = ParameterStore::new(w1, b1, w2, b2).unwrap_err();
        assert!(matches!(err, LoadErr::SizeMismatch { a: "B1", .. }));
    }

    #[test]
    fn rejects_hidden_weights_mismatch() {
        let (w1, b1, _, b2) = arrays();
        let w2 = Array2::zeros((HIDDEN + 2, NUM_CLASSES));

        let err = ParameterStore::new(w1, b1, w2, b2).unwrap_err();
        assert!(matches!(err, LoadErr::SizeMismatch { a: "W2 rows", .. }));
    }

    #[test]
    fn rejects_wrong_number_of_classes() {
        let (w1, b1, w2, _) = arrays();
        let b2 = Array1::zeros(NUM_CLASSES - 1);

        let err = ParameterStore::new(w1, b1, w2, b2).unwrap_err();
        assert!(matches!(err, LoadErr::SizeMismatch { a: "B2", .. }));
    }

    #[test]
    fn rejects_empty_hidden_layer() {
        let err = ParameterStore::new(
            Array2::zeros((INPUT_SIZE, 0)),
            Array1::zeros(0),
            Array2::zeros((0, NUM_CLASSES)),
            Array1::zeros(NUM_CLASSES),
        )
        .unwrap_err();

        assert!(matches!(err, LoadErr::SizeMismatch { got: 0, .. }));
    }

    #[test]
    fn rejects_non_finite_values() {
        let (w1, b1, mut w2, b2) = arrays();
        w2[[1, 3]] = f32::NAN;

        let err = ParameterStore::new(w1, b1, w2, b2).unwrap_err();
        assert!(matches!(err, LoadErr::NonFinite("W2")));
    }
}
