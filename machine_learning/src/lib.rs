//! Inference for a two layer perceptron that classifies 28x28 handwritten digits.
//!
//! A [`ParameterStore`] is loaded once and then shared read-only by any number of
//! [`Mlp`]s, each one computing `softmax(relu(x · W1 + B1) · W2 + B2)`.

pub mod arch;
pub mod error;
pub mod parameters;
mod test;

pub use arch::{ForwardPass, Mlp, Model, forward, predict};
pub use error::{MlErr, Result};
pub use parameters::{LoadErr, ParameterStore};

/// Side of the square input images.
pub const IMAGE_SIDE: usize = 28;

/// Length of a flattened input image.
pub const INPUT_SIZE: usize = IMAGE_SIDE * IMAGE_SIDE;

/// Number of digit classes.
pub const NUM_CLASSES: usize = 10;
