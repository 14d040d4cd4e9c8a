pub mod activations;
pub mod layers;
mod mlp;
mod model;

pub use mlp::{Mlp, forward, predict};
pub use model::{ForwardPass, Model, argmax};
