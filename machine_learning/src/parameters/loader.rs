use std::{fs, path::Path};

use log::debug;
use ndarray::{Array1, Array2};
use safetensors::{Dtype, SafeTensors, tensor::TensorView};

use super::{LoadErr, ParameterStore, Result};

/// Tensor names inside the artifact, in the order the tuple was saved.
const W1: &str = "W1";
const W2: &str = "W2";
const B1: &str = "B1";
const B2: &str = "B2";

impl ParameterStore {
    /// Reads a `ParameterStore` from a safetensors file.
    ///
    /// # Arguments
    /// * `path` - The location of the artifact holding `W1`, `W2`, `B1` and `B2`.
    ///
    /// # Returns
    /// The validated parameters or a `LoadErr` if the file is missing, corrupt or
    /// holds an inconsistent network.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("reading parameters from {}", path.display());

        let bytes = fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    /// Parses a `ParameterStore` from an in-memory safetensors blob.
    ///
    /// # Arguments
    /// * `bytes` - A serialized safetensors buffer.
    ///
    /// # Returns
    /// The validated parameters or a `LoadErr`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let tensors = SafeTensors::deserialize(bytes)?;

        let mut extra: Vec<String> = tensors
            .names()
            .into_iter()
            .filter(|name| ![W1, W2, B1, B2].contains(&name.as_str()))
            .cloned()
            .collect();
        if !extra.is_empty() {
            extra.sort();
            return Err(LoadErr::UnexpectedTensors(extra));
        }

        let w1 = read_matrix(&tensors, W1)?;
        let w2 = read_matrix(&tensors, W2)?;
        let b1 = read_vector(&tensors, B1)?;
        let b2 = read_vector(&tensors, B2)?;

        Self::new(w1, b1, w2, b2)
    }

    /// Serializes the parameters into a safetensors blob with `F32` tensors.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        // `iter` walks in logical row-major order whatever the memory layout.
        let w1: Vec<f32> = self.w1().iter().copied().collect();
        let w2: Vec<f32> = self.w2().iter().copied().collect();
        let b1 = self.b1().to_vec();
        let b2 = self.b2().to_vec();

        let tensors = [
            (W1, f32_view(self.w1().shape(), &w1)?),
            (W2, f32_view(self.w2().shape(), &w2)?),
            (B1, f32_view(&[b1.len()], &b1)?),
            (B2, f32_view(&[b2.len()], &b2)?),
        ];

        Ok(safetensors::serialize(tensors, &None)?)
    }

    /// Writes the parameters to `path` in the format `ParameterStore::load` reads.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_bytes()?)?;
        Ok(())
    }
}

// safetensors is little-endian, as is every target this service is built for.
fn f32_view<'a>(shape: &[usize], data: &'a [f32]) -> Result<TensorView<'a>> {
    Ok(TensorView::new(
        Dtype::F32,
        shape.to_vec(),
        bytemuck::cast_slice(data),
    )?)
}

fn tensor<'data>(tensors: &SafeTensors<'data>, name: &'static str) -> Result<TensorView<'data>> {
    tensors
        .tensor(name)
        .map_err(|_| LoadErr::MissingTensor(name))
}

fn values(name: &'static str, view: &TensorView<'_>) -> Result<Vec<f32>> {
    let data = view.data();

    match view.dtype() {
        Dtype::F32 => Ok(bytemuck::pod_collect_to_vec::<u8, f32>(data)),
        Dtype::F64 => Ok(bytemuck::pod_collect_to_vec::<u8, f64>(data)
            .into_iter()
            .map(|v| v as f32)
            .collect()),
        dtype => Err(LoadErr::UnsupportedDtype { name, dtype }),
    }
}

fn read_matrix(tensors: &SafeTensors<'_>, name: &'static str) -> Result<Array2<f32>> {
    let view = tensor(tensors, name)?;

    let (rows, cols) = match view.shape() {
        &[rows, cols] => (rows, cols),
        shape => {
            let shape = shape.to_vec();
            return Err(LoadErr::BadRank { name, shape });
        }
    };

    Array2::from_shape_vec((rows, cols), values(name, &view)?).map_err(|_| LoadErr::BadRank {
        name,
        shape: vec![rows, cols],
    })
}

/// Biases are accepted both flat, `(n)`, and as a broadcast row, `(1, n)`.
fn read_vector(tensors: &SafeTensors<'_>, name: &'static str) -> Result<Array1<f32>> {
    let view = tensor(tensors, name)?;

    let len = match view.shape() {
        &[len] | &[1, len] => len,
        shape => {
            let shape = shape.to_vec();
            return Err(LoadErr::BadRank { name, shape });
        }
    };

    let values = values(name, &view)?;
    if values.len() != len {
        let shape = view.shape().to_vec();
        return Err(LoadErr::BadRank { name, shape });
    }

    Ok(Array1::from_vec(values))
}
