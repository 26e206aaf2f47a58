use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum TensorError {
    ShapeOverflow,
    ShapeMismatch { expected: usize, got: usize },
}

impl fmt::Display for TensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TensorError::ShapeOverflow => write!(f, "shape dimensions overflow when multiplied"),
            TensorError::ShapeMismatch { expected, got } => {
                write!(f, "shape mismatch: expected {expected} elements, got {got}")
            }
        }
    }
}

impl std::error::Error for TensorError {}

/// Dense row-major tensor. Heatmaps and fields use HWC order, frames use HWC
/// with interleaved channels.
#[derive(Clone, PartialEq)]
pub struct Tensor<T> {
    pub shape: Vec<usize>,
    pub data: Vec<T>,
}

impl<T: fmt::Debug> fmt::Debug for Tensor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tensor")
            .field("shape", &self.shape)
            .field("len", &self.data.len())
            .finish()
    }
}

/// Number of elements a shape holds, or `ShapeOverflow` when the product does not fit.
pub fn element_count(shape: &[usize]) -> Result<usize, TensorError> {
    shape.iter().try_fold(1usize, |product, &dim| {
        product.checked_mul(dim).ok_or(TensorError::ShapeOverflow)
    })
}

impl<T> Tensor<T> {
    pub fn new(shape: Vec<usize>, data: Vec<T>) -> Result<Self, TensorError> {
        let expected = element_count(&shape)?;
        if expected != data.len() {
            return Err(TensorError::ShapeMismatch {
                expected,
                got: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Shape with leading unit dimensions removed, keeping at least `min_rank` dims.
    pub fn squeezed_shape(&self, min_rank: usize) -> &[usize] {
        let mut shape = self.shape.as_slice();
        while shape.len() > min_rank && shape[0] == 1 {
            shape = &shape[1..];
        }
        shape
    }

    /// Element-wise conversion, keeping the shape.
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Tensor<U> {
        Tensor {
            shape: self.shape.clone(),
            data: self.data.iter().map(f).collect(),
        }
    }
}

impl<T: Default + Clone> Tensor<T> {
    pub fn zeros(shape: Vec<usize>) -> Result<Self, TensorError> {
        let product = element_count(&shape)?;
        let data = vec![T::default(); product];
        Ok(Self { shape, data })
    }
}
