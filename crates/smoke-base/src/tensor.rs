use std::fmt;

#[derive(Debug, PartialEq)]
pub enum TensorError {
    ShapeOverflow,
    ShapeMismatch { expected: usize, got: usize },
    StackMismatch { expected: Vec<usize>, got: Vec<usize> },
    InvalidAxes { axes: Vec<usize>, ndim: usize },
    Empty,
}

impl fmt::Display for TensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TensorError::ShapeOverflow => write!(f, "shape dimensions overflow when multiplied"),
            TensorError::ShapeMismatch { expected, got } => {
                write!(f, "shape mismatch: expected {expected} elements, got {got}")
            }
            TensorError::StackMismatch { expected, got } => {
                write!(f, "cannot stack shape {got:?} onto {expected:?}")
            }
            TensorError::InvalidAxes { axes, ndim } => {
                write!(f, "axes {axes:?} are not a permutation of {ndim} dimensions")
            }
            TensorError::Empty => write!(f, "no tensors to stack"),
        }
    }
}

impl std::error::Error for TensorError {}

/// Dense row-major tensor: a shape plus a flat data vector.
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

fn element_count(shape: &[usize]) -> Result<usize, TensorError> {
    let mut product: usize = 1;
    for &dim in shape {
        product = product
            .checked_mul(dim)
            .ok_or(TensorError::ShapeOverflow)?;
    }
    Ok(product)
}

impl<T> Tensor<T> {
    pub fn new(shape: Vec<usize>, data: Vec<T>) -> Result<Self, TensorError> {
        let product = element_count(&shape)?;
        if product != data.len() {
            return Err(TensorError::ShapeMismatch {
                expected: product,
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

    /// Row-major strides, in elements.
    pub fn strides(&self) -> Vec<usize> {
        let mut strides = vec![1; self.shape.len()];
        for d in (0..self.shape.len().saturating_sub(1)).rev() {
            strides[d] = strides[d + 1] * self.shape[d + 1];
        }
        strides
    }

    /// Borrow the `index`-th sub-tensor along the first axis as a flat slice.
    ///
    /// For a clip of shape `[T, H, W, C]` this is the data of frame `index`.
    pub fn slice(&self, index: usize) -> Option<&[T]> {
        let (&outer, inner) = self.shape.split_first()?;
        if index >= outer {
            return None;
        }
        let step: usize = inner.iter().product();
        self.data.get(index * step..(index + 1) * step)
    }

    /// Apply `f` to every element, keeping the shape.
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Tensor<U> {
        Tensor {
            shape: self.shape.clone(),
            data: self.data.iter().map(f).collect(),
        }
    }
}

impl<T: Clone> Tensor<T> {
    /// Reorder dimensions. `axes[i]` names the source dimension that becomes
    /// output dimension `i`, so `permute(&[3, 0, 1, 2])` turns THWC into CTHW.
    pub fn permute(&self, axes: &[usize]) -> Result<Tensor<T>, TensorError> {
        let ndim = self.ndim();
        let invalid = || TensorError::InvalidAxes {
            axes: axes.to_vec(),
            ndim,
        };
        if axes.len() != ndim {
            return Err(invalid());
        }
        let mut seen = vec![false; ndim];
        for &axis in axes {
            if axis >= ndim || seen[axis] {
                return Err(invalid());
            }
            seen[axis] = true;
        }

        let strides = self.strides();
        let shape: Vec<usize> = axes.iter().map(|&a| self.shape[a]).collect();
        let source_strides: Vec<usize> = axes.iter().map(|&a| strides[a]).collect();

        let mut data = Vec::with_capacity(self.data.len());
        let mut index = vec![0usize; ndim];
        for _ in 0..self.data.len() {
            let offset: usize = index
                .iter()
                .zip(&source_strides)
                .map(|(i, s)| i * s)
                .sum();
            data.push(self.data[offset].clone());
            for d in (0..ndim).rev() {
                index[d] += 1;
                if index[d] < shape[d] {
                    break;
                }
                index[d] = 0;
            }
        }

        Ok(Tensor { shape, data })
    }

    /// Stack equally shaped tensors along a new leading axis.
    pub fn stack(tensors: &[Tensor<T>]) -> Result<Tensor<T>, TensorError> {
        let first = tensors.first().ok_or(TensorError::Empty)?;
        let mut shape = Vec::with_capacity(first.ndim() + 1);
        shape.push(tensors.len());
        shape.extend_from_slice(&first.shape);
        let total = element_count(&shape)?;

        let mut data = Vec::with_capacity(total);
        for tensor in tensors {
            if tensor.shape != first.shape {
                return Err(TensorError::StackMismatch {
                    expected: first.shape.clone(),
                    got: tensor.shape.clone(),
                });
            }
            data.extend_from_slice(&tensor.data);
        }
        Ok(Tensor { shape, data })
    }

    /// Repeat the whole tensor `count` times along a new leading axis.
    pub fn repeat(&self, count: usize) -> Result<Tensor<T>, TensorError> {
        let mut shape = Vec::with_capacity(self.ndim() + 1);
        shape.push(count);
        shape.extend_from_slice(&self.shape);
        let total = element_count(&shape)?;

        let mut data = Vec::with_capacity(total);
        for _ in 0..count {
            data.extend_from_slice(&self.data);
        }
        Ok(Tensor { shape, data })
    }
}

impl<T: Default + Clone> Tensor<T> {
    pub fn zeros(shape: Vec<usize>) -> Result<Self, TensorError> {
        let product = element_count(&shape)?;
        let data = vec![T::default(); product];
        Ok(Self { shape, data })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strides_row_major() {
        let tensor = Tensor::<u8>::zeros(vec![2, 3, 4]).unwrap();
        assert_eq!(tensor.strides(), vec![12, 4, 1]);
    }

    #[test]
    fn test_strides_scalar() {
        let tensor = Tensor::new(vec![], vec![1.0f32]).unwrap();
        assert!(tensor.strides().is_empty());
    }
}
