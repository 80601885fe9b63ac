//! Dense numeric arrays carried by [`crate::Value::Array`].

use serde::{Deserialize, Serialize};

use crate::errors::{ErrorInfo, TypicalError};

fn shape_error(message: impl Into<String>) -> TypicalError {
    TypicalError::Call(ErrorInfo::new("array-shape", message))
}

/// Row-major n-dimensional array of `f64` values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NdArray {
    shape: Vec<usize>,
    data: Vec<f64>,
}

impl NdArray {
    /// Builds an array from a shape and row-major data.
    pub fn new(shape: Vec<usize>, data: Vec<f64>) -> Result<Self, TypicalError> {
        let expected: usize = shape.iter().product();
        if expected != data.len() {
            return Err(shape_error(format!(
                "shape {:?} expects {} elements but {} were provided",
                shape,
                expected,
                data.len()
            )));
        }
        Ok(Self { shape, data })
    }

    /// One-dimensional array over the provided values.
    pub fn from_vec(data: Vec<f64>) -> Self {
        Self {
            shape: vec![data.len()],
            data,
        }
    }

    /// One-dimensional array holding `0.0, 1.0, ..., (len - 1) as f64`.
    pub fn arange(len: usize) -> Self {
        Self::from_vec((0..len).map(|value| value as f64).collect())
    }

    /// Returns a copy with a new shape; at most one dimension may be `-1`
    /// and is then inferred from the element count.
    pub fn reshape(&self, dims: &[isize]) -> Result<Self, TypicalError> {
        let mut inferred = None;
        let mut known = 1usize;
        for (idx, &dim) in dims.iter().enumerate() {
            match dim {
                -1 if inferred.is_none() => inferred = Some(idx),
                -1 => return Err(shape_error("only one dimension can be inferred")),
                d if d < 0 => return Err(shape_error(format!("invalid dimension {d}"))),
                d => known *= d as usize,
            }
        }
        let mut shape: Vec<usize> = dims.iter().map(|&d| d.max(0) as usize).collect();
        if let Some(idx) = inferred {
            if known == 0 || self.data.len() % known != 0 {
                return Err(shape_error(format!(
                    "cannot reshape array of size {} into {:?}",
                    self.data.len(),
                    dims
                )));
            }
            shape[idx] = self.data.len() / known;
        }
        Self::new(shape, self.data.clone())
    }

    /// Array dimensions.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Number of dimensions.
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Total number of elements.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Flat row-major view of the elements.
    pub fn flat(&self) -> &[f64] {
        &self.data
    }

    /// Length of the first axis (zero-dimensional arrays report zero).
    pub fn len(&self) -> usize {
        self.shape.first().copied().unwrap_or(0)
    }

    /// Whether the first axis is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sub-array at position `index` along the first axis.
    pub fn row(&self, index: usize) -> Option<NdArray> {
        if self.ndim() < 2 || index >= self.len() {
            return None;
        }
        let inner: Vec<usize> = self.shape[1..].to_vec();
        let stride: usize = inner.iter().product();
        let start = index * stride;
        Some(Self {
            shape: inner,
            data: self.data[start..start + stride].to_vec(),
        })
    }
}

impl PartialEq for NdArray {
    fn eq(&self, other: &Self) -> bool {
        self.shape == other.shape
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(lhs, rhs)| lhs == rhs || (lhs.is_nan() && rhs.is_nan()))
    }
}
