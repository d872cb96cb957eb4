use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArrayError {
    #[error("expected a number or nested list of numbers, found {0}")]
    NotNumeric(&'static str),

    #[error("nested lists are ragged: expected length {expected} at depth {depth}, found {found}")]
    Ragged {
        depth: usize,
        expected: usize,
        found: usize,
    },

    #[error("nesting mixes numbers and lists at depth {0}")]
    MixedNesting(usize),

    #[error("value {0} is not finite")]
    NonFinite(f64),
}

/// Dense row-major `f64` array of arbitrary rank.
///
/// Rank 0 holds a single scalar with an empty shape.
#[derive(Debug, Clone, PartialEq)]
pub struct NdArray {
    shape: Vec<usize>,
    data: Vec<f64>,
}

impl NdArray {
    pub fn scalar(value: f64) -> Self {
        Self {
            shape: Vec::new(),
            data: vec![value],
        }
    }

    pub fn from_vec(data: Vec<f64>) -> Self {
        Self {
            shape: vec![data.len()],
            data,
        }
    }

    /// Builds a 2-D array from rows. Returns `None` if rows differ in length.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Option<Self> {
        let ncols = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|r| r.len() != ncols) {
            return None;
        }
        let shape = vec![rows.len(), ncols];
        let data = rows.into_iter().flatten().collect();
        Some(Self { shape, data })
    }

    /// Builds an array of the given shape. Returns `None` if `data.len()`
    /// does not match the product of `shape`.
    pub fn from_shape_vec(shape: Vec<usize>, data: Vec<f64>) -> Option<Self> {
        if shape.iter().product::<usize>() != data.len() {
            return None;
        }
        Some(Self { shape, data })
    }

    /// Coerces a JSON number or rectangular nested list of numbers.
    ///
    /// Integers are widened to `f64`. The shape is taken from the first
    /// element at each depth; every other element must agree with it.
    pub fn from_value(value: &Value) -> Result<Self, ArrayError> {
        let mut shape = Vec::new();
        let mut cursor = value;
        while let Value::Array(items) = cursor {
            shape.push(items.len());
            match items.first() {
                Some(first) => cursor = first,
                None => break,
            }
        }

        let mut data = Vec::with_capacity(shape.iter().product());
        collect(value, &shape, 0, &mut data)?;
        Ok(Self { shape, data })
    }

    pub fn to_value(&self) -> Value {
        if self.shape.is_empty() {
            return Value::from(self.data[0]);
        }
        build(&self.shape, &self.data)
    }

    pub fn check_finite(&self) -> Result<(), ArrayError> {
        match self.data.iter().find(|v| !v.is_finite()) {
            Some(&v) => Err(ArrayError::NonFinite(v)),
            None => Ok(()),
        }
    }

    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<f64> {
        self.data
    }

    /// Element at a multi-dimensional index, or `None` if out of bounds.
    pub fn get(&self, index: &[usize]) -> Option<f64> {
        if index.len() != self.shape.len() {
            return None;
        }
        let mut offset = 0;
        for (&i, &n) in index.iter().zip(&self.shape) {
            if i >= n {
                return None;
            }
            offset = offset * n + i;
        }
        self.data.get(offset).copied()
    }
}

fn collect(
    value: &Value,
    shape: &[usize],
    depth: usize,
    out: &mut Vec<f64>,
) -> Result<(), ArrayError> {
    match value {
        Value::Number(n) => {
            if depth != shape.len() {
                return Err(ArrayError::MixedNesting(depth));
            }
            let v = n.as_f64().ok_or(ArrayError::NotNumeric("number"))?;
            out.push(v);
            Ok(())
        }
        Value::Array(items) => {
            let expected = *shape.get(depth).ok_or(ArrayError::MixedNesting(depth))?;
            if items.len() != expected {
                return Err(ArrayError::Ragged {
                    depth,
                    expected,
                    found: items.len(),
                });
            }
            for item in items {
                collect(item, shape, depth + 1, out)?;
            }
            Ok(())
        }
        Value::Null => Err(ArrayError::NotNumeric("null")),
        Value::Bool(_) => Err(ArrayError::NotNumeric("boolean")),
        Value::String(_) => Err(ArrayError::NotNumeric("string")),
        Value::Object(_) => Err(ArrayError::NotNumeric("object")),
    }
}

fn build(shape: &[usize], data: &[f64]) -> Value {
    if shape.len() == 1 {
        return Value::Array(data.iter().copied().map(Value::from).collect());
    }
    let stride: usize = shape[1..].iter().product();
    let rows = (0..shape[0])
        .map(|i| build(&shape[1..], &data[i * stride..(i + 1) * stride]))
        .collect();
    Value::Array(rows)
}
