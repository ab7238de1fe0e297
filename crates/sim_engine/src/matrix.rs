//! Flat, row-major storage for simulated price paths.
//!
//! # Memory Layout
//!
//! A [`PathMatrix`] holds `n_paths × (n_steps + 1)` prices in one contiguous
//! buffer: `data[path * (n_steps + 1) + step]`, where `step = 0` is the
//! initial price.

use crate::error::{SimError, SimResult};

/// Matrix of simulated price paths.
///
/// Row `i` is the trajectory of path `i`; column 0 is the initial price.
/// Only the simulator writes into a matrix; consumers get read-only access.
///
/// # Examples
///
/// ```rust
/// use sim_engine::PathMatrix;
///
/// let matrix = PathMatrix::from_flat(2, 1, vec![100.0, 101.0, 100.0, 99.0]).unwrap();
///
/// assert_eq!(matrix.row(1), &[100.0, 99.0]);
/// assert_eq!(matrix.final_prices(), vec![101.0, 99.0]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PathMatrix {
    /// Prices, row-major.
    data: Vec<f64>,
    /// Number of paths (rows).
    n_paths: usize,
    /// Number of time steps; each row holds `n_steps + 1` prices.
    n_steps: usize,
}

impl PathMatrix {
    /// Allocates a zero-filled matrix.
    ///
    /// Callers validate the dimensions first; the size must fit within
    /// [`crate::params::MAX_CELLS`].
    pub(crate) fn zeros(n_paths: usize, n_steps: usize) -> Self {
        Self {
            data: vec![0.0; n_paths * (n_steps + 1)],
            n_paths,
            n_steps,
        }
    }

    /// Builds a matrix from an existing row-major buffer.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidArgument`] if either dimension is zero or
    /// `data.len() != n_paths * (n_steps + 1)`.
    pub fn from_flat(n_paths: usize, n_steps: usize, data: Vec<f64>) -> SimResult<Self> {
        if n_paths == 0 {
            return Err(SimError::invalid("n_paths", "matrix must have at least one path"));
        }
        if n_steps == 0 {
            return Err(SimError::invalid("n_steps", "matrix must have at least one step"));
        }
        let expected = n_paths * (n_steps + 1);
        if data.len() != expected {
            return Err(SimError::invalid(
                "data",
                format!(
                    "expected {} values for {} paths x {} columns, got {}",
                    expected,
                    n_paths,
                    n_steps + 1,
                    data.len()
                ),
            ));
        }
        Ok(Self {
            data,
            n_paths,
            n_steps,
        })
    }

    /// Returns the number of paths.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Returns the number of time steps.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Returns the number of prices per row (`n_steps + 1`).
    #[inline]
    pub fn row_len(&self) -> usize {
        self.n_steps + 1
    }

    /// Returns the price of `path` at `step`, or `None` if out of bounds.
    #[inline]
    pub fn get(&self, path: usize, step: usize) -> Option<f64> {
        if path < self.n_paths && step <= self.n_steps {
            Some(self.data[path * self.row_len() + step])
        } else {
            None
        }
    }

    /// Returns the full trajectory of `path`.
    ///
    /// # Panics
    ///
    /// Panics if `path >= n_paths()`.
    #[inline]
    pub fn row(&self, path: usize) -> &[f64] {
        let offset = path * self.row_len();
        &self.data[offset..offset + self.row_len()]
    }

    /// Iterates over all rows in path order.
    #[inline]
    pub fn rows(&self) -> std::slice::ChunksExact<'_, f64> {
        self.data.chunks_exact(self.row_len())
    }

    /// Returns the terminal price of `path`.
    ///
    /// # Panics
    ///
    /// Panics if `path >= n_paths()`.
    #[inline]
    pub fn terminal(&self, path: usize) -> f64 {
        self.data[path * self.row_len() + self.n_steps]
    }

    /// Collects the last column (one terminal price per path).
    pub fn final_prices(&self) -> Vec<f64> {
        self.rows().map(|row| row[self.n_steps]).collect()
    }

    /// Returns the underlying row-major buffer.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Mutable access for the simulator.
    #[inline]
    pub(crate) fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Returns total memory used by the price buffer in bytes.
    #[inline]
    pub fn memory_usage(&self) -> usize {
        self.data.capacity() * std::mem::size_of::<f64>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PathMatrix {
        PathMatrix::from_flat(3, 2, vec![
            100.0, 101.0, 102.0, //
            100.0, 99.0, 98.0, //
            100.0, 100.5, 103.0,
        ])
        .unwrap()
    }

    #[test]
    fn test_dimensions() {
        let m = sample();
        assert_eq!(m.n_paths(), 3);
        assert_eq!(m.n_steps(), 2);
        assert_eq!(m.row_len(), 3);
        assert_eq!(m.as_slice().len(), 9);
    }

    #[test]
    fn test_row_and_get() {
        let m = sample();
        assert_eq!(m.row(1), &[100.0, 99.0, 98.0]);
        assert_eq!(m.get(2, 1), Some(100.5));
        assert_eq!(m.get(3, 0), None);
        assert_eq!(m.get(0, 3), None);
    }

    #[test]
    fn test_final_prices_are_last_column() {
        let m = sample();
        assert_eq!(m.final_prices(), vec![102.0, 98.0, 103.0]);
        assert_eq!(m.terminal(2), 103.0);
    }

    #[test]
    fn test_rows_iterator_covers_every_path() {
        let m = sample();
        assert_eq!(m.rows().count(), 3);
        assert!(m.rows().all(|row| row.len() == 3 && row[0] == 100.0));
    }

    #[test]
    fn test_from_flat_rejects_bad_shapes() {
        assert!(matches!(
            PathMatrix::from_flat(2, 2, vec![1.0; 5]),
            Err(SimError::InvalidArgument { name: "data", .. })
        ));
        assert!(matches!(
            PathMatrix::from_flat(0, 2, vec![]),
            Err(SimError::InvalidArgument { name: "n_paths", .. })
        ));
        assert!(matches!(
            PathMatrix::from_flat(1, 0, vec![1.0]),
            Err(SimError::InvalidArgument { name: "n_steps", .. })
        ));
    }

    #[test]
    fn test_zeros_layout() {
        let m = PathMatrix::zeros(4, 10);
        assert_eq!(m.as_slice().len(), 44);
        assert!(m.memory_usage() >= 44 * std::mem::size_of::<f64>());
    }
}
