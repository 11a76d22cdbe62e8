use crate::domain::validate::{validate_entries, validate_valuations};
use crate::error::{DivisionError, Result};

/// Dense, row-major, fixed-shape grid of reals.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

/// `allocation[i][j]` is the fraction of resource `j` given to agent `i`
pub type AllocationMatrix = Matrix;

impl Matrix {
    /// Build from row-major data; both dimensions must be non-zero and
    /// `data.len()` must equal `rows * cols`.
    pub fn from_flat(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(DivisionError::Input(format!(
                "a {}x{} matrix has no entries",
                rows, cols
            )));
        }
        if data.len() != rows * cols {
            return Err(DivisionError::Input(format!(
                "expected {} entries for a {}x{} matrix, got {}",
                rows * cols,
                rows,
                cols,
                data.len(),
            )));
        }
        Ok(Matrix { rows, cols, data })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    pub fn row_sums(&self) -> Vec<f64> {
        (0..self.rows).map(|i| self.row(i).iter().sum()).collect()
    }

    pub fn column_sums(&self) -> Vec<f64> {
        let mut sums = vec![0.0; self.cols];
        for i in 0..self.rows {
            for (sum, value) in sums.iter_mut().zip(self.row(i)) {
                *sum += value;
            }
        }
        sums
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.data.chunks(self.cols).map(<[f64]>::to_vec).collect()
    }
}

/// Agent-by-resource valuations: `valuation[i][j]` is what agent `i` gets
/// from one full unit of resource `j`.
///
/// Guaranteed at construction to have at least one agent and one resource,
/// and only finite, non-negative entries. Never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ValuationMatrix {
    inner: Matrix,
}

impl ValuationMatrix {
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self> {
        let (agents, resources) = validate_valuations(&rows)?;
        let data = rows.into_iter().flatten().collect();
        Ok(ValuationMatrix {
            inner: Matrix::from_flat(agents, resources, data)?,
        })
    }

    pub fn from_flat(agents: usize, resources: usize, data: Vec<f64>) -> Result<Self> {
        let inner = Matrix::from_flat(agents, resources, data)?;
        for agent in 0..agents {
            validate_entries(agent, inner.row(agent))?;
        }
        Ok(ValuationMatrix { inner })
    }

    pub fn agents(&self) -> usize {
        self.inner.rows()
    }

    pub fn resources(&self) -> usize {
        self.inner.cols()
    }

    pub fn get(&self, agent: usize, resource: usize) -> f64 {
        self.inner.get(agent, resource)
    }

    pub fn row(&self, agent: usize) -> &[f64] {
        self.inner.row(agent)
    }

    /// Largest entry; `0.0` when every agent values everything at zero.
    pub fn max_value(&self) -> f64 {
        self.inner.as_slice().iter().copied().fold(0.0, f64::max)
    }

    pub fn as_matrix(&self) -> &Matrix {
        &self.inner
    }

    /// Realized utility of every agent under `allocation`:
    /// `utility[i] = sum_j allocation[i][j] * valuation[i][j]`.
    pub fn utilities(&self, allocation: &AllocationMatrix) -> Vec<f64> {
        debug_assert_eq!(allocation.rows(), self.agents());
        debug_assert_eq!(allocation.cols(), self.resources());
        (0..self.agents())
            .map(|i| {
                self.row(i)
                    .iter()
                    .zip(allocation.row(i))
                    .map(|(value, share)| value * share)
                    .sum()
            })
            .collect()
    }
}
