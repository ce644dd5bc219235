use ndarray::prelude::*;
use std::ops::Index;

use crate::{Error, Result};

/// Complete weighted graph given as a dense n×n table of edge costs.
///
/// Entries are non-negative, the diagonal is zero and [f64::INFINITY] marks an absent edge.
/// Symmetry and the triangle inequality are assumed but not checked,
/// see [CostMatrix::is_symmetric].
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix(Array2<f64>);

impl CostMatrix {
    pub fn new(costs: Array2<f64>) -> Result<Self> {
        let (rows, cols) = costs.dim();
        if rows == 0 {
            return Err(Error::EmptyMatrix);
        }
        if rows != cols {
            return Err(Error::NotSquare {
                row: 0,
                len: cols,
                expected: rows,
            });
        }
        for ((row, col), &value) in costs.indexed_iter() {
            if value.is_nan() {
                return Err(Error::NotANumber { row, col });
            }
            if value < 0. {
                return Err(Error::NegativeCost { row, col, value });
            }
            if row == col && value != 0. {
                return Err(Error::NonZeroDiagonal { index: row, value });
            }
        }
        Ok(Self(costs))
    }

    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n = rows.len();
        if let Some((row, len)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|(_, len)| *len != n)
        {
            return Err(Error::NotSquare {
                row,
                len,
                expected: n,
            });
        }
        Self::new(Array2::from_shape_fn((n, n), |(i, j)| rows[i][j]))
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.0.nrows()
    }

    /// Always false, a validated matrix has at least one node
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn cost(&self, from: usize, to: usize) -> f64 {
        self.0[[from, to]]
    }

    pub fn row(&self, from: usize) -> ArrayView1<f64> {
        self.0.row(from)
    }

    pub fn view(&self) -> ArrayView2<f64> {
        self.0.view()
    }

    pub fn is_symmetric(&self) -> bool {
        self.0 == self.0.t()
    }

    pub(crate) fn check_root(&self, root: usize) -> Result<()> {
        if root < self.len() {
            Ok(())
        } else {
            Err(Error::RootOutOfRange {
                root,
                len: self.len(),
            })
        }
    }
}

impl Index<(usize, usize)> for CostMatrix {
    type Output = f64;

    fn index(&self, (from, to): (usize, usize)) -> &f64 {
        &self.0[[from, to]]
    }
}

impl TryFrom<Array2<f64>> for CostMatrix {
    type Error = Error;

    fn try_from(costs: Array2<f64>) -> Result<Self> {
        Self::new(costs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn accepts_metric_matrix() {
        let matrix = CostMatrix::from_rows(vec![
            vec![0., 1., 2.],
            vec![1., 0., 1.],
            vec![2., 1., 0.],
        ])
        .unwrap();
        assert_eq!(matrix.len(), 3);
        assert_eq!(matrix[(0, 2)], 2.);
        assert!(matrix.is_symmetric());
    }

    #[test]
    fn rejects_malformed_matrices() {
        assert_eq!(CostMatrix::from_rows(vec![]), Err(Error::EmptyMatrix));
        assert_eq!(
            CostMatrix::from_rows(vec![vec![0., 1.], vec![1.]]),
            Err(Error::NotSquare {
                row: 1,
                len: 1,
                expected: 2
            })
        );
        assert_eq!(
            CostMatrix::new(Array2::zeros((2, 3))),
            Err(Error::NotSquare {
                row: 0,
                len: 3,
                expected: 2
            })
        );
        assert_eq!(
            CostMatrix::from_rows(vec![vec![0., f64::NAN], vec![1., 0.]]),
            Err(Error::NotANumber { row: 0, col: 1 })
        );
        assert_eq!(
            CostMatrix::from_rows(vec![vec![0., 1.], vec![-1., 0.]]),
            Err(Error::NegativeCost {
                row: 1,
                col: 0,
                value: -1.
            })
        );
        assert_eq!(
            CostMatrix::from_rows(vec![vec![0., 1.], vec![1., 3.]]),
            Err(Error::NonZeroDiagonal {
                index: 1,
                value: 3.
            })
        );
    }

    #[test]
    fn absent_edges_are_infinite() {
        let matrix = CostMatrix::from_rows(vec![vec![0., f64::INFINITY], vec![f64::INFINITY, 0.]])
            .unwrap();
        assert!(matrix.cost(0, 1).is_infinite());
    }

    #[test]
    fn detects_asymmetry() {
        let matrix = CostMatrix::from_rows(vec![vec![0., 1.], vec![2., 0.]]).unwrap();
        assert!(!matrix.is_symmetric());
    }
}
