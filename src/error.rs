use thiserror::Error;

/// Failures of the graph algorithms and of cost matrix validation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("cost matrix has no nodes")]
    EmptyMatrix,

    #[error("cost matrix is not square: row {row} has {len} entries, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("cost matrix entry ({row}, {col}) is NaN")]
    NotANumber { row: usize, col: usize },

    #[error("cost matrix entry ({row}, {col}) is negative: {value}")]
    NegativeCost { row: usize, col: usize, value: f64 },

    #[error("cost matrix diagonal entry ({index}, {index}) must be zero, found {value}")]
    NonZeroDiagonal { index: usize, value: f64 },

    #[error("root {root} is out of range for a graph with {len} nodes")]
    RootOutOfRange { root: usize, len: usize },

    #[error("invalid parent map: {0}")]
    InvalidParentMap(String),

    /// Some nodes could not be attached to the tree grown from `root`.
    #[error("graph is disconnected: {} node(s) unreachable from root {root}: {unreached:?}", unreached.len())]
    Disconnected { root: usize, unreached: Vec<usize> },
}
