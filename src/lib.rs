//! Approximate solutions to the metric Traveling Salesman Problem over a dense cost matrix.
//!
//! The [graph] module holds the algorithms. [instance] and [report] are the
//! surfaces used by the command line tool to read problems and record results.

pub mod error;
pub mod graph;
pub mod instance;
pub mod math;
pub mod report;

pub use error::Error;
pub use graph::{
    matrix::CostMatrix,
    spt::ZeroCostPolicy,
    tree::ParentMap,
    tsp::{Heuristic, Tour},
};

pub type Result<T, E = Error> = std::result::Result<T, E>;
