use clap::ValueEnum;
use ndarray::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

use super::{euler::euler_tour, first_minimum, mst::compute_mst, spt::compute_spt};
use crate::{math::compensated_sum, CostMatrix, ParentMap, Result, ZeroCostPolicy};

/// A closed tour: `order` visits every vertex once starting at 0, and `cost`
/// includes the edge from the last vertex back to the first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tour {
    pub order: Vec<usize>,
    pub cost: f64,
}

impl Tour {
    pub fn from_order(matrix: &CostMatrix, order: Vec<usize>) -> Self {
        let cost = compensated_sum(
            order
                .iter()
                .zip(order.iter().cycle().skip(1))
                .map(|(from, to)| matrix[(*from, *to)]),
        );
        Self { order, cost }
    }
}

/// The tour construction strategies that can be compared against each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Heuristic {
    NearestNeighbor,
    TwiceAroundMst,
    TwiceAroundSpt,
    EdgeScore,
}

impl Heuristic {
    pub const ALL: [Heuristic; 4] = [
        Heuristic::NearestNeighbor,
        Heuristic::TwiceAroundMst,
        Heuristic::TwiceAroundSpt,
        Heuristic::EdgeScore,
    ];

    /// The policy only matters to the heuristics built on shortest-path trees.
    pub fn run(self, matrix: &CostMatrix, policy: ZeroCostPolicy) -> Result<Tour> {
        match self {
            Heuristic::NearestNeighbor => Ok(nearest_neighbor(matrix)),
            Heuristic::TwiceAroundMst => twice_around_mst(matrix),
            Heuristic::TwiceAroundSpt => twice_around_spt(matrix, policy),
            Heuristic::EdgeScore => edge_score(matrix, policy),
        }
    }
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Heuristic::NearestNeighbor => "nearest-neighbor",
            Heuristic::TwiceAroundMst => "twice-around-mst",
            Heuristic::TwiceAroundSpt => "twice-around-spt",
            Heuristic::EdgeScore => "edge-score",
        };
        f.write_str(name)
    }
}

/// Greedily hop to the cheapest unvisited vertex, starting from 0, then return home.
///
/// Ties go to the lowest index. Never fails, but absent edges may be forced onto the tour
/// in which case the cost is infinite.
pub fn nearest_neighbor(matrix: &CostMatrix) -> Tour {
    let n = matrix.len();
    let mut visited = vec![false; n];
    let mut order = Vec::with_capacity(n);
    let mut current = 0;
    visited[current] = true;
    order.push(current);

    while let Some((nearest, _)) = first_minimum(
        (0..n)
            .filter(|candidate| !visited[*candidate])
            .map(|candidate| (candidate, matrix[(current, candidate)])),
    ) {
        visited[nearest] = true;
        order.push(nearest);
        current = nearest;
    }

    Tour::from_order(matrix, order)
}

/// Collapse an Euler tour into a Hamiltonian path by keeping only the first visit to each vertex.
///
/// Later visits only ever happen when the walk climbs back up the tree,
/// so on a metric instance skipping them never makes the tour longer.
pub fn shortcut(euler_tour: &[usize]) -> Vec<usize> {
    let len = euler_tour.iter().max().map_or(0, |max| max + 1);
    let mut seen = vec![false; len];
    euler_tour
        .iter()
        .copied()
        .filter(|vertex| !std::mem::replace(&mut seen[*vertex], true))
        .collect()
}

fn twice_around(matrix: &CostMatrix, tree: &ParentMap) -> Result<Tour> {
    let walk = euler_tour(tree)?;
    let tour = Tour::from_order(matrix, shortcut(&walk));
    debug!(
        "Shortcut a walk of {} steps into a tour of {} vertices, cost {}",
        walk.len(),
        tour.order.len(),
        tour.cost
    );
    Ok(tour)
}

/// Twice-around-the-tree: walk the MST, then shortcut repeated vertices.
///
/// At most twice the optimal cost on metric instances.
///
/// <https://en.wikipedia.org/wiki/Travelling_salesman_problem#Heuristic_and_approximation_algorithms>
pub fn twice_around_mst(matrix: &CostMatrix) -> Result<Tour> {
    twice_around(matrix, &compute_mst(matrix)?)
}

/// Twice-around-the-tree over the shortest-path tree from 0 instead of the MST.
///
/// No approximation bound, a baseline to compare the MST variant with.
pub fn twice_around_spt(matrix: &CostMatrix, policy: ZeroCostPolicy) -> Result<Tour> {
    twice_around(matrix, &compute_spt(matrix, 0, policy)?)
}

/// Count how often each directed edge `(vertex, parent)` appears across the shortest-path trees
/// rooted at every vertex. Entry `[[i, j]]` is the number of roots for which `j` is the parent of `i`.
/// The root's own self-entry is never counted.
pub fn edge_scores(matrix: &CostMatrix, policy: ZeroCostPolicy) -> Result<Array2<u32>> {
    let n = matrix.len();
    let mut scores = Array2::zeros((n, n));
    for root in 0..n {
        let tree = compute_spt(matrix, root, policy)?;
        for (parent, vertex) in tree.edges() {
            scores[[vertex, parent]] += 1;
        }
    }
    Ok(scores)
}

/// Vote for edges with [edge_scores], then walk greedily from 0 along the best voted edge
/// to an unreached vertex, returning home at the end.
///
/// Higher score wins. On equal scores the later candidate wins if its direct cost is
/// no greater than the incumbent's. O(v^3) overall.
pub fn edge_score(matrix: &CostMatrix, policy: ZeroCostPolicy) -> Result<Tour> {
    let n = matrix.len();
    let scores = edge_scores(matrix, policy)?;

    let mut reached = vec![false; n];
    let mut order = Vec::with_capacity(n);
    let mut current = 0;
    reached[current] = true;
    order.push(current);

    while order.len() < n {
        let mut best: Option<usize> = None;
        for candidate in (0..n).filter(|candidate| !reached[*candidate]) {
            best = match best {
                Some(incumbent)
                    if scores[[current, candidate]] < scores[[current, incumbent]]
                        || (scores[[current, candidate]] == scores[[current, incumbent]]
                            && matrix[(current, candidate)] > matrix[(current, incumbent)]) =>
                {
                    Some(incumbent)
                }
                _ => Some(candidate),
            };
        }
        // Some vertex is always unreached while the order is short
        let Some(next) = best else { break };
        reached[next] = true;
        order.push(next);
        current = next;
    }

    let tour = Tour::from_order(matrix, order);
    info!("Edge score tour over {} vertices costs {}", n, tour.cost);
    Ok(tour)
}
