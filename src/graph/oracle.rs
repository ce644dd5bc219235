//! Brute force references and instance generators shared by the graph tests.

use ndarray::prelude::*;
use proptest::{collection::vec, prelude::*, sample::Index};
use rand::{rngs::StdRng, SeedableRng};
use std::ops::RangeInclusive;

use crate::{instance::random_metric, CostMatrix, ParentMap};

/// 0 at (0,0), 1 at (1,0), 2 at (1,1), 3 at (0,1)
pub fn unit_square() -> CostMatrix {
    let corners: [[f64; 2]; 4] = [[0., 0.], [1., 0.], [1., 1.], [0., 1.]];
    CostMatrix::new(Array2::from_shape_fn((4, 4), |(i, j)| {
        let [dx, dy] = [corners[i][0] - corners[j][0], corners[i][1] - corners[j][1]];
        (dx * dx + dy * dy).sqrt()
    }))
    .unwrap()
}

/// Nodes on a line with unit gaps, every pair costed by its shortest path
pub fn path_graph(n: usize) -> CostMatrix {
    CostMatrix::new(Array2::from_shape_fn((n, n), |(i, j)| i.abs_diff(j) as f64)).unwrap()
}

pub fn metric_matrix(sizes: RangeInclusive<usize>) -> impl Strategy<Value = CostMatrix> {
    (sizes, any::<u64>())
        .prop_map(|(n, seed)| random_metric(n, &mut StdRng::seed_from_u64(seed)).unwrap())
}

/// Random spanning tree over a random number of nodes with a random root.
pub fn spanning_tree(max_len: usize) -> impl Strategy<Value = ParentMap> {
    (1..=max_len)
        .prop_flat_map(|n| {
            (
                Just((0..n).collect::<Vec<_>>()).prop_shuffle(),
                vec(any::<Index>(), n),
            )
        })
        .prop_map(|(labels, picks)| {
            let mut parents = vec![None; labels.len()];
            parents[labels[0]] = Some(labels[0]);
            for i in 1..labels.len() {
                parents[labels[i]] = Some(labels[picks[i].index(i)]);
            }
            ParentMap::new(labels[0], parents).unwrap()
        })
}

/// Minimum over every labelled tree, enumerated through Prüfer sequences.
pub fn brute_force_mst_weight(matrix: &CostMatrix) -> f64 {
    let n = matrix.len();
    if n <= 1 {
        return 0.;
    } else if n == 2 {
        return matrix[(0, 1)];
    }
    let mut sequence = vec![0; n - 2];
    let mut best = f64::INFINITY;
    loop {
        best = best.min(
            prufer_edges(&sequence, n)
                .into_iter()
                .map(|(a, b)| matrix[(a, b)])
                .sum::<f64>(),
        );
        // Advance like an odometer in base n
        let mut digit = 0;
        loop {
            if digit == sequence.len() {
                return best;
            }
            sequence[digit] += 1;
            if sequence[digit] < n {
                break;
            }
            sequence[digit] = 0;
            digit += 1;
        }
    }
}

fn prufer_edges(sequence: &[usize], n: usize) -> Vec<(usize, usize)> {
    let mut degree = vec![1; n];
    for &node in sequence {
        degree[node] += 1;
    }
    let mut edges = Vec::with_capacity(n - 1);
    for &node in sequence {
        let leaf = (0..n).find(|leaf| degree[*leaf] == 1).unwrap();
        edges.push((leaf, node));
        degree[leaf] -= 1;
        degree[node] -= 1;
    }
    let last = (0..n).filter(|node| degree[*node] == 1).collect::<Vec<_>>();
    edges.push((last[0], last[1]));
    edges
}

/// All pairs shortest path distances (Floyd-Warshall)
pub fn shortest_distances(matrix: &CostMatrix) -> Array2<f64> {
    let n = matrix.len();
    let mut distances = matrix.view().to_owned();
    for k in 0..n {
        for i in 0..n {
            for j in 0..n {
                let through_k = distances[[i, k]] + distances[[k, j]];
                if through_k < distances[[i, j]] {
                    distances[[i, j]] = through_k;
                }
            }
        }
    }
    distances
}

/// Cheapest Hamiltonian cycle, trying every order that starts at 0.
pub fn brute_force_tour_cost(matrix: &CostMatrix) -> f64 {
    fn search(matrix: &CostMatrix, order: &mut Vec<usize>, used: &mut [bool], cost: f64) -> f64 {
        let n = matrix.len();
        let last = *order.last().unwrap();
        if order.len() == n {
            return cost + matrix[(last, 0)];
        }
        let mut best = f64::INFINITY;
        for next in 1..n {
            if used[next] {
                continue;
            }
            used[next] = true;
            order.push(next);
            best = best.min(search(matrix, order, used, cost + matrix[(last, next)]));
            order.pop();
            used[next] = false;
        }
        best
    }
    let mut used = vec![false; matrix.len()];
    used[0] = true;
    search(matrix, &mut vec![0], &mut used, 0.)
}

/// Shortcut an Euler tour by shifting later duplicates out of the array in place.
///
/// Quadratic; kept only to check [crate::graph::tsp::shortcut] against.
/// The final entry (the root closing the tour) is never removed.
pub fn shifting_shortcut(mut visited: Vec<usize>) -> Vec<usize> {
    let mut limit = visited.len();
    let mut i = 0;
    while i + 1 < limit {
        let mut j = i + 1;
        while j + 1 < limit {
            if visited[j] != visited[i] {
                j += 1;
            } else {
                for k in j..limit - 1 {
                    visited[k] = visited[k + 1];
                }
                limit -= 1;
            }
        }
        i += 1;
    }
    visited.truncate(limit);
    visited
}

/// Check that `order` visits every node exactly once, starting at 0
pub fn is_hamiltonian(order: &[usize], n: usize) -> bool {
    let mut seen = vec![false; n];
    order.first() == Some(&0)
        && order.len() == n
        && order
            .iter()
            .all(|node| *node < n && !std::mem::replace(&mut seen[*node], true))
}

/// Recompute the cost of a closed tour naively
pub fn closed_tour_cost(matrix: &CostMatrix, order: &[usize]) -> f64 {
    order
        .iter()
        .zip(order.iter().cycle().skip(1))
        .map(|(from, to)| matrix[(*from, *to)])
        .sum()
}
