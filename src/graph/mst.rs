use tracing::debug;

use super::first_minimum;
use crate::{CostMatrix, ParentMap, Result};

/// Compute the MST of a dense cost matrix with Prim's algorithm in O(v^2) time, rooted at node 0.
///
/// No priority queue: for every unattached vertex we keep the cheapest known edge into the tree
/// and the tree vertex offering it (its frontier-join), then scan for the global minimum.
/// Ties go to the lowest index.
///
/// Fails with [crate::Error::Disconnected] if some vertex has no finite edge into the tree.
///
/// <https://en.wikipedia.org/wiki/Prim%27s_algorithm#Description>
pub fn compute_mst(matrix: &CostMatrix) -> Result<ParentMap> {
    const ROOT: usize = 0;
    let n = matrix.len();

    // Kickstart MST with 1 vertex
    let mut tree = ParentMap::seed(ROOT, n);
    let mut cost = matrix.row(ROOT).to_vec();
    let mut frontier_join = vec![ROOT; n];

    while let Some((v, _)) = first_minimum(
        (0..n)
            .filter(|w| !tree.is_attached(*w) && cost[*w].is_finite())
            .map(|w| (w, cost[w])),
    ) {
        tree.attach(v, frontier_join[v]);
        for w in 0..n {
            if !tree.is_attached(w) && matrix[(v, w)] < cost[w] {
                cost[w] = matrix[(v, w)];
                frontier_join[w] = v;
            }
        }
    }

    let tree = tree.into_spanning()?;
    debug!("MST over {} vertices has weight {}", n, tree.weight(matrix));
    Ok(tree)
}
